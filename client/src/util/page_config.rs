//! Gallery configuration embedded in the host page.
//!
//! A deployment can override any `GalleryConfig` field with a
//! `<script type="application/json" id="panoview-config">` block. Missing or
//! invalid documents fall back to the defaults.

#[cfg(test)]
#[path = "page_config_test.rs"]
mod page_config_test;

use gallery::GalleryConfig;

pub const CONFIG_ELEMENT_ID: &str = "panoview-config";

/// Parse an embedded override document, keeping defaults on failure.
pub fn parse_or_default(raw: Option<&str>) -> GalleryConfig {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return GalleryConfig::default();
    };
    match GalleryConfig::from_json(raw) {
        Ok(config) => config,
        Err(e) => {
            #[cfg(feature = "csr")]
            log::warn!("ignoring page config: {e}");
            #[cfg(not(feature = "csr"))]
            let _ = e;
            GalleryConfig::default()
        }
    }
}

/// Read the configuration for this page.
pub fn load() -> GalleryConfig {
    #[cfg(feature = "csr")]
    {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        parse_or_default(raw.as_deref())
    }
    #[cfg(not(feature = "csr"))]
    {
        GalleryConfig::default()
    }
}
