//! Resolves the ordered list of images shown by the viewer.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host fetches the remote directory listing and hands the outcome to
//! [`GalleryDataSource`]. A successful listing is filtered to image files,
//! stripped of hidden entries (public audience only), naturally sorted, and
//! mapped to display-ready URLs. A failed or empty listing silently falls back
//! to a synthetic `img1..imgN` sequence so the viewer stays demonstrable.
//!
//! The collection is always replaced whole; nothing here patches an existing
//! list.

#[cfg(test)]
#[path = "listing_test.rs"]
mod listing_test;

use url::Url;

use crate::config::GalleryConfig;
use crate::error::GalleryError;
use crate::naming::{display_name, is_hidden, is_image_name, natural_cmp};
use crate::store::{RemoteEntry, StoreError};

/// Who the listing is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// The public viewer: hidden entries are dropped.
    Public,
    /// The admin panel: hidden entries are kept and flagged.
    Admin,
}

/// Where a resolved list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingOrigin {
    Remote,
    Fallback,
}

/// One displayable image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// File name as stored, including any hidden prefix.
    pub file_name: String,
    /// Repository path of the file.
    pub path: String,
    /// Display-ready URL, routed through the resizing proxy.
    pub source_url: String,
    /// Canonical CDN URL, used for thumbnails and renames.
    pub original_url: String,
    /// Content hash from the listing; absent for synthetic entries.
    pub sha: Option<String>,
}

impl ImageEntry {
    /// Whether the file name carries the hidden marker.
    #[must_use]
    pub fn is_hidden(&self, prefix: &str) -> bool {
        is_hidden(&self.file_name, prefix)
    }

    /// The file name with any hidden marker removed.
    #[must_use]
    pub fn display_name<'a>(&'a self, prefix: &str) -> &'a str {
        display_name(&self.file_name, prefix)
    }

    /// A small proxy URL derived from the original URL.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` if the configured proxy base is not a valid URL.
    pub fn thumbnail_url(&self, config: &GalleryConfig, width: u32) -> Result<String, GalleryError> {
        proxy_url(config, &self.original_url, width)
    }
}

/// An ordered, non-empty list of images and its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub entries: Vec<ImageEntry>,
    pub origin: ListingOrigin,
}

/// Builds image lists from listing outcomes.
#[derive(Debug, Clone)]
pub struct GalleryDataSource {
    config: GalleryConfig,
}

impl GalleryDataSource {
    #[must_use]
    pub fn new(config: GalleryConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Contents API endpoint for the image folder.
    #[must_use]
    pub fn listing_url(&self) -> String {
        let config = &self.config;
        format!(
            "{}/repos/{}/{}/contents/{}",
            config.api_base.trim_end_matches('/'),
            config.repo_owner,
            config.repo_name,
            config.image_folder.trim_matches('/'),
        )
    }

    /// Resolve the public viewer's list.
    ///
    /// A transport failure, a malformed payload, or zero usable images all
    /// fall back to the synthetic list.
    ///
    /// # Errors
    ///
    /// Returns `EmptyResult` only if the fallback list is empty too, and
    /// `Precondition` if URLs cannot be built from the configuration.
    pub fn resolve(&self, listing: Result<Vec<RemoteEntry>, StoreError>) -> Result<Resolution, GalleryError> {
        match listing {
            Ok(entries) => {
                let images = self.filter_and_sort(entries, Audience::Public)?;
                if !images.is_empty() {
                    tracing::info!(count = images.len(), "loaded images from remote listing");
                    return Ok(Resolution { entries: images, origin: ListingOrigin::Remote });
                }
                tracing::warn!("remote listing has no usable images; using fallback list");
            }
            Err(e) => {
                tracing::warn!(error = %e, "remote listing failed; using fallback list");
            }
        }

        let fallback = self.fallback_entries()?;
        if fallback.is_empty() {
            return Err(GalleryError::EmptyResult);
        }
        Ok(Resolution { entries: fallback, origin: ListingOrigin::Fallback })
    }

    /// Resolve the admin list. Hidden entries are kept; there is no fallback.
    ///
    /// # Errors
    ///
    /// Returns `Transport` on listing failure and `EmptyResult` when the
    /// folder holds no images.
    pub fn resolve_admin(&self, listing: Result<Vec<RemoteEntry>, StoreError>) -> Result<Vec<ImageEntry>, GalleryError> {
        let entries = listing.map_err(|e| GalleryError::Transport(e.to_string()))?;
        let images = self.filter_and_sort(entries, Audience::Admin)?;
        if images.is_empty() {
            return Err(GalleryError::EmptyResult);
        }
        Ok(images)
    }

    /// Keep image files (and, for the public audience, visible ones), sorted
    /// naturally by file name.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` if URLs cannot be built from the configuration.
    pub fn filter_and_sort(&self, entries: Vec<RemoteEntry>, audience: Audience) -> Result<Vec<ImageEntry>, GalleryError> {
        let config = &self.config;
        let mut kept: Vec<RemoteEntry> = entries
            .into_iter()
            .filter(RemoteEntry::is_file)
            .filter(|entry| is_image_name(&entry.name, &config.image_extensions))
            .filter(|entry| audience == Audience::Admin || !is_hidden(&entry.name, &config.hidden_prefix))
            .collect();
        kept.sort_by(|a, b| natural_cmp(&a.name, &b.name));

        kept.into_iter()
            .map(|entry| self.image_entry(entry.name, entry.path, Some(entry.sha)))
            .collect()
    }

    /// Synthetic `img1.jpg .. imgN.jpg` under the image folder.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` if URLs cannot be built from the configuration.
    pub fn fallback_entries(&self) -> Result<Vec<ImageEntry>, GalleryError> {
        (1..=self.config.fallback_count)
            .map(|i| {
                let name = format!("img{i}.jpg");
                let path = self.config.folder_path(&name);
                self.image_entry(name, path, None)
            })
            .collect()
    }

    fn image_entry(&self, file_name: String, path: String, sha: Option<String>) -> Result<ImageEntry, GalleryError> {
        let original_url = cdn_url(&self.config, &path)?;
        let source_url = proxy_url(&self.config, &original_url, self.config.proxy_max_dimension)?;
        Ok(ImageEntry { file_name, path, source_url, original_url, sha })
    }
}

/// Canonical CDN location of a repository path. Each path segment is
/// percent-encoded.
///
/// # Errors
///
/// Returns `Precondition` if the CDN base is not a valid hierarchical URL.
pub fn cdn_url(config: &GalleryConfig, path: &str) -> Result<String, GalleryError> {
    let mut url = Url::parse(&config.cdn_base).map_err(|e| GalleryError::Precondition(format!("cdn_base: {e}")))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| GalleryError::Precondition("cdn_base cannot be a base URL".into()))?;
        segments.pop_if_empty();
        segments.push(&config.repo_owner).push(&config.repo_name);
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
    }
    Ok(url.into())
}

/// Route `original` through the resizing proxy with a capped longest edge.
///
/// # Errors
///
/// Returns `Precondition` if the proxy base is not a valid URL.
pub fn proxy_url(config: &GalleryConfig, original: &str, max_dimension: u32) -> Result<String, GalleryError> {
    let mut url =
        Url::parse(&config.proxy_base).map_err(|e| GalleryError::Precondition(format!("proxy_base: {e}")))?;
    url.query_pairs_mut()
        .append_pair("url", original)
        .append_pair("w", &max_dimension.to_string())
        .append_key_only("we")
        .append_pair("q", &config.proxy_quality.to_string())
        .append_pair("output", &config.proxy_format);
    Ok(url.into())
}
