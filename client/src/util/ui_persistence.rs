//! Browser `localStorage` helpers for viewer preferences.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only the brush colour and width survive a reload. Eraser and popup state
//! are transient and skipped by `ToolState`'s serde attributes.

use canvas::input::ToolState;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::state::annotation::TOOL_PREFS_KEY;

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "csr")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        let raw = storage.get_item(key).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("ignoring unreadable preference {key}: {e}");
                None
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
        None
    }
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "csr")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        if storage.set_item(key, &raw).is_err() {
            log::warn!("could not persist {key}");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (key, value);
    }
}

/// Saved brush preferences, or the defaults.
pub fn load_tool_prefs() -> ToolState {
    load_json(TOOL_PREFS_KEY).unwrap_or_default()
}

pub fn save_tool_prefs(tools: &ToolState) {
    save_json(TOOL_PREFS_KEY, tools);
}
