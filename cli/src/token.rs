//! Saved GitHub token.
//!
//! One opaque string in `<config dir>/panoview/github_token`. It is never
//! validated locally; GitHub rejects bad tokens on the first call.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::CliError;

const APP_DIR: &str = "panoview";
const TOKEN_FILE: &str = "github_token";

/// Where the token lives under `config_dir`.
pub fn token_path_in(config_dir: &Path) -> PathBuf {
    config_dir.join(APP_DIR).join(TOKEN_FILE)
}

/// Token path in the platform config directory.
pub fn default_token_path() -> Result<PathBuf, CliError> {
    dirs::config_dir().map(|dir| token_path_in(&dir)).ok_or(CliError::NoConfigDir)
}

/// Read a saved token. A missing or blank file is `None`.
pub fn load(path: &Path) -> Result<Option<String>, CliError> {
    match fs::read_to_string(path) {
        Ok(raw) => {
            let token = raw.trim();
            Ok((!token.is_empty()).then(|| token.to_owned()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn save(path: &Path, token: &str) -> Result<(), CliError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CliError::InvalidArgument("token must not be empty".into()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, token)?;
    tracing::info!(path = %path.display(), "token saved");
    Ok(())
}

/// Remove the saved token. Returns whether one existed.
pub fn clear(path: &Path) -> Result<bool, CliError> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "token cleared");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Explicit token first, then the saved one.
pub fn resolve(explicit: Option<String>, path: &Path) -> Result<Option<String>, CliError> {
    match explicit.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty()) {
        Some(token) => Ok(Some(token)),
        None => load(path),
    }
}
