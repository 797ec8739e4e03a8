//! CLI error type. `main` returns it so failures print with their exit code.

use gallery::GalleryError;
use gallery::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("missing GitHub token; pass --token, set PANOVIEW_GITHUB_TOKEN, or run `token save`")]
    MissingToken,
    #[error("no user config directory on this platform")]
    NoConfigDir,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("http client setup failed: {0}")]
    HttpClient(String),
    #[error("{} [{}]", .0, .0.error_code())]
    Gallery(#[from] GalleryError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}
