//! Remote file store contract and the GitHub Contents API wire types.
//!
//! DESIGN
//! ======
//! The store is a key-value file tree with a commit-message side channel.
//! Every mutating call carries the content hash the caller last saw, so a
//! concurrent edit is rejected instead of overwritten. There is no locking
//! beyond that; the last successful write wins.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use serde::{Deserialize, Serialize};

/// Transport-level failures from a [`FileStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request could not be sent or its body not read.
    #[error("request failed: {0}")]
    Request(String),

    /// The path does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The content hash did not match (concurrent modification).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other non-success status.
    #[error("store responded {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Classify a non-success HTTP status.
    #[must_use]
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            404 => Self::NotFound(body),
            409 | 422 => Self::Conflict(body),
            _ => Self::Status { status, body },
        }
    }
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub download_url: Option<String>,
    /// Content hash used as the versioning token for mutations.
    pub sha: String,
    #[serde(rename = "type", default = "default_entry_kind")]
    pub kind: String,
}

fn default_entry_kind() -> String {
    "file".to_owned()
}

impl RemoteEntry {
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == "file"
    }
}

/// A file's base64 payload and its current content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    pub content: String,
    pub sha: String,
}

impl FileContent {
    /// The payload with the line breaks GitHub inserts removed.
    #[must_use]
    pub fn normalized_content(&self) -> String {
        self.content.chars().filter(|c| !c.is_ascii_whitespace()).collect()
    }
}

/// A create-or-update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRequest {
    pub path: String,
    pub content_base64: String,
    pub message: String,
    /// Required when the path already exists.
    pub expected_sha: Option<String>,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Serialize)]
pub struct PutContentBody<'a> {
    pub message: &'a str,
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
}

impl<'a> From<&'a WriteRequest> for PutContentBody<'a> {
    fn from(request: &'a WriteRequest) -> Self {
        Self {
            message: &request.message,
            content: &request.content_base64,
            sha: request.expected_sha.as_deref(),
        }
    }
}

/// Body of `DELETE /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Serialize)]
pub struct DeleteContentBody<'a> {
    pub message: &'a str,
    pub sha: &'a str,
}

#[derive(Debug, Deserialize)]
struct PutContentResponse {
    content: PutContentInfo,
}

#[derive(Debug, Deserialize)]
struct PutContentInfo {
    sha: String,
}

/// Parse a directory listing body.
///
/// # Errors
///
/// Returns `Decode` if the body is not a JSON array of entries (GitHub
/// answers a file path or an error with an object).
pub fn parse_listing(body: &str) -> Result<Vec<RemoteEntry>, StoreError> {
    serde_json::from_str(body).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Parse a single-file read body.
///
/// # Errors
///
/// Returns `Decode` if `content` or `sha` is missing.
pub fn parse_file(body: &str) -> Result<FileContent, StoreError> {
    serde_json::from_str(body).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Extract the new content hash from a write response body.
///
/// # Errors
///
/// Returns `Decode` if the response carries no `content.sha`.
pub fn parse_write_response(body: &str) -> Result<String, StoreError> {
    serde_json::from_str::<PutContentResponse>(body)
        .map(|response| response.content.sha)
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// Remote file store used by the admin operations.
#[async_trait::async_trait(?Send)]
pub trait FileStore {
    /// List the entries directly under `path`.
    async fn list_directory(&self, path: &str) -> Result<Vec<RemoteEntry>, StoreError>;

    /// Read a file's base64 content and hash.
    async fn read_file(&self, path: &str) -> Result<FileContent, StoreError>;

    /// Create or update a file, returning the new content hash.
    async fn write_file(&self, request: &WriteRequest) -> Result<String, StoreError>;

    /// Delete a file at the given content hash.
    async fn delete_file(&self, path: &str, message: &str, sha: &str) -> Result<(), StoreError>;
}
