//! GitHub Contents API client implementing the gallery's `FileStore`.
//!
//! Thin HTTP wrapper over `/repos/{owner}/{repo}/contents/{path}`. Request
//! URLs and response classification are pure functions for testability.

#[cfg(test)]
#[path = "github_test.rs"]
mod github_test;

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use gallery::GalleryConfig;
use gallery::store::{
    DeleteContentBody, FileContent, FileStore, PutContentBody, RemoteEntry, StoreError, WriteRequest, parse_file,
    parse_listing, parse_write_response,
};
use reqwest::Url;

use crate::error::CliError;

const ACCEPT_JSON: &str = "application/vnd.github+json";
const ACCEPT_RAW: &str = "application/vnd.github.raw+json";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = "panoview-admin";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// CLIENT
// =============================================================================

pub struct GitHubStore {
    http: reqwest::Client,
    api_base: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GitHubStore {
    pub fn new(config: &GalleryConfig, token: Option<String>) -> Result<Self, CliError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| CliError::HttpClient(e.to_string()))?;
        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            owner: config.repo_owner.clone(),
            repo: config.repo_name.clone(),
            token,
        })
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> Result<Url, StoreError> {
        contents_url(&self.api_base, &self.owner, &self.repo, path)
    }

    fn request(&self, method: reqwest::Method, url: Url, accept: &str) -> reqwest::RequestBuilder {
        let request = self
            .http
            .request(method, url)
            .header("Accept", accept)
            .header("X-GitHub-Api-Version", API_VERSION);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_text(request: reqwest::RequestBuilder) -> Result<String, StoreError> {
        let response = request.send().await.map_err(|e| StoreError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| StoreError::Request(e.to_string()))?;
        classify(status, text)
    }

    /// Files over 1 MB come back with an empty `content`; fetch the raw bytes.
    async fn read_raw(&self, url: Url) -> Result<String, StoreError> {
        let response = self
            .request(reqwest::Method::GET, url, ACCEPT_RAW)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.map_err(|e| StoreError::Request(e.to_string()))?;
            return Err(StoreError::from_status(status, body));
        }
        let bytes = response.bytes().await.map_err(|e| StoreError::Request(e.to_string()))?;
        Ok(BASE64.encode(&bytes))
    }
}

#[async_trait::async_trait(?Send)]
impl FileStore for GitHubStore {
    async fn list_directory(&self, path: &str) -> Result<Vec<RemoteEntry>, StoreError> {
        let url = self.url(path)?;
        tracing::debug!(%url, "listing directory");
        let body = Self::send_text(self.request(reqwest::Method::GET, url, ACCEPT_JSON)).await?;
        parse_listing(&body)
    }

    async fn read_file(&self, path: &str) -> Result<FileContent, StoreError> {
        let url = self.url(path)?;
        let body = Self::send_text(self.request(reqwest::Method::GET, url.clone(), ACCEPT_JSON)).await?;
        let file = parse_file(&body)?;
        if !file.normalized_content().is_empty() {
            return Ok(file);
        }
        tracing::debug!(path, "inline content omitted; fetching raw");
        let content = self.read_raw(url).await?;
        Ok(FileContent { content, sha: file.sha })
    }

    async fn write_file(&self, request: &WriteRequest) -> Result<String, StoreError> {
        let url = self.url(&request.path)?;
        let body = PutContentBody::from(request);
        let text = Self::send_text(self.request(reqwest::Method::PUT, url, ACCEPT_JSON).json(&body)).await?;
        parse_write_response(&text)
    }

    async fn delete_file(&self, path: &str, message: &str, sha: &str) -> Result<(), StoreError> {
        let url = self.url(path)?;
        let body = DeleteContentBody { message, sha };
        Self::send_text(self.request(reqwest::Method::DELETE, url, ACCEPT_JSON).json(&body)).await?;
        Ok(())
    }
}

// =============================================================================
// PURE HELPERS
// =============================================================================

/// `{api_base}/repos/{owner}/{repo}/contents/{path}` with each segment
/// percent-encoded.
pub fn contents_url(api_base: &str, owner: &str, repo: &str, path: &str) -> Result<Url, StoreError> {
    let mut url = Url::parse(api_base).map_err(|e| StoreError::Request(format!("api_base: {e}")))?;
    {
        let mut segments =
            url.path_segments_mut().map_err(|()| StoreError::Request("api_base cannot be a base URL".into()))?;
        segments.pop_if_empty();
        segments.push("repos").push(owner).push(repo).push("contents");
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
    }
    Ok(url)
}

/// Map a response to its body or a classified `StoreError`.
pub fn classify(status: u16, body: String) -> Result<String, StoreError> {
    if (200..300).contains(&status) { Ok(body) } else { Err(StoreError::from_status(status, body)) }
}
