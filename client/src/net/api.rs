//! Remote listing fetch for the public viewer.
//!
//! Client-side (csr): a real HTTP call via `gloo-net`.
//! Native builds: a stub returning a transport error, so `resolve` takes the
//! fallback path.
//!
//! ERROR HANDLING
//! ==============
//! Every failure becomes a `StoreError`; `GalleryDataSource::resolve` decides
//! whether to fall back. Nothing here panics or surfaces raw `gloo` errors.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use gallery::store::{RemoteEntry, StoreError};

/// Media type requested from the GitHub Contents API.
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

#[cfg(any(test, feature = "csr"))]
fn request_failed(error: impl std::fmt::Display) -> StoreError {
    StoreError::Request(error.to_string())
}

#[cfg(any(test, feature = "csr"))]
fn listing_response(ok: bool, status: u16, body: String) -> Result<Vec<RemoteEntry>, StoreError> {
    if !ok {
        return Err(StoreError::from_status(status, body));
    }
    gallery::store::parse_listing(&body)
}

/// Fetch the image folder listing from `url`.
///
/// # Errors
///
/// Returns `StoreError` on transport failure, a non-success status, or an
/// unexpected body.
pub async fn fetch_listing(url: &str) -> Result<Vec<RemoteEntry>, StoreError> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::get(url)
            .header("Accept", GITHUB_ACCEPT)
            .send()
            .await
            .map_err(request_failed)?;
        let body = resp.text().await.map_err(request_failed)?;
        listing_response(resp.ok(), resp.status(), body)
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(StoreError::Request(format!("{url}: no HTTP client outside the browser")))
    }
}
