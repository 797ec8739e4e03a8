use super::*;

fn entry(name: &str) -> RemoteEntry {
    RemoteEntry {
        name: name.to_owned(),
        path: format!("images/{name}"),
        download_url: Some(format!("https://raw.githubusercontent.com/o/r/main/images/{name}")),
        sha: format!("sha-{name}"),
        kind: "file".to_owned(),
    }
}

fn source() -> GalleryDataSource {
    GalleryDataSource::new(GalleryConfig::default())
}

fn names(entries: &[ImageEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.file_name.as_str()).collect()
}

// =============================================================
// Public resolution
// =============================================================

#[test]
fn resolve_sorts_naturally() {
    let listing = vec![entry("img10.jpg"), entry("img2.jpg"), entry("img1.jpg")];
    let resolution = source().resolve(Ok(listing)).expect("resolution");
    assert_eq!(resolution.origin, ListingOrigin::Remote);
    assert_eq!(names(&resolution.entries), vec!["img1.jpg", "img2.jpg", "img10.jpg"]);
}

#[test]
fn resolve_drops_hidden_and_non_images() {
    let listing = vec![entry("photo_a.jpg"), entry("hidden_photo_b.jpg"), entry("notes.txt")];
    let resolution = source().resolve(Ok(listing)).expect("resolution");
    assert_eq!(names(&resolution.entries), vec!["photo_a.jpg"]);
    let image = &resolution.entries[0];
    assert_eq!(image.path, "images/photo_a.jpg");
    assert_eq!(image.sha.as_deref(), Some("sha-photo_a.jpg"));
}

#[test]
fn resolve_skips_directories() {
    let mut dir = entry("folder.jpg");
    dir.kind = "dir".to_owned();
    let resolution = source().resolve(Ok(vec![dir, entry("a.png")])).expect("resolution");
    assert_eq!(names(&resolution.entries), vec!["a.png"]);
}

#[test]
fn resolve_falls_back_on_transport_failure() {
    let resolution = source()
        .resolve(Err(StoreError::Status { status: 403, body: "rate limited".into() }))
        .expect("resolution");
    assert_eq!(resolution.origin, ListingOrigin::Fallback);
    assert_eq!(resolution.entries.len(), 20);
    assert_eq!(resolution.entries[0].file_name, "img1.jpg");
    assert_eq!(resolution.entries[19].file_name, "img20.jpg");
    assert!(resolution.entries.iter().all(|e| e.sha.is_none()));
}

#[test]
fn resolve_falls_back_when_nothing_usable() {
    let resolution = source().resolve(Ok(vec![entry("readme.md")])).expect("resolution");
    assert_eq!(resolution.origin, ListingOrigin::Fallback);
}

#[test]
fn resolve_reports_empty_when_fallback_is_empty() {
    let config = GalleryConfig { fallback_count: 0, ..GalleryConfig::default() };
    let err = GalleryDataSource::new(config).resolve(Ok(vec![])).expect_err("should be empty");
    assert!(matches!(err, GalleryError::EmptyResult));
}

// =============================================================
// Admin resolution
// =============================================================

#[test]
fn admin_keeps_hidden_entries_flagged() {
    let listing = vec![entry("photo_a.jpg"), entry("hidden_photo_b.jpg"), entry("notes.txt")];
    let images = source().resolve_admin(Ok(listing)).expect("images");
    assert_eq!(names(&images), vec!["hidden_photo_b.jpg", "photo_a.jpg"]);
    let hidden = &images[0];
    assert!(hidden.is_hidden("hidden_"));
    assert_eq!(hidden.display_name("hidden_"), "photo_b.jpg");
    assert!(!images[1].is_hidden("hidden_"));
}

#[test]
fn admin_transport_failure_is_not_masked() {
    let err = source().resolve_admin(Err(StoreError::Request("offline".into()))).expect_err("should fail");
    assert_eq!(err.error_code(), "E_TRANSPORT");
}

#[test]
fn admin_empty_folder_is_empty_result() {
    let err = source().resolve_admin(Ok(vec![entry("notes.txt")])).expect_err("should be empty");
    assert_eq!(err.error_code(), "E_EMPTY_RESULT");
}

// =============================================================
// URL building
// =============================================================

#[test]
fn listing_url_targets_contents_api() {
    assert_eq!(
        source().listing_url(),
        "https://api.github.com/repos/ecwgrpmkt-stack/360_gallery/contents/images"
    );
}

#[test]
fn cdn_url_encodes_segments() {
    let url = cdn_url(&GalleryConfig::default(), "images/my photo.jpg").expect("url");
    assert_eq!(url, "https://cdn.jsdelivr.net/gh/ecwgrpmkt-stack/360_gallery/images/my%20photo.jpg");
}

#[test]
fn source_url_goes_through_proxy_with_cap() {
    let resolution = source().resolve(Ok(vec![entry("a.jpg")])).expect("resolution");
    let image = &resolution.entries[0];
    assert_eq!(image.original_url, "https://cdn.jsdelivr.net/gh/ecwgrpmkt-stack/360_gallery/images/a.jpg");
    assert!(image.source_url.starts_with("https://wsrv.nl/?url=https%3A%2F%2Fcdn.jsdelivr.net%2Fgh%2F"));
    assert!(image.source_url.contains("&w=8000&we&q=85&output=webp"));
}

#[test]
fn thumbnail_uses_original_url() {
    let resolution = source().resolve(Ok(vec![entry("a.jpg")])).expect("resolution");
    let thumb = resolution.entries[0].thumbnail_url(&GalleryConfig::default(), 200).expect("thumb");
    assert!(thumb.contains("&w=200&"));
    assert!(thumb.contains("images%2Fa.jpg"));
}

#[test]
fn invalid_proxy_base_is_precondition() {
    let config = GalleryConfig { proxy_base: "not a url".into(), ..GalleryConfig::default() };
    let err = GalleryDataSource::new(config).fallback_entries().expect_err("should fail");
    assert_eq!(err.error_code(), "E_PRECONDITION");
}
