use super::*;

#[test]
fn request_failed_keeps_message() {
    assert_eq!(request_failed("offline"), StoreError::Request("offline".to_owned()));
}

#[test]
fn non_success_status_is_classified() {
    assert_eq!(listing_response(false, 404, "missing".into()), Err(StoreError::NotFound("missing".into())));
    assert_eq!(
        listing_response(false, 403, "rate limited".into()),
        Err(StoreError::Status { status: 403, body: "rate limited".into() })
    );
}

#[test]
fn success_body_is_parsed() {
    let body = r#"[{"name": "a.jpg", "path": "images/a.jpg", "sha": "s1", "type": "file",
                   "download_url": "https://raw.example/a.jpg"}]"#;
    let entries = listing_response(true, 200, body.into()).expect("listing");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "a.jpg");
}

#[test]
fn malformed_body_is_a_decode_error() {
    assert!(matches!(listing_response(true, 200, "{}".into()), Err(StoreError::Decode(_))));
}
