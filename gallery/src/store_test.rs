use super::*;

#[test]
fn from_status_classifies_common_codes() {
    assert_eq!(StoreError::from_status(404, "x".into()), StoreError::NotFound("x".into()));
    assert_eq!(StoreError::from_status(409, "x".into()), StoreError::Conflict("x".into()));
    assert_eq!(StoreError::from_status(422, "x".into()), StoreError::Conflict("x".into()));
    assert_eq!(StoreError::from_status(500, "x".into()), StoreError::Status { status: 500, body: "x".into() });
}

#[test]
fn parse_listing_reads_github_entries() {
    let body = r#"[
        {"name":"a.jpg","path":"images/a.jpg","sha":"s1","size":10,"download_url":"https://raw/a.jpg","type":"file"},
        {"name":"sub","path":"images/sub","sha":"s2","download_url":null,"type":"dir"}
    ]"#;
    let entries = parse_listing(body).expect("entries");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "a.jpg");
    assert_eq!(entries[0].download_url.as_deref(), Some("https://raw/a.jpg"));
    assert!(entries[0].is_file());
    assert!(!entries[1].is_file());
}

#[test]
fn parse_listing_rejects_error_object() {
    let body = r#"{"message":"API rate limit exceeded"}"#;
    assert!(matches!(parse_listing(body), Err(StoreError::Decode(_))));
}

#[test]
fn parse_file_normalizes_wrapped_base64() {
    let body = r#"{"content":"aGVs\nbG8=\n","sha":"abc","encoding":"base64"}"#;
    let file = parse_file(body).expect("file");
    assert_eq!(file.sha, "abc");
    assert_eq!(file.normalized_content(), "aGVsbG8=");
}

#[test]
fn parse_write_response_extracts_new_sha() {
    let body = r#"{"content":{"name":"a.jpg","sha":"new-sha"},"commit":{"sha":"c1"}}"#;
    assert_eq!(parse_write_response(body).expect("sha"), "new-sha");
    assert!(parse_write_response("{}").is_err());
}

#[test]
fn put_body_omits_absent_sha() {
    let request = WriteRequest {
        path: "images/a.jpg".into(),
        content_base64: "AAAA".into(),
        message: "Upload a.jpg".into(),
        expected_sha: None,
    };
    let json = serde_json::to_value(PutContentBody::from(&request)).expect("json");
    assert_eq!(json["content"], "AAAA");
    assert!(json.get("sha").is_none());
}
