//! Hygiene: scans the gallery sources for patterns the crate forbids.
//!
//! Every pattern has a budget of zero. The scan skips `*_test.rs` files,
//! which are free to `expect` and `panic!`.

use std::fs;
use std::path::{Path, PathBuf};

/// `(pattern, what it means)`.
const FORBIDDEN: &[(&str, &str)] = &[
    (".unwrap()", "panics on None/Err"),
    (".expect(", "panics on None/Err"),
    ("panic!(", "crashes the viewer"),
    ("unreachable!(", "crashes the viewer"),
    ("todo!(", "unfinished stub"),
    ("unimplemented!(", "unfinished stub"),
    ("let _ =", "discards a result without inspecting it"),
    (".ok()", "discards an error without inspecting it"),
    ("#[allow(dead_code)]", "hides unused code"),
    ("println!(", "bypasses tracing"),
];

fn production_sources(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            production_sources(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if is_rs && !is_test {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path, content));
            }
        }
    }
}

#[test]
fn sources_are_found() {
    let mut files = Vec::new();
    production_sources(Path::new("src"), &mut files);
    assert!(files.iter().any(|(path, _)| path.ends_with("lib.rs")), "run from the crate root");
}

#[test]
fn forbidden_patterns_stay_at_zero() {
    let mut files = Vec::new();
    production_sources(Path::new("src"), &mut files);

    let mut violations = Vec::new();
    for (path, content) in &files {
        for (number, line) in content.lines().enumerate() {
            if line.trim_start().starts_with("//") {
                continue;
            }
            for (pattern, reason) in FORBIDDEN {
                if line.contains(pattern) {
                    violations.push(format!("  {}:{}: `{pattern}` {reason}", path.display(), number + 1));
                }
            }
        }
    }
    assert!(violations.is_empty(), "forbidden patterns found:\n{}", violations.join("\n"));
}
