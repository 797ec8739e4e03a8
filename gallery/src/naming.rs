//! File-name conventions: image extension filter, the hidden prefix, rename
//! targets, and natural ordering.
//!
//! Visibility is never stored as metadata. A file is hidden from the public
//! viewer exactly when its name starts with the configured prefix, and
//! toggling visibility is a rename that adds or removes that prefix.

#[cfg(test)]
#[path = "naming_test.rs"]
mod naming_test;

use std::cmp::Ordering;

use crate::error::GalleryError;

/// Whether `name` ends in one of `extensions` (case-insensitive, no dot).
#[must_use]
pub fn is_image_name(name: &str, extensions: &[String]) -> bool {
    let (_, ext) = split_extension(name);
    let Some(ext) = ext.strip_prefix('.') else {
        return false;
    };
    extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext))
}

/// Whether `name` carries the hidden marker.
#[must_use]
pub fn is_hidden(name: &str, prefix: &str) -> bool {
    !prefix.is_empty() && name.starts_with(prefix)
}

/// The name without the hidden marker.
#[must_use]
pub fn display_name<'a>(name: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() { name } else { name.strip_prefix(prefix).unwrap_or(name) }
}

/// Add the hidden marker if absent, remove it if present.
#[must_use]
pub fn toggle_hidden(name: &str, prefix: &str) -> String {
    if is_hidden(name, prefix) { display_name(name, prefix).to_owned() } else { format!("{prefix}{name}") }
}

/// Split at the last dot: `("photo", ".jpg")`. The extension keeps its dot
/// and is empty when the name has none.
#[must_use]
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Build a rename target from a new base name, keeping the original extension.
///
/// # Errors
///
/// Returns `Precondition` if the trimmed base is empty or contains a path
/// separator.
pub fn rename_target(original: &str, new_base: &str) -> Result<String, GalleryError> {
    let base = new_base.trim();
    if base.is_empty() {
        return Err(GalleryError::Precondition("new name must not be empty".into()));
    }
    if base.contains(['/', '\\']) {
        return Err(GalleryError::Precondition(format!("new name `{base}` must not contain a path separator")));
    }
    let (_, ext) = split_extension(original);
    Ok(format!("{base}{ext}"))
}

/// Numeric-aware, case-insensitive ordering: `img2` sorts before `img10`.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks { rest: a };
    let mut right = Chunks { rest: b };
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = compare_chunks(l, r);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(if digits { Chunk::Digits(head) } else { Chunk::Text(head) })
    }
}

fn compare_chunks(left: Chunk<'_>, right: Chunk<'_>) -> Ordering {
    match (left, right) {
        (Chunk::Digits(l), Chunk::Digits(r)) => {
            let l = l.trim_start_matches('0');
            let r = r.trim_start_matches('0');
            l.len().cmp(&r.len()).then_with(|| l.cmp(r))
        }
        (Chunk::Text(l), Chunk::Text(r)) => l
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(r.chars().flat_map(char::to_lowercase)),
        (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
        (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
    }
}
