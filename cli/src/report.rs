//! Output formatting for admin commands.

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;

use gallery::ImageEntry;
use serde_json::{Value, json};

/// One JSON object per image, hidden state resolved against `prefix`.
pub fn listing_json(entries: &[ImageEntry], prefix: &str) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|entry| {
                json!({
                    "file_name": entry.file_name,
                    "display_name": entry.display_name(prefix),
                    "path": entry.path,
                    "hidden": entry.is_hidden(prefix),
                    "sha": entry.sha,
                    "url": entry.original_url,
                })
            })
            .collect(),
    )
}

/// Plain listing: one line per image, hidden entries marked.
pub fn listing_lines(entries: &[ImageEntry], prefix: &str) -> Vec<String> {
    let width = entries.iter().map(|e| e.display_name(prefix).len()).max().unwrap_or(0);
    entries
        .iter()
        .map(|entry| {
            let marker = if entry.is_hidden(prefix) { "hidden" } else { "shown" };
            format!("{marker:<6}  {:<width$}  {}", entry.display_name(prefix), entry.path)
        })
        .collect()
}

pub fn summary(entries: &[ImageEntry], prefix: &str) -> String {
    let hidden = entries.iter().filter(|e| e.is_hidden(prefix)).count();
    format!("{} images ({} hidden)", entries.len(), hidden)
}

/// Confirmation line for an upload: the repository path and its new hash.
pub fn uploaded(path: &str, sha: &str) -> String {
    format!("{path} (sha {sha})")
}
