//! Error taxonomy for gallery operations.
//!
//! ERROR HANDLING
//! ==============
//! Network-layer failures are converted into one of these kinds at the call
//! site; raw transport errors never reach the user-facing layer.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::fmt;

use crate::store::StoreError;

/// Which step of a multi-step admin mutation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStep {
    /// Reading the current file content or listing.
    Read,
    /// Encoding local bytes for upload.
    Encode,
    /// Writing the new file.
    Write,
    /// Deleting the old file.
    Delete,
}

impl fmt::Display for MutationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Read => "read",
            Self::Encode => "encode",
            Self::Write => "write",
            Self::Delete => "delete",
        };
        f.write_str(label)
    }
}

/// Errors surfaced by the gallery core.
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    /// The remote listing or an image preload did not complete.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The request succeeded but produced no usable images.
    #[error("no images available")]
    EmptyResult,

    /// An admin mutation was rejected or failed mid-sequence.
    #[error("{step} failed for {path}: {message}")]
    Mutation { step: MutationStep, path: String, message: String },

    /// Invalid input to a pure computation; rejected before any side effect.
    #[error("invalid input: {0}")]
    Precondition(String),
}

impl GalleryError {
    /// Build a mutation failure from a store error at the given step.
    #[must_use]
    pub fn mutation(step: MutationStep, path: &str, err: &StoreError) -> Self {
        Self::Mutation { step, path: path.to_owned(), message: err.to_string() }
    }

    /// Stable machine-readable code for this error kind.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_TRANSPORT",
            Self::EmptyResult => "E_EMPTY_RESULT",
            Self::Mutation { .. } => "E_MUTATION",
            Self::Precondition(_) => "E_PRECONDITION",
        }
    }

    /// Whether retrying the same call could succeed without user changes.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
