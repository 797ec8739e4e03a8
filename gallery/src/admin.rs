//! Admin mutations against the remote file store.
//!
//! DESIGN
//! ======
//! Every operation is a short sequence of store calls. There is no
//! transaction: the first failing step aborts the operation and is reported
//! as [`GalleryError::Mutation`] naming that step. Nothing already applied
//! is rolled back, so a rename that fails at the delete step leaves both
//! copies in place for the operator to inspect.
//!
//! Visibility is a rename that adds or strips the hidden prefix.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::config::GalleryConfig;
use crate::error::{GalleryError, MutationStep};
use crate::listing::{GalleryDataSource, ImageEntry};
use crate::naming::{is_hidden, is_image_name, rename_target, toggle_hidden};
use crate::store::{FileStore, StoreError, WriteRequest};

/// Runs admin operations for one image folder.
pub struct AdminOps<S: FileStore> {
    store: S,
    source: GalleryDataSource,
}

impl<S: FileStore> AdminOps<S> {
    #[must_use]
    pub fn new(store: S, config: GalleryConfig) -> Self {
        Self { store, source: GalleryDataSource::new(config) }
    }

    #[must_use]
    pub fn config(&self) -> &GalleryConfig {
        self.source.config()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every image in the folder, hidden ones included.
    ///
    /// # Errors
    ///
    /// `Transport` if the listing fails, `EmptyResult` if it holds no images.
    pub async fn list(&self) -> Result<Vec<ImageEntry>, GalleryError> {
        let folder = self.config().image_folder.trim_matches('/').to_owned();
        let listing = self.store.list_directory(&folder).await;
        self.source.resolve_admin(listing)
    }

    /// Upload `bytes` as `<folder>/<file_name>` and return the new content
    /// hash.
    ///
    /// With `overwrite` the current hash of an existing file is read first and
    /// sent along; without it the store rejects an existing path.
    ///
    /// # Errors
    ///
    /// `Precondition` for a name that is not a plain image file name,
    /// `Mutation` if a store call fails.
    pub async fn upload(&self, file_name: &str, bytes: &[u8], overwrite: bool) -> Result<String, GalleryError> {
        let file_name = file_name.trim();
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(GalleryError::Precondition(format!("invalid file name: {file_name:?}")));
        }
        if !is_image_name(file_name, &self.config().image_extensions) {
            return Err(GalleryError::Precondition(format!("not an image file: {file_name}")));
        }
        if bytes.is_empty() {
            return Err(GalleryError::Precondition(format!("{file_name} is empty")));
        }

        let path = self.config().folder_path(file_name);
        let expected_sha = if overwrite { self.current_sha(&path).await? } else { None };

        let request = WriteRequest {
            path: path.clone(),
            content_base64: BASE64.encode(bytes),
            message: format!("Upload {file_name}"),
            expected_sha,
        };
        let sha = self.write(&request).await?;
        tracing::info!(%path, bytes = bytes.len(), "uploaded image");
        Ok(sha)
    }

    /// Rename the file at `path` to `new_base` plus its original extension.
    /// A hidden file stays hidden. Returns the new path.
    ///
    /// # Errors
    ///
    /// `Precondition` for an invalid or unchanged name or one that carries the
    /// hidden prefix, `Mutation` for the first store step that fails.
    pub async fn rename(&self, path: &str, new_base: &str) -> Result<String, GalleryError> {
        let (_, file_name) = split_path(path);
        let prefix = &self.config().hidden_prefix;
        if is_hidden(new_base.trim(), prefix) {
            return Err(GalleryError::Precondition(format!(
                "new name must not start with `{prefix}`; use hide/show to change visibility"
            )));
        }
        let target = rename_target(file_name, new_base)?;
        let target = if is_hidden(file_name, prefix) { format!("{prefix}{target}") } else { target };
        self.move_to(path, &target).await
    }

    /// Hide or reveal the file at `path`. Returns the resulting path, which is
    /// unchanged if the file is already in the requested state.
    ///
    /// # Errors
    ///
    /// `Mutation` for the first store step that fails.
    pub async fn set_hidden(&self, path: &str, hidden: bool) -> Result<String, GalleryError> {
        let (_, file_name) = split_path(path);
        let prefix = &self.config().hidden_prefix;
        if is_hidden(file_name, prefix) == hidden {
            tracing::debug!(%path, hidden, "visibility already set");
            return Ok(path.to_owned());
        }
        self.move_to(path, &toggle_hidden(file_name, prefix)).await
    }

    /// Flip the visibility of the file at `path`. Returns the new path.
    ///
    /// # Errors
    ///
    /// `Mutation` for the first store step that fails.
    pub async fn toggle_hidden(&self, path: &str) -> Result<String, GalleryError> {
        let (_, file_name) = split_path(path);
        let target = toggle_hidden(file_name, &self.config().hidden_prefix);
        self.move_to(path, &target).await
    }

    /// Delete the file at `path`. Without a known hash the current one is read
    /// first.
    ///
    /// # Errors
    ///
    /// `Mutation` if the read or the delete fails.
    pub async fn delete(&self, path: &str, sha: Option<&str>) -> Result<(), GalleryError> {
        let sha = match sha {
            Some(sha) => sha.to_owned(),
            None => self.read_sha(path).await?,
        };
        let (_, file_name) = split_path(path);
        self.remove(path, &format!("Delete {file_name}"), &sha).await?;
        tracing::info!(%path, "deleted image");
        Ok(())
    }

    // --- Sequences ---

    /// Read, re-write under the new name, then delete the original.
    async fn move_to(&self, path: &str, target_name: &str) -> Result<String, GalleryError> {
        let (folder, file_name) = split_path(path);
        if target_name == file_name {
            return Err(GalleryError::Precondition(format!("{file_name} is already named {target_name}")));
        }
        let new_path = if folder.is_empty() { target_name.to_owned() } else { format!("{folder}/{target_name}") };

        let original = self.store.read_file(path).await.map_err(|e| failed(MutationStep::Read, path, &e))?;
        let content = original.normalized_content();
        if content.is_empty() {
            return Err(encode_failed(path, "store returned no content"));
        }
        if let Err(e) = BASE64.decode(&content) {
            return Err(encode_failed(path, &e.to_string()));
        }

        let request = WriteRequest {
            path: new_path.clone(),
            content_base64: content,
            message: format!("Rename {file_name} to {target_name}"),
            expected_sha: None,
        };
        self.write(&request).await?;
        self.remove(path, &format!("Remove {file_name} after rename to {target_name}"), &original.sha)
            .await?;

        tracing::info!(from = %path, to = %new_path, "renamed image");
        Ok(new_path)
    }

    async fn write(&self, request: &WriteRequest) -> Result<String, GalleryError> {
        self.store.write_file(request).await.map_err(|e| failed(MutationStep::Write, &request.path, &e))
    }

    async fn remove(&self, path: &str, message: &str, sha: &str) -> Result<(), GalleryError> {
        self.store.delete_file(path, message, sha).await.map_err(|e| failed(MutationStep::Delete, path, &e))
    }

    async fn read_sha(&self, path: &str) -> Result<String, GalleryError> {
        self.store
            .read_file(path)
            .await
            .map(|file| file.sha)
            .map_err(|e| failed(MutationStep::Read, path, &e))
    }

    /// Hash of an existing file, or `None` if the path is free.
    async fn current_sha(&self, path: &str) -> Result<Option<String>, GalleryError> {
        match self.store.read_file(path).await {
            Ok(file) => Ok(Some(file.sha)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(failed(MutationStep::Read, path, &e)),
        }
    }
}

fn failed(step: MutationStep, path: &str, err: &StoreError) -> GalleryError {
    tracing::warn!(%step, %path, error = %err, "admin mutation failed");
    GalleryError::mutation(step, path, err)
}

fn encode_failed(path: &str, message: &str) -> GalleryError {
    tracing::warn!(%path, message, "admin mutation failed while re-encoding");
    GalleryError::Mutation { step: MutationStep::Encode, path: path.to_owned(), message: message.to_owned() }
}

/// `("images", "a.jpg")` for `"images/a.jpg"`; `("", "a.jpg")` at the root.
fn split_path(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}
