//! The artifact store proper.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, warn};

use mcrop_models::MediaKind;

use crate::error::{StorageError, StorageResult};
use crate::id::IdGenerator;

/// A named file inside one of the store's directories.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub filename: String,
    pub path: PathBuf,
}

/// An output slot allocated before the transform runs.
///
/// The executor writes `path`; on success the slot is finalized into a
/// [`ProcessedArtifact`], on failure it is discarded along with whatever
/// partial file the transform left behind.
#[derive(Debug, Clone)]
pub struct PendingArtifact {
    pub id: String,
    pub filename: String,
    pub path: PathBuf,
}

/// A finished output with its original-for-comparison copy.
#[derive(Debug, Clone)]
pub struct ProcessedArtifact {
    pub filename: String,
    pub original_filename: String,
    pub kind: MediaKind,
}

/// Filesystem-backed store for uploads, outputs, and preview thumbnails.
///
/// Every name embeds a fresh id from the injected [`IdGenerator`], so
/// concurrent requests never contend for the same path and no cross-request
/// locking exists anywhere in the pipeline.
pub struct ArtifactStore {
    uploads: PathBuf,
    output: PathBuf,
    thumbs: PathBuf,
    ids: Arc<dyn IdGenerator>,
}

impl ArtifactStore {
    /// Open the store, creating the three directories if needed.
    pub async fn open(
        uploads: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        thumbs: impl Into<PathBuf>,
        ids: Arc<dyn IdGenerator>,
    ) -> StorageResult<Self> {
        let (uploads, output, thumbs) = (uploads.into(), output.into(), thumbs.into());
        fs::create_dir_all(&uploads).await?;
        fs::create_dir_all(&output).await?;
        fs::create_dir_all(&thumbs).await?;
        Ok(Self { uploads, output, thumbs, ids })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output
    }

    pub fn thumbs_dir(&self) -> &Path {
        &self.thumbs
    }

    /// Persist request bytes as a new upload under an opaque, extension-less
    /// temp name. The upload is exclusively owned by its request until it is
    /// either consumed by [`finalize_output`](Self::finalize_output) or
    /// discarded on failure.
    pub async fn save_upload(&self, bytes: &[u8]) -> StorageResult<PathBuf> {
        let path = self.uploads.join(self.ids.generate());
        fs::write(&path, bytes).await?;
        debug!("saved upload: {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    /// Resolve a caller-supplied upload path back to a file in the uploads
    /// directory.
    ///
    /// The path round-trips through the client between preview and process,
    /// so it is untrusted: it must canonicalize to somewhere under the
    /// uploads root. A vanished upload is [`StorageError::NotFound`].
    pub async fn resolve_upload(&self, candidate: &str) -> StorageResult<PathBuf> {
        let path = PathBuf::from(candidate);
        let canonical = fs::canonicalize(&path)
            .await
            .map_err(|_| StorageError::not_found(candidate))?;
        let root = fs::canonicalize(&self.uploads).await?;
        if !canonical.starts_with(&root) {
            return Err(StorageError::invalid_name(candidate));
        }
        Ok(canonical)
    }

    /// Copy an upload into the thumbs directory (image previews: the source
    /// itself is the preview).
    pub async fn copy_to_thumbnail(&self, src: &Path, ext: &str) -> StorageResult<StoredFile> {
        let thumb = self.allocate_thumbnail(ext);
        fs::copy(src, &thumb.path).await?;
        Ok(thumb)
    }

    /// Allocate a thumbnail name for a frame the executor will write.
    pub fn allocate_thumbnail(&self, ext: &str) -> StoredFile {
        let filename = format!("thumb_{}{}", self.ids.generate(), ext);
        let path = self.thumbs.join(&filename);
        StoredFile { filename, path }
    }

    /// Allocate an output slot for the transform destination.
    pub fn allocate_output(&self, ext: &str) -> PendingArtifact {
        let id = self.ids.generate();
        let filename = format!("processed_{id}{ext}");
        let path = self.output.join(&filename);
        PendingArtifact { id, filename, path }
    }

    /// Finalize a successful transform: copy the consumed upload alongside
    /// the processed result (for before/after comparison), then delete the
    /// upload.
    pub async fn finalize_output(
        &self,
        pending: PendingArtifact,
        upload: &Path,
        source_ext: &str,
        kind: MediaKind,
    ) -> StorageResult<ProcessedArtifact> {
        let original_filename = format!("original_{}{}", pending.id, source_ext);
        fs::copy(upload, self.output.join(&original_filename)).await?;
        self.discard_upload(upload).await;

        Ok(ProcessedArtifact {
            filename: pending.filename,
            original_filename,
            kind,
        })
    }

    /// Remove a partial output left by a failed transform. Best effort.
    pub async fn discard_output(&self, pending: &PendingArtifact) {
        if let Err(e) = fs::remove_file(&pending.path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("failed to remove partial output {}: {}", pending.path.display(), e);
            }
        }
    }

    /// Remove a consumed or abandoned upload. Best effort; the failure path
    /// must never orphan temp files silently.
    pub async fn discard_upload(&self, upload: &Path) {
        if let Err(e) = fs::remove_file(upload).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("failed to remove upload {}: {}", upload.display(), e);
            }
        }
    }

    /// Look up a stored output artifact by filename.
    pub async fn fetch_artifact(&self, filename: &str) -> StorageResult<PathBuf> {
        validate_name(filename)?;
        let path = self.output.join(filename);
        if !fs::try_exists(&path).await? {
            return Err(StorageError::not_found(filename));
        }
        Ok(path)
    }
}

/// Reject names that could escape the store directory.
fn validate_name(name: &str) -> StorageResult<()> {
    if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(StorageError::invalid_name(name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIds;
    use tempfile::TempDir;

    async fn store(dir: &TempDir) -> ArtifactStore {
        ArtifactStore::open(
            dir.path().join("uploads"),
            dir.path().join("output"),
            dir.path().join("thumbs"),
            Arc::new(SequentialIds::default()),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload_lifecycle() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;

        let upload = store.save_upload(b"fake media bytes").await.unwrap();
        assert!(upload.exists());

        let resolved = store
            .resolve_upload(upload.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(fs::read(&resolved).await.unwrap(), b"fake media bytes");

        let pending = store.allocate_output(".mp4");
        assert_eq!(pending.filename, "processed_000000000001.mp4");
        fs::write(&pending.path, b"processed").await.unwrap();

        let artifact = store
            .finalize_output(pending, &resolved, ".mp4", MediaKind::Video)
            .await
            .unwrap();
        assert_eq!(artifact.original_filename, "original_000000000001.mp4");
        assert!(!resolved.exists(), "consumed upload must be deleted");
        assert!(dir.path().join("output").join(&artifact.original_filename).exists());

        let fetched = store.fetch_artifact(&artifact.filename).await.unwrap();
        assert_eq!(fs::read(&fetched).await.unwrap(), b"processed");
    }

    #[tokio::test]
    async fn test_resolve_upload_rejects_outside_root() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;

        // A real file, but not ours.
        let foreign = dir.path().join("foreign.mp4");
        fs::write(&foreign, b"x").await.unwrap();

        let err = store
            .resolve_upload(foreign.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidName(_)));
    }

    #[tokio::test]
    async fn test_resolve_missing_upload_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;
        let missing = dir.path().join("uploads").join("gone");
        let err = store
            .resolve_upload(missing.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_fetch_artifact_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;
        for name in ["../secret", "a/b.mp4", "a\\b.mp4", ""] {
            assert!(matches!(
                store.fetch_artifact(name).await.unwrap_err(),
                StorageError::InvalidName(_)
            ));
        }
    }

    #[tokio::test]
    async fn test_fetch_missing_artifact() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;
        assert!(matches!(
            store.fetch_artifact("processed_0.mp4").await.unwrap_err(),
            StorageError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_thumbnail_copy_and_naming() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;

        let upload = store.save_upload(b"png bytes").await.unwrap();
        let thumb = store.copy_to_thumbnail(&upload, ".png").await.unwrap();
        assert_eq!(thumb.filename, "thumb_000000000001.png");
        assert!(thumb.path.exists());
        // The upload is untouched by thumbnailing.
        assert!(upload.exists());
    }

    #[tokio::test]
    async fn test_discard_is_silent_on_missing() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;
        // Nothing to assert beyond "does not panic / does not error".
        store.discard_upload(Path::new("/nonexistent")).await;
        let pending = store.allocate_output(".jpg");
        store.discard_output(&pending).await;
    }
}
