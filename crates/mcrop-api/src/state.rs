//! Application state.

use std::sync::Arc;

use mcrop_storage::{ArtifactStore, IdGenerator, RandomIds, StorageError};

use crate::config::ApiConfig;

/// Shared application state.
///
/// There is no mutable state here: requests only share the filesystem
/// namespace, and unique artifact ids keep them from colliding.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<ArtifactStore>,
}

impl AppState {
    /// Create new application state with random artifact ids.
    pub async fn new(config: ApiConfig) -> Result<Self, StorageError> {
        Self::with_ids(config, Arc::new(RandomIds)).await
    }

    /// Create state with an injected id generator (deterministic in tests).
    pub async fn with_ids(
        config: ApiConfig,
        ids: Arc<dyn IdGenerator>,
    ) -> Result<Self, StorageError> {
        let store = ArtifactStore::open(
            config.uploads_dir(),
            config.output_dir(),
            config.thumbs_dir(),
            ids,
        )
        .await?;

        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }
}
