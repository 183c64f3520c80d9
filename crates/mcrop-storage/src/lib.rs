//! Filesystem artifact store.
//!
//! This crate provides:
//! - Upload persistence under opaque temp names
//! - Thumbnail and output naming with injected unique identifiers
//! - The original-alongside-processed copy for before/after comparison
//! - Failure-path cleanup of consumed uploads and partial outputs
//!
//! There is no structured index: the filesystem is the state, and reads are
//! existence checks.

pub mod error;
pub mod id;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use id::{IdGenerator, RandomIds, SequentialIds};
pub use store::{ArtifactStore, PendingArtifact, ProcessedArtifact, StoredFile};
