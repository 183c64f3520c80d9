//! Shared data models for the mcrop pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Media kind classification and the upload extension allow-list
//! - Client-space crop requests
//! - Source-space resolved crop rectangles

pub mod crop;
pub mod kind;

// Re-export common types
pub use crop::{CropRequest, PixelDimensions, ResolvedCrop};
pub use kind::MediaKind;
