//! FFmpeg CLI wrapper for the crop/scale pipeline.
//!
//! This crate provides:
//! - Stream probing for native pixel dimensions
//! - Client-space to source-space crop mapping (clamped, even-aligned)
//! - Transform planning (crop for images, crop+rescale for video)
//! - Type-safe FFmpeg command building and execution
//! - Poster frame extraction for previews

pub mod command;
pub mod error;
pub mod mapper;
pub mod plan;
pub mod probe;
pub mod thumbnail;
pub mod transform;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use mapper::{map_crop, MappedCrop};
pub use plan::{AudioPolicy, TransformPlan};
pub use probe::probe_dimensions;
pub use thumbnail::extract_poster_frame;
pub use transform::run_transform;
