//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during probing, mapping, or transcoding.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("FFprobe command failed: {message}")]
    FfprobeFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("No decodable visual stream in {0}")]
    NoVisualStream(PathBuf),

    #[error("Invalid crop request: {0}")]
    InvalidCrop(String),

    #[error("Crop degenerates to {w}x{h} after even alignment")]
    DegenerateCrop { w: i64, h: i64 },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl MediaError {
    /// Create an FFmpeg failure error.
    pub fn ffmpeg_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::FfmpegFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    /// Create an invalid crop error.
    pub fn invalid_crop(message: impl Into<String>) -> Self {
        Self::InvalidCrop(message.into())
    }

    /// Whether this failure is the caller's fault (bad request) rather than
    /// a fault of the pipeline itself.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            MediaError::NoVisualStream(_)
                | MediaError::InvalidCrop(_)
                | MediaError::DegenerateCrop { .. }
                | MediaError::FileNotFound(_)
        )
    }
}
