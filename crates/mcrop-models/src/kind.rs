//! Media kind classification and the upload extension allow-list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Video extensions accepted at upload.
pub const VIDEO_EXTS: &[&str] = &[".mp4", ".mov", ".avi", ".mkv", ".webm"];

/// Image extensions accepted at upload.
pub const IMAGE_EXTS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp", ".bmp", ".tiff"];

/// What kind of visual media an upload is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a filename by its extension against the allow-list.
    ///
    /// Returns `None` for extensions outside the allow-list; those uploads
    /// are rejected at intake.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = extension_of(filename)?;
        if IMAGE_EXTS.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else if VIDEO_EXTS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, MediaKind::Image)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// Lowercased extension of a filename, including the leading dot.
pub fn extension_of(filename: &str) -> Option<String> {
    let dot = filename.rfind('.')?;
    // A trailing dot or a leading-dot-only name has no usable extension.
    if dot == 0 || dot + 1 == filename.len() {
        return None;
    }
    Some(filename[dot..].to_lowercase())
}
