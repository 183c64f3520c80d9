//! Transform planning: turning a mapped crop into an FFmpeg operation.

use mcrop_models::MediaKind;

use crate::mapper::MappedCrop;

/// How the audio stream is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioPolicy {
    /// Stream-copy audio untouched; the video filter does not affect it.
    Passthrough,
    /// No audio handling (images).
    None,
}

/// A fully-decided transform: filter expression, frame policy, audio policy,
/// and output extension.
///
/// Images are cropped and nothing else, so the output reproduces exactly the
/// previewed region. Videos are additionally rescaled back to the (even-
/// aligned) source dimensions; downstream players expect a stable resolution
/// and a bare crop would shrink the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformPlan {
    pub kind: MediaKind,
    /// FFmpeg `-vf` expression
    pub filter: String,
    /// Emit exactly one frame (image crops)
    pub single_frame: bool,
    pub audio: AudioPolicy,
    /// Output extension including the leading dot
    pub output_ext: String,
}

impl TransformPlan {
    /// Build the plan for a mapped crop.
    ///
    /// `source_ext` is the lowercased extension of the original upload,
    /// including the dot. Image output is `.png` for PNG sources (lossless
    /// stays lossless) and `.jpg` for everything else; video keeps the
    /// container it arrived in.
    pub fn build(kind: MediaKind, mapped: &MappedCrop, source_ext: &str) -> Self {
        let r = mapped.rect;
        let crop = format!("crop={}:{}:{}:{}", r.w, r.h, r.x, r.y);

        match kind {
            MediaKind::Image => Self {
                kind,
                filter: crop,
                single_frame: true,
                audio: AudioPolicy::None,
                output_ext: if source_ext == ".png" { ".png" } else { ".jpg" }.to_string(),
            },
            MediaKind::Video => Self {
                kind,
                // Lanczos for the upscale back to source size; the default
                // bilinear smears text and hard edges noticeably.
                filter: format!(
                    "{crop},scale={}:{}:flags=lanczos",
                    mapped.even_w, mapped.even_h
                ),
                single_frame: false,
                audio: AudioPolicy::Passthrough,
                output_ext: source_ext.to_string(),
            },
        }
    }
}
