//! Client-space to source-space crop mapping.
//!
//! The crop rectangle arrives in the coordinate space of the rendered
//! preview, which rarely matches the decoded source pixel-for-pixel: the
//! browser scales the preview to fit, and EXIF orientation can swap the axes
//! the probe reports. This module reconciles the two spaces into an exact,
//! codec-safe source rectangle.
//!
//! The mapping is deterministic: same request, same dimensions, same output.

use mcrop_models::{CropRequest, PixelDimensions, ResolvedCrop};

use crate::error::{MediaError, MediaResult};

/// A source-space crop plus the even-aligned source dimensions the video
/// scale step targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedCrop {
    pub rect: ResolvedCrop,
    /// Authoritative source width, even-aligned
    pub even_w: u32,
    /// Authoritative source height, even-aligned
    pub even_h: u32,
}

/// Map a client-space crop rectangle into source-pixel space.
///
/// The authoritative dimension basis is the browser-reported natural size
/// when the request carries one, falling back to `probed`. The browser wins
/// because its reported dimensions already reflect EXIF orientation applied
/// at render time; the probe reads raw stream metadata. Callers that have a
/// reported size may skip probing entirely and pass `None`.
///
/// Position is clamped before size: the size clamp depends on the clamped
/// position. Width and height are then even-aligned by subtracting one when
/// odd (never adding, which could exceed the source bounds). A rectangle
/// that collapses below 2x2 after alignment is rejected rather than passed
/// on as an invalid filter expression.
pub fn map_crop(req: &CropRequest, probed: Option<PixelDimensions>) -> MediaResult<MappedCrop> {
    // Division guard, before any scale factor is computed.
    if req.orig_w <= 0.0 || req.orig_h <= 0.0 {
        return Err(MediaError::invalid_crop(format!(
            "client-space dimensions must be positive, got {}x{}",
            req.orig_w, req.orig_h
        )));
    }

    let (auth_w, auth_h) = match req.reported_source() {
        Some((w, h)) => (round_half_up(w), round_half_up(h)),
        None => {
            let dims = probed.ok_or_else(|| {
                MediaError::invalid_crop("no source dimensions available".to_string())
            })?;
            (i64::from(dims.width), i64::from(dims.height))
        }
    };
    if auth_w <= 0 || auth_h <= 0 {
        return Err(MediaError::invalid_crop(format!(
            "source dimensions must be positive, got {auth_w}x{auth_h}"
        )));
    }

    let scale_x = auth_w as f64 / req.orig_w;
    let scale_y = auth_h as f64 / req.orig_h;

    // Each value rounds independently. Joint rounding (e.g. rounding x+w and
    // deriving w) would shift edges by a pixel relative to the preview.
    let scaled_x = round_half_up(req.crop_x * scale_x);
    let scaled_y = round_half_up(req.crop_y * scale_y);
    let scaled_w = round_half_up(req.crop_w * scale_x);
    let scaled_h = round_half_up(req.crop_h * scale_y);

    // Position first, then size against the clamped position.
    let x = scaled_x.clamp(0, auth_w - 1);
    let y = scaled_y.clamp(0, auth_h - 1);
    let w = even_floor(scaled_w.min(auth_w - x));
    let h = even_floor(scaled_h.min(auth_h - y));

    if w < 2 || h < 2 {
        return Err(MediaError::DegenerateCrop { w, h });
    }

    Ok(MappedCrop {
        rect: ResolvedCrop {
            x: x as u32,
            y: y as u32,
            w: w as u32,
            h: h as u32,
        },
        even_w: even_floor(auth_w) as u32,
        even_h: even_floor(auth_h) as u32,
    })
}

/// Round to nearest, ties toward positive infinity.
///
/// This matches the rounding the preview renderer applies, including at
/// negative ties (`-2.5` rounds to `-2`, where `f64::round` gives `-3`).
/// Diverging here would shift crops by a pixel against the preview.
fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// Largest even value not exceeding `v`.
fn even_floor(v: i64) -> i64 {
    if v % 2 != 0 {
        v - 1
    } else {
        v
    }
}
