//! Crop geometry types shared between the API and the media pipeline.

use serde::{Deserialize, Serialize};

/// Native pixel dimensions of a decoded visual stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelDimensions {
    pub width: u32,
    pub height: u32,
}

impl PixelDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A crop rectangle as drawn by the client, expressed against the rendered
/// preview dimensions (`orig_w`/`orig_h`), not the decoded source.
///
/// `source_w`/`source_h` carry the browser-reported natural dimensions when
/// the client supplies them. They take precedence over a stream probe because
/// the browser has already applied any EXIF orientation correction that the
/// raw stream metadata would miss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRequest {
    /// X of the top-left corner, in client space
    pub crop_x: f64,
    /// Y of the top-left corner, in client space
    pub crop_y: f64,
    /// Width of the rectangle, in client space
    pub crop_w: f64,
    /// Height of the rectangle, in client space
    pub crop_h: f64,
    /// Client-space basis width the rectangle was drawn against
    pub orig_w: f64,
    /// Client-space basis height the rectangle was drawn against
    pub orig_h: f64,
    /// Browser-reported natural width, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_w: Option<f64>,
    /// Browser-reported natural height, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_h: Option<f64>,
}

impl CropRequest {
    /// Browser-reported dimensions, when both are present and positive.
    pub fn reported_source(&self) -> Option<(f64, f64)> {
        match (self.source_w, self.source_h) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Some((w, h)),
            _ => None,
        }
    }
}

/// A crop rectangle in true source-pixel space, clamped to the source bounds
/// with even-aligned dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCrop {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl ResolvedCrop {
    /// Check the rectangle lies fully inside the given source dimensions.
    pub fn fits_within(&self, dims: PixelDimensions) -> bool {
        self.x + self.w <= dims.width && self.y + self.h <= dims.height
    }

    /// Check the codec alignment constraint.
    pub fn is_even_aligned(&self) -> bool {
        self.w % 2 == 0 && self.h % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_request_camel_case_wire_format() {
        let json = r#"{
            "cropX": 100, "cropY": 100, "cropW": 200, "cropH": 150,
            "origW": 800, "origH": 600, "sourceW": 1600, "sourceH": 1200
        }"#;
        let req: CropRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.crop_w, 200.0);
        assert_eq!(req.reported_source(), Some((1600.0, 1200.0)));
    }

    #[test]
    fn test_reported_source_requires_both_positive() {
        let json = r#"{"cropX":0,"cropY":0,"cropW":10,"cropH":10,"origW":100,"origH":100,"sourceW":0}"#;
        let req: CropRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.reported_source(), None);
    }

    #[test]
    fn test_fits_within() {
        let rect = ResolvedCrop { x: 200, y: 200, w: 400, h: 300 };
        assert!(rect.fits_within(PixelDimensions::new(1600, 1200)));
        assert!(!rect.fits_within(PixelDimensions::new(500, 500)));
    }
}
