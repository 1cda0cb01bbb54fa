use serde::{Deserialize, Serialize};

/// Fraction of the shorter image side used for the candidate face square.
pub const DEFAULT_REGION_FRACTION: f64 = 0.4;

/// Region of interest expressed as fractions of the image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBox {
    /// Left edge, 0.0 = image left.
    pub x: f64,
    /// Top edge, 0.0 = image top.
    pub y: f64,
    /// Width as a fraction of the image width.
    pub width: f64,
    /// Height as a fraction of the image height.
    pub height: f64,
}

impl NormalizedBox {
    /// Center of the box, `(cx, cy)`.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Largest distance of the box center from the image center along
    /// either axis.
    pub fn center_offset(&self) -> f64 {
        let (cx, cy) = self.center();
        (cx - 0.5).abs().max((cy - 0.5).abs())
    }
}

/// Candidate region within the source image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRegion {
    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Express this region relative to an image of the given size.
    pub fn normalized(&self, image_width: u32, image_height: u32) -> NormalizedBox {
        let (w, h) = (image_width.max(1) as f64, image_height.max(1) as f64);
        NormalizedBox {
            x: self.x as f64 / w,
            y: self.y as f64 / h,
            width: self.width as f64 / w,
            height: self.height as f64 / h,
        }
    }
}

/// Central square where a cooperative subject's face is expected.
///
/// The side is `fraction` of the shorter image dimension, the square is
/// centered on the image midpoint and clipped to the image bounds.
pub fn candidate_region(image_width: u32, image_height: u32, fraction: f64) -> PixelRegion {
    let shorter = image_width.min(image_height);
    let side = ((shorter as f64 * fraction).floor() as u32).clamp(1, shorter.max(1));

    let x = image_width.saturating_sub(side) / 2;
    let y = image_height.saturating_sub(side) / 2;

    PixelRegion {
        x,
        y,
        width: side.min(image_width.saturating_sub(x)),
        height: side.min(image_height.saturating_sub(y)),
    }
}
