use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::face_detector::{FaceDetection, FaceDetector};
use crate::region::PixelRegion;

/// Confidence ceiling: the heuristic is never treated as certain.
const MAX_CONFIDENCE: f64 = 98.0;
const SKIN_WEIGHT: f64 = 70.0;
const TEXTURE_WEIGHT: f64 = 30.0;
const SATURATION_EPSILON: f64 = 1e-6;

/// Tuning for [`SkinTextureDetector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectorConfig {
    /// Sample every `stride`-th pixel along each axis.
    pub stride: u32,
    /// Skin-tone ratio that must be exceeded.
    pub min_skin_ratio: f64,
    /// Lower (exclusive) bound on texture variation; flatter regions are walls.
    pub min_texture: f64,
    /// Upper (exclusive) bound on texture variation; busier regions are clutter.
    pub max_texture: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            stride: 4,
            min_skin_ratio: 0.30,
            min_texture: 15.0,
            max_texture: 60.0,
        }
    }
}

/// Raw measurements taken over the candidate region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinTextureScore {
    /// Fraction of sampled pixels classified as skin-like.
    pub skin_ratio: f64,
    /// Mean absolute RGB difference to the right and lower sampled neighbours.
    pub texture_variation: f64,
    /// Number of sampled pixels.
    pub sampled: u32,
}

/// Face-plausibility heuristic: enough skin-coloured pixels with a texture
/// that is neither flat nor noisy.
///
/// This is not a biometric classifier; it only screens out frames that
/// obviously do not show a face (blank walls, dark frames, clutter).
#[derive(Debug, Clone, Default)]
pub struct SkinTextureDetector {
    config: DetectorConfig,
}

impl SkinTextureDetector {
    /// Detector with custom thresholds.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Current thresholds.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Measure skin-tone ratio and texture variation over `region`.
    pub fn score(&self, pixels: &RgbaImage, region: PixelRegion) -> SkinTextureScore {
        let stride = self.config.stride.max(1);
        let right = region.right().min(pixels.width());
        let bottom = region.bottom().min(pixels.height());

        let mut sampled = 0u32;
        let mut skin = 0u32;
        let mut texture_total = 0.0;

        for y in (region.y..bottom).step_by(stride as usize) {
            for x in (region.x..right).step_by(stride as usize) {
                let px = pixels.get_pixel(x, y).0;
                sampled += 1;
                if is_skin_tone(px) {
                    skin += 1;
                }

                if x + stride < right && y + stride < bottom {
                    let next = pixels.get_pixel(x + stride, y).0;
                    let below = pixels.get_pixel(x, y + stride).0;
                    texture_total +=
                        (rgb_distance(px, next) + rgb_distance(px, below)) as f64 / 2.0;
                }
            }
        }

        if sampled == 0 {
            return SkinTextureScore {
                skin_ratio: 0.0,
                texture_variation: 0.0,
                sampled: 0,
            };
        }

        SkinTextureScore {
            skin_ratio: skin as f64 / sampled as f64,
            texture_variation: texture_total / sampled as f64,
            sampled,
        }
    }

    /// Whether a score passes the plausibility rule.
    pub fn is_face_like(&self, score: &SkinTextureScore) -> bool {
        score.skin_ratio > self.config.min_skin_ratio
            && score.texture_variation > self.config.min_texture
            && score.texture_variation < self.config.max_texture
    }

    /// Weighted blend of skin ratio and texture, capped below 100.
    pub fn confidence(&self, score: &SkinTextureScore) -> f64 {
        let texture_term = if self.config.min_texture > 0.0 {
            (score.texture_variation / self.config.min_texture).min(1.0)
        } else {
            1.0
        };
        (score.skin_ratio * SKIN_WEIGHT + texture_term * TEXTURE_WEIGHT).min(MAX_CONFIDENCE)
    }
}

impl FaceDetector for SkinTextureDetector {
    fn detect(&self, pixels: &RgbaImage, candidate: PixelRegion) -> FaceDetection {
        let score = self.score(pixels, candidate);
        let confidence = self.confidence(&score);

        tracing::debug!(
            skin_ratio = score.skin_ratio,
            texture = score.texture_variation,
            sampled = score.sampled,
            confidence,
            "skin/texture score"
        );

        if self.is_face_like(&score) {
            FaceDetection::found(
                confidence,
                candidate.normalized(pixels.width(), pixels.height()),
            )
        } else {
            FaceDetection::none(confidence)
        }
    }
}

/// Rough skin-colour test: warm channel ordering, minimum channel levels,
/// moderate saturation and mid-range brightness.
pub(crate) fn is_skin_tone(px: [u8; 4]) -> bool {
    let [r, g, b, _] = px;
    if !(r > g && g > b && r > 60 && g > 40 && b > 20) {
        return false;
    }

    let max = r.max(g).max(b) as f64;
    let min = r.min(g).min(b) as f64;
    let saturation = (max - min) / (max + SATURATION_EPSILON);
    let brightness = max / 255.0;

    saturation > 0.05 && saturation < 0.65 && brightness > 0.2 && brightness < 0.95
}

fn rgb_distance(a: [u8; 4], b: [u8; 4]) -> u32 {
    a.iter()
        .zip(b.iter())
        .take(3)
        .map(|(&p, &q)| p.abs_diff(q) as u32)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::candidate_region;
    use image::Rgba;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]))
    }

    /// Checkerboard at the sampling stride: every sampled pixel differs from
    /// its sampled neighbours by `delta` on each channel.
    fn stride_checker(width: u32, height: u32, base: [u8; 3], delta: u8) -> RgbaImage {
        let mut img = RgbaImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let on = ((x / 4) + (y / 4)) % 2 == 0;
            let shift = if on { delta } else { 0 };
            *pixel = Rgba([base[0] + shift, base[1] + shift, base[2] + shift, 255]);
        }
        img
    }

    #[test]
    fn skin_tone_classification() {
        assert!(is_skin_tone([200, 150, 120, 255]));
        assert!(is_skin_tone([120, 80, 60, 255]));
        // wrong ordering
        assert!(!is_skin_tone([120, 150, 200, 255]));
        // gray: r == g == b
        assert!(!is_skin_tone([128, 128, 128, 255]));
        // too dark
        assert!(!is_skin_tone([60, 45, 25, 255]));
        // oversaturated: (250 - 30) / 250 = 0.88
        assert!(!is_skin_tone([250, 100, 30, 255]));
        // nearly white: brightness 250/255 > 0.95
        assert!(!is_skin_tone([250, 240, 230, 255]));
    }

    #[test]
    fn flat_skin_patch_has_no_texture() {
        let img = solid(200, 200, [200, 150, 120]);
        let detector = SkinTextureDetector::default();
        let score = detector.score(&img, candidate_region(200, 200, 0.4));
        assert!((score.skin_ratio - 1.0).abs() < 1e-9);
        assert_eq!(score.texture_variation, 0.0);
        assert!(!detector.is_face_like(&score));
    }

    #[test]
    fn textured_skin_patch_is_face_like() {
        // 10 per channel on both neighbours → 30 per neighbour
        let img = stride_checker(400, 400, [190, 140, 110], 10);
        let detector = SkinTextureDetector::default();
        let region = candidate_region(400, 400, 0.4);
        let score = detector.score(&img, region);

        assert_eq!(score.sampled, 40 * 40);
        assert!((score.skin_ratio - 1.0).abs() < 1e-9);
        // Only interior samples contribute: 39 * 39 of 1600 sampled pixels.
        let expected = 30.0 * (39.0 * 39.0) / 1600.0;
        assert!((score.texture_variation - expected).abs() < 1e-9);

        let detection = detector.detect(&img, region);
        assert!(detection.face_detected);
        assert_eq!(detection.confidence, 98.0);
        let face_box = detection.face_box.unwrap();
        assert!((face_box.x - 0.3).abs() < 1e-9);
        assert!((face_box.width - 0.4).abs() < 1e-9);
    }

    #[test]
    fn chaotic_texture_is_rejected() {
        // 40 per channel → 120 per neighbour, far above the clutter bound
        let img = stride_checker(400, 400, [150, 100, 70], 40);
        let detector = SkinTextureDetector::default();
        let detection = detector.detect(&img, candidate_region(400, 400, 0.4));
        assert!(!detection.face_detected);
        assert!(detection.face_box.is_none());
    }

    #[test]
    fn gray_texture_is_rejected() {
        let img = stride_checker(400, 400, [120, 120, 120], 10);
        let detector = SkinTextureDetector::default();
        let score = detector.score(&img, candidate_region(400, 400, 0.4));
        assert_eq!(score.skin_ratio, 0.0);
        assert!(!detector.is_face_like(&score));
    }

    #[test]
    fn confidence_blends_and_caps() {
        let detector = SkinTextureDetector::default();
        let low = SkinTextureScore {
            skin_ratio: 0.5,
            texture_variation: 7.5,
            sampled: 100,
        };
        // 0.5 * 70 + 0.5 * 30
        assert!((detector.confidence(&low) - 50.0).abs() < 1e-9);

        let high = SkinTextureScore {
            skin_ratio: 1.0,
            texture_variation: 40.0,
            sampled: 100,
        };
        assert_eq!(detector.confidence(&high), MAX_CONFIDENCE);
    }

    #[test]
    fn region_outside_image_is_clipped() {
        let img = solid(50, 50, [200, 150, 120]);
        let detector = SkinTextureDetector::default();
        let score = detector.score(
            &img,
            PixelRegion {
                x: 40,
                y: 40,
                width: 100,
                height: 100,
            },
        );
        // x, y ∈ {40, 44, 48}
        assert_eq!(score.sampled, 9);
    }

    #[test]
    fn custom_thresholds_are_honoured() {
        let img = stride_checker(400, 400, [190, 140, 110], 10);
        let detector = SkinTextureDetector::new(DetectorConfig {
            max_texture: 20.0,
            ..DetectorConfig::default()
        });
        let detection = detector.detect(&img, candidate_region(400, 400, 0.4));
        assert!(!detection.face_detected);
    }
}
