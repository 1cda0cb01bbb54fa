#![allow(dead_code)]

use facecheck::{to_data_url, FaceDetection, FaceDetector, NormalizedBox, PixelRegion};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SKIN: [u8; 3] = [200, 150, 120];

fn noisy(base: u8, noise: i32, rng: &mut StdRng) -> u8 {
    (base as i32 + rng.gen_range(-noise..=noise)).clamp(0, 255) as u8
}

/// Noisy mid-gray background with a skin-coloured, lightly textured square
/// covering the central 40% of the shorter side.
pub fn face_like_image(width: u32, height: u32, seed: u64) -> RgbaImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let side = width.min(height) * 2 / 5;
    let (px, py) = ((width - side) / 2, (height - side) / 2);

    let mut img = RgbaImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let inside = x >= px && x < px + side && y >= py && y < py + side;
        *pixel = if inside {
            Rgba([
                noisy(SKIN[0], 15, &mut rng),
                noisy(SKIN[1], 15, &mut rng),
                noisy(SKIN[2], 15, &mut rng),
                255,
            ])
        } else {
            let v = noisy(120, 30, &mut rng);
            Rgba([v, v, v, 255])
        };
    }
    img
}

pub fn uniform_image(width: u32, height: u32, level: u8) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([level, level, level, 255]))
}

pub fn encode_png(img: &RgbaImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .unwrap();
    buffer
}

pub fn encode_jpeg(img: &RgbaImage) -> Vec<u8> {
    let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, 90)
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .unwrap();
    buffer
}

pub fn png_data_url(img: &RgbaImage) -> String {
    to_data_url("image/png", &encode_png(img))
}

/// Detector that reports a fixed face box regardless of the pixels.
pub struct FixedDetector {
    pub face_box: NormalizedBox,
}

impl FixedDetector {
    /// A 0.2 × 0.2 box centered at `(cx, cy)`.
    pub fn centered_at(cx: f64, cy: f64) -> Self {
        Self {
            face_box: NormalizedBox {
                x: cx - 0.1,
                y: cy - 0.1,
                width: 0.2,
                height: 0.2,
            },
        }
    }
}

impl FaceDetector for FixedDetector {
    fn detect(&self, _pixels: &RgbaImage, _candidate: PixelRegion) -> FaceDetection {
        FaceDetection::found(90.0, self.face_box)
    }
}
