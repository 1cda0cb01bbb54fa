//! Write synthetic test portraits for manual experiments.
//!
//! Produces a face-like frame, a flat gray frame, a dark frame and an
//! off-center frame (face-like square pushed right by canvas padding).
//!
//! Usage:
//!   cargo run --example make_synthetic -- [output_dir]

use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn jitter(base: u8, amount: i32, rng: &mut StdRng) -> u8 {
    (base as i32 + rng.gen_range(-amount..=amount)).clamp(0, 255) as u8
}

fn face_like(width: u32, height: u32, rng: &mut StdRng) -> RgbaImage {
    let side = width.min(height) * 2 / 5;
    let (px, py) = ((width - side) / 2, (height - side) / 2);
    RgbaImage::from_fn(width, height, |x, y| {
        if x >= px && x < px + side && y >= py && y < py + side {
            Rgba([
                jitter(200, 15, rng),
                jitter(150, 15, rng),
                jitter(120, 15, rng),
                255,
            ])
        } else {
            let v = jitter(120, 30, rng);
            Rgba([v, v, v, 255])
        }
    })
}

fn pad_left(img: &RgbaImage, left: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(
        img.width() + left,
        img.height(),
        Rgba([220, 220, 220, 255]),
    );
    for (x, y, pixel) in img.enumerate_pixels() {
        canvas.put_pixel(x + left, y, *pixel);
    }
    canvas
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "synthetic".to_string());
    std::fs::create_dir_all(&output_dir)?;

    let mut rng = StdRng::seed_from_u64(42);
    let face = face_like(400, 400, &mut rng);

    let outputs = [
        ("face_like.png", face.clone()),
        (
            "flat_gray.png",
            RgbaImage::from_pixel(400, 400, Rgba([128, 128, 128, 255])),
        ),
        (
            "dark.png",
            RgbaImage::from_pixel(400, 400, Rgba([20, 15, 12, 255])),
        ),
        ("off_center.png", pad_left(&face, 300)),
    ];

    for (name, img) in outputs {
        let path = format!("{output_dir}/{name}");
        img.save(&path)?;
        println!("Created {path} ({}x{})", img.width(), img.height());
    }

    Ok(())
}
