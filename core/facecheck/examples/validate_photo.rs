//! Run the face check on image files and print the full analysis as JSON.
//!
//! Usage:
//!   RUST_LOG=facecheck=debug cargo run --example validate_photo -- photo.jpg [more.png ...]

use std::path::Path;

use facecheck::{to_data_url, FaceValidator};
use tracing_subscriber::EnvFilter;

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => "image/png",
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: validate_photo <image> [<image> ...]");
        std::process::exit(2);
    }

    let validator = FaceValidator::new();
    for path in &paths {
        let path = Path::new(path);
        let bytes = std::fs::read(path)?;
        let analysis = validator.analyze(&to_data_url(mime_for(path), &bytes));

        tracing::info!(
            file = %path.display(),
            code = analysis.verdict.code.as_str(),
            status = analysis.verdict.status.as_str(),
            "checked"
        );
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    }

    Ok(())
}
