use std::io::Cursor;

use image::imageops::FilterType;
use thiserror::Error;

use crate::dimensions::TargetSize;
use crate::loader::LoadedImage;

#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("load an image before resizing")]
    NoImageLoaded,
    #[error("cannot resize to {width}x{height}")]
    InvalidTarget { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// The latest resize output: an in-memory PNG and the name to save it under.
pub struct ResizeResult {
    pub png: Vec<u8>,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

/// Stretch `image` to exactly `target` and encode the result as PNG.
///
/// Each axis scales independently; callers wanting a true aspect ratio pick
/// an aspect-correct target. The target is re-validated here even though
/// the dimension resolver already guarantees positivity.
pub fn resize(image: &LoadedImage, target: TargetSize) -> Result<ResizeResult, ResizeError> {
    if target.width == 0 || target.height == 0 {
        return Err(ResizeError::InvalidTarget {
            width: target.width,
            height: target.height,
        });
    }

    let stretched = image
        .image
        .resize_exact(target.width, target.height, FilterType::Lanczos3);

    let mut png = Vec::new();
    stretched.write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)?;

    log::info!(
        "resized {} from {}x{} to {}x{} ({} bytes of PNG)",
        image.name,
        image.width(),
        image.height(),
        target.width,
        target.height,
        png.len()
    );

    Ok(ResizeResult {
        png,
        file_name: format!("resized_{}x{}.png", target.width, target.height),
        width: target.width,
        height: target.height,
    })
}
