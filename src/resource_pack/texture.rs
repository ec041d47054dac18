//! Texture decoding and transparency detection.

use crate::error::Result;
use image::{DynamicImage, Rgba, RgbaImage};
use std::path::Path;

/// Decides whether a texture file has any non-opaque pixel.
///
/// The resolver only calls this for textures whose cached answer is stale.
pub trait TransparencyProbe: Send + Sync {
    fn probe(&self, path: &Path) -> Result<bool>;
}

/// Probe that decodes the file with the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageProbe;

impl TransparencyProbe for ImageProbe {
    fn probe(&self, path: &Path) -> Result<bool> {
        let img = image::open(path)?;
        Ok(has_transparency(&img))
    }
}

/// An image is transparent when it has an alpha channel and at least one
/// pixel is not fully opaque. Images without alpha are always opaque.
pub fn has_transparency(img: &DynamicImage) -> bool {
    if !img.color().has_alpha() {
        return false;
    }
    match img {
        DynamicImage::ImageRgba8(rgba) => rgba.pixels().any(|p| p[3] < u8::MAX),
        DynamicImage::ImageLumaA8(la) => la.pixels().any(|p| p[1] < u8::MAX),
        other => other.to_rgba16().pixels().any(|p| p[3] < u16::MAX),
    }
}

/// The built-in missing texture: a 16x16 magenta/black checkerboard.
pub fn placeholder_texture() -> RgbaImage {
    RgbaImage::from_fn(16, 16, |x, y| {
        if ((x / 2) + (y / 2)) % 2 == 0 {
            Rgba([255, 0, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
}
