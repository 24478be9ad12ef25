//! Texture size normalization.
//!
//! Pads textures onto a transparent canvas whose sides are multiples of 4
//! and at least a minimum size, keeping the original pixels centered.

use image::{imageops, Rgba, RgbaImage};

use crate::error::{DecalError, Result};

/// Default minimum side length of a normalized texture.
pub const DEFAULT_MIN_SIZE: u32 = 512;

/// Largest accepted minimum side length.
pub const MAX_MIN_SIZE: u32 = 16384;

/// Canvas alignment in pixels.
pub const ALIGNMENT: u32 = 4;

/// A texture after normalization.
#[derive(Debug, Clone)]
pub struct Normalized {
    /// The padded (or untouched) texture.
    pub image: RgbaImage,
    /// Dimensions of the source before padding.
    pub original: (u32, u32),
}

impl Normalized {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Whether padding changed the dimensions.
    pub fn resized(&self) -> bool {
        self.original != self.image.dimensions()
    }
}

/// Round `n` up to the next multiple of [`ALIGNMENT`].
pub fn ceil4(n: u32) -> Option<u32> {
    Some(n.checked_add(ALIGNMENT - 1)? / ALIGNMENT * ALIGNMENT)
}

/// Target dimensions for a `width` x `height` texture.
pub fn safe_dimensions(width: u32, height: u32, min_size: u32) -> Result<(u32, u32)> {
    let align = |n: u32| {
        ceil4(n).ok_or_else(|| DecalError::Normalize {
            message: format!("dimension {} is too large to align", n),
        })
    };

    Ok((align(width)?.max(min_size), align(height)?.max(min_size)))
}

/// Pad `image` so both sides are multiples of 4 and at least `min_size`.
///
/// The original pixels are copied to the centre of a fully transparent
/// canvas. When no padding is needed the image is returned unchanged.
pub fn safe_texture_resize(image: RgbaImage, min_size: u32) -> Result<Normalized> {
    let (width, height) = image.dimensions();
    let (safe_width, safe_height) = safe_dimensions(width, height, min_size)?;

    if (safe_width, safe_height) == (width, height) {
        return Ok(Normalized {
            image,
            original: (width, height),
        });
    }

    let mut canvas = RgbaImage::from_pixel(safe_width, safe_height, Rgba([0, 0, 0, 0]));
    let x = (safe_width - width) / 2;
    let y = (safe_height - height) / 2;
    imageops::replace(&mut canvas, &image, i64::from(x), i64::from(y));

    Ok(Normalized {
        image: canvas,
        original: (width, height),
    })
}
