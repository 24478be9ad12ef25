//! Mesh size derivation from texture geometry.

use std::fmt;

use serde::Serialize;

use crate::error::{DecalError, Result};

/// Default mesh base unit: the shorter side of every decal mesh.
pub const DEFAULT_MESH_BASE: u32 = 4;

/// Integer mesh extent of a decal on its X and Z axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MeshSize {
    pub x: u32,
    pub z: u32,
}

impl MeshSize {
    pub fn new(x: u32, z: u32) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for MeshSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x={}, z={}", self.x, self.z)
    }
}

/// Mesh size for a texture using [`DEFAULT_MESH_BASE`].
pub fn mesh_size(width: u32, height: u32) -> Result<MeshSize> {
    mesh_size_with_base(width, height, DEFAULT_MESH_BASE)
}

/// Mesh size for a texture: the shorter side maps to `base`, the longer
/// side to `base * ratio` rounded to the nearest integer.
///
/// Ties round away from zero, so a ratio of 1.125 with base 4 (4.5) gives 5.
pub fn mesh_size_with_base(width: u32, height: u32, base: u32) -> Result<MeshSize> {
    if height == 0 || width == 0 {
        return Err(DecalError::Geometry {
            message: format!("cannot derive mesh size for a {}x{} texture", width, height),
        });
    }
    if base == 0 {
        return Err(DecalError::Geometry {
            message: "mesh base unit must be positive".to_string(),
        });
    }

    // One division per extent, so exact ties stay exact before rounding.
    let base_f = f64::from(base);
    let (w, h) = (f64::from(width), f64::from(height));

    let size = if width >= height {
        MeshSize::new(scale(base_f * w / h)?, base)
    } else {
        MeshSize::new(base, scale(base_f * h / w)?)
    };

    Ok(size)
}

fn scale(value: f64) -> Result<u32> {
    let rounded = value.round();
    if !rounded.is_finite() || rounded > f64::from(u32::MAX) {
        return Err(DecalError::Geometry {
            message: format!("mesh extent {} is out of range", value),
        });
    }
    Ok(rounded as u32)
}
