//! Source texture discovery.
//!
//! # Example
//!
//! ```ignore
//! use decal_builder::discovery::discover_images;
//!
//! let files = discover_images("./textures")?;
//! println!("Found {} textures", files.len());
//! ```

mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use scanner::{is_image_path, scan_images, IMAGE_EXTENSIONS};

/// Discover all source textures under `root`, recursively.
pub fn discover_images(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    scan_images(root.as_ref())
}

/// Name used for a discovered file in logs and failure lists.
///
/// This is the path relative to the source root, so files in the top level
/// are reported by their bare file name.
pub fn display_name(root: &Path, file: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .to_string_lossy()
        .into_owned()
}
