//! File system scanner for source textures.
//!
//! Recursively walks a source folder and collects every file whose
//! extension is on the image allow-list.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::{DecalError, Result};

/// Extensions accepted as source textures (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Scan a directory for source textures.
///
/// Entries are visited in file-name order within each directory, so the
/// result is stable for an unchanged tree. A missing or non-directory root
/// is an error; unreadable entries below the root are skipped.
pub fn scan_images(root: &Path) -> Result<Vec<PathBuf>> {
    let meta = std::fs::metadata(root).map_err(|e| DecalError::Discovery {
        path: root.to_path_buf(),
        message: e.to_string(),
    })?;
    if !meta.is_dir() {
        return Err(DecalError::Discovery {
            path: root.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if is_image_path(entry.path()) {
            images.push(entry.into_path());
        }
    }

    Ok(images)
}

/// Check whether a path carries one of the accepted image extensions.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}
