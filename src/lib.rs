//! decal-builder - Texture to decal asset pipeline
//!
//! A library for turning folders of texture images into per-asset decal
//! folders: each texture is padded to safe dimensions, written as
//! `_BaseColorMap.png`, and paired with a `decal.json` descriptor whose mesh
//! size follows the texture's aspect ratio.

pub mod category;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod naming;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod settings;
pub mod template;

pub use category::Category;
pub use discovery::discover_images;
pub use error::{DecalError, Result};
pub use geometry::{mesh_size, mesh_size_with_base, MeshSize};
pub use naming::{folder_name, FolderNamer};
pub use normalize::{safe_texture_resize, Normalized};
pub use pipeline::{
    process, BatchEvent, BatchObserver, BatchOptions, BatchReport, BatchRunner, FailedFile, Job,
    ProgressFn, TracingObserver,
};
pub use settings::{JsonSettingsFile, MemorySettings, Settings, SettingsStore};
pub use template::Template;
