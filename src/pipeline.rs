//! Batch processing of source textures into decal asset folders.
//!
//! For every discovered texture the runner decodes, pads, derives the mesh
//! size, picks a folder under `{dest}/{category}/`, writes
//! `_BaseColorMap.png`, and instantiates the template as `decal.json`.
//! A failure in any of those steps is recorded against that file and the
//! batch moves on. Only discovery failures abort the run.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, ImageReader};
use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::category::Category;
use crate::discovery::{discover_images, display_name};
use crate::error::{DecalError, Result};
use crate::geometry::{mesh_size_with_base, MeshSize, DEFAULT_MESH_BASE};
use crate::naming::{FolderNamer, DEFAULT_ATTEMPTS, DEFAULT_DIGITS};
use crate::normalize::{safe_texture_resize, DEFAULT_MIN_SIZE, MAX_MIN_SIZE};
use crate::template::Template;

/// File name of the texture inside each asset folder.
pub const BASE_COLOR_MAP: &str = "_BaseColorMap.png";

/// File name of the descriptor inside each asset folder.
pub const DESCRIPTOR_FILENAME: &str = "decal.json";

/// The five parameters of one batch run.
#[derive(Debug, Clone)]
pub struct Job {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub template: PathBuf,
    pub prefix: String,
    pub category: Category,
}

impl Job {
    pub fn new(
        source: impl Into<PathBuf>,
        dest: impl Into<PathBuf>,
        template: impl Into<PathBuf>,
        prefix: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            template: template.into(),
            prefix: prefix.into(),
            category,
        }
    }

    /// Reject empty parameters before any work starts.
    pub fn validate(&self) -> Result<()> {
        let fields: [(&str, bool); 4] = [
            ("source folder", self.source.as_os_str().is_empty()),
            ("destination folder", self.dest.as_os_str().is_empty()),
            ("template", self.template.as_os_str().is_empty()),
            ("prefix", self.prefix.is_empty()),
        ];

        for (field, empty) in fields {
            if empty {
                return Err(DecalError::InvalidJob {
                    message: format!("{} must not be empty", field),
                    help: None,
                });
            }
        }

        Ok(())
    }

    /// Directory that receives the asset folders: `{dest}/{category}`.
    pub fn category_dir(&self) -> PathBuf {
        self.dest.join(self.category.as_str())
    }
}

/// Tunables for a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Minimum side length of the padded texture.
    pub min_size: u32,
    /// Mesh size of the shorter texture side.
    pub mesh_base: u32,
    /// Random digits appended to the prefix.
    pub digits: usize,
    /// Folder names tried before an existing folder is reused.
    pub collision_attempts: u32,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            mesh_base: DEFAULT_MESH_BASE,
            digits: DEFAULT_DIGITS,
            collision_attempts: DEFAULT_ATTEMPTS,
        }
    }
}

impl BatchOptions {
    /// Reject options that would fail every file or exhaust memory.
    pub fn validate(&self) -> Result<()> {
        if self.mesh_base == 0 {
            return Err(DecalError::InvalidJob {
                message: "mesh base must be positive".to_string(),
                help: None,
            });
        }
        if self.min_size > MAX_MIN_SIZE {
            return Err(DecalError::InvalidJob {
                message: format!(
                    "minimum size {} exceeds the {} pixel limit",
                    self.min_size, MAX_MIN_SIZE
                ),
                help: Some(format!("Use a --min-size of at most {}", MAX_MIN_SIZE)),
            });
        }
        Ok(())
    }
}

/// Something that happened during a batch run.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    Started {
        job: &'a Job,
        total: usize,
    },
    FileStarted {
        /// 1-based position in discovery order.
        index: usize,
        total: usize,
        name: &'a str,
        path: &'a Path,
    },
    Resized {
        name: &'a str,
        from: (u32, u32),
        to: (u32, u32),
    },
    MeshComputed {
        name: &'a str,
        mesh: MeshSize,
    },
    FolderReused {
        name: &'a str,
        folder: &'a Path,
    },
    Wrote {
        name: &'a str,
        path: &'a Path,
    },
    FileSucceeded {
        name: &'a str,
        folder: &'a Path,
    },
    FileFailed {
        name: &'a str,
        error: &'a DecalError,
    },
    Cancelled {
        remaining: usize,
    },
    Finished {
        succeeded: usize,
        failed: usize,
    },
}

/// Receives events and progress from a batch run.
///
/// All methods are called synchronously on the thread running the batch.
pub trait BatchObserver {
    fn on_event(&mut self, _event: &BatchEvent<'_>) {}

    /// Called exactly once per processed file, after it succeeded or failed.
    fn on_progress(&mut self, _done: usize, _total: usize) {}

    /// Checked before each file. Returning true stops the batch.
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl BatchObserver for () {}

impl<A: BatchObserver, B: BatchObserver> BatchObserver for (A, B) {
    fn on_event(&mut self, event: &BatchEvent<'_>) {
        self.0.on_event(event);
        self.1.on_event(event);
    }

    fn on_progress(&mut self, done: usize, total: usize) {
        self.0.on_progress(done, total);
        self.1.on_progress(done, total);
    }

    fn is_cancelled(&self) -> bool {
        self.0.is_cancelled() || self.1.is_cancelled()
    }
}

/// Adapts a `(done, total)` closure into an observer.
pub struct ProgressFn<F>(pub F);

impl<F: FnMut(usize, usize)> BatchObserver for ProgressFn<F> {
    fn on_progress(&mut self, done: usize, total: usize) {
        (self.0)(done, total)
    }
}

/// Logs batch events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl BatchObserver for TracingObserver {
    fn on_event(&mut self, event: &BatchEvent<'_>) {
        match event {
            BatchEvent::Started { job, total } => info!(
                source = %job.source.display(),
                destination = %job.dest.display(),
                template = %job.template.display(),
                prefix = %job.prefix,
                category = %job.category,
                "[INFO] Starting processing of {} file(s)",
                total
            ),
            BatchEvent::FileStarted { path, .. } => {
                info!("[INFO] Processing file: {}", path.display())
            }
            BatchEvent::Resized { from, to, .. } => info!(
                "[RESIZE] Resizing from {}x{} to {}x{}",
                from.0, from.1, to.0, to.1
            ),
            BatchEvent::MeshComputed { name, mesh } => {
                debug!("[MESH] Set MeshSize {} for: {}", mesh, name)
            }
            BatchEvent::FolderReused { folder, .. } => warn!(
                "[INFO] Reusing existing folder {}; its files will be overwritten",
                folder.display()
            ),
            BatchEvent::Wrote { path, .. } => info!("[OK] Saved {}", path.display()),
            BatchEvent::FileSucceeded { .. } => {}
            BatchEvent::FileFailed { name, error } => {
                error!("[ERROR] Failed to process {}: {}", name, error)
            }
            BatchEvent::Cancelled { remaining } => {
                warn!("[INFO] Cancelled with {} file(s) remaining", remaining)
            }
            BatchEvent::Finished { succeeded, failed } => info!(
                "[INFO] Finished: {} succeeded, {} failed",
                succeeded, failed
            ),
        }
    }
}

/// One asset folder written by the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetOutput {
    pub name: String,
    pub folder: PathBuf,
    pub mesh: MeshSize,
}

/// A file that could not be turned into an asset.
#[derive(Debug)]
pub struct FailedFile {
    pub name: String,
    pub error: DecalError,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Number of files found by discovery.
    pub total: usize,
    pub assets: Vec<AssetOutput>,
    /// Failures in discovery order.
    pub failures: Vec<FailedFile>,
    pub cancelled: bool,
}

impl BatchReport {
    /// Names of the files that failed, in discovery order.
    pub fn failed_names(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.name.clone()).collect()
    }

    /// Number of failures caused by filesystem writes.
    pub fn io_failures(&self) -> usize {
        self.failures.iter().filter(|f| f.error.is_io()).count()
    }

    /// True when failures exist and every one of them was a filesystem error,
    /// which usually means the destination itself is unwritable.
    pub fn looks_systemic(&self) -> bool {
        !self.failures.is_empty() && self.io_failures() == self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }
}

/// Drives a batch run, one file at a time.
pub struct BatchRunner<R = ThreadRng> {
    options: BatchOptions,
    rng: R,
}

impl BatchRunner<ThreadRng> {
    pub fn new(options: BatchOptions) -> Self {
        Self::with_rng(options, rand::rng())
    }
}

impl<R: Rng> BatchRunner<R> {
    /// Create a runner with a specific random source for folder names.
    pub fn with_rng(options: BatchOptions, rng: R) -> Self {
        Self { options, rng }
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Process every texture under `job.source`.
    ///
    /// Returns an error only when the job is invalid or discovery fails;
    /// per-file failures are collected in the report.
    pub fn run<O: BatchObserver + ?Sized>(
        &mut self,
        job: &Job,
        observer: &mut O,
    ) -> Result<BatchReport> {
        job.validate()?;
        self.options.validate()?;

        let files = discover_images(&job.source)?;
        let total = files.len();
        observer.on_event(&BatchEvent::Started { job, total });

        let category_dir = job.category_dir();
        let namer = FolderNamer::new(job.prefix.clone())
            .with_digits(self.options.digits)
            .with_attempts(self.options.collision_attempts);

        let mut report = BatchReport {
            total,
            ..Default::default()
        };

        for (i, file) in files.iter().enumerate() {
            if observer.is_cancelled() {
                report.cancelled = true;
                observer.on_event(&BatchEvent::Cancelled {
                    remaining: total - i,
                });
                break;
            }

            let name = display_name(&job.source, file);
            observer.on_event(&BatchEvent::FileStarted {
                index: i + 1,
                total,
                name: &name,
                path: file,
            });

            match self.process_file(job, file, &name, &category_dir, &namer, observer) {
                Ok(asset) => {
                    observer.on_event(&BatchEvent::FileSucceeded {
                        name: &name,
                        folder: &asset.folder,
                    });
                    report.assets.push(asset);
                }
                Err(error) => {
                    observer.on_event(&BatchEvent::FileFailed {
                        name: &name,
                        error: &error,
                    });
                    report.failures.push(FailedFile { name, error });
                }
            }

            observer.on_progress(i + 1, total);
        }

        observer.on_event(&BatchEvent::Finished {
            succeeded: report.assets.len(),
            failed: report.failures.len(),
        });

        Ok(report)
    }

    fn process_file<O: BatchObserver + ?Sized>(
        &mut self,
        job: &Job,
        file: &Path,
        name: &str,
        category_dir: &Path,
        namer: &FolderNamer,
        observer: &mut O,
    ) -> Result<AssetOutput> {
        let decoded = decode_rgba(file)?;

        let normalized = safe_texture_resize(decoded, self.options.min_size)?;
        if normalized.resized() {
            observer.on_event(&BatchEvent::Resized {
                name,
                from: normalized.original,
                to: normalized.image.dimensions(),
            });
        }

        let mesh = mesh_size_with_base(
            normalized.width(),
            normalized.height(),
            self.options.mesh_base,
        )?;
        observer.on_event(&BatchEvent::MeshComputed { name, mesh });

        let choice = namer.choose(&mut self.rng, category_dir);
        if choice.reused {
            observer.on_event(&BatchEvent::FolderReused {
                name,
                folder: &choice.path,
            });
        }

        fs::create_dir_all(&choice.path).map_err(|e| DecalError::Io {
            path: choice.path.clone(),
            message: format!("Failed to create asset folder: {}", e),
        })?;

        let image_path = choice.path.join(BASE_COLOR_MAP);
        normalized
            .image
            .save_with_format(&image_path, ImageFormat::Png)
            .map_err(|e| DecalError::Io {
                path: image_path.clone(),
                message: format!("Failed to write PNG: {}", e),
            })?;
        observer.on_event(&BatchEvent::Wrote {
            name,
            path: &image_path,
        });

        // Reloaded per file so one instantiation never leaks into the next.
        let mut template = Template::load(&job.template)?;
        template.instantiate(mesh)?;

        let decal_path = choice.path.join(DESCRIPTOR_FILENAME);
        template.write(&decal_path)?;
        observer.on_event(&BatchEvent::Wrote {
            name,
            path: &decal_path,
        });

        Ok(AssetOutput {
            name: name.to_string(),
            folder: choice.path,
            mesh,
        })
    }
}

/// Decode a texture from disk into RGBA8, sniffing the format from content.
pub fn decode_rgba(path: &Path) -> Result<image::RgbaImage> {
    let decode_err = |message: String| DecalError::Decode {
        path: path.to_path_buf(),
        message,
    };

    let reader = ImageReader::open(path)
        .map_err(|e| decode_err(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| decode_err(e.to_string()))?;

    let image = reader.decode().map_err(|e| decode_err(e.to_string()))?;
    Ok(image.to_rgba8())
}

/// Run a batch with default options, logging through `tracing` and
/// reporting `(done, total)` to `progress`.
///
/// Returns the names of the files that failed, in discovery order.
pub fn process<F: FnMut(usize, usize)>(
    source: impl Into<PathBuf>,
    dest: impl Into<PathBuf>,
    template: impl Into<PathBuf>,
    prefix: &str,
    category: &str,
    progress: F,
) -> Result<Vec<String>> {
    let category: Category = category.parse()?;
    let job = Job::new(source, dest, template, prefix, category);

    let mut observer = (TracingObserver, ProgressFn(progress));
    let report = BatchRunner::new(BatchOptions::default()).run(&job, &mut observer)?;

    Ok(report.failed_names())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use tempfile::{tempdir, TempDir};

    const TEMPLATE: &str = r#"{
    "Float": { "colossal_DecalLayerMask": 1.0 },
    "Vector": {
        "colossal_MeshSize": { "x": 1, "y": 0.1, "z": 1, "w": 0 }
    }
}"#;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempdir().unwrap();
            fs::create_dir(dir.path().join("src")).unwrap();
            fs::write(dir.path().join("template.json"), TEMPLATE).unwrap();
            Self { dir }
        }

        fn source(&self) -> PathBuf {
            self.dir.path().join("src")
        }

        fn dest(&self) -> PathBuf {
            self.dir.path().join("out")
        }

        fn template(&self) -> PathBuf {
            self.dir.path().join("template.json")
        }

        fn job(&self) -> Job {
            Job::new(
                self.source(),
                self.dest(),
                self.template(),
                "Crack_",
                Category::Ground,
            )
        }

        fn image(&self, name: &str, width: u32, height: u32) {
            let path = self.source().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
                .save_with_format(path, ImageFormat::Png)
                .unwrap();
        }

        fn raw(&self, name: &str, bytes: &[u8]) {
            fs::write(self.source().join(name), bytes).unwrap();
        }

        fn asset_folders(&self) -> Vec<PathBuf> {
            let dir = self.dest().join("Ground");
            if !dir.exists() {
                return Vec::new();
            }
            let mut folders: Vec<_> = fs::read_dir(dir)
                .unwrap()
                .map(|e| e.unwrap().path())
                .collect();
            folders.sort();
            folders
        }
    }

    fn runner() -> BatchRunner<StdRng> {
        BatchRunner::with_rng(BatchOptions::default(), StdRng::seed_from_u64(1234))
    }

    #[derive(Default)]
    struct Recorder {
        progress: Vec<(usize, usize)>,
        resized: Vec<String>,
        reused: Vec<String>,
        cancel_after: Option<usize>,
    }

    impl BatchObserver for Recorder {
        fn on_event(&mut self, event: &BatchEvent<'_>) {
            match event {
                BatchEvent::Resized { name, .. } => self.resized.push(name.to_string()),
                BatchEvent::FolderReused { name, .. } => self.reused.push(name.to_string()),
                _ => {}
            }
        }

        fn on_progress(&mut self, done: usize, total: usize) {
            self.progress.push((done, total));
        }

        fn is_cancelled(&self) -> bool {
            self.cancel_after
                .is_some_and(|limit| self.progress.len() >= limit)
        }
    }

    #[test]
    fn test_mixed_batch_isolates_failures() {
        let fx = Fixture::new();
        fx.image("a.png", 800, 600);
        fx.raw("b.png", b"");
        fx.image("c.png", 512, 512);
        fx.image("d.png", 100, 40);
        fx.raw("e.jpg", b"definitely not a jpeg");
        fx.image("f.png", 600, 800);
        fx.image("g.png", 1024, 512);

        let report = runner().run(&fx.job(), &mut ()).unwrap();

        assert_eq!(report.total, 7);
        assert_eq!(report.failed_names(), vec!["b.png", "e.jpg"]);
        assert!(report
            .failures
            .iter()
            .all(|f| matches!(f.error, DecalError::Decode { .. })));
        assert_eq!(report.assets.len(), 5);
        assert_eq!(fx.asset_folders().len(), 5);
        assert!(!report.looks_systemic());
    }

    #[test]
    fn test_asset_folder_contents() {
        let fx = Fixture::new();
        fx.image("wide.png", 800, 600);

        let report = runner().run(&fx.job(), &mut ()).unwrap();
        let asset = &report.assets[0];

        assert_eq!(asset.mesh, MeshSize::new(5, 4));
        assert_eq!(asset.folder.parent().unwrap(), fx.dest().join("Ground"));

        let folder_name = asset.folder.file_name().unwrap().to_string_lossy();
        assert!(folder_name.starts_with("Crack_"));
        assert_eq!(folder_name.len(), "Crack_".len() + 3);

        let png = image::open(asset.folder.join(BASE_COLOR_MAP))
            .unwrap()
            .to_rgba8();
        assert_eq!(png.dimensions(), (800, 600));

        let decal: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(asset.folder.join(DESCRIPTOR_FILENAME)).unwrap(),
        )
        .unwrap();
        assert_eq!(
            decal,
            json!({
                "Float": { "colossal_DecalLayerMask": 1.0 },
                "Vector": {
                    "colossal_MeshSize": { "x": 5, "y": 0.1, "z": 4, "w": 0 }
                }
            })
        );
    }

    #[test]
    fn test_small_texture_is_padded_before_mesh_size() {
        let fx = Fixture::new();
        fx.image("tiny.png", 100, 40);

        let mut recorder = Recorder::default();
        let report = runner().run(&fx.job(), &mut recorder).unwrap();

        // 100x40 pads to 512x512, so the mesh is square.
        assert_eq!(report.assets[0].mesh, MeshSize::new(4, 4));
        assert_eq!(recorder.resized, vec!["tiny.png"]);

        let png = image::open(report.assets[0].folder.join(BASE_COLOR_MAP))
            .unwrap()
            .to_rgba8();
        assert_eq!(png.dimensions(), (512, 512));
        assert_eq!(png.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(png.get_pixel(256, 256).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_empty_source() {
        let fx = Fixture::new();

        let mut recorder = Recorder::default();
        let report = runner().run(&fx.job(), &mut recorder).unwrap();

        assert!(report.failed_names().is_empty());
        assert!(report.is_success());
        assert!(recorder.progress.is_empty());
        assert!(fx.asset_folders().is_empty());
        assert!(!fx.dest().exists());
    }

    #[test]
    fn test_progress_once_per_file() {
        let fx = Fixture::new();
        fx.image("a.png", 600, 600);
        fx.raw("b.png", b"broken");
        fx.image("c.png", 600, 600);

        let mut recorder = Recorder::default();
        runner().run(&fx.job(), &mut recorder).unwrap();

        assert_eq!(recorder.progress, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let fx = Fixture::new();
        let mut job = fx.job();
        job.source = fx.dir.path().join("nope");

        let mut recorder = Recorder::default();
        let err = runner().run(&job, &mut recorder).unwrap_err();

        assert!(matches!(err, DecalError::Discovery { .. }));
        assert!(recorder.progress.is_empty());
    }

    #[test]
    fn test_broken_template_fails_each_file() {
        let fx = Fixture::new();
        fs::write(fx.template(), r#"{ "Vector": {} }"#).unwrap();
        fx.image("a.png", 512, 512);
        fx.image("b.png", 512, 512);

        let report = runner().run(&fx.job(), &mut ()).unwrap();

        assert_eq!(report.failed_names(), vec!["a.png", "b.png"]);
        assert!(report
            .failures
            .iter()
            .all(|f| matches!(f.error, DecalError::Template { .. })));
        assert_eq!(report.io_failures(), 0);
    }

    #[test]
    fn test_template_is_reloaded_per_file() {
        let fx = Fixture::new();
        fx.image("a.png", 1024, 512);
        fx.image("b.png", 512, 512);

        let report = runner().run(&fx.job(), &mut ()).unwrap();

        let meshes: Vec<_> = report
            .assets
            .iter()
            .map(|a| {
                let text = fs::read_to_string(a.folder.join(DESCRIPTOR_FILENAME)).unwrap();
                let value: serde_json::Value = serde_json::from_str(&text).unwrap();
                value["Vector"]["colossal_MeshSize"].clone()
            })
            .collect();

        assert_eq!(meshes[0], json!({ "x": 8, "y": 0.1, "z": 4, "w": 0 }));
        assert_eq!(meshes[1], json!({ "x": 4, "y": 0.1, "z": 4, "w": 0 }));
    }

    #[test]
    fn test_unwritable_destination_is_systemic() {
        let fx = Fixture::new();
        fx.image("a.png", 512, 512);
        fx.image("b.png", 512, 512);
        // A file where the destination folder should be.
        fs::write(fx.dest(), b"").unwrap();

        let report = runner().run(&fx.job(), &mut ()).unwrap();

        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.io_failures(), 2);
        assert!(report.looks_systemic());
    }

    #[test]
    fn test_nested_sources_are_processed() {
        let fx = Fixture::new();
        fx.image("oil/spill.png", 512, 512);
        fx.image("top.png", 512, 512);

        let report = runner().run(&fx.job(), &mut ()).unwrap();

        assert!(report.failures.is_empty());
        assert_eq!(report.assets.len(), 2);
        assert_eq!(Path::new(&report.assets[0].name), Path::new("oil/spill.png"));
    }

    #[test]
    fn test_cancel_between_files() {
        let fx = Fixture::new();
        for name in ["a.png", "b.png", "c.png", "d.png"] {
            fx.image(name, 512, 512);
        }

        let mut recorder = Recorder {
            cancel_after: Some(2),
            ..Default::default()
        };
        let report = runner().run(&fx.job(), &mut recorder).unwrap();

        assert!(report.cancelled);
        assert!(!report.is_success());
        assert_eq!(report.assets.len(), 2);
        assert_eq!(recorder.progress, vec![(1, 4), (2, 4)]);
    }

    #[test]
    fn test_distinct_folders_with_retry() {
        let fx = Fixture::new();
        for i in 0..6 {
            fx.image(&format!("{i}.png"), 512, 512);
        }

        let options = BatchOptions {
            digits: 1,
            collision_attempts: 200,
            ..Default::default()
        };
        let report = BatchRunner::with_rng(options, StdRng::seed_from_u64(8))
            .run(&fx.job(), &mut ())
            .unwrap();

        assert_eq!(report.assets.len(), 6);
        assert_eq!(fx.asset_folders().len(), 6);
    }

    #[test]
    fn test_reused_folder_is_overwritten() {
        let fx = Fixture::new();
        fx.image("a.png", 1024, 512);
        fx.image("b.png", 512, 512);

        let options = BatchOptions {
            digits: 0,
            collision_attempts: 1,
            ..Default::default()
        };
        let mut recorder = Recorder::default();
        let report = BatchRunner::with_rng(options, StdRng::seed_from_u64(3))
            .run(&fx.job(), &mut recorder)
            .unwrap();

        assert!(report.failures.is_empty());
        assert_eq!(report.assets.len(), 2);
        assert_eq!(recorder.reused, vec!["b.png"]);

        let folders = fx.asset_folders();
        assert_eq!(folders, vec![fx.dest().join("Ground").join("Crack_")]);

        let decal: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(folders[0].join(DESCRIPTOR_FILENAME)).unwrap(),
        )
        .unwrap();
        assert_eq!(
            decal["Vector"]["colossal_MeshSize"],
            json!({ "x": 4, "y": 0.1, "z": 4, "w": 0 })
        );
    }

    #[test]
    fn test_zero_mesh_base_is_rejected_before_discovery() {
        let fx = Fixture::new();
        fx.image("a.png", 512, 512);

        let options = BatchOptions {
            mesh_base: 0,
            ..Default::default()
        };
        let mut recorder = Recorder::default();
        let err = BatchRunner::with_rng(options, StdRng::seed_from_u64(1))
            .run(&fx.job(), &mut recorder)
            .unwrap_err();

        assert!(matches!(err, DecalError::InvalidJob { .. }));
        assert!(recorder.progress.is_empty());
        assert!(!fx.dest().exists());
    }

    #[test]
    fn test_oversized_min_size_is_rejected() {
        let fx = Fixture::new();
        fx.image("a.png", 512, 512);

        let options = BatchOptions {
            min_size: 4_294_967_292,
            ..Default::default()
        };
        let err = BatchRunner::with_rng(options, StdRng::seed_from_u64(1))
            .run(&fx.job(), &mut ())
            .unwrap_err();

        assert!(err.to_string().contains("exceeds"));
        assert!(!fx.dest().exists());
    }

    #[test]
    fn test_empty_prefix_is_rejected() {
        let fx = Fixture::new();
        let mut job = fx.job();
        job.prefix.clear();

        let err = runner().run(&job, &mut ()).unwrap_err();
        assert!(matches!(err, DecalError::InvalidJob { .. }));
    }

    #[test]
    fn test_process_entry_point() {
        let fx = Fixture::new();
        fx.image("a.png", 512, 512);
        fx.raw("b.jpeg", b"");

        let mut calls = Vec::new();
        let failed = process(
            fx.source(),
            fx.dest(),
            fx.template(),
            "Crack_",
            "Ground",
            |done, total| calls.push((done, total)),
        )
        .unwrap();

        assert_eq!(failed, vec!["b.jpeg"]);
        assert_eq!(calls, vec![(1, 2), (2, 2)]);
    }

    #[test]
    fn test_process_rejects_unknown_category() {
        let fx = Fixture::new();
        let err = process(
            fx.source(),
            fx.dest(),
            fx.template(),
            "Crack_",
            "Potholes",
            |_, _| {},
        )
        .unwrap_err();

        assert!(matches!(err, DecalError::InvalidCategory { .. }));
    }
}
