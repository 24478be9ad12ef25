//! Build command implementation.
//!
//! Turns a folder of textures into decal asset folders. Any parameter not
//! given on the command line is taken from the settings saved by the
//! previous run.

use std::path::PathBuf;

use clap::Args;

use crate::category::Category;
use crate::error::{DecalError, Result};
use crate::geometry::DEFAULT_MESH_BASE;
use crate::naming::{DEFAULT_ATTEMPTS, DEFAULT_DIGITS};
use crate::normalize::DEFAULT_MIN_SIZE;
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{BatchOptions, BatchReport, BatchRunner, Job, TracingObserver};
use crate::settings::{JsonSettingsFile, Settings, SettingsStore, SETTINGS_FILENAME};

/// Build decal asset folders from a folder of textures
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Folder of source textures (png, jpg, jpeg)
    #[arg(long)]
    pub src: Option<PathBuf>,

    /// Destination root; assets go to <dest>/<category>/<prefix><digits>
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Decal JSON template
    #[arg(long, short)]
    pub template: Option<PathBuf>,

    /// Prefix for generated asset folder names
    #[arg(long)]
    pub prefix: Option<String>,

    /// Decal category
    #[arg(long, value_enum)]
    pub category: Option<Category>,

    /// Minimum texture side after padding
    #[arg(long, default_value_t = DEFAULT_MIN_SIZE)]
    pub min_size: u32,

    /// Mesh size of the shorter texture side
    #[arg(long, default_value_t = DEFAULT_MESH_BASE)]
    pub mesh_base: u32,

    /// Random digits appended to the prefix
    #[arg(long, default_value_t = DEFAULT_DIGITS)]
    pub digits: usize,

    /// Folder names to try before reusing an existing folder
    #[arg(long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: u32,

    /// Settings file holding the last-used parameters
    #[arg(long, default_value = SETTINGS_FILENAME)]
    pub settings: PathBuf,

    /// Do not remember this run's parameters
    #[arg(long)]
    pub no_save: bool,
}

impl BuildArgs {
    fn options(&self) -> BatchOptions {
        BatchOptions {
            min_size: self.min_size,
            mesh_base: self.mesh_base,
            digits: self.digits,
            collision_attempts: self.attempts,
        }
    }
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<BatchReport> {
    let store = JsonSettingsFile::new(&args.settings);
    let saved = store.load()?;
    let job = resolve_job(&args, &saved)?;

    printer.info("Source", &display_path(&job.source));
    printer.info("Destination", &display_path(&job.category_dir()));

    let mut observer = (TracingObserver, printer);
    let report = BatchRunner::new(args.options()).run(&job, &mut observer)?;

    if !args.no_save {
        store.save(&remember(&job))?;
    }

    if report.looks_systemic() {
        printer.warning(
            "Warning",
            &format!(
                "every failure was a filesystem error; check that {} is writable",
                display_path(&job.dest)
            ),
        );
    }

    let summary = format!(
        "{}, {} failed",
        plural(report.assets.len(), "asset", "assets"),
        report.failures.len()
    );
    if report.failures.is_empty() {
        printer.status("Finished", &summary);
    } else {
        printer.error("Finished", &summary);
        for name in report.failed_names() {
            printer.error("Failed", &name);
        }
    }

    Ok(report)
}

/// Merge command-line arguments over saved settings.
fn resolve_job(args: &BuildArgs, saved: &Settings) -> Result<Job> {
    let source = pick_path(&args.src, &saved.src, "--src")?;
    let dest = pick_path(&args.dest, &saved.dest, "--dest")?;
    let template = pick_path(&args.template, &saved.tmpl, "--template")?;

    let prefix = match &args.prefix {
        Some(prefix) => prefix.clone(),
        None if !saved.prefix.is_empty() => saved.prefix.clone(),
        None => return Err(missing("--prefix")),
    };

    let category = match args.category {
        Some(category) => category,
        None if !saved.category.is_empty() => saved.category.parse()?,
        None => return Err(missing("--category")),
    };

    let job = Job::new(source, dest, template, prefix, category);
    job.validate()?;
    Ok(job)
}

fn pick_path(arg: &Option<PathBuf>, saved: &str, flag: &str) -> Result<PathBuf> {
    match arg {
        Some(path) => Ok(path.clone()),
        None if !saved.is_empty() => Ok(PathBuf::from(saved)),
        None => Err(missing(flag)),
    }
}

fn missing(flag: &str) -> DecalError {
    DecalError::InvalidJob {
        message: format!("{} is required", flag),
        help: Some(format!(
            "Pass {} once; later runs reuse the saved value",
            flag
        )),
    }
}

fn remember(job: &Job) -> Settings {
    Settings {
        src: job.source.to_string_lossy().into_owned(),
        dest: job.dest.to_string_lossy().into_owned(),
        tmpl: job.template.to_string_lossy().into_owned(),
        prefix: job.prefix.clone(),
        category: job.category.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const TEMPLATE: &str =
        r#"{"Vector": {"colossal_MeshSize": {"x": 1, "y": 1, "z": 1, "w": 0}}}"#;

    fn args(root: &Path) -> BuildArgs {
        BuildArgs {
            src: Some(root.join("textures")),
            dest: Some(root.join("out")),
            template: Some(root.join("decal.json")),
            prefix: Some("Stain_".to_string()),
            category: Some(Category::Stains),
            min_size: DEFAULT_MIN_SIZE,
            mesh_base: DEFAULT_MESH_BASE,
            digits: DEFAULT_DIGITS,
            attempts: DEFAULT_ATTEMPTS,
            settings: root.join("settings.json"),
            no_save: false,
        }
    }

    fn setup(root: &Path) {
        fs::create_dir(root.join("textures")).unwrap();
        fs::write(root.join("decal.json"), TEMPLATE).unwrap();
        RgbaImage::from_pixel(300, 600, Rgba([200, 10, 10, 255]))
            .save(root.join("textures/stain.png"))
            .unwrap();
    }

    #[test]
    fn test_build_writes_assets_and_settings() {
        let dir = tempdir().unwrap();
        setup(dir.path());

        let report = run(args(dir.path()), &Printer::new()).unwrap();

        assert!(report.is_success());
        assert_eq!(report.assets.len(), 1);
        assert!(report.assets[0].folder.starts_with(dir.path().join("out/Stains")));

        let saved = JsonSettingsFile::new(dir.path().join("settings.json"))
            .load()
            .unwrap();
        assert_eq!(saved.prefix, "Stain_");
        assert_eq!(saved.category, "Stains");
        assert_eq!(PathBuf::from(&saved.src), dir.path().join("textures"));
    }

    #[test]
    fn test_build_reuses_saved_settings() {
        let dir = tempdir().unwrap();
        setup(dir.path());

        run(args(dir.path()), &Printer::new()).unwrap();

        let bare = BuildArgs {
            src: None,
            dest: None,
            template: None,
            prefix: None,
            category: None,
            ..args(dir.path())
        };
        let report = run(bare, &Printer::new()).unwrap();

        assert_eq!(report.assets.len(), 1);
        let folders = fs::read_dir(dir.path().join("out/Stains")).unwrap().count();
        assert_eq!(folders, 2);
    }

    #[test]
    fn test_build_no_save() {
        let dir = tempdir().unwrap();
        setup(dir.path());

        let build = BuildArgs {
            no_save: true,
            ..args(dir.path())
        };
        run(build, &Printer::new()).unwrap();

        assert!(!dir.path().join("settings.json").exists());
    }

    #[test]
    fn test_missing_parameter_without_settings() {
        let dir = tempdir().unwrap();
        setup(dir.path());

        let build = BuildArgs {
            prefix: None,
            ..args(dir.path())
        };
        let err = run(build, &Printer::new()).unwrap_err();

        assert!(err.to_string().contains("--prefix is required"));
    }

    #[test]
    fn test_saved_category_must_be_valid() {
        let saved = Settings {
            category: "Potholes".to_string(),
            ..Default::default()
        };
        let dir = tempdir().unwrap();
        let build = BuildArgs {
            category: None,
            ..args(dir.path())
        };

        let err = resolve_job(&build, &saved).unwrap_err();
        assert!(matches!(err, DecalError::InvalidCategory { .. }));
    }

    #[test]
    fn test_arguments_override_settings() {
        let saved = Settings {
            src: "old/src".to_string(),
            dest: "old/dest".to_string(),
            tmpl: "old.json".to_string(),
            prefix: "Old_".to_string(),
            category: "Trash".to_string(),
        };
        let dir = tempdir().unwrap();
        let build = BuildArgs {
            dest: None,
            category: None,
            ..args(dir.path())
        };

        let job = resolve_job(&build, &saved).unwrap();

        assert_eq!(job.source, dir.path().join("textures"));
        assert_eq!(job.dest, PathBuf::from("old/dest"));
        assert_eq!(job.prefix, "Stain_");
        assert_eq!(job.category, Category::Trash);
    }
}
