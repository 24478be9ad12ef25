pub mod build;
pub mod categories;
pub mod completions;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::DEFAULT_LOGFILE;

/// decal-builder - Texture to decal asset folder converter
#[derive(Parser, Debug)]
#[command(name = "decal-builder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Log file, truncated on each run
    #[arg(long, global = true, default_value = DEFAULT_LOGFILE)]
    pub logfile: PathBuf,

    /// Write log lines to stderr instead of the log file
    #[arg(long, global = true)]
    pub log_stderr: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build decal asset folders from a folder of textures
    Build(build::BuildArgs),

    /// List the valid decal categories
    Categories(categories::CategoriesArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
