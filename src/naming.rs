//! Asset folder naming.
//!
//! Folder names are a user prefix followed by random decimal digits. With
//! three digits there are only 1000 names per prefix, so collisions with
//! folders from earlier runs are expected. [`FolderNamer`] retries a bounded
//! number of times and then falls back to reusing the last candidate, in
//! which case the files inside that folder are overwritten.

use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::warn;

/// Default number of random digits appended to the prefix.
pub const DEFAULT_DIGITS: usize = 3;

/// Default number of names tried before reusing an existing folder.
pub const DEFAULT_ATTEMPTS: u32 = 16;

/// Generate `count` independent uniformly random decimal digits.
pub fn random_digits<R: Rng>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Generate a folder name: `prefix` followed by `digits` random digits.
pub fn folder_name<R: Rng>(rng: &mut R, prefix: &str, digits: usize) -> String {
    let mut name = String::with_capacity(prefix.len() + digits);
    name.push_str(prefix);
    name.push_str(&random_digits(rng, digits));
    name
}

/// A chosen output folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderChoice {
    pub name: String,
    pub path: PathBuf,
    /// True when every attempt hit an existing folder and the last one is reused.
    pub reused: bool,
}

/// Picks asset folder names under a parent directory.
#[derive(Debug, Clone)]
pub struct FolderNamer {
    prefix: String,
    digits: usize,
    attempts: u32,
}

impl FolderNamer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            digits: DEFAULT_DIGITS,
            attempts: DEFAULT_ATTEMPTS,
        }
    }

    pub fn with_digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    /// Set how many names are tried. Zero is treated as one.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Choose a folder under `parent`, preferring names that do not exist yet.
    pub fn choose<R: Rng>(&self, rng: &mut R, parent: &Path) -> FolderChoice {
        let mut name = folder_name(rng, &self.prefix, self.digits);

        for attempt in 1..=self.attempts {
            let path = parent.join(&name);
            if !path.exists() {
                return FolderChoice {
                    name,
                    path,
                    reused: false,
                };
            }
            if attempt < self.attempts {
                name = folder_name(rng, &self.prefix, self.digits);
            }
        }

        let path = parent.join(&name);
        warn!(
            "No free folder name after {} attempt(s); reusing {}",
            self.attempts,
            path.display()
        );
        FolderChoice {
            name,
            path,
            reused: true,
        }
    }
}
