//! Decal categories.
//!
//! The asset layout groups decal folders under one of a fixed set of
//! category directories.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::DecalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[value(rename_all = "verbatim")]
pub enum Category {
    Alphabet,
    Beach,
    Graffiti,
    Ground,
    Industry,
    Leaf,
    Misc,
    Numbers,
    Parking,
    Puddles,
    RoadAssets,
    RoadMarkings,
    Stains,
    Trash,
    WallDecor,
}

impl Category {
    pub const ALL: [Category; 15] = [
        Category::Alphabet,
        Category::Beach,
        Category::Graffiti,
        Category::Ground,
        Category::Industry,
        Category::Leaf,
        Category::Misc,
        Category::Numbers,
        Category::Parking,
        Category::Puddles,
        Category::RoadAssets,
        Category::RoadMarkings,
        Category::Stains,
        Category::Trash,
        Category::WallDecor,
    ];

    /// Directory name used in the output layout.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Alphabet => "Alphabet",
            Category::Beach => "Beach",
            Category::Graffiti => "Graffiti",
            Category::Ground => "Ground",
            Category::Industry => "Industry",
            Category::Leaf => "Leaf",
            Category::Misc => "Misc",
            Category::Numbers => "Numbers",
            Category::Parking => "Parking",
            Category::Puddles => "Puddles",
            Category::RoadAssets => "RoadAssets",
            Category::RoadMarkings => "RoadMarkings",
            Category::Stains => "Stains",
            Category::Trash => "Trash",
            Category::WallDecor => "WallDecor",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DecalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DecalError::InvalidCategory {
                name: s.to_string(),
            })
    }
}
