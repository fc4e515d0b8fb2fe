//! doccat library exports

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod cli;
pub mod core;

#[cfg(test)]
pub mod test_support;

/// How a resource directory is turned into a catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Top-level files only, bucketed by filename rules.
    #[default]
    Flat,
    /// Top-level files as in `Flat`, plus one category per subdirectory.
    Recursive,
}
