//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.doccat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ScanMode;
use crate::core::scan::{DEFAULT_EXTENSIONS, ScanOptions};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DoccatConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub resource_dir: Option<String>,
    pub scan_mode: Option<ScanMode>,
    pub extensions: Option<Vec<String>>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_RESOURCE_DIR: &str = "./Resources";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub resource_dir: PathBuf,
    pub scan_mode: ScanMode,
    pub extensions: Vec<String>,
}

impl ResolvedConfig {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::new(&self.resource_dir, self.scan_mode).with_extensions(&self.extensions)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.doccat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".doccat").join("config.toml"))
}

/// Load config from `~/.doccat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DoccatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DoccatConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(DoccatConfig::default());
        }
    };
    load_config_from(&path)
}

/// Same as [`load_config`] for an explicit path.
pub fn load_config_from(path: &Path) -> Result<DoccatConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(DoccatConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: DoccatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# doccat configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [catalog]
# resource_dir = "./Resources"       # Or set DOCCAT_RESOURCE_DIR env var
# scan_mode = "flat"                 # "flat" or "recursive"; or DOCCAT_SCAN_MODE
# extensions = ["md"]                # "md"/"markdown" and "txt"/"text" are recognised
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_dir` and `cli_mode` are from CLI flags (None = not specified).
pub fn resolve(
    config: &DoccatConfig,
    cli_dir: Option<&Path>,
    cli_mode: Option<ScanMode>,
) -> ResolvedConfig {
    resolve_with_env(config, cli_dir, cli_mode, |key| std::env::var(key).ok())
}

/// [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &DoccatConfig,
    cli_dir: Option<&Path>,
    cli_mode: Option<ScanMode>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Resource dir: CLI → env → config → default
    let resource_dir = cli_dir
        .map(Path::to_path_buf)
        .or_else(|| env("DOCCAT_RESOURCE_DIR").map(PathBuf::from))
        .or_else(|| config.catalog.resource_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RESOURCE_DIR));

    // Scan mode: CLI → env → config → default
    let scan_mode = cli_mode
        .or_else(|| env("DOCCAT_SCAN_MODE").and_then(|raw| parse_scan_mode(&raw)))
        .or(config.catalog.scan_mode)
        .unwrap_or_default();

    let extensions = match &config.catalog.extensions {
        Some(exts) if !exts.is_empty() => exts.clone(),
        _ => DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
    };

    ResolvedConfig {
        resource_dir,
        scan_mode,
        extensions,
    }
}

fn parse_scan_mode(raw: &str) -> Option<ScanMode> {
    match ScanMode::from_str(raw, true) {
        Ok(mode) => Some(mode),
        Err(_) => {
            warn!("Ignoring unknown DOCCAT_SCAN_MODE value: {}", raw);
            None
        }
    }
}
