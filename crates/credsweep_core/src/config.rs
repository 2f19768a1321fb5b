//! Project configuration loaded from `.credsweep.toml`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or parsing a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config at {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: Box<str>,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        /// Path that failed to parse.
        path: Box<str>,
        /// Underlying TOML error.
        #[source]
        source: Box<toml::de::Error>,
    },
}

/// Optional per-project overrides.
///
/// Everything here extends the built-in behaviour; nothing can shrink
/// the fixed exclusion set or drop a recognized extension, so a config
/// file can only make a scan broader or cheaper, never blind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Extra directory names to prune during traversal, in addition to
    /// the built-in set (`.git`, `node_modules`, ...).
    #[serde(default)]
    pub exclude_dirs: Vec<String>,

    /// Extra file extensions to scan (without the leading dot), in
    /// addition to the built-in set.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Files larger than this many bytes are skipped (recorded as a
    /// scan error, not silently dropped).
    #[serde(default)]
    pub max_file_size: Option<u64>,
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string().into(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string().into(),
            source: Box::new(source),
        })
    }

    /// Loads `.credsweep.toml` from `dir` if present, else defaults.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(crate::CONFIG_FILENAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}
