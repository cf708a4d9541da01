use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapperConfigRaw {
    pub envelope_path: PathBuf,
    #[serde(default)]
    pub output_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    /// Protobuf envelope to map.
    pub envelope_path: PathBuf,
    /// JSON-lines output. `None` writes to stdout.
    pub output_path: Option<PathBuf>,
}

impl MapperConfig {
    /// Load a config file. Relative paths resolve against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let base_dir = path.parent().unwrap_or(Path::new("."));
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let raw: MapperConfigRaw =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::resolve(raw, base_dir))
    }

    pub fn resolve(raw: MapperConfigRaw, base_dir: &Path) -> Self {
        Self {
            envelope_path: base_dir.join(raw.envelope_path),
            output_path: raw.output_path.map(|p| base_dir.join(p)),
        }
    }
}
