use crate::error::{ConfigError, ConfigResult};
use crate::parser::{parse_str, RawConfig};
use crate::schema::{keys, VerifyLoopConfig};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: VerifyLoopConfig,
    pub raw: RawConfig,
    pub path: PathBuf,
}

impl LoadedConfig {
    /// Keys present in the file that the typed layer does not use
    pub fn unrecognized_keys(&self) -> impl Iterator<Item = &str> {
        self.raw.keys().filter(|key| !keys::is_recognized(key))
    }
}

pub fn load_config(path: &Path) -> ConfigResult<VerifyLoopConfig> {
    load_config_from_file(path).map(|loaded| loaded.config)
}

pub fn load_config_from_file(path: &Path) -> ConfigResult<LoadedConfig> {
    let raw = load_raw(path)?;
    let config = VerifyLoopConfig::from_raw(&raw)?;

    debug!(
        path = %path.display(),
        keys = raw.len(),
        language = ?config.language,
        threshold = config.threshold,
        "Loaded quality gate config"
    );

    Ok(LoadedConfig {
        config,
        raw,
        path: path.to_path_buf(),
    })
}

/// Read and parse a file without typed coercion.
pub fn load_raw(path: &Path) -> ConfigResult<RawConfig> {
    let content = read_config_file(path)?;
    parse_str(&content)
}

pub fn parse_config(content: &str) -> ConfigResult<VerifyLoopConfig> {
    VerifyLoopConfig::from_raw(&parse_str(content)?)
}

fn read_config_file(path: &Path) -> ConfigResult<String> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
