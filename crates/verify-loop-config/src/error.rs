use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error on line {line}: {reason}: `{content}`")]
    Parse {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Invalid value for {key}: expected {expected}, got {value:?}")]
    Type {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("{key}={value} is out of valid range ({min}-{max})")]
    OutOfRange {
        key: String,
        value: u64,
        min: u64,
        max: u64,
    },
}

impl ConfigError {
    /// Line number for parse errors, 1-based.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Key the error refers to, for typed coercion failures.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Type { key, .. } | Self::OutOfRange { key, .. } => Some(key),
            _ => None,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
