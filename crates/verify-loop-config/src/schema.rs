use crate::error::{ConfigError, ConfigResult};
use crate::parser::{RawConfig, RawValue};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// Recognized configuration keys
pub mod keys {
    pub const LANGUAGE: &str = "LANGUAGE";

    pub const FORMAT_CMD: &str = "FORMAT_CMD";
    pub const IMPORTS_CMD: &str = "IMPORTS_CMD";
    pub const BUILD_CMD: &str = "BUILD_CMD";
    pub const VET_CMD: &str = "VET_CMD";
    pub const LINT_CMD: &str = "LINT_CMD";
    pub const TYPE_CMD: &str = "TYPE_CMD";
    pub const TEST_CMD: &str = "TEST_CMD";

    pub const FORMAT_WEIGHT: &str = "FORMAT_WEIGHT";
    pub const BUILD_WEIGHT: &str = "BUILD_WEIGHT";
    pub const VET_WEIGHT: &str = "VET_WEIGHT";
    pub const LINT_WEIGHT: &str = "LINT_WEIGHT";
    pub const TYPE_WEIGHT: &str = "TYPE_WEIGHT";
    pub const TEST_WEIGHT: &str = "TEST_WEIGHT";

    pub const THRESHOLD: &str = "THRESHOLD";
    pub const CUSTOM_PROTECTED_FILES: &str = "CUSTOM_PROTECTED_FILES";

    pub const RECOGNIZED: &[&str] = &[
        LANGUAGE,
        FORMAT_CMD,
        IMPORTS_CMD,
        BUILD_CMD,
        VET_CMD,
        LINT_CMD,
        TYPE_CMD,
        TEST_CMD,
        FORMAT_WEIGHT,
        BUILD_WEIGHT,
        VET_WEIGHT,
        LINT_WEIGHT,
        TYPE_WEIGHT,
        TEST_WEIGHT,
        THRESHOLD,
        CUSTOM_PROTECTED_FILES,
    ];

    pub fn is_recognized(key: &str) -> bool {
        RECOGNIZED.contains(&key)
    }
}

/// A single quality-gate check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Check {
    Format,
    Imports,
    Build,
    Vet,
    Lint,
    Type,
    Test,
}

impl Check {
    /// All checks, in the order they appear in a configuration file
    pub const ALL: [Check; 7] = [
        Check::Format,
        Check::Imports,
        Check::Build,
        Check::Vet,
        Check::Lint,
        Check::Type,
        Check::Test,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Imports => "imports",
            Self::Build => "build",
            Self::Vet => "vet",
            Self::Lint => "lint",
            Self::Type => "type",
            Self::Test => "test",
        }
    }

    pub fn command_key(self) -> &'static str {
        match self {
            Self::Format => keys::FORMAT_CMD,
            Self::Imports => keys::IMPORTS_CMD,
            Self::Build => keys::BUILD_CMD,
            Self::Vet => keys::VET_CMD,
            Self::Lint => keys::LINT_CMD,
            Self::Type => keys::TYPE_CMD,
            Self::Test => keys::TEST_CMD,
        }
    }

    /// Imports has no weight of its own.
    pub fn weight_key(self) -> Option<&'static str> {
        match self {
            Self::Format => Some(keys::FORMAT_WEIGHT),
            Self::Imports => None,
            Self::Build => Some(keys::BUILD_WEIGHT),
            Self::Vet => Some(keys::VET_WEIGHT),
            Self::Lint => Some(keys::LINT_WEIGHT),
            Self::Type => Some(keys::TYPE_WEIGHT),
            Self::Test => Some(keys::TEST_WEIGHT),
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrowed view of one check's command and weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckSpec<'a> {
    pub check: Check,
    pub command: &'a str,
    pub weight: u32,
}

impl CheckSpec<'_> {
    pub fn is_skipped(&self) -> bool {
        self.command.trim().is_empty()
    }
}

/// File name patterns the consuming tool must never modify
#[derive(Debug, Clone, Default)]
pub struct ProtectedFiles {
    patterns: Vec<String>,
    matcher: GlobSet,
}

impl ProtectedFiles {
    pub fn new(patterns: Vec<String>) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            patterns,
            matcher: builder.build()?,
        })
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Matches either the whole path or just its file name.
    pub fn is_protected(&self, path: &Path) -> bool {
        if self.matcher.is_match(path) {
            return true;
        }
        path.file_name()
            .is_some_and(|name| self.matcher.is_match(name))
    }
}

impl PartialEq for ProtectedFiles {
    fn eq(&self, other: &Self) -> bool {
        self.patterns == other.patterns
    }
}

impl Eq for ProtectedFiles {}

impl Serialize for ProtectedFiles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.patterns)
    }
}

/// Typed quality-gate configuration
///
/// Built from a [`RawConfig`]; every recognized key falls back to its
/// default when absent:
///
/// | Key | Default |
/// |---|---|
/// | `LANGUAGE` | none |
/// | `*_CMD` | `""` (check skipped) |
/// | `*_WEIGHT` | `0` |
/// | `THRESHOLD` | `80` |
/// | `CUSTOM_PROTECTED_FILES` | `()` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyLoopConfig {
    /// Target language tag (e.g. "go")
    pub language: Option<String>,

    pub format_cmd: String,
    pub imports_cmd: String,
    pub build_cmd: String,
    pub vet_cmd: String,
    pub lint_cmd: String,
    pub type_cmd: String,
    pub test_cmd: String,

    pub format_weight: u32,
    pub build_weight: u32,
    pub vet_weight: u32,
    pub lint_weight: u32,
    pub type_weight: u32,
    pub test_weight: u32,

    /// Pass/fail cutoff percentage (0-100)
    pub threshold: u8,

    pub custom_protected_files: ProtectedFiles,
}

impl Default for VerifyLoopConfig {
    fn default() -> Self {
        Self {
            language: None,
            format_cmd: String::new(),
            imports_cmd: String::new(),
            build_cmd: String::new(),
            vet_cmd: String::new(),
            lint_cmd: String::new(),
            type_cmd: String::new(),
            test_cmd: String::new(),
            format_weight: default_weight(),
            build_weight: default_weight(),
            vet_weight: default_weight(),
            lint_weight: default_weight(),
            type_weight: default_weight(),
            test_weight: default_weight(),
            threshold: default_threshold(),
            custom_protected_files: ProtectedFiles::default(),
        }
    }
}

pub fn default_threshold() -> u8 {
    80
}

fn default_weight() -> u32 {
    0
}

const MAX_THRESHOLD: u64 = 100;

impl VerifyLoopConfig {
    /// Coerce raw string values into typed fields.
    pub fn from_raw(raw: &RawConfig) -> ConfigResult<Self> {
        Ok(Self {
            language: string_value(raw, keys::LANGUAGE)?.filter(|s| !s.is_empty()),
            format_cmd: string_value(raw, keys::FORMAT_CMD)?.unwrap_or_default(),
            imports_cmd: string_value(raw, keys::IMPORTS_CMD)?.unwrap_or_default(),
            build_cmd: string_value(raw, keys::BUILD_CMD)?.unwrap_or_default(),
            vet_cmd: string_value(raw, keys::VET_CMD)?.unwrap_or_default(),
            lint_cmd: string_value(raw, keys::LINT_CMD)?.unwrap_or_default(),
            type_cmd: string_value(raw, keys::TYPE_CMD)?.unwrap_or_default(),
            test_cmd: string_value(raw, keys::TEST_CMD)?.unwrap_or_default(),
            format_weight: weight_value(raw, keys::FORMAT_WEIGHT)?,
            build_weight: weight_value(raw, keys::BUILD_WEIGHT)?,
            vet_weight: weight_value(raw, keys::VET_WEIGHT)?,
            lint_weight: weight_value(raw, keys::LINT_WEIGHT)?,
            type_weight: weight_value(raw, keys::TYPE_WEIGHT)?,
            test_weight: weight_value(raw, keys::TEST_WEIGHT)?,
            threshold: threshold_value(raw)?,
            custom_protected_files: protected_files_value(raw)?,
        })
    }

    pub fn command(&self, check: Check) -> &str {
        match check {
            Check::Format => &self.format_cmd,
            Check::Imports => &self.imports_cmd,
            Check::Build => &self.build_cmd,
            Check::Vet => &self.vet_cmd,
            Check::Lint => &self.lint_cmd,
            Check::Type => &self.type_cmd,
            Check::Test => &self.test_cmd,
        }
    }

    pub fn weight(&self, check: Check) -> u32 {
        match check {
            Check::Format => self.format_weight,
            Check::Imports => 0,
            Check::Build => self.build_weight,
            Check::Vet => self.vet_weight,
            Check::Lint => self.lint_weight,
            Check::Type => self.type_weight,
            Check::Test => self.test_weight,
        }
    }

    /// An empty command means the check is skipped.
    pub fn is_skipped(&self, check: Check) -> bool {
        self.command(check).trim().is_empty()
    }

    pub fn checks(&self) -> impl Iterator<Item = CheckSpec<'_>> {
        Check::ALL.into_iter().map(move |check| CheckSpec {
            check,
            command: self.command(check),
            weight: self.weight(check),
        })
    }

    /// Sum of all weights, skipped checks included
    pub fn total_weight(&self) -> u64 {
        self.checks().map(|spec| u64::from(spec.weight)).sum()
    }

    /// Sum of the weights of checks that have a command
    pub fn active_weight(&self) -> u64 {
        self.checks()
            .filter(|spec| !spec.is_skipped())
            .map(|spec| u64::from(spec.weight))
            .sum()
    }

    pub fn is_protected(&self, path: &Path) -> bool {
        self.custom_protected_files.is_protected(path)
    }

    /// Resolved value of a recognized key, defaults applied.
    ///
    /// Returns `None` for unrecognized keys and for an unset `LANGUAGE`.
    pub fn value_of(&self, key: &str) -> Option<String> {
        if key == keys::LANGUAGE {
            return self.language.clone();
        }
        if key == keys::THRESHOLD {
            return Some(self.threshold.to_string());
        }
        if key == keys::CUSTOM_PROTECTED_FILES {
            return Some(self.custom_protected_files.patterns().join(" "));
        }

        Check::ALL.into_iter().find_map(|check| {
            if check.command_key() == key {
                Some(self.command(check).to_string())
            } else if check.weight_key() == Some(key) {
                Some(self.weight(check).to_string())
            } else {
                None
            }
        })
    }
}

fn string_value(raw: &RawConfig, key: &str) -> ConfigResult<Option<String>> {
    match raw.get(key) {
        None => Ok(None),
        Some(RawValue::Scalar(s)) => Ok(Some(s.clone())),
        Some(value @ RawValue::Array(_)) => Err(ConfigError::Type {
            key: key.to_string(),
            value: value.to_string(),
            expected: "string",
        }),
    }
}

/// Present but empty values are type errors, not defaults.
fn integer_value(raw: &RawConfig, key: &str) -> ConfigResult<Option<u64>> {
    let Some(value) = string_value(raw, key)? else {
        return Ok(None);
    };

    value
        .trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::Type {
            key: key.to_string(),
            value,
            expected: "non-negative integer",
        })
}

fn weight_value(raw: &RawConfig, key: &str) -> ConfigResult<u32> {
    let Some(weight) = integer_value(raw, key)? else {
        return Ok(default_weight());
    };

    u32::try_from(weight).map_err(|_| ConfigError::OutOfRange {
        key: key.to_string(),
        value: weight,
        min: 0,
        max: u64::from(u32::MAX),
    })
}

fn threshold_value(raw: &RawConfig) -> ConfigResult<u8> {
    let Some(threshold) = integer_value(raw, keys::THRESHOLD)? else {
        return Ok(default_threshold());
    };

    u8::try_from(threshold)
        .ok()
        .filter(|t| u64::from(*t) <= MAX_THRESHOLD)
        .ok_or_else(|| ConfigError::OutOfRange {
            key: keys::THRESHOLD.to_string(),
            value: threshold,
            min: 0,
            max: MAX_THRESHOLD,
        })
}

fn protected_files_value(raw: &RawConfig) -> ConfigResult<ProtectedFiles> {
    let patterns = match raw.get(keys::CUSTOM_PROTECTED_FILES) {
        None => Vec::new(),
        Some(RawValue::Array(items)) => items.clone(),
        Some(RawValue::Scalar(s)) if s.trim().is_empty() => Vec::new(),
        Some(RawValue::Scalar(s)) => vec![s.clone()],
    };

    ProtectedFiles::new(patterns.clone()).map_err(|_| ConfigError::Type {
        key: keys::CUSTOM_PROTECTED_FILES.to_string(),
        value: patterns.join(" "),
        expected: "list of glob patterns",
    })
}
