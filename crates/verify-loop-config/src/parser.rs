//! Parser for shell-style `KEY="value"` assignment files.
//!
//! Only the subset of shell syntax that hook configuration files use is
//! understood: comments, blank lines, optional `export`, single words built
//! from quoted and unquoted segments, and one-line arrays `KEY=("a" "b")`.
//! Nothing is expanded: `$VAR` and `$(cmd)` are kept verbatim.

use crate::error::{ConfigError, ConfigResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;
use tracing::debug;

/// Value on the right-hand side of an assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Scalar(String),
    Array(Vec<String>),
}

impl RawValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::Array(items) => Some(items),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => f.write_str(s),
            Self::Array(items) => f.write_str(&items.join(" ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawEntry {
    pub value: RawValue,
    /// 1-based line of the assignment that produced this value
    pub line: usize,
}

/// Every assignment in a file, keyed by name.
///
/// Unrecognized keys are kept so callers can inspect or forward them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawConfig {
    entries: BTreeMap<String, RawEntry>,
}

impl RawConfig {
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    pub fn entry(&self, key: &str) -> Option<&RawEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse file content into a [`RawConfig`].
///
/// A repeated key overwrites the earlier assignment, as sourcing the file
/// in a shell would.
pub fn parse_str(content: &str) -> ConfigResult<RawConfig> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut entries = BTreeMap::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let parsed = parse_line(line).map_err(|reason| ConfigError::Parse {
            line: line_no,
            content: line.trim().to_string(),
            reason,
        })?;

        let Some((key, value)) = parsed else {
            continue;
        };

        let entry = RawEntry {
            value,
            line: line_no,
        };
        if let Some(previous) = entries.insert(key.clone(), entry) {
            debug!(
                key = %key,
                previous_line = previous.line,
                line = line_no,
                "Duplicate assignment, keeping the last one"
            );
        }
    }

    Ok(RawConfig { entries })
}

fn parse_line(line: &str) -> Result<Option<(String, RawValue)>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let assignment = trimmed
        .strip_prefix("export ")
        .map(str::trim_start)
        .unwrap_or(trimmed);

    let (key, value) = assignment
        .split_once('=')
        .ok_or_else(|| "missing '='".to_string())?;

    if !is_identifier(key) {
        return Err(format!("invalid key {:?}", key));
    }

    let value = match value.strip_prefix('(') {
        Some(rest) => RawValue::Array(parse_array(rest)?),
        None => RawValue::Scalar(parse_scalar(value)?),
    };

    Ok(Some((key.to_string(), value)))
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_scalar(input: &str) -> Result<String, String> {
    let mut lexer = Lexer::new(input);
    let word = lexer.read_word()?;
    lexer.finish()?;
    Ok(word)
}

fn parse_array(input: &str) -> Result<Vec<String>, String> {
    let mut lexer = Lexer::new(input);
    let mut items = Vec::new();

    loop {
        lexer.skip_whitespace();
        match lexer.peek() {
            None | Some('#') => return Err("unterminated array".to_string()),
            Some(')') => {
                lexer.bump();
                lexer.finish()?;
                return Ok(items);
            }
            Some(_) => items.push(lexer.read_word()?),
        }
    }
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Read one word, stopping at unquoted whitespace, `)` or end of input.
    fn read_word(&mut self) -> Result<String, String> {
        let mut word = String::new();

        while let Some(c) = self.peek() {
            match c {
                c if c.is_whitespace() => break,
                ')' => break,
                '"' => {
                    self.bump();
                    self.read_double_quoted(&mut word)?;
                }
                '\'' => {
                    self.bump();
                    self.read_single_quoted(&mut word)?;
                }
                '\\' => {
                    self.bump();
                    word.push(self.bump().unwrap_or('\\'));
                }
                c => {
                    self.bump();
                    word.push(c);
                }
            }
        }

        Ok(word)
    }

    fn read_double_quoted(&mut self, word: &mut String) -> Result<(), String> {
        loop {
            match self.bump() {
                None => return Err("unterminated double quote".to_string()),
                Some('"') => return Ok(()),
                Some('\\') => match self.peek() {
                    Some(c @ ('"' | '\\' | '$' | '`')) => {
                        self.bump();
                        word.push(c);
                    }
                    _ => word.push('\\'),
                },
                Some(c) => word.push(c),
            }
        }
    }

    fn read_single_quoted(&mut self, word: &mut String) -> Result<(), String> {
        loop {
            match self.bump() {
                None => return Err("unterminated single quote".to_string()),
                Some('\'') => return Ok(()),
                Some(c) => word.push(c),
            }
        }
    }

    /// Only whitespace or a trailing comment may follow a complete value.
    fn finish(&mut self) -> Result<(), String> {
        self.skip_whitespace();
        match self.peek() {
            None | Some('#') => Ok(()),
            Some(_) => {
                let rest: String = self.chars.by_ref().collect();
                Err(format!("unexpected trailing content {:?}", rest))
            }
        }
    }
}
