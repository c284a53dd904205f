//! A small reader for the line-oriented `key = value` format used by
//! mpdscribble configuration files.
//!
//! The format predates sections, so anything before the first `[section]`
//! header lands in the implicit [`DEFAULT_TARGET_SECTION`]. Old single-target
//! files therefore keep working without modification.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;

use super::{ConfigurationError, DEFAULT_TARGET_SECTION};


#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyFileError {
    #[error("line {line}: \"{content}\" is not a key-value pair, section or comment")]
    InvalidLine { line: usize, content: String },

    #[error("line {line}: invalid section header \"{content}\"")]
    InvalidSection { line: usize, content: String },

    #[error("line {line}: key must not be empty")]
    EmptyKey { line: usize },

    #[error("[{section}] {key}: invalid escape sequence in \"{value}\"")]
    InvalidEscape {
        section: String,
        key: String,
        value: String,
    },

    #[error("[{section}] {key}: \"{value}\" is not an integer")]
    InvalidInteger {
        section: String,
        key: String,
        value: String,
    },

    #[error("[{section}] {key}: {value} is out of range")]
    OutOfRange {
        section: String,
        key: String,
        value: i64,
    },
}


#[derive(Debug, Clone)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }
}


/// A parsed configuration file.
#[derive(Debug, Clone)]
pub struct KeyFile {
    path: PathBuf,
    sections: Vec<Section>,
}

impl KeyFile {
    /// Read and parse the file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();

        // Every diagnostic about this file reports the same, canonical path.
        let display_path = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

        let contents =
            fs::read_to_string(&display_path).map_err(|source| ConfigurationError::ReadFile {
                path: display_path.clone(),
                source,
            })?;

        Self::parse(&contents, &display_path)
            .map_err(|source| ConfigurationError::malformed(display_path.clone(), source))
    }

    pub fn parse(contents: &str, path: impl Into<PathBuf>) -> Result<Self, KeyFileError> {
        let mut sections = vec![Section::new(DEFAULT_TARGET_SECTION)];
        let mut current = 0;

        for (index, raw_line) in contents.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') {
                let name = line
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                    .filter(|name| !name.is_empty() && !name.contains(['[', ']']))
                    .ok_or_else(|| KeyFileError::InvalidSection {
                        line: line_number,
                        content: line.to_string(),
                    })?;

                current = match sections.iter().position(|section| section.name == name) {
                    Some(existing) => existing,
                    None => {
                        sections.push(Section::new(name));
                        sections.len() - 1
                    }
                };

                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(KeyFileError::InvalidLine {
                    line: line_number,
                    content: line.to_string(),
                });
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(KeyFileError::EmptyKey { line: line_number });
            }

            sections[current].insert(key.to_string(), value.trim().to_string());
        }

        Ok(Self {
            path: path.into(),
            sections,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Section names in order of first appearance. The implicit default
    /// section is always first.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.name.as_str())
    }

    /// The unprocessed value of `key` in `section`, if present.
    pub fn raw_value(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|candidate| candidate.name == section)
            .and_then(|section| section.get(key))
    }

    /// `Ok(None)` means the key is absent, which callers treat as "not configured".
    pub fn get_string(&self, section: &str, key: &str) -> Result<Option<String>, KeyFileError> {
        let Some(raw) = self.raw_value(section, key) else {
            return Ok(None);
        };

        unescape(raw)
            .map(Some)
            .ok_or_else(|| KeyFileError::InvalidEscape {
                section: section.to_string(),
                key: key.to_string(),
                value: raw.to_string(),
            })
    }

    pub fn get_integer(&self, section: &str, key: &str) -> Result<Option<i64>, KeyFileError> {
        let Some(raw) = self.raw_value(section, key) else {
            return Ok(None);
        };

        raw.parse::<i64>()
            .map(Some)
            .map_err(|_| KeyFileError::InvalidInteger {
                section: section.to_string(),
                key: key.to_string(),
                value: raw.to_string(),
            })
    }

    /// Like [`KeyFile::get_integer`], narrowed to the field's own type.
    pub fn get_integer_as<T>(&self, section: &str, key: &str) -> Result<Option<T>, KeyFileError>
    where
        T: TryFrom<i64>,
    {
        let Some(value) = self.get_integer(section, key)? else {
            return Ok(None);
        };

        T::try_from(value)
            .map(Some)
            .map_err(|_| KeyFileError::OutOfRange {
                section: section.to_string(),
                key: key.to_string(),
                value,
            })
    }
}


/// Returns `None` on an unknown or dangling escape.
fn unescape(raw: &str) -> Option<String> {
    let mut output = String::with_capacity(raw.len());
    let mut characters = raw.chars();

    while let Some(character) = characters.next() {
        if character != '\\' {
            output.push(character);
            continue;
        }

        let escaped = match characters.next()? {
            's' => ' ',
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '\\' => '\\',
            _ => return None,
        };
        output.push(escaped);
    }

    Some(output)
}
