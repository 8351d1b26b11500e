//! Namespace configuration types.

use std::borrow::Cow;
use std::path::Path;

use compact_str::CompactString;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, FsError, FsResult};

/// Default maximum length of a single entry name, in characters.
pub const DEFAULT_MAX_NAME_LEN: usize = 63;

/// Default maximum length of a full path, in characters.
pub const DEFAULT_MAX_PATH_LEN: usize = 255;

/// What to do with names and paths longer than the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamePolicy {
    /// Silently cut to the bound (a warning is logged).
    #[default]
    Truncate,
    /// Fail the operation with `NameTooLong` / `PathTooLong`.
    Reject,
}

/// Configuration for a namespace session.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct TreeConfig {
    /// Maximum characters kept in an entry name.
    #[builder(default = "DEFAULT_MAX_NAME_LEN")]
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,

    /// Maximum characters considered in a path.
    #[builder(default = "DEFAULT_MAX_PATH_LEN")]
    #[serde(default = "default_max_path_len")]
    pub max_path_len: usize,

    /// Handling of over-length names and paths.
    #[builder(default)]
    #[serde(default)]
    pub name_policy: NamePolicy,

    /// Treat a file and a directory with the same name as a collision.
    #[builder(default = "false")]
    #[serde(default)]
    pub unique_across_kinds: bool,
}

fn default_max_name_len() -> usize {
    DEFAULT_MAX_NAME_LEN
}

fn default_max_path_len() -> usize {
    DEFAULT_MAX_PATH_LEN
}

impl TreeConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        let name = self.max_name_len.unwrap_or(DEFAULT_MAX_NAME_LEN);
        let path = self.max_path_len.unwrap_or(DEFAULT_MAX_PATH_LEN);
        check_bounds(name, path)
    }
}

fn check_bounds(max_name_len: usize, max_path_len: usize) -> Result<(), String> {
    if max_name_len == 0 || max_path_len == 0 {
        return Err("Length bounds must be greater than zero".to_string());
    }
    if max_name_len > max_path_len {
        return Err(format!(
            "max_name_len ({max_name_len}) cannot exceed max_path_len ({max_path_len})"
        ));
    }
    Ok(())
}

impl TreeConfig {
    /// Create a new config builder.
    pub fn builder() -> TreeConfigBuilder {
        TreeConfigBuilder::default()
    }

    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        check_bounds(config.max_name_len, config.max_path_len)
            .map_err(|message| ConfigError::Invalid { message })?;
        Ok(config)
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Apply the name bound to a leaf name.
    pub fn bound_name(&self, name: &str) -> FsResult<CompactString> {
        match cut_at_chars(name, self.max_name_len) {
            None => Ok(CompactString::from(name)),
            Some(kept) => match self.name_policy {
                NamePolicy::Truncate => {
                    tracing::warn!(original = name, kept, "name truncated");
                    Ok(CompactString::from(kept))
                }
                NamePolicy::Reject => Err(FsError::NameTooLong {
                    name: name.to_string(),
                    max: self.max_name_len,
                }),
            },
        }
    }

    /// Apply the path bound to a full path string.
    pub fn bound_path<'a>(&self, path: &'a str) -> FsResult<Cow<'a, str>> {
        match cut_at_chars(path, self.max_path_len) {
            None => Ok(Cow::Borrowed(path)),
            Some(kept) => match self.name_policy {
                NamePolicy::Truncate => {
                    tracing::warn!(original = path, kept, "path truncated");
                    Ok(Cow::Borrowed(kept))
                }
                NamePolicy::Reject => Err(FsError::PathTooLong {
                    len: path.chars().count(),
                    max: self.max_path_len,
                }),
            },
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_name_len: DEFAULT_MAX_NAME_LEN,
            max_path_len: DEFAULT_MAX_PATH_LEN,
            name_policy: NamePolicy::Truncate,
            unique_across_kinds: false,
        }
    }
}

/// Returns the prefix of `s` holding `max` characters, or `None` if `s` already fits.
fn cut_at_chars(s: &str, max: usize) -> Option<&str> {
    s.char_indices().nth(max).map(|(idx, _)| &s[..idx])
}
