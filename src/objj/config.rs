//! Configuration loading
//!
//! `defaults/objj.default.toml` is embedded into the binary so that the documented
//! defaults and runtime behavior stay in sync. Callers layer user files and single-key
//! overrides on top via [`Loader`] before deserializing into [`BracketsConfig`].

use crate::objj::error::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../../defaults/objj.default.toml");

/// File name looked up in the user's configuration directory.
pub const USER_CONFIG_FILE: &str = "objj-brackets.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketsConfig {
    pub snippet: SnippetConfig,
    pub editor: EditorConfig,
}

/// How balanced lines are rendered as editor snippets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SnippetConfig {
    pub caret_marker: String,
    pub escape: bool,
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            caret_marker: "$0".to_string(),
            escape: true,
        }
    }
}

/// Names of the environment variables the editor passes the line in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditorConfig {
    pub line_variable: String,
    pub index_variable: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<BracketsConfig> {
        Ok(self.builder.build()?.try_deserialize()?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<BracketsConfig> {
    Loader::new().build()
}

/// Per-user configuration file, `$XDG_CONFIG_HOME/objj-brackets.toml` or
/// `$HOME/.config/objj-brackets.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    user_config_path_from(|name| std::env::var_os(name))
}

fn user_config_path_from<F>(lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());
    let dir = match non_empty("XDG_CONFIG_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(non_empty("HOME")?).join(".config"),
    };
    Some(dir.join(USER_CONFIG_FILE))
}
