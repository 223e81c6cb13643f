//! Vault and project configuration.
//!
//! The global configuration lives in a JSON file (by default
//! `<config dir>/recallvault/config.json`). Each project may carry its own
//! `config.json` whose values override the global ones.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configuration file location.
pub const CONFIG_ENV: &str = "RECALLVAULT_CONFIG";

/// Default entry count per segment.
pub const DEFAULT_LOG_LIMIT: usize = 100;

/// Default editor command.
pub const DEFAULT_EDITOR: &str = "nano";

/// Directory under the vault root that holds templates by default.
pub const DEFAULT_TEMPLATE_DIR: &str = ".templates";

/// Keys accepted by [`Config::set`].
pub const CONFIG_KEYS: [&str; 5] = ["path", "editor", "log_limit", "template_path", "debug"];

/// Global configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vault root. A leading `~` is expanded to the home directory.
    pub path: PathBuf,

    /// Editor command used to compose entries.
    pub editor: String,

    /// Entries per segment before rotation.
    #[serde(deserialize_with = "number_or_string")]
    pub log_limit: usize,

    /// Template directory. Defaults to `<path>/.templates`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,

    /// Enables debug logging.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("~/recallvault"),
            editor: DEFAULT_EDITOR.to_string(),
            log_limit: DEFAULT_LOG_LIMIT,
            template_path: None,
            debug: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the vault root.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the editor command.
    #[must_use]
    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = editor.into();
        self
    }

    /// Sets the segment capacity.
    #[must_use]
    pub const fn with_log_limit(mut self, log_limit: usize) -> Self {
        self.log_limit = log_limit;
        self
    }

    /// Sets the template directory.
    #[must_use]
    pub fn with_template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = Some(path.into());
        self
    }

    /// Enables or disables debug logging.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Loads configuration from a JSON file.
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Loads configuration, falling back to defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: impl AsRef<Path>) -> CoreResult<Self> {
        match fs::read_to_string(path.as_ref()) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the configuration as pretty-printed JSON, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> CoreResult<()> {
        write_json(path.as_ref(), self)
    }

    /// Sets a value by key, parsing it from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownConfigKey`] for keys outside
    /// [`CONFIG_KEYS`] and [`CoreError::Config`] for values that do not parse.
    pub fn set(&mut self, key: &str, value: &str) -> CoreResult<()> {
        match key {
            "path" => {
                if value.trim().is_empty() {
                    return Err(CoreError::config("path must not be empty"));
                }
                self.path = PathBuf::from(value);
            }
            "editor" => {
                if value.trim().is_empty() {
                    return Err(CoreError::config("editor must not be empty"));
                }
                self.editor = value.to_string();
            }
            "log_limit" => self.log_limit = parse_log_limit(value)?,
            "template_path" => {
                self.template_path = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "debug" => {
                self.debug = value
                    .parse()
                    .map_err(|_| CoreError::config(format!("debug must be true or false, got {value:?}")))?;
            }
            _ => {
                return Err(CoreError::UnknownConfigKey {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Returns every key with its display value, in [`CONFIG_KEYS`] order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("path", self.path.display().to_string()),
            ("editor", self.editor.clone()),
            ("log_limit", self.log_limit.to_string()),
            ("template_path", self.templates_dir().display().to_string()),
            ("debug", self.debug.to_string()),
        ]
    }

    /// Returns the vault root with `~` expanded.
    #[must_use]
    pub fn vault_root(&self) -> PathBuf {
        expand_home(&self.path)
    }

    /// Returns the template directory with `~` expanded.
    #[must_use]
    pub fn templates_dir(&self) -> PathBuf {
        match &self.template_path {
            Some(path) => expand_home(path),
            None => self.vault_root().join(DEFAULT_TEMPLATE_DIR),
        }
    }
}

/// Per-project overrides stored in `<project>/config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Editor override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    /// Capacity override.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_number_or_string"
    )]
    pub log_limit: Option<usize>,

    /// Template used by `write` when none is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_template: Option<String>,
}

impl ProjectConfig {
    /// The file written for a project that has no configuration yet.
    #[must_use]
    pub fn scaffold() -> Self {
        Self {
            editor: Some(DEFAULT_EDITOR.to_string()),
            log_limit: Some(DEFAULT_LOG_LIMIT),
            default_template: Some("default_template".to_string()),
        }
    }

    /// Loads a project configuration, or returns an empty one if the file is
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: impl AsRef<Path>) -> CoreResult<Self> {
        match fs::read_to_string(path.as_ref()) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> CoreResult<()> {
        write_json(path.as_ref(), self)
    }

    /// Editor to use, falling back to the global one.
    #[must_use]
    pub fn editor<'a>(&'a self, global: &'a Config) -> &'a str {
        self.editor.as_deref().unwrap_or(&global.editor)
    }

    /// Capacity to use, falling back to the global one.
    #[must_use]
    pub fn log_limit(&self, global: &Config) -> usize {
        self.log_limit.unwrap_or(global.log_limit)
    }
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or when no home directory is known, are
/// returned unchanged.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs_next::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Default location of the global configuration file.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join("recallvault").join("config.json"))
}

fn parse_log_limit(value: &str) -> CoreResult<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(CoreError::config(format!(
            "log_limit must be a positive integer, got {value:?}"
        ))),
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> CoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}

/// Older configuration files store numbers as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(usize),
    String(String),
}

impl NumberOrString {
    fn into_usize<E: serde::de::Error>(self) -> Result<usize, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::String(s) => s.trim().parse().map_err(E::custom),
        }
    }
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    NumberOrString::deserialize(deserializer)?.into_usize()
}

fn optional_number_or_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<usize>, D::Error> {
    Option::<NumberOrString>::deserialize(deserializer)?
        .map(NumberOrString::into_usize)
        .transpose()
}
