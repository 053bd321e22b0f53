//! Facade configuration
//!
//! Values come from, in increasing precedence:
//!
//! 1. built-in defaults
//! 2. a JSON file: the path in `LOG_FACADE_CONFIG`, otherwise
//!    `log_facade.json` in the working directory when it exists
//! 3. the `LOG_FACADE_*` environment variables
//!
//! ```
//! use rust_log_facade::core::{FacadeConfig, LogLevel};
//!
//! let config =
//!     FacadeConfig::from_json_str(r#"{ "backend": "console", "console": { "level": "Info" } }"#)
//!         .unwrap();
//! assert_eq!(config.backend.as_deref(), Some("console"));
//! assert_eq!(config.console.level, LogLevel::Info);
//! ```

use super::diagnostics::Diagnostics;
use super::error::{FacadeError, Result};
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_CONFIG_FILE: &str = "LOG_FACADE_CONFIG";
pub const ENV_FACTORY: &str = "LOG_FACADE_FACTORY";
pub const ENV_BACKEND: &str = "LOG_FACADE_BACKEND";
pub const ENV_CONSOLE_LEVEL: &str = "LOG_FACADE_CONSOLE_LEVEL";
pub const ENV_CONSOLE_COLORS: &str = "LOG_FACADE_CONSOLE_COLORS";
pub const DEFAULT_CONFIG_FILE: &str = "log_facade.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FacadeConfig {
    /// Factory implementation identifier; `None` selects the built-in one
    pub factory: Option<String>,
    /// Single backend to use instead of walking the candidate list
    pub backend: Option<String>,
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    pub level: LogLevel,
    pub colors: bool,
    pub timestamp: TimestampFormat,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Trace,
            colors: false,
            timestamp: TimestampFormat::default(),
        }
    }
}

impl FacadeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_factory(mut self, id: impl Into<String>) -> Self {
        self.factory = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_backend(mut self, id: impl Into<String>) -> Self {
        self.backend = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_console_level(mut self, level: LogLevel) -> Self {
        self.console.level = level;
        self
    }

    #[must_use]
    pub fn with_console_colors(mut self, colors: bool) -> Self {
        self.console.colors = colors;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FacadeError::io_operation(
                "reading configuration",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&content)
    }

    /// Build from the file and variables visible through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match non_empty(lookup(ENV_CONFIG_FILE)) {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`FacadeConfig::from_env`], reporting problems instead of failing
    pub fn load(diagnostics: &Diagnostics) -> Self {
        Self::load_with(|key| std::env::var(key).ok(), diagnostics)
    }

    /// Lenient form of [`FacadeConfig::from_lookup`]
    ///
    /// An unreadable or malformed file is reported and replaced by defaults;
    /// the variables are still applied on top. An invalid variable is reported
    /// and only that key is skipped.
    pub fn load_with<F>(lookup: F, diagnostics: &Diagnostics) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match non_empty(lookup(ENV_CONFIG_FILE)) {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        };
        let mut config = file.unwrap_or_else(|e| {
            diagnostics.warn(
                "config",
                format_args!("could not load configuration file ({}), using defaults", e),
            );
            Self::default()
        });

        for e in config.apply_valid_overrides(lookup) {
            diagnostics.warn("config", format_args!("ignoring override: {}", e));
        }
        config
    }

    /// Apply `LOG_FACADE_*` variables on top of the current values
    ///
    /// Valid variables are applied even when another one is rejected; the
    /// first rejection is returned.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self.apply_valid_overrides(lookup).into_iter().next() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Apply every valid `LOG_FACADE_*` variable and return the rejected ones
    pub fn apply_valid_overrides<F>(&mut self, lookup: F) -> Vec<FacadeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rejected = Vec::new();

        if let Some(factory) = non_empty(lookup(ENV_FACTORY)) {
            self.factory = Some(factory);
        }
        if let Some(backend) = non_empty(lookup(ENV_BACKEND)) {
            self.backend = Some(backend);
        }
        if let Some(level) = non_empty(lookup(ENV_CONSOLE_LEVEL)) {
            match level.parse() {
                Ok(level) => self.console.level = level,
                Err(e) => rejected.push(FacadeError::config(ENV_CONSOLE_LEVEL, e)),
            }
        }
        if let Some(colors) = non_empty(lookup(ENV_CONSOLE_COLORS)) {
            match parse_bool(&colors) {
                Some(colors) => self.console.colors = colors,
                None => rejected.push(FacadeError::config(
                    ENV_CONSOLE_COLORS,
                    format!("expected a boolean, got '{}'", colors),
                )),
            }
        }
        rejected
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
