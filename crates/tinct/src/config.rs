//! Engine configuration.
//!
//! [`EngineConfig`] holds every knob the store reads at construction time.
//! It is loaded from TOML; any field left out takes its default.
//!
//! ```rust
//! use tinct::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     initial_theme = "nord"
//!     clear_first = false
//! "#).unwrap();
//!
//! assert_eq!(config.initial_theme.as_deref(), Some("nord"));
//! assert_eq!(config.default_theme, "midnight");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builtin::DEFAULT_THEME_ID;
use crate::error::ConfigError;

/// Storage key holding the JSON array of user themes.
pub const CUSTOM_THEMES_KEY: &str = "tinct.custom-themes";
/// Storage key holding the remembered active theme id.
pub const ACTIVE_THEME_KEY: &str = "tinct.active-theme";

/// Runtime options for [`ThemeStore`](crate::store::ThemeStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Theme used when a requested id is unknown.
    pub default_theme: String,

    /// Theme to activate on start, overriding the remembered one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_theme: Option<String>,

    /// Remove every token variable before applying a theme.
    pub clear_first: bool,

    /// Storage key for user themes.
    pub storage_key: String,

    /// Storage key for the active theme id.
    pub active_key: String,

    /// Persist the active id on every switch.
    pub remember_active: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_theme: DEFAULT_THEME_ID.to_string(),
            initial_theme: None,
            clear_first: true,
            storage_key: CUSTOM_THEMES_KEY.to_string(),
            active_key: ACTIVE_THEME_KEY.to_string(),
            remember_active: true,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => {
                debug!(config.path = %path.display(), "Loading engine config");
                Self::from_toml_str(&content)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(config.path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn with_initial_theme(mut self, id: impl Into<String>) -> Self {
        self.initial_theme = Some(id.into());
        self
    }

    pub fn with_clear_first(mut self, clear_first: bool) -> Self {
        self.clear_first = clear_first;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.default_theme, "midnight");
        assert!(config.clear_first);
        assert!(config.remember_active);
        assert_eq!(config.storage_key, "tinct.custom-themes");
        assert_eq!(config.active_key, "tinct.active-theme");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn toml_round_trip() {
        let config = EngineConfig::default()
            .with_initial_theme("nord")
            .with_clear_first(false);
        let text = config.to_toml().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(matches!(
            EngineConfig::from_toml_str("clear_first = \"yes\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::from_file(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
