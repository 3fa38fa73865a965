//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/btxml/btxml.toml`
//! 3. Explicit config file (`--config <file>`)
//! 4. Environment variables: `BTXML_*` prefix

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Serialization format for `export`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Toml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "toml" => Ok(OutputFormat::Toml),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Parameter lint settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LintConfig {
    /// Treat lint issues as failures in `check`
    pub deny_warnings: bool,
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub format: Option<OutputFormat>,
    pub show_parameters: Option<bool>,
    pub list_actions: Option<bool>,
    pub lint: RawLintConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLintConfig {
    pub deny_warnings: Option<bool>,
}

/// Unified configuration for btxml.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Default format for `export`
    pub format: OutputFormat,
    /// Show parameter values in `tree` output
    pub show_parameters: bool,
    /// Include Action models in `catalog` output
    pub list_actions: bool,
    pub lint: LintConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            show_parameters: true,
            list_actions: false,
            lint: LintConfig::default(),
        }
    }
}

/// Get the XDG config directory for btxml.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "btxml").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("btxml.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            format: overlay.format.unwrap_or(self.format),
            show_parameters: overlay.show_parameters.unwrap_or(self.show_parameters),
            list_actions: overlay.list_actions.unwrap_or(self.list_actions),
            lint: LintConfig {
                deny_warnings: overlay
                    .lint
                    .deny_warnings
                    .unwrap_or(self.lint.deny_warnings),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            let path = expand_path(path);
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            current = current.merge_with(&load_raw_settings(&path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply BTXML_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("BTXML")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("format") {
            settings.format = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get_bool("show_parameters") {
            settings.show_parameters = val;
        }
        if let Ok(val) = config.get_bool("list_actions") {
            settings.list_actions = val;
        }
        if let Ok(val) = config.get_bool("lint.deny_warnings") {
            settings.lint.deny_warnings = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# btxml configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/btxml/btxml.toml
#   Explicit: --config <file>
#   Env:      BTXML_* environment variables (e.g. BTXML_LINT__DENY_WARNINGS=true)

# Default format for `btxml export` ("json" or "toml")
# format = "json"

# Show parameter values in `btxml tree`
# show_parameters = true

# Include Action models in `btxml catalog`
# list_actions = false

[lint]
# Exit non-zero from `btxml check` when any parameter issue is found
# deny_warnings = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load(None).expect("load defaults");
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(settings.show_parameters);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_values() {
        let base = Settings::default();
        let overlay = RawSettings {
            format: Some(OutputFormat::Toml),
            show_parameters: None,
            list_actions: Some(true),
            lint: RawLintConfig {
                deny_warnings: None,
            },
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.format, OutputFormat::Toml);
        assert!(result.show_parameters);
        assert!(result.list_actions);
        assert!(!result.lint.deny_warnings);
    }

    #[test]
    fn given_template_when_parsing_then_yields_empty_overlay() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.format.is_none());
        assert!(raw.lint.deny_warnings.is_none());
    }

    #[test]
    fn given_tilde_path_when_expanding_then_uses_home() {
        let home = std::env::var("HOME").expect("HOME should be set");
        let expanded = expand_path(Path::new("~/btxml.toml"));
        assert!(expanded.to_string_lossy().starts_with(&home));
    }

    #[test]
    fn given_format_names_when_parsing_then_case_insensitive() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("toml".parse::<OutputFormat>(), Ok(OutputFormat::Toml));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
