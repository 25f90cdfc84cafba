//! Configuration file handling.
//!
//! Reads from `~/.config/kpdiff/kpdiff.toml`, or from the file named by the
//! `KPDIFF_CONFIG` environment variable.

use anyhow::{Context, Result};
use kpdiff_core::{GroupKey, OutputFormat, Renderer};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Output format for diff records.
    #[serde(default)]
    pub format: OutputFormat,
    /// Replace passwords with a mask in the output.
    #[serde(default)]
    pub mask_passwords: bool,
    /// Separator between title, username and password in text output.
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Attribute used to match groups between the two databases.
    #[serde(default)]
    pub group_key: GroupKey,
}

fn default_separator() -> String {
    "::".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            mask_passwords: false,
            separator: default_separator(),
            group_key: GroupKey::default(),
        }
    }
}

impl Config {
    /// Load configuration from the config file.
    ///
    /// If `custom_path` is provided, load from that path and fail if it is
    /// missing. Otherwise use the default XDG location, falling back to
    /// defaults when no file exists there.
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self> {
        let config_path = match custom_path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                path
            }
            None => match Self::config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("No config file, using defaults");
                    return Ok(Config::default());
                }
            },
        };

        Self::load_from(&config_path)
    }

    fn load_from(config_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        tracing::info!("Loaded config from {}: {:?}", config_path.display(), config);
        Ok(config)
    }

    /// Build the record renderer described by this configuration.
    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.format)
            .with_separator(self.separator.clone())
            .with_masked_passwords(self.mask_passwords)
    }

    /// Get the path to the default config file.
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kpdiff").join("kpdiff.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.separator, "::");
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.group_key, GroupKey::Name);
    }

    #[test]
    fn parses_all_keys() {
        let config: Config = toml::from_str(
            r#"
            format = "json"
            mask_passwords = true
            separator = " | "
            group_key = "uuid"
            "#,
        )
        .unwrap();

        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.mask_passwords);
        assert_eq!(config.separator, " | ");
        assert_eq!(config.group_key, GroupKey::Uuid);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(toml::from_str::<Config>(r#"format = "yaml""#).is_err());
    }

    #[test]
    fn custom_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = Config::load(Some(missing)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn loads_custom_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kpdiff.toml");
        std::fs::write(&path, "mask_passwords = true\n").unwrap();

        let config = Config::load(Some(path)).unwrap();
        assert!(config.mask_passwords);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "mask_passwords = [").unwrap();

        let err = Config::load(Some(path)).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }
}
