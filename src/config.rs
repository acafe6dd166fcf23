// ⚙️ Configuration - TOML settings for the CLI
// Every field has a default, so a missing file means "all defaults".

use crate::error::ConfigError;
use crate::sorting::{SortDirection, SortKey};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// SETTINGS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub sorting: SortingConfig,
    pub display: DisplayConfig,
}

/// On-disk layout; sort options stay strings until validated
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsFile {
    logging: LoggingConfig,
    sorting: SortingSection,
    display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SortingSection {
    key: Option<String>,
    direction: Option<String>,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::from_toml_str(&content)
    }

    /// Load settings when a path is given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Settings::default()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: SettingsFile = toml::from_str(content).map_err(ConfigError::Parse)?;
        let settings = Settings::try_from(file)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.logging.validate()
    }
}

impl TryFrom<SettingsFile> for Settings {
    type Error = ConfigError;

    fn try_from(file: SettingsFile) -> Result<Self, Self::Error> {
        Ok(Settings {
            logging: file.logging,
            sorting: SortingConfig::try_from(file.sorting)?,
            display: file.display,
        })
    }
}

// ============================================================================
// LOGGING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `price_watch=debug`
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("'{}', expected pretty or json", self.format),
            });
        }

        EnvFilter::try_new(&self.level).map_err(|e| ConfigError::InvalidValue {
            field: "logging.level",
            reason: e.to_string(),
        })?;

        Ok(())
    }

    /// Install the global tracing subscriber. `RUST_LOG` wins over `level`.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        // a subscriber may already be installed (tests); keep it
        let _ = match self.format.as_str() {
            "json" => fmt().json().with_env_filter(filter).with_writer(std::io::stderr).try_init(),
            _ => fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init(),
        };
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

// ============================================================================
// SORTING / DISPLAY
// ============================================================================

/// Defaults for the `sort` command
///
/// Values accept the same spellings as the `--key` / `--direction` flags.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SortingConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl TryFrom<SortingSection> for SortingConfig {
    type Error = ConfigError;

    fn try_from(section: SortingSection) -> Result<Self, Self::Error> {
        let key = match section.key {
            Some(key) => key.parse::<SortKey>()?,
            None => SortKey::default(),
        };
        let direction = match section.direction {
            Some(direction) => direction.parse::<SortDirection>()?,
            None => SortDirection::default(),
        };

        Ok(SortingConfig { key, direction })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "€".into(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let settings = Settings::from_toml_str("").unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.sorting.key, SortKey::Price);
        assert_eq!(settings.sorting.direction, SortDirection::Asc);
        assert_eq!(settings.display.currency_symbol, "€");
    }

    #[test]
    fn test_full_config() {
        let settings = Settings::from_toml_str(
            r#"
            [logging]
            level = "price_watch=debug"
            format = "json"

            [sorting]
            key = "price_per_unit"
            direction = "desc"

            [display]
            currency_symbol = "$"
            "#,
        )
        .unwrap();

        assert_eq!(settings.logging.format, "json");
        assert_eq!(settings.sorting.key, SortKey::PricePerUnit);
        assert_eq!(settings.sorting.direction, SortDirection::Desc);
        assert_eq!(settings.display.currency_symbol, "$");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let settings = Settings::from_toml_str("[sorting]\ndirection = \"desc\"\n").unwrap();

        assert_eq!(settings.sorting.key, SortKey::Price);
        assert_eq!(settings.sorting.direction, SortDirection::Desc);
        assert_eq!(settings.logging, LoggingConfig::default());
    }

    #[test]
    fn test_invalid_format_rejected() {
        let err = Settings::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: "logging.format", .. }
        ));
    }

    #[test]
    fn test_invalid_sort_key_rejected() {
        let err = Settings::from_toml_str("[sorting]\nkey = \"weight\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "sort key", .. }));

        let err = Settings::from_toml_str("[sorting]\ndirection = \"up\"\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: "sort direction", .. }
        ));
    }

    #[test]
    fn test_sort_options_accept_cli_spellings() {
        let settings = Settings::from_toml_str(
            "[sorting]\nkey = \"price-per-unit\"\ndirection = \"DESCENDING\"\n",
        )
        .unwrap();

        assert_eq!(settings.sorting.key, SortKey::PricePerUnit);
        assert_eq!(settings.sorting.direction, SortDirection::Desc);
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = Settings::from_toml_str("[sorting\nkey = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_path_gives_defaults() {
        assert_eq!(Settings::load_or_default(None).unwrap(), Settings::default());
    }

    #[test]
    fn test_unreadable_file() {
        let err = Settings::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile(_)));
    }
}
