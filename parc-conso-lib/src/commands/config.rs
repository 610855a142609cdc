use crate::Result;
use crate::consumption::{ConsumptionAggregator, ConsumptionColumns, MonthNames};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File looked up in the current directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "parc-conso.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Sub-category prefix that marks data usage rows
    #[serde(default = "default_subcategory_prefix")]
    pub subcategory_prefix: String,

    /// Number of most recent months averaged in the summary
    #[serde(default = "default_trailing_window_months")]
    pub trailing_window_months: usize,

    /// Language of the month column labels
    #[serde(default = "default_month_locale")]
    pub month_locale: String,

    /// Name of the worksheet holding every merged row
    #[serde(default = "default_merged_sheet_name")]
    pub merged_sheet_name: String,

    /// Name of the worksheet holding the consumption summary
    #[serde(default = "default_summary_sheet_name")]
    pub summary_sheet_name: String,

    /// Export columns read by the consumption summary
    #[serde(default)]
    pub columns: ConsumptionColumns,
}

fn default_subcategory_prefix() -> String {
    "Echanges".to_string()
}

const fn default_trailing_window_months() -> usize {
    4
}

fn default_month_locale() -> String {
    "fr".to_string()
}

fn default_merged_sheet_name() -> String {
    "Fusion".to_string()
}

fn default_summary_sheet_name() -> String {
    "Moyenne conso DATA".to_string()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading parc-conso configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading parc-conso configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a sheet name or column name is blank, or if the window is zero
    pub fn validate(&self) -> Result<()> {
        if self.trailing_window_months == 0 {
            return Err(app_err!("trailing_window_months must be at least 1, got 0"));
        }

        if self.merged_sheet_name.trim().is_empty() {
            return Err(app_err!("merged_sheet_name must not be empty, got '{}'", self.merged_sheet_name));
        }

        if self.summary_sheet_name.trim().is_empty() {
            return Err(app_err!("summary_sheet_name must not be empty, got '{}'", self.summary_sheet_name));
        }

        let blank = self.columns.blank_names();
        if !blank.is_empty() {
            return Err(app_err!("column names must not be empty: columns.{}", blank.join(", columns.")));
        }

        Ok(())
    }

    /// The aggregator configured by this file.
    #[must_use]
    pub fn aggregator(&self) -> ConsumptionAggregator {
        ConsumptionAggregator::new(self.columns.clone(), &self.subcategory_prefix, self.trailing_window_months)
    }

    /// Month labels for the configured locale.
    #[must_use]
    pub fn month_names(&self) -> MonthNames {
        MonthNames::for_identifier(&self.month_locale)
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
    }

    #[test]
    fn test_default_config_matches_built_in_defaults() {
        let config = Config::default();
        assert_eq!(config.subcategory_prefix, "Echanges");
        assert_eq!(config.trailing_window_months, 4);
        assert_eq!(config.month_locale, "fr");
        assert_eq!(config.merged_sheet_name, "Fusion");
        assert_eq!(config.summary_sheet_name, "Moyenne conso DATA");
        assert_eq!(config.columns, ConsumptionColumns::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_validate_zero_window() {
        let config = Config {
            trailing_window_months: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_blank_sheet_names() {
        let config = Config {
            merged_sheet_name: " ".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            summary_sheet_name: String::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_blank_column_name() {
        let mut config = Config::default();
        config.columns.volume = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("columns.volume"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<Config, _> = toml::from_str("unknown_field = 1\n");
        assert!(result.is_err());

        let result: Result<Config, _> = toml::from_str("[columns]\nvolumes = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_default_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let config = Config::load(&base, None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        fs::write(base.join(DEFAULT_CONFIG_FILE), "trailing_window_months = 6\nmonth_locale = \"en\"\n").unwrap();

        let config = Config::load(&base, None).unwrap();
        assert_eq!(config.trailing_window_months, 6);
        assert_eq!(config.month_names(), MonthNames::default());
        assert_eq!(config.aggregator().window(), 6);
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let path = base.join("absent.toml");
        assert!(Config::load(&base, Some(&path)).is_err());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let path = base.join("bad.toml");
        fs::write(&path, "trailing_window_months = 0\n").unwrap();

        let err = Config::load(&base, Some(&path)).unwrap_err();
        assert!(err.to_string().contains("trailing_window_months"));
    }
}
