use crate::application::try_format;
use crate::domain::YearRange;
use anyhow::{Context, Result};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "DATEPICKER_CONFIG";

/// The serializable part of [`Settings`](crate::application::Settings).
/// Behaviour (parser, predicates, formatters) can't live in a file, so only
/// plain values are read here and layered onto the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PickerConfig {
    pub placeholder: Option<String>,
    pub class_namespace: Option<String>,
    pub container_classes: Vec<String>,
    pub input_classes: Vec<String>,
    pub input_name: Option<String>,
    pub input_id: Option<String>,
    pub input_attributes: BTreeMap<String, String>,
    pub first_day_of_week: Option<Weekday>,
    pub year_range: YearRange,
    /// strftime pattern for both display and parsing
    pub date_format: Option<String>,
}

impl PickerConfig {
    /// Resolve configuration from `$DATEPICKER_CONFIG`, then the user config
    /// directory, then built-in defaults.
    pub fn from_env() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::from_file(&path),
            None => {
                log::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }

        dirs::config_dir()
            .map(|dir| dir.join("datepicker").join("config.json"))
            .filter(|path| path.exists())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(content)?;
        let normalized = config.year_range.normalized();
        if normalized != config.year_range {
            log::warn!("year range {} is reversed, using {}", config.year_range, normalized);
        }
        config.year_range = normalized;

        if let Some(format) = &config.date_format {
            check_date_format(format).with_context(|| format!("Invalid date_format {:?}", format))?;
        }
        Ok(config)
    }
}

/// A format is usable when it can print a date and read the result back.
fn check_date_format(format: &str) -> Result<()> {
    let sample = NaiveDate::from_ymd_opt(2024, 12, 31).context("sample date")?;
    let text = try_format(sample, format).context("pattern needs more than a calendar date")?;
    NaiveDate::parse_from_str(&text, format)
        .with_context(|| format!("{:?} can't be read back as a date", text))?;
    Ok(())
}
