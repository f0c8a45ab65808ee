// ⚙️ Configuration - JSON file with defaults, environment overrides

use crate::calendar::{CalendarConverter, MonthTableConverter, NoLunarCalendar};
use crate::cycle::{DEFAULT_CYCLE_COUNT, MAX_CYCLE_COUNT};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CONFIG_ENV: &str = "SAJU_CONFIG";
pub const BIND_ENV: &str = "SAJU_BIND";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SajuConfig {
    /// Number of decade cycles to generate
    pub cycle_count: usize,
    /// JSON month table for lunar conversion; lunar input is rejected without it
    pub lunar_table: Option<PathBuf>,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for SajuConfig {
    fn default() -> Self {
        SajuConfig {
            cycle_count: DEFAULT_CYCLE_COUNT,
            lunar_table: None,
            server: ServerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl SajuConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: SajuConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON: {:?}", path.as_ref()))?;

        config.validate()?;
        Ok(config)
    }

    /// File named by `SAJU_CONFIG` (defaults if unset), then `SAJU_BIND`
    pub fn from_env() -> Result<Self> {
        let path = env::var_os(CONFIG_ENV).map(PathBuf::from);
        let bind = env::var(BIND_ENV).ok();
        Self::load(path.as_deref(), bind)
    }

    pub fn load(path: Option<&Path>, bind_override: Option<String>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                info!(?path, "loading configuration");
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        if let Some(bind) = bind_override.filter(|b| !b.trim().is_empty()) {
            config.server.bind = bind;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_CYCLE_COUNT).contains(&self.cycle_count) {
            bail!(
                "cycle_count must be between 1 and {}, got {}",
                MAX_CYCLE_COUNT,
                self.cycle_count
            );
        }
        Ok(())
    }

    /// Table converter when `lunar_table` is set, otherwise one that rejects lunar input
    pub fn calendar(&self) -> Result<Box<dyn CalendarConverter>> {
        match &self.lunar_table {
            Some(path) => {
                let converter = MonthTableConverter::from_file(path)?;
                let (first, last) = converter
                    .solar_range()
                    .with_context(|| format!("Lunar table is empty: {:?}", path))?;
                info!(
                    ?path,
                    months = converter.month_count(),
                    %first,
                    %last,
                    "lunar table loaded"
                );
                Ok(Box::new(converter))
            }
            None => Ok(Box::new(NoLunarCalendar)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = SajuConfig::default();
        assert_eq!(config.cycle_count, 10);
        assert_eq!(config.lunar_table, None);
        assert_eq!(config.server.bind, "127.0.0.1:3000");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config(r#"{ "cycle_count": 8 }"#);
        let config = SajuConfig::from_file(file.path()).unwrap();

        assert_eq!(config.cycle_count, 8);
        assert_eq!(config.server.bind, DEFAULT_BIND);
    }

    #[test]
    fn test_bind_override_wins() {
        let file = write_config(r#"{ "server": { "bind": "0.0.0.0:8080" } }"#);

        let config = SajuConfig::load(Some(file.path()), None).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");

        let config = SajuConfig::load(Some(file.path()), Some("127.0.0.1:9000".into())).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:9000");

        // blank override is ignored
        let config = SajuConfig::load(None, Some("  ".into())).unwrap();
        assert_eq!(config.server.bind, DEFAULT_BIND);
    }

    #[test]
    fn test_rejects_zero_cycles_and_bad_json() {
        let file = write_config(r#"{ "cycle_count": 0 }"#);
        assert!(SajuConfig::from_file(file.path()).is_err());

        let file = write_config(r#"{ "cycle_count": 1000000000000 }"#);
        assert!(SajuConfig::from_file(file.path()).is_err());

        let file = write_config(r#"{ "cycle_count": 12 }"#);
        assert_eq!(SajuConfig::from_file(file.path()).unwrap().cycle_count, 12);

        let file = write_config("cycle_count = 10");
        assert!(SajuConfig::from_file(file.path()).is_err());

        assert!(SajuConfig::from_file("/nonexistent/saju.json").is_err());
    }

    #[test]
    fn test_calendar_from_config() {
        let table = write_config(
            r#"{ "months": [ { "year": 2024, "month": 1, "start": "2024-02-10", "days": 29 } ] }"#,
        );
        let config = SajuConfig {
            lunar_table: Some(table.path().to_path_buf()),
            ..SajuConfig::default()
        };

        let calendar = config.calendar().unwrap();
        let solar = chrono::NaiveDate::from_ymd_opt(2024, 2, 12).unwrap();
        assert_eq!(calendar.solar_to_lunar(solar).unwrap().day, 3);

        let empty = write_config(r#"{ "months": [] }"#);
        let config = SajuConfig {
            lunar_table: Some(empty.path().to_path_buf()),
            ..SajuConfig::default()
        };
        assert!(config.calendar().is_err());

        let without = SajuConfig::default().calendar().unwrap();
        assert!(without.solar_to_lunar(solar).is_err());
    }
}
