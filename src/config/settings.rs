use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::stats::series::ChartRange;

fn default_true() -> bool {
    true
}
fn default_chart_range() -> String {
    ChartRange::default().as_str().to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub color: bool,
    /// One of: 7days, 30days, thisWeek, thisMonth
    #[serde(default = "default_chart_range")]
    pub chart_range: String,
    #[serde(default = "default_true")]
    pub show_achievements: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            chart_range: default_chart_range(),
            show_achievements: true,
        }
    }
}

impl DisplayConfig {
    pub fn chart_range(&self) -> ChartRange {
        self.chart_range.parse().unwrap_or_else(|_| {
            warn!("Unknown chart_range '{}' in config, using 7days", self.chart_range);
            ChartRange::default()
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Overrides the default database location.
    #[serde(default)]
    pub database: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "habitual")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.storage.database {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("habitual.db")),
        }
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Parsing config.toml")
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    /// Create the parent directory of the database file.
    pub fn ensure_data_dir(&self) -> Result<PathBuf> {
        let path = self.db_path()?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Creating data directory {:?}", dir))?;
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert!(config.display.color);
        assert!(config.display.show_achievements);
        assert_eq!(config.display.chart_range(), ChartRange::Last7Days);
        assert!(config.storage.database.is_none());
    }

    #[test]
    fn partial_sections_fill_in() {
        let config = AppConfig::from_toml(
            "[display]\ncolor = false\nchart_range = \"thisMonth\"\n\n[storage]\ndatabase = \"/tmp/h.db\"\n",
        )
        .unwrap();
        assert!(!config.display.color);
        assert!(config.display.show_achievements);
        assert_eq!(config.display.chart_range(), ChartRange::ThisMonth);
        assert_eq!(config.db_path().unwrap(), PathBuf::from("/tmp/h.db"));
    }

    #[test]
    fn unknown_range_falls_back() {
        let config = AppConfig::from_toml("[display]\nchart_range = \"fortnight\"\n").unwrap();
        assert_eq!(config.display.chart_range(), ChartRange::Last7Days);
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = AppConfig::default();
        config.display.chart_range = "30days".into();
        let text = toml::to_string_pretty(&config).unwrap();
        let back = AppConfig::from_toml(&text).unwrap();
        assert_eq!(back.display.chart_range(), ChartRange::Last30Days);
    }
}
