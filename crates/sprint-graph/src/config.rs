//! Configuration loading.
//!
//! A single YAML file describes the tracker, the sprint being reported on
//! and, optionally, the team whose planning view is wanted:
//!
//! ```yaml
//! tracker:
//!   browse-url: https://jira.example.com/browse/
//!   fields: { story-points: customfield_10212, epic-link: customfield_10008 }
//! sprint:
//!   code: 42
//!   start-date: 2024-03-04
//!   finish-date: 2024-03-15
//!   weekend: [2024-03-09, 2024-03-10]
//! team:
//!   name: Mobile
//!   sp-per-day: 1.5
//!   users: [{ name: alice }, { name: bob }]
//! ```

use crate::engine::{DEFAULT_BROWSE_URL, DEFAULT_EASY_LABEL, DEFAULT_QA_PLATFORM, EngineConfig};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sprint_search::FieldIds;
use sprint_search::jobs::DEFAULT_WORKERS;
use std::path::Path;
use tokio::fs;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "sprint.yaml";

/// Top-level configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Tracker settings
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Sprint being reported on
    pub sprint: SprintConfig,

    /// Team for the planning view
    #[serde(default)]
    pub team: Option<TeamConfig>,
}

/// Tracker section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TrackerConfig {
    /// Prefix issue keys are appended to for browse links
    pub browse_url: String,

    /// Instance-specific custom field ids
    pub fields: FieldIds,

    /// Platform fetched QA issues must sit on
    pub qa_platform: String,

    /// Label marking easy issues
    pub easy_label: String,

    /// Searches allowed to run at once
    pub workers: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            browse_url: DEFAULT_BROWSE_URL.to_string(),
            fields: FieldIds::default(),
            qa_platform: DEFAULT_QA_PLATFORM.to_string(),
            easy_label: DEFAULT_EASY_LABEL.to_string(),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl TrackerConfig {
    /// Engine settings for this tracker.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            browse_url: self.browse_url.clone(),
            qa_platform: self.qa_platform.clone(),
            easy_label: self.easy_label.clone(),
        }
    }
}

/// Sprint section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SprintConfig {
    /// Tracker sprint id
    pub code: u32,

    /// Previous sprint id; defaults to `code - 1`
    #[serde(default)]
    pub prev_code: Option<u32>,

    /// First day of the sprint
    pub start_date: NaiveDate,

    /// Last day of the sprint
    pub finish_date: NaiveDate,

    /// Non-working days inside the sprint
    #[serde(default)]
    pub weekend: Vec<NaiveDate>,

    /// Query replacing the generated sprint query
    #[serde(default)]
    pub query: Option<String>,
}

impl SprintConfig {
    /// Previous sprint id.
    pub fn previous_code(&self) -> u32 {
        self.prev_code.unwrap_or_else(|| self.code.saturating_sub(1))
    }
}

/// Team section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TeamConfig {
    /// Feature team name, as known to the tracker
    pub name: String,

    /// Story points one member completes per working day
    pub sp_per_day: f64,

    /// Team roster
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

/// One roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Tracker login, matched exactly against assignees
    pub name: String,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.sprint.finish_date < self.sprint.start_date {
            return Err(Error::Config(format!(
                "Sprint finish date {} is before start date {}",
                self.sprint.finish_date, self.sprint.start_date
            )));
        }

        if let Some(team) = &self.team {
            if !team.sp_per_day.is_finite() || team.sp_per_day < 0.0 {
                return Err(Error::Config(format!(
                    "Team '{}' sp-per-day must be a non-negative number",
                    team.name
                )));
            }
        }

        if self.tracker.browse_url.trim().is_empty() {
            return Err(Error::Config("Tracker browse-url cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Engine settings derived from the tracker section.
    pub fn engine_config(&self) -> EngineConfig {
        self.tracker.engine_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = "\
sprint:
  code: 42
  start-date: 2024-03-04
  finish-date: 2024-03-15
";

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_yaml(MINIMAL).unwrap();

        assert_eq!(config.sprint.code, 42);
        assert_eq!(config.sprint.previous_code(), 41);
        assert!(config.sprint.weekend.is_empty());
        assert!(config.team.is_none());
        assert_eq!(config.tracker, TrackerConfig::default());
        assert_eq!(config.engine_config(), EngineConfig::default());
    }

    #[test]
    fn test_full_config() {
        let yaml = "\
tracker:
  browse-url: https://tracker.test/browse/
  fields:
    story-points: customfield_1
    epic-link: customfield_2
  workers: 2
sprint:
  code: 42
  prev-code: 40
  start-date: 2024-03-04
  finish-date: 2024-03-15
  weekend: [2024-03-09, 2024-03-10]
  query: project = MOB
team:
  name: Mobile
  sp-per-day: 1.5
  users:
    - name: alice
    - name: bob
";
        let config = Config::from_yaml(yaml).unwrap();

        assert_eq!(config.tracker.browse_url, "https://tracker.test/browse/");
        assert_eq!(config.tracker.fields.story_points, "customfield_1");
        assert_eq!(config.tracker.qa_platform, "QA");
        assert_eq!(config.tracker.workers, 2);
        assert_eq!(config.sprint.previous_code(), 40);
        assert_eq!(config.sprint.weekend.len(), 2);
        assert_eq!(config.sprint.query.as_deref(), Some("project = MOB"));

        let team = config.team.unwrap();
        assert_eq!(team.users.len(), 2);
        assert_eq!(team.users[1].name, "bob");
    }

    #[test]
    fn test_finish_before_start_is_rejected() {
        let yaml = MINIMAL.replace("2024-03-15", "2024-03-01");
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(err.to_string().contains("before start date"));
    }

    #[test]
    fn test_negative_sp_per_day_is_rejected() {
        let yaml = format!("{MINIMAL}team:\n  name: Mobile\n  sp-per-day: -1\n");
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(err.to_string().contains("sp-per-day"));
    }

    #[test]
    fn test_malformed_date_is_config_error() {
        let yaml = MINIMAL.replace("2024-03-04", "next monday");
        assert!(matches!(Config::from_yaml(&yaml), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, MINIMAL).unwrap();

        let config = Config::load(&path).await.unwrap();
        assert_eq!(config.sprint.code, 42);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::load(&temp_dir.path().join("absent.yaml"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Cannot read"));
    }
}
