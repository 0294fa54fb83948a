//! Application context for CLI command execution.
//!
//! The `App` ties the loaded configuration to a search source and the
//! resolution engine. Searches run concurrently through the job manager;
//! each completed batch is resolved on its own.
//!
//! # Example
//!
//! ```no_run
//! use sprint_graph::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_files(Path::new("sprint.yaml"), Path::new("searches")).await?;
//!     let snapshot = app.sprint_snapshot().await?;
//!     println!("{} issues", snapshot.len());
//!     Ok(())
//! }
//! ```

use crate::config::Config;
use crate::domain::SprintSnapshot;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::planning::{self, PlanningInfo};
use sprint_search::jql::{self, LOST_SEARCH, PLANNED_SEARCH};
use sprint_search::{IssueSource, JobManager, JsonFileSource, SearchBatch, SearchRequest};
use std::path::Path;
use std::sync::Arc;

/// Application context for CLI operations.
#[derive(Debug)]
pub struct App {
    config: Config,
    engine: Engine,
    jobs: JobManager,
}

impl App {
    /// Create an App from loaded configuration and a search source.
    pub fn new(config: Config, source: Arc<dyn IssueSource>) -> Self {
        let engine = Engine::new(config.engine_config());
        let jobs = JobManager::new(source, config.tracker.workers);
        Self {
            config,
            engine,
            jobs,
        }
    }

    /// Create an App answering searches from saved responses in `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or is invalid.
    pub async fn from_files(config_path: &Path, data_dir: &Path) -> Result<Self> {
        let config = Config::load(config_path).await?;
        let source = JsonFileSource::new(data_dir, config.tracker.fields.clone());
        tracing::debug!(data_dir = %data_dir.display(), "Using saved search responses");
        Ok(Self::new(config, Arc::new(source)))
    }

    /// Loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The resolution engine.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Team filter for planning queries.
    fn team_name(&self) -> Option<&str> {
        self.config.team.as_ref().map(|team| team.name.as_str())
    }

    /// The sprint's issue query.
    pub fn sprint_request(&self) -> SearchRequest {
        let sprint = &self.config.sprint;
        jql::sprint_issues(
            sprint.code,
            &sprint.start_date.to_string(),
            self.team_name().unwrap_or_default(),
            sprint.query.as_deref(),
        )
    }

    /// The planned-work and lost-work queries.
    ///
    /// Neither query filters by team; members are picked out of the results
    /// by assignee.
    pub fn planning_requests(&self) -> [SearchRequest; 2] {
        let sprint = &self.config.sprint;
        [
            jql::planned_issues(sprint.code, None),
            jql::lost_issues(sprint.previous_code(), None),
        ]
    }

    /// Fetch and resolve the sprint's issues.
    ///
    /// # Errors
    ///
    /// Returns an error if the search fails.
    pub async fn sprint_snapshot(&self) -> Result<SprintSnapshot> {
        let batch = self.jobs.submit(self.sprint_request()).wait().await?;
        Ok(self.engine.resolve_batch(&batch))
    }

    /// Fetch planned and lost work concurrently and build the team's view.
    ///
    /// Without a configured team the view is empty and nothing is fetched.
    ///
    /// # Errors
    ///
    /// Returns an error if either search fails.
    pub async fn planning(&self) -> Result<PlanningInfo> {
        let Some(team) = &self.config.team else {
            tracing::warn!("No team configured, planning view is empty");
            return Ok(PlanningInfo::empty());
        };

        let mut receiver = self.jobs.run_all(self.planning_requests());
        let mut planned: Option<SearchBatch> = None;
        let mut lost: Option<SearchBatch> = None;

        while let Some(result) = receiver.recv().await {
            let batch = result?;
            match batch.request.name.as_str() {
                PLANNED_SEARCH => planned = Some(batch),
                LOST_SEARCH => lost = Some(batch),
                other => tracing::warn!(name = other, "Unexpected search batch, ignoring"),
            }
        }

        let planned = planned.ok_or_else(|| job_missing(PLANNED_SEARCH))?;
        let lost = lost.ok_or_else(|| job_missing(LOST_SEARCH))?;

        let planned = self.engine.resolve_batch(&planned);
        let lost = self.engine.resolve_batch(&lost);
        Ok(planning::plan(team, &self.config.sprint, &planned, &lost))
    }
}

fn job_missing(name: &str) -> Error {
    Error::Search(sprint_search::Error::JobFailed(name.to_string()))
}
