//! Command execution logic.

use anyhow::Result;
use std::path::Path;

use super::args::{PlanArgs, QueryArgs, ResolveArgs, SprintArgs};
use crate::app::App;
use crate::config::{Config, TrackerConfig};
use crate::domain::SprintSnapshot;
use crate::engine::Engine;
use crate::output::{self, OutputMode};
use chrono::Utc;
use sprint_search::StaticSource;
use std::sync::Arc;

/// Execute the resolve command
///
/// The tracker section of the configuration is used when the file exists;
/// otherwise the built-in tracker defaults apply.
pub async fn execute_resolve(
    config_path: &Path,
    args: &ResolveArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let tracker = if tokio::fs::try_exists(config_path).await? {
        Config::load(config_path).await?.tracker
    } else {
        tracing::debug!(path = %config_path.display(), "No configuration, using tracker defaults");
        TrackerConfig::default()
    };

    let body = tokio::fs::read_to_string(&args.file).await.map_err(|e| {
        anyhow::anyhow!("Cannot read {}: {}", args.file.display(), e)
    })?;
    let issues = sprint_search::wire::parse_search(&body, &tracker.fields)?;

    let engine = Engine::new(tracker.engine_config());
    let snapshot = SprintSnapshot::new(engine.resolve(&issues), Utc::now());
    output::print_snapshot(&snapshot, output_mode)?;
    Ok(())
}

/// Execute the sprint command
pub async fn execute_sprint(
    config_path: &Path,
    args: &SprintArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let app = App::from_files(config_path, &args.data_dir).await?;
    let snapshot = app.sprint_snapshot().await?;
    output::print_snapshot(&snapshot, output_mode)?;
    Ok(())
}

/// Execute the plan command
pub async fn execute_plan(
    config_path: &Path,
    args: &PlanArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let app = App::from_files(config_path, &args.data_dir).await?;
    let info = app.planning().await?;
    output::print_planning(&info, output_mode)?;
    Ok(())
}

/// Execute the query command
pub async fn execute_query(
    config_path: &Path,
    args: &QueryArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let config = Config::load(config_path).await?;
    let app = App::new(config, Arc::new(StaticSource::new()));

    let mut requests = vec![app.sprint_request()];
    if !args.sprint_only {
        requests.extend(app.planning_requests());
    }
    output::print_queries(&requests, output_mode)?;
    Ok(())
}
