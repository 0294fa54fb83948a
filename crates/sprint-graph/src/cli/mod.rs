//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `resolve`: Resolve a single saved search response
//! - `sprint`: Resolve the configured sprint's issues
//! - `plan`: Show the per-member planning view
//! - `query`: Print the searches the configuration issues
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--config`: Configuration file (defaults to `sprint.yaml`)
//!
//! # Example
//!
//! ```bash
//! sprint-graph --json resolve searches/sprint.json
//! sprint-graph sprint --data-dir searches
//! sprint-graph --config mobile.yaml plan
//! ```

mod args;
mod execute;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{DEFAULT_DATA_DIR, PlanArgs, QueryArgs, ResolveArgs, SprintArgs};

use crate::config::CONFIG_FILE_NAME;

/// Sprint Graph - sprint issue relationships for reporting
///
/// Links every development issue of a sprint to its QA issue, test-case
/// issue and epic, and rolls subtask story points up to their parents.
#[derive(Parser, Debug)]
#[command(name = "sprint-graph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file
    #[arg(short, long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve a saved search response
    ///
    /// Reads one tracker search response and prints the resolved issues.
    /// Works without a configuration file.
    Resolve(ResolveArgs),

    /// Resolve the configured sprint
    ///
    /// Answers the sprint search from `<data-dir>/sprint.json`.
    Sprint(SprintArgs),

    /// Show the team's planning view
    ///
    /// Answers the planned and lost searches from `<data-dir>/planned.json`
    /// and `<data-dir>/lost.json`, then splits them per team member.
    Plan(PlanArgs),

    /// Print the searches for the configured sprint
    Query(QueryArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Resolve(args)) => {
                execute::execute_resolve(&self.config, args, output_mode).await
            }
            Some(Commands::Sprint(args)) => {
                execute::execute_sprint(&self.config, args, output_mode).await
            }
            Some(Commands::Plan(args)) => {
                execute::execute_plan(&self.config, args, output_mode).await
            }
            Some(Commands::Query(args)) => {
                execute::execute_query(&self.config, args, output_mode).await
            }
            None => {
                println!("Sprint issue relationship resolver");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
