//! CLI argument structs for all commands.

use clap::Parser;
use std::path::PathBuf;

/// Default directory holding saved search responses
pub const DEFAULT_DATA_DIR: &str = "searches";

/// Arguments for the `resolve` command
#[derive(Parser, Debug, Clone)]
pub struct ResolveArgs {
    /// Saved search response to resolve
    pub file: PathBuf,
}

/// Arguments for the `sprint` command
#[derive(Parser, Debug, Clone)]
pub struct SprintArgs {
    /// Directory holding one `<search>.json` response per search
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,
}

/// Arguments for the `plan` command
#[derive(Parser, Debug, Clone)]
pub struct PlanArgs {
    /// Directory holding one `<search>.json` response per search
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,
}

/// Arguments for the `query` command
#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    /// Only print the sprint query
    #[arg(long)]
    pub sprint_only: bool,
}
