//! Sprint Graph CLI binary.

use anyhow::Result;
use sprint_graph::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the sprint-graph CLI.
///
/// Logs go to stderr so JSON output on stdout stays machine-readable.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Controlled via RUST_LOG, e.g. RUST_LOG=sprint_graph=debug,sprint_search=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sprint_graph=info,sprint_search=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting sprint-graph CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("sprint-graph completed successfully");
    Ok(())
}
