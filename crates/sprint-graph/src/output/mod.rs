//! Output formatting for CLI commands.
//!
//! This module provides utilities for formatting command output in both
//! human-readable text format and JSON format for programmatic use.

pub mod color;

use crate::domain::{EnrichedIssue, IssueRef, SprintSnapshot};
use crate::planning::PlanningInfo;
use serde::Serialize;
use sprint_search::SearchRequest;
use std::env;
use std::io::{self, Write};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Configuration for text output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an OutputConfig with explicit values.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Respects the `NO_COLOR` standard (any value disables colors).
    pub fn from_env() -> Self {
        Self {
            use_colors: env::var_os("NO_COLOR").is_none(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// Print any serializable value as pretty JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{}", json)
}

/// Print a resolved snapshot.
pub fn print_snapshot(snapshot: &SprintSnapshot, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(snapshot),
        OutputMode::Text => {
            let stdout = io::stdout();
            write_snapshot_text(&mut stdout.lock(), snapshot, &OutputConfig::from_env())
        }
    }
}

/// Print a planning view.
pub fn print_planning(info: &PlanningInfo, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(info),
        OutputMode::Text => {
            let stdout = io::stdout();
            write_planning_text(&mut stdout.lock(), info, &OutputConfig::from_env())
        }
    }
}

/// Print the queries a configuration would issue.
pub fn print_queries(requests: &[SearchRequest], mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            let queries: Vec<_> = requests
                .iter()
                .map(|r| serde_json::json!({ "name": r.name, "jql": r.jql }))
                .collect();
            print_json(&queries)
        }
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            for request in requests {
                writeln!(handle, "{}: {}", request.name, request.jql)?;
            }
            Ok(())
        }
    }
}

// ============================================================================
// Text Formatting
// ============================================================================

/// Write one line per issue plus its resolved references.
pub fn write_snapshot_text<W: Write>(
    w: &mut W,
    snapshot: &SprintSnapshot,
    config: &OutputConfig,
) -> io::Result<()> {
    for issue in &snapshot.issues {
        write_issue_line(w, issue, config)?;
        for (label, reference) in [
            ("development", &issue.development),
            ("qa", &issue.qa),
            ("test case", &issue.test_case),
            ("epic", &issue.epic),
        ] {
            if let Some(reference) = reference {
                write_reference_line(w, snapshot, label, reference, config)?;
            }
        }
    }
    writeln!(
        w,
        "{}",
        color::dimmed(
            &format!(
                "{} issues, requested {}",
                snapshot.len(),
                snapshot.request_timestamp.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            config
        )
    )
}

fn write_issue_line<W: Write>(
    w: &mut W,
    issue: &EnrichedIssue,
    config: &OutputConfig,
) -> io::Result<()> {
    let points = match (issue.story_points, issue.children_story_points) {
        (Some(own), children) if children > 0.0 => format!("{own}+{children}sp"),
        (Some(own), _) => format!("{own}sp"),
        (None, children) if children > 0.0 => format!("+{children}sp"),
        (None, _) => String::new(),
    };
    let assignee = if issue.assignee.is_empty() {
        color::dimmed("unassigned", config)
    } else {
        issue.assignee.clone()
    };

    writeln!(
        w,
        "{} [{}] {} ({}) {} {}",
        color::key(issue.key.as_str(), config),
        issue.issue_type,
        issue.name,
        color::status(issue, config),
        assignee,
        points
    )
}

fn write_reference_line<W: Write>(
    w: &mut W,
    snapshot: &SprintSnapshot,
    label: &str,
    reference: &IssueRef,
    config: &OutputConfig,
) -> io::Result<()> {
    let name = snapshot
        .follow(reference)
        .map(|target| target.name.as_str())
        .unwrap_or_default();
    let marker = if reference.is_out_of_set() {
        color::accent(" (out of sprint)", config)
    } else {
        String::new()
    };
    writeln!(
        w,
        "    {} {} {}{}",
        color::dimmed(&format!("{label}:"), config),
        color::key(reference.key().as_str(), config),
        name,
        marker
    )
}

/// Write per-member planned and lost work.
pub fn write_planning_text<W: Write>(
    w: &mut W,
    info: &PlanningInfo,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {}",
        color::bold("Capacity per member:", config),
        info.max_story_points
    )?;

    for user in info.users.values() {
        writeln!(w)?;
        writeln!(
            w,
            "{} ({} sp planned)",
            color::bold(&user.name, config),
            user.planned_story_points()
        )?;
        for (label, issues) in [("planned", &user.planned_issues), ("lost", &user.lost_issues)] {
            writeln!(w, "  {} {}", color::dimmed(&format!("{label}:"), config), issues.len())?;
            for issue in issues {
                write!(w, "    ")?;
                write_issue_line(w, issue, config)?;
            }
        }
    }
    Ok(())
}
