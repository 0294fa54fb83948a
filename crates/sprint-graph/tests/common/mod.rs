//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use sprint_search::{
    IssueKey, IssueType, Link, LinkDirection, LinkKind, LinkTarget, RawIssue, StatusCategory,
};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// A raw issue with only key, type and title set.
pub fn issue(key: &str, issue_type: IssueType, summary: &str) -> RawIssue {
    RawIssue {
        key: key.into(),
        summary: summary.to_string(),
        issue_type,
        status: "Open".to_string(),
        status_category: StatusCategory::New,
        ..Default::default()
    }
}

fn link(direction: LinkDirection, key: &str, issue_type: IssueType, summary: &str) -> Link {
    Link {
        kind: LinkKind::Blocks,
        direction,
        target: LinkTarget {
            key: IssueKey::from(key),
            summary: summary.to_string(),
            issue_type,
            status_category: StatusCategory::New,
        },
    }
}

/// Outward "Blocks" link: the owning issue blocks `key`.
pub fn blocks(key: &str, issue_type: IssueType, summary: &str) -> Link {
    link(LinkDirection::Outward, key, issue_type, summary)
}

/// Inward "Blocks" link: the owning issue is blocked by `key`.
pub fn blocked_by(key: &str, issue_type: IssueType, summary: &str) -> Link {
    link(LinkDirection::Inward, key, issue_type, summary)
}

/// Directory holding the saved search responses used by the tests.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Run the sprint-graph binary in the specified directory
pub fn run_sprint_graph_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sprint-graph"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute sprint-graph binary")
}
