//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success/Done:  green   (resolved issues)
//!   - Warning/Active: yellow (in-progress issues)
//!   - Info/Reference: cyan   (issue keys)
//!   - Accent:        magenta (epics, out-of-sprint references)
//!   - Muted:         dimmed  (field labels, empty slots)
//!   - Emphasis:      bold    (section headers)

use crate::domain::EnrichedIssue;
use colored::Colorize;

use super::OutputConfig;

/// Apply "info" color (cyan) to an issue key.
pub fn key(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Apply "accent" color (magenta) to text.
pub fn accent(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.magenta().to_string()
}

/// Dim text.
pub fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Bold text.
pub fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Status text colored by the issue's state.
pub fn status(issue: &EnrichedIssue, config: &OutputConfig) -> String {
    let text = if issue.status.is_empty() {
        "-".to_string()
    } else {
        issue.status.clone()
    };
    if !config.use_colors {
        return text;
    }
    if issue.is_resolved {
        text.green().to_string()
    } else if issue.in_progress {
        text.yellow().to_string()
    } else {
        text.white().to_string()
    }
}
