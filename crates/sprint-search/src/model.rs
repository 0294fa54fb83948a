//! Raw issue model.
//!
//! These types mirror one tracker issue as it was returned by a single
//! search. They are created once per fetch and never mutated afterwards;
//! the resolution engine only reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tracker issue key (e.g. `"MOB-123"`). Unique within one fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueKey(pub String);

impl IssueKey {
    /// Create a new issue key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for IssueKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for IssueKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Issue type as named by the tracker.
///
/// Unknown type names are kept verbatim in [`IssueType::Other`] so they
/// round-trip into reports unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueType {
    /// User story
    Story,
    /// Development task
    #[default]
    Task,
    /// Bug fix
    Bug,
    /// QA check of a development issue
    Qa,
    /// Test-case authoring issue
    TestCase,
    /// Epic (container issue)
    Epic,
    /// Sub-task of another issue
    SubTask,
    /// Any other tracker type
    Other(String),
}

impl IssueType {
    /// Parse a tracker type name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Story" => Self::Story,
            "Task" => Self::Task,
            "Bug" => Self::Bug,
            "QA" => Self::Qa,
            "TestCase" => Self::TestCase,
            "Epic" => Self::Epic,
            "Sub-task" => Self::SubTask,
            other => Self::Other(other.to_string()),
        }
    }

    /// The tracker's name for this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Story => "Story",
            Self::Task => "Task",
            Self::Bug => "Bug",
            Self::Qa => "QA",
            Self::TestCase => "TestCase",
            Self::Epic => "Epic",
            Self::SubTask => "Sub-task",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for IssueType {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<IssueType> for String {
    fn from(issue_type: IssueType) -> Self {
        issue_type.as_str().to_string()
    }
}

/// Coarse status bucket reported alongside every status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    /// Work not started ("new")
    New,
    /// Work started ("indeterminate")
    InProgress,
    /// Work finished ("done")
    Done,
    /// Missing or unrecognised category
    #[default]
    Unknown,
}

impl StatusCategory {
    /// Parse the tracker's status category key.
    pub fn from_key(key: &str) -> Self {
        match key {
            "new" => Self::New,
            "indeterminate" => Self::InProgress,
            "done" => Self::Done,
            _ => Self::Unknown,
        }
    }

    /// Whether the issue counts as resolved.
    pub fn is_done(self) -> bool {
        self == Self::Done
    }
}

/// Link type between two issues.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// "Blocks" link
    Blocks,
    /// "Blocked by" link (the reverse naming some trackers use)
    BlockedBy,
    /// Any other link type, by name
    Other(String),
}

impl LinkKind {
    /// Parse a tracker link type name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Blocks" => Self::Blocks,
            "Blocked By" | "Blocked by" | "is blocked by" => Self::BlockedBy,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Which side of the link the target sits on, seen from the owning issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkDirection {
    /// The owning issue is the link's source
    Outward,
    /// The owning issue is the link's destination
    Inward,
}

/// Partial snapshot of a link's target, as embedded by the tracker.
///
/// May be stale. The snapshot's type decides which links are candidates for
/// a slot. Whether a candidate fits the QA or test-case slot is judged on
/// the fetched record when the target was fetched, and on this snapshot
/// only when it was not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkTarget {
    /// Target issue key
    pub key: IssueKey,

    /// Target summary
    pub summary: String,

    /// Target issue type
    pub issue_type: IssueType,

    /// Target status category
    pub status_category: StatusCategory,
}

/// A typed edge from one raw issue to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Link type
    pub kind: LinkKind,

    /// Side of the link the target sits on
    pub direction: LinkDirection,

    /// Snapshot of the other issue
    pub target: LinkTarget,
}

impl Link {
    /// Whether the owning issue blocks the target.
    pub fn blocks_target(&self) -> bool {
        matches!(
            (&self.kind, self.direction),
            (LinkKind::Blocks, LinkDirection::Outward) | (LinkKind::BlockedBy, LinkDirection::Inward)
        )
    }

    /// Whether the owning issue is blocked by the target.
    pub fn blocked_by_target(&self) -> bool {
        matches!(
            (&self.kind, self.direction),
            (LinkKind::Blocks, LinkDirection::Inward) | (LinkKind::BlockedBy, LinkDirection::Outward)
        )
    }
}

/// One issue exactly as fetched from the tracker.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawIssue {
    /// Unique key within one fetch
    pub key: IssueKey,

    /// Issue title
    pub summary: String,

    /// Issue type
    pub issue_type: IssueType,

    /// Status name (e.g. "In Review")
    pub status: String,

    /// Status category
    pub status_category: StatusCategory,

    /// Assignee login, empty when unassigned
    pub assignee: String,

    /// Component names; the first one is the issue's platform
    pub components: Vec<String>,

    /// Labels
    pub labels: Vec<String>,

    /// Story point estimate
    pub story_points: Option<f64>,

    /// Date the issue was resolved
    pub resolution_date: Option<NaiveDate>,

    /// Parent epic key, from the epic-link field
    pub epic_key: Option<IssueKey>,

    /// Links to other issues, in tracker order
    pub links: Vec<Link>,

    /// Keys of direct subtasks
    pub subtasks: Vec<IssueKey>,
}
