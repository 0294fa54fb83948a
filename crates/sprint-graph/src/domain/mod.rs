//! Domain types for resolved sprint issues.
//!
//! An [`EnrichedIssue`] is one fetched issue plus the cross-references the
//! engine derived for it. References to other issues of the same fetch are
//! held by key ([`IssueRef::InSet`]) and looked up through the owning
//! [`SprintSnapshot`]; references that point outside the fetch carry an
//! inlined stand-in record ([`IssueRef::OutOfSet`]).

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use sprint_search::{IssueKey, IssueType};
use std::collections::HashMap;

/// One issue of a fetch, enriched with its resolved relationships.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedIssue {
    /// Issue key
    pub key: IssueKey,

    /// Issue title
    pub name: String,

    /// Issue type
    #[serde(rename = "type")]
    pub issue_type: IssueType,

    /// Status name, empty for stand-ins
    pub status: String,

    /// Assignee, empty when unassigned or unknown
    pub assignee: String,

    /// First component of the issue, empty when unknown
    pub platform: String,

    /// Every component of the issue, in tracker order
    pub platforms: Vec<String>,

    /// Titles of the fetched stories this issue blocks
    pub parents: Vec<String>,

    /// Browse link for the issue
    pub uri: String,

    /// Whether the issue's status category is done
    pub is_resolved: bool,

    /// Whether the issue carries the "easy" label
    pub is_easy: bool,

    /// Whether the issue was synthesized because it was not fetched
    pub out_of_set: bool,

    /// Own story point estimate
    pub story_points: Option<f64>,

    /// Sum of the story points of direct subtasks in the same fetch
    pub children_story_points: f64,

    /// Whether this issue or a direct subtask is in a progress status
    pub in_progress: bool,

    /// Date the issue was resolved
    pub close_date: Option<NaiveDate>,

    /// Direct subtask keys, as listed on the issue
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<IssueKey>,

    /// Development issue a QA or test-case issue verifies
    pub development: Option<IssueRef>,

    /// QA issue verifying this issue
    pub qa: Option<IssueRef>,

    /// Test-case issue covering this issue
    pub test_case: Option<IssueRef>,

    /// Parent epic
    pub epic: Option<IssueRef>,
}

impl EnrichedIssue {
    /// Whether any cross-reference has been resolved for this issue.
    pub fn has_references(&self) -> bool {
        self.development.is_some()
            || self.qa.is_some()
            || self.test_case.is_some()
            || self.epic.is_some()
    }
}

/// A reference from one enriched issue to another.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueRef {
    /// Points at another issue of the same snapshot
    InSet(IssueKey),

    /// Synthesized leaf for an issue outside the fetch
    OutOfSet(Box<EnrichedIssue>),
}

impl IssueRef {
    /// Key of the referenced issue.
    pub fn key(&self) -> &IssueKey {
        match self {
            Self::InSet(key) => key,
            Self::OutOfSet(stand_in) => &stand_in.key,
        }
    }

    /// Whether the reference points outside the fetched set.
    pub fn is_out_of_set(&self) -> bool {
        matches!(self, Self::OutOfSet(_))
    }

    /// The inlined stand-in, if this reference points outside the fetch.
    pub fn stand_in(&self) -> Option<&EnrichedIssue> {
        match self {
            Self::InSet(_) => None,
            Self::OutOfSet(stand_in) => Some(stand_in),
        }
    }
}

/// In-set references serialize as `{"key", "outOfSet": false}`; stand-ins
/// serialize as the full record.
impl Serialize for IssueRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::InSet(key) => {
                let mut state = serializer.serialize_struct("IssueRef", 2)?;
                state.serialize_field("key", key)?;
                state.serialize_field("outOfSet", &false)?;
                state.end()
            }
            Self::OutOfSet(stand_in) => stand_in.serialize(serializer),
        }
    }
}

/// Resolved issues of one fetch, ready for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintSnapshot {
    /// One record per fetched key, in fetch order
    pub issues: Vec<EnrichedIssue>,

    /// When the underlying search was issued
    pub request_timestamp: DateTime<Utc>,

    #[serde(skip)]
    positions: HashMap<IssueKey, usize>,
}

impl SprintSnapshot {
    /// Wrap resolved issues with their request time.
    pub fn new(issues: Vec<EnrichedIssue>, request_timestamp: DateTime<Utc>) -> Self {
        let positions = issues
            .iter()
            .enumerate()
            .map(|(pos, issue)| (issue.key.clone(), pos))
            .collect();
        Self {
            issues,
            request_timestamp,
            positions,
        }
    }

    /// Look up an issue of this snapshot by key.
    pub fn get(&self, key: &IssueKey) -> Option<&EnrichedIssue> {
        self.positions.get(key).map(|&pos| &self.issues[pos])
    }

    /// Follow a reference to the record it denotes.
    ///
    /// Returns `None` only for an in-set key that belongs to a different
    /// snapshot.
    pub fn follow<'a>(&'a self, reference: &'a IssueRef) -> Option<&'a EnrichedIssue> {
        match reference {
            IssueRef::InSet(key) => self.get(key),
            IssueRef::OutOfSet(stand_in) => Some(stand_in),
        }
    }

    /// Number of issues in the snapshot.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether the snapshot holds no issues.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}
