//! Tracker search-response wire format.
//!
//! Decodes the JSON body of a tracker search (`{startAt, maxResults, total,
//! issues}`) and converts each issue into a [`RawIssue`]. Only the envelope
//! is strict: any missing or `null` field inside an issue degrades to its
//! default so one malformed record cannot fail a whole batch.

use crate::error::Result;
use crate::model::{
    IssueKey, IssueType, Link, LinkDirection, LinkKind, LinkTarget, RawIssue, StatusCategory,
};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Timestamp format used by the tracker for `resolutiondate`.
const TRACKER_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Instance-specific custom field ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FieldIds {
    /// Field holding the story point estimate
    pub story_points: String,

    /// Field holding the parent epic key
    pub epic_link: String,
}

impl Default for FieldIds {
    fn default() -> Self {
        Self {
            story_points: "customfield_10212".to_string(),
            epic_link: "customfield_10008".to_string(),
        }
    }
}

/// Envelope of one search response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Index of the first returned issue
    #[serde(default)]
    pub start_at: u64,

    /// Page size the tracker applied
    #[serde(default)]
    pub max_results: u64,

    /// Total matches, possibly more than returned
    #[serde(default)]
    pub total: u64,

    /// Returned issues
    #[serde(default, deserialize_with = "null_default")]
    pub issues: Vec<WireIssue>,
}

/// One issue as encoded by the tracker.
#[derive(Debug, Deserialize)]
pub struct WireIssue {
    key: String,
    #[serde(default, deserialize_with = "null_default")]
    fields: WireFields,
}

#[derive(Debug, Default, Deserialize)]
struct WireFields {
    #[serde(default, deserialize_with = "null_default")]
    summary: String,
    #[serde(default, deserialize_with = "null_default")]
    issuetype: Named,
    #[serde(default, deserialize_with = "null_default")]
    status: WireStatus,
    #[serde(default, deserialize_with = "null_default")]
    assignee: Named,
    #[serde(default, deserialize_with = "null_default")]
    components: Vec<Named>,
    #[serde(default, deserialize_with = "null_default")]
    labels: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    resolutiondate: String,
    #[serde(default, deserialize_with = "null_default")]
    issuelinks: Vec<WireLink>,
    #[serde(default, deserialize_with = "null_default")]
    subtasks: Vec<KeyOnly>,
    #[serde(flatten)]
    custom: HashMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct Named {
    #[serde(default, deserialize_with = "null_default")]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireStatus {
    #[serde(default, deserialize_with = "null_default")]
    name: String,
    #[serde(default, deserialize_with = "null_default")]
    status_category: CategoryKey,
}

#[derive(Debug, Default, Deserialize)]
struct CategoryKey {
    #[serde(default, deserialize_with = "null_default")]
    key: String,
}

#[derive(Debug, Default, Deserialize)]
struct KeyOnly {
    #[serde(default, deserialize_with = "null_default")]
    key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLink {
    #[serde(rename = "type", default, deserialize_with = "null_default")]
    link_type: Named,
    #[serde(default)]
    outward_issue: Option<LinkedIssue>,
    #[serde(default)]
    inward_issue: Option<LinkedIssue>,
}

#[derive(Debug, Deserialize)]
struct LinkedIssue {
    #[serde(default, deserialize_with = "null_default")]
    key: String,
    #[serde(default, deserialize_with = "null_default")]
    fields: LinkedFields,
}

#[derive(Debug, Default, Deserialize)]
struct LinkedFields {
    #[serde(default, deserialize_with = "null_default")]
    summary: String,
    #[serde(default, deserialize_with = "null_default")]
    issuetype: Named,
    #[serde(default, deserialize_with = "null_default")]
    status: WireStatus,
}

/// Treat an explicit `null` the same as a missing field.
fn null_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a search response body into raw issues, in tracker order.
///
/// # Errors
///
/// Returns `Error::Json` if the body is not a search response envelope.
pub fn parse_search(body: &str, fields: &FieldIds) -> Result<Vec<RawIssue>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    let returned = u64::try_from(response.issues.len()).unwrap_or(u64::MAX);
    if response.total > response.start_at.saturating_add(returned) {
        tracing::warn!(
            returned = response.issues.len(),
            total = response.total,
            max_results = response.max_results,
            "Search response is truncated by the page size"
        );
    }
    Ok(response.into_raw_issues(fields))
}

impl SearchResponse {
    /// Convert every issue in the response.
    pub fn into_raw_issues(self, fields: &FieldIds) -> Vec<RawIssue> {
        self.issues
            .into_iter()
            .map(|issue| issue.into_raw(fields))
            .collect()
    }
}

impl WireIssue {
    /// Convert into the raw issue model.
    pub fn into_raw(self, ids: &FieldIds) -> RawIssue {
        let WireIssue { key, fields } = self;

        let story_points = fields.custom.get(&ids.story_points).and_then(Value::as_f64);
        let epic_key = fields
            .custom
            .get(&ids.epic_link)
            .and_then(Value::as_str)
            .filter(|epic| !epic.is_empty())
            .map(IssueKey::from);

        let links = fields
            .issuelinks
            .into_iter()
            .filter_map(convert_link)
            .collect();

        RawIssue {
            resolution_date: parse_resolution_date(&key, &fields.resolutiondate),
            key: IssueKey::new(key),
            summary: fields.summary,
            issue_type: IssueType::from_name(&fields.issuetype.name),
            status: fields.status.name,
            status_category: StatusCategory::from_key(&fields.status.status_category.key),
            assignee: fields.assignee.name,
            components: fields.components.into_iter().map(|c| c.name).collect(),
            labels: fields.labels,
            story_points,
            epic_key,
            links,
            subtasks: fields
                .subtasks
                .into_iter()
                .filter(|subtask| !subtask.key.is_empty())
                .map(|subtask| IssueKey::new(subtask.key))
                .collect(),
        }
    }
}

fn convert_link(link: WireLink) -> Option<Link> {
    let kind = LinkKind::from_name(&link.link_type.name);
    let (direction, linked) = match (link.outward_issue, link.inward_issue) {
        (Some(outward), _) if !outward.key.is_empty() => (LinkDirection::Outward, outward),
        (_, Some(inward)) if !inward.key.is_empty() => (LinkDirection::Inward, inward),
        _ => return None,
    };

    Some(Link {
        kind,
        direction,
        target: LinkTarget {
            key: IssueKey::new(linked.key),
            summary: linked.fields.summary,
            issue_type: IssueType::from_name(&linked.fields.issuetype.name),
            status_category: StatusCategory::from_key(&linked.fields.status.status_category.key),
        },
    })
}

/// Parse a tracker timestamp down to its calendar date.
///
/// Empty or malformed values yield `None`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    DateTime::parse_from_str(value, TRACKER_DATETIME_FORMAT)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

fn parse_resolution_date(key: &str, value: &str) -> Option<NaiveDate> {
    let parsed = parse_date(value);
    if parsed.is_none() && !value.is_empty() {
        tracing::warn!(key, value, "Unparseable resolution date, ignoring");
    }
    parsed
}
