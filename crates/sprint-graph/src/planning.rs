//! Per-member planning view.
//!
//! Splits two resolved snapshots, work planned into the current sprint and
//! unresolved work left over from the previous one, into per-member
//! buckets, and computes the sprint's story-point capacity per member.

use crate::config::{SprintConfig, TeamConfig};
use crate::domain::{EnrichedIssue, SprintSnapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Days at either end of a sprint reserved for planning and review.
const CEREMONY_DAYS: i64 = 2;

/// Planning view for one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningInfo {
    /// Story points one member can take on this sprint
    pub max_story_points: f64,

    /// Buckets per roster member, keyed by name
    pub users: BTreeMap<String, UserPlan>,

    /// When the planned-work search was issued
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timestamp: Option<DateTime<Utc>>,
}

impl PlanningInfo {
    /// View with no members and no capacity.
    pub fn empty() -> Self {
        Self {
            max_story_points: 0.0,
            users: BTreeMap::new(),
            request_timestamp: None,
        }
    }
}

/// One member's share of the sprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPlan {
    /// Member name
    pub name: String,

    /// Issues assigned to the member in the current sprint
    pub planned_issues: Vec<EnrichedIssue>,

    /// Unresolved issues assigned to the member from the previous sprint
    pub lost_issues: Vec<EnrichedIssue>,
}

impl UserPlan {
    /// Story points of the member's planned issues, own plus rolled-up.
    pub fn planned_story_points(&self) -> f64 {
        self.planned_issues
            .iter()
            .map(|issue| issue.story_points.unwrap_or(0.0) + issue.children_story_points)
            .sum()
    }
}

/// Build the planning view for a team.
///
/// Issues are matched to members by exact assignee name; issues assigned to
/// anyone off the roster are left out.
pub fn plan(
    team: &TeamConfig,
    sprint: &SprintConfig,
    planned: &SprintSnapshot,
    lost: &SprintSnapshot,
) -> PlanningInfo {
    let users = team
        .users
        .iter()
        .map(|user| {
            let plan = UserPlan {
                name: user.name.clone(),
                planned_issues: assigned_to(planned, &user.name),
                lost_issues: assigned_to(lost, &user.name),
            };
            tracing::debug!(
                user = %user.name,
                planned = plan.planned_issues.len(),
                lost = plan.lost_issues.len(),
                "Planned member"
            );
            (user.name.clone(), plan)
        })
        .collect();

    PlanningInfo {
        max_story_points: max_story_points(team, sprint),
        users,
        request_timestamp: Some(planned.request_timestamp),
    }
}

fn assigned_to(snapshot: &SprintSnapshot, name: &str) -> Vec<EnrichedIssue> {
    snapshot
        .issues
        .iter()
        .filter(|issue| issue.assignee == name)
        .cloned()
        .collect()
}

/// Calendar days in the sprint, both ends included.
pub fn sprint_days(sprint: &SprintConfig) -> i64 {
    (sprint.finish_date - sprint.start_date).num_days() + 1
}

/// Story-point capacity of one member.
///
/// Working days are the sprint's calendar days minus listed weekend days
/// minus the ceremony days; a sprint too short to have any yields zero.
#[allow(clippy::cast_precision_loss)]
pub fn max_story_points(team: &TeamConfig, sprint: &SprintConfig) -> f64 {
    let weekend = i64::try_from(sprint.weekend.len()).unwrap_or(i64::MAX);
    let working_days = (sprint_days(sprint) - weekend - CEREMONY_DAYS).max(0);
    team.sp_per_day * working_days as f64
}
