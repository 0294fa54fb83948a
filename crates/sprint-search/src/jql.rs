//! Tracker query construction.

use crate::source::SearchRequest;

/// Request name for the sprint's issue list.
pub const SPRINT_SEARCH: &str = "sprint";

/// Request name for issues planned into the sprint.
pub const PLANNED_SEARCH: &str = "planned";

/// Request name for unresolved issues left over from the previous sprint.
pub const LOST_SEARCH: &str = "lost";

/// All non-epic issues of a sprint still open at, or resolved after, its start.
///
/// A non-empty `override_query` replaces the generated query verbatim.
pub fn sprint_issues(
    code: u32,
    start_date: &str,
    team: &str,
    override_query: Option<&str>,
) -> SearchRequest {
    if let Some(query) = override_query.filter(|q| !q.trim().is_empty()) {
        return SearchRequest::new(SPRINT_SEARCH, query);
    }

    let mut jql = format!(
        "Sprint = {code} AND type != Epic \
         AND (resolutiondate is EMPTY OR resolutiondate >= \"{start_date}\")"
    );
    if !team.is_empty() {
        jql.push_str(&format!(
            " AND (\"Feature Team\" is EMPTY OR \"Feature Team\" = {team})"
        ));
    }
    SearchRequest::new(SPRINT_SEARCH, jql)
}

/// Everything planned into the sprint except stories.
pub fn planned_issues(code: u32, team: Option<&str>) -> SearchRequest {
    let mut jql = format!("Sprint = {code} AND type != Story");
    push_team_filter(&mut jql, team);
    SearchRequest::new(PLANNED_SEARCH, jql)
}

/// Unresolved work from a finished previous sprint.
pub fn lost_issues(prev_code: u32, team: Option<&str>) -> SearchRequest {
    let mut jql = format!(
        "Sprint = {prev_code} AND NOT Sprint in openSprints() \
         AND NOT Sprint in futureSprints() \
         AND type != Epic AND type != Story AND resolutiondate is EMPTY"
    );
    push_team_filter(&mut jql, team);
    SearchRequest::new(LOST_SEARCH, jql)
}

fn push_team_filter(jql: &mut String, team: Option<&str>) {
    if let Some(team) = team.filter(|t| !t.is_empty()) {
        jql.push_str(&format!(" AND \"Feature teams\" = {team}"));
    }
}
