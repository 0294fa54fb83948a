//! Reference resolution.
//!
//! Turns a classified link (or epic key) into an [`IssueRef`]. Targets that
//! were fetched are referenced by key so later roll-up results stay visible
//! through every holder. Targets outside the fetch become stand-ins built
//! from whatever the link snapshot carried; stand-ins are leaves and are
//! never resolved further.

use super::EngineConfig;
use super::index::RawIndex;
use crate::domain::{EnrichedIssue, IssueRef};
use sprint_search::{IssueKey, IssueType, Link};

/// Resolve the target of a link.
pub fn resolve_link(link: &Link, index: &RawIndex<'_>, config: &EngineConfig) -> IssueRef {
    let target = &link.target;
    if index.contains(&target.key) {
        return IssueRef::InSet(target.key.clone());
    }

    tracing::trace!(key = %target.key, "Link target outside fetch, synthesizing stand-in");
    IssueRef::OutOfSet(Box::new(stand_in(
        &target.key,
        &target.summary,
        target.issue_type.clone(),
        target.status_category.is_done(),
        config,
    )))
}

/// Resolve a parent-epic key.
///
/// The epic field carries only a key, so an unfetched epic is a bare
/// stand-in with no title and an unresolved state.
pub fn resolve_epic(key: &IssueKey, index: &RawIndex<'_>, config: &EngineConfig) -> IssueRef {
    if index.contains(key) {
        return IssueRef::InSet(key.clone());
    }
    IssueRef::OutOfSet(Box::new(stand_in(key, "", IssueType::Epic, false, config)))
}

/// Minimal record for an issue that was not fetched.
pub fn stand_in(
    key: &IssueKey,
    name: &str,
    issue_type: IssueType,
    is_resolved: bool,
    config: &EngineConfig,
) -> EnrichedIssue {
    EnrichedIssue {
        key: key.clone(),
        name: name.to_string(),
        issue_type,
        status: String::new(),
        assignee: String::new(),
        platform: String::new(),
        platforms: Vec::new(),
        parents: Vec::new(),
        uri: config.uri_for(key),
        is_resolved,
        is_easy: false,
        out_of_set: true,
        story_points: None,
        children_story_points: 0.0,
        in_progress: false,
        close_date: None,
        subtasks: Vec::new(),
        development: None,
        qa: None,
        test_case: None,
        epic: None,
    }
}
