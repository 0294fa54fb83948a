//! Graph building: shell pass and link pass.
//!
//! Shells for every fetched issue exist before any reference is derived, so
//! whether a target is fetched never depends on where it sits in the input.

use super::EngineConfig;
use super::classify::{
    CandidateView, Role, development_link, epic_key, fits_qa_slot, fits_test_case_slot,
    verification_links,
};
use super::index::RawIndex;
use super::predicates::{contains, is_progress_status, is_story};
use super::resolve::{resolve_epic, resolve_link};
use crate::domain::{EnrichedIssue, IssueRef};
use sprint_search::{IssueKey, RawIssue};
use std::collections::HashMap;

/// Cross-references derived for one issue.
#[derive(Debug, Default)]
struct Links {
    development: Option<IssueRef>,
    qa: Option<IssueRef>,
    test_case: Option<IssueRef>,
    epic: Option<IssueRef>,
}

/// Pass 1: one reference-free record per indexed issue, in index order.
pub fn build_shells(index: &RawIndex<'_>, config: &EngineConfig) -> Vec<EnrichedIssue> {
    let stories = story_titles(index);
    index.iter().map(|raw| shell(raw, &stories, config)).collect()
}

/// Titles of the fetched stories, by key.
fn story_titles<'a>(index: &RawIndex<'a>) -> HashMap<&'a IssueKey, &'a str> {
    index
        .iter()
        .filter(|raw| is_story(&raw.issue_type))
        .map(|raw| (&raw.key, raw.summary.as_str()))
        .collect()
}

/// Titles of the fetched stories this issue blocks, in link order.
fn parent_titles(raw: &RawIssue, stories: &HashMap<&IssueKey, &str>) -> Vec<String> {
    raw.links
        .iter()
        .filter(|link| link.blocks_target())
        .filter_map(|link| stories.get(&link.target.key))
        .map(|title| (*title).to_string())
        .collect()
}

fn shell(
    raw: &RawIssue,
    stories: &HashMap<&IssueKey, &str>,
    config: &EngineConfig,
) -> EnrichedIssue {
    EnrichedIssue {
        key: raw.key.clone(),
        name: raw.summary.clone(),
        issue_type: raw.issue_type.clone(),
        status: raw.status.clone(),
        assignee: raw.assignee.clone(),
        platform: raw.components.first().cloned().unwrap_or_default(),
        platforms: raw.components.clone(),
        parents: parent_titles(raw, stories),
        uri: config.uri_for(&raw.key),
        is_resolved: raw.status_category.is_done(),
        is_easy: contains(&raw.labels, config.easy_label.as_str()),
        out_of_set: false,
        story_points: raw.story_points,
        children_story_points: 0.0,
        in_progress: is_progress_status(&raw.status),
        close_date: raw.resolution_date,
        subtasks: raw.subtasks.clone(),
        development: None,
        qa: None,
        test_case: None,
        epic: None,
    }
}

/// Pass 2: derive every issue's cross-references against the full shell set.
///
/// `shells` must come from [`build_shells`] over the same index.
pub fn link_shells(shells: &mut [EnrichedIssue], index: &RawIndex<'_>, config: &EngineConfig) {
    let fetched: &[EnrichedIssue] = shells;
    let derived: Vec<Links> = index
        .iter()
        .map(|raw| derive_links(raw, fetched, index, config))
        .collect();

    for (shell, links) in shells.iter_mut().zip(derived) {
        shell.development = links.development;
        shell.qa = links.qa;
        shell.test_case = links.test_case;
        shell.epic = links.epic;
    }
}

fn derive_links(
    raw: &RawIssue,
    shells: &[EnrichedIssue],
    index: &RawIndex<'_>,
    config: &EngineConfig,
) -> Links {
    let role = Role::of(&raw.issue_type);
    if role == Role::Container {
        return Links::default();
    }

    let development = development_link(raw).map(|link| resolve_link(link, index, config));
    let epic = epic_key(raw).map(|key| resolve_epic(key, index, config));
    let (qa, test_case) = match role {
        Role::Deliverable => pick_verifiers(raw, shells, index, config),
        Role::Verifier | Role::Container => (None, None),
    };

    Links {
        development,
        qa,
        test_case,
        epic,
    }
}

/// First QA candidate and first test-case candidate among the issue's
/// verification links. One link may fill both slots.
fn pick_verifiers(
    raw: &RawIssue,
    shells: &[EnrichedIssue],
    index: &RawIndex<'_>,
    config: &EngineConfig,
) -> (Option<IssueRef>, Option<IssueRef>) {
    let mut qa = None;
    let mut test_case = None;

    for link in verification_links(raw) {
        if qa.is_some() && test_case.is_some() {
            break;
        }

        let reference = resolve_link(link, index, config);
        let Some(view) = candidate_view(&reference, shells, index) else {
            continue;
        };
        let fills_qa = qa.is_none() && fits_qa_slot(&view, &config.qa_platform);
        let fills_test_case = test_case.is_none() && fits_test_case_slot(&view);

        match (fills_qa, fills_test_case) {
            (true, true) => {
                qa = Some(reference.clone());
                test_case = Some(reference);
            }
            (true, false) => qa = Some(reference),
            (false, true) => test_case = Some(reference),
            (false, false) => {}
        }
    }

    (qa, test_case)
}

/// The data slot rules judge a candidate by: the fetched record when there
/// is one, otherwise the stand-in built from the link.
fn candidate_view<'a>(
    reference: &'a IssueRef,
    shells: &'a [EnrichedIssue],
    index: &RawIndex<'_>,
) -> Option<CandidateView<'a>> {
    match reference {
        IssueRef::InSet(key) => {
            let fetched = shells.get(index.position(key)?)?;
            Some(CandidateView {
                name: &fetched.name,
                issue_type: &fetched.issue_type,
                platform: Some(fetched.platform.as_str()),
            })
        }
        IssueRef::OutOfSet(stand_in) => Some(CandidateView {
            name: &stand_in.name,
            issue_type: &stand_in.issue_type,
            platform: None,
        }),
    }
}
