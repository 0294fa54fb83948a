//! Link classification.
//!
//! Decides which of an issue's links express which report relationship.
//! Every single-valued slot takes the first matching link in tracker order.

use super::predicates::{has_test_case_marker, is_story, is_testing_type};
use sprint_search::{IssueKey, IssueType, Link, RawIssue};

/// Which relationship slots an issue fills, decided by its own type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// QA and test-case issues: look for the development issue they verify
    /// and their epic.
    Verifier,
    /// Everything except epics: look for QA, test case, epic and any
    /// development issue blocking them.
    Deliverable,
    /// Epics fill no slots.
    Container,
}

impl Role {
    /// Role of an issue of the given type.
    pub fn of(issue_type: &IssueType) -> Self {
        if is_testing_type(issue_type) {
            Self::Verifier
        } else if *issue_type == IssueType::Epic {
            Self::Container
        } else {
            Self::Deliverable
        }
    }
}

/// Outward blocking links whose target is a QA or test-case issue.
///
/// These are the candidates for both the QA and the test-case slot.
pub fn verification_links(issue: &RawIssue) -> impl Iterator<Item = &Link> {
    issue
        .links
        .iter()
        .filter(|link| link.blocks_target() && is_testing_type(&link.target.issue_type))
}

/// First link through which a development issue blocks this one.
///
/// Blockers that are themselves QA, test-case or story issues are not
/// development work and are skipped.
pub fn development_link(issue: &RawIssue) -> Option<&Link> {
    issue.links.iter().find(|link| {
        let target_type = &link.target.issue_type;
        link.blocked_by_target() && !is_testing_type(target_type) && !is_story(target_type)
    })
}

/// Parent epic named on the issue, if any.
pub fn epic_key(issue: &RawIssue) -> Option<&IssueKey> {
    issue.epic_key.as_ref().filter(|key| !key.as_str().is_empty())
}

/// A verification candidate as seen after resolution.
#[derive(Debug, Clone, Copy)]
pub struct CandidateView<'a> {
    /// Title of the fetched record, or of the link snapshot for stand-ins
    pub name: &'a str,
    /// Type of the fetched record, or of the link snapshot for stand-ins
    pub issue_type: &'a IssueType,
    /// Platform of the fetched record; `None` for stand-ins
    pub platform: Option<&'a str>,
}

/// Whether a candidate can fill the QA slot.
///
/// Fetched candidates must also sit on the QA platform; this guards against
/// mis-typed issues in the tracker. Stand-ins carry no platform and are
/// judged by title alone.
pub fn fits_qa_slot(candidate: &CandidateView<'_>, qa_platform: &str) -> bool {
    !has_test_case_marker(candidate.name)
        && candidate.platform.is_none_or(|platform| platform == qa_platform)
}

/// Whether a candidate can fill the test-case slot.
pub fn fits_test_case_slot(candidate: &CandidateView<'_>) -> bool {
    has_test_case_marker(candidate.name) || *candidate.issue_type == IssueType::TestCase
}
