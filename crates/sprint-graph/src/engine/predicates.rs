//! Issue-type and status predicates.
//!
//! Pure helpers over fixed string tables. The tables are engine constants,
//! never mutated at runtime.

use sprint_search::IssueType;
use std::borrow::Borrow;

/// Status names that count as work in progress. Matched case-sensitively.
pub const PROGRESS_STATUSES: [&str; 5] = [
    "Waiting for release",
    "In Progress",
    "In test",
    "In Review",
    "QA Progress",
];

/// Lowercase title fragments that mark an issue as test-case work.
///
/// Covers English and Russian spellings, with and without hyphens, plus the
/// common "casse" misspelling.
pub const TEST_CASE_MARKERS: [&str; 6] = [
    "тесткейс",
    "тест-кейс",
    "test casse",
    "test-casse",
    "test case",
    "test-case",
];

/// Whether `needle` is one of `items`.
pub fn contains<T, Q>(items: &[T], needle: &Q) -> bool
where
    T: Borrow<Q>,
    Q: PartialEq + ?Sized,
{
    items.iter().any(|item| item.borrow() == needle)
}

/// Whether the type is a user story.
pub fn is_story(issue_type: &IssueType) -> bool {
    *issue_type == IssueType::Story
}

/// Whether the type belongs to the testing side (QA check or test case).
pub fn is_testing_type(issue_type: &IssueType) -> bool {
    matches!(issue_type, IssueType::Qa | IssueType::TestCase)
}

/// Whether the status name is one of [`PROGRESS_STATUSES`].
pub fn is_progress_status(status: &str) -> bool {
    contains(&PROGRESS_STATUSES, status)
}

/// Whether a title reads like a test-case issue.
pub fn has_test_case_marker(title: &str) -> bool {
    let title = title.to_lowercase();
    TEST_CASE_MARKERS.iter().any(|marker| title.contains(marker))
}
