//! Property tests over randomly generated fetches.

use proptest::prelude::*;
use sprint_graph::domain::EnrichedIssue;
use sprint_graph::engine::Engine;
use sprint_search::{IssueKey, IssueType, Link, RawIssue};
use std::collections::{BTreeMap, BTreeSet};

mod common;
use common::{blocked_by, blocks};

/// Keys a generated fetch draws from; about half end up fetched.
const UNIVERSE: usize = 12;

fn key(index: usize) -> String {
    format!("K-{index}")
}

fn arb_issue_type() -> impl Strategy<Value = IssueType> {
    prop_oneof![
        Just(IssueType::Story),
        Just(IssueType::Task),
        Just(IssueType::Bug),
        Just(IssueType::Qa),
        Just(IssueType::TestCase),
        Just(IssueType::Epic),
        Just(IssueType::SubTask),
    ]
}

fn arb_summary() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Login".to_string()),
        Just("QA: verify login".to_string()),
        Just("Test Case: login flow".to_string()),
        Just("ТЕСТКЕЙС регистрации".to_string()),
    ]
}

fn arb_link() -> impl Strategy<Value = Link> {
    (any::<bool>(), 0..UNIVERSE, arb_issue_type(), arb_summary()).prop_map(
        |(outward, target, issue_type, summary)| {
            if outward {
                blocks(&key(target), issue_type, &summary)
            } else {
                blocked_by(&key(target), issue_type, &summary)
            }
        },
    )
}

prop_compose! {
    fn arb_slot(index: usize)(
        present in any::<bool>(),
        issue_type in arb_issue_type(),
        summary in arb_summary(),
        platform in prop_oneof![Just("QA"), Just("iOS"), Just("Android")],
        half_points in proptest::option::of(0..10u8),
        status in prop_oneof![Just("Open"), Just("In Progress"), Just("Done")],
        links in prop::collection::vec(arb_link(), 0..4),
        subtasks in prop::collection::vec(0..UNIVERSE, 0..3),
        epic in proptest::option::of(0..UNIVERSE),
    ) -> Option<RawIssue> {
        present.then(|| RawIssue {
            key: key(index).into(),
            summary,
            issue_type,
            status: status.to_string(),
            components: vec![platform.to_string()],
            story_points: half_points.map(|half| f64::from(half) / 2.0),
            links,
            subtasks: subtasks.into_iter().map(|s| IssueKey::new(key(s))).collect(),
            epic_key: epic.map(|e| IssueKey::new(key(e))),
            ..Default::default()
        })
    }
}

fn arb_fetch() -> impl Strategy<Value = Vec<RawIssue>> {
    (0..UNIVERSE)
        .map(arb_slot)
        .collect::<Vec<_>>()
        .prop_map(|slots| slots.into_iter().flatten().collect())
}

fn by_key(issues: &[EnrichedIssue]) -> BTreeMap<&IssueKey, &EnrichedIssue> {
    issues.iter().map(|issue| (&issue.key, issue)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn every_fetched_key_appears_exactly_once(fetch in arb_fetch()) {
        let resolved = Engine::default().resolve(&fetch);

        let input: Vec<&IssueKey> = fetch.iter().map(|issue| &issue.key).collect();
        let output: Vec<&IssueKey> = resolved.iter().map(|issue| &issue.key).collect();
        prop_assert_eq!(output, input);
    }

    #[test]
    fn epic_references_follow_the_epic_field(fetch in arb_fetch()) {
        let resolved = Engine::default().resolve(&fetch);
        let fetched: BTreeSet<&IssueKey> = fetch.iter().map(|issue| &issue.key).collect();

        for (raw, issue) in fetch.iter().zip(&resolved) {
            match (&raw.epic_key, &issue.epic) {
                (None, epic) => prop_assert!(epic.is_none()),
                (Some(_), None) => prop_assert_eq!(&raw.issue_type, &IssueType::Epic),
                (Some(epic_key), Some(epic)) => {
                    prop_assert_eq!(epic.key(), epic_key);
                    prop_assert_eq!(epic.is_out_of_set(), !fetched.contains(epic_key));
                }
            }
        }
    }

    #[test]
    fn resolution_is_idempotent(fetch in arb_fetch()) {
        let engine = Engine::default();
        prop_assert_eq!(engine.resolve(&fetch), engine.resolve(&fetch));
    }

    #[test]
    fn resolution_ignores_input_order(
        (fetch, shuffled) in arb_fetch().prop_flat_map(|fetch| {
            let shuffled = Just(fetch.clone()).prop_shuffle();
            (Just(fetch), shuffled)
        })
    ) {
        let engine = Engine::default();
        let in_order = engine.resolve(&fetch);
        let permuted = engine.resolve(&shuffled);
        let permuted = by_key(&permuted);

        for issue in &in_order {
            let other = permuted[&issue.key];
            prop_assert_eq!(&issue.development, &other.development);
            prop_assert_eq!(&issue.qa, &other.qa);
            prop_assert_eq!(&issue.test_case, &other.test_case);
            prop_assert_eq!(&issue.epic, &other.epic);
            prop_assert_eq!(issue.children_story_points, other.children_story_points);
            prop_assert_eq!(issue.in_progress, other.in_progress);
        }
    }

    #[test]
    fn stand_ins_are_leaves(fetch in arb_fetch()) {
        for issue in Engine::default().resolve(&fetch) {
            for reference in [&issue.development, &issue.qa, &issue.test_case, &issue.epic]
                .into_iter()
                .flatten()
            {
                if let Some(stand_in) = reference.stand_in() {
                    prop_assert!(stand_in.out_of_set);
                    prop_assert!(!stand_in.has_references());
                    prop_assert!(stand_in.assignee.is_empty());
                    prop_assert!(stand_in.platform.is_empty());
                }
            }
        }
    }
}
