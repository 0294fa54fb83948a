//! Story-point and progress roll-up.
//!
//! Builds a parent -> subtask graph over the fetched issues and folds each
//! parent's direct subtasks into it. Roll-up is single-level: a parent sees
//! its subtasks' own values, never what they collected from their own
//! subtasks. Subtask keys outside the fetch contribute nothing.

use super::index::RawIndex;
use crate::domain::EnrichedIssue;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

/// Roll direct subtask story points and progress into their parents.
///
/// `shells` must be in the iteration order of `index`.
pub fn roll_up(shells: &mut [EnrichedIssue], index: &RawIndex<'_>) {
    let graph = subtask_graph(index);
    let fetched: &[EnrichedIssue] = shells;

    // Contributions read subtasks' pre-roll-up values only.
    let contributions: Vec<(f64, bool)> = graph
        .node_indices()
        .map(|parent| {
            graph
                .neighbors_directed(parent, Direction::Outgoing)
                .map(|child| &fetched[graph[child]])
                .fold((0.0, false), |(points, progress), child| {
                    (
                        points + child.story_points.unwrap_or(0.0),
                        progress || child.in_progress,
                    )
                })
        })
        .collect();

    for (shell, (points, progress)) in shells.iter_mut().zip(contributions) {
        shell.children_story_points += points;
        shell.in_progress |= progress;
    }
}

/// Graph with one node per fetched issue (weight = position in `index`) and
/// an edge from each parent to every fetched subtask it lists.
fn subtask_graph(index: &RawIndex<'_>) -> DiGraph<usize, ()> {
    let mut graph = DiGraph::with_capacity(index.len(), 0);
    let nodes: Vec<NodeIndex> = (0..index.len()).map(|pos| graph.add_node(pos)).collect();

    for (parent_pos, raw) in index.iter().enumerate() {
        for subtask in &raw.subtasks {
            match index.position(subtask) {
                Some(child_pos) => {
                    graph.add_edge(nodes[parent_pos], nodes[child_pos], ());
                }
                None => {
                    tracing::trace!(parent = %raw.key, subtask = %subtask, "Subtask not fetched, skipping");
                }
            }
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfig;
    use crate::engine::build::build_shells;
    use sprint_search::{IssueKey, RawIssue};

    fn issue(key: &str, points: Option<f64>, status: &str, subtasks: &[&str]) -> RawIssue {
        RawIssue {
            key: key.into(),
            status: status.to_string(),
            story_points: points,
            subtasks: subtasks.iter().map(|k| IssueKey::from(*k)).collect(),
            ..Default::default()
        }
    }

    fn rolled_up(issues: &[RawIssue]) -> Vec<EnrichedIssue> {
        let index = RawIndex::build(issues);
        let mut shells = build_shells(&index, &EngineConfig::default());
        roll_up(&mut shells, &index);
        shells
    }

    #[test]
    fn test_missing_subtask_contributes_nothing() {
        let shells = rolled_up(&[
            issue("D", Some(1.0), "Open", &["D-1", "D-2"]),
            issue("D-1", Some(3.0), "Open", &[]),
        ]);

        assert_eq!(shells[0].children_story_points, 3.0);
        assert_eq!(shells[0].story_points, Some(1.0));
    }

    #[test]
    fn test_unset_story_points_count_as_zero() {
        let shells = rolled_up(&[
            issue("P", None, "Open", &["C-1", "C-2"]),
            issue("C-1", None, "Open", &[]),
            issue("C-2", Some(2.5), "Open", &[]),
        ]);

        assert_eq!(shells[0].children_story_points, 2.5);
    }

    #[test]
    fn test_progress_is_ored_from_subtasks() {
        let shells = rolled_up(&[
            issue("P", None, "Open", &["C-1", "C-2"]),
            issue("C-1", None, "Done", &[]),
            issue("C-2", None, "In Review", &[]),
        ]);

        assert!(shells[0].in_progress);
        assert!(!shells[1].in_progress);
    }

    #[test]
    fn test_roll_up_is_single_level() {
        let shells = rolled_up(&[
            issue("G", None, "Open", &["P"]),
            issue("P", Some(1.0), "Open", &["C"]),
            issue("C", Some(5.0), "In Progress", &[]),
        ]);

        assert_eq!(shells[1].children_story_points, 5.0);
        assert!(shells[1].in_progress);
        // The grandparent only sees P's own values.
        assert_eq!(shells[0].children_story_points, 1.0);
        assert!(!shells[0].in_progress);
    }

    #[test]
    fn test_subtask_cycle_terminates() {
        let shells = rolled_up(&[
            issue("A", Some(2.0), "Open", &["B"]),
            issue("B", Some(3.0), "Open", &["A"]),
        ]);

        assert_eq!(shells[0].children_story_points, 3.0);
        assert_eq!(shells[1].children_story_points, 2.0);
    }
}
