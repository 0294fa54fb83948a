//! Key index over one fetch of raw issues.

use sprint_search::{IssueKey, RawIssue};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Raw issues of one fetch, indexed by key.
///
/// Iteration follows the position at which each key first appeared in the
/// fetch. A key that appears twice keeps that first position but holds the
/// record written last. The tracker is expected to return unique keys per
/// search, so duplicates are logged and otherwise tolerated.
#[derive(Debug)]
pub struct RawIndex<'a> {
    by_key: HashMap<&'a IssueKey, usize>,
    entries: Vec<&'a RawIssue>,
}

impl<'a> RawIndex<'a> {
    /// Index a fetched list of raw issues.
    pub fn build(issues: &'a [RawIssue]) -> Self {
        let mut by_key = HashMap::with_capacity(issues.len());
        let mut entries: Vec<&'a RawIssue> = Vec::with_capacity(issues.len());

        for issue in issues {
            match by_key.entry(&issue.key) {
                Entry::Occupied(slot) => {
                    tracing::warn!(key = %issue.key, "Duplicate issue key in fetch, keeping last");
                    entries[*slot.get()] = issue;
                }
                Entry::Vacant(slot) => {
                    slot.insert(entries.len());
                    entries.push(issue);
                }
            }
        }

        Self { by_key, entries }
    }

    /// Look up a raw issue by key.
    pub fn get(&self, key: &IssueKey) -> Option<&'a RawIssue> {
        self.position(key).map(|pos| self.entries[pos])
    }

    /// Position of a key in iteration order.
    pub fn position(&self, key: &IssueKey) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    /// Whether the key was fetched.
    pub fn contains(&self, key: &IssueKey) -> bool {
        self.by_key.contains_key(key)
    }

    /// Raw issues in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = &'a RawIssue> + '_ {
        self.entries.iter().copied()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the fetch was empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(key: &str, summary: &str) -> RawIssue {
        RawIssue {
            key: key.into(),
            summary: summary.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_and_lookup() {
        let issues = vec![issue("A-1", "first"), issue("A-2", "second")];
        let index = RawIndex::build(&issues);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get(&"A-2".into()).unwrap().summary, "second");
        assert_eq!(index.position(&"A-1".into()), Some(0));
        assert!(!index.contains(&"A-3".into()));
    }

    #[test]
    fn test_duplicate_key_last_write_wins_at_first_position() {
        let issues = vec![
            issue("A-1", "stale"),
            issue("A-2", "other"),
            issue("A-1", "fresh"),
        ];
        let index = RawIndex::build(&issues);

        assert_eq!(index.len(), 2);
        let order: Vec<&str> = index.iter().map(|i| i.summary.as_str()).collect();
        assert_eq!(order, ["fresh", "other"]);
    }

    #[test]
    fn test_empty_fetch() {
        let index = RawIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.iter().count(), 0);
    }
}
