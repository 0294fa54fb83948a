//! Issue relationship resolution engine.
//!
//! Turns one flat fetch of raw issues into enriched records linked
//! Development <-> QA <-> TestCase <-> Epic, without going back to the
//! tracker. The pipeline is strictly build-then-link:
//!
//! 1. [`index`]: key every raw issue
//! 2. [`build::build_shells`]: one reference-free record per key
//! 3. [`build::link_shells`]: classify links ([`classify`]) and resolve
//!    targets ([`resolve`]) against the complete shell set
//! 4. [`aggregate::roll_up`]: fold direct subtasks into their parents
//!
//! Nothing here fails. Missing targets become stand-ins, missing subtasks
//! contribute nothing, and malformed fields were already defaulted when the
//! fetch was decoded. Resolution never recurses, so reference cycles in the
//! tracker data are harmless.

pub mod aggregate;
pub mod build;
pub mod classify;
pub mod index;
pub mod predicates;
pub mod resolve;

use crate::domain::{EnrichedIssue, SprintSnapshot};
use sprint_search::{IssueKey, RawIssue, SearchBatch};

pub use index::RawIndex;

/// Default browse prefix for issue links.
pub const DEFAULT_BROWSE_URL: &str = "https://jira.example.com/browse/";

/// Platform a fetched QA issue must sit on to fill the QA slot.
pub const DEFAULT_QA_PLATFORM: &str = "QA";

/// Label marking an issue as easy.
pub const DEFAULT_EASY_LABEL: &str = "Easy";

/// Fixed settings the engine resolves with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Prefix an issue key is appended to for its browse link
    pub browse_url: String,

    /// Platform (first component) required of fetched QA issues
    pub qa_platform: String,

    /// Label that sets `is_easy`
    pub easy_label: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            browse_url: DEFAULT_BROWSE_URL.to_string(),
            qa_platform: DEFAULT_QA_PLATFORM.to_string(),
            easy_label: DEFAULT_EASY_LABEL.to_string(),
        }
    }
}

impl EngineConfig {
    /// Browse link for an issue key.
    pub fn uri_for(&self, key: &IssueKey) -> String {
        format!("{}{}", self.browse_url, key)
    }
}

/// Resolves fetched batches into enriched issues.
///
/// Holds no state between runs; resolving the same input twice yields
/// identical output.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with the given settings.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Settings this engine resolves with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve one fetch into one enriched record per distinct key.
    pub fn resolve(&self, issues: &[RawIssue]) -> Vec<EnrichedIssue> {
        tracing::debug!(count = issues.len(), "Issue resolution started");

        let index = RawIndex::build(issues);
        let mut shells = build::build_shells(&index, &self.config);
        build::link_shells(&mut shells, &index, &self.config);
        aggregate::roll_up(&mut shells, &index);

        let out_of_set = shells
            .iter()
            .flat_map(|issue| [&issue.development, &issue.qa, &issue.test_case, &issue.epic])
            .flatten()
            .filter(|reference| reference.is_out_of_set())
            .count();
        tracing::debug!(
            count = shells.len(),
            stand_ins = out_of_set,
            "Issue resolution completed"
        );

        shells
    }

    /// Resolve a completed search batch into a report snapshot.
    pub fn resolve_batch(&self, batch: &SearchBatch) -> SprintSnapshot {
        SprintSnapshot::new(self.resolve(&batch.issues), batch.request_timestamp)
    }
}
