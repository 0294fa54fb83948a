//! Search sources.
//!
//! An [`IssueSource`] answers one search request with a flat list of raw
//! issues. Transport, authentication and pagination are the source's
//! business; callers only see a completed list or an error.

use crate::error::{Error, Result};
use crate::model::RawIssue;
use crate::wire::{FieldIds, parse_search};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A named tracker query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchRequest {
    /// Short name identifying the search (e.g. "planned")
    pub name: String,

    /// Query text sent to the tracker
    pub jql: String,
}

impl SearchRequest {
    /// Create a new search request
    pub fn new(name: impl Into<String>, jql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            jql: jql.into(),
        }
    }
}

/// The complete result of one search.
#[derive(Debug, Clone)]
pub struct SearchBatch {
    /// The request this batch answers
    pub request: SearchRequest,

    /// Issues in tracker order
    pub issues: Vec<RawIssue>,

    /// When the search was issued
    pub request_timestamp: DateTime<Utc>,
}

/// Anything that can answer a tracker search.
///
/// Implementations must be `Send + Sync` so searches can run on separate
/// tasks through the [`JobManager`](crate::jobs::JobManager).
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Run one search and return every matching issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the search could not be completed or its
    /// response could not be decoded.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawIssue>>;
}

/// Answers searches from saved tracker responses on disk.
///
/// The request named `planned` is answered from `<dir>/planned.json`.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    dir: PathBuf,
    fields: FieldIds,
}

impl JsonFileSource {
    /// Create a source reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>, fields: FieldIds) -> Self {
        Self {
            dir: dir.into(),
            fields,
        }
    }

    /// Directory searches are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, request: &SearchRequest) -> PathBuf {
        self.dir.join(format!("{}.json", request.name))
    }
}

#[async_trait]
impl IssueSource for JsonFileSource {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawIssue>> {
        let path = self.path_for(request);
        tracing::debug!(name = %request.name, jql = %request.jql, path = %path.display(), "Search");

        let body = match tokio::fs::read_to_string(&path).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::SourceNotFound {
                    name: request.name.clone(),
                    path,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let issues = parse_search(&body, &self.fields)?;
        tracing::debug!(name = %request.name, count = issues.len(), "Search completed");
        Ok(issues)
    }
}

/// Answers searches from issues held in memory, keyed by request name.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    results: HashMap<String, Vec<RawIssue>>,
}

impl StaticSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the issues returned for the named search.
    #[must_use]
    pub fn with_results(mut self, name: impl Into<String>, issues: Vec<RawIssue>) -> Self {
        self.results.insert(name.into(), issues);
        self
    }
}

#[async_trait]
impl IssueSource for StaticSource {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawIssue>> {
        self.results
            .get(&request.name)
            .cloned()
            .ok_or_else(|| Error::SourceNotFound {
                name: request.name.clone(),
                path: PathBuf::from("<memory>"),
            })
    }
}
