//! Issue tracker search plumbing for sprint reporting.
//!
//! This crate owns everything on the fetch side of the resolution engine:
//! the raw issue model, the tracker's search-response wire format, query
//! construction, and a small job manager that runs independent searches
//! concurrently and hands each completed batch back as a unit.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod jobs;
pub mod jql;
pub mod model;
pub mod source;
pub mod wire;

pub use error::{Error, Result};
pub use jobs::{JobHandle, JobManager};
pub use model::{
    IssueKey, IssueType, Link, LinkDirection, LinkKind, LinkTarget, RawIssue, StatusCategory,
};
pub use source::{IssueSource, JsonFileSource, SearchBatch, SearchRequest, StaticSource};
pub use wire::FieldIds;
