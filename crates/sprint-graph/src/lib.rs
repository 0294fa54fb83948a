//! Sprint Graph - sprint issue relationship resolution for reporting.
//!
//! This crate provides both a CLI application and a library that turns a
//! tracker search into a report-ready dataset: every development issue
//! linked to its QA issue, test-case issue and epic, with subtask story
//! points rolled up, and a per-member planning view on top.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod planning;

// Application context and CLI (needed by binary)
pub mod app;
pub mod cli;
pub mod output;
