//! Concurrent search jobs.
//!
//! The [`JobManager`] fans independent searches out onto tokio tasks. Each
//! job delivers its complete batch exactly once through a completion
//! channel; there is no ordering between jobs and no shared state between
//! their results. A worker limit bounds how many searches hit the source
//! at the same time.

use crate::error::{Error, Result};
use crate::source::{IssueSource, SearchBatch, SearchRequest};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc, oneshot};

/// Default number of searches allowed to run at once.
pub const DEFAULT_WORKERS: usize = 4;

/// Runs searches against a shared source with bounded concurrency.
#[derive(Clone)]
pub struct JobManager {
    source: Arc<dyn IssueSource>,
    permits: Arc<Semaphore>,
}

impl std::fmt::Debug for JobManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobManager")
            .field("source", &"<dyn IssueSource>")
            .field("available_workers", &self.permits.available_permits())
            .finish()
    }
}

/// Pending result of one submitted search.
#[derive(Debug)]
pub struct JobHandle {
    name: String,
    receiver: oneshot::Receiver<Result<SearchBatch>>,
}

impl JobHandle {
    /// Name of the search this handle waits on.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wait for the search to complete.
    ///
    /// # Errors
    ///
    /// Returns the search's own error, or `Error::JobFailed` if the job
    /// was dropped before delivering a batch.
    pub async fn wait(self) -> Result<SearchBatch> {
        self.receiver.await.map_err(|_| Error::JobFailed(self.name))?
    }
}

impl JobManager {
    /// Create a manager running at most `workers` searches at once.
    ///
    /// A limit of zero is raised to one.
    pub fn new(source: Arc<dyn IssueSource>, workers: usize) -> Self {
        Self {
            source,
            permits: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Submit a search and return a handle to its result.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, request: SearchRequest) -> JobHandle {
        let (sender, receiver) = oneshot::channel();
        let name = request.name.clone();
        let source = Arc::clone(&self.source);
        let permits = Arc::clone(&self.permits);

        tokio::spawn(async move {
            let result = run_job(source, permits, request).await;
            // The caller may have stopped waiting; nothing to do then.
            let _ = sender.send(result);
        });

        JobHandle { name, receiver }
    }

    /// Submit every request and receive results as they complete.
    ///
    /// Results arrive in completion order, not submission order. The
    /// receiver closes once every job has reported.
    pub fn run_all(
        &self,
        requests: impl IntoIterator<Item = SearchRequest>,
    ) -> mpsc::Receiver<Result<SearchBatch>> {
        let requests: Vec<SearchRequest> = requests.into_iter().collect();
        let (sender, receiver) = mpsc::channel(requests.len().max(1));

        for request in requests {
            let sender = sender.clone();
            let source = Arc::clone(&self.source);
            let permits = Arc::clone(&self.permits);
            tokio::spawn(async move {
                let result = run_job(source, permits, request).await;
                let _ = sender.send(result).await;
            });
        }

        receiver
    }
}

async fn run_job(
    source: Arc<dyn IssueSource>,
    permits: Arc<Semaphore>,
    request: SearchRequest,
) -> Result<SearchBatch> {
    let _permit = permits
        .acquire_owned()
        .await
        .map_err(|_| Error::JobFailed(request.name.clone()))?;

    let request_timestamp = Utc::now();
    tracing::info!(name = %request.name, jql = %request.jql, "Running search");
    let issues = source.search(&request).await?;
    tracing::debug!(name = %request.name, count = issues.len(), "Search job finished");

    Ok(SearchBatch {
        request,
        issues,
        request_timestamp,
    })
}
