//! Concurrent probing of a batch of targets.
//!
//! One task is spawned per target. Tasks share no state; each sends its
//! outcome down a channel that is drained once every task has finished.

use crate::config::ProbeConfig;
use crate::error::Error;
use crate::probe::prober::{probe_target, ProbeBackend};
use crate::probe::types::{ProbeTarget, ResultSet, ResultSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Semaphore};

/// Everything a finished batch produced.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// When dispatch started
    pub started_at: DateTime<Utc>,
    /// Wall time from dispatch to the last task finishing
    pub elapsed_ms: u64,
    /// Outcomes for IPv4 targets
    pub ips: ResultSet,
    /// Counts over `ips`
    pub ip_summary: ResultSummary,
    /// Outcomes for word targets
    pub words: ResultSet,
    /// Counts over `words`
    pub word_summary: ResultSummary,
    /// Tasks that panicked and left no outcome
    pub failed_tasks: usize,
}

impl BatchReport {
    fn new(
        started_at: DateTime<Utc>,
        elapsed_ms: u64,
        ips: ResultSet,
        words: ResultSet,
        failed_tasks: usize,
    ) -> Self {
        Self {
            started_at,
            elapsed_ms,
            ip_summary: ips.summary(),
            word_summary: words.summary(),
            ips,
            words,
            failed_tasks,
        }
    }

    /// Number of outcomes across both sets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.ips.len() + self.words.len()
    }
}

/// Probe every target concurrently and wait for all of them.
///
/// All tasks start at once unless `config.max_concurrent` caps them.
/// There is no overall deadline: the batch ends when the slowest lookup
/// does.
pub async fn run_batch<B>(
    backend: Arc<B>,
    targets: Vec<ProbeTarget>,
    config: &ProbeConfig,
) -> BatchReport
where
    B: ProbeBackend + 'static,
{
    let started_at = Utc::now();
    let start = Instant::now();
    let semaphore = config.max_concurrent.map(|n| Arc::new(Semaphore::new(n)));

    tracing::debug!("dispatching {} probes", targets.len());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut handles = Vec::with_capacity(targets.len());

    for target in targets {
        let tx = tx.clone();
        let backend = Arc::clone(&backend);
        let semaphore = semaphore.clone();

        handles.push(tokio::spawn(async move {
            let _permit = match semaphore {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };
            let outcome = probe_target(backend.as_ref(), target).await;
            let _ = tx.send(outcome);
        }));
    }
    drop(tx);

    let mut failed_tasks = 0;
    for result in futures::future::join_all(handles).await {
        if let Err(e) = result {
            tracing::error!("{}", Error::from(e));
            failed_tasks += 1;
        }
    }

    let mut outcomes = Vec::new();
    while let Some(outcome) = rx.recv().await {
        outcomes.push(outcome);
    }

    let elapsed_ms = start.elapsed().as_millis() as u64;
    tracing::debug!("{} probes finished in {elapsed_ms} ms", outcomes.len());

    let (ips, words) = ResultSet::partition(outcomes);
    BatchReport::new(started_at, elapsed_ms, ips, words, failed_tasks)
}
