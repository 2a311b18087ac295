//! Background reconciliation of submitted reports.
//!
//! Reports are handed to an in-memory queue right after they are stored.
//! A worker drains it with bounded concurrency, retrying transient failures
//! with exponential backoff. Jobs still failing afterwards are logged and
//! dropped.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, error, info, warn};

use crate::services::reconciliation::ReportReconciler;
use crate::services::report::Report;
use crate::services::retry::RetryConfig;

/// Handle for enqueueing reports. Cheap to clone.
#[derive(Clone)]
pub struct ReconciliationQueue {
    sender: mpsc::Sender<Report>,
}

impl ReconciliationQueue {
    /// Enqueue a report without waiting.
    ///
    /// Returns `false` if the job was dropped because the queue is full or the
    /// worker has stopped.
    pub fn enqueue(&self, report: Report) -> bool {
        let report_id = report.id.clone();
        match self.sender.try_send(report) {
            Ok(()) => {
                debug!(report_id = %report_id, "Reconciliation job enqueued");
                true
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(report_id = %report_id, "Reconciliation queue full, job dropped");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                error!(report_id = %report_id, "Reconciliation worker stopped, job dropped");
                false
            }
        }
    }
}

/// Reconciliation job processing service.
pub struct ReconciliationWorker {
    sender: mpsc::Sender<Report>,
    receiver: mpsc::Receiver<Report>,
    workers: usize,
    retry: RetryConfig,
}

impl ReconciliationWorker {
    /// Create a worker with the given queue capacity and concurrency.
    #[must_use]
    pub fn new(queue_size: usize, workers: usize, retry: RetryConfig) -> Self {
        let (sender, receiver) = mpsc::channel(queue_size.max(1));
        Self {
            sender,
            receiver,
            workers: workers.max(1),
            retry,
        }
    }

    /// Get a queue handle for enqueueing reports.
    #[must_use]
    pub fn queue(&self) -> ReconciliationQueue {
        ReconciliationQueue {
            sender: self.sender.clone(),
        }
    }

    /// Spawn the processing loop.
    ///
    /// The loop ends once every queue handle is dropped and the queue is empty.
    pub fn start(self, reconciler: Arc<dyn ReportReconciler>) -> tokio::task::JoinHandle<()> {
        let Self {
            sender,
            receiver,
            workers,
            retry,
        } = self;
        drop(sender);

        tokio::spawn(async move {
            info!("Reconciliation worker starting with {} workers", workers);
            run_processor(receiver, reconciler, workers, Arc::new(retry)).await;
            info!("Reconciliation worker stopped");
        })
    }
}

async fn run_processor(
    mut receiver: mpsc::Receiver<Report>,
    reconciler: Arc<dyn ReportReconciler>,
    workers: usize,
    retry: Arc<RetryConfig>,
) {
    let semaphore = Arc::new(Semaphore::new(workers));
    let mut tasks = tokio::task::JoinSet::new();

    while let Some(report) = receiver.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let reconciler = reconciler.clone();
        let retry = retry.clone();

        tasks.spawn(async move {
            let _permit = permit;
            process_with_retry(reconciler.as_ref(), &report, &retry).await;
        });

        while tasks.try_join_next().is_some() {}
    }

    while tasks.join_next().await.is_some() {}
}

/// Reconcile one report, retrying transient failures.
///
/// Returns whether the report was eventually reconciled.
pub async fn process_with_retry(
    reconciler: &dyn ReportReconciler,
    report: &Report,
    retry: &RetryConfig,
) -> bool {
    let mut attempt = 0;
    loop {
        match reconciler.reconcile(report).await {
            Ok(()) => return true,
            Err(e) if e.is_transient() && retry.should_retry(attempt) => {
                let delay = retry.delay_for_attempt(attempt);
                warn!(
                    report_id = %report.id,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis(),
                    error = %e,
                    "Reconciliation failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                error!(
                    report_id = %report.id,
                    student_id = %report.student_id,
                    attempts = attempt + 1,
                    error = %e,
                    "Reconciliation failed, job dropped"
                );
                return false;
            }
        }
    }
}
