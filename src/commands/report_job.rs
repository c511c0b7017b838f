//! Asynchronous report jobs: start the export, then poll until it is ready.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::ReportBackend;
use crate::error::Result;
use crate::models::ReportJob;
use crate::state::SharedForm;

use super::ReportCommands;

/// Cooperative cancellation flag shared between the page and a poller task.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self { cancelled: Arc::new(AtomicBool::new(false)) }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Running status poller of one report job.
#[derive(Debug)]
pub struct ReportJobHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl ReportJobHandle {
    /// Stop polling. No status response is applied after this returns.
    pub fn cancel(&self) {
        self.token.cancel();
        self.task.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// True once the poller stopped, by success or cancellation.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

/// Poll the job status every `interval` until the job reports success.
///
/// The first check happens one interval after spawning. Failed checks and
/// unfinished states are logged and polling continues. On success the form
/// records the link and the poller cancels itself.
pub fn spawn_status_poller<B: ReportBackend>(
    form: SharedForm,
    backend: Arc<B>,
    job: ReportJob,
    interval: Duration,
) -> ReportJobHandle {
    let token = CancellationToken::new();
    let task = tokio::spawn({
        let token = token.clone();
        async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if token.is_cancelled() {
                    break;
                }
                let status = backend.check_status(&job.report_id, &job.task_id).await;
                if token.is_cancelled() {
                    break;
                }
                match status {
                    Ok(status) => match status.success_link() {
                        Some(link) => {
                            let mut form = form.lock();
                            // Teardown may have run while we waited for the lock
                            if token.is_cancelled() {
                                break;
                            }
                            token.cancel();
                            form.complete_job(&job.task_id, link);
                            log::info!("Report {} ready: {}", job.report_id, link);
                            break;
                        }
                        None => log::debug!("Report task {} state: {}", job.task_id, status.state),
                    },
                    Err(e) => log::debug!("Status check for task {} failed: {}", job.task_id, e),
                }
            }
        }
    });
    ReportJobHandle { token, task }
}

impl ReportCommands {
    /// Start an asynchronous XLSX export of the form's report and poll it.
    ///
    /// Must be called inside a tokio runtime. A failed start leaves no poller.
    pub async fn start_report_job<B: ReportBackend>(
        form: &SharedForm,
        backend: &Arc<B>,
    ) -> Result<String> {
        let (report_id, interval) = {
            let form = form.lock();
            (form.report_id().to_string(), form.settings().poll_interval())
        };

        let handle = match backend.start_xlsx(&report_id).await {
            Ok(handle) => handle,
            Err(e) => {
                log::error!("Failed to start export of report {}: {}", report_id, e);
                return Err(e);
            }
        };
        log::info!("Started export of report {} as task {}", report_id, handle.task_id);

        let job = ReportJob::new(report_id, handle.task_id.clone());
        let mut guard = form.lock();
        let poller = spawn_status_poller(form.clone(), backend.clone(), job.clone(), interval);
        guard.attach_job(job, poller);
        Ok(handle.task_id)
    }
}
