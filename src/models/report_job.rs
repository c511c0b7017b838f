//! Asynchronous report generation jobs.

use serde::Deserialize;

/// Terminal state name reported by `check_status`.
pub const SUCCESS_STATE: &str = "SUCCESS";

/// Response of `download_xlsx`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskHandle {
    pub task_id: String,
}

/// Response of `check_status`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskStatus {
    pub state: String,
    #[serde(default)]
    pub link: Option<String>,
}

impl TaskStatus {
    /// Delivered link, once the task finished successfully.
    pub fn success_link(&self) -> Option<&str> {
        if self.state == SUCCESS_STATE { self.link.as_deref() } else { None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Ready { link: String },
}

/// A downloadable report being generated server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportJob {
    pub report_id: String,
    pub task_id: String,
    pub status: JobStatus,
}

impl ReportJob {
    pub fn new(report_id: impl Into<String>, task_id: impl Into<String>) -> Self {
        Self { report_id: report_id.into(), task_id: task_id.into(), status: JobStatus::Pending }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.status, JobStatus::Ready { .. })
    }
}
