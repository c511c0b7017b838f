//! Common test utilities for integration tests.
//!
//! `FakeBackend` is an in-memory report-builder server: it records every call
//! and answers from canned replies that a test can swap at any time. The
//! `server` module runs a tiny HTTP server for exercising `HttpBackend`.

#![allow(dead_code)]

pub mod fixtures;
pub mod server;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use report_builder_ui::api::ReportBackend;
use report_builder_ui::error::{Error, Result};
use report_builder_ui::models::{TaskHandle, TaskStatus};
use report_builder_ui::state::{
    ChoicesQuery, ClientSettings, FieldsQuery, RelatedQuery, ReportForm, SharedForm,
};

/// Canned reply: a body, or a non-2xx status with its body.
pub type Reply = std::result::Result<String, (u16, String)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Related(RelatedQuery),
    Fields(FieldsQuery),
    Choices(ChoicesQuery),
    Formats,
    Preview { csrf_token: String, report_id: String },
    StartXlsx { report_id: String },
    CheckStatus { report_id: String, task_id: String },
}

pub struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    related: Mutex<Reply>,
    fields: Mutex<Reply>,
    choices: Mutex<Reply>,
    formats: Mutex<Reply>,
    preview: Mutex<Reply>,
    start: Mutex<Reply>,
    /// Replies of successive status checks; `PENDING` once exhausted.
    statuses: Mutex<VecDeque<Reply>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            related: Mutex::new(Ok(fixtures::RELATED_FRAGMENT.to_string())),
            fields: Mutex::new(Ok(fixtures::FIELDS_FRAGMENT.to_string())),
            choices: Mutex::new(Ok(fixtures::CHOICES_FRAGMENT.to_string())),
            formats: Mutex::new(Ok(fixtures::FORMATS_FRAGMENT.to_string())),
            preview: Mutex::new(Ok(fixtures::PREVIEW_TABLE.to_string())),
            start: Mutex::new(Ok("task-1".to_string())),
            statuses: Mutex::new(VecDeque::new()),
        }
    }
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_related(&self, reply: Reply) {
        *self.related.lock() = reply;
    }

    pub fn set_fields(&self, reply: Reply) {
        *self.fields.lock() = reply;
    }

    pub fn set_formats(&self, reply: Reply) {
        *self.formats.lock() = reply;
    }

    pub fn set_preview(&self, reply: Reply) {
        *self.preview.lock() = reply;
    }

    pub fn set_start(&self, reply: Reply) {
        *self.start.lock() = reply;
    }

    /// Queue status replies, as `check_status` JSON bodies or failures.
    pub fn push_statuses(&self, replies: impl IntoIterator<Item = Reply>) {
        self.statuses.lock().extend(replies);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| matches(call)).count()
    }

    pub fn status_checks(&self) -> usize {
        self.count(|call| matches!(call, Call::CheckStatus { .. }))
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

fn answer(reply: &Mutex<Reply>) -> Result<String> {
    reply.lock().clone().map_err(|(status, body)| Error::Server { status, body })
}

impl ReportBackend for FakeBackend {
    async fn related_fields(&self, query: &RelatedQuery) -> Result<String> {
        self.record(Call::Related(query.clone()));
        answer(&self.related)
    }

    async fn fields(&self, query: &FieldsQuery) -> Result<String> {
        self.record(Call::Fields(query.clone()));
        answer(&self.fields)
    }

    async fn choices(&self, query: &ChoicesQuery) -> Result<String> {
        self.record(Call::Choices(query.clone()));
        answer(&self.choices)
    }

    async fn formats(&self) -> Result<String> {
        self.record(Call::Formats);
        answer(&self.formats)
    }

    async fn preview(&self, csrf_token: &str, report_id: &str) -> Result<String> {
        self.record(Call::Preview {
            csrf_token: csrf_token.to_string(),
            report_id: report_id.to_string(),
        });
        answer(&self.preview)
    }

    async fn start_xlsx(&self, report_id: &str) -> Result<TaskHandle> {
        self.record(Call::StartXlsx { report_id: report_id.to_string() });
        answer(&self.start).map(|task_id| TaskHandle { task_id })
    }

    async fn check_status(&self, report_id: &str, task_id: &str) -> Result<TaskStatus> {
        self.record(Call::CheckStatus {
            report_id: report_id.to_string(),
            task_id: task_id.to_string(),
        });
        let reply = self.statuses.lock().pop_front();
        let body = match reply {
            Some(Ok(body)) => body,
            Some(Err((status, body))) => return Err(Error::Server { status, body }),
            None => r#"{"state":"PENDING"}"#.to_string(),
        };
        Ok(serde_json::from_str(&body)?)
    }
}

/// Settings with a short poll interval, for job tests.
pub fn fast_settings() -> ClientSettings {
    ClientSettings { poll_interval_ms: 10, ..ClientSettings::default() }
}

pub fn shared_form(report_id: &str) -> SharedForm {
    ReportForm::new(report_id, "csrf-token", fast_settings()).into_shared()
}

/// Await `condition` for up to two seconds.
pub async fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
