//! The server side of the report form, as seen by the controller.

use std::future::Future;

use crate::error::Result;
use crate::models::{TaskHandle, TaskStatus};
use crate::state::field_panel::{ChoicesQuery, FieldsQuery};
use crate::state::tree::RelatedQuery;

/// Report-builder endpoints. Fragment-returning calls yield the raw HTML body.
///
/// Non-2xx responses surface as [`crate::error::Error::Server`] carrying the body.
pub trait ReportBackend: Send + Sync + 'static {
    /// `ajax_get_related`: tree nodes for a relation.
    fn related_fields(
        &self,
        query: &RelatedQuery,
    ) -> impl Future<Output = Result<String>> + Send;

    /// `ajax_get_fields`: draggable field tokens for a node.
    fn fields(&self, query: &FieldsQuery) -> impl Future<Output = Result<String>> + Send;

    /// `ajax_get_choices`: `<option>` markup for a field with fixed choices.
    fn choices(&self, query: &ChoicesQuery) -> impl Future<Output = Result<String>> + Send;

    /// `ajax_get_formats`: `<option>` markup of the display formats.
    fn formats(&self) -> impl Future<Output = Result<String>> + Send;

    /// `ajax_preview`: tabular preview of the saved report.
    fn preview(
        &self,
        csrf_token: &str,
        report_id: &str,
    ) -> impl Future<Output = Result<String>> + Send;

    /// `download_xlsx`: start an asynchronous report job.
    fn start_xlsx(&self, report_id: &str) -> impl Future<Output = Result<TaskHandle>> + Send;

    /// `check_status`: state of an asynchronous report job.
    fn check_status(
        &self,
        report_id: &str,
        task_id: &str,
    ) -> impl Future<Output = Result<TaskStatus>> + Send;
}
