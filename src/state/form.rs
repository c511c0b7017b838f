//! Per-page report form session.
//!
//! `ReportForm` owns everything the report page mutates: the field tree, the
//! field panel, both formset tables, the tip and preview areas and the async
//! report job. Handlers take it by reference instead of reaching for globals.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::commands::report_job::ReportJobHandle;
use crate::models::{Aggregate, FieldToken, FilterRowError, FilterType, JobStatus, ReportJob};
use crate::render::{DISPLAY_FIELDS, FILTERS, PREVIEW_SPINNER, preview_error_html};
use crate::state::display_table::DisplayFieldTable;
use crate::state::events::FormEvent;
use crate::state::field_panel::FieldPanel;
use crate::state::filter_table::FilterTable;
use crate::state::settings::ClientSettings;
use crate::state::status::{StatusMessage, Tip};
use crate::state::tree::TreeNavigator;

/// Message shown by the browser when leaving a page with unsaved edits.
pub const LEAVE_PROMPT: &str = "Are you sure you want to leave?";

/// A form shared between handlers and in-flight requests.
pub type SharedForm = Arc<Mutex<ReportForm>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PreviewArea {
    #[default]
    Empty,
    Loading,
    Loaded(String),
    /// Raw response body (or transport error text) of a failed preview.
    Failed(String),
}

impl PreviewArea {
    pub fn html(&self) -> String {
        match self {
            PreviewArea::Empty => String::new(),
            PreviewArea::Loading => PREVIEW_SPINNER.to_string(),
            PreviewArea::Loaded(html) => html.clone(),
            PreviewArea::Failed(body) => preview_error_html(body),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Fields,
    Filters,
    Preview,
}

pub struct ReportForm {
    report_id: String,
    csrf_token: String,
    settings: ClientSettings,

    pub tree: TreeNavigator,
    pub panel: FieldPanel,
    pub display: DisplayFieldTable,
    pub filters: FilterTable,

    active_tab: Tab,
    tip: Option<Tip>,
    preview: PreviewArea,
    status_message: Option<StatusMessage>,

    job: Option<ReportJob>,
    job_handle: Option<ReportJobHandle>,
    navigate_to: Option<String>,

    dirty: bool,
    events: Vec<FormEvent>,
}

impl ReportForm {
    pub fn new(
        report_id: impl Into<String>,
        csrf_token: impl Into<String>,
        settings: ClientSettings,
    ) -> Self {
        Self {
            report_id: report_id.into(),
            csrf_token: csrf_token.into(),
            settings,
            tree: TreeNavigator::new(),
            panel: FieldPanel::default(),
            display: DisplayFieldTable::new(),
            filters: FilterTable::new(),
            active_tab: Tab::Fields,
            tip: None,
            preview: PreviewArea::Empty,
            status_message: None,
            job: None,
            job_handle: None,
            navigate_to: None,
            dirty: false,
            events: Vec::new(),
        }
    }

    /// Form for a page rendered with existing formset rows.
    pub fn with_tables(mut self, display: DisplayFieldTable, filters: FilterTable) -> Self {
        self.display = display;
        self.filters = filters;
        self
    }

    pub fn into_shared(self) -> SharedForm {
        Arc::new(Mutex::new(self))
    }

    /// Page initialization: evaluate every filter row's widget once.
    pub fn initialize(&mut self) {
        self.filters.initialize();
    }

    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    // =========================================================================
    // Drops and row edits
    // =========================================================================

    /// Drop onto the report fields area.
    pub fn on_drop_into_fields(&mut self, token: &FieldToken) -> Option<usize> {
        let index = self.display.on_drop(token)?;
        self.dirty = true;
        self.emit(FormEvent::DisplayRowAdded { index });
        Some(index)
    }

    /// Drop onto the report filters area.
    pub fn on_drop_into_filters(&mut self, token: &FieldToken) -> Option<usize> {
        let drop = self.filters.on_drop(token);
        if let Some(tip) = drop.tip {
            self.show_tip(tip);
        }
        let index = drop.index?;
        self.dirty = true;
        self.emit(FormEvent::FilterRowAdded { index });
        Some(index)
    }

    pub fn on_filter_type_changed(&mut self, index: usize, filter_type: FilterType) -> bool {
        if !self.filters.set_filter_type(index, filter_type) {
            return false;
        }
        self.dirty = true;
        self.emit(FormEvent::FilterTypeChanged { index, filter_type });
        true
    }

    pub fn on_null_check_toggled(&mut self, index: usize, checked: bool) -> bool {
        let toggled = self.filters.set_null_checked(index, checked);
        if toggled {
            self.dirty = true;
        }
        toggled
    }

    /// Typed edit of a filter row's value inputs.
    pub fn set_filter_values(&mut self, index: usize, value: &str, value2: &str) -> bool {
        let Some(row) = self.filters.row_mut(index) else {
            return false;
        };
        row.set_values(value, value2);
        self.on_input_changed(value);
        self.on_input_changed(value2);
        true
    }

    /// Typed edit of a display column heading.
    pub fn set_display_name(&mut self, index: usize, name: &str) -> bool {
        let Some(row) = self.display.row_mut(index) else {
            return false;
        };
        row.name = name.to_string();
        self.on_input_changed(name);
        true
    }

    /// Aggregate select of display row `index`; ignored for rows without one.
    pub fn set_aggregate(&mut self, index: usize, aggregate: Aggregate) -> bool {
        let Some(row) = self.display.row_mut(index).filter(|row| row.aggregate_enabled) else {
            return false;
        };
        row.set_aggregate(aggregate);
        self.dirty = true;
        true
    }

    /// `DELETE` checkbox of display row `index`.
    pub fn mark_display_deleted(&mut self, index: usize, deleted: bool) -> bool {
        let marked = self.display.mark_deleted(index, deleted);
        self.dirty |= marked;
        marked
    }

    /// `DELETE` checkbox of filter row `index`.
    pub fn mark_filter_deleted(&mut self, index: usize, deleted: bool) -> bool {
        let marked = self.filters.mark_deleted(index, deleted);
        self.dirty |= marked;
        marked
    }

    pub fn reorder_display_rows(&mut self, from: usize, to: usize) -> bool {
        let moved = self.display.reorder(from, to);
        if moved {
            self.dirty = true;
            self.emit(FormEvent::DisplayRowsReordered);
        }
        moved
    }

    pub fn reorder_filter_rows(&mut self, from: usize, to: usize) -> bool {
        let moved = self.filters.reorder(from, to);
        if moved {
            self.dirty = true;
            self.emit(FormEvent::FilterRowsReordered);
        }
        moved
    }

    /// Client-side checks of the filter rows before the form is submitted.
    pub fn validate(&self) -> Vec<(usize, FilterRowError)> {
        self.filters.validate(&self.settings.parse_date_format())
    }

    /// Any edit that leaves a non-empty value marks the form as unsaved.
    pub fn on_input_changed(&mut self, value: &str) {
        if !value.is_empty() {
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called after the form was saved.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Prompt to show before navigating away, if there are unsaved edits.
    pub fn leave_prompt(&self) -> Option<&'static str> {
        self.dirty.then_some(LEAVE_PROMPT)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    pub fn display_rows_html(&self) -> String {
        self.display.render_body()
    }

    pub fn filter_rows_html(&self) -> String {
        self.filters.render_body(&self.settings.picker_date_format())
    }

    /// Hidden `TOTAL_FORMS` inputs of both formsets.
    pub fn management_html(&self) -> String {
        [(DISPLAY_FIELDS, self.display.total_forms()), (FILTERS, self.filters.total_forms())]
            .iter()
            .map(|(formset, total)| {
                format!(
                    r#"<input type="hidden" name="{}" id="{}" value="{total}">"#,
                    formset.total_forms_name(),
                    formset.total_forms_id()
                )
            })
            .collect()
    }

    // =========================================================================
    // Tips, tabs, preview
    // =========================================================================

    pub fn show_tip(&mut self, tip: Tip) {
        self.tip = Some(tip);
        self.emit(FormEvent::TipShown(tip));
    }

    /// Clicking an aggregate cell explains how aggregates interact with sorting.
    pub fn show_aggregate_tip(&mut self) {
        self.show_tip(Tip::Aggregate);
    }

    pub fn tip(&self) -> Option<Tip> {
        self.tip
    }

    /// Switch tabs. Returns true when the preview has to be refreshed.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        self.active_tab = tab;
        tab == Tab::Preview
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn preview(&self) -> &PreviewArea {
        &self.preview
    }

    pub fn begin_preview(&mut self) {
        self.preview = PreviewArea::Loading;
    }

    pub fn finish_preview(&mut self, result: crate::error::Result<String>) {
        match result {
            Ok(html) => {
                self.preview = PreviewArea::Loaded(html);
                self.emit(FormEvent::PreviewLoaded);
            }
            Err(err) => {
                let body =
                    err.response_body().map(str::to_string).unwrap_or_else(|| err.to_string());
                self.preview = PreviewArea::Failed(body);
                self.emit(FormEvent::PreviewFailed { error: err.to_string() });
            }
        }
    }

    pub fn set_status_message(&mut self, message: Option<StatusMessage>) {
        self.status_message = message;
    }

    pub fn status_message(&self) -> Option<&StatusMessage> {
        self.status_message.as_ref()
    }

    // =========================================================================
    // Async report job
    // =========================================================================

    pub fn job(&self) -> Option<&ReportJob> {
        self.job.as_ref()
    }

    /// Track a newly started job, cancelling any poller still running.
    pub fn attach_job(&mut self, job: ReportJob, handle: ReportJobHandle) {
        if let Some(previous) = self.job_handle.take() {
            previous.cancel();
        }
        let task_id = job.task_id.clone();
        self.job = Some(job);
        self.job_handle = Some(handle);
        self.emit(FormEvent::ReportJobStarted { task_id });
    }

    /// Record the delivered link of job `task_id`. Returns false for stale jobs.
    pub fn complete_job(&mut self, task_id: &str, link: &str) -> bool {
        let Some(job) = self.job.as_mut().filter(|job| job.task_id == task_id) else {
            return false;
        };
        if job.is_ready() {
            return false;
        }
        job.status = JobStatus::Ready { link: link.to_string() };
        self.navigate_to = Some(link.to_string());
        self.emit(FormEvent::ReportReady { link: link.to_string() });
        true
    }

    /// Link the browser should navigate to, once a report job delivered.
    pub fn navigate_to(&self) -> Option<&str> {
        self.navigate_to.as_deref()
    }

    pub fn job_handle(&self) -> Option<&ReportJobHandle> {
        self.job_handle.as_ref()
    }

    /// Page teardown: stop the poller.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.job_handle.take() {
            handle.cancel();
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub fn emit(&mut self, event: FormEvent) {
        self.update_status_from_event(&event);
        self.events.push(event);
    }

    fn update_status_from_event(&mut self, event: &FormEvent) {
        match event {
            FormEvent::TreeExpandFailed { error, .. } => {
                self.set_status_message(Some(StatusMessage::error(format!(
                    "Failed to load related fields: {error}"
                ))));
            }
            FormEvent::FieldsLoaded { count, .. } => {
                self.set_status_message(Some(StatusMessage::info(format!("Loaded {count} fields"))));
            }
            FormEvent::PreviewFailed { error } => {
                self.set_status_message(Some(StatusMessage::error(format!(
                    "Preview failed: {error}"
                ))));
            }
            FormEvent::ReportJobStarted { .. } => {
                self.set_status_message(Some(StatusMessage::info("Generating report...")));
            }
            FormEvent::ReportReady { .. } => {
                self.set_status_message(Some(StatusMessage::info("Report ready")));
            }
            _ => {}
        }
    }

    /// Drain the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<FormEvent> {
        std::mem::take(&mut self.events)
    }

    /// Escaped tip markup for the tip area.
    pub fn tip_html(&self) -> String {
        self.tip.map(|tip| tip.html().to_string()).unwrap_or_default()
    }
}
