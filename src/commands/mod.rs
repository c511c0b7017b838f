//! Command helpers for async operations + event emission.
//!
//! Each command locks the form to compute a request, releases the lock while
//! the request is in flight, then locks again to apply the response. Rows are
//! re-resolved by formset index and tree nodes by id when the response lands.

pub struct ReportCommands;

mod fields;
mod preview;
pub mod report_job;
mod tree;

pub use report_job::{CancellationToken, ReportJobHandle, spawn_status_poller};
