// Data structures and types

pub mod display_field;
pub mod field_token;
pub mod filter_field;
pub mod report_job;
pub mod select_option;
mod tree_node_id;

pub use display_field::{Aggregate, DisplayFieldRow};
pub use field_token::{FieldToken, parse_field_tokens};
pub use filter_field::{FilterRow, FilterRowError, FilterType, ValueInput};
pub use report_job::{JobStatus, ReportJob, TaskHandle, TaskStatus};
pub use select_option::{SelectOption, parse_options};
pub use tree_node_id::TreeNodeId;
