pub mod format;

pub use format::{chrono_date_format, javascript_date_format};
