//! Client settings with persistence.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::endpoints::derive_path_prefix;
use crate::helpers::format::{chrono_date_format, javascript_date_format};

pub const BASE_URL_ENV: &str = "REPORT_BUILDER_BASE_URL";
pub const PAGE_PATH_ENV: &str = "REPORT_BUILDER_PAGE_PATH";

/// Connection and widget settings for one report-builder server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the report page; everything before `/report_builder` becomes the
    /// prefix of every endpoint.
    #[serde(default)]
    pub page_path: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Server-side date input format, e.g. `Y-m-d`.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_path: String::new(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            date_format: default_date_format(),
        }
    }
}

impl ClientSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn path_prefix(&self) -> &str {
        derive_path_prefix(&self.page_path)
    }

    /// Date-picker format string.
    pub fn picker_date_format(&self) -> String {
        javascript_date_format(&self.date_format)
    }

    /// chrono format string used to validate date filter values.
    pub fn parse_date_format(&self) -> String {
        chrono_date_format(&self.date_format)
    }

    /// Apply `REPORT_BUILDER_BASE_URL` / `REPORT_BUILDER_PAGE_PATH` when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV)
            && !base_url.trim().is_empty()
        {
            self.base_url = base_url.trim().to_string();
        }
        if let Ok(page_path) = std::env::var(PAGE_PATH_ENV) {
            self.page_path = page_path.trim().to_string();
        }
        self
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("report-builder-ui/{}", env!("CARGO_PKG_VERSION"))
}

fn default_date_format() -> String {
    "Y-m-d".to_string()
}
