//! Report-builder server access.
//!
//! This module provides:
//! - `ReportBackend`: the endpoints the form calls, as an async trait
//! - `HttpBackend`: the `reqwest` implementation
//! - `endpoints`: path prefix derivation, endpoint paths and request parameters

pub mod backend;
pub mod endpoints;
pub mod http;

pub use backend::ReportBackend;
pub use endpoints::{APP_ROOT, Endpoint, derive_path_prefix};
pub use http::HttpBackend;
