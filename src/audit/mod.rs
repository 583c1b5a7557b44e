//! Audit module
//!
//! Append-only access log and per-user conflict reporting.

pub mod log;
pub mod report;

pub use log::{AccessLog, AccessLogEntry};
pub use report::ConflictReport;
