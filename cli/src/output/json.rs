//! JSON output helpers for `--json` mode.

use anyhow::{Context, Result};

use crate::domain::VerifyReport;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format a verification report, adding the derived `passed` flag.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_report(report: &VerifyReport) -> Result<String> {
    let mut value = serde_json::to_value(report).context("JSON serialization failed")?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert("passed".into(), serde_json::Value::Bool(report.passed()));
    }
    serde_json::to_string_pretty(&value).context("JSON serialization failed")
}
