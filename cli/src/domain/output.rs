//! Decoding of `terraform output -json <name>` payloads.

use crate::domain::error::ProvisionError;

/// Turns the JSON printed by `terraform output -json <name>` into a string.
///
/// Strings come back unquoted, `null` means the output is not defined, and any
/// other value (list, map, number, bool) is returned as compact JSON text.
///
/// # Errors
///
/// Returns [`ProvisionError::OutputUndefined`] for `null` and
/// [`ProvisionError::OutputParse`] when stdout is not JSON.
pub fn decode_output(name: &str, stdout: &[u8]) -> Result<String, ProvisionError> {
    let value: serde_json::Value =
        serde_json::from_slice(stdout).map_err(|e| ProvisionError::OutputParse {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
    match value {
        serde_json::Value::Null => Err(ProvisionError::OutputUndefined(name.to_string())),
        serde_json::Value::String(s) => Ok(s),
        other => Ok(other.to_string()),
    }
}
