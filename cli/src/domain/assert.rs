//! Output assertions.

use crate::domain::error::AssertionFailure;

/// Checks that the output `name` resolved to a non-empty value.
///
/// Whitespace-only values count as empty.
///
/// # Errors
///
/// Returns [`AssertionFailure::EmptyOutput`] when `value` has no visible content.
pub fn assert_non_empty(name: &str, value: &str) -> Result<(), AssertionFailure> {
    if value.trim().is_empty() {
        return Err(AssertionFailure::EmptyOutput(name.to_string()));
    }
    Ok(())
}
