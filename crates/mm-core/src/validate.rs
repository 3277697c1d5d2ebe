//! Guards for string values spliced into generated SQL.

use crate::error::{CoreError, CoreResult};

/// Reject any value that differs from its trimmed form.
///
/// `None` entries are skipped. Menu lookups match on names, so a stray space
/// would silently miss the row instead of failing.
pub fn validate(values: &[Option<&str>]) -> CoreResult<()> {
    for value in values.iter().flatten() {
        if value.trim() != *value {
            return Err(CoreError::PaddedValue {
                value: (*value).to_string(),
            });
        }
    }
    Ok(())
}
