//! Input validation gate for the incoming query

use serde_json::Value;

use crate::domain::errors::ValidationError;

/// Minimum accepted query length, after trimming.
pub const MIN_QUERY_CHARS: usize = 3;
/// Maximum accepted query length, after trimming.
pub const MAX_QUERY_CHARS: usize = 500;

/// Validate the raw `query` field of the request body.
///
/// Trims surrounding whitespace and enforces the `[3, 500]` character
/// bounds. The trimmed string is returned otherwise unmodified: no
/// normalization and no escaping. Downstream callers are responsible
/// for safely parameterizing it in search filters.
pub fn validate_query(raw: Option<&Value>) -> Result<String, ValidationError> {
    let text = match raw {
        Some(Value::String(s)) => s,
        _ => return Err(ValidationError::NotAString),
    };

    let trimmed = text.trim();
    let chars = trimmed.chars().count();
    if chars < MIN_QUERY_CHARS {
        return Err(ValidationError::TooShort);
    }
    if chars > MAX_QUERY_CHARS {
        return Err(ValidationError::TooLong);
    }

    Ok(trimmed.to_string())
}
