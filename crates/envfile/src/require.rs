//! Required-keys checking over an environment sink.

use crate::error::RequireError;
use crate::sink::EnvSink;

/// Check that every key in `keys` has a non-empty value in `sink`.
///
/// # Errors
///
/// Returns a [`RequireError`] naming all keys whose value is unset or
/// empty, in request order.
pub fn require(sink: &dyn EnvSink, keys: &[&str]) -> Result<(), RequireError> {
    let missing: Vec<String> = keys
        .iter()
        .filter(|key| sink.get(key).is_none_or(|value| value.is_empty()))
        .map(|key| key.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(RequireError { missing })
    }
}
