//! Typed read access over an environment sink.
//!
//! Responsibilities:
//! - Parse stored string values into caller-chosen types.
//! - Degrade to a zero value or a caller-supplied default on absence or
//!   parse failure; getters never fail.
//!
//! Does NOT handle:
//! - Writing values (see `parser`).
//! - Fatal type errors; those belong to the struct binder.

use std::str::FromStr;

use crate::sink::EnvSink;

/// Parse the value for `key`, or the type's zero value on absence or
/// parse failure.
///
/// Covers integer, unsigned, and float widths as well as `String`.
pub fn get<T>(sink: &dyn EnvSink, key: &str) -> T
where
    T: FromStr + Default,
{
    get_or(sink, key, T::default())
}

/// Parse the value for `key`, or `default` on absence or parse failure.
pub fn get_or<T: FromStr>(sink: &dyn EnvSink, key: &str, default: T) -> T {
    sink.get(key)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// The value for `key`, or the empty string if unset.
pub fn get_string(sink: &dyn EnvSink, key: &str) -> String {
    sink.get(key).unwrap_or_default()
}

/// The value for `key`, or `default` if unset or empty.
pub fn get_string_or(sink: &dyn EnvSink, key: &str, default: &str) -> String {
    match sink.get(key) {
        Some(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// The boolean value for `key`, or `false` on absence or parse failure.
pub fn get_bool(sink: &dyn EnvSink, key: &str) -> bool {
    get_bool_or(sink, key, false)
}

/// The boolean value for `key`, or `default` on absence or parse failure.
pub fn get_bool_or(sink: &dyn EnvSink, key: &str, default: bool) -> bool {
    sink.get(key)
        .and_then(|value| parse_bool(&value))
        .unwrap_or(default)
}

/// Lenient boolean parsing: accepts `1`, `t`, `T`, `true`, `True`, `TRUE`
/// and their false counterparts.
pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "true" | "True" | "TRUE" => Some(true),
        "0" | "f" | "F" | "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}
