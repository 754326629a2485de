//! Binding resolved values onto structured records.
//!
//! Responsibilities:
//! - Walk a record's declared fields and assign values from the sink.
//! - Fall back to per-field default text when the source key is absent.
//! - Run named validators on assigned values.
//!
//! Does NOT handle:
//! - Parsing `.env` files (see `parser`); the sink is assumed populated.
//! - Lenient degradation; a field that fails to parse is a fatal error
//!   naming the field (contrast with `getter`).
//!
//! Invariants / Assumptions:
//! - Field kinds form a closed set; there is no open-ended type
//!   inspection, so "unsupported field kind" cannot arise at runtime.
//! - A validator tag with no registered validator is skipped.
//! - Validators run only when a value was assigned (from the sink or
//!   from default text), never on fields left at their prior value.

use std::collections::HashMap;

use crate::error::BindError;
use crate::getter::parse_bool;
use crate::sink::EnvSink;

/// Where a field's parsed value lands.
///
/// One variant per supported field kind, with nested records recursing
/// through [`Bind`].
pub enum FieldKind<'a> {
    Str(&'a mut String),
    Int(&'a mut i64),
    Uint(&'a mut u64),
    Bool(&'a mut bool),
    Float(&'a mut f64),
    Nested(&'a mut dyn Bind),
}

/// One bindable field: its source key, optional default text, optional
/// validator name, and assignment target.
pub struct Field<'a> {
    /// Field name used in error messages.
    pub name: &'static str,
    /// Key looked up in the sink. Ignored for nested records.
    pub key: &'static str,
    /// Literal text parsed and assigned when the key is absent.
    pub default: Option<&'static str>,
    /// Name of a validator registered in [`BindOptions`].
    pub validator: Option<&'static str>,
    /// Assignment target.
    pub kind: FieldKind<'a>,
}

impl<'a> Field<'a> {
    /// Describe a field bound to `key`.
    pub fn new(name: &'static str, key: &'static str, kind: FieldKind<'a>) -> Self {
        Self {
            name,
            key,
            default: None,
            validator: None,
            kind,
        }
    }

    /// Describe a nested record; its own fields declare their keys.
    pub fn nested(name: &'static str, record: &'a mut dyn Bind) -> Self {
        Self::new(name, "", FieldKind::Nested(record))
    }

    /// Default text assigned when the source key is absent.
    pub fn with_default(mut self, text: &'static str) -> Self {
        self.default = Some(text);
        self
    }

    /// Validator to run on the assigned value.
    pub fn with_validator(mut self, name: &'static str) -> Self {
        self.validator = Some(name);
        self
    }
}

/// A record whose fields can be bound from an environment sink.
pub trait Bind {
    /// The record's fields, with mutable assignment targets.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// A field's value as seen by validators.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Uint(u64),
    Bool(bool),
    Float(f64),
}

/// A named validation hook over an assigned field value.
pub type Validator = Box<dyn Fn(&FieldValue) -> Result<(), String>>;

/// Options for [`bind_with`]: a registry of named validators.
#[derive(Default)]
pub struct BindOptions {
    validators: HashMap<String, Validator>,
}

impl BindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a validator under `name`.
    pub fn with_validator(mut self, name: impl Into<String>, validator: Validator) -> Self {
        self.validators.insert(name.into(), validator);
        self
    }
}

/// Bind values from `sink` onto `record` with no validators.
pub fn bind(sink: &dyn EnvSink, record: &mut dyn Bind) -> Result<(), BindError> {
    bind_with(sink, record, &BindOptions::default())
}

/// Bind values from `sink` onto `record`.
///
/// Per field: a nested record recurses; otherwise a present key parses
/// and assigns, absent keys fall back to default text, and fields with
/// neither keep their prior value. Parse failures of either source are
/// fatal and name the field.
pub fn bind_with(
    sink: &dyn EnvSink,
    record: &mut dyn Bind,
    opts: &BindOptions,
) -> Result<(), BindError> {
    for field in record.fields() {
        apply_field(sink, field, opts)?;
    }
    Ok(())
}

fn apply_field(sink: &dyn EnvSink, field: Field<'_>, opts: &BindOptions) -> Result<(), BindError> {
    let Field {
        name,
        key,
        default,
        validator,
        kind,
    } = field;

    match kind {
        FieldKind::Nested(nested) => bind_with(sink, nested, opts),
        scalar => {
            let text = match sink.get(key) {
                Some(value) => value,
                None => match default {
                    Some(text) => text.to_string(),
                    None => return Ok(()),
                },
            };

            let assigned = assign(scalar, &text).map_err(|message| BindError::InvalidField {
                field: name.to_string(),
                message,
            })?;

            if let Some(tag) = validator
                && let Some(validate) = opts.validators.get(tag)
            {
                validate(&assigned).map_err(|message| BindError::Validation {
                    field: name.to_string(),
                    message,
                })?;
            }

            Ok(())
        }
    }
}

/// Parse `text` into the field's kind and assign it, returning the value
/// for validators.
fn assign(kind: FieldKind<'_>, text: &str) -> Result<FieldValue, String> {
    match kind {
        FieldKind::Str(slot) => {
            *slot = text.to_string();
            Ok(FieldValue::Str(text.to_string()))
        }
        FieldKind::Int(slot) => {
            let value: i64 = text
                .parse()
                .map_err(|e| format!("invalid integer {text:?}: {e}"))?;
            *slot = value;
            Ok(FieldValue::Int(value))
        }
        FieldKind::Uint(slot) => {
            let value: u64 = text
                .parse()
                .map_err(|e| format!("invalid unsigned integer {text:?}: {e}"))?;
            *slot = value;
            Ok(FieldValue::Uint(value))
        }
        FieldKind::Bool(slot) => {
            let value =
                parse_bool(text).ok_or_else(|| format!("invalid boolean {text:?}"))?;
            *slot = value;
            Ok(FieldValue::Bool(value))
        }
        FieldKind::Float(slot) => {
            let value: f64 = text
                .parse()
                .map_err(|e| format!("invalid float {text:?}: {e}"))?;
            *slot = value;
            Ok(FieldValue::Float(value))
        }
        FieldKind::Nested(_) => Err("nested records carry no scalar value".to_string()),
    }
}
