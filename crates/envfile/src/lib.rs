//! `.env`-style configuration loading.
//!
//! This crate parses key/value configuration files into an environment
//! store, supporting quoting, escaping, multi-line values, inline
//! comments, an `export` prefix, and shell-style variable substitution
//! with default-value fallback (`$VAR`, `${VAR}`, `${VAR:-default}`,
//! `${VAR-default}`).
//!
//! The store is an explicit [`EnvSink`] passed by reference: production
//! code typically uses [`ProcessEnv`] (the real process environment),
//! while tests and embedders use an isolated [`MapSink`]. On top of the
//! resolved pairs sit typed getters ([`get`], [`get_or`], ...), a struct
//! binder ([`bind`]) with validator hooks, and a required-keys checker
//! ([`require`]).
//!
//! ```
//! use envfile::{EnvSink, MapSink, parse_str};
//!
//! let mut sink = MapSink::new();
//! parse_str("DB_HOST=localhost\nURL=http://$DB_HOST:8080\n", &mut sink).unwrap();
//! assert_eq!(sink.get("URL").as_deref(), Some("http://localhost:8080"));
//! ```
//!
//! Parse runs are synchronous and assume exclusive access to the sink;
//! callers sharing a sink across threads serialize runs themselves.

mod binder;
mod error;
mod getter;
mod parser;
mod require;
mod sink;

pub use binder::{Bind, BindOptions, Field, FieldKind, FieldValue, Validator, bind, bind_with};
pub use error::{BindError, ParseError, RequireError};
pub use getter::{get, get_bool, get_bool_or, get_or, get_string, get_string_or};
pub use parser::{parse, parse_path, parse_reader, parse_str};
pub use require::require;
pub use sink::{EnvSink, MapSink, ProcessEnv};
