//! `.env` file parsing pipeline.
//!
//! Responsibilities:
//! - Provide the parse entry points (`parse`, `parse_path`, `parse_reader`,
//!   `parse_str`).
//! - Drive each logical line through value processing and substitution,
//!   then write the result into the sink, in file order.
//!
//! Does NOT handle:
//! - Typed access to stored values (see `getter`).
//! - Struct binding or required-key checks (see `binder`, `require`).
//!
//! Invariants / Assumptions:
//! - Each line's write is visible to subsequent lines' substitutions
//!   within the same run.
//! - Lines assigned before a failing line remain applied.
//! - Log lines carry keys and line numbers only, never values.

mod reader;
mod subst;
mod value;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::ParseError;
use crate::sink::{EnvSink, ProcessEnv};
use reader::LineReader;

/// Parse the `.env` file at `path` into the process environment.
///
/// Later duplicate keys overwrite earlier ones, and a later line's
/// `${EARLIER_KEY}` sees the value an earlier line assigned in the same
/// run. Callers must serialize runs against the process environment.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be opened or read, and
/// [`ParseError::LineFormat`] for a non-blank, non-comment line with no
/// `=` or an empty key.
pub fn parse(path: impl AsRef<Path>) -> Result<(), ParseError> {
    parse_path(path, &mut ProcessEnv)
}

/// Parse the `.env` file at `path` into `sink`.
pub fn parse_path(path: impl AsRef<Path>, sink: &mut dyn EnvSink) -> Result<(), ParseError> {
    let file = File::open(path.as_ref())?;
    parse_reader(BufReader::new(file), sink)
}

/// Parse `.env` text from a buffered reader into `sink`.
pub fn parse_reader(reader: impl BufRead, sink: &mut dyn EnvSink) -> Result<(), ParseError> {
    run(LineReader::new(reader.lines()), sink)
}

/// Parse in-memory `.env` text into `sink`.
pub fn parse_str(text: &str, sink: &mut dyn EnvSink) -> Result<(), ParseError> {
    run(
        LineReader::new(text.lines().map(|line| Ok(line.to_string()))),
        sink,
    )
}

fn run<I>(lines: LineReader<I>, sink: &mut dyn EnvSink) -> Result<(), ParseError>
where
    I: Iterator<Item = io::Result<String>>,
{
    for logical in lines {
        let logical = logical?;
        let processed = value::process(&logical.raw_value);
        let resolved = subst::resolve(&processed, sink);
        tracing::debug!(
            key = %logical.key,
            line = logical.line_number,
            "assigned environment value"
        );
        sink.set(&logical.key, &resolved);
    }
    Ok(())
}
