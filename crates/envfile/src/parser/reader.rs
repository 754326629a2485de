//! Logical-line assembly over a physical line stream.
//!
//! Responsibilities:
//! - Skip blank lines and full-line comments.
//! - Strip the `export` prefix when followed by whitespace.
//! - Split key from raw value at the first `=` and validate the key.
//! - Absorb multi-line quoted values and backslash continuations into a
//!   single logical line.
//!
//! Does NOT handle:
//! - Quote/escape decoding or comment stripping of the value text
//!   (see `value.rs`).
//! - Variable substitution (see `subst.rs`).
//!
//! Invariants / Assumptions:
//! - A logical line's `line_number` is the 1-based physical line it
//!   started on.
//! - End-of-file inside a quoted span or a continuation run is lenient:
//!   the accumulated text is yielded without error.

use std::io;

use super::value::ScanState;
use crate::error::ParseError;

/// One key/value unit, possibly assembled from several physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogicalLine {
    /// 1-based physical line the unit started on.
    pub(crate) line_number: usize,
    /// Trimmed, non-empty key text.
    pub(crate) key: String,
    /// Everything after `=`, still quoted/escaped; may contain embedded
    /// newlines from multi-line assembly.
    pub(crate) raw_value: String,
}

/// Iterator turning physical lines into [`LogicalLine`] records.
pub(crate) struct LineReader<I> {
    lines: I,
    line_number: usize,
}

impl<I> LineReader<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub(crate) fn new(lines: I) -> Self {
        Self {
            lines,
            line_number: 0,
        }
    }

    fn next_physical(&mut self) -> Option<io::Result<String>> {
        let line = self.lines.next()?;
        self.line_number += 1;
        Some(line)
    }

    /// Absorb continuation lines into the raw value when needed.
    fn assemble_value(&mut self, raw: &str) -> Result<String, ParseError> {
        let inspect = raw.trim_start();
        if let Some(quote @ ('"' | '\'')) = inspect.chars().next() {
            let open = raw.len() - inspect.len();
            if contains_unescaped(&raw[open + 1..], quote) {
                return Ok(raw.to_string());
            }
            return self.assemble_quoted(raw, quote);
        }
        self.assemble_continued(raw)
    }

    /// Append physical lines, joined with `\n`, until one contains an
    /// unescaped closing quote or input ends.
    fn assemble_quoted(&mut self, first: &str, quote: char) -> Result<String, ParseError> {
        let start = self.line_number;
        let mut value = first.to_string();
        loop {
            let Some(next) = self.next_physical() else {
                tracing::warn!(
                    line = start,
                    "unterminated quote at end of input; keeping partial value"
                );
                break;
            };
            let next = next?;
            value.push('\n');
            let closed = contains_unescaped(&next, quote);
            value.push_str(&next);
            if closed {
                break;
            }
        }
        Ok(value)
    }

    /// Join backslash-continued lines with no separator until the
    /// accumulated text no longer ends with an unescaped backslash.
    fn assemble_continued(&mut self, first: &str) -> Result<String, ParseError> {
        let mut value = first.to_string();
        loop {
            let trimmed = value.trim_end();
            if !ends_with_unescaped_backslash(trimmed) {
                break;
            }
            // Drop the continuation backslash along with trailing whitespace.
            value.truncate(trimmed.len() - 1);
            let Some(next) = self.next_physical() else {
                break;
            };
            value.push_str(&next?);
        }
        Ok(value)
    }
}

impl<I> Iterator for LineReader<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<LogicalLine, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.next_physical()? {
                Ok(line) => line,
                Err(e) => return Some(Err(ParseError::Io(e))),
            };

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let line = strip_export_prefix(&line);

            let Some(eq) = line.find('=') else {
                return Some(Err(ParseError::LineFormat {
                    line: self.line_number,
                }));
            };
            let key = line[..eq].trim();
            if key.is_empty() {
                return Some(Err(ParseError::LineFormat {
                    line: self.line_number,
                }));
            }

            let key = key.to_string();
            let line_number = self.line_number;
            let raw_value = match self.assemble_value(&line[eq + 1..]) {
                Ok(value) => value,
                Err(e) => return Some(Err(e)),
            };

            return Some(Ok(LogicalLine {
                line_number,
                key,
                raw_value,
            }));
        }
    }
}

/// Strip a leading `export` token: exact lowercase literal followed by at
/// least one whitespace character. `EXPORT=1` and `exportKEY=1` pass
/// through untouched.
fn strip_export_prefix(line: &str) -> &str {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix("export")
        && rest.starts_with(char::is_whitespace)
    {
        return rest.trim_start();
    }
    line
}

/// Whether `s` contains `quote` outside an escape pair.
fn contains_unescaped(s: &str, quote: char) -> bool {
    let mut state = ScanState::Normal;
    for ch in s.chars() {
        match state {
            ScanState::Escaped => state = ScanState::Normal,
            ScanState::Normal if ch == '\\' => state = ScanState::Escaped,
            ScanState::Normal if ch == quote => return true,
            ScanState::Normal => {}
        }
    }
    false
}

/// Whether `s` ends in a backslash that is not itself escaped, i.e. the
/// trailing backslash run has odd length.
fn ends_with_unescaped_backslash(s: &str) -> bool {
    s.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}
