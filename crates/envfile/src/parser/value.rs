//! Raw value normalization: quote extraction, escape decoding, and
//! inline-comment stripping.
//!
//! Responsibilities:
//! - Decide quoted-vs-bare for a raw value and decode accordingly.
//! - Decode `\n`, `\t`, `\r`, `\\`, and `\<quote>` escapes inside quotes.
//! - Strip inline comments and trim unquoted values.
//!
//! Does NOT handle:
//! - Multi-line assembly (see `reader.rs`; embedded newlines arrive here
//!   as ordinary characters).
//! - Variable substitution (see `subst.rs`).
//!
//! Invariants / Assumptions:
//! - `process` is pure and infallible; the worst case is an empty or
//!   partial string.
//! - Quoted content is never trimmed and `#` inside quotes is data.

/// Scanning state for quote and escape handling.
///
/// `Escaped` means the previous character was a backslash; the next
/// character is consumed as part of the escape pair and never treated as
/// a closing quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanState {
    Normal,
    Escaped,
}

/// Normalize a raw value: decode a quoted span or strip comments and trim.
pub(crate) fn process(raw: &str) -> String {
    let inspect = raw.trim_start();
    match inspect.chars().next() {
        Some(quote @ ('"' | '\'')) => extract_quoted(inspect, quote),
        _ => strip_inline_comment(raw).trim().to_string(),
    }
}

/// Extract the content between `quote` and the next unescaped `quote`,
/// decoding escapes as it goes.
///
/// `s` must start with the opening quote. An unclosed quote returns
/// everything collected up to end of input.
fn extract_quoted(s: &str, quote: char) -> String {
    let mut out = String::with_capacity(s.len());
    let mut state = ScanState::Normal;

    for ch in s.chars().skip(1) {
        match state {
            ScanState::Escaped => {
                match ch {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    '\\' => out.push('\\'),
                    c if c == quote => out.push(quote),
                    other => {
                        // Unknown escape: keep the backslash and the character.
                        out.push('\\');
                        out.push(other);
                    }
                }
                state = ScanState::Normal;
            }
            ScanState::Normal if ch == '\\' => state = ScanState::Escaped,
            ScanState::Normal if ch == quote => return out,
            ScanState::Normal => out.push(ch),
        }
    }

    out
}

/// Truncate at the first `#` that starts the value or follows whitespace.
/// A `#` glued to a non-whitespace character is data.
fn strip_inline_comment(s: &str) -> &str {
    let mut after_space = true;
    for (i, ch) in s.char_indices() {
        if ch == '#' && after_space {
            return &s[..i];
        }
        after_space = ch.is_whitespace();
    }
    s
}
