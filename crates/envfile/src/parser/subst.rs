//! Shell-style variable substitution with default-value fallback.
//!
//! Responsibilities:
//! - Rewrite `$IDENT`, `${IDENT}`, `${IDENT:-default}`, and
//!   `${IDENT-default}` references against the current sink state.
//! - Resolve default expressions recursively; defaults may themselves
//!   contain references and literal `{`/`}` pairs.
//!
//! Does NOT handle:
//! - Command substitution, arithmetic expansion, or arrays.
//! - Sink mutation; resolution is read-only.
//!
//! Invariants / Assumptions:
//! - Unset variables resolve to the empty string; resolution never fails.
//! - `:-` is checked before `-`, so `${VAR:-x}` never takes the
//!   unset-only branch.

use crate::sink::EnvSink;

/// Resolve every `$`-reference in `value` against `sink`.
pub(crate) fn resolve(value: &str, sink: &dyn EnvSink) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        match after.bytes().next() {
            Some(b'{') => match braced_body(after) {
                Some((body, consumed)) => {
                    out.push_str(&resolve_braced(body, sink));
                    rest = &after[consumed..];
                }
                None => {
                    // No matching close brace: the `$` is literal.
                    out.push('$');
                    rest = after;
                }
            },
            Some(b) if b == b'_' || b.is_ascii_alphabetic() => {
                let end = after
                    .bytes()
                    .position(|b| !(b.is_ascii_alphanumeric() || b == b'_'))
                    .unwrap_or(after.len());
                if let Some(value) = sink.get(&after[..end]) {
                    out.push_str(&value);
                }
                rest = &after[end..];
            }
            // `$` at end of input, or before whitespace/digits/punctuation.
            _ => {
                out.push('$');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Extract the body of a braced reference by brace-depth counting.
///
/// `after` starts at the opening `{`. Returns the body between the braces
/// and the number of bytes consumed including both braces, or `None` when
/// no matching close brace exists.
fn braced_body(after: &str) -> Option<(&str, usize)> {
    let mut depth = 0usize;
    for (i, b) in after.bytes().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&after[1..i], i + 1));
                }
            }
            _ => {}
        }
    }
    None
}

/// Interpret a braced body: `name:-default`, `name-default`, or bare name.
fn resolve_braced(body: &str, sink: &dyn EnvSink) -> String {
    if let Some((name, default)) = body.split_once(":-") {
        // Unset-or-empty fallback.
        return match sink.get(name) {
            Some(value) if !value.is_empty() => value,
            _ => resolve(default, sink),
        };
    }
    if let Some((name, default)) = body.split_once('-') {
        // Unset-only fallback: an empty value counts as set.
        return match sink.get(name) {
            Some(value) => value,
            None => resolve(default, sink),
        };
    }
    sink.get(body).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MapSink;

    fn sink(pairs: &[(&str, &str)]) -> MapSink {
        pairs.iter().copied().collect()
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(
            resolve("https://api.example.com", &MapSink::new()),
            "https://api.example.com"
        );
    }

    #[test]
    fn bare_reference_is_replaced() {
        let env = sink(&[("API_URL", "https://api.example.com")]);
        assert_eq!(resolve("$API_URL/v1", &env), "https://api.example.com/v1");
    }

    #[test]
    fn bare_reference_at_end_of_string() {
        let env = sink(&[("ENV", "production")]);
        assert_eq!(resolve("app_$ENV", &env), "app_production");
    }

    #[test]
    fn bare_reference_consumes_longest_identifier_run() {
        let env = sink(&[("VAR", "value"), ("VAR_suffix", "replaced")]);
        assert_eq!(resolve("prefix_$VAR_suffix", &env), "prefix_replaced");
    }

    #[test]
    fn braced_reference_delimits_concatenation() {
        let env = sink(&[("VAR", "value")]);
        assert_eq!(resolve("prefix_${VAR}_suffix", &env), "prefix_value_suffix");
    }

    #[test]
    fn mixed_forms_in_one_value() {
        let env = sink(&[("START", "a"), ("MIDDLE", "b"), ("END", "c")]);
        assert_eq!(resolve("$START/${MIDDLE}/$END", &env), "a/b/c");
    }

    #[test]
    fn unset_variables_resolve_to_empty() {
        let env = MapSink::new();
        assert_eq!(resolve("value_${UNDEFINED}", &env), "value_");
        assert_eq!(resolve("value_$UNDEFINED", &env), "value_");
    }

    #[test]
    fn dollar_before_space_is_literal() {
        assert_eq!(resolve("$ not_a_var", &MapSink::new()), "$ not_a_var");
    }

    #[test]
    fn dollar_before_digit_is_literal() {
        assert_eq!(resolve("$123invalid", &MapSink::new()), "$123invalid");
    }

    #[test]
    fn dollar_at_end_of_input_is_literal() {
        assert_eq!(resolve("price$", &MapSink::new()), "price$");
    }

    #[test]
    fn unmatched_open_brace_leaves_dollar_literal() {
        let env = sink(&[("VAR", "value")]);
        assert_eq!(resolve("${VAR", &env), "${VAR");
    }

    #[test]
    fn unset_or_empty_default_applies_when_unset() {
        assert_eq!(resolve("${DB_HOST:-localhost}", &MapSink::new()), "localhost");
    }

    #[test]
    fn unset_or_empty_default_applies_when_empty() {
        let env = sink(&[("EMPTY", "")]);
        assert_eq!(resolve("${EMPTY:-fallback}", &env), "fallback");
    }

    #[test]
    fn set_variable_ignores_default() {
        let env = sink(&[("VAR", "value")]);
        assert_eq!(resolve("${VAR:-default}", &env), "value");
        assert_eq!(resolve("${VAR-default}", &env), "value");
    }

    #[test]
    fn unset_only_default_keeps_empty_value() {
        let env = sink(&[("EMPTY", "")]);
        assert_eq!(resolve("${EMPTY-fallback}", &env), "");
    }

    #[test]
    fn unset_only_default_applies_when_unset() {
        assert_eq!(resolve("${UNSET-fallback}", &MapSink::new()), "fallback");
    }

    #[test]
    fn empty_default_resolves_to_empty() {
        assert_eq!(resolve("${UNSET:-}", &MapSink::new()), "");
    }

    #[test]
    fn default_may_contain_colons_and_hyphens() {
        let env = MapSink::new();
        assert_eq!(resolve("${VAR:-host:port}", &env), "host:port");
        assert_eq!(resolve("${VAR:-my-value}", &env), "my-value");
        assert_eq!(
            resolve("${URL:-https://example.com/path?q=1}", &env),
            "https://example.com/path?q=1"
        );
    }

    #[test]
    fn default_may_contain_spaces() {
        assert_eq!(resolve("${MSG:-hello world}", &MapSink::new()), "hello world");
    }

    #[test]
    fn nested_defaults_resolve_depth_first() {
        assert_eq!(resolve("${A:-${B:-c}}", &MapSink::new()), "c");
        let env = sink(&[("B", "b-value")]);
        assert_eq!(resolve("${A:-${B:-c}}", &env), "b-value");
    }

    #[test]
    fn default_referencing_its_own_name_terminates() {
        // `${X:-${X}}` re-resolves the default's own text, sees X unset
        // again, and yields the bare reference's empty result.
        assert_eq!(resolve("${X:-${X}}", &MapSink::new()), "");
    }

    #[test]
    fn default_with_literal_brace_pairs() {
        assert_eq!(resolve("${JSON:-{\"a\":1}}", &MapSink::new()), "{\"a\":1}");
    }

    #[test]
    fn later_reference_sees_current_sink_state() {
        let env = sink(&[("DB_HOST", "localhost")]);
        assert_eq!(
            resolve("http://$DB_HOST:8080", &env),
            "http://localhost:8080"
        );
    }
}
