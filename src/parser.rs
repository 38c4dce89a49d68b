//! Permissive line-oriented parser for `.env` files.
//!
//! This module provides [`recognize`] for matching a single assignment line,
//! [`remove_quotes`] for stripping one surrounding quote pair, and
//! [`parse_str`] for turning whole-file content into a key/value map.
//!
//! The recognizer is deliberately permissive: a line that doesn't fit the
//! grammar produces no pair rather than an error, so decorative or malformed
//! lines never abort a load.

use std::collections::HashMap;

/// Returns the `(key, raw_value)` pair encoded by a single line, if any.
///
/// A leading `export` keyword followed by whitespace is accepted and
/// discarded, so `export KEY=V` parses exactly like `KEY=V`. After that, the
/// line must be a key of `[A-Za-z0-9_.]` characters, a separator (`=` with
/// optional surrounding whitespace, or `:` directly after the key followed by
/// at least one whitespace), and an optional value. The value may be
/// single-quoted, double-quoted, or bare text running up to an unquoted `#`
/// or the end of the line. A `#` inside quotes is literal.
///
/// The returned raw value still carries its surrounding quotes; pass it
/// through [`remove_quotes`]. Both parts are trimmed of surrounding
/// whitespace. A key with a separator but no value yields an empty string; a
/// bare key with no separator yields `None`.
///
/// # Examples
///
/// ```rust
/// use envful::parser::recognize;
///
/// assert_eq!(recognize("KEY=value"), Some(("KEY", "value")));
/// assert_eq!(recognize("export KEY = value # comment"), Some(("KEY", "value")));
/// assert_eq!(recognize("KEY='a # b'"), Some(("KEY", "'a # b'")));
/// assert_eq!(recognize("no separator"), None);
/// ```
pub fn recognize(line: &str) -> Option<(&str, &str)> {
    let mut rest = line.trim();
    if let Some(after) = rest.strip_prefix("export")
        && after.starts_with(char::is_whitespace)
    {
        rest = after.trim_start();
    }

    let key_end = rest
        .find(|ch: char| !is_key_char(ch))
        .unwrap_or(rest.len());
    if key_end == 0 {
        return None;
    }
    let key = &rest[..key_end];

    let value_input = match_separator(&rest[key_end..])?;
    Some((key, match_value(value_input)))
}

/// Strips one matching pair of surrounding `'` or `"` quotes.
///
/// Anything else, including a mismatched pair, is returned unchanged.
///
/// # Examples
///
/// ```rust
/// use envful::parser::remove_quotes;
///
/// assert_eq!(remove_quotes("'x'"), "x");
/// assert_eq!(remove_quotes("\"x\""), "x");
/// assert_eq!(remove_quotes("'x"), "'x");
/// assert_eq!(remove_quotes("x"), "x");
/// ```
pub fn remove_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() < 2 {
        return s;
    }

    let first = bytes[0];
    let last = bytes[bytes.len() - 1];
    if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Parses `.env` file content into a key/value map.
///
/// Blank lines and lines whose first non-whitespace character is `#` are
/// skipped, as is any line [`recognize`] rejects. Keys and values are
/// unquoted via [`remove_quotes`]. If a key appears more than once the last
/// occurrence wins.
pub fn parse_str(content: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, raw_value)) = recognize(line) {
            vars.insert(
                remove_quotes(key).to_string(),
                remove_quotes(raw_value).to_string(),
            );
        }
    }
    vars
}

fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '.'
}

/// Consumes the separator after the key, returning the value portion.
///
/// The colon form allows no whitespace before the colon and requires at
/// least one character of it after.
fn match_separator(input: &str) -> Option<&str> {
    if let Some(rest) = input.trim_start().strip_prefix('=') {
        return Some(rest.trim_start());
    }
    if let Some(rest) = input.strip_prefix(':')
        && rest.starts_with(char::is_whitespace)
    {
        return Some(rest.trim_start());
    }
    None
}

/// Extracts the raw value, quotes included.
///
/// A quoted value ends at the first unescaped matching quote and may only be
/// followed by whitespace or a comment. When that doesn't hold (no closing
/// quote, or trailing junk) the whole run is re-read as a bare value, which
/// ends at an unquoted `#` or the end of the line.
fn match_value(input: &str) -> &str {
    if let Some(quote) = input.chars().next().filter(|ch| *ch == '\'' || *ch == '"')
        && let Some(end) = closing_quote(input, quote)
    {
        let tail = input[end + 1..].trim_start();
        if tail.is_empty() || tail.starts_with('#') {
            return &input[..=end];
        }
    }

    input
        .split_once('#')
        .map(|(head, _)| head)
        .unwrap_or(input)
        .trim_end()
}

fn closing_quote(input: &str, quote: char) -> Option<usize> {
    for (idx, ch) in input.char_indices().skip(1) {
        if ch == quote && !is_escaped(input.as_bytes(), idx) {
            return Some(idx);
        }
    }
    None
}

/// A quote is escaped when preceded by an odd number of backslashes.
fn is_escaped(bytes: &[u8], idx: usize) -> bool {
    let mut backslashes = 0;
    while backslashes < idx && bytes[idx - backslashes - 1] == b'\\' {
        backslashes += 1;
    }
    backslashes % 2 == 1
}
