//! RFC4515 assertion value escaping.
//!
//! Filters render values verbatim. Values that come from untrusted input
//! should pass through [`escape_value`] first so that `*`, `(`, `)`, `\` and
//! NUL cannot change the meaning of the filter.

use std::borrow::Cow;

fn needs_escape(c: char) -> bool {
    matches!(c, '*' | '(' | ')' | '\\' | '\0')
}

/// Escapes the characters RFC4515 reserves in assertion values.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
///
/// # Example
///
/// ```
/// use ldap_filter_rs::escape_value;
///
/// assert_eq!(escape_value("Parens R Us (for all your parenthetical needs)"),
///            r"Parens R Us \28for all your parenthetical needs\29");
/// assert_eq!(escape_value("plain"), "plain");
/// ```
pub fn escape_value(value: &str) -> Cow<'_, str> {
    if !value.contains(needs_escape) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '*' => escaped.push_str(r"\2a"),
            '(' => escaped.push_str(r"\28"),
            ')' => escaped.push_str(r"\29"),
            '\\' => escaped.push_str(r"\5c"),
            '\0' => escaped.push_str(r"\00"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
