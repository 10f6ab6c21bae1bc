//! Attribute/value extraction from relative distinguished names.
//!
//! An RDN such as `cn=Barbara Jensen+uid=bjensen` names an entry by one or
//! more `attribute=value` pairs joined with `+`. Callers creating an entry
//! use the pairs to seed its initial attributes; callers locating an entry
//! turn them into a filter.

use crate::filter::lexer::{split_assertion, Assertion};
use crate::filter::{Filter, FilterError, FilterResult, FilterType};

/// Splits on `separator`, skipping separators escaped with a backslash.
fn split_unescaped(text: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (index, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == separator {
            pieces.push(&text[start..index]);
            start = index + c.len_utf8();
        }
    }
    pieces.push(&text[start..]);
    pieces
}

/// Extracts the `attribute=value` pairs of an RDN, in order.
///
/// Whitespace around attributes and values is trimmed. Escape sequences in
/// values are kept as written.
///
/// # Example
///
/// ```
/// use ldap_filter_rs::rdn::attribute_pairs;
///
/// let pairs = attribute_pairs("cn = Barbara Jensen + uid=bjensen").unwrap();
/// assert_eq!(
///     pairs,
///     vec![
///         ("cn".to_string(), "Barbara Jensen".to_string()),
///         ("uid".to_string(), "bjensen".to_string()),
///     ]
/// );
/// ```
///
/// # Errors
///
/// Returns `FilterError::EmptyExpression` for a blank RDN and
/// `FilterError::Expression` for a piece that is not `attribute=value`.
pub fn attribute_pairs(rdn: &str) -> FilterResult<Vec<(String, String)>> {
    let rdn = rdn.trim();
    if rdn.is_empty() {
        return Err(FilterError::EmptyExpression);
    }

    split_unescaped(rdn, '+')
        .into_iter()
        .map(|piece| match split_assertion(piece) {
            Some(Assertion::Compare {
                attribute,
                filter_type: FilterType::Equal,
                value,
            }) => Ok((attribute.to_string(), value.to_string())),
            _ => Err(FilterError::expression(piece.trim())),
        })
        .collect()
}

/// Builds the filter that matches an entry by its RDN: a single equality
/// test, or an AND of them for a multi-valued RDN.
pub fn rdn_filter(rdn: &str) -> FilterResult<Filter> {
    let mut filters: Vec<Filter> = attribute_pairs(rdn)?
        .into_iter()
        .map(|(attribute, value)| Filter::equal(attribute, value))
        .collect();

    if filters.len() == 1 {
        return Ok(filters.remove(0));
    }
    Filter::and(filters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pair() {
        assert_eq!(
            attribute_pairs("uid=bjensen").unwrap(),
            vec![("uid".to_string(), "bjensen".to_string())]
        );
    }

    #[test]
    fn test_multi_valued_rdn_keeps_order() {
        let pairs = attribute_pairs("ou=Sales+cn=J. Smith").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("ou".to_string(), "Sales".to_string()),
                ("cn".to_string(), "J. Smith".to_string()),
            ]
        );
    }

    #[test]
    fn test_escaped_plus_stays_in_value() {
        let pairs = attribute_pairs(r"cn=Lu\+Ci+uid=lc").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("cn".to_string(), r"Lu\+Ci".to_string()),
                ("uid".to_string(), "lc".to_string()),
            ]
        );
    }

    #[test]
    fn test_value_may_contain_equals() {
        let pairs = attribute_pairs("description=a=b").unwrap();
        assert_eq!(pairs, vec![("description".to_string(), "a=b".to_string())]);
    }

    #[test]
    fn test_piece_without_equals_is_rejected() {
        let err = attribute_pairs("cn=foo+bar").unwrap_err();
        assert_eq!(err, FilterError::expression("bar"));

        let err = attribute_pairs("cn>=foo").unwrap_err();
        assert!(matches!(err, FilterError::Expression { .. }));
    }

    #[test]
    fn test_blank_rdn() {
        assert_eq!(
            attribute_pairs("   ").unwrap_err(),
            FilterError::EmptyExpression
        );
    }

    #[test]
    fn test_rdn_filter() {
        assert_eq!(rdn_filter("uid=bjensen").unwrap().to_string(), "(uid=bjensen)");
        assert_eq!(
            rdn_filter("cn=Barbara Jensen+uid=bjensen")
                .unwrap()
                .to_string(),
            "(&(cn=Barbara Jensen)(uid=bjensen))"
        );
    }
}
