//! Lexer (tokenizer) for filter strings.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use super::ast::FilterType;

/// A token in a filter string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterToken {
    /// Opening parenthesis `(`.
    OpenParen,

    /// Closing parenthesis `)`.
    CloseParen,

    /// The AND combinator (`&`), only recognized right after `(`.
    And,

    /// The OR combinator (`|`), only recognized right after `(`.
    Or,

    /// The NOT combinator (`!`), only recognized right after `(`.
    Not,

    /// Raw `attribute<op>value` text up to the next parenthesis.
    Assertion(String),
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterToken::OpenParen => f.write_str("("),
            FilterToken::CloseParen => f.write_str(")"),
            FilterToken::And => f.write_str("&"),
            FilterToken::Or => f.write_str("|"),
            FilterToken::Not => f.write_str("!"),
            FilterToken::Assertion(text) => f.write_str(text),
        }
    }
}

/// Lexer for tokenizing filter strings.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Whether the previous token was `(`, the only place combinators appear.
    after_open: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            after_open: false,
        }
    }

    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    /// Reads assertion text up to, not including, the next parenthesis.
    fn read_assertion(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.chars.next_if(|&c| c != '(' && c != ')') {
            text.push(c);
        }
        text
    }

    /// Returns the next token, or None at end of input.
    pub fn next_token(&mut self) -> Option<FilterToken> {
        self.skip_whitespace();

        let c = *self.peek()?;
        let after_open = std::mem::replace(&mut self.after_open, false);

        let token = match c {
            '(' => {
                self.chars.next();
                self.after_open = true;
                FilterToken::OpenParen
            }
            ')' => {
                self.chars.next();
                FilterToken::CloseParen
            }
            '&' if after_open => {
                self.chars.next();
                FilterToken::And
            }
            '|' if after_open => {
                self.chars.next();
                FilterToken::Or
            }
            '!' if after_open => {
                self.chars.next();
                FilterToken::Not
            }
            _ => FilterToken::Assertion(self.read_assertion()),
        };

        log::trace!("filter token: {:?}", token);
        Some(token)
    }

    /// Collects all tokens into a vector.
    pub fn tokenize(mut self) -> Vec<FilterToken> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }
}

/// The pieces of an `attribute<op>value` assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Assertion<'a> {
    /// An attribute with no operator or value.
    Bare(&'a str),
    /// A comparison; attribute and value have surrounding whitespace trimmed.
    Compare {
        attribute: &'a str,
        filter_type: FilterType,
        value: &'a str,
    },
}

/// Returns true for characters allowed in an attribute description
/// (descriptor or numeric OID, with `;` options).
fn is_attribute_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == ';'
}

/// Returns true if `name` is a non-empty attribute description.
pub(crate) fn is_attribute_description(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_attribute_char)
}

/// Splits assertion text into attribute, operator and value.
///
/// Returns None when the text does not start with an attribute description
/// followed by `=`, `~=`, `>=`, `<=` or nothing at all.
pub(crate) fn split_assertion(text: &str) -> Option<Assertion<'_>> {
    let text = text.trim();
    let end = text
        .find(|c: char| !is_attribute_char(c))
        .unwrap_or(text.len());
    let (attribute, rest) = text.split_at(end);
    if attribute.is_empty() {
        return None;
    }

    let rest = rest.trim_start();
    if rest.is_empty() {
        return Some(Assertion::Bare(attribute));
    }

    let (filter_type, value) = if let Some(value) = rest.strip_prefix("~=") {
        (FilterType::Approx, value)
    } else if let Some(value) = rest.strip_prefix(">=") {
        (FilterType::Greater, value)
    } else if let Some(value) = rest.strip_prefix("<=") {
        (FilterType::Less, value)
    } else if let Some(value) = rest.strip_prefix('=') {
        (FilterType::Equal, value)
    } else {
        return None;
    };

    Some(Assertion::Compare {
        attribute,
        filter_type,
        value: value.trim(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assertion(text: &str) -> FilterToken {
        FilterToken::Assertion(text.to_string())
    }

    #[test]
    fn test_tokenize_simple_item() {
        let tokens = Lexer::new("(uid=bargrab)").tokenize();
        assert_eq!(
            tokens,
            vec![
                FilterToken::OpenParen,
                assertion("uid=bargrab"),
                FilterToken::CloseParen
            ]
        );
    }

    #[test]
    fn test_tokenize_combinators() {
        let tokens = Lexer::new("(&(a=1)(|(b=2))(!(c=3)))").tokenize();
        assert_eq!(
            tokens,
            vec![
                FilterToken::OpenParen,
                FilterToken::And,
                FilterToken::OpenParen,
                assertion("a=1"),
                FilterToken::CloseParen,
                FilterToken::OpenParen,
                FilterToken::Or,
                FilterToken::OpenParen,
                assertion("b=2"),
                FilterToken::CloseParen,
                FilterToken::CloseParen,
                FilterToken::OpenParen,
                FilterToken::Not,
                FilterToken::OpenParen,
                assertion("c=3"),
                FilterToken::CloseParen,
                FilterToken::CloseParen,
                FilterToken::CloseParen,
            ]
        );
    }

    #[test]
    fn test_operator_chars_inside_values_stay_in_assertion() {
        let tokens = Lexer::new("(cn=Tom & Jerry|!)").tokenize();
        assert_eq!(
            tokens,
            vec![
                FilterToken::OpenParen,
                assertion("cn=Tom & Jerry|!"),
                FilterToken::CloseParen
            ]
        );
    }

    #[test]
    fn test_whitespace_between_filters_is_skipped() {
        let tokens = Lexer::new("( & (a=1)  (b=2) )").tokenize();
        assert_eq!(
            tokens,
            vec![
                FilterToken::OpenParen,
                FilterToken::And,
                FilterToken::OpenParen,
                assertion("a=1"),
                FilterToken::CloseParen,
                FilterToken::OpenParen,
                assertion("b=2"),
                FilterToken::CloseParen,
                FilterToken::CloseParen,
            ]
        );
    }

    #[test]
    fn test_value_keeps_inner_spaces() {
        let tokens = Lexer::new("(l=the moon)").tokenize();
        assert_eq!(tokens[1], assertion("l=the moon"));
    }

    #[test]
    fn test_token_display() {
        assert_eq!(FilterToken::Or.to_string(), "|");
        assert_eq!(assertion("uid=x").to_string(), "uid=x");
    }

    #[test]
    fn test_split_assertion_operators() {
        assert_eq!(
            split_assertion("uid=bigthung"),
            Some(Assertion::Compare {
                attribute: "uid",
                filter_type: FilterType::Equal,
                value: "bigthung"
            })
        );
        assert_eq!(
            split_assertion("cn~=fred"),
            Some(Assertion::Compare {
                attribute: "cn",
                filter_type: FilterType::Approx,
                value: "fred"
            })
        );
        assert_eq!(
            split_assertion("uidNumber>=1000"),
            Some(Assertion::Compare {
                attribute: "uidNumber",
                filter_type: FilterType::Greater,
                value: "1000"
            })
        );
        assert_eq!(
            split_assertion("uidNumber<=2000"),
            Some(Assertion::Compare {
                attribute: "uidNumber",
                filter_type: FilterType::Less,
                value: "2000"
            })
        );
    }

    #[test]
    fn test_split_assertion_trims_whitespace() {
        assert_eq!(
            split_assertion("  cn =  Fred Flintstone  "),
            Some(Assertion::Compare {
                attribute: "cn",
                filter_type: FilterType::Equal,
                value: "Fred Flintstone"
            })
        );
    }

    #[test]
    fn test_split_assertion_bare_attribute() {
        assert_eq!(split_assertion("uid"), Some(Assertion::Bare("uid")));
        assert_eq!(
            split_assertion("cn;lang-en"),
            Some(Assertion::Bare("cn;lang-en"))
        );
    }

    #[test]
    fn test_split_assertion_rejects_garbage() {
        assert_eq!(split_assertion("whatev!"), None);
        assert_eq!(split_assertion("=value"), None);
        assert_eq!(split_assertion(""), None);
        assert_eq!(split_assertion("uid:=x"), None);
    }

    #[test]
    fn test_attribute_description() {
        assert!(is_attribute_description("objectClass"));
        assert!(is_attribute_description("2.5.4.3"));
        assert!(is_attribute_description("userCertificate;binary"));
        assert!(!is_attribute_description(""));
        assert!(!is_attribute_description("the moon"));
    }
}
