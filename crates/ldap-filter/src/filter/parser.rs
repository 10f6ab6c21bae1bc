//! Recursive descent parser for filter strings.

use std::borrow::Cow;
use std::str::FromStr;

use super::ast::{Component, Filter, FilterList};
use super::error::{FilterError, FilterResult};
use super::lexer::{split_assertion, Assertion, FilterToken, Lexer};

/// Parser for RFC4515 filter strings.
///
/// # Grammar
///
/// ```text
/// filter     ::= "(" filtercomp ")"
/// filtercomp ::= "&" filterlist | "|" filterlist | "!" filter | item
/// filterlist ::= filter+
/// item       ::= attr "=*"                 presence
///              | attr "=" pattern          substring (pattern contains "*")
///              | attr ("=" | "~=" | ">=" | "<=") value
///              | attr                      presence
/// ```
///
/// A top-level string that does not start with `(` is wrapped in
/// parentheses first, so `uid=bargrab` and `(uid=bargrab)` parse
/// to the same tree.
///
/// Nesting is limited to [`MAX_DEPTH`] filters.
///
/// # Example
///
/// ```
/// use ldap_filter_rs::filter::{Component, FilterParser};
///
/// let filter = FilterParser::parse("(&(uid=kunglung)(name=chunger))").unwrap();
/// assert!(matches!(filter.component(), Component::And(_)));
/// assert_eq!(filter.to_string(), "(&(uid=kunglung)(name=chunger))");
/// ```
pub struct FilterParser<'a> {
    source: &'a str,
    tokens: Vec<FilterToken>,
    position: usize,
    depth: usize,
}

/// Maximum number of filters nested inside each other.
pub const MAX_DEPTH: usize = 128;

impl FilterParser<'_> {
    /// Parses a filter string into a [`Filter`].
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyExpression` for blank input,
    /// `FilterError::Expression` when a fragment matches no production,
    /// `FilterError::ArgumentCount` when `!` is given more than one filter,
    /// `FilterError::UnexpectedEndOfInput` for an unclosed filter,
    /// `FilterError::UnexpectedToken` for text after the outermost filter and
    /// `FilterError::NestingTooDeep` past [`MAX_DEPTH`].
    pub fn parse(input: &str) -> FilterResult<Filter> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(FilterError::EmptyExpression);
        }

        let source: Cow<'_, str> = if trimmed.starts_with('(') {
            Cow::Borrowed(trimmed)
        } else {
            Cow::Owned(format!("({})", trimmed))
        };

        let mut parser = FilterParser {
            source: trimmed,
            tokens: Lexer::new(&source).tokenize(),
            position: 0,
            depth: 0,
        };
        let filter = parser.parse_filter()?;

        // Check that we consumed all tokens
        if let Some(remaining) = parser.peek() {
            return Err(FilterError::unexpected_token(remaining.to_string()));
        }

        log::debug!("parsed filter {:?} as {}", trimmed, filter);
        Ok(filter)
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&FilterToken> {
        self.tokens.get(self.position)
    }

    /// Consumes and returns the current token.
    fn advance(&mut self) -> Option<FilterToken> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn check(&self, expected: &FilterToken) -> bool {
        self.peek() == Some(expected)
    }

    /// Error for input whose structure matches no production.
    fn unparsable(&self) -> FilterError {
        FilterError::expression(self.source)
    }

    /// Consumes the expected parenthesis.
    fn expect(&mut self, expected: FilterToken) -> FilterResult<()> {
        match self.advance() {
            Some(token) if token == expected => Ok(()),
            Some(_) => Err(self.unparsable()),
            None => Err(FilterError::UnexpectedEndOfInput),
        }
    }

    /// Parses `"(" filtercomp ")"`.
    fn parse_filter(&mut self) -> FilterResult<Filter> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(FilterError::NestingTooDeep { limit: MAX_DEPTH });
        }

        self.expect(FilterToken::OpenParen)?;
        let component = self.parse_component()?;
        self.expect(FilterToken::CloseParen)?;

        self.depth -= 1;
        Ok(Filter::wrap(component))
    }

    /// Parses the inside of one pair of parentheses.
    fn parse_component(&mut self) -> FilterResult<Component> {
        let token = self.advance().ok_or(FilterError::UnexpectedEndOfInput)?;

        match token {
            FilterToken::And => Ok(Component::And(self.parse_filter_list()?)),
            FilterToken::Or => Ok(Component::Or(self.parse_filter_list()?)),
            FilterToken::Not => {
                let mut filters = self.parse_filter_list()?.into_vec();
                if filters.len() != 1 {
                    return Err(FilterError::ArgumentCount {
                        combinator: "not",
                        expected: "1",
                        found: filters.len(),
                    });
                }
                Ok(Component::Not(Box::new(filters.remove(0))))
            }
            FilterToken::Assertion(text) => parse_item(&text),
            FilterToken::OpenParen | FilterToken::CloseParen => Err(self.unparsable()),
        }
    }

    /// Parses `filter+`.
    fn parse_filter_list(&mut self) -> FilterResult<FilterList> {
        let mut filters = Vec::new();
        while self.check(&FilterToken::OpenParen) {
            filters.push(self.parse_filter()?);
        }

        if filters.is_empty() {
            return Err(self.unparsable());
        }
        Ok(FilterList::new(filters))
    }
}

/// Parses assertion text into a presence, substring or simple item.
fn parse_item(text: &str) -> FilterResult<Component> {
    match split_assertion(text) {
        None => Err(FilterError::expression(text.trim())),
        Some(Assertion::Bare(attribute)) => Ok(Component::Presence {
            attribute: attribute.to_string(),
        }),
        Some(Assertion::Compare {
            attribute,
            filter_type,
            value,
        }) => Ok(Component::assertion(attribute, filter_type, value)),
    }
}

impl Filter {
    /// Parses a filter string. See [`FilterParser`].
    pub fn parse(input: &str) -> FilterResult<Self> {
        FilterParser::parse(input)
    }
}

impl FromStr for Filter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterParser::parse(s)
    }
}
