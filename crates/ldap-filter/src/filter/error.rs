//! Error types for filter parsing and construction.

use thiserror::Error;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while parsing or constructing a filter.
///
/// Stringification never fails, so every variant originates from parsing a
/// string, converting a symbolic literal, or building a combinator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The filter expression is empty.
    #[error("filter expression is empty")]
    EmptyExpression,

    /// A fragment did not match any filter production.
    #[error("unable to parse filter expression '{fragment}'")]
    Expression {
        /// The text that could not be parsed.
        fragment: String,
    },

    /// The expression ended before a filter was closed.
    #[error("unexpected end of filter expression")]
    UnexpectedEndOfInput,

    /// Text was found where none was expected.
    #[error("unexpected token: {token}")]
    UnexpectedToken {
        /// The unexpected token.
        token: String,
    },

    /// A symbolic literal started with a symbol that is not a combinator.
    #[error("unknown combinator '{symbol}'{}", suggestion_suffix(.suggestion))]
    UnknownCombinator {
        /// The unrecognized symbol.
        symbol: String,
        /// The closest known combinator, if any is close enough.
        suggestion: Option<String>,
    },

    /// A combinator was given the wrong number of clauses.
    #[error("wrong number of clauses for {combinator} (given {found}, expected {expected})")]
    ArgumentCount {
        /// The combinator name.
        combinator: &'static str,
        /// Human readable expectation, e.g. "1" or "1 or more".
        expected: &'static str,
        /// The number of clauses supplied.
        found: usize,
    },

    /// An attribute name in a symbolic literal is not a valid attribute description.
    #[error("invalid attribute name: '{attribute}'")]
    InvalidAttribute {
        /// The rejected attribute name.
        attribute: String,
    },

    /// Filters were nested deeper than the parser allows.
    #[error("filter nesting exceeds {limit} levels")]
    NestingTooDeep {
        /// The maximum nesting depth.
        limit: usize,
    },

    /// A bare filter list was given where a whole filter is required.
    #[error("a filter list must sit inside '&' or '|'")]
    BareList,

    /// A JSON value could not be read as a symbolic literal.
    #[error("invalid filter literal: {reason}")]
    InvalidLiteral {
        /// Why the literal was rejected.
        reason: String,
    },
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

impl FilterError {
    /// Creates an expression error for the given fragment.
    pub fn expression(fragment: impl Into<String>) -> Self {
        FilterError::Expression {
            fragment: fragment.into(),
        }
    }

    /// Creates an unexpected token error.
    pub fn unexpected_token(token: impl Into<String>) -> Self {
        FilterError::UnexpectedToken {
            token: token.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attribute(attribute: impl Into<String>) -> Self {
        FilterError::InvalidAttribute {
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid literal error.
    pub fn invalid_literal(reason: impl Into<String>) -> Self {
        FilterError::InvalidLiteral {
            reason: reason.into(),
        }
    }

    /// Returns true for structural misuse (wrong clause count) as opposed to
    /// input that does not match the grammar.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, FilterError::ArgumentCount { .. })
    }
}
