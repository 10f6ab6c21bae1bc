//! Symbolic filter literals.
//!
//! An [`Expression`] is the nested, call-site friendly way of writing a
//! filter: `[:and, [:uid, "kunglung"], [:name, "chunger"]]` in symbolic
//! form, or the same thing as JSON. The shape of the input is decided once
//! when the expression is built, and [`Filter::from_expression`] walks it
//! with a single exhaustive match.

use serde_json::Value;
use strsim::levenshtein;

use super::ast::Filter;
use super::error::{FilterError, FilterResult};
use super::lexer::is_attribute_description;
use super::parser::{FilterParser, MAX_DEPTH};

/// Maximum Levenshtein distance to suggest a combinator name.
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Combinator names, in suggestion order.
const COMBINATOR_NAMES: [&str; 3] = ["and", "or", "not"];

/// A grouping operator at the head of a nested expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// `&`
    And,
    /// `|`
    Or,
    /// `!`
    Not,
}

impl Combinator {
    /// Resolves a combinator symbol: `and`/`&`, `or`/`|`, `not`/`!`, with or
    /// without a leading `:`.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnknownCombinator`, with a suggestion when the
    /// symbol is a near miss.
    pub fn from_symbol(symbol: &str) -> FilterResult<Self> {
        let name = symbol.strip_prefix(':').unwrap_or(symbol);
        match name {
            "and" | "&" => Ok(Combinator::And),
            "or" | "|" => Ok(Combinator::Or),
            "not" | "!" => Ok(Combinator::Not),
            _ => Err(unknown_combinator(symbol)),
        }
    }

    /// Returns the combinator's name.
    pub fn name(self) -> &'static str {
        match self {
            Combinator::And => "and",
            Combinator::Or => "or",
            Combinator::Not => "not",
        }
    }

    /// Returns the operator character used in filter strings.
    pub fn operator(self) -> char {
        match self {
            Combinator::And => '&',
            Combinator::Or => '|',
            Combinator::Not => '!',
        }
    }

    /// Builds the combinator over its clauses, checking the clause count.
    pub fn apply(self, filters: Vec<Filter>) -> FilterResult<Filter> {
        match self {
            Combinator::And => Filter::and(filters),
            Combinator::Or => Filter::or(filters),
            Combinator::Not => Filter::not(filters),
        }
    }
}

fn unknown_combinator(symbol: &str) -> FilterError {
    FilterError::UnknownCombinator {
        symbol: symbol.to_string(),
        suggestion: suggest_combinator(symbol_name(symbol)).map(|s| format!(":{}", s)),
    }
}

fn suggest_combinator(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    let (best, distance) = COMBINATOR_NAMES
        .iter()
        .map(|candidate| (*candidate, levenshtein(&lower, candidate)))
        .min_by_key(|(_, d)| *d)?;

    if distance <= MAX_SUGGESTION_DISTANCE {
        Some(best)
    } else {
        None
    }
}

/// A symbolic filter literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// No argument: the promiscuous filter.
    Empty,

    /// A filter string, parenthesized or bare.
    Literal(String),

    /// A bare attribute: a presence test.
    Attribute(String),

    /// An attribute/value pair: an equality test.
    Pair {
        /// The attribute description.
        attribute: String,
        /// The asserted value.
        value: String,
    },

    /// A combinator symbol followed by clauses.
    Nested {
        /// The head symbol, e.g. `:and` or `&`.
        combinator: String,
        /// The clauses, each itself an expression.
        clauses: Vec<Expression>,
    },

    /// An attribute mapped to several values. Only valid as a clause, where
    /// it expands to one equality test per value, in order.
    Values {
        /// The attribute description.
        attribute: String,
        /// The values, in order.
        values: Vec<String>,
    },
}

impl Expression {
    /// Creates a string literal expression.
    pub fn literal(text: impl Into<String>) -> Self {
        Expression::Literal(text.into())
    }

    /// Creates a bare attribute expression.
    pub fn attribute(attribute: impl Into<String>) -> Self {
        Expression::Attribute(attribute.into())
    }

    /// Creates an attribute/value pair expression.
    pub fn pair(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Expression::Pair {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates a nested expression headed by a combinator symbol.
    pub fn nested(combinator: impl Into<String>, clauses: Vec<Expression>) -> Self {
        Expression::Nested {
            combinator: combinator.into(),
            clauses,
        }
    }

    /// Creates an attribute to values mapping clause.
    pub fn values<I, S>(attribute: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expression::Values {
            attribute: attribute.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads an expression from JSON text.
    ///
    /// Strings starting with `:` are symbols. See the
    /// `TryFrom<serde_json::Value>` implementation for the accepted shapes.
    pub fn from_json_str(json: &str) -> FilterResult<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| FilterError::invalid_literal(e.to_string()))?;
        Expression::try_from(value)
    }
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        Expression::literal(text)
    }
}

impl From<String> for Expression {
    fn from(text: String) -> Self {
        Expression::Literal(text)
    }
}

impl From<(&str, &str)> for Expression {
    fn from((attribute, value): (&str, &str)) -> Self {
        Expression::pair(attribute, value)
    }
}

fn symbol_name(text: &str) -> &str {
    text.strip_prefix(':').unwrap_or(text)
}

fn is_symbol(text: &str) -> bool {
    text.starts_with(':') || matches!(text, "&" | "|" | "!")
}

/// Converts JSON into an expression.
///
/// * `null` or `[]` is [`Expression::Empty`].
/// * `":uid"` is an attribute; any other string is a filter literal.
/// * `[":and", clause, ...]` (also `:or`, `:not`, `&`, `|`, `!`) is nested.
/// * `["uid"]` is an attribute, `["uid", "value"]` is a pair.
/// * `{"uid": ["a", "b"]}` is an attribute to values mapping.
impl TryFrom<Value> for Expression {
    type Error = FilterError;

    fn try_from(value: Value) -> FilterResult<Self> {
        match value {
            Value::Null => Ok(Expression::Empty),
            Value::String(text) => match text.strip_prefix(':') {
                Some(attribute) => Ok(Expression::attribute(attribute)),
                None => Ok(Expression::Literal(text)),
            },
            Value::Array(items) => sequence_expression(items),
            Value::Object(map) => {
                if map.len() != 1 {
                    return Err(FilterError::invalid_literal(format!(
                        "mapping must have exactly one attribute, found {}",
                        map.len()
                    )));
                }
                let Some((attribute, values)) = map.into_iter().next() else {
                    return Err(FilterError::invalid_literal("empty mapping"));
                };
                let Value::Array(values) = values else {
                    return Err(FilterError::invalid_literal(format!(
                        "values of '{}' must be an array",
                        attribute
                    )));
                };
                let values = values
                    .into_iter()
                    .map(|v| match v {
                        Value::String(s) => Ok(s),
                        other => Err(FilterError::invalid_literal(format!(
                            "value {} of '{}' is not a string",
                            other, attribute
                        ))),
                    })
                    .collect::<FilterResult<Vec<_>>>()?;
                Ok(Expression::values(symbol_name(&attribute), values))
            }
            other => Err(FilterError::invalid_literal(format!(
                "unexpected value {}",
                other
            ))),
        }
    }
}

fn sequence_expression(mut items: Vec<Value>) -> FilterResult<Expression> {
    if items.is_empty() {
        return Ok(Expression::Empty);
    }

    let Value::String(head) = items.remove(0) else {
        return Err(FilterError::invalid_literal(
            "a sequence must start with a symbol or attribute name",
        ));
    };

    if is_symbol(&head) && Combinator::from_symbol(&head).is_ok() {
        let clauses = items
            .into_iter()
            .map(Expression::try_from)
            .collect::<FilterResult<Vec<_>>>()?;
        return Ok(Expression::nested(head, clauses));
    }

    match items.as_slice() {
        [] => Ok(Expression::attribute(symbol_name(&head))),
        [Value::String(value)] => Ok(Expression::pair(symbol_name(&head), value.as_str())),
        _ if is_symbol(&head) => Err(unknown_combinator(&head)),
        _ => Err(FilterError::invalid_literal(format!(
            "'{}' is neither a combinator nor an attribute/value pair",
            head
        ))),
    }
}

fn check_attribute(attribute: &str) -> FilterResult<()> {
    if is_attribute_description(attribute) {
        Ok(())
    } else {
        Err(FilterError::invalid_attribute(attribute))
    }
}

/// Builds a clause, expanding a values mapping into one filter per value.
fn push_clause(clause: Expression, depth: usize, filters: &mut Vec<Filter>) -> FilterResult<()> {
    match clause {
        Expression::Values { attribute, values } => {
            check_attribute(&attribute)?;
            filters.extend(
                values
                    .into_iter()
                    .map(|value| Filter::equal(attribute.as_str(), value)),
            );
        }
        other => filters.push(build(other, depth)?),
    }
    Ok(())
}

/// Builds the filter for an expression nested `depth` filters deep.
fn build(expression: Expression, depth: usize) -> FilterResult<Filter> {
    if depth > MAX_DEPTH {
        return Err(FilterError::NestingTooDeep { limit: MAX_DEPTH });
    }

    match expression {
        Expression::Empty => Ok(Filter::new()),
        Expression::Literal(text) => FilterParser::parse(&text),
        Expression::Attribute(attribute) => {
            check_attribute(&attribute)?;
            Ok(Filter::presence(attribute))
        }
        Expression::Pair { attribute, value } => {
            check_attribute(&attribute)?;
            Ok(Filter::equal(attribute, value))
        }
        Expression::Nested {
            combinator,
            clauses,
        } => {
            let combinator = Combinator::from_symbol(&combinator)?;
            let mut filters = Vec::with_capacity(clauses.len());
            for clause in clauses {
                push_clause(clause, depth + 1, &mut filters)?;
            }
            log::debug!(
                "building {} over {} clause(s)",
                combinator.name(),
                filters.len()
            );
            combinator.apply(filters)
        }
        Expression::Values { attribute, .. } => Err(FilterError::invalid_literal(format!(
            "mapping for '{}' is only valid as a combinator clause",
            attribute
        ))),
    }
}

impl Filter {
    /// Builds a filter from a symbolic literal.
    ///
    /// # Example
    ///
    /// ```
    /// use ldap_filter_rs::filter::{Expression, Filter};
    ///
    /// let filter = Filter::from_expression(Expression::nested(
    ///     ":or",
    ///     vec![Expression::values("uid", ["lar", "bin"])],
    /// ))
    /// .unwrap();
    /// assert_eq!(filter.to_string(), "(|(uid=lar)(uid=bin))");
    /// ```
    ///
    /// # Errors
    ///
    /// Propagates parse errors from literals, and returns
    /// `FilterError::UnknownCombinator`, `FilterError::ArgumentCount`,
    /// `FilterError::InvalidAttribute` or `FilterError::NestingTooDeep` for
    /// malformed nested expressions.
    pub fn from_expression(expression: Expression) -> FilterResult<Self> {
        build(expression, 1)
    }
}

impl TryFrom<Expression> for Filter {
    type Error = FilterError;

    fn try_from(expression: Expression) -> FilterResult<Self> {
        Filter::from_expression(expression)
    }
}
