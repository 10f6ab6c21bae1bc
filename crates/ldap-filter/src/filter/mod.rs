//! LDAP search filter parsing, combination and stringification (RFC4515).
//!
//! A [`Filter`] owns exactly one [`Component`] and renders as the fully
//! parenthesized string servers accept.
//!
//! # Supported Syntax
//!
//! ## Items
//! - `(attr=*)` - presence
//! - `(attr=value)`, `(attr~=value)`, `(attr>=value)`, `(attr<=value)` - comparisons
//! - `(attr=*pattern*)` - substring, `*` anywhere in the pattern
//!
//! ## Combinators
//! - `(&f1f2…)` - AND over one or more filters
//! - `(|f1f2…)` - OR over one or more filters
//! - `(!f)` - NOT over exactly one filter
//!
//! A bare `attr=value` or `attr` at the top level is wrapped in parentheses
//! before parsing.
//!
//! # Example
//!
//! ```
//! use ldap_filter_rs::filter::{Expression, Filter};
//!
//! // Parse a filter string
//! let parsed = Filter::parse("uid=bigthung").unwrap();
//! assert_eq!(parsed, Filter::equal("uid", "bigthung"));
//!
//! // Build one from a symbolic literal
//! let built = Filter::from_expression(Expression::nested(
//!     ":and",
//!     vec![Expression::pair("uid", "kunglung"), Expression::pair("name", "chunger")],
//! ))
//! .unwrap();
//! assert_eq!(built.to_string(), "(&(uid=kunglung)(name=chunger))");
//!
//! // The default filter matches everything and vanishes under combination
//! assert!(Filter::new().is_promiscuous());
//! assert_eq!(Filter::new() & parsed.clone(), parsed);
//! ```

mod ast;
mod combine;
mod error;
mod expression;
pub(crate) mod lexer;
mod parser;

pub use ast::{Component, Filter, FilterList, FilterType, SimpleItem, OBJECT_CLASS};
pub use error::{FilterError, FilterResult};
pub use expression::{Combinator, Expression};
pub use parser::{FilterParser, MAX_DEPTH};
