//! LDAP search filters.
//!
//! This crate parses RFC4515 filter strings and symbolic filter literals into
//! an immutable component tree, combines filters with AND, and renders them
//! back to the canonical string form a directory server accepts.
//!
//! - [`filter`] - the component tree, parser and combination algebra
//! - [`rdn`] - attribute/value extraction from relative distinguished names
//! - [`escape`] - escaping of assertion values

pub mod escape;
pub mod filter;
pub mod rdn;

pub use escape::escape_value;
pub use filter::{
    Combinator, Component, Expression, Filter, FilterError, FilterList, FilterParser,
    FilterResult, FilterType, SimpleItem,
};
