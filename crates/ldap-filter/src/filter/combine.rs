//! Filter constructors and the AND combination algebra.

use std::ops::{Add, BitAnd};

use super::ast::{Component, Filter, FilterList, FilterType, OBJECT_CLASS};
use super::error::{FilterError, FilterResult};

impl Filter {
    /// Creates a presence filter, `(attr=*)`.
    pub fn presence(attribute: impl Into<String>) -> Self {
        Self::wrap(Component::Presence {
            attribute: attribute.into(),
        })
    }

    /// Creates an equality filter, `(attr=value)`.
    ///
    /// A value of `*` gives a presence test and a value containing `*` a
    /// substring, matching how the rendered string parses. Escape user
    /// input with [`crate::escape_value`] to keep it a plain equality.
    pub fn equal(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::item(attribute, value, FilterType::Equal)
    }

    /// Creates a comparison filter with the given operator. Equality values
    /// are classified as in [`Filter::equal`].
    pub fn item(
        attribute: impl Into<String>,
        value: impl Into<String>,
        filter_type: FilterType,
    ) -> Self {
        Self::wrap(Component::assertion(attribute, filter_type, value))
    }

    /// Creates a substring filter. The pattern keeps its `*` wildcards; a
    /// pattern without any is an equality test and `*` alone is presence.
    pub fn substring(attribute: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::item(attribute, pattern, FilterType::Equal)
    }

    /// Negates a filter, `(!f)`.
    pub fn negate(inner: Filter) -> Self {
        Self::wrap(Component::Not(Box::new(inner)))
    }

    /// Creates `(&f1f2…)` over one or more filters.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::ArgumentCount` if `filters` is empty.
    pub fn and(filters: Vec<Filter>) -> FilterResult<Self> {
        let list = non_empty("and", filters)?;
        Ok(Self::wrap(Component::And(list)))
    }

    /// Creates `(|f1f2…)` over one or more filters.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::ArgumentCount` if `filters` is empty.
    pub fn or(filters: Vec<Filter>) -> FilterResult<Self> {
        let list = non_empty("or", filters)?;
        Ok(Self::wrap(Component::Or(list)))
    }

    /// Creates `(!f)` from a clause list that must hold exactly one filter.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::ArgumentCount` unless exactly one filter is given.
    pub fn not(mut filters: Vec<Filter>) -> FilterResult<Self> {
        if filters.len() != 1 {
            return Err(FilterError::ArgumentCount {
                combinator: "not",
                expected: "1",
                found: filters.len(),
            });
        }
        Ok(Self::negate(filters.remove(0)))
    }

    /// Returns true if the filter matches every entry.
    ///
    /// Only the default presence test, `(objectClass=*)` spelled exactly,
    /// qualifies; an empty-valued equality filter does not.
    pub fn is_promiscuous(&self) -> bool {
        matches!(
            self.component(),
            Component::Presence { attribute } if attribute == OBJECT_CLASS
        )
    }

    /// Joins two filters with AND.
    ///
    /// A promiscuous operand is the identity: the other operand is returned
    /// unchanged. Otherwise the result is `(&self other)`.
    ///
    /// # Example
    ///
    /// ```
    /// use ldap_filter_rs::filter::Filter;
    ///
    /// let uid = Filter::equal("uid", "bigthung");
    /// assert_eq!(Filter::new().combine(uid.clone()), uid);
    ///
    /// let both = uid.combine(Filter::presence("mail"));
    /// assert_eq!(both.to_string(), "(&(uid=bigthung)(mail=*))");
    /// ```
    pub fn combine(self, other: Filter) -> Filter {
        if self.is_promiscuous() {
            log::debug!("combine: left operand is promiscuous, keeping {}", other);
            return other;
        }
        if other.is_promiscuous() {
            log::debug!("combine: right operand is promiscuous, keeping {}", self);
            return self;
        }
        Self::wrap(Component::And(FilterList::new(vec![self, other])))
    }

    /// Folds any number of filters through [`Filter::combine`], starting
    /// from the promiscuous filter.
    pub fn all<I>(filters: I) -> Filter
    where
        I: IntoIterator<Item = Filter>,
    {
        filters.into_iter().fold(Filter::new(), Filter::combine)
    }
}

fn non_empty(combinator: &'static str, filters: Vec<Filter>) -> FilterResult<FilterList> {
    if filters.is_empty() {
        return Err(FilterError::ArgumentCount {
            combinator,
            expected: "1 or more",
            found: 0,
        });
    }
    Ok(FilterList::new(filters))
}

impl Add for Filter {
    type Output = Filter;

    fn add(self, rhs: Filter) -> Filter {
        self.combine(rhs)
    }
}

impl BitAnd for Filter {
    type Output = Filter;

    fn bitand(self, rhs: Filter) -> Filter {
        self.combine(rhs)
    }
}
