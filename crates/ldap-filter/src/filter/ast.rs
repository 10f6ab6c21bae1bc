//! Component tree for LDAP search filters.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{FilterError, FilterResult};
use super::parser::FilterParser;

/// The attribute every directory entry carries. A presence test on it
/// matches anything.
pub const OBJECT_CLASS: &str = "objectClass";

/// Comparison operator of a simple item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// `attr=value`
    #[default]
    Equal,
    /// `attr~=value`
    Approx,
    /// `attr>=value`
    Greater,
    /// `attr<=value`
    Less,
}

impl FilterType {
    /// Returns the operator as written in a filter string.
    pub fn symbol(self) -> &'static str {
        match self {
            FilterType::Equal => "=",
            FilterType::Approx => "~=",
            FilterType::Greater => ">=",
            FilterType::Less => "<=",
        }
    }
}

/// A single `attribute<op>value` comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleItem {
    /// The attribute description.
    pub attribute: String,
    /// The assertion value, rendered verbatim.
    pub value: String,
    /// The comparison operator.
    pub filter_type: FilterType,
}

impl SimpleItem {
    /// Creates an equality item.
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
            filter_type: FilterType::Equal,
        }
    }

    /// Returns the same item with a different operator.
    pub fn with_filter_type(self, filter_type: FilterType) -> Self {
        Self {
            filter_type,
            ..self
        }
    }
}

/// An ordered run of filters rendered back to back, each in its own parens.
///
/// This is the clause list behind `&` and `|`. It cannot be built directly;
/// borrow one from an existing combinator with [`Filter::clauses`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterList(Vec<Filter>);

impl FilterList {
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        Self(filters)
    }

    pub(crate) fn into_vec(self) -> Vec<Filter> {
        self.0
    }

    /// Returns the filters in order.
    pub fn filters(&self) -> &[Filter] {
        &self.0
    }

    /// Iterates over the filters in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.0.iter()
    }

    /// Number of filters in the list.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list holds no filters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FilterList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for filter in &self.0 {
            write!(f, "{}", filter)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FilterList {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One grammar production of a filter.
///
/// Display renders the fragment that sits inside the enclosing parentheses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Component {
    /// `attr=*`
    Presence {
        /// The attribute that must be present.
        attribute: String,
    },

    /// `attr<op>value`
    SimpleItem(SimpleItem),

    /// `attr=pattern` where the pattern keeps its `*` wildcards.
    Substring {
        /// The attribute description.
        attribute: String,
        /// The pattern, wildcards included.
        pattern: String,
    },

    /// `&` followed by one or more filters.
    And(FilterList),

    /// `|` followed by one or more filters.
    Or(FilterList),

    /// `!` followed by exactly one filter.
    Not(Box<Filter>),

    /// Filters concatenated with no operator. Only renders as a fragment;
    /// a [`Filter`] never owns one.
    List(FilterList),
}

impl Component {
    /// Classifies an `attribute<op>value` assertion the way the parser does:
    /// `=*` is presence, an `=` value containing `*` is a substring, and
    /// everything else is a simple item.
    pub(crate) fn assertion(
        attribute: impl Into<String>,
        filter_type: FilterType,
        value: impl Into<String>,
    ) -> Self {
        let attribute = attribute.into();
        let value = value.into();
        match filter_type {
            FilterType::Equal if value == "*" => Component::Presence { attribute },
            FilterType::Equal if value.contains('*') => Component::Substring {
                attribute,
                pattern: value,
            },
            _ => Component::SimpleItem(SimpleItem {
                attribute,
                value,
                filter_type,
            }),
        }
    }

    /// Reclassifies assertion components so that equal trees render equal
    /// strings.
    fn normalized(self) -> Self {
        match self {
            Component::SimpleItem(item) => {
                Component::assertion(item.attribute, item.filter_type, item.value)
            }
            Component::Substring { attribute, pattern } => {
                Component::assertion(attribute, FilterType::Equal, pattern)
            }
            other => other,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Presence { attribute } => write!(f, "{}=*", attribute),
            Component::SimpleItem(item) => write!(
                f,
                "{}{}{}",
                item.attribute,
                item.filter_type.symbol(),
                item.value
            ),
            Component::Substring { attribute, pattern } => write!(f, "{}={}", attribute, pattern),
            Component::And(list) => write!(f, "&{}", list),
            Component::Or(list) => write!(f, "|{}", list),
            Component::Not(inner) => write!(f, "!{}", inner),
            Component::List(list) => write!(f, "{}", list),
        }
    }
}

/// A complete search filter.
///
/// Owns exactly one [`Component`]. Equality is structural. The default
/// filter is `(objectClass=*)`, which matches every entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filter {
    component: Component,
}

impl Filter {
    /// Creates the match-anything filter `(objectClass=*)`.
    pub fn new() -> Self {
        Self::presence(OBJECT_CLASS)
    }

    /// Wraps a component.
    ///
    /// Simple items and substrings are reclassified as the parser would read
    /// their rendering, so `uid=*` given as a simple item becomes a presence
    /// test.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::BareList` for [`Component::List`].
    pub fn from_component(component: Component) -> FilterResult<Self> {
        match component {
            Component::List(_) => Err(FilterError::BareList),
            other => Ok(Self::wrap(other.normalized())),
        }
    }

    /// Wraps a component built inside the crate, already classified.
    pub(crate) fn wrap(component: Component) -> Self {
        Self { component }
    }

    /// Returns the owned component.
    pub fn component(&self) -> &Component {
        &self.component
    }

    /// Consumes the filter and returns its component.
    pub fn into_component(self) -> Component {
        self.component
    }

    /// Returns the clause list of an `&` or `|` filter.
    pub fn clauses(&self) -> Option<&FilterList> {
        match &self.component {
            Component::And(list) | Component::Or(list) => Some(list),
            _ => None,
        }
    }

    /// Renders the component without the enclosing parentheses.
    pub fn fragment(&self) -> String {
        self.component.to_string()
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Component> for Filter {
    type Error = FilterError;

    fn try_from(component: Component) -> FilterResult<Self> {
        Self::from_component(component)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.component)
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        FilterParser::parse(&text).map_err(serde::de::Error::custom)
    }
}
