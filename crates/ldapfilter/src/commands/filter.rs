//! Filter commands: parse, expr, and, item.

use ldap_filter_rs::{escape_value, Expression, Filter, FilterResult, FilterType};

use super::config::Config;
use super::{CommandContext, Result};
use crate::cli::ItemType;
use crate::output::{format_filter_json, format_tree, format_tree_json};

/// Options for the parse command.
pub struct ParseOptions {
    /// Filter string.
    pub filter: String,
    /// Print the component tree.
    pub tree: bool,
    /// Skip the configured base filter.
    pub no_base: bool,
}

/// Options for the item command.
pub struct ItemOptions {
    /// Attribute description.
    pub attribute: String,
    /// Assertion value.
    pub value: String,
    /// Comparison operator.
    pub filter_type: ItemType,
    /// Escape the value first.
    pub escape: bool,
}

impl From<ItemType> for FilterType {
    fn from(item_type: ItemType) -> Self {
        match item_type {
            ItemType::Equal => FilterType::Equal,
            ItemType::Approx => FilterType::Approx,
            ItemType::Greater => FilterType::Greater,
            ItemType::Less => FilterType::Less,
        }
    }
}

/// Applies the configured base filter, if any.
fn apply_base(config: &Config, filter: Filter) -> Filter {
    match &config.base_filter {
        Some(base) => {
            log::debug!("joining base filter {}", base);
            base.clone() & filter
        }
        None => filter,
    }
}

/// Prints a filter as its canonical string, tree, or JSON.
fn print_filter(ctx: &CommandContext, filter: &Filter, tree: bool) -> Result<()> {
    if ctx.json_output {
        let mut output = format_filter_json(filter);
        if tree {
            output["tree"] = format_tree_json(filter);
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if tree {
        println!("{}", format_tree(filter, ctx.use_colors));
    } else {
        println!("{}", filter);
    }
    Ok(())
}

/// Executes the parse command.
pub fn execute_parse(ctx: &CommandContext, config: &Config, opts: &ParseOptions) -> Result<()> {
    let parsed = Filter::parse(&opts.filter)?;
    if ctx.verbose {
        eprintln!("parsed: {}", parsed);
    }

    let filter = if opts.no_base {
        parsed
    } else {
        apply_base(config, parsed)
    };
    print_filter(ctx, &filter, opts.tree)
}

/// Executes the expr command.
pub fn execute_expr(ctx: &CommandContext, literal: &str, tree: bool) -> Result<()> {
    let expression = Expression::from_json_str(literal)?;
    log::debug!("symbolic literal: {:?}", expression);
    let filter = Filter::from_expression(expression)?;
    print_filter(ctx, &filter, tree)
}

/// Executes the and command.
pub fn execute_and(ctx: &CommandContext, filters: &[String]) -> Result<()> {
    let parsed = filters
        .iter()
        .map(|f| Filter::parse(f))
        .collect::<FilterResult<Vec<_>>>()?;
    let combined = Filter::all(parsed);
    print_filter(ctx, &combined, false)
}

/// Executes the item command.
pub fn execute_item(ctx: &CommandContext, opts: &ItemOptions) -> Result<()> {
    let value = if opts.escape {
        escape_value(&opts.value).into_owned()
    } else {
        opts.value.clone()
    };
    let filter = Filter::item(opts.attribute.as_str(), value, opts.filter_type.into());
    print_filter(ctx, &filter, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_conversion() {
        assert_eq!(FilterType::from(ItemType::Equal), FilterType::Equal);
        assert_eq!(FilterType::from(ItemType::Approx), FilterType::Approx);
        assert_eq!(FilterType::from(ItemType::Greater), FilterType::Greater);
        assert_eq!(FilterType::from(ItemType::Less), FilterType::Less);
    }

    #[test]
    fn test_apply_base_without_config_is_identity() {
        let filter = Filter::equal("uid", "jdoe");
        assert_eq!(apply_base(&Config::default(), filter.clone()), filter);
    }

    #[test]
    fn test_apply_base_joins_with_and() {
        let config = Config {
            base_filter: Some(Filter::equal("objectClass", "person")),
            ..Config::default()
        };
        let filter = apply_base(&config, Filter::equal("uid", "jdoe"));
        assert_eq!(filter.to_string(), "(&(objectClass=person)(uid=jdoe))");
    }

    #[test]
    fn test_apply_promiscuous_base_is_identity() {
        let config = Config {
            base_filter: Some(Filter::new()),
            ..Config::default()
        };
        let filter = Filter::presence("mail");
        assert_eq!(apply_base(&config, filter.clone()), filter);
    }
}
