//! Value commands: rdn, escape.

use ldap_filter_rs::escape_value;
use ldap_filter_rs::rdn::{attribute_pairs, rdn_filter};

use super::{CommandContext, Result};
use crate::output::format_filter_json;

/// Executes the rdn command.
///
/// Prints `attribute=value` per line, or the matching filter with `--filter`.
pub fn execute_rdn(ctx: &CommandContext, rdn: &str, as_filter: bool) -> Result<()> {
    if as_filter {
        let filter = rdn_filter(rdn)?;
        if ctx.json_output {
            println!(
                "{}",
                serde_json::to_string_pretty(&format_filter_json(&filter))?
            );
        } else {
            println!("{}", filter);
        }
        return Ok(());
    }

    let pairs = attribute_pairs(rdn)?;
    if ctx.json_output {
        let output: Vec<_> = pairs
            .iter()
            .map(|(attribute, value)| {
                serde_json::json!({
                    "attribute": attribute,
                    "value": value,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for (attribute, value) in &pairs {
            println!("{}={}", attribute, value);
        }
    }

    Ok(())
}

/// Executes the escape command.
pub fn execute_escape(ctx: &CommandContext, value: &str) -> Result<()> {
    let escaped = escape_value(value);
    if ctx.json_output {
        let output = serde_json::json!({
            "value": value,
            "escaped": escaped,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", escaped);
    }
    Ok(())
}
