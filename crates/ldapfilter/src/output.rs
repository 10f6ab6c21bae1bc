//! Output formatting utilities for the ldapfilter CLI.
//!
//! Filters print as their canonical string by default. The tree views show
//! the component structure, as indented text or as JSON.

use ldap_filter_rs::{Component, Filter, FilterType};
use owo_colors::OwoColorize;
use serde_json::{json, Value};

/// Indentation per tree level.
const TREE_INDENT: &str = "  ";

fn filter_type_name(filter_type: FilterType) -> &'static str {
    match filter_type {
        FilterType::Equal => "equal",
        FilterType::Approx => "approx",
        FilterType::Greater => "greater",
        FilterType::Less => "less",
    }
}

/// Formats a filter as JSON with its promiscuity.
pub fn format_filter_json(filter: &Filter) -> Value {
    json!({
        "filter": filter.to_string(),
        "promiscuous": filter.is_promiscuous(),
    })
}

/// Formats the component tree of a filter as JSON.
pub fn format_tree_json(filter: &Filter) -> Value {
    match filter.component() {
        Component::Presence { attribute } => json!({
            "type": "presence",
            "attribute": attribute,
        }),
        Component::SimpleItem(item) => json!({
            "type": filter_type_name(item.filter_type),
            "attribute": item.attribute,
            "value": item.value,
        }),
        Component::Substring { attribute, pattern } => json!({
            "type": "substring",
            "attribute": attribute,
            "pattern": pattern,
        }),
        Component::And(list) | Component::Or(list) | Component::List(list) => {
            let kind = match filter.component() {
                Component::And(_) => "and",
                Component::Or(_) => "or",
                _ => "list",
            };
            json!({
                "type": kind,
                "clauses": list.iter().map(format_tree_json).collect::<Vec<_>>(),
            })
        }
        Component::Not(inner) => json!({
            "type": "not",
            "clause": format_tree_json(inner),
        }),
    }
}

/// Formats the component tree of a filter as indented text.
pub fn format_tree(filter: &Filter, use_colors: bool) -> String {
    let mut lines = Vec::new();
    push_tree_lines(filter, 0, use_colors, &mut lines);
    lines.join("\n")
}

fn push_tree_lines(filter: &Filter, depth: usize, use_colors: bool, lines: &mut Vec<String>) {
    let indent = TREE_INDENT.repeat(depth);
    let label = |name: &str| {
        if use_colors {
            name.cyan().bold().to_string()
        } else {
            name.to_string()
        }
    };

    match filter.component() {
        Component::Presence { attribute } => {
            lines.push(format!("{}{} {}", indent, label("presence"), attribute));
        }
        Component::SimpleItem(item) => {
            lines.push(format!(
                "{}{} {}",
                indent,
                label(filter_type_name(item.filter_type)),
                filter.fragment()
            ));
        }
        Component::Substring { .. } => {
            lines.push(format!(
                "{}{} {}",
                indent,
                label("substring"),
                filter.fragment()
            ));
        }
        Component::And(list) | Component::Or(list) | Component::List(list) => {
            let kind = match filter.component() {
                Component::And(_) => "and",
                Component::Or(_) => "or",
                _ => "list",
            };
            lines.push(format!("{}{}", indent, label(kind)));
            for child in list {
                push_tree_lines(child, depth + 1, use_colors, lines);
            }
        }
        Component::Not(inner) => {
            lines.push(format!("{}{}", indent, label("not")));
            push_tree_lines(inner, depth + 1, use_colors, lines);
        }
    }
}
