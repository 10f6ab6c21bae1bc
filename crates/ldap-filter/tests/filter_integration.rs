//! Integration tests for the public filter API.
//!
//! These exercise the crate the way a directory search layer would: build
//! filters from strings and symbolic literals, combine them, and hand the
//! canonical string onward.

use ldap_filter_rs::rdn::{attribute_pairs, rdn_filter};
use ldap_filter_rs::{escape_value, Component, Expression, Filter, FilterError};
use serde::Deserialize;

/// Canonical strings for the documented construction cases.
#[test]
fn test_documented_construction_cases() {
    let cases: Vec<(Filter, &str)> = vec![
        (Filter::new(), "(objectClass=*)"),
        (
            Filter::from_expression(Expression::attribute("uid")).unwrap(),
            "(uid=*)",
        ),
        (Filter::equal("uid", "bigthung"), "(uid=bigthung)"),
        (
            Filter::from_expression(
                Expression::from_json_str(r#"[":and", [":uid", "kunglung"], [":name", "chunger"]]"#)
                    .unwrap(),
            )
            .unwrap(),
            "(&(uid=kunglung)(name=chunger))",
        ),
        (
            Filter::from_expression(
                Expression::from_json_str(r#"[":or", {"uid": ["lar", "bin", "fon", "guh"]}]"#)
                    .unwrap(),
            )
            .unwrap(),
            "(|(uid=lar)(uid=bin)(uid=fon)(uid=guh))",
        ),
        (
            Filter::from_expression(
                Expression::from_json_str(r#"[":not", [":uid", "kunglung"]]"#).unwrap(),
            )
            .unwrap(),
            "(!(uid=kunglung))",
        ),
    ];

    for (filter, expected) in cases {
        assert_eq!(filter.to_string(), expected);
        assert_eq!(Filter::parse(expected).unwrap(), filter);
    }
}

#[test]
fn test_search_layer_workflow() {
    // A base restriction, a user-supplied query and an RDN lookup joined together.
    let base: Filter = "(objectClass=inetOrgPerson)".parse().unwrap();
    let query = Filter::parse("(|(mail=*@example.com)(cn~=jensen))").unwrap();
    let entry = rdn_filter("uid=bjensen").unwrap();

    let combined = base & query & entry;
    assert_eq!(
        combined.to_string(),
        "(&(&(objectClass=inetOrgPerson)(|(mail=*@example.com)(cn~=jensen)))(uid=bjensen))"
    );
    assert_eq!(Filter::parse(&combined.to_string()).unwrap(), combined);
}

#[test]
fn test_promiscuous_base_leaves_query_untouched() {
    let query = Filter::parse("(cn=*)").unwrap();
    let combined = Filter::default() + query.clone();
    assert_eq!(combined, query);
}

#[test]
fn test_substring_component_fields() {
    let filter = Filter::parse("(cn=Bar*ba*a)").unwrap();
    match filter.component() {
        Component::Substring { attribute, pattern } => {
            assert_eq!(attribute, "cn");
            assert_eq!(pattern, "Bar*ba*a");
        }
        other => panic!("expected substring, got {:?}", other),
    }
}

#[test]
fn test_user_input_is_escaped_before_building() {
    let hostile = "*)(objectClass=*";
    let filter = Filter::equal("uid", escape_value(hostile));
    assert_eq!(filter.to_string(), r"(uid=\2a\29\28objectClass=\2a)");
    assert!(!filter.is_promiscuous());
}

#[test]
fn test_rdn_pairs_seed_attributes() {
    let pairs = attribute_pairs("cn=Barbara Jensen + mail=bjensen@example.com").unwrap();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[1], ("mail".to_string(), "bjensen@example.com".to_string()));
}

#[test]
fn test_errors_are_reported_not_partial() {
    let err = Filter::parse("(&(uid=a)(whatev!))").unwrap_err();
    assert_eq!(err, FilterError::expression("whatev!"));

    let err = Filter::from_expression(
        Expression::from_json_str(r#"[":and", ["uid", "a"], [":not", ["cn", "b"], ["cn", "c"]]]"#)
            .unwrap(),
    )
    .unwrap_err();
    assert!(err.is_usage_error());
}

#[derive(Debug, Deserialize)]
struct SearchSettings {
    base_filter: Filter,
    extra: Option<Filter>,
}

#[test]
fn test_filter_deserializes_from_toml() {
    let settings: SearchSettings = toml::from_str(
        r#"
base_filter = "objectClass=person"
extra = "(!(accountStatus=disabled))"
"#,
    )
    .unwrap();

    assert_eq!(settings.base_filter, Filter::equal("objectClass", "person"));
    assert_eq!(
        settings.extra.unwrap().to_string(),
        "(!(accountStatus=disabled))"
    );
}

#[test]
fn test_invalid_filter_in_toml_is_rejected() {
    let result: Result<SearchSettings, _> = toml::from_str(r#"base_filter = "(&)""#);
    assert!(result.is_err());
}
