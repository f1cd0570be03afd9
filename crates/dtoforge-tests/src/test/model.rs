use super::valid_customer;
use crate::t::dto::{AddressDto, CustomerDto, EmptyDto, project_customer};

#[test]
fn parameterless_ctor_applies_configured_defaults() {
    let dto = CustomerDto::default();

    assert_eq!(dto.id, 0);
    assert_eq!(dto.name, String::new());
    assert_eq!(dto.nickname, None);
    // Configured default expression.
    assert_eq!(dto.score, 7);
    assert_eq!(dto.address, AddressDto::default());
}

#[test]
fn field_initializing_ctor_follows_resolution_order() {
    let dto = CustomerDto::new(
        5,
        "Ada".to_string(),
        "ada@example.com".to_string(),
        Some("ace".to_string()),
        50,
        AddressDto::new("1 Main St".to_string(), "12345".to_string()),
    );

    assert_eq!(dto.id, 5);
    assert_eq!(dto.score, 50);
    assert_eq!(dto.address.street, "1 Main St");
}

#[test]
fn explicit_equality_compares_every_property() {
    let a = project_customer(Some(&valid_customer())).expect("project");
    let b = a.clone();
    assert_eq!(a, b);

    let mut c = a.clone();
    c.score = 99;
    assert_ne!(a, c);

    let mut d = a.clone();
    d.nickname = None;
    assert_ne!(a, d);

    let mut e = a.clone();
    e.address.zip = "00000".to_string();
    assert_ne!(a, e);
}

#[test]
fn hash_code_folds_every_property() {
    let a = project_customer(Some(&valid_customer())).expect("project");
    let b = a.clone();
    assert_eq!(a.hash_code(), b.hash_code());

    let mut c = a.clone();
    c.score = 99;
    assert_ne!(a.hash_code(), c.hash_code());
}

#[test]
fn value_semantics_targets_use_derived_equality() {
    let a = AddressDto::new("1 Main St".to_string(), "12345".to_string());
    let b = AddressDto::new("1 Main St".to_string(), "12345".to_string());
    let c = AddressDto::new("2 Side St".to_string(), "12345".to_string());

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn zero_property_instances_always_compare_equal() {
    assert_eq!(EmptyDto::default(), EmptyDto::default());
    assert_eq!(EmptyDto::default().hash_code(), 0);
}

#[test]
fn display_lists_properties() {
    let dto = project_customer(Some(&valid_customer())).expect("project");
    let rendered = dto.to_string();

    assert!(rendered.starts_with("CustomerDto { "));
    assert!(rendered.contains("id: 1"));
    assert!(rendered.contains("name: \"Ada\""));

    assert_eq!(EmptyDto::default().to_string(), "EmptyDto");
}
