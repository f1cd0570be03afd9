use super::valid_customer;
use crate::t::dto::project_customer;

fn codes_for<'a>(
    violations: &'a [dtoforge::rules::Violation],
    field: &str,
) -> Vec<&'a str> {
    violations
        .iter()
        .filter(|v| v.field == field)
        .map(|v| v.rule.as_str())
        .collect()
}

#[test]
fn valid_values_produce_no_violations() {
    let dto = project_customer(Some(&valid_customer())).expect("project");

    assert!(dto.validate().is_empty());
}

#[test]
fn empty_required_text_fails_required_and_min_length() {
    let mut dto = project_customer(Some(&valid_customer())).expect("project");
    dto.name = String::new();

    let violations = dto.validate();
    assert_eq!(codes_for(&violations, "name"), vec!["required", "min_length"]);
}

#[test]
fn malformed_email_fails_the_format_rule() {
    let mut dto = project_customer(Some(&valid_customer())).expect("project");
    dto.email = "not-an-email".to_string();

    let violations = dto.validate();
    assert_eq!(codes_for(&violations, "email"), vec!["email"]);
}

#[test]
fn over_long_text_fails_max_length() {
    let mut dto = project_customer(Some(&valid_customer())).expect("project");
    dto.name = "much too long a name".to_string();

    let violations = dto.validate();
    assert_eq!(codes_for(&violations, "name"), vec!["max_length"]);
}

#[test]
fn out_of_range_numbers_fail_the_range_checks() {
    let mut dto = project_customer(Some(&valid_customer())).expect("project");

    dto.score = 101;
    assert_eq!(codes_for(&dto.validate(), "score"), vec!["range"]);

    // Below the minimum trips both the range check and the custom validator.
    dto.score = -5;
    assert_eq!(codes_for(&dto.validate(), "score"), vec!["custom", "range"]);
}

#[test]
fn custom_validator_message_is_passed_through() {
    let mut dto = project_customer(Some(&valid_customer())).expect("project");
    dto.score = -1;

    let violations = dto.validate();
    let custom = violations
        .iter()
        .find(|v| v.rule == "custom")
        .expect("custom violation");
    assert_eq!(custom.message, "score must not be negative");
}

#[test]
fn optional_nickname_is_never_required() {
    let mut dto = project_customer(Some(&valid_customer())).expect("project");
    dto.nickname = None;

    assert!(codes_for(&dto.validate(), "nickname").is_empty());
}

#[test]
fn violations_report_in_resolution_order() {
    let mut dto = project_customer(Some(&valid_customer())).expect("project");
    dto.name = String::new();
    dto.email = "broken".to_string();
    dto.score = -1;

    let violations = dto.validate();
    let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
    // name checks precede email checks precede score checks.
    assert_eq!(
        fields,
        vec!["name", "name", "email", "score", "score"]
    );
}
