use super::valid_customer;
use crate::t::{
    Customer,
    dto::{
        CustomerDto, materialize_customer, materialize_customer_iter, merge_customer,
        merge_empty, project_customer, project_customer_iter, project_empty,
    },
};
use dtoforge::mapper::MapError;

#[test]
fn project_copies_every_projected_property() {
    let customer = valid_customer();
    let dto = project_customer(Some(&customer)).expect("project");

    assert_eq!(dto.id, 1);
    assert_eq!(dto.name, "Ada");
    assert_eq!(dto.email, "ada@example.com");
    assert_eq!(dto.nickname.as_deref(), Some("ace"));
    assert_eq!(dto.score, 7);
    assert_eq!(dto.address.street, "1 Main St");
    assert_eq!(dto.address.zip, "12345");
}

#[test]
fn round_trip_preserves_non_ignored_properties() {
    let customer = valid_customer();
    let dto = project_customer(Some(&customer)).expect("project");
    let back = materialize_customer(Some(&dto)).expect("materialize");

    assert_eq!(back.id, customer.id);
    assert_eq!(back.name, customer.name);
    assert_eq!(back.email, customer.email);
    assert_eq!(back.nickname, customer.nickname);
    assert_eq!(back.score, customer.score);
    assert_eq!(back.address, customer.address);
    // The ignored property never crosses; materialization fills its default.
    assert_eq!(back.password, String::new());
}

#[test]
fn mirror_round_trip_preserves_the_dto() {
    let dto = project_customer(Some(&valid_customer())).expect("project");
    let again = project_customer(Some(&materialize_customer(Some(&dto)).expect("materialize")))
        .expect("project");

    assert_eq!(again, dto);
}

#[test]
fn absent_arguments_fail_with_missing_argument() {
    assert_eq!(
        project_customer(None).unwrap_err(),
        MapError::MissingArgument("source")
    );
    assert_eq!(
        materialize_customer(None).unwrap_err(),
        MapError::MissingArgument("dto")
    );

    let dto = project_customer(Some(&valid_customer())).expect("project");
    assert_eq!(
        merge_customer(None, Some(&dto)).unwrap_err(),
        MapError::MissingArgument("existing")
    );

    let mut existing = valid_customer();
    assert_eq!(
        merge_customer(Some(&mut existing), None).unwrap_err(),
        MapError::MissingArgument("dto")
    );
}

#[test]
fn merge_updates_in_place_and_leaves_unprojected_alone() {
    let mut existing = valid_customer();

    let mut dto = project_customer(Some(&existing)).expect("project");
    dto.name = "Grace".to_string();
    dto.nickname = None;
    dto.score = 42;
    dto.address.zip = "99999".to_string();

    let merged = merge_customer(Some(&mut existing), Some(&dto)).expect("merge");
    assert_eq!(merged.name, "Grace");

    assert_eq!(existing.name, "Grace");
    assert_eq!(existing.nickname, String::new());
    assert_eq!(existing.score, 42);
    assert_eq!(existing.address.zip, "99999");
    // Untouched by the merge.
    assert_eq!(existing.password, "secret");
    assert_eq!(existing.id, 1);
}

#[test]
fn iter_variants_are_lazy_ordered_and_restartable() {
    let mut second = valid_customer();
    second.id = 2;
    second.name = "Grace".to_string();
    let customers = vec![valid_customer(), second];

    let ids: Vec<i32> = project_customer_iter(&customers)
        .map(|r| r.expect("project").id)
        .collect();
    assert_eq!(ids, vec![1, 2]);

    // Restart over the same input; the input is not consumed or mutated.
    let names: Vec<String> = project_customer_iter(&customers)
        .map(|r| r.expect("project").name)
        .collect();
    assert_eq!(names, vec!["Ada".to_string(), "Grace".to_string()]);
    assert_eq!(customers.len(), 2);

    let dtos: Vec<CustomerDto> = project_customer_iter(&customers)
        .collect::<Result<_, _>>()
        .expect("project all");
    let back: Vec<Customer> = materialize_customer_iter(&dtos)
        .collect::<Result<_, _>>()
        .expect("materialize all");
    assert_eq!(back[1].name, "Grace");
}

#[test]
fn zero_property_type_still_maps() {
    let empty = crate::t::Empty {};
    let dto = project_empty(Some(&empty)).expect("project");

    let mut existing = crate::t::Empty {};
    merge_empty(Some(&mut existing), Some(&dto)).expect("merge");

    assert_eq!(
        project_empty(None).unwrap_err(),
        MapError::MissingArgument("source")
    );
}
