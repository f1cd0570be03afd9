//! End-to-end pipeline checks over the public facade.

use dtoforge::prelude::*;
use dtoforge_schema::extract;

fn prop(name: &str, value: Value) -> SourcePropertyDescriptor {
    SourcePropertyDescriptor::new(name, value)
}

fn customer() -> SourceTypeDescriptor {
    let mut password = prop("password", Value::prim(Primitive::Text));
    password.config.ignore = true;

    SourceTypeDescriptor::new("t", "Customer").with_properties(vec![
        prop("id", Value::prim(Primitive::Int32)),
        prop("name", Value::prim(Primitive::Text)),
        password,
    ])
}

fn flat(s: &str) -> String {
    s.split_whitespace().collect()
}

#[test]
fn customer_projection_end_to_end() {
    let output = Generator::new(vec![customer()]).run();

    assert!(!output.has_errors());
    assert_eq!(output.types.len(), 1);

    let artifact = output.types[0].artifact.as_ref().expect("artifact");
    assert_eq!(artifact.name, "CustomerDto.g");
    assert_eq!(artifact.namespace, "t::dto");

    let code = flat(&artifact.render());
    assert!(code.contains("pubstructCustomerDto"));
    assert!(code.contains("pubfnnew(id:i32,name:String)->Self"));
    assert!(!code.contains("password"));

    assert_eq!(output.mappers.len(), 1);
    assert_eq!(output.mappers[0].name, "Mapper.g");
    assert!(!flat(&output.mappers[0].render()).contains("password"));
}

#[test]
fn rendered_namespaces_parse_as_rust() {
    let descriptors = vec![
        customer(),
        SourceTypeDescriptor::new("t", "Address")
            .with_properties(vec![prop("street", Value::prim(Primitive::Text))]),
    ];
    let output = Generator::new(descriptors).run();

    let namespaces = output.render_namespaces();
    assert_eq!(namespaces.keys().collect::<Vec<_>>(), vec!["t::dto"]);
    for source in namespaces.values() {
        syn::parse_file(source).expect("generated namespace parses");
    }

    let tree = output.render_module_tree();
    syn::parse_file(&tree).expect("module tree parses");
    assert!(tree.contains("pub mod t {"));
    assert!(tree.contains("pub mod dto {"));
}

#[test]
fn failed_types_are_excluded_but_reported() {
    let mut orphan = SourceTypeDescriptor::new("t", "Orphan");
    orphan.config = None;

    let output = Generator::new(vec![orphan, customer()]).run();

    assert!(output.has_errors());
    assert!(output.types[0].artifact.is_none());
    assert_eq!(output.types[0].diagnostics[0].kind, DiagnosticKind::MissingMarker);

    // The healthy type is unaffected.
    assert!(output.types[1].artifact.is_some());
    assert_eq!(output.mappers.len(), 1);
    assert!(flat(&output.mappers[0].render()).contains("project_customer"));
    assert!(!flat(&output.mappers[0].render()).contains("project_orphan"));
}

#[test]
fn duplicate_collision_keeps_first_artifact() {
    let second = SourceTypeDescriptor::new("t", "Client").with_config(TypeConfig {
        name: Some("CustomerDto".to_string()),
        ..TypeConfig::default()
    });

    let output = Generator::new(vec![customer(), second]).run();

    assert!(output.types[0].artifact.is_some());
    assert!(output.types[1].artifact.is_none());
    assert_eq!(
        output.types[1].diagnostics[0].kind,
        DiagnosticKind::DuplicateName
    );
}

#[test]
fn host_boundary_receives_artifacts_and_diagnostics() {
    #[derive(Default)]
    struct RecordingHost {
        artifacts: Vec<String>,
        reports: Vec<String>,
    }

    impl GenerationHost for RecordingHost {
        fn write_artifact(&mut self, artifact: &Artifact) {
            self.artifacts.push(artifact.name.clone());
        }

        fn report(&mut self, diagnostic: &Diagnostic) {
            self.reports.push(diagnostic.kind.code().to_string());
        }
    }

    let mut orphan = SourceTypeDescriptor::new("t", "Orphan");
    orphan.config = None;

    let output = Generator::new(vec![customer(), orphan]).run();
    let mut host = RecordingHost::default();
    output.write_to(&mut host);

    assert_eq!(host.artifacts, vec!["CustomerDto.g", "Mapper.g"]);
    assert_eq!(host.reports, vec!["DTO001"]);
}

#[test]
fn extractor_feeds_the_pipeline() {
    let descriptors = extract::extract_source(
        "shop",
        r#"
        #[dto(equality)]
        pub struct Product {
            pub id: i64,
            pub name: String,
            #[dto_ignore]
            pub sku: String,
        }
        "#,
    )
    .expect("extract");

    let output = Generator::new(descriptors).run();
    assert!(!output.has_errors());

    let artifact = output.types[0].artifact.as_ref().expect("artifact");
    assert_eq!(artifact.name, "ProductDto.g");
    assert_eq!(artifact.namespace, "shop::dto");
    assert!(!flat(&artifact.render()).contains("sku"));
}

#[test]
fn diagnostics_json_round_trips() {
    let mut orphan = SourceTypeDescriptor::new("t", "Orphan");
    orphan.config = None;

    let output = Generator::new(vec![orphan]).run();
    let json = output.diagnostics_json();

    let parsed: Vec<Diagnostic> = serde_json::from_str(&json).expect("parse diagnostics");
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].kind, DiagnosticKind::MissingMarker);
}

#[test]
fn output_is_deterministic() {
    let descriptors = vec![customer(), SourceTypeDescriptor::new("u", "Order")];

    let first = Generator::new(descriptors.clone()).run();
    let second = Generator::new(descriptors).run();

    assert_eq!(first.render_module_tree(), second.render_module_tree());
    assert_eq!(first.diagnostics_json(), second.diagnostics_json());
}
