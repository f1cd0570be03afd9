//! Runs the full generation pipeline over the fixture descriptors and writes
//! one source file per target namespace into `OUT_DIR`; `lib.rs` mounts them
//! with `include!`.

use dtoforge::prelude::*;
use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo::rerun-if-changed=build.rs");

    let output = Generator::new(descriptors()).run();
    assert!(
        !output.has_errors(),
        "fixture generation failed: {}",
        output.diagnostics_json()
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set for build scripts"));
    for (namespace, source) in output.render_namespaces() {
        let file = out_dir.join(format!("{}.rs", namespace.replace("::", "_")));
        fs::write(&file, source).expect("write generated namespace");
    }
}

fn prop(name: &str, value: Value) -> SourcePropertyDescriptor {
    SourcePropertyDescriptor::new(name, value)
}

fn descriptors() -> Vec<SourceTypeDescriptor> {
    let customer = SourceTypeDescriptor::new("t", "Customer")
        .with_config(TypeConfig {
            equality: true,
            validation: true,
            ..TypeConfig::default()
        })
        .with_properties(vec![
            prop("id", Value::prim(Primitive::Int32)),
            prop("name", Value::prim(Primitive::Text)).with_config(PropertyConfig {
                min_length: Some(2),
                max_length: Some(10),
                ..Default::default()
            }),
            prop("email", Value::prim(Primitive::Text)).with_config(PropertyConfig {
                validation: vec![ValidationSpec {
                    email: true,
                    ..Default::default()
                }],
                ..Default::default()
            }),
            prop("nickname", Value::prim(Primitive::Text)).with_config(PropertyConfig {
                force_nullable: true,
                ..Default::default()
            }),
            prop("score", Value::prim(Primitive::Int64)).with_config(PropertyConfig {
                default_value: Some("7".to_string()),
                range_min: Some(0.0),
                range_max: Some(100.0),
                validation: vec![ValidationSpec {
                    custom: Some("t::non_negative".into()),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            prop("address", Value::one(TypeRef::named("t::Address"))),
            prop("password", Value::prim(Primitive::Text)).with_config(PropertyConfig {
                ignore: true,
                ..Default::default()
            }),
        ]);

    let address = SourceTypeDescriptor::new("t", "Address")
        .with_config(TypeConfig {
            value_semantics: true,
            ..TypeConfig::default()
        })
        .with_properties(vec![
            prop("street", Value::prim(Primitive::Text)),
            prop("zip", Value::prim(Primitive::Text)),
        ]);

    let empty = SourceTypeDescriptor::new("t", "Empty").with_config(TypeConfig {
        equality: true,
        ..TypeConfig::default()
    });

    vec![customer, address, empty]
}
