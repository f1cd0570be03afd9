//! ## Crate layout
//! - `shape` / `ctor` / `equality` / `validation` / `display`: independent
//!   sub-synthesizers, each a pure function of the projection model.
//! - `mapper`: the bidirectional mapper surface, aggregated per target
//!   namespace.
//! - `helper`: quoting utilities shared by the synthesizers.
//!
//! Synthesis is pure and deterministic: the same model always produces
//! token-identical artifacts.

pub mod ctor;
pub mod display;
pub mod equality;
pub mod helper;
pub mod mapper;
pub mod shape;
pub mod validation;

use dtoforge_core::model::ProjectionModel;
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::BTreeMap;

/// Artifact name for the per-namespace mapper bundle.
pub const MAPPER_ARTIFACT: &str = "Mapper.g";

///
/// Artifact
///
/// One renderable output unit: `<TargetName>.g` per type, plus one shared
/// `Mapper.g` per target namespace. Immutable once synthesized.
///

#[derive(Clone, Debug)]
pub struct Artifact {
    pub name: String,
    pub namespace: String,
    pub imports: Vec<String>,
    pub tokens: TokenStream,
}

impl Artifact {
    #[must_use]
    pub fn render(&self) -> String {
        self.tokens.to_string()
    }
}

// TokenStream has no structural equality; rendered text stands in for it so
// artifacts stay comparable values.
impl PartialEq for Artifact {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.namespace == other.namespace
            && self.imports == other.imports
            && self.render() == other.render()
    }
}

impl Eq for Artifact {}

/// Synthesize the per-type artifact: type shape, constructors, equality,
/// display, and validation, composed in fixed order and gated by the model's
/// switches.
#[must_use]
pub fn synthesize_type(model: &ProjectionModel) -> Artifact {
    let shape = shape::type_shape(model);
    let ctors = ctor::constructors(model);
    let equality = equality::equality(model).unwrap_or_default();
    let display = display::display(model);
    let validation = validation::validation(model).unwrap_or_default();

    let tokens = quote! {
        #shape
        #ctors
        #equality
        #display
        #validation
    };

    Artifact {
        name: format!("{}.g", model.name),
        namespace: model.namespace.clone(),
        imports: model.imports.clone(),
        tokens,
    }
}

/// Aggregate mapper functions per target namespace, one `Mapper.g` artifact
/// each, in namespace order. Models that opted out of mappers contribute
/// nothing.
#[must_use]
pub fn synthesize_mappers<'a, I>(models: I) -> Vec<Artifact>
where
    I: IntoIterator<Item = &'a ProjectionModel>,
{
    let mut grouped: BTreeMap<String, TokenStream> = BTreeMap::new();

    for model in models {
        if !model.mappers {
            continue;
        }

        let functions = mapper::mapper_functions(model);
        grouped
            .entry(model.namespace.clone())
            .or_default()
            .extend(functions);
    }

    grouped
        .into_iter()
        .map(|(namespace, tokens)| Artifact {
            name: MAPPER_ARTIFACT.to_string(),
            namespace,
            imports: Vec::new(),
            tokens,
        })
        .collect()
}
