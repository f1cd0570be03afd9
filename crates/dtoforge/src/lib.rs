//! ## Crate layout
//! - `generate`: the generation pipeline and the host output boundary.
//! - `mapper`: runtime error type referenced by generated mapper code.
//! - `rules`: runtime validation helpers referenced by generated validation
//!   code.
//! - `types`: scalar type aliases generated code projects onto.
//!
//! The resolution and synthesis cores are re-exported from their own crates;
//! generated code only ever reaches back through `::dtoforge::` paths.

pub use dtoforge_core::{diagnostic, model, resolve};
pub use dtoforge_schema as schema;
pub use dtoforge_synth as synth;

pub mod generate;
pub mod mapper;
pub mod rules;
pub mod types;

/// Workspace version re-export for downstream tooling and tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        diagnostic::{Diagnostic, DiagnosticKind, Severity},
        generate::{GenerationHost, GenerationOutput, Generator, TypeOutput},
        model::{ProjectionModel, PropertyProjection, TargetKind},
        resolve::{Resolution, resolve_all},
        schema::{
            config::{PropertyConfig, TypeConfig, ValidationSpec},
            descriptor::{
                AncestorLayer, SourcePropertyDescriptor, SourceTypeDescriptor, Visibility,
            },
            provider::SchemaProvider,
            types::{Cardinality, Primitive, TypeRef, Value},
        },
        synth::Artifact,
    };
}
