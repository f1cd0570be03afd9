//! ## Crate layout
//! - `types`: the type grammar a property can declare or resolve to.
//! - `config`: typed class-level and property-level configuration, populated
//!   once at extraction time.
//! - `descriptor`: the immutable per-pass snapshot of a source type.
//! - `provider`: the input boundary trait.
//! - `extract`: a `syn`-backed provider that reads `#[dto(...)]` markers from
//!   already-parsed Rust source.

pub mod config;
pub mod descriptor;
pub mod extract;
pub mod provider;
pub mod types;

use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::*,
        descriptor::*,
        provider::SchemaProvider,
        types::{Cardinality, Primitive, TypePath, TypeRef, Value},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    ExtractError(#[from] extract::ExtractError),
}
