//! ## Crate layout
//! - `diagnostic`: diagnostic records, severity classification, and the
//!   per-type emitter.
//! - `model`: the resolved projection model, the immutable value synthesis
//!   consumes.
//! - `resolve`: the pure resolver turning a descriptor snapshot into models
//!   plus diagnostics.
//!
//! Everything in this crate is a pure function over immutable inputs; the
//! host may run it concurrently per type and cache results by structural
//! equality of the descriptor snapshot.

pub mod diagnostic;
pub mod model;
pub mod resolve;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        diagnostic::{Diagnostic, DiagnosticKind, Emitter, Location, Severity},
        model::{Constraints, ProjectionModel, PropertyProjection, RuleBinding, TargetKind},
        resolve::{Resolution, ResolveContext, resolve_all, resolve_type},
    };
}
