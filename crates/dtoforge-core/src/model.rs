use dtoforge_schema::{
    config::{Access, ValidationRule},
    types::{TypePath, Value},
};
use serde::{Deserialize, Serialize};

///
/// TargetKind
///
/// `Value` targets carry built-in structural equality (derived), so explicit
/// equality synthesis is skipped for them.
///

#[derive(Clone, Copy, Default, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TargetKind {
    #[default]
    Plain,
    Value,
}

///
/// RuleBinding
///
/// One aggregated validation rule with its optional error message.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RuleBinding {
    pub rule: ValidationRule,
    pub message: Option<String>,
}

///
/// Constraints
///
/// Secondary constraint fields; `None` always means unset.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Constraints {
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub range_min: Option<f64>,
    pub range_max: Option<f64>,
    pub pattern: Option<String>,
}

impl Constraints {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.range_min.is_none()
            && self.range_max.is_none()
            && self.pattern.is_none()
    }
}

///
/// PropertyProjection
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PropertyProjection {
    /// Resolved target property name.
    pub name: String,

    /// Name of the property on the source type.
    pub source_name: String,

    /// Resolved type, with forced nullability already applied.
    pub value: Value,

    /// Declared type on the source, before overrides and nullability shifts;
    /// mappers need both sides.
    pub source_value: Value,

    pub has_default: bool,
    pub default: Option<String>,

    /// Explicit order value; unordered entries sort after all ordered ones,
    /// keeping declaration order among themselves.
    pub order: Option<i32>,

    pub required: bool,
    pub rules: Vec<RuleBinding>,
    pub constraints: Constraints,
    pub description: Option<String>,

    /// Target DTO path when the item is a `Named` type projected in the same
    /// snapshot; mappers go through that type's own mapper, never inline.
    pub projects_to: Option<TypePath>,
}

impl PropertyProjection {
    /// Whether the resolved item type differs from the declared one, so
    /// mapper copies need a conversion.
    #[must_use]
    pub fn item_converted(&self) -> bool {
        self.value.item != self.source_value.item
    }
}

///
/// ProjectionModel
///
/// The resolved projection: one per source descriptor, structurally
/// comparable, never mutated after resolution.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ProjectionModel {
    pub source_name: String,
    pub source_path: String,

    /// Resolved target type name.
    pub name: String,

    /// Resolved target namespace.
    pub namespace: String,

    pub kind: TargetKind,
    pub access: Access,

    pub parameterless_ctor: bool,
    pub equality: bool,
    pub validation: bool,
    pub documentation: bool,
    pub mappers: bool,
    pub imports: Vec<String>,

    /// The source type has properties the projection does not cover
    /// (ignored, non-public, static, indexer, or dropped); materialization
    /// then falls back to `Default` for the remainder.
    pub source_has_unprojected: bool,

    pub properties: Vec<PropertyProjection>,
}

impl ProjectionModel {
    /// Crate-relative path of the target type.
    #[must_use]
    pub fn target_path(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }

    #[must_use]
    pub fn find_property(&self, name: &str) -> Option<&PropertyProjection> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Every property item supports `Eq`/`Hash` derives (primitive,
    /// non-float); gates the extra derives on value-semantics targets.
    #[must_use]
    pub fn all_properties_hashable(&self) -> bool {
        self.properties.iter().all(|p| {
            p.value
                .item
                .primitive()
                .is_some_and(dtoforge_schema::types::Primitive::supports_hash)
        })
    }
}
