use crate::types::{TypePath, Value};
use darling::{Error as DarlingError, FromMeta};
use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// Access
///

#[derive(
    Clone, Copy, Default, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize,
)]
pub enum Access {
    #[default]
    Public,
    Crate,
}

impl FromMeta for Access {
    fn from_string(s: &str) -> Result<Self, DarlingError> {
        match s {
            "public" => Ok(Self::Public),
            "crate" => Ok(Self::Crate),
            _ => Err(DarlingError::unknown_value(s)),
        }
    }
}

///
/// Nullability
/// tri-state forced-nullability override
///

#[derive(Clone, Copy, Default, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum Nullability {
    #[default]
    Inherit,
    ForceNullable,
    ForceNonNullable,
}

///
/// TypeConfig
/// class-level marker: `#[dto(...)]`
///

#[derive(Clone, Debug, Deserialize, Eq, FromMeta, PartialEq, Serialize)]
pub struct TypeConfig {
    #[darling(default)]
    pub name: Option<String>,

    #[darling(default)]
    pub namespace: Option<String>,

    #[darling(default)]
    pub value_semantics: bool,

    #[darling(default)]
    pub access: Access,

    #[darling(default = "yes")]
    pub parameterless_ctor: bool,

    #[darling(default)]
    pub equality: bool,

    #[darling(default)]
    pub validation: bool,

    #[darling(default)]
    pub include_inherited: bool,

    #[darling(default)]
    pub documentation: bool,

    #[darling(default = "yes")]
    pub mappers: bool,

    #[darling(multiple, rename = "import")]
    pub imports: Vec<String>,
}

const fn yes() -> bool {
    true
}

impl Default for TypeConfig {
    fn default() -> Self {
        Self {
            name: None,
            namespace: None,
            value_semantics: false,
            access: Access::Public,
            parameterless_ctor: true,
            equality: false,
            validation: false,
            include_inherited: false,
            documentation: false,
            mappers: true,
            imports: Vec::new(),
        }
    }
}

///
/// ValidationSpec
///
/// One `validate(...)` marker as written. A single marker may set several
/// rule flags; `rules()` flattens it into one rule per flag, each carrying
/// the marker's message.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, FromMeta, PartialEq, Serialize)]
pub struct ValidationSpec {
    #[darling(default)]
    pub required: bool,

    #[darling(default)]
    pub email: bool,

    #[darling(default)]
    pub phone: bool,

    #[darling(default)]
    pub url: bool,

    #[darling(default)]
    pub credit_card: bool,

    #[darling(default)]
    pub compare: Option<String>,

    #[darling(default)]
    pub custom: Option<TypePath>,

    #[darling(default)]
    pub message: Option<String>,
}

impl ValidationSpec {
    #[must_use]
    pub fn rules(&self) -> Vec<ValidationRule> {
        let mut rules = Vec::new();

        if self.required {
            rules.push(ValidationRule::Required);
        }
        if self.email {
            rules.push(ValidationRule::Email);
        }
        if self.phone {
            rules.push(ValidationRule::Phone);
        }
        if self.url {
            rules.push(ValidationRule::Url);
        }
        if self.credit_card {
            rules.push(ValidationRule::CreditCard);
        }
        if let Some(other) = &self.compare {
            rules.push(ValidationRule::Compare(other.clone()));
        }
        if let Some(path) = &self.custom {
            rules.push(ValidationRule::Custom(path.clone()));
        }

        rules
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules().is_empty()
    }
}

///
/// ValidationRule
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ValidationRule {
    Required,
    Email,
    Phone,
    Url,
    CreditCard,
    Compare(String),
    Custom(TypePath),
}

impl ValidationRule {
    /// Stable rule code used in generated violations.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::CreditCard => "credit_card",
            Self::Compare(_) => "compare",
            Self::Custom(_) => "custom",
        }
    }
}

///
/// PropertyConfig
/// property-level marker: `#[dto_field(...)]`; `#[dto_ignore]` sets `ignore`
///

#[derive(Clone, Debug, Default, Deserialize, FromMeta, PartialEq, Serialize)]
pub struct PropertyConfig {
    #[darling(default)]
    pub ignore: bool,

    #[darling(default)]
    pub rename: Option<String>,

    #[darling(default)]
    pub type_override: Option<Value>,

    #[darling(default)]
    pub default_value: Option<String>,

    #[darling(default)]
    pub force_nullable: bool,

    #[darling(default)]
    pub force_non_nullable: bool,

    #[darling(default)]
    pub order: Option<i32>,

    #[darling(default)]
    pub description: Option<String>,

    #[darling(default)]
    pub min_length: Option<u32>,

    #[darling(default)]
    pub max_length: Option<u32>,

    #[darling(default)]
    pub range_min: Option<f64>,

    #[darling(default)]
    pub range_max: Option<f64>,

    #[darling(default)]
    pub pattern: Option<String>,

    #[darling(multiple, rename = "validate")]
    pub validation: Vec<ValidationSpec>,
}

impl PropertyConfig {
    /// The tri-state nullability override encoded by the two force flags.
    /// Both flags set is rejected at extraction, before this is read.
    #[must_use]
    pub const fn nullability(&self) -> Nullability {
        match (self.force_nullable, self.force_non_nullable) {
            (true, _) => Nullability::ForceNullable,
            (false, true) => Nullability::ForceNonNullable,
            (false, false) => Nullability::Inherit,
        }
    }

    pub fn validate(&self) -> Result<(), DarlingError> {
        if self.force_nullable && self.force_non_nullable {
            return Err(DarlingError::custom(
                "force_nullable cannot be combined with force_non_nullable",
            ));
        }

        Ok(())
    }

    /// Whether any validation marker declares the property required.
    #[must_use]
    pub fn declares_required(&self) -> bool {
        self.validation
            .iter()
            .any(|spec| spec.rules().contains(&ValidationRule::Required))
    }
}

///
/// TESTS
///
