use crate::{
    config::{PropertyConfig, TypeConfig},
    types::Value,
};
use serde::{Deserialize, Serialize};

/// Ancestor layer name that terminates the inherited-property walk.
pub const ROOT_SENTINEL: &str = "Object";

/// Defensive cap on the ancestor walk; providers never produce chains this
/// deep, so hitting it is reported instead of looped over.
pub const MAX_ANCESTOR_DEPTH: usize = 16;

/// Suffix applied when no target name override is configured.
pub const TARGET_NAME_SUFFIX: &str = "Dto";

/// Namespace segment appended when no target namespace override is
/// configured.
pub const TARGET_NAMESPACE_SEGMENT: &str = "dto";

///
/// SourceKind
///
/// Structural kind of the source type; `Value` means the source already has
/// built-in structural equality.
///

#[derive(Clone, Copy, Default, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SourceKind {
    #[default]
    Plain,
    Value,
}

///
/// Visibility
///

#[derive(Clone, Copy, Default, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Visibility {
    #[default]
    Public,
    Restricted,
}

///
/// SourcePropertyDescriptor
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SourcePropertyDescriptor {
    pub name: String,
    pub value: Value,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_indexer: bool,
    pub config: PropertyConfig,
}

impl SourcePropertyDescriptor {
    /// A public, non-static instance property with default configuration.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            visibility: Visibility::Public,
            is_static: false,
            is_indexer: false,
            config: PropertyConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: PropertyConfig) -> Self {
        self.config = config;
        self
    }

    /// Member shape makes the property a projection candidate; configuration
    /// may still exclude it.
    #[must_use]
    pub fn is_candidate(&self) -> bool {
        self.visibility == Visibility::Public && !self.is_static && !self.is_indexer
    }

    /// Candidate and not ignored.
    #[must_use]
    pub fn is_included(&self) -> bool {
        self.is_candidate() && !self.config.ignore
    }
}

///
/// AncestorLayer
///
/// One layer of the ancestor chain, most-derived first. Providers terminate
/// the chain with a layer named [`ROOT_SENTINEL`].
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AncestorLayer {
    pub name: String,
    pub properties: Vec<SourcePropertyDescriptor>,
}

impl AncestorLayer {
    #[must_use]
    pub fn new(name: impl Into<String>, properties: Vec<SourcePropertyDescriptor>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    #[must_use]
    pub fn root() -> Self {
        Self::new(ROOT_SENTINEL, Vec::new())
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.name == ROOT_SENTINEL
    }
}

///
/// SourceTypeDescriptor
///
/// Immutable snapshot of one source type per generation pass. `config` is
/// `None` when the type was referenced for projection without its class-level
/// marker.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SourceTypeDescriptor {
    pub name: String,
    pub namespace: String,
    pub kind: SourceKind,
    pub config: Option<TypeConfig>,
    pub properties: Vec<SourcePropertyDescriptor>,
    pub ancestors: Vec<AncestorLayer>,
}

impl SourceTypeDescriptor {
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            kind: SourceKind::Plain,
            config: Some(TypeConfig::default()),
            properties: Vec::new(),
            ancestors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: TypeConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn with_properties(mut self, properties: Vec<SourcePropertyDescriptor>) -> Self {
        self.properties = properties;
        self
    }

    #[must_use]
    pub fn with_ancestors(mut self, ancestors: Vec<AncestorLayer>) -> Self {
        self.ancestors = ancestors;
        self
    }

    /// Crate-relative path identifying the source type.
    #[must_use]
    pub fn path(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }
}

///
/// TESTS
///
