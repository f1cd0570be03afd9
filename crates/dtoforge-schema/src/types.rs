use darling::{Error as DarlingError, FromMeta};
use derive_more::{Display, FromStr};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use serde::{Deserialize, Serialize};

///
/// Cardinality
///

#[derive(
    Clone, Copy, Default, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
pub enum Cardinality {
    #[default]
    One,
    Opt,
    Many,
}

impl FromMeta for Cardinality {
    fn from_string(s: &str) -> Result<Self, DarlingError> {
        s.parse::<Self>()
            .map_err(|_| DarlingError::unknown_value(s))
    }
}

///
/// Primitive
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[remain::sorted]
pub enum Primitive {
    Bool,
    Bytes,
    Date,
    Decimal,
    Duration,
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Nat8,
    Nat16,
    Nat32,
    Nat64,
    Text,
    Timestamp,
    Unit,
    Uuid,
}

impl Primitive {
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    #[must_use]
    pub const fn is_signed_int(self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    #[must_use]
    pub const fn is_unsigned_int(self) -> bool {
        matches!(self, Self::Nat8 | Self::Nat16 | Self::Nat32 | Self::Nat64)
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int() || self.is_scalar_time()
    }

    // Date/Duration/Timestamp are scalar integer encodings.
    #[must_use]
    pub const fn is_scalar_time(self) -> bool {
        matches!(self, Self::Date | Self::Duration | Self::Timestamp)
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float() || matches!(self, Self::Decimal)
    }

    /// Types with a meaningful "missing or empty" state, the way a reference
    /// type has one; drives implicit required inference.
    #[must_use]
    pub const fn is_reference_like(self) -> bool {
        matches!(self, Self::Text | Self::Bytes)
    }

    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }

    #[must_use]
    pub const fn supports_eq(self) -> bool {
        !self.is_float()
    }

    #[must_use]
    pub const fn supports_hash(self) -> bool {
        !self.is_float()
    }

    /// The Rust type this primitive projects to in generated code.
    #[must_use]
    pub fn as_type(self) -> TokenStream {
        match self {
            Self::Bool => quote!(bool),
            Self::Bytes => quote!(Vec<u8>),
            Self::Float32 => quote!(f32),
            Self::Float64 => quote!(f64),
            Self::Int8 => quote!(i8),
            Self::Int16 => quote!(i16),
            Self::Int32 => quote!(i32),
            Self::Int64 => quote!(i64),
            Self::Nat8 => quote!(u8),
            Self::Nat16 => quote!(u16),
            Self::Nat32 => quote!(u32),
            Self::Nat64 => quote!(u64),
            Self::Text => quote!(String),
            Self::Unit => quote!(()),
            Self::Date | Self::Decimal | Self::Duration | Self::Timestamp | Self::Uuid => {
                let ident = format_ident!("{self}");
                quote!(::dtoforge::types::#ident)
            }
        }
    }
}

impl FromMeta for Primitive {
    fn from_string(s: &str) -> Result<Self, DarlingError> {
        s.parse::<Self>()
            .map_err(|_| DarlingError::unknown_value(s))
    }
}

///
/// TypePath
///
/// A `::`-separated, crate-relative path to a custom type.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct TypePath(String);

impl TypePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path segment, the bare type name.
    #[must_use]
    pub fn ident(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or(&self.0)
    }

    /// Everything before the final segment; empty for a bare name.
    #[must_use]
    pub fn parent(&self) -> &str {
        match self.0.rfind("::") {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }
}

impl From<&str> for TypePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl FromMeta for TypePath {
    fn from_string(s: &str) -> Result<Self, DarlingError> {
        if s.is_empty() {
            return Err(DarlingError::custom("type path cannot be empty"));
        }

        Ok(Self::new(s))
    }
}

///
/// TypeRef
///
/// The item shape of a property type. `FnPointer`, `RawPointer` and
/// `Borrowed` cover shapes a projection cannot own; `Borrowed` doubles as the
/// bucket for any other non-owned or unrepresentable declaration.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum TypeRef {
    Primitive(Primitive),
    Named(TypePath),
    FnPointer,
    RawPointer,
    Borrowed,
}

impl TypeRef {
    #[must_use]
    pub fn named(path: impl Into<String>) -> Self {
        Self::Named(TypePath::new(path))
    }

    #[must_use]
    pub const fn is_supported(&self) -> bool {
        matches!(self, Self::Primitive(_) | Self::Named(_))
    }

    #[must_use]
    pub const fn is_reference_like(&self) -> bool {
        match self {
            Self::Primitive(prim) => prim.is_reference_like(),
            Self::Named(_) => true,
            _ => false,
        }
    }

    #[must_use]
    pub const fn primitive(&self) -> Option<Primitive> {
        match self {
            Self::Primitive(prim) => Some(*prim),
            _ => None,
        }
    }

    #[must_use]
    pub const fn named_path(&self) -> Option<&TypePath> {
        match self {
            Self::Named(path) => Some(path),
            _ => None,
        }
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        Self::Primitive(Primitive::Unit)
    }
}

///
/// ItemMeta
/// marker grammar for an item: `item(prim = "Text")` or `item(is = "a::B")`
///

#[derive(Debug, Default, FromMeta)]
struct ItemMeta {
    #[darling(default)]
    prim: Option<Primitive>,

    #[darling(default)]
    is: Option<TypePath>,
}

impl FromMeta for TypeRef {
    fn from_list(items: &[darling::ast::NestedMeta]) -> Result<Self, DarlingError> {
        let meta = ItemMeta::from_list(items)?;

        match (meta.prim, meta.is) {
            (Some(prim), None) => Ok(Self::Primitive(prim)),
            (None, Some(path)) => Ok(Self::Named(path)),
            (Some(_), Some(_)) => Err(DarlingError::custom(
                "item 'prim' cannot be combined with 'is'",
            )),
            (None, None) => Err(DarlingError::custom(
                "item requires either 'prim' or 'is'",
            )),
        }
    }
}

///
/// Value
///
/// A full property type: cardinality plus item.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Value {
    pub cardinality: Cardinality,
    pub item: TypeRef,
}

#[derive(Debug, Default, FromMeta)]
struct ValueMeta {
    #[darling(default)]
    opt: bool,

    #[darling(default)]
    many: bool,

    item: TypeRef,
}

impl Value {
    #[must_use]
    pub const fn new(cardinality: Cardinality, item: TypeRef) -> Self {
        Self { cardinality, item }
    }

    #[must_use]
    pub const fn one(item: TypeRef) -> Self {
        Self::new(Cardinality::One, item)
    }

    #[must_use]
    pub const fn opt(item: TypeRef) -> Self {
        Self::new(Cardinality::Opt, item)
    }

    #[must_use]
    pub const fn many(item: TypeRef) -> Self {
        Self::new(Cardinality::Many, item)
    }

    #[must_use]
    pub const fn prim(primitive: Primitive) -> Self {
        Self::one(TypeRef::Primitive(primitive))
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self.cardinality, Cardinality::Opt)
    }

    /// `One -> Opt`; `Opt` and `Many` are unchanged.
    #[must_use]
    pub fn wrap_optional(&self) -> Self {
        match self.cardinality {
            Cardinality::One => Self::opt(self.item.clone()),
            _ => self.clone(),
        }
    }

    /// `Opt -> One`; `One` and `Many` are unchanged.
    #[must_use]
    pub fn strip_optional(&self) -> Self {
        match self.cardinality {
            Cardinality::Opt => Self::one(self.item.clone()),
            _ => self.clone(),
        }
    }
}

impl FromMeta for Value {
    fn from_list(items: &[darling::ast::NestedMeta]) -> Result<Self, DarlingError> {
        let meta = ValueMeta::from_list(items)?;

        if meta.opt && meta.many {
            return Err(DarlingError::custom(
                "cardinality cannot be opt and many at the same time",
            ));
        }

        let cardinality = if meta.many {
            Cardinality::Many
        } else if meta.opt {
            Cardinality::Opt
        } else {
            Cardinality::One
        };

        Ok(Self::new(cardinality, meta.item))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use darling::ast::NestedMeta;

    fn parse_value(src: &str) -> Result<Value, DarlingError> {
        let meta = NestedMeta::parse_meta_list(src.parse().expect("token stream")).expect("meta");
        Value::from_list(&meta)
    }

    #[test]
    fn value_meta_parses_cardinality_and_item() {
        let value = parse_value(r#"opt, item(prim = "Text")"#).expect("parse");
        assert_eq!(value.cardinality, Cardinality::Opt);
        assert_eq!(value.item, TypeRef::Primitive(Primitive::Text));

        let value = parse_value(r#"many, item(is = "t::Address")"#).expect("parse");
        assert_eq!(value.cardinality, Cardinality::Many);
        assert_eq!(value.item, TypeRef::named("t::Address"));
    }

    #[test]
    fn value_meta_rejects_opt_and_many() {
        assert!(parse_value(r#"opt, many, item(prim = "Bool")"#).is_err());
    }

    #[test]
    fn item_meta_rejects_prim_and_is_together() {
        assert!(parse_value(r#"item(prim = "Bool", is = "t::A")"#).is_err());
    }

    #[test]
    fn wrap_and_strip_optional() {
        let one = Value::prim(Primitive::Text);
        assert_eq!(one.wrap_optional().cardinality, Cardinality::Opt);
        assert_eq!(one.wrap_optional().strip_optional(), one);

        let many = Value::many(TypeRef::Primitive(Primitive::Int32));
        assert_eq!(many.wrap_optional(), many);
        assert_eq!(many.strip_optional(), many);
    }

    #[test]
    fn reference_like_covers_text_bytes_and_named() {
        assert!(TypeRef::Primitive(Primitive::Text).is_reference_like());
        assert!(TypeRef::Primitive(Primitive::Bytes).is_reference_like());
        assert!(TypeRef::named("t::Address").is_reference_like());
        assert!(!TypeRef::Primitive(Primitive::Int32).is_reference_like());
    }

    #[test]
    fn type_path_segments() {
        let path = TypePath::new("a::b::Widget");
        assert_eq!(path.ident(), "Widget");
        assert_eq!(path.parent(), "a::b");

        let bare = TypePath::new("Widget");
        assert_eq!(bare.ident(), "Widget");
        assert_eq!(bare.parent(), "");
    }
}
