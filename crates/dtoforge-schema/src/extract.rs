use crate::{
    config::{PropertyConfig, TypeConfig},
    descriptor::{SourceKind, SourcePropertyDescriptor, SourceTypeDescriptor, Visibility},
    types::{Primitive, TypePath, TypeRef, Value},
};
use darling::{FromMeta, ast::NestedMeta};
use thiserror::Error as ThisError;

/// Class-level marker attribute.
const TYPE_MARKER: &str = "dto";

/// Property-level marker attribute.
const PROPERTY_MARKER: &str = "dto_field";

/// Shorthand ignore marker, equivalent to `dto_field(ignore)`.
const IGNORE_MARKER: &str = "dto_ignore";

///
/// ExtractError
///

#[derive(Debug, ThisError)]
pub enum ExtractError {
    #[error("failed to parse source: {0}")]
    Parse(#[from] syn::Error),

    #[error("invalid marker on '{path}': {source}")]
    Marker {
        path: String,
        source: darling::Error,
    },
}

/// Parse Rust source text and extract every marked type.
pub fn extract_source(
    namespace: &str,
    source: &str,
) -> Result<Vec<SourceTypeDescriptor>, ExtractError> {
    let file = syn::parse_file(source)?;

    extract_file(namespace, &file)
}

/// Extract every `#[dto]`-marked struct from an already-parsed file, in
/// declaration order. `namespace` is the crate-relative module path of the
/// file root; nested inline modules extend it.
pub fn extract_file(
    namespace: &str,
    file: &syn::File,
) -> Result<Vec<SourceTypeDescriptor>, ExtractError> {
    let mut descriptors = Vec::new();
    walk_items(namespace, &file.items, &mut descriptors)?;

    Ok(descriptors)
}

fn walk_items(
    namespace: &str,
    items: &[syn::Item],
    out: &mut Vec<SourceTypeDescriptor>,
) -> Result<(), ExtractError> {
    for item in items {
        match item {
            syn::Item::Struct(node) => {
                if let Some(descriptor) = extract_struct(namespace, node)? {
                    out.push(descriptor);
                }
            }
            syn::Item::Mod(node) => {
                if let Some((_, nested)) = &node.content {
                    let child = join_namespace(namespace, &node.ident.to_string());
                    walk_items(&child, nested, out)?;
                }
            }
            _ => {}
        }
    }

    Ok(())
}

fn join_namespace(namespace: &str, segment: &str) -> String {
    if namespace.is_empty() {
        segment.to_string()
    } else {
        format!("{namespace}::{segment}")
    }
}

fn extract_struct(
    namespace: &str,
    node: &syn::ItemStruct,
) -> Result<Option<SourceTypeDescriptor>, ExtractError> {
    let name = node.ident.to_string();
    let path = join_namespace(namespace, &name);

    let Some(config) = type_config(&path, &node.attrs)? else {
        return Ok(None);
    };

    let mut properties = Vec::new();
    if let syn::Fields::Named(fields) = &node.fields {
        for field in &fields.named {
            let Some(ident) = &field.ident else { continue };

            let field_path = format!("{path}::{ident}");
            let config = property_config(&field_path, &field.attrs)?;

            properties.push(SourcePropertyDescriptor {
                name: ident.to_string(),
                value: map_type(&field.ty),
                visibility: map_visibility(&field.vis),
                is_static: false,
                is_indexer: false,
                config,
            });
        }
    }

    Ok(Some(SourceTypeDescriptor {
        name,
        namespace: namespace.to_string(),
        kind: source_kind(&node.attrs),
        config: Some(config),
        properties,
        ancestors: Vec::new(),
    }))
}

fn type_config(
    path: &str,
    attrs: &[syn::Attribute],
) -> Result<Option<TypeConfig>, ExtractError> {
    for attr in attrs {
        if !attr.path().is_ident(TYPE_MARKER) {
            continue;
        }

        let config = match &attr.meta {
            syn::Meta::Path(_) => TypeConfig::default(),
            syn::Meta::List(list) => {
                let nested = NestedMeta::parse_meta_list(list.tokens.clone())
                    .map_err(|e| marker_error(path, e.into()))?;

                TypeConfig::from_list(&nested).map_err(|e| marker_error(path, e))?
            }
            syn::Meta::NameValue(_) => {
                return Err(marker_error(
                    path,
                    darling::Error::custom("expected #[dto] or #[dto(...)]"),
                ));
            }
        };

        return Ok(Some(config));
    }

    Ok(None)
}

fn property_config(
    path: &str,
    attrs: &[syn::Attribute],
) -> Result<PropertyConfig, ExtractError> {
    let mut config = PropertyConfig::default();

    for attr in attrs {
        if attr.path().is_ident(IGNORE_MARKER) {
            config.ignore = true;
        } else if attr.path().is_ident(PROPERTY_MARKER) {
            if let syn::Meta::List(list) = &attr.meta {
                let nested = NestedMeta::parse_meta_list(list.tokens.clone())
                    .map_err(|e| marker_error(path, e.into()))?;

                let ignore = config.ignore;
                config = PropertyConfig::from_list(&nested).map_err(|e| marker_error(path, e))?;
                config.ignore |= ignore;
            }
        }
    }

    config.validate().map_err(|e| marker_error(path, e))?;

    Ok(config)
}

fn marker_error(path: &str, source: darling::Error) -> ExtractError {
    ExtractError::Marker {
        path: path.to_string(),
        source,
    }
}

// A source struct deriving PartialEq already carries structural equality.
fn source_kind(attrs: &[syn::Attribute]) -> SourceKind {
    for attr in attrs {
        if !attr.path().is_ident("derive") {
            continue;
        }

        let mut derives_eq = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("PartialEq") {
                derives_eq = true;
            }
            Ok(())
        });

        if derives_eq {
            return SourceKind::Value;
        }
    }

    SourceKind::Plain
}

fn map_visibility(vis: &syn::Visibility) -> Visibility {
    match vis {
        syn::Visibility::Public(_) => Visibility::Public,
        _ => Visibility::Restricted,
    }
}

/// Map a declared Rust type into the projection type grammar. Shapes the
/// grammar cannot own land in the unsupported variants and are later dropped
/// with a warning.
fn map_type(ty: &syn::Type) -> Value {
    match ty {
        syn::Type::Path(type_path) if type_path.qself.is_none() => map_path(&type_path.path),
        syn::Type::Tuple(tuple) if tuple.elems.is_empty() => Value::prim(Primitive::Unit),
        syn::Type::Paren(inner) => map_type(&inner.elem),
        syn::Type::Group(inner) => map_type(&inner.elem),
        syn::Type::BareFn(_) => Value::one(TypeRef::FnPointer),
        syn::Type::Ptr(_) => Value::one(TypeRef::RawPointer),
        _ => Value::one(TypeRef::Borrowed),
    }
}

fn map_path(path: &syn::Path) -> Value {
    let Some(last) = path.segments.last() else {
        return Value::one(TypeRef::Borrowed);
    };
    let ident = last.ident.to_string();

    match &last.arguments {
        syn::PathArguments::None => Value::one(map_bare_ident(path, &ident)),
        syn::PathArguments::AngleBracketed(args) => {
            let Some(syn::GenericArgument::Type(inner)) = args.args.first() else {
                return Value::one(TypeRef::Borrowed);
            };
            if args.args.len() != 1 {
                return Value::one(TypeRef::Borrowed);
            }

            let inner = map_type(inner);
            match (ident.as_str(), inner.cardinality) {
                // Vec<u8> is a byte payload, not a list of Nat8.
                ("Vec", crate::types::Cardinality::One)
                    if inner.item == TypeRef::Primitive(Primitive::Nat8) =>
                {
                    Value::prim(Primitive::Bytes)
                }
                ("Option", crate::types::Cardinality::One) => Value::opt(inner.item),
                ("Vec", crate::types::Cardinality::One) => Value::many(inner.item),
                // Deeper container nesting is not representable.
                _ => Value::one(TypeRef::Borrowed),
            }
        }
        syn::PathArguments::Parenthesized(_) => Value::one(TypeRef::Borrowed),
    }
}

fn map_bare_ident(path: &syn::Path, ident: &str) -> TypeRef {
    let prim = match ident {
        "bool" => Some(Primitive::Bool),
        "i8" => Some(Primitive::Int8),
        "i16" => Some(Primitive::Int16),
        "i32" => Some(Primitive::Int32),
        "i64" => Some(Primitive::Int64),
        "u8" => Some(Primitive::Nat8),
        "u16" => Some(Primitive::Nat16),
        "u32" => Some(Primitive::Nat32),
        "u64" => Some(Primitive::Nat64),
        "f32" => Some(Primitive::Float32),
        "f64" => Some(Primitive::Float64),
        "String" => Some(Primitive::Text),
        "Date" => Some(Primitive::Date),
        "Decimal" => Some(Primitive::Decimal),
        "Duration" => Some(Primitive::Duration),
        "Timestamp" => Some(Primitive::Timestamp),
        "Uuid" => Some(Primitive::Uuid),
        _ => None,
    };

    match prim {
        Some(prim) => TypeRef::Primitive(prim),
        None => TypeRef::Named(TypePath::new(path_to_string(path))),
    }
}

fn path_to_string(path: &syn::Path) -> String {
    path.segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}

///
/// TESTS
///
