use dtoforge_schema::types::{Cardinality, TypePath, TypeRef, Value};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

// Quoting helpers

/// Identifier from a resolver-validated name. Falls back to a placeholder
/// that surfaces in generated output instead of panicking.
pub fn safe_ident(name: &str) -> Ident {
    syn::parse_str::<Ident>(name).unwrap_or_else(|_| Ident::new("__invalid", Span::call_site()))
}

/// Parse a path string into tokens; invalid paths become a compile error in
/// the generated output rather than a generator panic.
pub fn parse_path(path: &str) -> TokenStream {
    match syn::parse_str::<syn::Path>(path) {
        Ok(path) => quote!(#path),
        Err(_) => {
            let message = format!("invalid type path '{path}'");
            quote!(compile_error!(#message))
        }
    }
}

const ABSOLUTE_ROOTS: [&str; 4] = ["crate", "std", "core", "alloc"];

/// Crate-relative paths in the model are emitted rooted at `crate::`;
/// already-absolute paths pass through untouched.
pub fn emit_path(path: &str) -> TokenStream {
    if path.starts_with("::") {
        return parse_path(path);
    }

    let first = path.split("::").next().unwrap_or(path);
    if ABSOLUTE_ROOTS.contains(&first) {
        parse_path(path)
    } else {
        parse_path(&format!("crate::{path}"))
    }
}

/// Parse a verbatim default-value expression; the resolver already rejected
/// unparseable ones, so the fallback only guards internal misuse.
pub fn expr_tokens(expr: &str) -> TokenStream {
    match syn::parse_str::<syn::Expr>(expr) {
        Ok(expr) => quote!(#expr),
        Err(_) => {
            let message = format!("invalid default expression '{expr}'");
            quote!(compile_error!(#message))
        }
    }
}

pub fn doc_attr(text: &str) -> TokenStream {
    quote!(#[doc = #text])
}

/// The Rust type a resolved property projects to. A `Named` item projected
/// in the same snapshot uses the referenced DTO path instead of the source
/// type.
pub fn value_type_tokens(value: &Value, projects_to: Option<&TypePath>) -> TokenStream {
    let item = match (&value.item, projects_to) {
        (TypeRef::Named(_), Some(target)) => emit_path(target.as_str()),
        (TypeRef::Named(path), None) => emit_path(path.as_str()),
        (TypeRef::Primitive(prim), _) => prim.as_type(),
        _ => quote!(compile_error!("unsupported projected type")),
    };

    match value.cardinality {
        Cardinality::One => item,
        Cardinality::Opt => quote!(Option<#item>),
        Cardinality::Many => quote!(Vec<#item>),
    }
}

///
/// TESTS
///
