use crate::helper::{expr_tokens, safe_ident, value_type_tokens};
use convert_case::{Case, Casing};
use dtoforge_core::model::{ProjectionModel, PropertyProjection};
use dtoforge_schema::types::Cardinality;
use proc_macro2::TokenStream;
use quote::quote;

/// Constructors: a manual `Default` when the no-argument constructor is
/// requested, and a field-initializing `new` over every property in
/// resolution order. A zero-property model keeps only the no-argument form.
pub fn constructors(model: &ProjectionModel) -> TokenStream {
    let ident = safe_ident(&model.name);

    let default_impl = if model.parameterless_ctor {
        let assignments = model.properties.iter().map(|p| {
            let field = safe_ident(&p.name);
            let expr = default_expr(p);

            quote!(#field: #expr)
        });

        quote! {
            impl Default for #ident {
                fn default() -> Self {
                    Self {
                        #(#assignments),*
                    }
                }
            }
        }
    } else {
        quote!()
    };

    let new_impl = if model.properties.is_empty() {
        quote!()
    } else {
        let params = model.properties.iter().map(|p| {
            let param = param_ident(p);
            let ty = value_type_tokens(&p.value, p.projects_to.as_ref());

            quote!(#param: #ty)
        });
        let assignments = model.properties.iter().map(|p| {
            let field = safe_ident(&p.name);
            let param = param_ident(p);

            quote!(#field: #param)
        });

        quote! {
            impl #ident {
                pub fn new(#(#params),*) -> Self {
                    Self {
                        #(#assignments),*
                    }
                }
            }
        }
    };

    quote! {
        #default_impl
        #new_impl
    }
}

// Constructor parameters use the standard lower-case transform of the
// property name; a single-character name lower-cases itself.
fn param_ident(p: &PropertyProjection) -> proc_macro2::Ident {
    safe_ident(&p.name.to_case(Case::Snake))
}

/// The default expression for one property: verbatim configured expression,
/// else the natural empty value of its cardinality.
pub fn default_expr(p: &PropertyProjection) -> TokenStream {
    match (&p.default, p.value.cardinality) {
        (Some(default), _) => expr_tokens(default),
        (None, Cardinality::One) => quote!(Default::default()),
        (None, Cardinality::Opt) => quote!(None),
        (None, Cardinality::Many) => quote!(Vec::new()),
    }
}
