use crate::helper::{doc_attr, safe_ident, value_type_tokens};
use dtoforge_core::model::{ProjectionModel, TargetKind};
use dtoforge_schema::config::Access;
use proc_macro2::TokenStream;
use quote::quote;

/// The target struct: ordered property list plus derives. Value-semantics
/// targets carry built-in structural equality (`PartialEq`, plus `Eq`/`Hash`
/// when every property supports them); plain targets stay mutable data with
/// `Clone`/`Debug` only.
pub fn type_shape(model: &ProjectionModel) -> TokenStream {
    let ident = safe_ident(&model.name);
    let vis = access_tokens(model.access);

    let mut derives = vec![quote!(Clone), quote!(Debug)];
    if model.kind == TargetKind::Value {
        derives.push(quote!(PartialEq));
        if model.all_properties_hashable() {
            derives.push(quote!(Eq));
            derives.push(quote!(Hash));
        }
    }

    let type_doc = if model.documentation {
        doc_attr(&format!("Projection of `{}`.", model.source_path))
    } else {
        quote!()
    };

    let fields = model.properties.iter().map(|p| {
        let field = safe_ident(&p.name);
        let ty = value_type_tokens(&p.value, p.projects_to.as_ref());

        let doc = match (&model.documentation, &p.description) {
            (true, Some(description)) => doc_attr(description),
            _ => quote!(),
        };

        quote! {
            #doc
            pub #field: #ty
        }
    });

    quote! {
        #type_doc
        #[derive(#(#derives),*)]
        #vis struct #ident {
            #(#fields),*
        }
    }
}

pub fn access_tokens(access: Access) -> TokenStream {
    match access {
        Access::Public => quote!(pub),
        Access::Crate => quote!(pub(crate)),
    }
}
