use crate::helper::safe_ident;
use dtoforge_core::model::ProjectionModel;
use proc_macro2::TokenStream;
use quote::quote;

/// A `Display` rendering listing every property in resolution order. Fields
/// render through `Debug`, which every projected type derives, so the impl
/// holds for any property mix.
pub fn display(model: &ProjectionModel) -> TokenStream {
    let ident = safe_ident(&model.name);

    let format = if model.properties.is_empty() {
        model.name.clone()
    } else {
        let fields = model
            .properties
            .iter()
            .map(|p| format!("{}: {{:?}}", p.name))
            .collect::<Vec<_>>()
            .join(", ");

        format!("{} {{{{ {fields} }}}}", model.name)
    };

    let args = model.properties.iter().map(|p| {
        let field = safe_ident(&p.name);
        quote!(self.#field)
    });

    quote! {
        impl ::core::fmt::Display for #ident {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, #format #(, #args)*)
            }
        }
    }
}
