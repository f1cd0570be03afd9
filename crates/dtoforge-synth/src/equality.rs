use crate::helper::safe_ident;
use dtoforge_core::model::{ProjectionModel, PropertyProjection, TargetKind};
use dtoforge_schema::types::{Cardinality, Primitive};
use proc_macro2::TokenStream;
use quote::quote;

/// Explicit structural equality for plain targets that asked for it.
/// Value-semantics targets already derive equality, so nothing is emitted
/// for them even when requested.
pub fn equality(model: &ProjectionModel) -> Option<TokenStream> {
    if !model.equality || model.kind == TargetKind::Value {
        return None;
    }

    let ident = safe_ident(&model.name);

    // Zero-property models compare equal unconditionally.
    let other_param = if model.properties.is_empty() {
        quote!(_other)
    } else {
        quote!(other)
    };

    let comparisons = model.properties.iter().map(|p| {
        let field = safe_ident(&p.name);
        quote! {
            if self.#field != other.#field {
                return false;
            }
        }
    });

    let hash_body = if model.properties.is_empty() {
        quote!(0)
    } else {
        let statements = model.properties.iter().map(hash_statement);
        quote! {
            let mut hasher = ::std::collections::hash_map::DefaultHasher::new();
            #(#statements)*
            ::std::hash::Hasher::finish(&hasher)
        }
    };

    Some(quote! {
        impl ::std::cmp::PartialEq for #ident {
            fn eq(&self, #other_param: &Self) -> bool {
                #(#comparisons)*
                true
            }
        }

        impl #ident {
            /// Structural hash folding every property in resolution order.
            pub fn hash_code(&self) -> u64 {
                #hash_body
            }
        }
    })
}

// Floats fold through their bit patterns; everything else without a `Hash`
// impl folds through its debug rendering.
fn hash_statement(p: &PropertyProjection) -> TokenStream {
    let field = safe_ident(&p.name);

    match (p.value.cardinality, p.value.item.primitive()) {
        (Cardinality::One, Some(Primitive::Float32)) => quote! {
            ::std::hash::Hasher::write_u32(&mut hasher, self.#field.to_bits());
        },
        (Cardinality::One, Some(Primitive::Float64)) => quote! {
            ::std::hash::Hasher::write_u64(&mut hasher, self.#field.to_bits());
        },
        (_, Some(prim)) if prim.supports_hash() => quote! {
            ::std::hash::Hash::hash(&self.#field, &mut hasher);
        },
        _ => quote! {
            ::std::hash::Hasher::write(&mut hasher, format!("{:?}", self.#field).as_bytes());
        },
    }
}
