use crate::helper::{emit_path, safe_ident};
use convert_case::{Case, Casing};
use dtoforge_core::model::{ProjectionModel, PropertyProjection};
use dtoforge_schema::types::Cardinality;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// The mapper surface for one type: `project` / `materialize`, their lazy
/// list variants, and an in-place `merge`. Absence is expressed as `None`
/// at the seams and answered with a missing-argument error. Nested projected
/// types route through their own mapper functions, never inline copies.
pub fn mapper_functions(model: &ProjectionModel) -> TokenStream {
    let dto = safe_ident(&model.name);
    let src = emit_path(&model.source_path);
    let snake = model.source_name.to_case(Case::Snake);

    let project_fn = format_ident!("project_{snake}");
    let materialize_fn = format_ident!("materialize_{snake}");
    let project_iter_fn = format_ident!("project_{snake}_iter");
    let materialize_iter_fn = format_ident!("materialize_{snake}_iter");
    let merge_fn = format_ident!("merge_{snake}");

    let missing_source = missing("source");
    let missing_dto = missing("dto");
    let missing_existing = missing("existing");

    let project_body = if model.properties.is_empty() {
        quote! {
            source.ok_or(#missing_source)?;
            Ok(#dto {})
        }
    } else {
        let fields = model.properties.iter().map(|p| {
            let field = safe_ident(&p.name);
            let expr = project_expr(p);
            quote!(#field: #expr)
        });

        quote! {
            let source = source.ok_or(#missing_source)?;
            Ok(#dto {
                #(#fields),*
            })
        }
    };

    let rest = if model.source_has_unprojected {
        quote!(..::core::default::Default::default())
    } else {
        quote!()
    };
    let materialize_body = if model.properties.is_empty() {
        quote! {
            dto.ok_or(#missing_dto)?;
            Ok(#src { #rest })
        }
    } else {
        let fields = model.properties.iter().map(|p| {
            let field = safe_ident(&p.source_name);
            let expr = materialize_expr(p);
            quote!(#field: #expr,)
        });

        quote! {
            let dto = dto.ok_or(#missing_dto)?;
            Ok(#src {
                #(#fields)*
                #rest
            })
        }
    };

    let merge_body = if model.properties.is_empty() {
        quote! {
            let existing = existing.ok_or(#missing_existing)?;
            dto.ok_or(#missing_dto)?;
            Ok(existing)
        }
    } else {
        let assignments = model.properties.iter().map(|p| {
            let field = safe_ident(&p.source_name);
            let expr = materialize_expr(p);
            quote!(existing.#field = #expr;)
        });

        quote! {
            let existing = existing.ok_or(#missing_existing)?;
            let dto = dto.ok_or(#missing_dto)?;
            #(#assignments)*
            Ok(existing)
        }
    };

    let source_doc = format!("Project a `{}` into its DTO.", model.source_name);
    let materialize_doc = format!("Rebuild a `{}` from its DTO.", model.source_name);
    let project_iter_doc =
        "Lazily project a slice, preserving order and leaving the input untouched.";
    let materialize_iter_doc =
        "Lazily rebuild sources from a slice of DTOs, preserving order.";
    let merge_doc = format!(
        "Copy every projected property into an existing `{}` in place.",
        model.source_name
    );

    quote! {
        #[doc = #source_doc]
        pub fn #project_fn(source: Option<&#src>) -> Result<#dto, ::dtoforge::mapper::MapError> {
            #project_body
        }

        #[doc = #materialize_doc]
        pub fn #materialize_fn(dto: Option<&#dto>) -> Result<#src, ::dtoforge::mapper::MapError> {
            #materialize_body
        }

        #[doc = #project_iter_doc]
        pub fn #project_iter_fn<'a>(
            sources: &'a [#src],
        ) -> impl Iterator<Item = Result<#dto, ::dtoforge::mapper::MapError>> + 'a {
            sources.iter().map(|source| #project_fn(Some(source)))
        }

        #[doc = #materialize_iter_doc]
        pub fn #materialize_iter_fn<'a>(
            dtos: &'a [#dto],
        ) -> impl Iterator<Item = Result<#src, ::dtoforge::mapper::MapError>> + 'a {
            dtos.iter().map(|dto| #materialize_fn(Some(dto)))
        }

        #[doc = #merge_doc]
        pub fn #merge_fn<'a>(
            existing: Option<&'a mut #src>,
            dto: Option<&#dto>,
        ) -> Result<&'a mut #src, ::dtoforge::mapper::MapError> {
            #merge_body
        }
    }
}

fn missing(name: &str) -> TokenStream {
    quote!(::dtoforge::mapper::MapError::MissingArgument(#name))
}

// Path to the nested type's own mapper function, derived from its projected
// target namespace.
fn nested_fn(p: &PropertyProjection, op: &str) -> Option<TokenStream> {
    let target = p.projects_to.as_ref()?;
    let nested = p.value.item.named_path()?;
    let snake = nested.ident().to_case(Case::Snake);

    Some(emit_path(&format!("{}::{op}_{snake}", target.parent())))
}

fn project_expr(p: &PropertyProjection) -> TokenStream {
    let src = safe_ident(&p.source_name);
    let from = p.source_value.cardinality;
    let to = p.value.cardinality;

    if let Some(mapper) = nested_fn(p, "project") {
        return match (from, to) {
            (Cardinality::One, Cardinality::One) => quote!(#mapper(Some(&source.#src))?),
            (Cardinality::One, Cardinality::Opt) => {
                quote!(Some(#mapper(Some(&source.#src))?))
            }
            (Cardinality::Opt, Cardinality::Opt) => quote! {
                match &source.#src {
                    Some(value) => Some(#mapper(Some(value))?),
                    None => None,
                }
            },
            (Cardinality::Opt, Cardinality::One) => quote! {
                match &source.#src {
                    Some(value) => #mapper(Some(value))?,
                    None => ::core::default::Default::default(),
                }
            },
            (Cardinality::Many, Cardinality::Many) => quote! {
                source.#src
                    .iter()
                    .map(|value| #mapper(Some(value)))
                    .collect::<Result<Vec<_>, _>>()?
            },
            _ => quote!(::core::convert::Into::into(source.#src.clone())),
        };
    }

    let converted = p.item_converted();
    match (from, to, converted) {
        (Cardinality::One, Cardinality::One, false)
        | (Cardinality::Opt, Cardinality::Opt, false)
        | (Cardinality::Many, Cardinality::Many, false) => quote!(source.#src.clone()),
        (Cardinality::One, Cardinality::One, true) => {
            quote!(::core::convert::Into::into(source.#src.clone()))
        }
        (Cardinality::One, Cardinality::Opt, false) => quote!(Some(source.#src.clone())),
        (Cardinality::One, Cardinality::Opt, true) => {
            quote!(Some(::core::convert::Into::into(source.#src.clone())))
        }
        (Cardinality::Opt, Cardinality::One, false) => {
            quote!(source.#src.clone().unwrap_or_default())
        }
        (Cardinality::Opt, Cardinality::One, true) => {
            quote!(source.#src.clone().map(::core::convert::Into::into).unwrap_or_default())
        }
        (Cardinality::Opt, Cardinality::Opt, true) => {
            quote!(source.#src.clone().map(::core::convert::Into::into))
        }
        (Cardinality::Many, Cardinality::Many, true) => quote! {
            source.#src
                .clone()
                .into_iter()
                .map(::core::convert::Into::into)
                .collect()
        },
        _ => quote!(::core::convert::Into::into(source.#src.clone())),
    }
}

fn materialize_expr(p: &PropertyProjection) -> TokenStream {
    let field = safe_ident(&p.name);
    let from = p.value.cardinality;
    let to = p.source_value.cardinality;

    if let Some(mapper) = nested_fn(p, "materialize") {
        return match (from, to) {
            (Cardinality::One, Cardinality::One) => quote!(#mapper(Some(&dto.#field))?),
            (Cardinality::One, Cardinality::Opt) => {
                quote!(Some(#mapper(Some(&dto.#field))?))
            }
            (Cardinality::Opt, Cardinality::Opt) => quote! {
                match &dto.#field {
                    Some(value) => Some(#mapper(Some(value))?),
                    None => None,
                }
            },
            (Cardinality::Opt, Cardinality::One) => quote! {
                match &dto.#field {
                    Some(value) => #mapper(Some(value))?,
                    None => ::core::default::Default::default(),
                }
            },
            (Cardinality::Many, Cardinality::Many) => quote! {
                dto.#field
                    .iter()
                    .map(|value| #mapper(Some(value)))
                    .collect::<Result<Vec<_>, _>>()?
            },
            _ => quote!(::core::convert::Into::into(dto.#field.clone())),
        };
    }

    let converted = p.item_converted();
    match (from, to, converted) {
        (Cardinality::One, Cardinality::One, false)
        | (Cardinality::Opt, Cardinality::Opt, false)
        | (Cardinality::Many, Cardinality::Many, false) => quote!(dto.#field.clone()),
        (Cardinality::One, Cardinality::One, true) => {
            quote!(::core::convert::Into::into(dto.#field.clone()))
        }
        (Cardinality::One, Cardinality::Opt, false) => quote!(Some(dto.#field.clone())),
        (Cardinality::One, Cardinality::Opt, true) => {
            quote!(Some(::core::convert::Into::into(dto.#field.clone())))
        }
        (Cardinality::Opt, Cardinality::One, false) => {
            quote!(dto.#field.clone().unwrap_or_default())
        }
        (Cardinality::Opt, Cardinality::One, true) => {
            quote!(dto.#field.clone().map(::core::convert::Into::into).unwrap_or_default())
        }
        (Cardinality::Opt, Cardinality::Opt, true) => {
            quote!(dto.#field.clone().map(::core::convert::Into::into))
        }
        (Cardinality::Many, Cardinality::Many, true) => quote! {
            dto.#field
                .clone()
                .into_iter()
                .map(::core::convert::Into::into)
                .collect()
        },
        _ => quote!(::core::convert::Into::into(dto.#field.clone())),
    }
}
