use crate::helper::{emit_path, safe_ident};
use dtoforge_core::model::{ProjectionModel, PropertyProjection};
use dtoforge_schema::{
    config::ValidationRule,
    types::{Cardinality, Primitive, TypeRef},
};
use proc_macro2::{Literal, TokenStream};
use quote::quote;

/// The validation method: one check per aggregated rule per property, in
/// resolution order, returning the ordered violations. An empty result means
/// the value is valid.
pub fn validation(model: &ProjectionModel) -> Option<TokenStream> {
    if !model.validation {
        return None;
    }

    let ident = safe_ident(&model.name);
    let checks: Vec<TokenStream> = model.properties.iter().flat_map(property_checks).collect();

    let body = if checks.is_empty() {
        quote!(Vec::new())
    } else {
        quote! {
            let mut violations = Vec::new();
            #(#checks)*
            violations
        }
    };

    Some(quote! {
        impl #ident {
            /// Check every configured rule; an empty result is a valid value.
            pub fn validate(&self) -> Vec<::dtoforge::rules::Violation> {
                #body
            }
        }
    })
}

fn property_checks(p: &PropertyProjection) -> Vec<TokenStream> {
    let mut checks = Vec::new();

    // Required: one check whether inferred or declared; a declared marker's
    // message wins.
    let required_message = p
        .rules
        .iter()
        .find(|b| b.rule == ValidationRule::Required)
        .map(|b| message_for(p, b.message.as_deref(), "required"));
    if p.required || required_message.is_some() {
        let message =
            required_message.unwrap_or_else(|| message_for(p, None, "required"));
        if let Some(check) = required_check(p, &message) {
            checks.push(check);
        }
    }

    for binding in &p.rules {
        let check = match &binding.rule {
            ValidationRule::Required => None,
            ValidationRule::Email => format_check(p, binding.message.as_deref(), "email"),
            ValidationRule::Phone => format_check(p, binding.message.as_deref(), "phone"),
            ValidationRule::Url => format_check(p, binding.message.as_deref(), "url"),
            ValidationRule::CreditCard => {
                format_check(p, binding.message.as_deref(), "credit_card")
            }
            ValidationRule::Compare(other) => {
                Some(compare_check(p, binding.message.as_deref(), other))
            }
            ValidationRule::Custom(path) => {
                Some(custom_check(p, binding.message.as_deref(), path.as_str()))
            }
        };
        checks.extend(check);
    }

    checks.extend(length_checks(p));
    checks.extend(range_checks(p));
    checks.extend(pattern_check(p));

    checks
}

fn push_violation(p: &PropertyProjection, code: &str, message: &str) -> TokenStream {
    let field = &p.name;
    quote! {
        violations.push(::dtoforge::rules::Violation::new(#field, #code, #message));
    }
}

fn message_for(p: &PropertyProjection, configured: Option<&str>, code: &str) -> String {
    configured.map_or_else(
        || match code {
            "required" => format!("{} is required", p.name),
            "email" => format!("{} must be a valid email address", p.name),
            "phone" => format!("{} must be a valid phone number", p.name),
            "url" => format!("{} must be a valid URL", p.name),
            "credit_card" => format!("{} must be a valid credit card number", p.name),
            _ => format!("{} is invalid", p.name),
        },
        String::from,
    )
}

fn is_text(p: &PropertyProjection) -> bool {
    p.value.item == TypeRef::Primitive(Primitive::Text)
}

// Required fails on an absent value or an empty reference-like default.
fn required_check(p: &PropertyProjection, message: &str) -> Option<TokenStream> {
    let field = safe_ident(&p.name);
    let push = push_violation(p, "required", message);

    let condition = match (p.value.cardinality, &p.value.item) {
        (Cardinality::Opt, TypeRef::Primitive(Primitive::Text)) => {
            quote!(self.#field.as_deref().is_none_or(str::is_empty))
        }
        (Cardinality::Opt, _) => quote!(self.#field.is_none()),
        (Cardinality::One, TypeRef::Primitive(Primitive::Text | Primitive::Bytes))
        | (Cardinality::Many, _) => quote!(self.#field.is_empty()),
        // Present by construction; nothing can fail.
        (Cardinality::One, _) => return None,
    };

    Some(quote! {
        if #condition {
            #push
        }
    })
}

// Format rules apply to text values; an absent optional passes.
fn format_check(
    p: &PropertyProjection,
    configured: Option<&str>,
    code: &str,
) -> Option<TokenStream> {
    if !is_text(p) {
        return None;
    }

    let field = safe_ident(&p.name);
    let rule_fn = match code {
        "email" => quote!(::dtoforge::rules::is_email),
        "phone" => quote!(::dtoforge::rules::is_phone),
        "url" => quote!(::dtoforge::rules::is_url),
        "credit_card" => quote!(::dtoforge::rules::is_credit_card),
        _ => return None,
    };
    let message = message_for(p, configured, code);
    let push = push_violation(p, code, &message);

    match p.value.cardinality {
        Cardinality::One => Some(quote! {
            if !#rule_fn(&self.#field) {
                #push
            }
        }),
        Cardinality::Opt => Some(quote! {
            if let Some(value) = &self.#field {
                if !#rule_fn(value) {
                    #push
                }
            }
        }),
        Cardinality::Many => None,
    }
}

fn compare_check(p: &PropertyProjection, configured: Option<&str>, other: &str) -> TokenStream {
    let field = safe_ident(&p.name);
    let other_field = safe_ident(other);
    let message = configured.map_or_else(
        || format!("{} must match {other}", p.name),
        String::from,
    );
    let push = push_violation(p, "compare", &message);

    quote! {
        if self.#field != self.#other_field {
            #push
        }
    }
}

// Delegates to an externally supplied validator shaped `fn(&T) -> Option<String>`.
fn custom_check(p: &PropertyProjection, configured: Option<&str>, path: &str) -> TokenStream {
    let field = safe_ident(&p.name);
    let validator = emit_path(path);

    if let Some(message) = configured {
        let push = push_violation(p, "custom", message);
        quote! {
            if #validator(&self.#field).is_some() {
                #push
            }
        }
    } else {
        let name = &p.name;
        quote! {
            if let Some(message) = #validator(&self.#field) {
                violations.push(::dtoforge::rules::Violation::new(#name, "custom", message));
            }
        }
    }
}

fn length_checks(p: &PropertyProjection) -> Vec<TokenStream> {
    if !is_text(p) || p.value.cardinality != Cardinality::One {
        return Vec::new();
    }

    let field = safe_ident(&p.name);
    let mut checks = Vec::new();

    if let Some(min) = p.constraints.min_length {
        let limit = Literal::usize_unsuffixed(min as usize);
        let message = format!("{} must be at least {min} characters", p.name);
        let push = push_violation(p, "min_length", &message);
        checks.push(quote! {
            if self.#field.chars().count() < #limit {
                #push
            }
        });
    }

    if let Some(max) = p.constraints.max_length {
        let limit = Literal::usize_unsuffixed(max as usize);
        let message = format!("{} must be at most {max} characters", p.name);
        let push = push_violation(p, "max_length", &message);
        checks.push(quote! {
            if self.#field.chars().count() > #limit {
                #push
            }
        });
    }

    checks
}

fn range_checks(p: &PropertyProjection) -> Vec<TokenStream> {
    let numeric = p
        .value
        .item
        .primitive()
        .is_some_and(|prim| prim.is_integer() || prim.is_float());
    if !numeric || p.value.cardinality != Cardinality::One {
        return Vec::new();
    }

    let field = safe_ident(&p.name);
    let mut checks = Vec::new();

    if let Some(min) = p.constraints.range_min {
        let limit = Literal::f64_suffixed(min);
        let message = format!("{} must be at least {min}", p.name);
        let push = push_violation(p, "range", &message);
        checks.push(quote! {
            if (self.#field as f64) < #limit {
                #push
            }
        });
    }

    if let Some(max) = p.constraints.range_max {
        let limit = Literal::f64_suffixed(max);
        let message = format!("{} must be at most {max}", p.name);
        let push = push_violation(p, "range", &message);
        checks.push(quote! {
            if (self.#field as f64) > #limit {
                #push
            }
        });
    }

    checks
}

fn pattern_check(p: &PropertyProjection) -> Option<TokenStream> {
    let pattern = p.constraints.pattern.as_deref()?;
    if !is_text(p) || p.value.cardinality != Cardinality::One {
        return None;
    }

    let field = safe_ident(&p.name);
    let message = format!("{} does not match the expected pattern", p.name);
    let push = push_violation(p, "pattern", &message);

    Some(quote! {
        if !::dtoforge::rules::matches_pattern(&self.#field, #pattern) {
            #push
        }
    })
}
