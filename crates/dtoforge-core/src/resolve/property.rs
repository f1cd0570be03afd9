use super::ResolveContext;
use crate::{
    diagnostic::{DiagnosticKind, Emitter},
    model::{Constraints, PropertyProjection, RuleBinding},
};
use dtoforge_schema::{
    config::{Nullability, ValidationRule},
    descriptor::SourcePropertyDescriptor,
    types::{Cardinality, Primitive, TypePath},
};

/// Resolve one included property. Returns `None` when the property is
/// dropped (unsupported type); fatal configuration findings are emitted but
/// still yield a projection so the partial model stays complete.
pub fn resolve_property(
    prop: &SourcePropertyDescriptor,
    ctx: &ResolveContext,
    emitter: &mut Emitter,
) -> Option<PropertyProjection> {
    let config = &prop.config;
    let source_name = prop.name.clone();

    // Name: rename override, else the source name.
    let name = config
        .rename
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| source_name.clone());

    if syn::parse_str::<syn::Ident>(&name).is_err() {
        emitter.emit_property(
            DiagnosticKind::InvalidConfiguration,
            &source_name,
            format!("rename '{name}' is not a valid identifier"),
        );
    }

    // Type: explicit override, else the declared type, then the forced
    // nullability applied on top.
    let mut value = config.type_override.clone().unwrap_or_else(|| prop.value.clone());
    value = match config.nullability() {
        Nullability::ForceNullable => value.wrap_optional(),
        Nullability::ForceNonNullable => value.strip_optional(),
        Nullability::Inherit => value,
    };

    // Structurally unsupported shapes drop the property, not the model.
    if !value.item.is_supported() {
        emitter.emit_property(
            DiagnosticKind::InvalidPropertyType,
            &source_name,
            format!("type of '{source_name}' cannot be projected; property dropped"),
        );

        return None;
    }

    if let Some(default) = &config.default_value {
        check_default(config, default, &source_name, emitter);
    }
    check_constraints(config, &source_name, emitter);

    // Aggregate validation markers in declaration order.
    let mut rules = Vec::new();
    for spec in &config.validation {
        for rule in spec.rules() {
            if let ValidationRule::Custom(path) = &rule {
                if syn::parse_str::<syn::Path>(path.as_str()).is_err() {
                    emitter.emit_property(
                        DiagnosticKind::InvalidConfiguration,
                        &source_name,
                        format!("custom validator '{path}' is not a valid path"),
                    );
                }
            }
            rules.push(RuleBinding {
                rule,
                message: spec.message.clone(),
            });
        }
    }

    // Implicitly required: a present-by-construction reference-like value
    // nobody already marked required or forced nullable.
    let required = value.cardinality == Cardinality::One
        && value.item.is_reference_like()
        && !config.declares_required()
        && config.nullability() != Nullability::ForceNullable;

    // A named item projected in the same snapshot maps by reference to that
    // type's own target.
    let projects_to = value
        .item
        .named_path()
        .and_then(|path| ctx.target_for(path.as_str()))
        .map(TypePath::new);

    Some(PropertyProjection {
        name,
        source_name,
        value,
        source_value: prop.value.clone(),
        has_default: config.default_value.is_some(),
        default: config.default_value.clone(),
        order: config.order,
        required,
        rules,
        constraints: Constraints {
            min_length: config.min_length,
            max_length: config.max_length,
            range_min: config.range_min,
            range_max: config.range_max,
            pattern: config.pattern.clone(),
        },
        description: config.description.clone(),
        projects_to,
    })
}

/// Compare rules must reference another projected property by resolved name.
pub fn check_compare_targets(properties: &[PropertyProjection], emitter: &mut Emitter) {
    for projection in properties {
        for binding in &projection.rules {
            if let ValidationRule::Compare(other) = &binding.rule {
                if !properties.iter().any(|p| p.name == *other) {
                    emitter.emit_property(
                        DiagnosticKind::InvalidConfiguration,
                        &projection.source_name,
                        format!("compare references unknown property '{other}'"),
                    );
                }
            }
        }
    }
}

fn check_default(
    config: &dtoforge_schema::config::PropertyConfig,
    default: &str,
    source_name: &str,
    emitter: &mut Emitter,
) {
    let expr = match syn::parse_str::<syn::Expr>(default) {
        Ok(expr) => expr,
        Err(_) => {
            emitter.emit_property(
                DiagnosticKind::InvalidConfiguration,
                source_name,
                format!("default_value '{default}' is not a valid expression"),
            );
            return;
        }
    };

    // A type override and a default literal of a contradicting kind cannot
    // both hold.
    let Some(override_value) = &config.type_override else {
        return;
    };
    let Some(prim) = override_value.item.primitive() else {
        return;
    };

    if literal_conflicts(&expr, prim) {
        emitter.emit_property(
            DiagnosticKind::InvalidConfiguration,
            source_name,
            format!("default_value '{default}' does not fit the overridden type '{prim}'"),
        );
    }
}

fn literal_conflicts(expr: &syn::Expr, prim: Primitive) -> bool {
    let syn::Expr::Lit(lit) = expr else {
        return false;
    };

    match &lit.lit {
        syn::Lit::Str(_) => prim.is_numeric() || prim == Primitive::Bool,
        syn::Lit::Int(_) | syn::Lit::Float(_) => prim.is_text() || prim == Primitive::Bool,
        syn::Lit::Bool(_) => prim.is_text() || prim.is_numeric(),
        _ => false,
    }
}

fn check_constraints(
    config: &dtoforge_schema::config::PropertyConfig,
    source_name: &str,
    emitter: &mut Emitter,
) {
    if let (Some(min), Some(max)) = (config.min_length, config.max_length) {
        if min > max {
            emitter.emit_property(
                DiagnosticKind::InvalidConfiguration,
                source_name,
                format!("min_length {min} exceeds max_length {max}"),
            );
        }
    }

    if let (Some(min), Some(max)) = (config.range_min, config.range_max) {
        if min > max {
            emitter.emit_property(
                DiagnosticKind::InvalidConfiguration,
                source_name,
                format!("range_min {min} exceeds range_max {max}"),
            );
        }
    }

    if let Some(pattern) = &config.pattern {
        if regex::Regex::new(pattern).is_err() {
            emitter.emit_property(
                DiagnosticKind::InvalidConfiguration,
                source_name,
                format!("pattern '{pattern}' is not a valid regular expression"),
            );
        }
    }
}
