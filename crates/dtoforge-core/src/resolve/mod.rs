mod cycle;
mod inherit;
mod property;

use crate::{
    diagnostic::{Diagnostic, DiagnosticKind, Emitter, has_errors},
    model::{ProjectionModel, PropertyProjection, TargetKind},
};
use dtoforge_schema::{
    config::TypeConfig,
    descriptor::{SourceTypeDescriptor, TARGET_NAME_SUFFIX, TARGET_NAMESPACE_SEGMENT},
};
use std::collections::{BTreeMap, BTreeSet};

///
/// Resolution
///
/// One resolver result: a (possibly partial) model plus its diagnostics.
/// Models carrying any error-severity diagnostic do not proceed to
/// synthesis; warnings never block.
///

#[derive(Clone, Debug)]
pub struct Resolution {
    pub model: ProjectionModel,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    #[must_use]
    pub fn is_generatable(&self) -> bool {
        !has_errors(&self.diagnostics)
    }
}

///
/// ResolveContext
///
/// Read-only tables derived from the ordered snapshot: resolved target per
/// source path, duplicate-name flags (first occurrence wins, stable input
/// order), and the projected reference graph for the cycle walk. BTree maps
/// keep every lookup deterministic.
///

#[derive(Debug, Default)]
pub struct ResolveContext {
    targets: BTreeMap<String, String>,
    claimed: BTreeMap<String, String>,
    duplicates: BTreeSet<String>,
    edges: BTreeMap<String, Vec<String>>,
}

impl ResolveContext {
    #[must_use]
    pub fn build(descriptors: &[SourceTypeDescriptor]) -> Self {
        let mut ctx = Self::default();

        let known: BTreeSet<String> = descriptors.iter().map(SourceTypeDescriptor::path).collect();

        for descriptor in descriptors {
            let source_path = descriptor.path();
            let target_path = resolved_target_path(descriptor);

            if let Some(first) = ctx.claimed.get(&target_path) {
                if *first != source_path {
                    ctx.duplicates.insert(source_path.clone());
                }
            } else {
                ctx.claimed.insert(target_path.clone(), source_path.clone());
            }
            ctx.targets.insert(source_path.clone(), target_path);

            // Projected reference edges, declaration order.
            let outcome = inherit::collect(descriptor, include_inherited(descriptor));
            let mut neighbors = Vec::new();
            for prop in outcome.properties.iter().filter(|p| p.is_included()) {
                if let Some(path) = effective_named_path(prop) {
                    if known.contains(path) && !neighbors.contains(&path.to_string()) {
                        neighbors.push(path.to_string());
                    }
                }
            }
            ctx.edges.insert(source_path, neighbors);
        }

        ctx
    }

    /// Resolved target path for a source path in this snapshot.
    #[must_use]
    pub fn target_for(&self, source_path: &str) -> Option<&str> {
        self.targets.get(source_path).map(String::as_str)
    }

    /// Source path that first claimed the given target path.
    #[must_use]
    pub fn first_claimant(&self, target_path: &str) -> Option<&str> {
        self.claimed.get(target_path).map(String::as_str)
    }

    #[must_use]
    pub fn is_duplicate(&self, source_path: &str) -> bool {
        self.duplicates.contains(source_path)
    }

    pub(crate) fn neighbors(&self, source_path: &str) -> &[String] {
        self.edges.get(source_path).map_or(&[], Vec::as_slice)
    }
}

fn include_inherited(descriptor: &SourceTypeDescriptor) -> bool {
    descriptor
        .config
        .as_ref()
        .is_some_and(|c| c.include_inherited)
}

// The item path that participates in the projected reference graph; a type
// override redirects the edge.
fn effective_named_path(
    prop: &dtoforge_schema::descriptor::SourcePropertyDescriptor,
) -> Option<&str> {
    let value = prop.config.type_override.as_ref().unwrap_or(&prop.value);

    value.item.named_path().map(dtoforge_schema::types::TypePath::as_str)
}

///
/// Naming
///

/// Target name: explicit non-empty override, else `{sourceName}Dto`.
#[must_use]
pub fn resolved_target_name(descriptor: &SourceTypeDescriptor) -> String {
    descriptor
        .config
        .as_ref()
        .and_then(|c| c.name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| format!("{}{TARGET_NAME_SUFFIX}", descriptor.name))
}

/// Target namespace: explicit non-empty override, else
/// `{sourceNamespace}::dto`.
#[must_use]
pub fn resolved_target_namespace(descriptor: &SourceTypeDescriptor) -> String {
    descriptor
        .config
        .as_ref()
        .and_then(|c| c.namespace.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| {
            if descriptor.namespace.is_empty() {
                TARGET_NAMESPACE_SEGMENT.to_string()
            } else {
                format!("{}::{TARGET_NAMESPACE_SEGMENT}", descriptor.namespace)
            }
        })
}

fn resolved_target_path(descriptor: &SourceTypeDescriptor) -> String {
    format!(
        "{}::{}",
        resolved_target_namespace(descriptor),
        resolved_target_name(descriptor)
    )
}

///
/// Resolver
///

/// Resolve every descriptor in stable input order.
#[must_use]
pub fn resolve_all(descriptors: &[SourceTypeDescriptor]) -> Vec<Resolution> {
    let ctx = ResolveContext::build(descriptors);

    descriptors
        .iter()
        .map(|descriptor| resolve_type(descriptor, &ctx))
        .collect()
}

/// Resolve one descriptor against the snapshot context. Always returns a
/// model; fatal findings are carried as diagnostics, never thrown.
#[must_use]
pub fn resolve_type(descriptor: &SourceTypeDescriptor, ctx: &ResolveContext) -> Resolution {
    let source_path = descriptor.path();
    let mut emitter = Emitter::new(&source_path);

    let config = descriptor.config.clone().unwrap_or_else(|| {
        emitter.emit(
            DiagnosticKind::MissingMarker,
            format!("type '{}' is not marked for projection", descriptor.name),
        );

        TypeConfig::default()
    });

    let name = resolved_target_name(descriptor);
    let namespace = resolved_target_namespace(descriptor);

    check_ident(&mut emitter, "name", &name);
    check_namespace(&mut emitter, &namespace);

    if ctx.is_duplicate(&source_path) {
        let target_path = format!("{namespace}::{name}");
        let first = ctx.first_claimant(&target_path).unwrap_or("another type");
        emitter.emit(
            DiagnosticKind::DuplicateName,
            format!("target '{target_path}' is already produced by '{first}'"),
        );
    }

    // Own and inherited candidates, most-derived-wins.
    let outcome = inherit::collect(descriptor, config.include_inherited);
    for error in &outcome.errors {
        emitter.emit(DiagnosticKind::InvalidConfiguration, error.clone());
    }

    let mut properties: Vec<PropertyProjection> = Vec::new();
    for prop in &outcome.properties {
        if !prop.is_included() {
            continue;
        }
        if let Some(projection) = property::resolve_property(prop, ctx, &mut emitter) {
            properties.push(projection);
        }
    }

    // Projection names must be unique within the model.
    let mut seen = BTreeSet::new();
    for projection in &properties {
        if !seen.insert(projection.name.clone()) {
            emitter.emit_property(
                DiagnosticKind::InvalidConfiguration,
                &projection.source_name,
                format!("rename collides with another projected property '{}'", projection.name),
            );
        }
    }

    // Compare rules must reference a projected property.
    property::check_compare_targets(&properties, &mut emitter);

    // Stable order: explicit orders ascending, unordered entries after them
    // in declaration order.
    properties.sort_by_key(|p| p.order.map_or((1, 0), |n| (0, i64::from(n))));

    // Circular references are safe (nested types are referenced, never
    // inlined) but worth surfacing.
    if let Some((from, to)) = cycle::first_cycle_edge(&source_path, ctx) {
        emitter.emit(
            DiagnosticKind::CircularReference,
            format!("projection cycle detected: '{from}' refers back to '{to}'"),
        );
    }

    let projected: BTreeSet<&str> = properties.iter().map(|p| p.source_name.as_str()).collect();
    let source_has_unprojected = descriptor
        .properties
        .iter()
        .chain(outcome.properties.iter())
        .any(|p| !projected.contains(p.name.as_str()));

    let model = ProjectionModel {
        source_name: descriptor.name.clone(),
        source_path,
        name,
        namespace,
        kind: if config.value_semantics {
            TargetKind::Value
        } else {
            TargetKind::Plain
        },
        access: config.access,
        parameterless_ctor: config.parameterless_ctor,
        equality: config.equality,
        validation: config.validation,
        documentation: config.documentation,
        mappers: config.mappers,
        imports: config.imports,
        source_has_unprojected,
        properties,
    };

    Resolution {
        model,
        diagnostics: emitter.into_diagnostics(),
    }
}

fn check_ident(emitter: &mut Emitter, setting: &str, value: &str) {
    if syn::parse_str::<syn::Ident>(value).is_err() {
        emitter.emit(
            DiagnosticKind::InvalidConfiguration,
            format!("{setting} '{value}' is not a valid identifier"),
        );
    }
}

fn check_namespace(emitter: &mut Emitter, namespace: &str) {
    for segment in namespace.split("::") {
        if syn::parse_str::<syn::Ident>(segment).is_err() {
            emitter.emit(
                DiagnosticKind::InvalidConfiguration,
                format!("namespace segment '{segment}' is not a valid identifier"),
            );
        }
    }
}
