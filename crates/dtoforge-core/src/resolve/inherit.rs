use dtoforge_schema::descriptor::{
    MAX_ANCESTOR_DEPTH, SourcePropertyDescriptor, SourceTypeDescriptor,
};
use std::collections::BTreeSet;

///
/// CollectOutcome
///

#[derive(Debug)]
pub struct CollectOutcome {
    /// Own properties first, then inherited layers outward, de-duplicated by
    /// name with most-derived-wins.
    pub properties: Vec<SourcePropertyDescriptor>,
    pub errors: Vec<String>,
}

/// Gather the property universe for one descriptor. The ancestor walk is a
/// bounded iteration: it stops at the root sentinel, caps depth, and treats
/// a revisited layer as a configuration error rather than looping.
pub fn collect(descriptor: &SourceTypeDescriptor, include_inherited: bool) -> CollectOutcome {
    let mut properties = descriptor.properties.clone();
    let mut errors = Vec::new();

    if !include_inherited {
        return CollectOutcome { properties, errors };
    }

    let mut seen_names: BTreeSet<String> =
        properties.iter().map(|p| p.name.clone()).collect();
    let mut seen_layers: BTreeSet<String> = BTreeSet::new();
    seen_layers.insert(descriptor.name.clone());

    for (depth, layer) in descriptor.ancestors.iter().enumerate() {
        if layer.is_root() {
            break;
        }
        if depth >= MAX_ANCESTOR_DEPTH {
            errors.push(format!(
                "ancestor chain of '{}' exceeds the depth cap of {MAX_ANCESTOR_DEPTH}",
                descriptor.name
            ));
            break;
        }
        if !seen_layers.insert(layer.name.clone()) {
            errors.push(format!(
                "ancestor layer '{}' appears twice in the chain of '{}'",
                layer.name, descriptor.name
            ));
            break;
        }

        for prop in &layer.properties {
            if seen_names.insert(prop.name.clone()) {
                properties.push(prop.clone());
            }
        }
    }

    CollectOutcome { properties, errors }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use dtoforge_schema::{
        descriptor::AncestorLayer,
        types::{Primitive, Value},
    };

    fn prop(name: &str) -> SourcePropertyDescriptor {
        SourcePropertyDescriptor::new(name, Value::prim(Primitive::Text))
    }

    fn descriptor_with_chain(ancestors: Vec<AncestorLayer>) -> SourceTypeDescriptor {
        SourceTypeDescriptor::new("t", "Derived")
            .with_properties(vec![prop("own"), prop("shared")])
            .with_ancestors(ancestors)
    }

    #[test]
    fn skips_chain_when_inheritance_is_off() {
        let descriptor =
            descriptor_with_chain(vec![AncestorLayer::new("Base", vec![prop("base_only")])]);
        let outcome = collect(&descriptor, false);

        assert_eq!(outcome.properties.len(), 2);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn most_derived_wins_and_sentinel_stops() {
        let descriptor = descriptor_with_chain(vec![
            AncestorLayer::new("Base", vec![prop("shared"), prop("base_only")]),
            AncestorLayer::root(),
            AncestorLayer::new("Beyond", vec![prop("never_seen")]),
        ]);
        let outcome = collect(&descriptor, true);

        let names: Vec<&str> = outcome.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["own", "shared", "base_only"]);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn revisited_layer_is_an_error_not_a_loop() {
        let descriptor = descriptor_with_chain(vec![
            AncestorLayer::new("Base", vec![prop("base_only")]),
            AncestorLayer::new("Base", vec![prop("again")]),
        ]);
        let outcome = collect(&descriptor, true);

        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("appears twice"));
        // Walk stopped at the revisit.
        let names: Vec<&str> = outcome.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["own", "shared", "base_only"]);
    }

    #[test]
    fn depth_cap_is_reported() {
        let chain: Vec<AncestorLayer> = (0..MAX_ANCESTOR_DEPTH + 2)
            .map(|i| AncestorLayer::new(format!("Layer{i}"), vec![]))
            .collect();
        let outcome = collect(&descriptor_with_chain(chain), true);

        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("depth cap"));
    }
}
