use super::ResolveContext;

/// Depth-first walk over projected reference-typed properties, declaration
/// order. Returns the first edge that leads back to the originating type, or
/// `None` when the reachable graph never revisits it.
pub fn first_cycle_edge(origin: &str, ctx: &ResolveContext) -> Option<(String, String)> {
    let mut visited = std::collections::BTreeSet::new();
    visited.insert(origin.to_string());

    // (node, next neighbor index); the explicit stack keeps the walk bounded
    // by the snapshot size.
    let mut stack: Vec<(String, usize)> = vec![(origin.to_string(), 0)];

    while let Some((node, idx)) = stack.pop() {
        let neighbors = ctx.neighbors(&node);
        let Some(next) = neighbors.get(idx) else {
            continue;
        };
        stack.push((node.clone(), idx + 1));

        if next == origin {
            return Some((node, next.clone()));
        }
        if visited.insert(next.clone()) {
            stack.push((next.clone(), 0));
        }
    }

    None
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use dtoforge_schema::{
        descriptor::{SourcePropertyDescriptor, SourceTypeDescriptor},
        types::{TypeRef, Value},
    };

    fn reference(name: &str, target: &str) -> SourcePropertyDescriptor {
        SourcePropertyDescriptor::new(name, Value::one(TypeRef::named(target)))
    }

    fn ty(name: &str, props: Vec<SourcePropertyDescriptor>) -> SourceTypeDescriptor {
        SourceTypeDescriptor::new("t", name).with_properties(props)
    }

    #[test]
    fn two_type_cycle_reports_first_edge() {
        let descriptors = vec![
            ty("A", vec![reference("b", "t::B")]),
            ty("B", vec![reference("a", "t::A")]),
        ];
        let ctx = ResolveContext::build(&descriptors);

        assert_eq!(
            first_cycle_edge("t::A", &ctx),
            Some(("t::B".to_string(), "t::A".to_string()))
        );
        assert_eq!(
            first_cycle_edge("t::B", &ctx),
            Some(("t::A".to_string(), "t::B".to_string()))
        );
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let descriptors = vec![ty("A", vec![reference("me", "t::A")])];
        let ctx = ResolveContext::build(&descriptors);

        assert_eq!(
            first_cycle_edge("t::A", &ctx),
            Some(("t::A".to_string(), "t::A".to_string()))
        );
    }

    #[test]
    fn acyclic_chain_is_clean() {
        let descriptors = vec![
            ty("A", vec![reference("b", "t::B")]),
            ty("B", vec![reference("c", "t::C")]),
            ty("C", vec![]),
        ];
        let ctx = ResolveContext::build(&descriptors);

        assert_eq!(first_cycle_edge("t::A", &ctx), None);
        assert_eq!(first_cycle_edge("t::C", &ctx), None);
    }

    #[test]
    fn unmarked_reference_targets_are_not_edges() {
        // t::Other is not part of the snapshot, so no edge forms.
        let descriptors = vec![ty("A", vec![reference("other", "t::Other")])];
        let ctx = ResolveContext::build(&descriptors);

        assert_eq!(first_cycle_edge("t::A", &ctx), None);
    }

    #[test]
    fn ignored_references_do_not_form_edges() {
        let mut b_ref = reference("b", "t::B");
        b_ref.config.ignore = true;

        let descriptors = vec![
            ty("A", vec![b_ref]),
            ty("B", vec![reference("a", "t::A")]),
        ];
        let ctx = ResolveContext::build(&descriptors);

        assert_eq!(first_cycle_edge("t::A", &ctx), None);
    }
}
