//! Property tests for the algebraic invariants the distilled specification calls out (§8):
//! focus save/restore, parent inversion, ancestor chain termination, the descendant-or-self
//! = self ∪ descendant law, the sibling partition law, and typed-node identity matching.
//! Trees are generated with bounded depth and fan-out, following the `prop_recursive`
//! arbitrary-tree pattern this pack's XML tooling uses for tree-shaped test data.

use proptest::prelude::*;
use xpath_dynamic_context::axis::Axis;
use xpath_dynamic_context::context::ContextBuilder;
use xpath_dynamic_context::node::{same_node, Node, TypedValue};
use xpath_dynamic_context::tree::{ElementBuilder, ElementHandle};
use xpath_dynamic_context::XPathContext;
use std::rc::Rc;

#[derive(Clone, Debug)]
struct TestTree {
    name: String,
    children: Vec<TestTree>,
}

fn arb_tree() -> impl Strategy<Value = TestTree> {
    let leaf = "[a-z]{1,6}".prop_map(|name| TestTree {
        name,
        children: Vec::new(),
    });
    leaf.prop_recursive(4, 32, 4, |inner| {
        ("[a-z]{1,6}", prop::collection::vec(inner, 0..4))
            .prop_map(|(name, children)| TestTree { name, children })
    })
}

fn build(tree: &TestTree) -> ElementHandle {
    let mut builder = ElementBuilder::new(&tree.name);
    for child in &tree.children {
        builder = builder.child(build(child));
    }
    builder.build()
}

fn same_item(a: &Option<Node>, b: &Option<Node>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => same_node(x, y),
        _ => false,
    }
}

/// Every non-root element in the generated tree, collected via a manual walk (independent of
/// the crate's own walkers, so these properties don't just check the walker against itself).
fn all_elements(element: &ElementHandle, include_self: bool, out: &mut Vec<ElementHandle>) {
    if include_self {
        out.push(element.clone());
    }
    for slot in &element.borrow().children {
        all_elements(&slot.element, true, out);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// §4.3 invariant 7: the pre-iteration focus tuple is restored once an axis iterator is
    /// dropped, whether exhausted or abandoned early.
    #[test]
    fn focus_is_restored_after_full_and_partial_iteration(tree in arb_tree()) {
        let root = build(&tree);
        let mut ctx = XPathContext::new(Node::Element(root)).unwrap();
        let before = (ctx.item().cloned(), ctx.position(), ctx.size());

        let _ = ctx.iter_descendants(Axis::DescendantOrSelf).collect::<Vec<_>>();
        prop_assert!(same_item(&before.0, &ctx.item().cloned()));
        prop_assert_eq!(before.1, ctx.position());
        prop_assert_eq!(before.2, ctx.size());

        // Abandon the iterator after at most one pull.
        let _ = ctx.iter_descendants(Axis::DescendantOrSelf).next();
        prop_assert!(same_item(&before.0, &ctx.item().cloned()));
        prop_assert_eq!(before.1, ctx.position());
        prop_assert_eq!(before.2, ctx.size());
    }

    /// §4.2: `get_parent` inverts child membership — every element the parent index finds
    /// for `child` actually lists `child` among its own children.
    #[test]
    fn parent_index_inverts_child_membership(tree in arb_tree()) {
        let root = build(&tree);
        let mut elements = Vec::new();
        all_elements(&root, false, &mut elements);

        let mut ctx = XPathContext::new(Node::Element(root)).unwrap();
        for child in elements {
            if let Some(parent) = ctx.get_parent(&Node::Element(child.clone())) {
                let found = match &parent {
                    Node::Element(p) => p
                        .borrow()
                        .children
                        .iter()
                        .any(|slot| Rc::ptr_eq(&slot.element, &child)),
                    _ => false,
                };
                prop_assert!(found);
            }
        }
    }

    /// §4.4: walking `get_parent` from any element terminates at the root within the tree's
    /// depth (never loops, never outruns the structure).
    #[test]
    fn ancestor_chain_terminates_at_root(tree in arb_tree()) {
        let root = build(&tree);
        let mut elements = Vec::new();
        all_elements(&root, false, &mut elements);

        let mut ctx = XPathContext::new(Node::Element(root.clone())).unwrap();
        for element in elements {
            let mut current = Node::Element(element);
            let mut steps = 0;
            while let Some(parent) = ctx.get_parent(&current) {
                current = parent;
                steps += 1;
                prop_assert!(steps <= 64, "ancestor walk did not terminate");
            }
            prop_assert!(same_node(&current, &Node::Element(root.clone())));
        }
    }

    /// §8: `descendant-or-self` is `self` prepended to `descendant`, as a count law.
    #[test]
    fn descendant_or_self_is_self_plus_descendant(tree in arb_tree()) {
        let root = build(&tree);
        let mut ctx = XPathContext::new(Node::Element(root)).unwrap();
        let descendant_count = ctx.iter_descendants(Axis::Descendant).count();
        let descendant_or_self_count = ctx.iter_descendants(Axis::DescendantOrSelf).count();
        prop_assert_eq!(descendant_or_self_count, descendant_count + 1);
    }

    /// §8: the sibling partition law — every child other than `item` is either a following
    /// sibling or a preceding sibling of `item`, never both, never neither.
    #[test]
    fn sibling_axes_partition_the_child_list(tree in arb_tree()) {
        let root = build(&tree);
        if root.borrow().children.len() < 2 {
            return Ok(());
        }
        let pick = root.borrow().children[0].element.clone();
        let total_siblings = root.borrow().children.len();

        let mut ctx = ContextBuilder::new(Node::Element(root))
            .item(Node::Element(pick))
            .build()
            .unwrap();
        let following = ctx.iter_siblings(Axis::FollowingSibling).count();
        let preceding = ctx.iter_siblings(Axis::PrecedingSibling).count();
        prop_assert_eq!(following + preceding + 1, total_siblings);
    }

    /// §4.1: a bare element and a typed wrapper around the same element are the "same node".
    #[test]
    fn typed_element_matches_its_bare_underlying_element(tree in arb_tree()) {
        let root = build(&tree);
        let typed = Node::TypedElement(root.clone(), TypedValue(Rc::new(42i64)));
        prop_assert!(same_node(&Node::Element(root), &typed));
    }

    /// §8 testable property 5, the complement law: for the root element and any non-root
    /// element `e`, `preceding(e) ⊎ ancestors(e) ⊎ {e} ⊎ descendants(e) ⊎ following(e)`
    /// covers every node of a whole-tree walk exactly once.
    #[test]
    fn complement_law_partitions_all_nodes(tree in arb_tree()) {
        let root = build(&tree);
        let mut elements = Vec::new();
        all_elements(&root, false, &mut elements);

        let total = XPathContext::new(Node::Element(root.clone())).unwrap().iter().count();

        for element in elements {
            let mut ctx = ContextBuilder::new(Node::Element(root.clone()))
                .item(Node::Element(element))
                .build()
                .unwrap();
            let preceding = ctx.iter_preceding().count();
            let ancestors = ctx.iter_ancestors(Axis::Ancestor).count();
            let descendants = ctx.iter_descendants(Axis::Descendant).count();
            let following = ctx.iter_followings().count();
            prop_assert_eq!(preceding + ancestors + 1 + descendants + following, total);
        }
    }
}
