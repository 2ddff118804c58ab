/*!
Document-order tree walking (§4.4, Glossary "Document order").

A single recursive walker backs the whole-tree iterators (`iter`, `iter_results`, the
exclusion sets used by `following`/`preceding`) and the elements-only walker backing the
`descendant`/`descendant-or-self` axes. Grounded in `original_source/elementpath`'s
`etree_iter_nodes`: the "with attributes" walk includes attribute and text nodes (text
preceding children, each child's tail following its subtree); the elements-only walk used
for `descendant` axes never does, matching the original implementation exactly rather than
the more general XPath model (§9 design notes: ambiguities resolved in favor of the
original source).
*/

use crate::node::Node;
use crate::tree::ElementHandle;

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

/// Document-order walk of `element`'s subtree, including attribute and text nodes.
/// `include_self` controls whether `element` itself is the first item yielded.
pub fn walk_with_attributes(element: &ElementHandle, include_self: bool) -> Vec<Node> {
    let mut out = Vec::new();
    walk_with_attributes_into(element, include_self, &mut out);
    out
}

fn walk_with_attributes_into(element: &ElementHandle, include_self: bool, out: &mut Vec<Node>) {
    if include_self {
        out.push(Node::Element(element.clone()));
    }
    let data = element.borrow();
    for attr in &data.attributes {
        out.push(Node::Attribute(attr.clone()));
    }
    if let Some(text) = &data.text {
        out.push(Node::Text(text.clone()));
    }
    for slot in &data.children {
        walk_with_attributes_into(&slot.element, true, out);
        if let Some(tail) = &slot.tail {
            out.push(Node::Text(tail.clone()));
        }
    }
}

/// Document-order walk of `element`'s subtree, elements only (no attribute or text
/// nodes) — the shape `descendant`/`descendant-or-self` use (§4.4).
pub fn walk_elements_only(element: &ElementHandle, include_self: bool) -> Vec<Node> {
    let mut out = Vec::new();
    walk_elements_only_into(element, include_self, &mut out);
    out
}

fn walk_elements_only_into(element: &ElementHandle, include_self: bool, out: &mut Vec<Node>) {
    if include_self {
        out.push(Node::Element(element.clone()));
    }
    for slot in &element.borrow().children {
        walk_elements_only_into(&slot.element, true, out);
    }
}
