/*!
The lazy reverse (child → parent) index (§4.2).

Host trees in this family (ElementTree-shaped) carry no parent pointer, so any upward
navigation needs an index built by one full walk. This module builds that index once per
rebuild, keyed by element identity, and is indifferent to whether the rebuild was triggered
lazily from [`crate::context::XPathContext::get_parent`] or re-triggered after a miss — both
paths call [`build_parent_map`].
*/

use crate::node::{underlying_element, Node};
use crate::tree::{ElementHandle, ElementKey};
use crate::walk::walk_elements_only;
use ahash::AHashMap;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// Child element identity → parent element handle. Only elements are ever keys: the
/// original implementation's map comprehension iterates sub-elements, never attributes or
/// text, so those never resolve via the parent map (§4.2; an attribute's ancestor chain is
/// instead reconstructed via `_elem`, see `get_path`).
pub type ParentMap = AHashMap<ElementKey, ElementHandle>;

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

/// Rebuild the whole map in one walk from `root_element`: O(N) per rebuild, amortized O(1)
/// per lookup under locality (§4.2 rationale).
pub fn build_parent_map(root_element: &ElementHandle) -> ParentMap {
    let mut map = ParentMap::default();
    for node in walk_elements_only(root_element, true) {
        if let Node::Element(parent) = node {
            for slot in &parent.borrow().children {
                map.insert(ElementKey::of(&slot.element), parent.clone());
            }
        }
    }
    map
}

/// Look up `node`'s parent in `map`, rebuilding via `rebuild` on a miss and retrying once
/// (§4.2: "on miss, rebuild... and retry; second miss returns `None`").
pub fn get_parent(
    map: &mut ParentMap,
    root_element: &ElementHandle,
    node: &Node,
) -> Option<Node> {
    let elem = underlying_element(node)?;
    if std::rc::Rc::ptr_eq(&elem, root_element) {
        return None;
    }
    let key = ElementKey::of(&elem);
    if let Some(parent) = map.get(&key) {
        return Some(Node::Element(parent.clone()));
    }
    tracing::trace!("parent map miss, rebuilding");
    *map = build_parent_map(root_element);
    map.get(&key).map(|parent| Node::Element(parent.clone()))
}
