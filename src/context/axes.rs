/*!
One method per XPath axis (§4.4), each following the save/yield/restore discipline from
`FocusGuard` (§4.3). Every axis computes its node sequence eagerly into a `Vec`, then hands
it to [`XPathContext::drive_axis`] (or [`XPathContext::drive_axis_indexed`] for the reverse
axes, whose position counts down rather than up), which is the one place `FocusGuard` is
actually constructed.
*/

use super::XPathContext;
use crate::axis::Axis;
use crate::focus::FocusGuard;
use crate::node::{element_key, is_callable_tag, same_node, underlying_element, Node};
use crate::tree::ElementKey;
use crate::walk::{walk_elements_only, walk_with_attributes};
use ahash::AHashSet;

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl XPathContext {
    /// Enter `axis`, report `items` through the focus triple as each is pulled, with
    /// `position` counting up from 1 (the order every axis except the explicitly reversed
    /// ones uses).
    pub(super) fn drive_axis(&mut self, axis: Axis, items: Vec<Node>) -> impl Iterator<Item = Node> + '_ {
        self.drive_axis_indexed(axis, items, |i| i + 1)
    }

    /// As `drive_axis`, but `position_of` computes `position` from the 0-based index in
    /// `items` — used by `ancestor(-or-self)` and `preceding-sibling`, whose yielded order
    /// doesn't match their position count (§4.4, §9).
    pub(super) fn drive_axis_indexed<P>(
        &mut self,
        axis: Axis,
        items: Vec<Node>,
        position_of: P,
    ) -> impl Iterator<Item = Node> + '_
    where
        P: Fn(usize) -> usize + 'static,
    {
        tracing::trace!(%axis, count = items.len(), "entering axis");
        let mut guard = FocusGuard::enter(&mut self.focus, axis);
        guard.focus_mut().size = items.len();
        items.into_iter().enumerate().map(move |(i, node)| {
            guard.focus_mut().position = position_of(i);
            guard.focus_mut().item = Some(node.clone());
            node
        })
    }

    /// Ancestor element keys of `item`, nearest first (used to exclude ancestors from
    /// `preceding`, §4.4).
    fn ancestor_keys(&mut self, item: &Node) -> AHashSet<ElementKey> {
        let mut keys = AHashSet::default();
        let mut current = item.clone();
        while let Some(parent) = self.get_parent(&current) {
            if let Some(key) = element_key(&parent) {
                keys.insert(key);
            }
            current = parent;
        }
        keys
    }

    /// `self` axis: the current item unchanged, or the root element if focus is at the
    /// document (§4.4).
    pub fn iter_self(&mut self) -> impl Iterator<Item = Node> + '_ {
        let items = match self.focus.item.clone() {
            Some(item) => vec![item],
            None => self.root_element().map(Node::Element).into_iter().collect(),
        };
        self.drive_axis(Axis::SelfAxis, items)
    }

    /// `attribute` axis: the current item's attributes, in attribute-map order. Re-entering
    /// this axis while the item is itself an attribute yields just that attribute once
    /// (§8 scenario S5), rather than falling through to "no attributes on an attribute".
    pub fn iter_attributes(&mut self) -> impl Iterator<Item = Node> + '_ {
        let reentrant_item = self.focus.item.clone().filter(|item| {
            matches!(item, Node::Attribute(_) | Node::TypedAttribute(_, _))
                && self.focus.axis == Some(Axis::Attribute)
        });
        let items = match reentrant_item {
            Some(item) => vec![item],
            None => self
                .focus
                .item
                .clone()
                .and_then(|item| underlying_element(&item))
                .map(|e| {
                    e.borrow()
                        .attributes
                        .iter()
                        .cloned()
                        .map(Node::Attribute)
                        .collect()
                })
                .unwrap_or_default(),
        };
        self.drive_axis(Axis::Attribute, items)
    }

    /// `child` axis, or the "context step" re-exposing the current item when `child_axis` is
    /// false and an axis is already in progress (§4.3's reentrancy marker, §4.4's special
    /// rules for document/element/document items). The context step is a plain pass-through:
    /// it does not save or restore anything, so a predicate reading `position()`/`last()`
    /// during the single-item yield sees whatever the *enclosing* axis already established.
    pub fn iter_children_or_self(&mut self, child_axis: bool) -> Box<dyn Iterator<Item = Node> + '_> {
        if !child_axis && self.focus.axis.is_some() {
            return Box::new(self.focus.item.clone().into_iter());
        }

        let items = match self.focus.item.clone() {
            None => self.root_element().map(Node::Element).into_iter().collect(),
            Some(Node::Document(doc)) => vec![Node::Element(doc.root_element())],
            Some(item) => underlying_element(&item)
                .map(|e| {
                    let data = e.borrow();
                    let mut out = Vec::new();
                    if let Some(text) = &data.text {
                        out.push(Node::Text(text.clone()));
                    }
                    out.extend(data.children.iter().map(|slot| Node::Element(slot.element.clone())));
                    out
                })
                .unwrap_or_default(),
        };
        Box::new(self.drive_axis(Axis::Child, items))
    }

    /// `parent` axis: the parent via the lazy parent index, or empty at the root (§4.2).
    pub fn iter_parent(&mut self) -> impl Iterator<Item = Node> + '_ {
        let items = self
            .focus
            .item
            .clone()
            .and_then(|item| self.get_parent(&item))
            .into_iter()
            .collect();
        self.drive_axis(Axis::Parent, items)
    }

    /// `following-sibling` or `preceding-sibling`, relative to the parent's child list
    /// (§4.4). Callable-tag items have no siblings by convention (§4.1).
    pub fn iter_siblings(&mut self, axis: Axis) -> impl Iterator<Item = Node> + '_ {
        debug_assert!(matches!(axis, Axis::FollowingSibling | Axis::PrecedingSibling));
        let mut items = Vec::new();
        if let Some(item) = self.focus.item.clone() {
            if !is_callable_tag(&item) {
                if let Some(parent_elem) = self
                    .get_parent(&item)
                    .and_then(|parent| underlying_element(&parent))
                {
                    let item_key = element_key(&item);
                    let siblings: Vec<Node> = parent_elem
                        .borrow()
                        .children
                        .iter()
                        .map(|slot| Node::Element(slot.element.clone()))
                        .collect();
                    if let Some(pos) = siblings
                        .iter()
                        .position(|sibling| element_key(sibling) == item_key)
                    {
                        items = match axis {
                            Axis::FollowingSibling => siblings[pos + 1..].to_vec(),
                            Axis::PrecedingSibling => {
                                siblings[..pos].iter().rev().cloned().collect()
                            }
                            _ => unreachable!(),
                        };
                    }
                }
            }
        }
        // Both branches must produce the same concrete `impl Iterator` type, so the position
        // function is one closure that switches on `axis` rather than two differently-typed
        // closures picked by an outer match.
        let len = items.len();
        let reverse_position = axis == Axis::PrecedingSibling;
        self.drive_axis_indexed(axis, items, move |i| {
            if reverse_position {
                len - i
            } else {
                i + 1
            }
        })
    }

    /// `ancestor` or `ancestor-or-self`: root-to-self order, `position` counting down from
    /// `size` to 1 (§4.4, §9's design note on the internal seed-then-reverse construction).
    pub fn iter_ancestors(&mut self, axis: Axis) -> impl Iterator<Item = Node> + '_ {
        debug_assert!(matches!(axis, Axis::Ancestor | Axis::AncestorOrSelf));
        let mut nearest_first = Vec::new();
        if let Some(item) = self.focus.item.clone() {
            if axis == Axis::AncestorOrSelf {
                nearest_first.push(item.clone());
            }
            let mut current = item;
            while let Some(parent) = self.get_parent(&current) {
                nearest_first.push(parent.clone());
                current = parent;
            }
        }
        nearest_first.reverse();
        let len = nearest_first.len();
        self.drive_axis_indexed(axis, nearest_first, move |i| len - i)
    }

    /// `descendant` or `descendant-or-self`, elements only (§4.4, §9's document-focus quirk).
    pub fn iter_descendants(&mut self, axis: Axis) -> impl Iterator<Item = Node> + '_ {
        debug_assert!(matches!(axis, Axis::Descendant | Axis::DescendantOrSelf));
        let include_self = axis == Axis::DescendantOrSelf;
        let items = match self.focus.item.clone() {
            Some(item) => underlying_element(&item)
                .map(|e| walk_elements_only(&e, include_self))
                .unwrap_or_default(),
            None => {
                let mut out = Vec::new();
                if let Node::Document(doc) = &self.root {
                    out.push(Node::Document(doc.clone()));
                }
                if let Some(root_element) = self.root_element() {
                    out.extend(walk_elements_only(&root_element, true));
                }
                out
            }
        };
        self.drive_axis(axis, items)
    }

    /// `preceding`: whole-tree document order before `item`, excluding `item`'s ancestors
    /// (§4.4).
    pub fn iter_preceding(&mut self) -> impl Iterator<Item = Node> + '_ {
        let items = self.preceding_items();
        self.drive_axis(Axis::Preceding, items)
    }

    fn preceding_items(&mut self) -> Vec<Node> {
        let item = match self.focus.item.clone() {
            Some(item) if !is_callable_tag(&item) => item,
            _ => return Vec::new(),
        };
        let root_element = match self.root_element() {
            Some(root_element) => root_element,
            None => return Vec::new(),
        };
        let ancestors = self.ancestor_keys(&item);
        let mut out = Vec::new();
        for node in walk_with_attributes(&root_element, true) {
            if same_node(&node, &item) {
                break;
            }
            if let Some(key) = element_key(&node) {
                if ancestors.contains(&key) {
                    continue;
                }
            }
            out.push(node);
        }
        out
    }

    /// `following`: whole-tree document order after `item`, excluding `item`'s descendants
    /// (§4.4).
    pub fn iter_followings(&mut self) -> impl Iterator<Item = Node> + '_ {
        let items = self.following_items();
        self.drive_axis(Axis::Following, items)
    }

    fn following_items(&mut self) -> Vec<Node> {
        let item = match self.focus.item.clone() {
            Some(item) if !is_callable_tag(&item) => item,
            _ => return Vec::new(),
        };
        let root_element = match self.root_element() {
            Some(root_element) => root_element,
            None => return Vec::new(),
        };
        let descendants: AHashSet<ElementKey> = underlying_element(&item)
            .map(|e| {
                walk_elements_only(&e, false)
                    .into_iter()
                    .filter_map(|node| element_key(&node))
                    .collect()
            })
            .unwrap_or_default();
        let mut out = Vec::new();
        let mut past_item = false;
        for node in walk_with_attributes(&root_element, true) {
            if !past_item {
                if same_node(&node, &item) {
                    past_item = true;
                }
                continue;
            }
            if let Some(key) = element_key(&node) {
                if descendants.contains(&key) {
                    continue;
                }
            }
            out.push(node);
        }
        out
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------
