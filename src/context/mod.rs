/*!
`XPathContext`: the mutable object a (not-implemented-here) evaluator threads through every
step of expression evaluation (§3, §4.2, §4.6). This module owns construction, the parent
index accessors, path reconstruction and `copy`; the per-axis generators live in
[`axes`](super::axes) and the selector drivers in [`selectors`](super::selectors).
*/

pub mod axes;
pub mod schema;
pub mod selectors;

use crate::error::{Error, Result};
use crate::focus::Focus;
use crate::node::{is_element_node, underlying_attribute, underlying_element, Node};
use crate::parent_index::{self, ParentMap};
use crate::tree::{DocumentHandle, ElementHandle};
use crate::value::Value;
use chrono::{DateTime, FixedOffset, Utc};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

pub struct XPathContext {
    root: Node,
    focus: Focus,
    variable_values: HashMap<String, Value>,
    current_dt: DateTime<FixedOffset>,
    timezone: Option<FixedOffset>,
    documents: Option<Rc<HashMap<String, DocumentHandle>>>,
    collections: Option<Rc<HashMap<String, Vec<Node>>>>,
    default_collection: Option<Rc<Vec<Node>>>,
    parent_map: Rc<RefCell<ParentMap>>,
    /// The anchor element used to reconstruct a path when the focus item is an attribute or
    /// text node (§4.2 `get_path`).
    elem: Option<ElementHandle>,
}

/// Builds an [`XPathContext`], checking the distilled specification's construction invariants
/// 1-5 (§3) as each field is supplied.
#[derive(Default)]
pub struct ContextBuilder {
    root: Option<Node>,
    item: Option<Node>,
    variable_values: HashMap<String, Value>,
    current_dt: Option<DateTime<FixedOffset>>,
    timezone: Option<FixedOffset>,
    documents: Option<HashMap<String, DocumentHandle>>,
    collections: Option<HashMap<String, Vec<Node>>>,
    default_collection: Option<Vec<Node>>,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl ContextBuilder {
    pub fn new(root: Node) -> Self {
        Self {
            root: Some(root),
            ..Default::default()
        }
    }

    pub fn item(mut self, item: Node) -> Self {
        self.item = Some(item);
        self
    }

    pub fn variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variable_values.insert(name.into(), value);
        self
    }

    pub fn current_dt(mut self, dt: DateTime<FixedOffset>) -> Self {
        self.current_dt = Some(dt);
        self
    }

    pub fn timezone(mut self, tz: FixedOffset) -> Self {
        self.timezone = Some(tz);
        self
    }

    pub fn documents(mut self, documents: HashMap<String, DocumentHandle>) -> Self {
        self.documents = Some(documents);
        self
    }

    pub fn collections(mut self, collections: HashMap<String, Vec<Node>>) -> Self {
        self.collections = Some(collections);
        self
    }

    pub fn default_collection(mut self, sequence: Vec<Node>) -> Self {
        self.default_collection = Some(sequence);
        self
    }

    pub fn build(self) -> Result<XPathContext> {
        let root = self.root.ok_or(Error::InvalidRoot)?;

        // Invariant 1: root is a document or a non-callable element.
        let root_is_valid = match &root {
            Node::Document(_) => true,
            Node::Element(e) | Node::TypedElement(e, _) => !e.borrow().is_callable(),
            _ => false,
        };
        if !root_is_valid {
            tracing::debug!("XPathContext::new rejected an invalid root");
            return Err(Error::InvalidRoot);
        }

        let root_element = match &root {
            Node::Document(doc) => Some(doc.root_element()),
            Node::Element(e) | Node::TypedElement(e, _) => Some(e.clone()),
            _ => None,
        };

        // Invariants 2-4: default item and the `_elem` anchor. The anchor is only ever
        // assigned when `root` is an element — a document root leaves it `None`
        // regardless of what item is supplied (§3 invariant 3).
        let root_is_element = matches!(root, Node::Element(_) | Node::TypedElement(_, _));
        let (item, elem) = match (&root, self.item) {
            (Node::Document(_), None) => (None, None),
            (Node::Document(_), Some(item)) => (Some(item), None),
            (_, None) => (Some(root.clone()), root_element.clone()),
            (_, Some(item)) => {
                let anchor = if root_is_element {
                    underlying_element(&item).or_else(|| root_element.clone())
                } else {
                    None
                };
                (Some(item), anchor)
            }
        };

        let current_dt = self.current_dt.unwrap_or_else(|| {
            let tz = self
                .timezone
                .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero is a valid UTC offset"));
            Utc::now().with_timezone(&tz)
        });

        Ok(XPathContext {
            root,
            focus: Focus::new(item, 1, 1),
            variable_values: self.variable_values,
            current_dt,
            timezone: self.timezone,
            documents: self.documents.map(Rc::new),
            collections: self.collections.map(Rc::new),
            default_collection: self.default_collection.map(Rc::new),
            parent_map: Rc::new(RefCell::new(ParentMap::default())),
            elem,
        })
    }
}

impl XPathContext {
    /// Construct a context over `root` with no explicit item, variables, or clock override
    /// (invariants 2 and 4, §3).
    pub fn new(root: Node) -> Result<Self> {
        ContextBuilder::new(root).build()
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn item(&self) -> Option<&Node> {
        self.focus.item.as_ref()
    }

    pub fn position(&self) -> usize {
        self.focus.position
    }

    pub fn size(&self) -> usize {
        self.focus.size
    }

    pub fn current_dt(&self) -> DateTime<FixedOffset> {
        self.current_dt
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variable_values.get(name)
    }

    pub fn default_collection(&self) -> Option<&[Node]> {
        self.default_collection.as_deref().map(Vec::as_slice)
    }

    pub(crate) fn root_element(&self) -> Option<ElementHandle> {
        match &self.root {
            Node::Document(doc) => Some(doc.root_element()),
            Node::Element(e) | Node::TypedElement(e, _) => Some(e.clone()),
            _ => None,
        }
    }

    /// A read-only view of the cached parent map, for callers (tests, diagnostics) that want
    /// to inspect it without triggering a rebuild.
    pub fn parent_map_len(&self) -> usize {
        self.parent_map.borrow().len()
    }

    /// Resolve `node`'s parent, rebuilding the cached map on a miss (§4.2).
    pub fn get_parent(&mut self, node: &Node) -> Option<Node> {
        let root_element = self.root_element()?;
        let mut map = self.parent_map.borrow_mut();
        parent_index::get_parent(&mut map, &root_element, node)
    }

    /// For an attribute, `@name` anchored on `_elem`; otherwise the slash-joined ancestor
    /// chain down to `item` (§4.2).
    pub fn get_path(&mut self, item: &Node) -> String {
        if let Some(attr) = underlying_attribute(item) {
            let anchor_path = match self.elem.clone() {
                Some(elem) => self.get_path(&Node::Element(elem)),
                None => String::new(),
            };
            return format!("{}/@{}", anchor_path, attr.name);
        }

        let mut tags = Vec::new();
        let mut current = underlying_element(item);
        while let Some(elem) = current {
            tags.push(elem.borrow().tag_name().to_string());
            current = self
                .get_parent(&Node::Element(elem))
                .and_then(|p| underlying_element(&p));
        }
        tags.reverse();
        format!("/{}", tags.join("/"))
    }

    /// Whether `node` is of the "principal node kind" for the axis currently in focus:
    /// attributes on the attribute axis, elements otherwise (used by `position()`/`last()`
    /// consumers to decide which yielded nodes count, §4.1).
    pub fn is_principal_node_kind(&self, node: &Node) -> bool {
        use crate::axis::Axis;
        match self.focus.axis {
            Some(Axis::Attribute) => underlying_attribute(node).is_some(),
            _ => is_element_node(node),
        }
    }

    /// The whole document-order walk of the tree this context is rooted at, document node
    /// (if any) first, then every element/attribute/text node (§4.4, `root.iter()`).
    pub fn iter(&self) -> impl Iterator<Item = Node> {
        let mut nodes = Vec::new();
        if let Node::Document(doc) = &self.root {
            nodes.push(Node::Document(doc.clone()));
        }
        if let Some(root_element) = self.root_element() {
            nodes.extend(crate::walk::walk_with_attributes(&root_element, true));
        }
        nodes.into_iter()
    }

    /// Shallow-clone this context for a nested selector invocation (§4.6): same root, a
    /// fresh copy of the variable bindings holding the same values, shared document/
    /// collection tables and parent-map cache, and the axis field cleared unless
    /// `clear_axis` is false.
    pub fn copy(&self, clear_axis: bool) -> Self {
        let mut focus = self.focus.clone();
        if clear_axis {
            focus.axis = None;
        }
        Self {
            root: self.root.clone(),
            focus,
            variable_values: self.variable_values.clone(),
            current_dt: self.current_dt,
            timezone: self.timezone,
            documents: self.documents.clone(),
            collections: self.collections.clone(),
            default_collection: self.default_collection.clone(),
            parent_map: self.parent_map.clone(),
            elem: self.elem.clone(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ElementBuilder;

    fn book_fixture() -> ElementHandle {
        ElementBuilder::new("book")
            .child(
                ElementBuilder::new("chapter")
                    .attribute("id", "1")
                    .child(ElementBuilder::new("section").text("intro").build())
                    .build(),
            )
            .build()
    }

    #[test]
    fn rejects_callable_root() {
        let callable = ElementBuilder::callable().build();
        let err = XPathContext::new(Node::Element(callable)).unwrap_err();
        assert_eq!(err, Error::InvalidRoot);
    }

    #[test]
    fn element_root_defaults_item_to_root() {
        let root = book_fixture();
        let ctx = XPathContext::new(Node::Element(root.clone())).unwrap();
        assert!(matches!(ctx.item(), Some(Node::Element(e)) if Rc::ptr_eq(e, &root)));
    }

    #[test]
    fn document_root_defaults_item_to_none() {
        let root = book_fixture();
        let doc = crate::tree::DocumentData::new(root);
        let ctx = XPathContext::new(Node::Document(doc)).unwrap();
        assert!(ctx.item().is_none());
    }

    #[test]
    fn copy_clears_axis_by_default() {
        let root = book_fixture();
        let mut ctx = XPathContext::new(Node::Element(root)).unwrap();
        let _ = ctx.iter_self().count();
        let copied = ctx.copy(true);
        assert!(copied.focus.axis.is_none());
    }

    #[test]
    fn get_path_reaches_root() {
        let root = book_fixture();
        let mut ctx = XPathContext::new(Node::Element(root.clone())).unwrap();
        let chapter = root.borrow().children[0].element.clone();
        let path = ctx.get_path(&Node::Element(chapter));
        assert_eq!(path, "/book/chapter");
    }
}
