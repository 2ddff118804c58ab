/*!
The tagged node model (§3, §4.1): the sum type every axis iterator and selector driver
operates over, plus the identity rules and predicates the rest of the crate is built on.
*/

use crate::tree::{AttributeHandle, DocumentHandle, ElementHandle, ElementKey, Tag, TextHandle};
use std::any::Any;
use std::fmt;
use std::rc::Rc;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// An opaque XSD-decoded value paired with a node by [`Node::TypedElement`] /
/// [`Node::TypedAttribute`]. The schema type system that produces these is out of scope
/// (§1); only the wrapper shape matters to navigation.
#[derive(Clone)]
pub struct TypedValue(pub Rc<dyn Any>);

#[derive(Clone)]
pub enum Node {
    Element(ElementHandle),
    Attribute(AttributeHandle),
    Text(TextHandle),
    Document(DocumentHandle),
    TypedElement(ElementHandle, TypedValue),
    TypedAttribute(AttributeHandle, TypedValue),
}

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

/// True for any node shaped like an element, whether or not its tag is the callable
/// sentinel (§4.1). Unwraps [`Node::TypedElement`].
pub fn is_etree_element(node: &Node) -> bool {
    matches!(node, Node::Element(_) | Node::TypedElement(_, _))
}

/// True for a node that is a *true* XPath element: element-shaped and not a callable-tag
/// (comment/processing-instruction) node (§4.1, §4.4 "callable-tag nodes").
pub fn is_element_node(node: &Node) -> bool {
    match node {
        Node::Element(e) => !e.borrow().is_callable(),
        Node::TypedElement(e, _) => !e.borrow().is_callable(),
        _ => false,
    }
}

pub fn is_document_node(node: &Node) -> bool {
    matches!(node, Node::Document(_))
}

/// Two handles are the "same node" iff they point at the same host-tree allocation,
/// never by value (§3, Node identity). A bare element matches a typed wrapper carrying
/// the same underlying element, and likewise for attributes (§4.1).
pub fn same_node(a: &Node, b: &Node) -> bool {
    match (underlying_element(a), underlying_element(b)) {
        (Some(x), Some(y)) => return Rc::ptr_eq(&x, &y),
        _ => {}
    }
    match (underlying_attribute(a), underlying_attribute(b)) {
        (Some(x), Some(y)) => return Rc::ptr_eq(&x, &y),
        _ => {}
    }
    match (a, b) {
        (Node::Text(x), Node::Text(y)) => Rc::ptr_eq(x, y),
        (Node::Document(x), Node::Document(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

pub fn underlying_element(node: &Node) -> Option<ElementHandle> {
    match node {
        Node::Element(e) | Node::TypedElement(e, _) => Some(e.clone()),
        _ => None,
    }
}

pub fn underlying_attribute(node: &Node) -> Option<AttributeHandle> {
    match node {
        Node::Attribute(a) | Node::TypedAttribute(a, _) => Some(a.clone()),
        _ => None,
    }
}

/// The element's tag is the callable sentinel (§4.1); short-circuits sibling, following
/// and preceding axes (§4.4).
pub fn is_callable_tag(node: &Node) -> bool {
    underlying_element(node)
        .map(|e| e.borrow().is_callable())
        .unwrap_or(false)
}

pub fn element_key(node: &Node) -> Option<ElementKey> {
    underlying_element(node).as_ref().map(ElementKey::of)
}

pub fn tag_name(node: &Node) -> Option<String> {
    underlying_element(node).map(|e| match e.borrow().tag() {
        Tag::Named(name) => name.clone(),
        Tag::Callable => String::new(),
    })
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl fmt::Debug for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedValue(..)")
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(e) => write!(f, "Element({:?})", e.borrow().tag()),
            Node::Attribute(a) => write!(f, "Attribute({}={:?})", a.name, a.value),
            Node::Text(t) => write!(f, "Text({:?})", t),
            Node::Document(_) => write!(f, "Document"),
            Node::TypedElement(e, _) => write!(f, "TypedElement({:?})", e.borrow().tag()),
            Node::TypedAttribute(a, _) => write!(f, "TypedAttribute({})", a.name),
        }
    }
}
