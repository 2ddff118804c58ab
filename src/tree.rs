/*!
A minimal, deliberately parent-pointer-less host tree (§3a).

The distilled specification treats document loading and the underlying DOM/ElementTree
representation as an external collaborator it does not define. This module stands in for
that collaborator: an `Rc`-backed arena of elements with no parent pointer at all, matching
the ElementTree shape the original Python implementation (`xml.etree.ElementTree`) assumes.
The Parent Index (`parent_index.rs`) exists only because this shape has no way to walk
upward; if elements carried a parent pointer that component would be pointless.

Nothing here mutates after construction, so there is no API for editing a built tree —
use [`ElementBuilder`] to build a fixture, then hand the result to
[`crate::context::XPathContext`].
*/

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

pub type ElementHandle = Rc<RefCell<ElementData>>;
pub type AttributeHandle = Rc<AttributeData>;
pub type TextHandle = Rc<str>;
pub type DocumentHandle = Rc<DocumentData>;

/// An element's qualified name, or the "callable" sentinel the host tree uses for
/// comment/processing-instruction nodes (see §4.1's callable-tag rule).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    Named(String),
    Callable,
}

#[derive(Debug)]
pub struct AttributeData {
    pub name: String,
    pub value: String,
}

#[derive(Debug)]
pub struct ChildSlot {
    pub element: ElementHandle,
    pub tail: Option<TextHandle>,
}

#[derive(Debug)]
pub struct ElementData {
    pub tag: Tag,
    pub attributes: Vec<AttributeHandle>,
    pub text: Option<TextHandle>,
    pub children: Vec<ChildSlot>,
}

#[derive(Debug)]
pub struct DocumentData {
    pub root: ElementHandle,
}

/// A stable identity key for an [`ElementHandle`], usable as a hash map key. Built from the
/// `Rc`'s address, not its contents — navigation never compares elements structurally.
#[derive(Copy, Clone, Eq)]
pub struct ElementKey(*const RefCell<ElementData>);

/// A builder for test/demonstration fixtures; this crate has no XML parser.
pub struct ElementBuilder {
    tag: Tag,
    attributes: Vec<AttributeHandle>,
    text: Option<TextHandle>,
    children: Vec<ChildSlot>,
    pending_tail: Option<TextHandle>,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl PartialEq for ElementKey {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl std::hash::Hash for ElementKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl fmt::Debug for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementKey({:p})", self.0)
    }
}

impl ElementKey {
    pub fn of(element: &ElementHandle) -> Self {
        Self(Rc::as_ptr(element))
    }
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: Tag::Named(tag.to_string()),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
            pending_tail: None,
        }
    }

    /// A comment/PI-shaped element: structurally an element but excluded from
    /// element-centric axes by the callable-tag rule (§4.1, §4.4).
    pub fn callable() -> Self {
        Self {
            tag: Tag::Callable,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
            pending_tail: None,
        }
    }

    pub fn attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push(Rc::new(AttributeData {
            name: name.to_string(),
            value: value.to_string(),
        }));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(Rc::from(text));
        self
    }

    /// Append a child built by `child`, assigning `tail` as the text immediately following
    /// that child within this element (§3, "optional tail text").
    pub fn child(mut self, child: ElementHandle) -> Self {
        if let Some(tail) = self.pending_tail.take() {
            if let Some(last) = self.children.last_mut() {
                last.tail = Some(tail);
            }
        }
        self.children.push(ChildSlot {
            element: child,
            tail: None,
        });
        self
    }

    pub fn tail(mut self, tail: &str) -> Self {
        self.pending_tail = Some(Rc::from(tail));
        self
    }

    pub fn build(mut self) -> ElementHandle {
        if let Some(tail) = self.pending_tail.take() {
            if let Some(last) = self.children.last_mut() {
                last.tail = Some(tail);
            }
        }
        Rc::new(RefCell::new(ElementData {
            tag: self.tag,
            attributes: self.attributes,
            text: self.text,
            children: self.children,
        }))
    }
}

impl DocumentData {
    pub fn new(root: ElementHandle) -> DocumentHandle {
        Rc::new(DocumentData { root })
    }

    pub fn root_element(&self) -> ElementHandle {
        self.root.clone()
    }
}

impl ElementData {
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.tag, Tag::Callable)
    }

    pub fn tag_name(&self) -> &str {
        match &self.tag {
            Tag::Named(name) => name.as_str(),
            Tag::Callable => "",
        }
    }
}
