/*!
The dynamic evaluation core of an XPath engine: the context object that tracks the current
focus during expression evaluation, and the axis navigators that walk an XML tree according
to XPath's tree model.

This crate does not parse XPath expressions or evaluate functions; it gives a (not-included)
parser and function library the context API they would drive. Most of what's here is
exercised directly in the tests, exactly the shape a compiled selector closure would use:

```
use xpath_dynamic_context::axis::Axis;
use xpath_dynamic_context::context::XPathContext;
use xpath_dynamic_context::node::Node;
use xpath_dynamic_context::tree::ElementBuilder;

let root = ElementBuilder::new("book")
    .child(ElementBuilder::new("chapter").build())
    .build();
let mut ctx = XPathContext::new(Node::Element(root)).unwrap();
let children: Vec<Node> = ctx.iter_children_or_self(true).collect();
assert_eq!(children.len(), 1);
```
*/

// ------------------------------------------------------------------------------------------------
// Modules
// ------------------------------------------------------------------------------------------------

pub mod axis;
pub mod context;
pub mod error;
pub mod focus;
pub mod node;
pub mod parent_index;
pub mod tree;
pub mod value;
pub mod walk;

pub use context::XPathContext;
pub use error::{Error, Result};
pub use node::Node;
