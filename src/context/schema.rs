/*!
`XPathSchemaContext` (§4.7): the same context, wrapped with a marker a static-analysis
evaluator uses to tell schema-tree navigation from instance-tree navigation. Layout and
navigation are unchanged; only the marker differs.
*/

use super::XPathContext;
use std::ops::{Deref, DerefMut};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContextKind {
    Instance,
    Schema,
}

/// Wraps an [`XPathContext`] for schema-tree evaluation. Derefs transparently to the inner
/// context, so every axis iterator and selector driver is available unchanged.
pub struct XPathSchemaContext {
    inner: XPathContext,
    kind: ContextKind,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl XPathSchemaContext {
    pub fn new(inner: XPathContext) -> Self {
        Self {
            inner,
            kind: ContextKind::Schema,
        }
    }

    pub fn kind(&self) -> ContextKind {
        self.kind
    }

    pub fn into_inner(self) -> XPathContext {
        self.inner
    }
}

impl Deref for XPathSchemaContext {
    type Target = XPathContext;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for XPathSchemaContext {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use crate::tree::ElementBuilder;

    #[test]
    fn schema_context_derefs_to_axis_iterators() {
        let root = ElementBuilder::new("schema").build();
        let ctx = XPathContext::new(Node::Element(root)).unwrap();
        let mut schema_ctx = XPathSchemaContext::new(ctx);
        assert_eq!(schema_ctx.kind(), ContextKind::Schema);
        let _ = schema_ctx.iter_self().count();
    }
}
