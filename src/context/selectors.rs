/*!
The selector drivers (§4.5): the machinery a parser/function-library crate built on top of
this one would use to drive its own selector closures. This crate supplies the driving
machinery only, not the closures themselves — those belong to the expression evaluator,
out of scope here (§1).
*/

use super::XPathContext;
use crate::axis::Axis;
use crate::focus::FocusGuard;
use crate::node::{same_node, Node};

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl XPathContext {
    /// Walk the whole tree in document order and yield only the nodes that also appear in
    /// `results`, matched by `same_node` (so a bare element in the tree hits a
    /// `TypedElement` carrying it in `results`, and likewise for attributes). `size` is
    /// `results.len()`, but `position` tracks the index of the match within the tree walk,
    /// not its rank among the matches — exactly as the original's `enumerate(self.root.iter())`
    /// filtered against `results` does (§4.5, testable property 7). The axis in effect is
    /// left unchanged — this is a result-set step, not an axis step.
    pub fn iter_results(&mut self, results: Vec<Node>) -> impl Iterator<Item = Node> + '_ {
        let axis = self.focus.axis.unwrap_or(Axis::SelfAxis);
        let size = results.len();
        let walk: Vec<Node> = self.iter().collect();
        let mut guard = FocusGuard::enter(&mut self.focus, axis);
        guard.focus_mut().size = size;
        walk.into_iter().enumerate().filter_map(move |(i, node)| {
            if results.iter().any(|r| same_node(r, &node)) {
                guard.focus_mut().position = i + 1;
                guard.focus_mut().item = Some(node.clone());
                Some(node)
            } else {
                None
            }
        })
    }

    /// Invoke `selector` against a fresh clone of this context, materialize its output, and
    /// yield it directly with `position` 1…`size` — giving the selector a fresh focus while
    /// still pacing the outer `position()`/`last()` (§4.5). Unlike `iter_results`, this does
    /// not walk the tree or match by identity: `selector`'s output order is the yield order.
    /// `selector`'s signature stands in for the boxed iterator a parser's compiled selector
    /// closures would produce.
    pub fn iter_selector<F>(&mut self, selector: F) -> impl Iterator<Item = Node> + '_
    where
        F: FnOnce(&mut XPathContext) -> Box<dyn Iterator<Item = Node>>,
    {
        let mut fresh = self.copy(true);
        let results: Vec<Node> = selector(&mut fresh).collect();
        let axis = self.focus.axis.unwrap_or(Axis::SelfAxis);
        self.drive_axis(axis, results)
    }

    /// The Cartesian product of `selectors`' results, binding `varnames[i]` to the i-th
    /// selector's current element of each combination as it is formed (§4.5, S6). Returns
    /// the combinations themselves rather than a flattened node sequence, since each
    /// combination is a tuple of bindings, not a single node.
    pub fn iter_product(
        &mut self,
        selectors: &[Box<dyn Fn(&mut XPathContext) -> Vec<Node>>],
        varnames: &[String],
    ) -> Vec<Vec<Node>> {
        let sequences: Vec<Vec<Node>> = selectors.iter().map(|selector| selector(self)).collect();

        let mut combinations: Vec<Vec<Node>> = vec![Vec::new()];
        for sequence in &sequences {
            let mut next = Vec::with_capacity(combinations.len() * sequence.len().max(1));
            for combination in &combinations {
                for item in sequence {
                    let mut extended = combination.clone();
                    extended.push(item.clone());
                    next.push(extended);
                }
            }
            combinations = next;
        }

        for combination in &combinations {
            for (name, node) in varnames.iter().zip(combination.iter()) {
                self.variable_values
                    .insert(name.clone(), crate::value::Value::Nodes(vec![node.clone()]));
            }
        }

        combinations
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ElementBuilder;

    #[test]
    fn iter_results_reports_position_and_size() {
        let a = ElementBuilder::new("a").build();
        let b = ElementBuilder::new("b").build();
        let root = ElementBuilder::new("root")
            .child(a.clone())
            .child(b.clone())
            .build();
        let mut ctx = XPathContext::new(Node::Element(root)).unwrap();
        let results = vec![Node::Element(a), Node::Element(b)];
        let collected: Vec<Node> = ctx.iter_results(results).collect();
        assert_eq!(collected.len(), 2);
        assert_eq!(ctx.size(), 2);
    }

    /// §4.5, testable property 7: a `TypedElement` wrapper in `results` matches the bare
    /// physical element the walk reaches.
    #[test]
    fn iter_results_matches_typed_wrapper_against_bare_element() {
        use crate::node::TypedValue;
        use std::rc::Rc;

        let child = ElementBuilder::new("child").build();
        let root = ElementBuilder::new("root").child(child.clone()).build();
        let mut ctx = XPathContext::new(Node::Element(root)).unwrap();
        let typed = Node::TypedElement(child, TypedValue(Rc::new(1i64)));
        let collected: Vec<Node> = ctx.iter_results(vec![typed]).collect();
        assert_eq!(collected.len(), 1);
    }

    #[test]
    fn iter_product_cardinality_is_the_product_of_sizes() {
        let root = ElementBuilder::new("root").build();
        let mut ctx = XPathContext::new(Node::Element(root)).unwrap();
        let xs: Box<dyn Fn(&mut XPathContext) -> Vec<Node>> = Box::new(|_: &mut XPathContext| {
            vec![
                Node::Element(ElementBuilder::new("x1").build()),
                Node::Element(ElementBuilder::new("x2").build()),
            ]
        });
        let ys: Box<dyn Fn(&mut XPathContext) -> Vec<Node>> = Box::new(|_: &mut XPathContext| {
            vec![
                Node::Element(ElementBuilder::new("y1").build()),
                Node::Element(ElementBuilder::new("y2").build()),
                Node::Element(ElementBuilder::new("y3").build()),
            ]
        });
        let combinations = ctx.iter_product(&[xs, ys], &["x".to_string(), "y".to_string()]);
        assert_eq!(combinations.len(), 6);
    }
}
