/*!
A minimal XDM-ish value used for variable bindings (§3, `variable_values`). The function
library that would produce and consume richer values (durations, QNames, typed atomics) is
out of scope for this crate (§1); this is just enough shape for a context to hold bindings
and for tests to exercise `iter_product`'s variable binding (§4.5, S6).
*/

use crate::node::{same_node, Node};
use std::fmt::{Display, Formatter, Result};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
    Nodes(Vec<Node>),
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

/// Node identity is reference-based (§3), so `Nodes` sequences compare element-wise by
/// `same_node` rather than deriving structural equality.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Nodes(a), Value::Nodes(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_node(x, y))
            }
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Nodes(nodes) => write!(f, "node-sequence({})", nodes.len()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Vec<Node>> for Value {
    fn from(value: Vec<Node>) -> Self {
        Value::Nodes(value)
    }
}
