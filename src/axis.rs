/*!
The thirteen-ish XPath axes this crate's navigation core knows how to walk (namespace is
omitted — it has no counterpart in the node model, §3).
*/

use std::fmt::{Display, Formatter, Result};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    SelfAxis,
    Child,
    Parent,
    Attribute,
    FollowingSibling,
    PrecedingSibling,
    Ancestor,
    AncestorOrSelf,
    Descendant,
    DescendantOrSelf,
    Following,
    Preceding,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{}",
            match self {
                Axis::SelfAxis => "self",
                Axis::Child => "child",
                Axis::Parent => "parent",
                Axis::Attribute => "attribute",
                Axis::FollowingSibling => "following-sibling",
                Axis::PrecedingSibling => "preceding-sibling",
                Axis::Ancestor => "ancestor",
                Axis::AncestorOrSelf => "ancestor-or-self",
                Axis::Descendant => "descendant",
                Axis::DescendantOrSelf => "descendant-or-self",
                Axis::Following => "following",
                Axis::Preceding => "preceding",
            }
        )
    }
}
