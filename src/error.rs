/*!
Error types for dynamic context construction.

The navigation core itself never raises during axis traversal; out-of-tree items simply
yield empty sequences. These variants exist for the two failure modes the distilled
specification names: invalid construction (raised here) and a missing context for a
downstream consumer (never raised by this crate, but shared so callers built on top of it
have one error type to match against).
*/

use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid root, an Element or an ElementTree instance required")]
    InvalidRoot,

    #[error("a context was required but none was supplied")]
    MissingContext,
}

pub type Result<T> = std::result::Result<T, Error>;
