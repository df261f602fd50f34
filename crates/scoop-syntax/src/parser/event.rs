//! Parser events.
//!
//! The parser produces a flat stream of events that the sink later turns
//! into a green tree. Left-nested nodes (a call wrapping the path before it,
//! a method call wrapping its receiver) are expressed through
//! `forward_parent` links instead of rewriting already emitted events.

use crate::syntax::SyntaxKind;

/// One step of tree construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Opens a node.
    Open {
        /// Kind of the node.
        kind: SyntaxKind,
        /// Distance to a later `Open` whose node wraps this one.
        forward_parent: Option<u32>,
    },
    /// Attaches the next non-trivia token with this kind.
    Token(SyntaxKind),
    /// Closes the innermost open node.
    Close,
    /// Left behind by an abandoned marker or an `Open` already consumed
    /// through a `forward_parent` chain.
    Tombstone,
}

impl Event {
    /// An `Open` with no forward parent.
    #[must_use]
    pub fn open(kind: SyntaxKind) -> Self {
        Self::Open {
            kind,
            forward_parent: None,
        }
    }
}
