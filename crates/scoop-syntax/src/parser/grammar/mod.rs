//! Grammar rules for Rust source text.
//!
//! This module contains the grammar rules organized by category:
//!
//! - `items.rs` - Items (functions, impls, traits, modules, `use`, and the rest)
//! - `statements.rs` - Block statements
//! - `expressions.rs` - Expression soup: paths, calls, macro invocations,
//!   postfix chains and delimited groups

mod expressions;
mod items;
mod statements;

/// Where an expression soup stops, besides closing delimiters and EOF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stop {
    /// Stops at `;`.
    Statement,
    /// Stops at `;`, or after a brace group unless `else`, `.` or `?` follows.
    BlockLike,
    /// Stops at `;` or after the first brace group.
    Item,
    /// Stops at `,`.
    List,
    /// Stops only at closing delimiters and EOF.
    Never,
}
