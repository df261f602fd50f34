//! `scoop-syntax` - Lexer, parser, and lossless syntax tree for Rust source text.
//!
//! This crate is the front end `scoop` uses to find the call that produced a
//! value and recover the source text of each argument:
//!
//! - [`lexer`] splits text into tokens, trivia included.
//! - [`parser`] turns tokens into a `rowan` tree, recovering from errors
//!   instead of stopping at the first one.
//! - [`ast`] wraps the few node shapes that matter for argument recovery.
//! - [`line_index`] maps the 1-based line and column a caller location
//!   reports to byte offsets.
//!
//! The tree keeps every byte of the input, so the text of any node is the
//! exact text the user wrote. Only calls, paths, postfix chains and
//! delimited groups get nodes. Operators and most keywords stay as bare
//! tokens under their parent.
//!
//! # Example
//!
//! ```
//! use scoop_syntax::ast::{Call, CallKind};
//! use scoop_syntax::parser::parse;
//!
//! let parse = parse("fn main() { ic!(a + 1, b); }");
//! let call = parse.syntax().descendants().find_map(Call::cast).unwrap();
//!
//! assert_eq!(call.kind(), CallKind::Macro);
//! let args: Vec<_> = call.args().iter().map(|a| a.text().to_string()).collect();
//! assert_eq!(args, ["a + 1", "b"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod ast;
pub mod lexer;
pub mod line_index;
pub mod parser;
pub mod syntax;
mod token_kinds;

pub use lexer::{lex, Lexer, Token, TokenKind};
pub use line_index::{LineCol, LineIndex};
pub use parser::{parse, parse_expr, Parse, ParseError};
pub use syntax::{RustLanguage, SyntaxKind, SyntaxNode, SyntaxToken};
pub use text_size::{TextRange, TextSize};
