//! Statement parsing.
//!
//! Supported statements:
//! - `let` statements (including `let ... else { ... };`)
//! - Nested items
//! - Expression statements; those starting with `if`, `match`, `loop`,
//!   `while`, `for`, `unsafe`, a label or a bare block end with their brace group
//! - Empty statement: `;`

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::Parser;
use super::Stop;

impl Parser<'_, '_> {
    /// Parse a single statement.
    pub(crate) fn parse_statement(&mut self) {
        let current = self.current();

        if current == TokenKind::Semi {
            self.bump();
        } else if current == TokenKind::Pound {
            self.parse_attr();
        } else if current.is_closing_delim() {
            self.error("unmatched closing delimiter");
            self.bump();
        } else if current == TokenKind::KwLet {
            let marker = self.start();
            self.bump();
            self.parse_soup(Stop::Statement);
            self.expect(TokenKind::Semi, "expected `;`");
            marker.complete(self, SyntaxKind::LetStmt);
        } else if self.at_item_start() {
            self.parse_item();
        } else {
            let block_like = current.starts_block_like()
                && !(current == TokenKind::KwUnsafe && self.peek_kind_n(1) != TokenKind::LBrace);
            let stop = if block_like {
                Stop::BlockLike
            } else {
                Stop::Statement
            };

            let marker = self.start();
            self.parse_soup(stop);
            if self.at(TokenKind::Semi) {
                self.bump();
            }
            marker.complete(self, SyntaxKind::ExprStmt);
        }
    }
}
