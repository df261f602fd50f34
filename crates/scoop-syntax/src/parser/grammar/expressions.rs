//! Expression soup.
//!
//! Expressions are not parsed with operator precedence. A soup is a flat run
//! of elements in which only the shapes that matter for call recovery get
//! their own nodes:
//!
//! - paths, calls `f(...)` and macro invocations `m!(...)`
//! - postfix chains: method calls, field access, indexing, `?`
//! - parenthesized expressions, tuples and arrays with one `Elem` per element
//! - blocks, closure parameter lists and attributes
//!
//! Every other token (operators, keywords, lifetimes) is left bare.

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::CompletedMarker;
use super::super::Parser;
use super::Stop;

impl Parser<'_, '_> {
    /// Parse elements until `stop` says so. Returns the number of elements.
    pub(crate) fn parse_soup(&mut self, stop: Stop) -> usize {
        let mut count = 0;

        loop {
            let current = self.current();
            if current == TokenKind::Eof || current.is_closing_delim() {
                break;
            }
            match stop {
                Stop::Statement | Stop::BlockLike | Stop::Item if current == TokenKind::Semi => {
                    break
                }
                Stop::List if current == TokenKind::Comma => break,
                _ => {}
            }

            let closure_position = count == 0
                || matches!(
                    self.last_bumped(),
                    TokenKind::Eq
                        | TokenKind::KwMove
                        | TokenKind::KwReturn
                        | TokenKind::KwAsync
                        | TokenKind::FatArrow
                        | TokenKind::Comma
                        | TokenKind::LParen
                );
            self.parse_element(closure_position);
            count += 1;

            if self.last_bumped() == TokenKind::RBrace {
                let continues = matches!(
                    self.current(),
                    TokenKind::KwElse | TokenKind::Dot | TokenKind::Question
                );
                match stop {
                    Stop::BlockLike if !continues => break,
                    Stop::Item => break,
                    _ => {}
                }
            }
        }

        count
    }

    fn parse_element(&mut self, closure_position: bool) {
        let current = self.current();
        let lhs = match current {
            TokenKind::Pipe if closure_position => {
                self.parse_closure_params();
                return;
            }
            TokenKind::Pound => {
                self.parse_attr();
                return;
            }
            TokenKind::ColonColon => self.parse_path_expr(),
            _ if current.is_path_segment() => self.parse_path_expr(),
            _ if SyntaxKind::from(current).is_literal_token() => {
                let marker = self.start();
                self.bump();
                marker.complete(self, SyntaxKind::Literal)
            }
            TokenKind::LParen => self.parse_paren_or_tuple(),
            TokenKind::LBracket => self.parse_array(),
            TokenKind::LBrace => self.parse_block(),
            _ => {
                self.bump();
                return;
            }
        };

        self.parse_postfix(lhs);
    }

    /// Parse a path, then decide whether it is a macro invocation, a call,
    /// or a plain path expression.
    pub(crate) fn parse_path_expr(&mut self) -> CompletedMarker {
        let path = self.parse_path();

        if self.at(TokenKind::Bang) && self.peek_kind_n(1).is_opening_delim() {
            let marker = path.precede(self);
            self.bump();
            self.parse_arg_list();
            return marker.complete(self, SyntaxKind::MacroCall);
        }

        // macro_rules! name { ... }
        if self.at(TokenKind::Bang)
            && self.peek_kind_n(1) == TokenKind::Ident
            && self.peek_kind_n(2).is_opening_delim()
        {
            let marker = path.precede(self);
            self.bump();
            self.start_node(SyntaxKind::Name);
            self.bump();
            self.finish_node();
            self.parse_token_tree();
            return marker.complete(self, SyntaxKind::MacroCall);
        }

        if self.at(TokenKind::LParen) {
            let marker = path.precede(self);
            self.parse_arg_list();
            return marker.complete(self, SyntaxKind::CallExpr);
        }

        let marker = path.precede(self);
        marker.complete(self, SyntaxKind::PathExpr)
    }

    /// Parse `a::b::<T>::c`.
    pub(crate) fn parse_path(&mut self) -> CompletedMarker {
        let marker = self.start();
        if self.at(TokenKind::ColonColon) {
            self.bump();
        }

        loop {
            if self.current().is_path_segment() {
                self.bump();
            } else {
                self.error("expected path segment");
                break;
            }

            if !self.at(TokenKind::ColonColon) {
                break;
            }
            let next = self.peek_kind_n(1);
            if next == TokenKind::Lt {
                self.bump();
                self.parse_generic_args();
                if self.at(TokenKind::ColonColon) && self.peek_kind_n(1).is_path_segment() {
                    self.bump();
                    continue;
                }
                break;
            }
            if next.is_path_segment() {
                self.bump();
                continue;
            }
            break;
        }

        marker.complete(self, SyntaxKind::Path)
    }

    /// Parse `<...>`, balancing nested angle brackets.
    pub(crate) fn parse_generic_args(&mut self) {
        let marker = self.start();
        self.bump();
        let mut depth = 1usize;

        loop {
            let current = self.current();
            if current == TokenKind::Eof {
                self.error("unclosed generic arguments");
                break;
            }
            if current.is_opening_delim() {
                self.parse_token_tree();
                continue;
            }
            if current.is_closing_delim() {
                self.error("expected `>`");
                break;
            }
            self.bump();
            match current {
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }

        marker.complete(self, SyntaxKind::GenericArgs);
    }

    fn parse_postfix(&mut self, mut lhs: CompletedMarker) {
        loop {
            let is_block = lhs.kind == SyntaxKind::Block;
            lhs = match self.current() {
                TokenKind::Dot => {
                    let name = self.peek_kind_n(1);
                    let is_method = name == TokenKind::Ident
                        && (self.peek_kind_n(2) == TokenKind::LParen
                            || (self.peek_kind_n(2) == TokenKind::ColonColon
                                && self.peek_kind_n(3) == TokenKind::Lt));
                    if is_method {
                        let marker = lhs.precede(self);
                        self.bump();
                        self.parse_name_ref();
                        if self.at(TokenKind::ColonColon) {
                            self.bump();
                            self.parse_generic_args();
                        }
                        if self.at(TokenKind::LParen) {
                            self.parse_arg_list();
                        } else {
                            self.error("expected method arguments");
                        }
                        marker.complete(self, SyntaxKind::MethodCallExpr)
                    } else if matches!(name, TokenKind::Ident | TokenKind::IntLiteral) {
                        let marker = lhs.precede(self);
                        self.bump();
                        self.parse_name_ref();
                        marker.complete(self, SyntaxKind::FieldExpr)
                    } else {
                        break;
                    }
                }
                TokenKind::LParen if !is_block => {
                    let marker = lhs.precede(self);
                    self.parse_arg_list();
                    marker.complete(self, SyntaxKind::CallExpr)
                }
                TokenKind::LBracket if !is_block => {
                    let marker = lhs.precede(self);
                    self.bump();
                    self.parse_soup(Stop::Never);
                    self.expect(TokenKind::RBracket, "expected `]`");
                    marker.complete(self, SyntaxKind::IndexExpr)
                }
                TokenKind::Question => {
                    let marker = lhs.precede(self);
                    self.bump();
                    marker.complete(self, SyntaxKind::TryExpr)
                }
                _ => break,
            };
        }
    }

    fn parse_name_ref(&mut self) {
        self.start_node(SyntaxKind::NameRef);
        self.bump();
        self.finish_node();
    }

    /// Parse the delimited arguments of a call or macro invocation. Each
    /// top-level comma-separated run becomes an `Arg`.
    pub(crate) fn parse_arg_list(&mut self) {
        let marker = self.start();
        let Some(close) = self.current().closing_delim() else {
            self.error("expected argument list");
            marker.complete(self, SyntaxKind::ArgList);
            return;
        };
        self.bump();

        while !self.at_end() && !self.at(close) {
            if self.current().is_closing_delim() {
                self.error("mismatched closing delimiter");
                break;
            }
            let arg = self.start();
            self.parse_soup(Stop::List);
            arg.complete(self, SyntaxKind::Arg);
            if !self.at(TokenKind::Comma) {
                break;
            }
            self.bump();
        }

        self.expect(close, "unclosed argument list");
        marker.complete(self, SyntaxKind::ArgList);
    }

    /// `(a)` is a `ParenExpr`; `()`, `(a,)` and `(a, b)` are tuples.
    fn parse_paren_or_tuple(&mut self) -> CompletedMarker {
        let marker = self.start();
        self.bump();
        let (count, saw_comma) = self.parse_elems(TokenKind::RParen);
        self.expect(TokenKind::RParen, "expected `)`");

        let kind = if saw_comma || count == 0 {
            SyntaxKind::TupleExpr
        } else {
            SyntaxKind::ParenExpr
        };
        marker.complete(self, kind)
    }

    fn parse_array(&mut self) -> CompletedMarker {
        let marker = self.start();
        self.bump();
        self.parse_elems(TokenKind::RBracket);
        self.expect(TokenKind::RBracket, "expected `]`");
        marker.complete(self, SyntaxKind::ArrayExpr)
    }

    fn parse_elems(&mut self, close: TokenKind) -> (usize, bool) {
        let mut count = 0;
        let mut saw_comma = false;

        while !self.at_end() && !self.at(close) {
            if self.current().is_closing_delim() {
                self.error("mismatched closing delimiter");
                break;
            }
            let elem = self.start();
            self.parse_soup(Stop::List);
            elem.complete(self, SyntaxKind::Elem);
            count += 1;
            if !self.at(TokenKind::Comma) {
                break;
            }
            self.bump();
            saw_comma = true;
        }

        (count, saw_comma)
    }

    /// Parse `{ statements }`.
    pub(crate) fn parse_block(&mut self) -> CompletedMarker {
        let marker = self.start();
        self.bump();
        while !self.at_end() && !self.at(TokenKind::RBrace) {
            self.parse_statement();
        }
        self.expect(TokenKind::RBrace, "expected `}`");
        marker.complete(self, SyntaxKind::Block)
    }

    fn parse_closure_params(&mut self) {
        self.start_node(SyntaxKind::ClosureParams);
        self.bump();
        loop {
            let current = self.current();
            if current == TokenKind::Pipe {
                self.bump();
                break;
            }
            if current == TokenKind::Eof || current.is_closing_delim() {
                self.error("unclosed closure parameters");
                break;
            }
            if current.is_opening_delim() {
                self.parse_token_tree();
            } else {
                self.bump();
            }
        }
        self.finish_node();
    }

    /// Parse `#[...]` or `#![...]`.
    pub(crate) fn parse_attr(&mut self) {
        let marker = self.start();
        self.bump();
        if self.at(TokenKind::Bang) {
            self.bump();
        }
        if self.at(TokenKind::LBracket) {
            self.parse_token_tree();
        } else {
            self.error("expected `[`");
        }
        marker.complete(self, SyntaxKind::Attr);
    }

    /// Parse a balanced delimited group without giving it any structure.
    pub(crate) fn parse_token_tree(&mut self) {
        let marker = self.start();
        let close = self.current().closing_delim();
        self.bump();

        loop {
            let current = self.current();
            if current == TokenKind::Eof {
                self.error("unclosed delimiter");
                break;
            }
            if Some(current) == close {
                self.bump();
                break;
            }
            if current.is_opening_delim() {
                self.parse_token_tree();
            } else if current.is_closing_delim() {
                self.error("mismatched closing delimiter");
                break;
            } else {
                self.bump();
            }
        }

        marker.complete(self, SyntaxKind::TokenTree);
    }
}
