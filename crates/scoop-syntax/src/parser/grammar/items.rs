//! Item parsing.
//!
//! Functions, impls, traits and modules get real structure because they
//! decide which function body a line belongs to. Everything else (structs,
//! enums, consts, statics, item-position macro invocations) is parsed as an
//! `OtherItem` soup so that calls nested in initializers are still found.

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::Parser;
use super::Stop;

impl Parser<'_, '_> {
    /// Returns `true` if the current token starts an item inside a block.
    pub(crate) fn at_item_start(&self) -> bool {
        match self.current() {
            TokenKind::KwFn
            | TokenKind::KwUse
            | TokenKind::KwStruct
            | TokenKind::KwEnum
            | TokenKind::KwTrait
            | TokenKind::KwImpl
            | TokenKind::KwMod
            | TokenKind::KwType
            | TokenKind::KwStatic
            | TokenKind::KwPub
            | TokenKind::KwExtern => true,
            TokenKind::KwConst => self.peek_kind_n(1) != TokenKind::LBrace,
            TokenKind::KwUnsafe => matches!(
                self.peek_kind_n(1),
                TokenKind::KwFn | TokenKind::KwImpl | TokenKind::KwTrait | TokenKind::KwExtern
            ),
            TokenKind::KwAsync => {
                self.peek_kind_n(1) == TokenKind::KwFn
                    || (self.peek_kind_n(1) == TokenKind::KwUnsafe
                        && self.peek_kind_n(2) == TokenKind::KwFn)
            }
            TokenKind::Ident => {
                self.current_text() == "union" && self.peek_kind_n(1) == TokenKind::Ident
            }
            _ => false,
        }
    }

    /// Parse a single item, including its attributes and visibility.
    pub(crate) fn parse_item(&mut self) {
        let marker = self.start();

        while self.at(TokenKind::Pound) {
            self.parse_attr();
        }
        if self.at(TokenKind::KwPub) {
            self.start_node(SyntaxKind::Visibility);
            self.bump();
            if self.at(TokenKind::LParen) {
                self.parse_token_tree();
            }
            self.finish_node();
        }
        self.parse_qualifiers();

        let kind = match self.current() {
            TokenKind::KwFn => {
                self.parse_fn_rest();
                SyntaxKind::FnDef
            }
            TokenKind::KwImpl | TokenKind::KwTrait => {
                let kind = if self.at(TokenKind::KwImpl) {
                    SyntaxKind::ImplDef
                } else {
                    SyntaxKind::TraitDef
                };
                self.bump();
                if self.at(TokenKind::Lt) {
                    self.parse_generic_args();
                }
                self.skip_until(&[TokenKind::LBrace, TokenKind::Semi]);
                if self.at(TokenKind::LBrace) {
                    self.parse_item_list();
                } else {
                    self.expect(TokenKind::Semi, "expected `{`");
                }
                kind
            }
            TokenKind::KwMod => {
                self.bump();
                self.parse_name();
                if self.at(TokenKind::LBrace) {
                    self.parse_item_list();
                } else {
                    self.expect(TokenKind::Semi, "expected `;` or `{`");
                }
                SyntaxKind::ModDef
            }
            TokenKind::KwUse => {
                self.bump();
                self.skip_until(&[TokenKind::Semi]);
                self.expect(TokenKind::Semi, "expected `;`");
                SyntaxKind::UseItem
            }
            TokenKind::KwExtern
                if self.peek_kind_n(1) == TokenKind::LBrace
                    || (self.peek_kind_n(1).is_string()
                        && self.peek_kind_n(2) == TokenKind::LBrace) =>
            {
                self.bump();
                if self.current().is_string() {
                    self.bump();
                }
                self.parse_item_list();
                SyntaxKind::OtherItem
            }
            TokenKind::KwConst | TokenKind::KwStatic | TokenKind::KwType => {
                self.parse_soup(Stop::Statement);
                self.expect(TokenKind::Semi, "expected `;`");
                SyntaxKind::OtherItem
            }
            _ => {
                // struct, enum, union, extern crate, and item macros all end
                // at `;` or after their first brace group.
                self.parse_soup(Stop::Item);
                if self.at(TokenKind::Semi) {
                    self.bump();
                }
                SyntaxKind::OtherItem
            }
        };

        marker.complete(self, kind);
    }

    /// `const`, `async`, `unsafe`, `extern "abi"` and `default` before an item keyword.
    fn parse_qualifiers(&mut self) {
        loop {
            let next = self.peek_kind_n(1);
            match self.current() {
                TokenKind::KwConst | TokenKind::KwAsync | TokenKind::KwUnsafe
                    if matches!(
                        next,
                        TokenKind::KwFn
                            | TokenKind::KwUnsafe
                            | TokenKind::KwAsync
                            | TokenKind::KwExtern
                            | TokenKind::KwImpl
                            | TokenKind::KwTrait
                    ) =>
                {
                    self.bump();
                }
                TokenKind::KwExtern
                    if next == TokenKind::KwFn
                        || (next.is_string() && self.peek_kind_n(2) == TokenKind::KwFn) =>
                {
                    self.bump();
                    if self.current().is_string() {
                        self.bump();
                    }
                }
                TokenKind::Ident
                    if self.current_text() == "default"
                        && matches!(
                            next,
                            TokenKind::KwFn
                                | TokenKind::KwUnsafe
                                | TokenKind::KwAsync
                                | TokenKind::KwConst
                                | TokenKind::KwType
                        ) =>
                {
                    self.bump();
                }
                _ => break,
            }
        }
    }

    /// Parse the part of a function after `fn`.
    fn parse_fn_rest(&mut self) {
        self.bump();
        self.parse_name();
        if self.at(TokenKind::Lt) {
            self.parse_generic_args();
        }
        if self.at(TokenKind::LParen) {
            self.parse_param_list();
        } else {
            self.error("expected parameter list");
        }
        if self.at(TokenKind::ThinArrow) {
            self.start_node(SyntaxKind::RetType);
            self.bump();
            self.skip_until(&[TokenKind::LBrace, TokenKind::KwWhere, TokenKind::Semi]);
            self.finish_node();
        }
        if self.at(TokenKind::KwWhere) {
            self.bump();
            self.skip_until(&[TokenKind::LBrace, TokenKind::Semi]);
        }
        if self.at(TokenKind::LBrace) {
            self.parse_block();
        } else {
            self.expect(TokenKind::Semi, "expected function body");
        }
    }

    fn parse_name(&mut self) {
        if self.at(TokenKind::Ident) {
            self.start_node(SyntaxKind::Name);
            self.bump();
            self.finish_node();
        } else {
            self.error("expected name");
        }
    }

    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::ParamList);
        self.bump();

        while !self.at_end() && !self.at(TokenKind::RParen) {
            if self.current().is_closing_delim() {
                self.error("mismatched closing delimiter");
                break;
            }
            self.start_node(SyntaxKind::Param);
            self.parse_soup(Stop::List);
            self.finish_node();
            if !self.at(TokenKind::Comma) {
                break;
            }
            self.bump();
        }

        self.expect(TokenKind::RParen, "expected `)`");
        self.finish_node();
    }

    /// Parse `{ items }` of an impl, trait, module or extern block.
    fn parse_item_list(&mut self) {
        self.start_node(SyntaxKind::ItemList);
        self.bump();

        while !self.at_end() && !self.at(TokenKind::RBrace) {
            if self.current().is_closing_delim() {
                self.error("unmatched closing delimiter");
                self.bump();
                continue;
            }
            self.parse_item();
        }

        self.expect(TokenKind::RBrace, "expected `}`");
        self.finish_node();
    }

    /// Skip tokens (keeping delimited groups balanced) until one of `stops`.
    fn skip_until(&mut self, stops: &[TokenKind]) {
        loop {
            let current = self.current();
            if current == TokenKind::Eof
                || current.is_closing_delim()
                || stops.contains(&current)
            {
                break;
            }
            if current.is_opening_delim() {
                self.parse_token_tree();
            } else {
                self.bump();
            }
        }
    }
}
