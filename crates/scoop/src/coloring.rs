//! Text decorators applied by terminal sinks.

use owo_colors::OwoColorize;
use scoop_syntax::{lex, TokenKind};

/// Turns a line of output into its decorated form.
pub trait Decorator: Send + Sync {
    /// Returns the decorated text.
    fn decorate(&self, text: &str) -> String;
}

/// Leaves text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDecoration;

impl Decorator for NoDecoration {
    fn decorate(&self, text: &str) -> String {
        text.to_string()
    }
}

type Rgb = (u8, u8, u8);

// Solarized dark.
const BASE01: Rgb = (0x58, 0x6e, 0x75);
const BASE0: Rgb = (0x83, 0x94, 0x96);
const BASE1: Rgb = (0x93, 0xa1, 0xa1);
const CYAN: Rgb = (0x2a, 0xa1, 0x98);
const GREEN: Rgb = (0x85, 0x99, 0x00);
const ORANGE: Rgb = (0xcb, 0x4b, 0x16);
const RED: Rgb = (0xdc, 0x32, 0x2f);

/// Colors output by token class with 24-bit ANSI escapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxHighlighter;

impl SyntaxHighlighter {
    fn color_of(kind: TokenKind) -> Option<Rgb> {
        if kind == TokenKind::Whitespace {
            return None;
        }
        let color = if kind.is_literal() || matches!(kind, TokenKind::KwTrue | TokenKind::KwFalse) {
            CYAN
        } else if matches!(kind, TokenKind::LineComment | TokenKind::BlockComment) {
            BASE01
        } else if matches!(kind, TokenKind::KwSelfValue | TokenKind::KwSelfType | TokenKind::Lifetime) {
            ORANGE
        } else if kind.is_keyword() {
            GREEN
        } else if kind == TokenKind::Ident {
            BASE1
        } else if kind == TokenKind::Error {
            RED
        } else {
            BASE0
        };
        Some(color)
    }
}

impl Decorator for SyntaxHighlighter {
    fn decorate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() * 2);
        for token in lex(text) {
            let piece = &text[token.range];
            match Self::color_of(token.kind) {
                Some((r, g, b)) => out.push_str(&piece.truecolor(r, g, b).to_string()),
                None => out.push_str(piece),
            }
        }
        out
    }
}
