//! Lexer for Rust source text.
//!
//! This module provides a lexer that tokenizes source code into a stream
//! of tokens with their positions in the source text.

mod tokens;

pub use tokens::TokenKind;

use logos::Logos;
use std::collections::VecDeque;
use text_size::{TextRange, TextSize};

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The byte range of the token in the source text.
    pub range: TextRange,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, range: TextRange) -> Self {
        Self { kind, range }
    }
}

/// Lexer for Rust source code.
///
/// The lexer is an iterator over tokens. It handles all error recovery
/// internally - any unrecognized characters are returned as `TokenKind::Error`.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    base: usize,
    source: &'src str,
    pending: VecDeque<Token>,
    last: Option<Token>,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            base: 0,
            source,
            pending: VecDeque::new(),
            last: None,
        }
    }

    /// Splits `0.1` into `0`, `.`, `1` when it directly follows a `.`, as in
    /// the nested tuple field access `pair.0.1`.
    fn split_tuple_index(&mut self, start: usize, end: usize) -> bool {
        let follows_dot = self
            .last
            .is_some_and(|last| last.kind == TokenKind::Dot && last.range.end() == to_size(start));
        if !follows_dot {
            return false;
        }

        let text = &self.source[start..end];
        let Some(dot) = text.find('.') else {
            return false;
        };
        let (head, tail) = (&text[..dot], &text[dot + 1..]);
        let is_index = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !is_index(head) || !is_index(tail) {
            return false;
        }

        let dot_start = start + dot;
        self.pending.push_back(Token::new(
            TokenKind::IntLiteral,
            TextRange::new(to_size(start), to_size(dot_start)),
        ));
        self.pending.push_back(Token::new(
            TokenKind::Dot,
            TextRange::new(to_size(dot_start), to_size(dot_start + 1)),
        ));
        self.pending.push_back(Token::new(
            TokenKind::IntLiteral,
            TextRange::new(to_size(dot_start + 1), to_size(end)),
        ));
        true
    }
}

fn to_size(offset: usize) -> TextSize {
    TextSize::from(u32::try_from(offset).unwrap_or(u32::MAX))
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = if let Some(token) = self.pending.pop_front() {
            token
        } else {
            let kind = self.inner.next()?;
            let span = self.inner.span();
            let (start, end) = (self.base + span.start, self.base + span.end);
            let kind = kind.unwrap_or(TokenKind::Error);

            if kind == TokenKind::IntLiteral
                && self.source[start..end].ends_with('.')
                && end > start + 1
            {
                // A failed float match (`0..3`, `1.max(2)`) leaves the dot on
                // the integer; give it back and resume lexing at the dot.
                let dot_start = end - 1;
                self.inner = TokenKind::lexer(&self.source[dot_start..]);
                self.base = dot_start;
                Token::new(
                    TokenKind::IntLiteral,
                    TextRange::new(to_size(start), to_size(dot_start)),
                )
            } else if kind == TokenKind::FloatLiteral && self.split_tuple_index(start, end) {
                self.pending.pop_front()?
            } else {
                Token::new(kind, TextRange::new(to_size(start), to_size(end)))
            }
        };

        if token.kind.is_trivia() {
            self.last = None;
        } else {
            self.last = Some(token);
        }
        Some(token)
    }
}

/// Lex the entire source and return all tokens.
///
/// This is a convenience function for testing and simple use cases.
/// For the parser, use the `Lexer` iterator directly.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Lex source and return tokens paired with their text.
///
/// Useful for debugging and testing.
#[must_use]
pub fn lex_with_text(source: &str) -> Vec<(Token, &str)> {
    Lexer::new(source)
        .map(|token| {
            let text = &source[usize::from(token.range.start())..usize::from(token.range.end())];
            (token, text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_basic() {
        let source = "ic!(x + 1);";
        let tokens = lex(source);

        let non_trivia: Vec<_> = tokens.iter().filter(|t| !t.kind.is_trivia()).collect();
        assert_eq!(non_trivia.len(), 8);
        assert_eq!(non_trivia[0].kind, TokenKind::Ident);
        assert_eq!(non_trivia[1].kind, TokenKind::Bang);
        assert_eq!(non_trivia[2].kind, TokenKind::LParen);
        assert_eq!(non_trivia[7].kind, TokenKind::Semi);
    }

    #[test]
    fn test_lexer_preserves_positions() {
        let source = "abc == 123";
        let tokens = lex(source);

        assert_eq!(tokens[0].range, TextRange::new(0.into(), 3.into()));
        assert_eq!(tokens[1].range, TextRange::new(3.into(), 4.into()));
        assert_eq!(tokens[2].range, TextRange::new(4.into(), 6.into()));
    }

    #[test]
    fn test_lex_with_text() {
        let source = "d.ic((a, b))";
        let tokens = lex_with_text(source);

        let texts: Vec<_> = tokens.iter().map(|(_, text)| *text).collect();
        assert_eq!(texts, vec!["d", ".", "ic", "(", "(", "a", ",", " ", "b", ")", ")"]);
    }

    #[test]
    fn test_nested_tuple_field_is_split() {
        let source = "pair.0.1";
        let tokens = lex_with_text(source);

        let kinds: Vec<_> = tokens.iter().map(|(t, _)| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident,
                TokenKind::Dot,
                TokenKind::IntLiteral,
                TokenKind::Dot,
                TokenKind::IntLiteral,
            ]
        );
        assert_eq!(tokens[4].1, "1");
    }

    #[test]
    fn test_float_after_space_is_not_split() {
        let tokens = lex("x. 0.5");
        let kinds: Vec<_> = tokens
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Ident, TokenKind::Dot, TokenKind::FloatLiteral]
        );
    }

    #[test]
    fn test_ranges_after_integers() {
        let texts: Vec<_> = lex_with_text("0..3 1..=2 7.min(8)")
            .into_iter()
            .filter(|(t, _)| !t.kind.is_trivia())
            .map(|(_, text)| text)
            .collect();
        assert_eq!(
            texts,
            vec!["0", "..", "3", "1", "..=", "2", "7", ".", "min", "(", "8", ")"]
        );
    }

    #[test]
    fn test_full_function() {
        let source = r#"
fn main() {
    let x = vec![1, 2, 3];
    // show it
    ic!(x.len(), "done");
}
"#;

        let tokens = lex(source);
        let non_trivia: Vec<_> = tokens.iter().filter(|t| !t.kind.is_trivia()).collect();

        assert!(non_trivia.iter().any(|t| t.kind == TokenKind::KwFn));
        assert!(non_trivia.iter().any(|t| t.kind == TokenKind::KwLet));
        assert!(non_trivia.iter().any(|t| t.kind == TokenKind::StringLiteral));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::LineComment));
        assert!(!tokens.iter().any(|t| t.kind == TokenKind::Error));
    }
}
