use scoop_syntax::lexer::{lex_with_text, TokenKind};

fn significant(source: &str) -> Vec<(TokenKind, &str)> {
    lex_with_text(source)
        .into_iter()
        .filter(|(t, _)| !t.kind.is_trivia())
        .map(|(t, text)| (t.kind, text))
        .collect()
}

#[test]
fn test_call_tokens() {
    assert_eq!(
        significant("scoop::ic!(x)"),
        vec![
            (TokenKind::Ident, "scoop"),
            (TokenKind::ColonColon, "::"),
            (TokenKind::Ident, "ic"),
            (TokenKind::Bang, "!"),
            (TokenKind::LParen, "("),
            (TokenKind::Ident, "x"),
            (TokenKind::RParen, ")"),
        ]
    );
}

#[test]
fn test_doc_comments_are_trivia() {
    assert!(significant("/// docs\n//! inner\nx").len() == 1);
}

#[test]
fn test_unicode_identifiers() {
    assert_eq!(significant("größe"), vec![(TokenKind::Ident, "größe")]);
}

#[test]
fn test_arrows_and_ranges() {
    let kinds: Vec<_> = significant("|| -> => .. ..= ...")
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::PipePipe,
            TokenKind::ThinArrow,
            TokenKind::FatArrow,
            TokenKind::DotDot,
            TokenKind::DotDotEq,
            TokenKind::DotDotDot,
        ]
    );
}

#[test]
fn test_lexing_is_total() {
    let source = "fn ✓() { \"unterminated }";
    let covered: usize = lex_with_text(source).iter().map(|(_, text)| text.len()).sum();
    assert_eq!(covered, source.len());
}
