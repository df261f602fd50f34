//! Main parser implementation.

use crate::lexer::{lex, Token, TokenKind};
use crate::parser::event::Event;
use crate::parser::sink::Sink;
use crate::parser::source::Source;
use crate::parser::{Parse, ParseError};
use crate::syntax::SyntaxKind;
use drop_bomb::DropBomb;

/// Parses a whole source file into a syntax tree.
#[must_use]
pub fn parse(source: &str) -> Parse {
    let tokens = lex(source);
    let mut parser = Parser::new(&tokens, source);
    parser.parse_source_file();
    build(&tokens, source, parser)
}

/// Parses a standalone expression fragment, such as the text of a single
/// call, into a tree rooted at `ExprSource`.
#[must_use]
pub fn parse_expr(source: &str) -> Parse {
    let tokens = lex(source);
    let mut parser = Parser::new(&tokens, source);
    parser.parse_expr_source();
    build(&tokens, source, parser)
}

fn build(tokens: &[Token], source: &str, parser: Parser<'_, '_>) -> Parse {
    Parse {
        green_node: Sink::new(tokens, source, parser.events).finish(),
        errors: parser.errors,
    }
}

/// The parser state.
pub(crate) struct Parser<'t, 'src> {
    pub(crate) source: Source<'t, 'src>,
    pub(crate) events: Vec<Event>,
    errors: Vec<ParseError>,
    last_bumped: TokenKind,
}

pub(crate) struct Marker {
    pos: usize,
    bomb: DropBomb,
}

impl Marker {
    pub(crate) fn complete(
        mut self,
        parser: &mut Parser<'_, '_>,
        kind: SyntaxKind,
    ) -> CompletedMarker {
        self.bomb.defuse();
        match parser.events.get_mut(self.pos) {
            Some(Event::Tombstone) => parser.events[self.pos] = Event::open(kind),
            Some(Event::Open {
                kind: existing_kind,
                ..
            }) => {
                *existing_kind = kind;
            }
            _ => {}
        }
        parser.events.push(Event::Close);
        CompletedMarker {
            pos: self.pos,
            kind,
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct CompletedMarker {
    pub(crate) pos: usize,
    pub(crate) kind: SyntaxKind,
}

impl CompletedMarker {
    pub(crate) fn precede(self, parser: &mut Parser<'_, '_>) -> Marker {
        let new_pos = parser.events.len();
        parser.events.push(Event::Tombstone);
        set_forward_parent(&mut parser.events, self.pos, new_pos);
        Marker {
            pos: new_pos,
            bomb: DropBomb::new("uncompleted marker"),
        }
    }
}

fn set_forward_parent(events: &mut [Event], from: usize, to: usize) {
    let mut current = from;
    loop {
        match &mut events[current] {
            Event::Open {
                forward_parent: Some(fp),
                ..
            } => {
                current += *fp as usize;
            }
            Event::Open { forward_parent, .. } => {
                *forward_parent = u32::try_from(to - current).ok();
                break;
            }
            _ => break,
        }
    }
}

impl<'t, 'src> Parser<'t, 'src> {
    fn new(tokens: &'t [Token], source: &'src str) -> Self {
        Self {
            source: Source::new(tokens, source),
            events: Vec::new(),
            errors: Vec::new(),
            last_bumped: TokenKind::Eof,
        }
    }

    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SourceFile);

        while !self.at_end() {
            if self.current().is_closing_delim() {
                self.error("unmatched closing delimiter");
                self.bump();
            } else {
                self.parse_item();
            }
        }

        self.finish_node();
    }

    fn parse_expr_source(&mut self) {
        self.start_node(SyntaxKind::ExprSource);

        while !self.at_end() {
            self.parse_soup(super::grammar::Stop::Never);
            if self.current().is_closing_delim() {
                self.error("unmatched closing delimiter");
                self.bump();
            }
        }

        self.finish_node();
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    pub(crate) fn current(&self) -> TokenKind {
        self.source.current()
    }

    pub(crate) fn current_text(&self) -> &'src str {
        self.source.current_text()
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.source.current() == kind
    }

    pub(crate) fn at_end(&self) -> bool {
        self.source.at_end()
    }

    pub(crate) fn peek_kind_n(&self, n: usize) -> TokenKind {
        self.source.peek_kind_n(n)
    }

    /// The kind of the most recently consumed token.
    pub(crate) fn last_bumped(&self) -> TokenKind {
        self.last_bumped
    }

    pub(crate) fn bump(&mut self) {
        let kind = self.source.current();
        if kind == TokenKind::Eof {
            return;
        }
        self.events.push(Event::Token(SyntaxKind::from(kind)));
        self.source.bump();
        self.last_bumped = kind;
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Tombstone);
        Marker {
            pos,
            bomb: DropBomb::new("uncompleted marker"),
        }
    }

    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.events.push(Event::open(kind));
    }

    pub(crate) fn finish_node(&mut self) {
        self.events.push(Event::Close);
    }

    pub(crate) fn error(&mut self, message: &str) {
        let range = self.source.current_token().map_or_else(
            || text_size::TextRange::empty(self.source.end_offset()),
            |t| t.range,
        );

        self.errors.push(ParseError {
            message: message.to_string(),
            range,
        });
    }

    /// Consumes `kind` or records `message` without consuming anything.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            self.error(message);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let parse = parse("");
        assert!(parse.ok());
    }

    #[test]
    fn test_parse_simple_fn() {
        let parse = parse("fn main() {}");
        assert!(parse.ok(), "errors: {:?}", parse.errors());
    }

    #[test]
    fn test_parse_call_statement() {
        let source = r#"
fn main() {
    let x = 1;
    ic!(x, "two");
    d.ic((x + 1, f(x)));
}
"#;
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
    }

    #[test]
    fn test_unmatched_close_is_reported_and_skipped() {
        let parse = parse("fn a() {} ) fn b() {}");
        assert!(!parse.ok());
        assert!(parse
            .errors()
            .iter()
            .any(|e| e.message == "unmatched closing delimiter"));
        let fns = parse
            .syntax()
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::FnDef)
            .count();
        assert_eq!(fns, 2);
    }

    #[test]
    fn test_unclosed_call_terminates() {
        let parse = parse("fn main() { ic!(a, (b ");
        assert!(!parse.ok());
        assert_eq!(
            parse.syntax().text().to_string(),
            "fn main() { ic!(a, (b "
        );
    }

    #[test]
    fn test_parse_expr_fragment() {
        let parse = parse_expr("ic!(a)");
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        assert_eq!(parse.syntax().kind(), SyntaxKind::ExprSource);
    }

    #[test]
    fn test_parse_expr_reports_extra_closers() {
        let parse = parse_expr("f(a))");
        assert!(!parse.ok());
    }
}
