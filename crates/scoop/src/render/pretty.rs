//! Width-aware re-layout of `Debug` text.
//!
//! The flat `{:?}` text is tokenized, its bracket structure rebuilt, and the
//! result printed flat when it fits. Otherwise the outermost groups break
//! first: items are aligned just inside the opening delimiter and runs of
//! atomic items share a line while they fit.

use scoop_syntax::{lex, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Doc {
    Text(String),
    Group(Group),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Group {
    open: String,
    close: &'static str,
    pad: bool,
    items: Vec<Vec<Doc>>,
    trailing_comma: bool,
}

/// Re-lays out `text` to fit `width` columns.
///
/// Returns `None` when the delimiters of `text` do not balance.
#[must_use]
pub fn pretty(text: &str, width: usize) -> Option<String> {
    if text.chars().count() <= width || text.contains('\n') {
        return Some(text.to_string());
    }

    let docs = build(text)?;
    let mut printer = Printer {
        width,
        out: String::with_capacity(text.len() + 64),
        col: 0,
    };
    printer.item(&docs);
    Some(printer.out)
}

struct Frame {
    open: String,
    close: &'static str,
    pad: Option<bool>,
    items: Vec<Vec<Doc>>,
    item: Vec<Doc>,
    pending: String,
}

impl Frame {
    fn new(open: &str, close: &'static str) -> Self {
        Self {
            open: open.to_string(),
            close,
            pad: None,
            items: Vec::new(),
            item: Vec::new(),
            pending: String::new(),
        }
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.item.push(Doc::Text(std::mem::take(&mut self.pending)));
        }
    }

    fn end_item(&mut self) {
        self.flush();
        if let Some(Doc::Text(last)) = self.item.last_mut() {
            let trimmed = last.trim_end().len();
            last.truncate(trimmed);
        }
        let item = std::mem::take(&mut self.item);
        self.items.push(item);
    }
}

fn closer_of(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::LParen => Some(")"),
        TokenKind::LBracket => Some("]"),
        TokenKind::LBrace => Some("}"),
        _ => None,
    }
}

fn build(text: &str) -> Option<Vec<Doc>> {
    let mut stack = vec![Frame::new("", "")];

    for token in lex(text) {
        let piece = &text[token.range];
        let depth = stack.len();
        let frame = stack.last_mut()?;

        if frame.pad.is_none() && depth > 1 {
            frame.pad = Some(token.kind == TokenKind::Whitespace);
        }

        if let Some(close) = closer_of(token.kind) {
            frame.flush();
            stack.push(Frame::new(piece, close));
        } else if token.kind.is_closing_delim() {
            if depth == 1 || frame.close != piece {
                return None;
            }
            let mut done = stack.pop()?;
            done.flush();
            let empty = done.item.iter().all(|doc| matches!(doc, Doc::Text(t) if t.trim().is_empty()));
            let trailing_comma = empty && !done.items.is_empty();
            if !empty {
                done.end_item();
            }
            let group = Group {
                open: done.open,
                close: done.close,
                pad: done.pad.unwrap_or(false) && !done.items.is_empty(),
                items: done.items,
                trailing_comma,
            };
            stack.last_mut()?.item.push(Doc::Group(group));
        } else if token.kind == TokenKind::Comma && depth > 1 {
            frame.end_item();
        } else if token.kind == TokenKind::Whitespace {
            if !(frame.item.is_empty() && frame.pending.is_empty()) {
                frame.pending.push(' ');
            }
        } else {
            frame.pending.push_str(piece);
        }
    }

    if stack.len() != 1 {
        return None;
    }
    let mut root = stack.pop()?;
    root.flush();
    Some(root.item)
}

fn flat_len(docs: &[Doc]) -> usize {
    docs.iter()
        .map(|doc| match doc {
            Doc::Text(text) => text.chars().count(),
            Doc::Group(group) => group_flat_len(group),
        })
        .sum()
}

fn group_flat_len(group: &Group) -> usize {
    let items: usize = group.items.iter().map(|item| flat_len(item)).sum();
    let commas = group.items.len().saturating_sub(1) * 2 + usize::from(group.trailing_comma);
    let pad = if group.pad { 2 } else { 0 };
    group.open.chars().count() + items + commas + pad + group.close.len()
}

fn is_atomic(item: &[Doc]) -> bool {
    item.iter().all(|doc| matches!(doc, Doc::Text(_)))
}

struct Printer {
    width: usize,
    out: String,
    col: usize,
}

impl Printer {
    fn push(&mut self, text: &str) {
        self.out.push_str(text);
        self.col += text.chars().count();
    }

    fn newline(&mut self, indent: usize) {
        self.out.push('\n');
        self.out.extend(std::iter::repeat(' ').take(indent));
        self.col = indent;
    }

    fn item(&mut self, docs: &[Doc]) {
        for doc in docs {
            match doc {
                Doc::Text(text) => self.push(text),
                Doc::Group(group) => self.group(group),
            }
        }
    }

    fn group(&mut self, group: &Group) {
        if self.col + group_flat_len(group) <= self.width {
            self.flat_group(group);
            return;
        }

        self.push(&group.open);
        if group.pad {
            self.push(" ");
        }
        let indent = self.col;
        for (idx, item) in group.items.iter().enumerate() {
            if idx > 0 {
                self.push(",");
                let packs = is_atomic(item)
                    && is_atomic(&group.items[idx - 1])
                    && self.col + 1 + flat_len(item) + 1 <= self.width;
                if packs {
                    self.push(" ");
                } else {
                    self.newline(indent);
                }
            }
            self.item(item);
        }
        if group.trailing_comma {
            self.push(",");
        }
        if group.pad {
            self.push(" ");
        }
        self.push(group.close);
    }

    fn flat_group(&mut self, group: &Group) {
        self.push(&group.open);
        if group.pad {
            self.push(" ");
        }
        for (idx, item) in group.items.iter().enumerate() {
            if idx > 0 {
                self.push(", ");
            }
            for doc in item {
                match doc {
                    Doc::Text(text) => self.push(text),
                    Doc::Group(inner) => self.flat_group(inner),
                }
            }
        }
        if group.trailing_comma {
            self.push(",");
        }
        if group.pad {
            self.push(" ");
        }
        self.push(group.close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(pretty("[1, 2, 3]", 70).as_deref(), Some("[1, 2, 3]"));
    }

    #[test]
    fn flat_round_trip_of_structure() {
        let text = "Config { name: \"a, b\", ports: [80, 443], inner: Some((1,)), empty: [] }";
        let docs = build(text).unwrap();
        let mut printer = Printer {
            width: usize::MAX,
            out: String::new(),
            col: 0,
        };
        printer.item(&docs);
        assert_eq!(printer.out, text);
    }

    #[test]
    fn breaks_outer_group_first() {
        let text = "Server { name: \"primary\", ports: [8080, 8443], tags: {\"env\": \"prod\"}, retries: 3 }";
        let actual = pretty(text, 40).unwrap();
        expect![[r#"
            Server { name: "primary",
                     ports: [8080, 8443],
                     tags: {"env": "prod"},
                     retries: 3 }"#]]
        .assert_eq(&actual);
    }

    #[test]
    fn packs_atomic_items() {
        let values: Vec<u32> = (100..120).collect();
        let actual = pretty(&format!("{values:?}"), 30).unwrap();
        expect![[r#"
            [100, 101, 102, 103, 104, 105,
             106, 107, 108, 109, 110, 111,
             112, 113, 114, 115, 116, 117,
             118, 119]"#]]
        .assert_eq(&actual);
    }

    #[test]
    fn nested_groups_break_recursively() {
        let text = "[[\"aaaaaaaaaa\", \"bbbbbbbbbb\"], [\"cccccccccc\", \"dddddddddd\"]]";
        let actual = pretty(text, 30).unwrap();
        expect![[r#"
            [["aaaaaaaaaa", "bbbbbbbbbb"],
             ["cccccccccc", "dddddddddd"]]"#]]
        .assert_eq(&actual);
    }

    #[test]
    fn brackets_inside_strings_are_atoms() {
        let text = "(\"((((\", \"]]]]\", 1234567890, 1234567890)";
        let actual = pretty(text, 20).unwrap();
        expect![[r#"
            ("((((", "]]]]",
             1234567890,
             1234567890)"#]]
        .assert_eq(&actual);
    }

    #[test]
    fn unbalanced_text_is_rejected() {
        assert_eq!(pretty("Weird { a: [1, 2 }, and more text past the width", 10), None);
        assert_eq!(pretty("Weird(((( and more text past the width", 10), None);
    }
}
