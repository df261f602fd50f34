//! Shared helpers for parser snapshot tests.
#![allow(dead_code, unused_imports)]

pub use scoop_syntax::parser::{parse, parse_expr, Parse};
#[allow(unused_imports)]
pub use scoop_syntax::syntax::SyntaxKind;

/// Formats a whole-file parse result for snapshot testing.
pub fn snapshot_parse(source: &str) -> String {
    render(&parse(source))
}

/// Formats an expression-fragment parse result for snapshot testing.
pub fn snapshot_expr(source: &str) -> String {
    render(&parse_expr(source))
}

/// Texts of every node of `kind`, in preorder.
pub fn texts_of(source: &str, kind: SyntaxKind) -> Vec<String> {
    parse(source)
        .syntax()
        .descendants()
        .filter(|n| n.kind() == kind)
        .map(|n| n.text().to_string())
        .collect()
}

fn render(parsed: &Parse) -> String {
    let syntax = parsed.syntax();

    let mut output = String::new();
    format_node(&syntax, &mut output, 0);

    if !parsed.ok() {
        output.push_str("---\nErrors:\n");
        for err in parsed.errors() {
            output.push_str(&format!("  - {}\n", err));
        }
    }

    output
}

fn format_node(node: &scoop_syntax::syntax::SyntaxNode, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);

    out.push_str(&format!(
        "{}{:?}@{:?}\n",
        indent,
        node.kind(),
        node.text_range()
    ));

    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(n) => format_node(&n, out, depth + 1),
            rowan::NodeOrToken::Token(t) => {
                let kind = t.kind();
                if !kind.is_trivia() {
                    out.push_str(&format!(
                        "{}{:?}@{:?} {:?}\n",
                        "  ".repeat(depth + 1),
                        kind,
                        t.text_range(),
                        t.text()
                    ));
                }
            }
        }
    }
}
