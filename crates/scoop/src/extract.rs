//! Argument text extraction.
//!
//! Argument boundaries come from the syntax tree, never from splitting on
//! commas: for a macro call each `Arg` of the argument list is one value;
//! for the function and method spellings the sole argument is a tuple
//! literal and its elements are the values.

use rowan::NodeOrToken;
use scoop_syntax::ast::{Call, CallKind};
use scoop_syntax::{lex, parse_expr, SyntaxKind, SyntaxNode, TextSize, TokenKind};

const SENTINEL: &str = "__scoop_sentinel__";

/// The nodes holding each value's expression, or `None` when the call's
/// shape does not show them (e.g. `ic(pair)` with `pair` a tuple variable).
#[must_use]
pub fn argument_nodes(call: &Call) -> Option<Vec<SyntaxNode>> {
    let args = call.args();
    match call.kind() {
        CallKind::Macro => Some(args),
        CallKind::Function | CallKind::Method => {
            let [arg] = args.as_slice() else {
                return None;
            };
            let tuple = sole_node(arg)?;
            (tuple.kind() == SyntaxKind::TupleExpr).then(|| {
                tuple
                    .children()
                    .filter(|n| n.kind() == SyntaxKind::Elem)
                    .collect()
            })
        }
    }
}

/// Number of values `call` passes, when its shape shows it.
#[must_use]
pub fn arity(call: &Call) -> Option<usize> {
    argument_nodes(call).map(|nodes| nodes.len())
}

/// Source text of each of the `expected` values passed by `call`, whose
/// tree was parsed from `source`.
///
/// Returns `expected` placeholders when the arguments cannot be mapped to
/// the values.
#[must_use]
pub fn extract_call(call: &Call, source: &str, expected: usize) -> Vec<Option<String>> {
    match argument_nodes(call) {
        Some(nodes) if nodes.len() == expected => nodes
            .iter()
            .map(|node| {
                let range = node.text_range();
                let prefix = line_prefix(source, range.start());
                Some(dedent(&prefix, &normalize(&source[range])))
            })
            .collect(),
        _ => placeholders(expected),
    }
}

/// Like [`extract_call`], for the text of a single call such as
/// `ic!(a, b)` or `dbg.ic((a, b))`.
///
/// When the text does not parse as one clean call, the argument region is
/// split with [`split_arguments`] instead.
#[must_use]
pub fn extract_call_text(text: &str, expected: usize) -> Vec<Option<String>> {
    let parse = parse_expr(text);
    if parse.ok() {
        if let Some(call) = sole_call(&parse.syntax()) {
            return extract_call(&call, text, expected);
        }
    }

    let labels = split_call_text(text).unwrap_or_default();
    if labels.len() == expected {
        labels
            .iter()
            .map(|label| Some(dedent("", &normalize(label))))
            .collect()
    } else {
        placeholders(expected)
    }
}

fn split_call_text(text: &str) -> Option<Vec<String>> {
    let open = text.find(['(', '[', '{'])?;
    let body = text[open + 1..].trim_end().trim_end_matches(';').trim_end();
    let args = split_arguments(strip_unmatched_close(body))?;
    if text[..open].trim_end().ends_with('!') {
        return Some(args);
    }

    // Function and method spellings take one tuple of values.
    let [tuple] = args.as_slice() else {
        return None;
    };
    let parse = parse_expr(tuple);
    let node = sole_node(&parse.syntax())?;
    if node.kind() != SyntaxKind::TupleExpr {
        return None;
    }
    split_arguments(&tuple[1..tuple.len() - 1])
}

/// Drops the call's own closing delimiter, if present, from the text after
/// its opening one.
fn strip_unmatched_close(body: &str) -> &str {
    let mut depth = 0i32;
    let mut last = None;
    for token in lex(body) {
        if token.kind.is_opening_delim() {
            depth += 1;
        } else if token.kind.is_closing_delim() {
            depth -= 1;
        }
        if !token.kind.is_trivia() {
            last = Some(token);
        }
    }
    match last {
        Some(token) if depth < 0 && token.kind.is_closing_delim() => {
            &body[..usize::from(token.range.start())]
        }
        _ => body,
    }
}

/// Splits the text between a call's delimiters into its top-level
/// arguments.
///
/// The text is re-wrapped as a tuple with a trailing sentinel element and
/// re-parsed, so a sole tuple literal such as `(a, b)` stays one argument.
#[must_use]
pub fn split_arguments(params: &str) -> Option<Vec<String>> {
    let trimmed = params.trim();
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed).trim_end();
    if trimmed.is_empty() {
        return Some(Vec::new());
    }

    let wrapped = format!("({trimmed}, {SENTINEL})");
    let parse = parse_expr(&wrapped);
    if !parse.ok() {
        return None;
    }
    let tuple = sole_node(&parse.syntax())?;
    if tuple.kind() != SyntaxKind::TupleExpr {
        return None;
    }
    let elems: Vec<_> = tuple
        .children()
        .filter(|n| n.kind() == SyntaxKind::Elem)
        .collect();
    let (last, args) = elems.split_last()?;
    if last.text() != SENTINEL {
        return None;
    }
    Some(args.iter().map(|elem| elem.text().to_string()).collect())
}

/// Returns `true` if `label` is a literal, or a tuple or array of literals,
/// whose rendered value would repeat it.
#[must_use]
pub fn is_literal(label: &str) -> bool {
    let parse = parse_expr(label);
    parse.ok() && elements_are_literal(&parse.syntax())
}

fn elements_are_literal(parent: &SyntaxNode) -> bool {
    let elements: Vec<_> = parent
        .children_with_tokens()
        .filter(|e| !e.kind().is_trivia())
        .collect();
    match elements.as_slice() {
        [NodeOrToken::Node(node)] => is_literal_node(node),
        [NodeOrToken::Token(minus), NodeOrToken::Node(node)] => {
            minus.kind() == SyntaxKind::Minus
                && node.kind() == SyntaxKind::Literal
                && node.first_token().is_some_and(|t| {
                    matches!(t.kind(), SyntaxKind::IntLiteral | SyntaxKind::FloatLiteral)
                })
        }
        _ => false,
    }
}

fn is_literal_node(node: &SyntaxNode) -> bool {
    match node.kind() {
        SyntaxKind::Literal => true,
        SyntaxKind::TupleExpr | SyntaxKind::ArrayExpr | SyntaxKind::ParenExpr => node
            .children()
            .all(|elem| elem.kind() == SyntaxKind::Elem && elements_are_literal(&elem)),
        _ => false,
    }
}

/// The only call in an expression fragment, ignoring trivia.
pub(crate) fn sole_call(root: &SyntaxNode) -> Option<Call> {
    Call::cast(sole_node(root)?)
}

fn sole_node(root: &SyntaxNode) -> Option<SyntaxNode> {
    let mut elements = root.children_with_tokens().filter(|e| !e.kind().is_trivia());
    let first = elements.next()?;
    if elements.next().is_some() {
        return None;
    }
    first.into_node()
}

fn placeholders(count: usize) -> Vec<Option<String>> {
    vec![None; count]
}

/// The part of the line before `offset`, with everything but tabs blanked
/// out.
pub(crate) fn line_prefix(source: &str, offset: TextSize) -> String {
    let offset = usize::from(offset).min(source.len());
    let start = source[..offset].rfind('\n').map_or(0, |idx| idx + 1);
    source[start..offset]
        .chars()
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect()
}

/// Drops whitespace directly inside `(`/`[` and directly before `)`/`]`,
/// unless it spans lines.
pub(crate) fn normalize(text: &str) -> String {
    let tokens = lex(text);
    let mut out = String::with_capacity(text.len());
    for (idx, token) in tokens.iter().enumerate() {
        let piece = &text[token.range];
        if token.kind == TokenKind::Whitespace && !piece.contains('\n') {
            let after_open = idx > 0
                && matches!(tokens[idx - 1].kind, TokenKind::LParen | TokenKind::LBracket);
            let before_close = tokens
                .get(idx + 1)
                .is_some_and(|next| matches!(next.kind, TokenKind::RParen | TokenKind::RBracket));
            if after_open || before_close {
                continue;
            }
        }
        out.push_str(piece);
    }
    out
}

/// Re-indents the first line of `text` by `prefix` (its position in the
/// source line), then removes the indentation all lines share.
pub(crate) fn dedent(prefix: &str, text: &str) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }
    let indented = format!("{prefix}{text}");
    let lines: Vec<&str> = indented.lines().collect();
    let common = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| &line[..line.len() - line.trim_start().len()])
        .reduce(common_prefix)
        .unwrap_or("");
    lines
        .iter()
        .map(|line| line.strip_prefix(common).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn common_prefix<'a>(a: &'a str, b: &'a str) -> &'a str {
    let len = a
        .char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map_or(0, |((idx, c), _)| idx + c.len_utf8());
    &a[..len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoop_syntax::parse;

    fn first_call(source: &str) -> (Call, String) {
        let parse = parse(source);
        let call = parse
            .syntax()
            .descendants()
            .filter_map(Call::cast)
            .next()
            .unwrap();
        (call, source.to_string())
    }

    fn labels(source: &str, expected: usize) -> Vec<Option<String>> {
        let (call, text) = first_call(source);
        extract_call(&call, &text, expected)
    }

    fn some(labels: &[&str]) -> Vec<Option<String>> {
        labels.iter().map(|l| Some((*l).to_string())).collect()
    }

    #[test]
    fn macro_arguments() {
        assert_eq!(
            labels("fn f() { ic!(a, \"x, y\", f(b, c), |p, q| p + q); }", 4),
            some(&["a", "\"x, y\"", "f(b, c)", "|p, q| p + q"])
        );
    }

    #[test]
    fn tuple_spellings() {
        assert_eq!(labels("fn f() { ic((a, b.len())); }", 2), some(&["a", "b.len()"]));
        assert_eq!(labels("fn f() { IC.ic((a,)); }", 1), some(&["a"]));
        assert_eq!(labels("fn f() { ic(()); }", 0), Vec::<Option<String>>::new());
        assert_eq!(labels("fn f() { ic(((a, b),)); }", 1), some(&["(a, b)"]));
    }

    #[test]
    fn sole_tuple_in_macro_stays_one_argument() {
        assert_eq!(labels("fn f() { ic!((a, b)); }", 1), some(&["(a, b)"]));
    }

    #[test]
    fn unmappable_arguments_give_placeholders() {
        assert_eq!(labels("fn f() { ic(pair); }", 2), vec![None, None]);
        assert_eq!(labels("fn f() { ic((pair)); }", 2), vec![None, None]);
        assert_eq!(labels("fn f() { ic!(a, b); }", 3), vec![None, None, None]);
    }

    #[test]
    fn normalize_brackets() {
        assert_eq!(normalize("foo( a ,b )"), "foo(a ,b)");
        assert_eq!(normalize("v[ 0 ]"), "v[0]");
        assert_eq!(normalize("\"( x )\""), "\"( x )\"");
        assert_eq!(normalize("(\n    a,\n)"), "(\n    a,\n)");
    }

    #[test]
    fn multiline_argument_is_dedented() {
        let source = "fn f() {\n    ic!(\n        (1,\n         2),\n        [\n            3,\n        ],\n    );\n}";
        assert_eq!(
            labels(source, 2),
            some(&["(1,\n 2)", "[\n    3,\n]"])
        );
    }

    #[test]
    fn call_text_without_a_tree() {
        assert_eq!(extract_call_text("ic!(a, b)", 2), some(&["a", "b"]));
        assert_eq!(extract_call_text("d.ic((a, [1, 2]))", 2), some(&["a", "[1, 2]"]));
        assert_eq!(extract_call_text("ic!(a, b", 2), some(&["a", "b"]));
        assert_eq!(extract_call_text("ic!(a, b", 3), vec![None, None, None]);
        assert_eq!(extract_call_text("d.ic((a, [1, 2])", 2), some(&["a", "[1, 2]"]));
        assert_eq!(extract_call_text("ic!(a, f(b)) + )", 2), vec![None, None]);
    }

    #[test]
    fn split_arguments_with_sentinel() {
        assert_eq!(split_arguments("a, (b, c)"), Some(vec!["a".to_string(), "(b, c)".to_string()]));
        assert_eq!(split_arguments("(a, b)"), Some(vec!["(a, b)".to_string()]));
        assert_eq!(split_arguments("a,"), Some(vec!["a".to_string()]));
        assert_eq!(split_arguments("  "), Some(Vec::new()));
        assert_eq!(split_arguments("a, )"), None);
    }

    #[test]
    fn recognizes_literal_labels() {
        for label in ["1", "-2.5", "\"hello\"", "b\"bytes\"", "'c'", "true", "(1, \"a\")", "[1, 2]", "()"] {
            assert!(is_literal(label), "{label} should be a literal");
        }
        for label in ["x", "-x", "1 + 2", "f(1)", "[x, 1]", "\"a\".len()", "r"] {
            assert!(!is_literal(label), "{label} should not be a literal");
        }
    }

    #[test]
    fn line_prefix_keeps_tabs() {
        let source = "fn f() {\n\tlet x = ic!(1);\n}";
        let offset = TextSize::from(u32::try_from(source.find("ic!").unwrap()).unwrap());
        assert_eq!(line_prefix(source, offset), "\t        ");
    }
}
