mod common;
use common::*;
use expect_test::expect;

#[test]
fn test_macro_call_tree() {
    expect![[r#"
ExprSource@0..9
  MacroCall@0..9
    Path@0..2
      Ident@0..2 "ic"
    Bang@2..3 "!"
    ArgList@3..9
      LParen@3..4 "("
      Arg@4..5
        PathExpr@4..5
          Path@4..5
            Ident@4..5 "a"
      Comma@5..6 ","
      Arg@7..8
        Literal@7..8
          IntLiteral@7..8 "1"
      RParen@8..9 ")"
"#]]
    .assert_eq(&snapshot_expr("ic!(a, 1)"));
}

#[test]
fn test_method_call_tree() {
    expect![[r#"
ExprSource@0..10
  MethodCallExpr@0..10
    PathExpr@0..1
      Path@0..1
        Ident@0..1 "d"
    Dot@1..2 "."
    NameRef@2..4
      Ident@2..4 "ic"
    ArgList@4..10
      LParen@4..5 "("
      Arg@5..9
        TupleExpr@5..9
          LParen@5..6 "("
          Elem@6..7
            PathExpr@6..7
              Path@6..7
                Ident@6..7 "a"
          Comma@7..8 ","
          RParen@8..9 ")"
      RParen@9..10 ")"
"#]]
    .assert_eq(&snapshot_expr("d.ic((a,))"));
}

#[test]
fn test_unclosed_call_tree() {
    expect![[r#"
ExprSource@0..3
  CallExpr@0..3
    Path@0..1
      Ident@0..1 "f"
    ArgList@1..3
      LParen@1..2 "("
      Arg@2..3
        PathExpr@2..3
          Path@2..3
            Ident@2..3 "a"
---
Errors:
  - unclosed argument list at 3..3
"#]]
    .assert_eq(&snapshot_expr("f(a"));
}

#[test]
fn test_multiline_call_arguments() {
    let source = r#"
fn main() {
    ic!(
        a,
        b.len(),
    );
}
"#;
    assert_eq!(texts_of(source, SyntaxKind::Arg), vec!["a", "b.len()"]);
}

#[test]
fn test_delimiters_inside_strings_and_comments_are_ignored() {
    let source = r##"
fn main() {
    ic!(")(", /* ( */ r#"]"#, '(', x); // )
}
"##;
    let parse = parse(source);
    assert!(parse.ok(), "errors: {:?}", parse.errors());
    assert_eq!(
        texts_of(source, SyntaxKind::Arg),
        vec![r#"")(""#, r##"r#"]"#"##, "'('", "x"]
    );
}

#[test]
fn test_nested_calls_are_all_found() {
    let source = "fn main() { let y = ic!(ic!(1) + f(ic((2,)))); }";
    assert_eq!(
        texts_of(source, SyntaxKind::MacroCall),
        vec!["ic!(ic!(1) + f(ic((2,))))", "ic!(1)"]
    );
    assert_eq!(texts_of(source, SyntaxKind::CallExpr), vec!["f(ic((2,)))", "ic((2,))"]);
}

#[test]
fn test_calls_inside_closures_and_blocks() {
    let source = r#"
fn main() {
    let v: Vec<_> = (0..3).map(|i| ic!(i * 2)).collect();
    if v.is_empty() { ic!() } else { scoop::ic!(v.len()); }
    match v.first() {
        Some(x) => ic!(x),
        None => {}
    }
}
"#;
    let parse = parse(source);
    assert!(parse.ok(), "errors: {:?}", parse.errors());
    assert_eq!(
        texts_of(source, SyntaxKind::MacroCall),
        vec!["ic!(i * 2)", "ic!()", "scoop::ic!(v.len())", "ic!(x)"]
    );
}

#[test]
fn test_tuple_field_chain() {
    let source = "fn main() { ic!(pair.0.1, s.field); }";
    assert_eq!(
        texts_of(source, SyntaxKind::FieldExpr),
        vec!["pair.0.1", "pair.0", "s.field"]
    );
}

#[test]
fn test_turbofish_method_call() {
    let source = "fn main() { ic!(it.collect::<Vec<u8>>(), 2); }";
    assert_eq!(
        texts_of(source, SyntaxKind::Arg),
        vec!["it.collect::<Vec<u8>>()", "2"]
    );
    assert_eq!(
        texts_of(source, SyntaxKind::MethodCallExpr),
        vec!["it.collect::<Vec<u8>>()"]
    );
}

#[test]
fn test_parse_is_lossless_for_broken_input() {
    let source = "fn main() { ic!(a, [b) } }";
    let parse = parse(source);
    assert!(!parse.ok());
    assert_eq!(parse.syntax().text().to_string(), source);
}

#[test]
fn test_fn_item_tree() {
    insta::assert_snapshot!(snapshot_parse("fn f() {}"), @r#"
    SourceFile@0..9
      FnDef@0..9
        KwFn@0..2 "fn"
        Name@3..4
          Ident@3..4 "f"
        ParamList@4..6
          LParen@4..5 "("
          RParen@5..6 ")"
        Block@7..9
          LBrace@7..8 "{"
          RBrace@8..9 "}"
    "#);
}
