//! Typed accessors over the untyped syntax tree.
//!
//! Only the handful of node shapes that call-site recovery inspects get a
//! wrapper: call-like nodes, function definitions and impl blocks.

use smol_str::SmolStr;
use text_size::TextSize;

use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};

/// How a call is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// `name!(...)`
    Macro,
    /// `name(...)`
    Function,
    /// `receiver.name(...)`
    Method,
}

/// A `MacroCall`, `CallExpr` or `MethodCallExpr` node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Call(SyntaxNode);

impl Call {
    /// Wraps `node` if it is call-like.
    #[must_use]
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        node.kind().is_call().then_some(Self(node))
    }

    /// The underlying node.
    #[must_use]
    pub fn syntax(&self) -> &SyntaxNode {
        &self.0
    }

    /// The call spelling.
    #[must_use]
    pub fn kind(&self) -> CallKind {
        match self.0.kind() {
            SyntaxKind::MacroCall => CallKind::Macro,
            SyntaxKind::MethodCallExpr => CallKind::Method,
            _ => CallKind::Function,
        }
    }

    /// The called name: the last path segment, or the method name.
    #[must_use]
    pub fn name(&self) -> Option<SmolStr> {
        match self.kind() {
            CallKind::Method => self
                .0
                .children()
                .find(|n| n.kind() == SyntaxKind::NameRef)
                .and_then(|n| first_ident(&n))
                .map(|t| SmolStr::new(t.text())),
            CallKind::Macro | CallKind::Function => {
                let path = self.0.children().find(|n| n.kind() == SyntaxKind::Path)?;
                last_segment(&path).map(|t| SmolStr::new(t.text()))
            }
        }
    }

    /// The receiver expression of a method call.
    #[must_use]
    pub fn receiver(&self) -> Option<SyntaxNode> {
        if self.kind() != CallKind::Method {
            return None;
        }
        self.0.first_child()
    }

    /// The argument list node.
    #[must_use]
    pub fn arg_list(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::ArgList)
            .last()
    }

    /// The top-level `Arg` nodes, in source order.
    #[must_use]
    pub fn args(&self) -> Vec<SyntaxNode> {
        self.arg_list()
            .map(|list| {
                list.children()
                    .filter(|n| n.kind() == SyntaxKind::Arg)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Offsets a caller location may point at for this call: the start of
    /// the whole call, plus the method name for method calls.
    #[must_use]
    pub fn anchors(&self) -> Vec<TextSize> {
        let mut anchors = vec![self.0.text_range().start()];
        if self.kind() == CallKind::Method {
            if let Some(name) = self.0.children().find(|n| n.kind() == SyntaxKind::NameRef) {
                anchors.push(name.text_range().start());
            }
        }
        anchors
    }
}

/// A `FnDef` node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FnDef(SyntaxNode);

impl FnDef {
    /// Wraps `node` if it is a function definition.
    #[must_use]
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        (node.kind() == SyntaxKind::FnDef).then_some(Self(node))
    }

    /// The underlying node.
    #[must_use]
    pub fn syntax(&self) -> &SyntaxNode {
        &self.0
    }

    /// The function name.
    #[must_use]
    pub fn name(&self) -> Option<SmolStr> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::Name)
            .and_then(|n| first_ident(&n))
            .map(|t| SmolStr::new(t.text()))
    }

    /// The body block, absent for declarations such as `fn f();`.
    #[must_use]
    pub fn body(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() == SyntaxKind::Block)
    }

    /// The impl block this function is a method of, if any.
    #[must_use]
    pub fn parent_impl(&self) -> Option<ImplDef> {
        let list = self.0.parent()?;
        if list.kind() != SyntaxKind::ItemList {
            return None;
        }
        ImplDef::cast(list.parent()?)
    }
}

/// An `ImplDef` node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImplDef(SyntaxNode);

impl ImplDef {
    /// Wraps `node` if it is an impl block.
    #[must_use]
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        (node.kind() == SyntaxKind::ImplDef).then_some(Self(node))
    }

    /// The last path segment of the implementing type: `Foo` for both
    /// `impl Foo` and `impl<T> fmt::Display for a::Foo<T>`.
    #[must_use]
    pub fn self_type_name(&self) -> Option<SmolStr> {
        let mut depth = 0usize;
        let mut name: Option<SyntaxToken> = None;

        for token in self
            .0
            .children_with_tokens()
            .filter_map(rowan::NodeOrToken::into_token)
        {
            match token.kind() {
                SyntaxKind::Lt => depth += 1,
                SyntaxKind::Gt => depth = depth.saturating_sub(1),
                SyntaxKind::KwFor if depth == 0 => name = None,
                SyntaxKind::KwWhere => break,
                SyntaxKind::Ident | SyntaxKind::KwSelfType if depth == 0 => name = Some(token),
                _ => {}
            }
        }

        name.map(|t| SmolStr::new(t.text()))
    }
}

fn first_ident(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(rowan::NodeOrToken::into_token)
        .find(|t| t.kind() == SyntaxKind::Ident || t.kind() == SyntaxKind::IntLiteral)
}

fn last_segment(path: &SyntaxNode) -> Option<SyntaxToken> {
    path.children_with_tokens()
        .filter_map(rowan::NodeOrToken::into_token)
        .filter(|t| {
            matches!(
                t.kind(),
                SyntaxKind::Ident
                    | SyntaxKind::KwSelfValue
                    | SyntaxKind::KwSelfType
                    | SyntaxKind::KwCrate
                    | SyntaxKind::KwSuper
            )
        })
        .last()
}
