//! Syntax tree types for Rust source text.
//!
//! This module provides the `rowan`-based syntax tree implementation,
//! including the `SyntaxKind` enum that covers both tokens and composite nodes.

use crate::lexer::TokenKind;
use crate::token_kinds::for_each_token_kind;

macro_rules! define_syntax_kind {
    ($($token:ident),* $(,)?) => {
        /// All syntax node and token kinds.
        ///
        /// This enum includes both token kinds (from the lexer) and composite
        /// node kinds (produced by the parser).
        // Variants mirror lexer/token names; documenting each would be noisy.
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum SyntaxKind {
            // =========================================================================
            // TOKEN KINDS (mirrors TokenKind)
            // =========================================================================
            $($token,)*

            // COMPOSITE NODE KINDS (produced by parser)
            // =========================================================================
            /// Root node of a source file
            SourceFile,

            /// Root node of a standalone expression fragment
            ExprSource,

            /// A function definition: `fn name(...) -> T { ... }`
            FnDef,

            /// A name introduced by a definition
            Name,

            /// A function parameter list: `(a: u8, b: &str)`
            ParamList,

            /// A single parameter
            Param,

            /// A return type: `-> T`
            RetType,

            /// An impl block: `impl Trait for Type { ... }`
            ImplDef,

            /// A trait definition: `trait Name { ... }`
            TraitDef,

            /// A module: `mod name { ... }` or `mod name;`
            ModDef,

            /// A use declaration: `use a::b as c;`
            UseItem,

            /// Any other item (struct, enum, const, static, type, item macro, ...)
            OtherItem,

            /// The `{ ... }` body of an impl, trait, mod or extern block
            ItemList,

            /// An attribute: `#[...]` or `#![...]`
            Attr,

            /// A visibility qualifier: `pub`, `pub(crate)`
            Visibility,

            /// A block expression: `{ ... }`
            Block,

            /// A `let` statement
            LetStmt,

            /// An expression statement
            ExprStmt,

            /// A path: `a::b::<T>::c`
            Path,

            /// Generic arguments: `<T, U>`
            GenericArgs,

            /// A path used as an expression
            PathExpr,

            /// A literal
            Literal,

            /// A macro invocation: `name!(...)`
            MacroCall,

            /// A call: `callee(...)`
            CallExpr,

            /// A method call: `receiver.name(...)`
            MethodCallExpr,

            /// A referenced name (method or field)
            NameRef,

            /// A field access: `a.b`, `t.0`
            FieldExpr,

            /// An index expression: `a[i]`
            IndexExpr,

            /// A try expression: `a?`
            TryExpr,

            /// Arguments of a call or macro invocation
            ArgList,

            /// One top-level argument
            Arg,

            /// A parenthesized expression: `(a)`
            ParenExpr,

            /// A tuple: `()`, `(a,)`, `(a, b)`
            TupleExpr,

            /// An array: `[a, b]`, `[0; 4]`
            ArrayExpr,

            /// One element of a tuple or array
            Elem,

            /// Closure parameters: `|a, b|`
            ClosureParams,

            /// An unstructured delimited token group
            TokenTree,
        }
    };
}

for_each_token_kind!(define_syntax_kind);

impl SyntaxKind {
    /// Returns `true` if this is a trivia kind.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment
        )
    }

    /// Returns `true` if this is a token kind (not a composite node).
    #[must_use]
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::Eof as u16)
    }

    /// Returns `true` if this is a composite node kind.
    #[must_use]
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns `true` for the three call-like node kinds.
    #[must_use]
    pub fn is_call(self) -> bool {
        matches!(
            self,
            Self::MacroCall | Self::CallExpr | Self::MethodCallExpr
        )
    }

    /// Returns `true` for literal tokens, including `true` and `false`.
    #[must_use]
    pub fn is_literal_token(self) -> bool {
        matches!(
            self,
            Self::IntLiteral
                | Self::FloatLiteral
                | Self::CharLiteral
                | Self::StringLiteral
                | Self::RawStringLiteral
                | Self::KwTrue
                | Self::KwFalse
        )
    }
}

macro_rules! map_token_kinds {
    ($($name:ident),* $(,)?) => {
        impl From<TokenKind> for SyntaxKind {
            fn from(kind: TokenKind) -> Self {
                match kind {
                    $(TokenKind::$name => SyntaxKind::$name,)*
                }
            }
        }
    };
}

for_each_token_kind!(map_token_kinds);

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// The language type for Rust source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RustLanguage {}

macro_rules! define_syntax_kinds {
    ($($token:ident),* $(,)?) => {
        const SYNTAX_KINDS: &[SyntaxKind] = &[
            $(SyntaxKind::$token,)*
            SyntaxKind::SourceFile,
            SyntaxKind::ExprSource,
            SyntaxKind::FnDef,
            SyntaxKind::Name,
            SyntaxKind::ParamList,
            SyntaxKind::Param,
            SyntaxKind::RetType,
            SyntaxKind::ImplDef,
            SyntaxKind::TraitDef,
            SyntaxKind::ModDef,
            SyntaxKind::UseItem,
            SyntaxKind::OtherItem,
            SyntaxKind::ItemList,
            SyntaxKind::Attr,
            SyntaxKind::Visibility,
            SyntaxKind::Block,
            SyntaxKind::LetStmt,
            SyntaxKind::ExprStmt,
            SyntaxKind::Path,
            SyntaxKind::GenericArgs,
            SyntaxKind::PathExpr,
            SyntaxKind::Literal,
            SyntaxKind::MacroCall,
            SyntaxKind::CallExpr,
            SyntaxKind::MethodCallExpr,
            SyntaxKind::NameRef,
            SyntaxKind::FieldExpr,
            SyntaxKind::IndexExpr,
            SyntaxKind::TryExpr,
            SyntaxKind::ArgList,
            SyntaxKind::Arg,
            SyntaxKind::ParenExpr,
            SyntaxKind::TupleExpr,
            SyntaxKind::ArrayExpr,
            SyntaxKind::Elem,
            SyntaxKind::ClosureParams,
            SyntaxKind::TokenTree,
        ];
    };
}

for_each_token_kind!(define_syntax_kinds);

impl rowan::Language for RustLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SYNTAX_KINDS
            .get(raw.0 as usize)
            .copied()
            .unwrap_or(SyntaxKind::Error)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// A syntax node in the syntax tree.
pub type SyntaxNode = rowan::SyntaxNode<RustLanguage>;

/// A syntax token in the syntax tree.
pub type SyntaxToken = rowan::SyntaxToken<RustLanguage>;

/// A syntax element (either node or token) in the syntax tree.
pub type SyntaxElement = rowan::SyntaxElement<RustLanguage>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn test_token_kind_to_syntax_kind() {
        assert_eq!(SyntaxKind::from(TokenKind::KwFn), SyntaxKind::KwFn);
        assert_eq!(SyntaxKind::from(TokenKind::Ident), SyntaxKind::Ident);
        assert_eq!(SyntaxKind::from(TokenKind::Eof), SyntaxKind::Eof);
    }

    #[test]
    fn test_is_trivia() {
        assert!(SyntaxKind::Whitespace.is_trivia());
        assert!(SyntaxKind::LineComment.is_trivia());
        assert!(SyntaxKind::BlockComment.is_trivia());
        assert!(!SyntaxKind::Ident.is_trivia());
    }

    #[test]
    fn test_is_token_vs_node() {
        assert!(SyntaxKind::Ident.is_token());
        assert!(SyntaxKind::KwIf.is_token());
        assert!(!SyntaxKind::MacroCall.is_token());
        assert!(!SyntaxKind::SourceFile.is_token());

        assert!(!SyntaxKind::Ident.is_node());
        assert!(SyntaxKind::CallExpr.is_node());
    }

    #[test]
    fn test_raw_round_trip_covers_every_kind() {
        for kind in SYNTAX_KINDS {
            let raw = RustLanguage::kind_to_raw(*kind);
            assert_eq!(RustLanguage::kind_from_raw(raw), *kind);
        }
        assert_eq!(
            SYNTAX_KINDS.last().copied(),
            Some(SyntaxKind::TokenTree)
        );
    }
}
