//! Token definitions for Rust source text.
//!
//! The token set is deliberately coarse: it only distinguishes what call-site
//! recovery needs (delimiters, paths, literals, and a handful of keywords that
//! introduce items or block-like statements). Compound comparison and shift
//! operators such as `<=` or `>>` are never produced so that generic angle
//! brackets always come out as single `<` / `>` tokens.

use logos::Logos;

fn lex_block_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    lex_nested_comment(lex, b"/*", b"*/")
}

fn lex_nested_comment(lex: &mut logos::Lexer<TokenKind>, open: &[u8], close: &[u8]) -> bool {
    let mut depth = 1usize;
    let bytes = lex.remainder().as_bytes();
    let mut i = 0usize;

    while i + 1 < bytes.len() {
        if bytes[i] == open[0] && bytes[i + 1] == open[1] {
            depth += 1;
            i += 2;
            continue;
        }
        if bytes[i] == close[0] && bytes[i + 1] == close[1] {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lex.bump(i);
                return true;
            }
            continue;
        }
        i += 1;
    }

    lex.bump(bytes.len());
    false
}

/// Consumes the body of a raw string once its `r#*"` opener has matched.
fn lex_raw_string(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let hashes = lex.slice().bytes().filter(|b| *b == b'#').count();
    let bytes = lex.remainder().as_bytes();

    for (i, byte) in bytes.iter().enumerate() {
        if *byte != b'"' {
            continue;
        }
        let tail = bytes.get(i + 1..i + 1 + hashes);
        if tail.is_some_and(|tail| tail.iter().all(|b| *b == b'#')) {
            lex.bump(i + 1 + hashes);
            return true;
        }
    }

    lex.bump(bytes.len());
    false
}

/// All token kinds of Rust source text.
///
/// Token kinds are divided into categories:
/// - Trivia (whitespace, comments) - preserved but not semantically significant
/// - Punctuation and operators
/// - Keywords
/// - Literals and lifetimes
/// - Identifiers
/// - Special tokens (errors, EOF)
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[derive(Default)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Whitespace (spaces, tabs, newlines)
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    /// Line comment, including doc comments: `// ...`, `/// ...`
    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    LineComment,

    /// Block comment: `/* ... */` (supports nesting).
    #[token("/*", lex_block_comment)]
    BlockComment,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    /// `;`
    #[token(";")]
    Semi,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `..`
    #[token("..")]
    DotDot,

    /// `...`
    #[token("...")]
    DotDotDot,

    /// `..=`
    #[token("..=")]
    DotDotEq,

    /// `:`
    #[token(":")]
    Colon,

    /// `::`
    #[token("::")]
    ColonColon,

    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// `[`
    #[token("[")]
    LBracket,

    /// `]`
    #[token("]")]
    RBracket,

    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `#`
    #[token("#")]
    Pound,

    /// `!`
    #[token("!")]
    Bang,

    /// `?`
    #[token("?")]
    Question,

    /// `@`
    #[token("@")]
    At,

    /// `$`
    #[token("$")]
    Dollar,

    /// `~`
    #[token("~")]
    Tilde,

    /// `=`
    #[token("=")]
    Eq,

    /// `==`
    #[token("==")]
    EqEq,

    /// `!=`
    #[token("!=")]
    Neq,

    /// `<`
    #[token("<")]
    Lt,

    /// `>`
    #[token(">")]
    Gt,

    /// `->`
    #[token("->")]
    ThinArrow,

    /// `=>`
    #[token("=>")]
    FatArrow,

    /// `+`
    #[token("+")]
    Plus,

    /// `-`
    #[token("-")]
    Minus,

    /// `*`
    #[token("*")]
    Star,

    /// `/`
    #[token("/")]
    Slash,

    /// `%`
    #[token("%")]
    Percent,

    /// `^`
    #[token("^")]
    Caret,

    /// `&`
    #[token("&")]
    Amp,

    /// `&&`
    #[token("&&")]
    AmpAmp,

    /// `|`
    #[token("|")]
    Pipe,

    /// `||`
    #[token("||")]
    PipePipe,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    /// `as`
    #[token("as")]
    KwAs,

    /// `async`
    #[token("async")]
    KwAsync,

    /// `break`
    #[token("break")]
    KwBreak,

    /// `const`
    #[token("const")]
    KwConst,

    /// `continue`
    #[token("continue")]
    KwContinue,

    /// `crate`
    #[token("crate")]
    KwCrate,

    /// `dyn`
    #[token("dyn")]
    KwDyn,

    /// `else`
    #[token("else")]
    KwElse,

    /// `enum`
    #[token("enum")]
    KwEnum,

    /// `extern`
    #[token("extern")]
    KwExtern,

    /// `false`
    #[token("false")]
    KwFalse,

    /// `fn`
    #[token("fn")]
    KwFn,

    /// `for`
    #[token("for")]
    KwFor,

    /// `if`
    #[token("if")]
    KwIf,

    /// `impl`
    #[token("impl")]
    KwImpl,

    /// `in`
    #[token("in")]
    KwIn,

    /// `let`
    #[token("let")]
    KwLet,

    /// `loop`
    #[token("loop")]
    KwLoop,

    /// `match`
    #[token("match")]
    KwMatch,

    /// `mod`
    #[token("mod")]
    KwMod,

    /// `move`
    #[token("move")]
    KwMove,

    /// `mut`
    #[token("mut")]
    KwMut,

    /// `pub`
    #[token("pub")]
    KwPub,

    /// `ref`
    #[token("ref")]
    KwRef,

    /// `return`
    #[token("return")]
    KwReturn,

    /// `self`
    #[token("self")]
    KwSelfValue,

    /// `Self`
    #[token("Self")]
    KwSelfType,

    /// `static`
    #[token("static")]
    KwStatic,

    /// `struct`
    #[token("struct")]
    KwStruct,

    /// `super`
    #[token("super")]
    KwSuper,

    /// `trait`
    #[token("trait")]
    KwTrait,

    /// `true`
    #[token("true")]
    KwTrue,

    /// `type`
    #[token("type")]
    KwType,

    /// `unsafe`
    #[token("unsafe")]
    KwUnsafe,

    /// `use`
    #[token("use")]
    KwUse,

    /// `where`
    #[token("where")]
    KwWhere,

    /// `while`
    #[token("while")]
    KwWhile,

    // =========================================================================
    // LITERALS
    // =========================================================================
    /// Integer literal: `42`, `1_000u64`, `0xFF`, `0o17`, `0b1010`
    #[regex(r"[0-9][0-9_]*([iu](8|16|32|64|128|size))?")]
    #[regex(r"0x[0-9a-fA-F_]+([iu](8|16|32|64|128|size))?")]
    #[regex(r"0o[0-7_]+([iu](8|16|32|64|128|size))?")]
    #[regex(r"0b[01_]+([iu](8|16|32|64|128|size))?")]
    IntLiteral,

    /// Float literal: `1.5`, `2e10`, `1.0e-3f32`, `3f64`
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?(f32|f64)?")]
    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?[eE][+-]?[0-9_]+(f32|f64)?", priority = 7)]
    #[regex(r"[0-9][0-9_]*f(32|64)")]
    FloatLiteral,

    /// Character or byte literal: `'a'`, `'\n'`, `b'x'`, `'\u{1F600}'`
    #[regex(r#"b?'([^'\\\r\n]|\\([nrt0\\'"]|x[0-9a-fA-F]{2}|u\{[0-9a-fA-F_]{1,6}\}))'"#)]
    CharLiteral,

    /// String literal, including byte and C strings: `"hi"`, `b"raw bytes"`
    #[regex(r#"[bc]?"([^"\\]|\\(.|\n))*""#)]
    StringLiteral,

    /// Raw string literal: `r"..."`, `r#"..."#`, `br##"..."##`
    #[regex(r#"[bc]?r#*""#, lex_raw_string)]
    RawStringLiteral,

    /// Lifetime or loop label: `'a`, `'static`
    #[regex(r"'[A-Za-z_][A-Za-z0-9_]*")]
    Lifetime,

    // =========================================================================
    // IDENTIFIERS
    // =========================================================================
    /// Identifier, including raw identifiers such as `r#type`
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    #[regex(r"r#[\p{L}_][\p{L}\p{N}_]*")]
    Ident,

    // =========================================================================
    // SPECIAL TOKENS
    // =========================================================================
    /// Lexer error - unrecognized character or unterminated literal
    #[default]
    Error,

    /// End of file marker (not produced by lexer, added by parser)
    Eof,
}

impl TokenKind {
    /// Returns `true` if this token is trivia (whitespace or comment).
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment
        )
    }

    /// Returns `true` if this token is a keyword.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::KwAs
                | Self::KwAsync
                | Self::KwBreak
                | Self::KwConst
                | Self::KwContinue
                | Self::KwCrate
                | Self::KwDyn
                | Self::KwElse
                | Self::KwEnum
                | Self::KwExtern
                | Self::KwFalse
                | Self::KwFn
                | Self::KwFor
                | Self::KwIf
                | Self::KwImpl
                | Self::KwIn
                | Self::KwLet
                | Self::KwLoop
                | Self::KwMatch
                | Self::KwMod
                | Self::KwMove
                | Self::KwMut
                | Self::KwPub
                | Self::KwRef
                | Self::KwReturn
                | Self::KwSelfValue
                | Self::KwSelfType
                | Self::KwStatic
                | Self::KwStruct
                | Self::KwSuper
                | Self::KwTrait
                | Self::KwTrue
                | Self::KwType
                | Self::KwUnsafe
                | Self::KwUse
                | Self::KwWhere
                | Self::KwWhile
        )
    }

    /// Returns `true` if this token is a literal (numbers, chars, strings).
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IntLiteral
                | Self::FloatLiteral
                | Self::CharLiteral
                | Self::StringLiteral
                | Self::RawStringLiteral
        )
    }

    /// Returns `true` if this token is a string literal of any flavour.
    pub fn is_string(self) -> bool {
        matches!(self, Self::StringLiteral | Self::RawStringLiteral)
    }

    /// Returns `true` if this token can start a path segment.
    pub fn is_path_segment(self) -> bool {
        matches!(
            self,
            Self::Ident | Self::KwSelfValue | Self::KwSelfType | Self::KwCrate | Self::KwSuper
        )
    }

    /// Returns `true` for `(`, `[` and `{`.
    pub fn is_opening_delim(self) -> bool {
        matches!(self, Self::LParen | Self::LBracket | Self::LBrace)
    }

    /// Returns `true` for `)`, `]` and `}`.
    pub fn is_closing_delim(self) -> bool {
        matches!(self, Self::RParen | Self::RBracket | Self::RBrace)
    }

    /// Returns the closing delimiter paired with an opening one.
    pub fn closing_delim(self) -> Option<Self> {
        Some(match self {
            Self::LParen => Self::RParen,
            Self::LBracket => Self::RBracket,
            Self::LBrace => Self::RBrace,
            _ => return None,
        })
    }

    /// Returns `true` if this keyword opens a statement that ends with its
    /// brace group (`if`, `match`, `loop`, ...).
    pub fn starts_block_like(self) -> bool {
        matches!(
            self,
            Self::KwIf
                | Self::KwMatch
                | Self::KwLoop
                | Self::KwWhile
                | Self::KwFor
                | Self::KwUnsafe
                | Self::LBrace
                | Self::Lifetime
        )
    }
}

impl From<TokenKind> for rowan::SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        Self(kind as u16)
    }
}
