//! The single list of token kinds shared by `TokenKind` and `SyntaxKind`.
//!
//! Order matters: `SyntaxKind` discriminants for tokens must match the
//! `TokenKind` discriminants one to one, and `Eof` must stay last.

macro_rules! for_each_token_kind {
    ($m:ident) => {
        $m! {
            Whitespace, LineComment, BlockComment, Semi, Comma, Dot, DotDot, DotDotDot,
            DotDotEq, Colon, ColonColon, LParen, RParen, LBracket, RBracket, LBrace,
            RBrace, Pound, Bang, Question, At, Dollar, Tilde, Eq, EqEq, Neq, Lt, Gt,
            ThinArrow, FatArrow, Plus, Minus, Star, Slash, Percent, Caret, Amp, AmpAmp,
            Pipe, PipePipe, KwAs, KwAsync, KwBreak, KwConst, KwContinue, KwCrate, KwDyn,
            KwElse, KwEnum, KwExtern, KwFalse, KwFn, KwFor, KwIf, KwImpl, KwIn, KwLet,
            KwLoop, KwMatch, KwMod, KwMove, KwMut, KwPub, KwRef, KwReturn, KwSelfValue,
            KwSelfType, KwStatic, KwStruct, KwSuper, KwTrait, KwTrue, KwType, KwUnsafe,
            KwUse, KwWhere, KwWhile, IntLiteral, FloatLiteral, CharLiteral, StringLiteral,
            RawStringLiteral, Lifetime, Ident, Error, Eof
        }
    };
}

pub(crate) use for_each_token_kind;
