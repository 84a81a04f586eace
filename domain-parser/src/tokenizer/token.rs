use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
///
/// Several spellings map to the same kind (`*`, `×` and `·` are all [`TokenKind::Mul`], for
/// example); the normalizer relies on this to rewrite the input into its canonical spelling.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[regex(r"[ \t\n\r\u{00A0}]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    #[token("−")]
    Sub,

    #[token("*")]
    #[token("×")]
    #[token("·")]
    Mul,

    #[token("/")]
    #[token("÷")]
    Div,

    #[token("^")]
    #[token("**")]
    Exp,

    #[token("²")]
    Squared,

    #[token("³")]
    Cubed,

    #[token("√")]
    Radical,

    #[token(">=")]
    #[token("≥")]
    #[token("⩾")]
    #[token("=>")]
    GreaterEq,

    #[token(">")]
    Greater,

    #[token("<=")]
    #[token("≤")]
    #[token("⩽")]
    #[token("=<")]
    LessEq,

    #[token("<")]
    Less,

    #[token("!=")]
    #[token("≠")]
    #[token("=/=")]
    #[token("<>")]
    NotEq,

    #[token("=")]
    Assign,

    #[token("∪")]
    Union,

    #[token("∈")]
    In,

    #[token("∞")]
    Infinity,

    #[token("ℝ")]
    Reals,

    #[token("∅")]
    EmptySet,

    #[token("\\")]
    Minus,

    #[regex(r"[a-zA-Z_\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{00FF}]+")]
    Name,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("[")]
    OpenSquare,

    #[token("]")]
    CloseSquare,

    #[token("{")]
    OpenCurly,

    #[token("}")]
    CloseCurly,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]*\.[0-9]+")]
    Float,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    /// Returns true if the token is a number literal.
    pub fn is_number(self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Float)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}
