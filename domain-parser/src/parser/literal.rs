use std::ops::Range;
use super::{
    error::{kind, Error},
    token::{Float, Int, Name},
    Parse,
    Parser,
};
use crate::tokenizer::TokenKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An integer literal, such as `16`. The digits are kept as written so that later stages can
/// convert them exactly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitInt {
    /// The digits of the integer literal.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitInt {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Int>()?;
        Ok(Self {
            value: token.lexeme,
            span: token.span,
        })
    }
}

/// A decimal literal, such as `2.5` or `.5`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitFloat {
    /// The digits of the decimal literal, including the decimal point.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitFloat {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Float>()?;
        Ok(Self {
            value: token.lexeme,
            span: token.span,
        })
    }
}

/// A symbol / identifier literal. Symbols are used to represent the variable and function names.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Name>()?;
        Ok(Self {
            name: token.lexeme,
            span: token.span,
        })
    }
}

/// A literal value: any value that is written directly into the source code.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// An integer literal.
    Integer(LitInt),

    /// A decimal literal.
    Float(LitFloat),

    /// A symbol / identifier literal.
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Integer(int) => int.span.clone(),
            Literal::Float(float) => float.span.clone(),
            Literal::Symbol(name) => name.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let mut ahead = input.clone();
        let token = ahead.next_token()?;
        match token.kind {
            TokenKind::Int => input.try_parse::<LitInt>().map(Literal::Integer),
            TokenKind::Float => input.try_parse::<LitFloat>().map(Literal::Float),
            TokenKind::Name => input.try_parse::<LitSym>().map(Literal::Symbol),
            found => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Float, TokenKind::Name],
                found,
            })),
        }
    }
}
