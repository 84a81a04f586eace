use std::ops::Range;
use crate::{
    parser::{
        binary::Binary,
        call::Call,
        error::{kind, Error},
        iter::ExprIter,
        literal::Literal,
        paren::Paren,
        unary::Unary,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a general expression over the variable `x`.
///
/// This is the right-hand side of a function declaration such as `f(x) = 1/sqrt(x - 2)`, and
/// the argument of every square root, logarithm and denominator found in it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `sqrt(x)`.
    Call(Call),

    /// A unary operation, such as `-x`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// If this expression is an [`Expr::Paren`], returns the innermost expression in the
    /// parenthesis. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        let mut inner = self;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = input.try_parse_with_fn(Unary::parse_or_lower)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

/// Represents a primary expression.
///
/// Primary expressions are the simplest expressions, and are the building blocks of more complex
/// expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `log(x)`.
    Call(Call),
}

impl Primary {
    /// Returns the span of the primary expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Primary::Literal(literal) => literal.span(),
            Primary::Paren(paren) => paren.span(),
            Primary::Call(call) => call.span(),
        }
    }
}

impl Parse for Primary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        // a name directly followed by an opening parenthesis is always a function call; implicit
        // multiplication such as `x(x + 1)` has already been made explicit by the normalizer
        let mut ahead = input.clone();
        let first = ahead.next_token()?;
        let second = ahead.next_token().ok().map(|token| token.kind);

        match (first.kind, second) {
            (TokenKind::Name, Some(TokenKind::OpenParen)) => input.try_parse::<Call>().map(Self::Call),
            (TokenKind::Name | TokenKind::Int | TokenKind::Float, _) => {
                input.try_parse::<Literal>().map(Self::Literal)
            },
            (TokenKind::OpenParen, _) => input.try_parse::<Paren>().map(Self::Paren),
            (TokenKind::CloseParen, _) => Err(Error::new(
                vec![first.span],
                kind::UnclosedParenthesis { opening: false },
            )),
            (found, _) => Err(Error::new(vec![first.span], kind::UnexpectedToken {
                expected: &[
                    TokenKind::Int,
                    TokenKind::Float,
                    TokenKind::Name,
                    TokenKind::OpenParen,
                ],
                found,
            })),
        }
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
            Primary::Call(call) => Self::Call(call),
        }
    }
}
