use std::ops::Range;
use super::{
    error::{kind, Error},
    expr::Expr,
    token::{CloseParen, OpenParen},
    Parse,
    Parser,
};
use crate::tokenizer::TokenKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this expression was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression, stripping any number of nested parentheses.
    pub fn innermost(&self) -> &Expr {
        self.expr.innermost()
    }
}

/// Parses the inside of a pair of parentheses whose opening parenthesis has already been
/// consumed, including the closing parenthesis. Shared by [`Paren`] and function calls.
pub(crate) fn parse_closing<T, F>(
    input: &mut Parser,
    open_paren: &OpenParen,
    inner: F,
) -> Result<(T, Range<usize>), Error>
where
    F: FnOnce(&mut Parser) -> Result<T, Error>,
{
    let mut ahead = input.clone();
    if matches!(ahead.next_token(), Ok(token) if token.kind == TokenKind::CloseParen) {
        let end = ahead.prev_token().map_or(open_paren.span.end, |token| token.span.end);
        return Err(Error::new(vec![open_paren.span.start..end], kind::EmptyParenthesis));
    }

    let value = inner(input)?;
    let close_paren = input.try_parse::<CloseParen>()
        .map_err(|_| Error::new(vec![open_paren.span.clone()], kind::UnclosedParenthesis { opening: true }))?;
    Ok((value, open_paren.span.start..close_paren.span.end))
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;
        let (expr, span) = parse_closing(input, &open_paren, |input| input.try_parse::<Expr>())?;
        Ok(Self {
            expr: Box::new(expr),
            span,
        })
    }
}
