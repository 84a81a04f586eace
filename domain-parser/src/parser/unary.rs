use std::ops::Range;
use crate::{
    parser::{
        binary::Binary,
        expr::{Expr, Primary},
        error::Error,
        token::op::UnaryOp,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-x`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or lower precedence expressions.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let mut ahead = input.clone();
        match ahead.next_token().map(|token| token.kind) {
            Ok(TokenKind::Sub | TokenKind::Add) => input.try_parse::<Self>().map(Expr::Unary),
            _ => input.try_parse::<Primary>().map(Expr::from),
        }
    }
}

impl Parse for Unary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let op = input.try_parse::<UnaryOp>()?;
        let start_span = op.span.start;

        // all unary operators are right-associative: parse the operand, including any operator
        // that binds tighter than this one (so `-x^2` is `-(x^2)`)
        let operand = {
            let lhs = Unary::parse_or_lower(input)?;
            Binary::parse_expr(input, lhs, op.precedence())?
        };
        let end_span = operand.span().end;
        Ok(Self {
            operand: Box::new(operand),
            op,
            span: start_span..end_span,
        })
    }
}
