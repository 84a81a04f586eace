use std::ops::Range;
use crate::parser::{
    error::Error,
    expr::Expr,
    token::op::BinOp,
    unary::Unary,
    Associativity,
    Parser,
    Precedence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    ///
    /// In `1 + 2 * 3`, the right-hand-side of `+` is first parsed as `2`. The following operator
    /// binds tighter than `+`, so the expression starting at `2` is parsed first, giving `2 * 3`.
    /// In `3 * 2 + 1`, the node `3 * 2` is built first, and [`Self::parse_expr`] picks up the
    /// `+ 1` part on its next iteration.
    fn complete_rhs(input: &mut Parser, lhs: Expr, op: BinOp, mut rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            // clone the input stream to emulate peeking
            let mut input_ahead = input.clone();
            let Ok(next_op) = input_ahead.try_parse::<BinOp>() else {
                break;
            };

            if next_op.precedence() > precedence || next_op.associativity() == Associativity::Right {
                rhs = Self::parse_expr(input, rhs, next_op.precedence())?;
            } else {
                // lower precedence, or equal precedence and left-associative, such as the `+` in
                // `1 * 2 + 3`; the caller handles it on its next iteration
                break;
            }
        }

        let span = lhs.span().start..rhs.span().end;
        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        }))
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there is a binary operator of at least the given precedence and a right-hand-side.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        loop {
            let mut input_ahead = input.clone();
            match input_ahead.try_parse::<BinOp>() {
                Ok(op) if op.precedence() >= precedence => {
                    input.set_cursor(&input_ahead);
                    let rhs = Unary::parse_or_lower(input)?;
                    lhs = Self::complete_rhs(input, lhs, op, rhs)?;
                },
                _ => break,
            }
        }

        Ok(lhs)
    }
}
