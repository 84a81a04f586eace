//! Extraction of the sub-expressions that restrict the domain of a function.

use crate::error::{Error, WrongArgumentCount};
use domain_parser::parser::{
    expr::Expr,
    token::op::BinOpKind,
    Parser,
};
use std::fmt;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of restriction a sub-expression imposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComponentKind {
    /// The argument of a square root must be non-negative.
    Root,

    /// The argument of a logarithm must be positive.
    Log,

    /// The denominator must be non-zero.
    Denominator,
}

impl ComponentKind {
    /// The French name of the kind, as used in the dialogue.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Root => "racine carrée",
            Self::Log => "logarithme",
            Self::Denominator => "dénominateur",
        }
    }

    /// The function name that introduces this kind, if any.
    fn function(&self) -> Option<&'static str> {
        match self {
            Self::Root => Some("sqrt"),
            Self::Log => Some("log"),
            Self::Denominator => None,
        }
    }
}

/// A sub-expression of the function that restricts its domain.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Component {
    /// What kind of restriction applies.
    pub kind: ComponentKind,

    /// The restricted sub-expression: the argument of the root or logarithm, or the denominator.
    pub argument: Expr,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ComponentKind::Root => write!(f, "√({})", self.argument),
            ComponentKind::Log => write!(f, "log({})", self.argument),
            ComponentKind::Denominator => write!(f, "{}", self.argument),
        }
    }
}

/// Parses a normalized function expression and lists its restricting sub-expressions.
///
/// Square roots come first in the order they are written, then logarithms in the order they are
/// written, then the denominator. The denominator is the divisor of the last division that is not
/// nested inside parentheses or a function call, with its own parentheses removed. Identical
/// sub-expressions are listed as many times as they occur. An empty list means the function is
/// defined on all of `ℝ`.
pub fn extract(expr: &str) -> Result<Vec<Component>, Error> {
    let ast = Parser::new(expr).try_parse_full::<Expr>()?;
    extract_from(&ast)
}

/// Lists the restricting sub-expressions of an already parsed expression. See [`extract`].
pub fn extract_from(ast: &Expr) -> Result<Vec<Component>, Error> {
    let mut components = Vec::new();

    for kind in [ComponentKind::Root, ComponentKind::Log] {
        let mut calls = Vec::new();
        for node in ast.post_order_iter() {
            let Expr::Call(call) = node else { continue };
            if Some(call.name.name.as_str()) != kind.function() {
                continue;
            }

            let [arg] = call.args.as_slice() else {
                return Err(Error::new(vec![call.span()], WrongArgumentCount {
                    name: call.name.name.clone(),
                    found: call.args.len(),
                }));
            };
            calls.push((call.span.start, arg));
        }

        // post-order lists inner calls first; textual order lists outer calls first
        calls.sort_by_key(|(start, _)| *start);
        components.extend(calls.into_iter().map(|(_, arg)| Component {
            kind,
            argument: arg.clone(),
        }));
    }

    if let Some(divisor) = last_top_level_divisor(ast) {
        components.push(Component {
            kind: ComponentKind::Denominator,
            argument: divisor.innermost().clone(),
        });
    }

    debug!(count = components.len(), "extracted components");
    Ok(components)
}

/// Finds the right-hand side of the last division that is not nested in parentheses or a call.
fn last_top_level_divisor(expr: &Expr) -> Option<&Expr> {
    let mut stack = vec![expr];
    let mut last: Option<(usize, &Expr)> = None;

    while let Some(node) = stack.pop() {
        match node {
            Expr::Binary(bin) => {
                if bin.op.kind == BinOpKind::Div
                    && last.map_or(true, |(start, _)| bin.op.span.start > start)
                {
                    last = Some((bin.op.span.start, &*bin.rhs));
                }
                stack.push(&*bin.lhs);
                stack.push(&*bin.rhs);
            },
            Expr::Unary(unary) => stack.push(&*unary.operand),
            Expr::Literal(_) | Expr::Paren(_) | Expr::Call(_) => (),
        }
    }

    last.map(|(_, divisor)| divisor)
}
