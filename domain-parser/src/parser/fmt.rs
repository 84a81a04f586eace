//! [`Display`] implementations for the syntax tree. The output is the form shown to students:
//! spaces around `+` and `-`, compact factors, juxtaposed coefficients (`2x`), and `√(…)` for
//! square roots.

use std::fmt::{Display, Formatter, Result};
use super::{
    binary::Binary,
    call::Call,
    expr::Expr,
    literal::Literal,
    paren::Paren,
    token::op::{BinOpKind, UnaryOpKind},
    unary::Unary,
};

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Literal::Integer(int) => write!(f, "{}", int.value),
            Literal::Float(float) => write!(f, "{}", float.value),
            Literal::Symbol(sym) => write!(f, "{}", sym.name),
        }
    }
}

impl Display for Paren {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "({})", self.expr)
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut Formatter) -> Result {
        if self.name.name == "sqrt" {
            write!(f, "√")?;
        } else {
            write!(f, "{}", self.name.name)?;
        }

        write!(f, "(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

impl Display for Unary {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self.op.kind {
            UnaryOpKind::Neg => write!(f, "-{}", self.operand),
            UnaryOpKind::Pos => write!(f, "+{}", self.operand),
        }
    }
}

/// Returns true if `lhs * rhs` reads naturally as `lhs rhs` with the operator left out, such as
/// `2x`, `3√(x)` or `2(x + 1)`.
fn is_juxtaposed(lhs: &Expr, rhs: &Expr) -> bool {
    let Expr::Literal(Literal::Integer(_) | Literal::Float(_)) = lhs else {
        return false;
    };

    match rhs {
        Expr::Literal(Literal::Symbol(_)) | Expr::Call(_) | Expr::Paren(_) => true,
        Expr::Binary(binary) if binary.op.kind == BinOpKind::Exp => {
            matches!(&*binary.lhs, Expr::Literal(Literal::Symbol(_)) | Expr::Paren(_))
        },
        _ => false,
    }
}

impl Display for Binary {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self.op.kind {
            BinOpKind::Add | BinOpKind::Sub => {
                write!(f, "{} {} {}", self.lhs, self.op.kind.symbol(), self.rhs)
            },
            BinOpKind::Mul if is_juxtaposed(&self.lhs, &self.rhs) => {
                write!(f, "{}{}", self.lhs, self.rhs)
            },
            kind => write!(f, "{}{}{}", self.lhs, kind.symbol(), self.rhs),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}
