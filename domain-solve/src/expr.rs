//! A representation of expressions in `x` that is easier to reason about than the AST.
//!
//! The [`Expr`](domain_parser::parser::expr::Expr) produced by `domain-parser` mirrors the source
//! text. This module flattens it into sums of terms and products of factors, turns subtraction
//! and negation into multiplication by `-1` and division into a power of `-1`, and stores every
//! number as an exact [`Rational`].

use crate::{
    poly::RationalFn,
    primitive::{int_from_str, rat, rat_from_decimal},
    real::ExactReal,
};
use domain_parser::parser::{
    expr::Expr as AstExpr,
    literal::Literal,
    token::op::{BinOpKind, UnaryOpKind},
};
use rug::Rational;
use std::fmt;

/// A single term / factor: a number, a symbol, or a function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    /// An exact number, such as `2` or `0.5`.
    Number(Rational),

    /// A symbol, such as `x`.
    Symbol(String),

    /// A function call, such as `sqrt(x - 2)`.
    Call(String, Vec<Expr>),
}

/// An expression with its terms and factors flattened out.
///
/// `x + (y + z)` is a single [`Expr::Add`] with three terms, and `x - 2` is the sum of `x` and
/// the product of `-1` and `2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<Expr>),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// An expression raised to a power.
    Exp(Box<Expr>, Box<Expr>),
}

impl Expr {
    fn number(value: impl Into<Rational>) -> Self {
        Self::Primary(Primary::Number(value.into()))
    }

    /// If the expression is a number, returns it.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// If the expression is a number with an integer value that fits in an `i32`, returns it.
    pub fn as_small_integer(&self) -> Option<i32> {
        let n = self.as_number()?;
        if *n.denom() != 1 {
            return None;
        }
        n.numer().to_i32()
    }

    /// If the expression is a call to a function with one argument, returns the function's name
    /// and the argument.
    pub fn as_unary_call(&self) -> Option<(&str, &Expr)> {
        match self {
            Self::Primary(Primary::Call(name, args)) => match args.as_slice() {
                [arg] => Some((name.as_str(), arg)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Adds a term, flattening nested sums.
    fn push_term(terms: &mut Vec<Expr>, term: Expr) {
        match term {
            Self::Add(inner) => terms.extend(inner),
            term => terms.push(term),
        }
    }

    /// Adds a factor, flattening nested products.
    fn push_factor(factors: &mut Vec<Expr>, factor: Expr) {
        match factor {
            Self::Mul(inner) => factors.extend(inner),
            factor => factors.push(factor),
        }
    }

    /// Returns `-self`.
    fn negate(self) -> Self {
        let mut factors = vec![Self::number(-1)];
        Self::push_factor(&mut factors, self);
        Self::Mul(factors)
    }

    /// Converts the expression into a quotient of polynomials in `x`, if it is one.
    ///
    /// Any other symbol, any function call, and any exponent that is not an integer make the
    /// expression something other than a rational function.
    pub fn to_rational_fn(&self) -> Option<RationalFn> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(RationalFn::constant(n.clone())),
            Self::Primary(Primary::Symbol(sym)) if sym == "x" => Some(RationalFn::x()),
            Self::Primary(_) => None,
            Self::Add(terms) => terms.iter().try_fold(RationalFn::constant(rat(0)), |acc, term| {
                Some(acc.add(&term.to_rational_fn()?))
            }),
            Self::Mul(factors) => factors.iter().try_fold(RationalFn::constant(rat(1)), |acc, factor| {
                Some(acc.mul(&factor.to_rational_fn()?))
            }),
            Self::Exp(base, exp) => {
                let exp = exp.as_small_integer().filter(|e| e.unsigned_abs() <= MAX_EXPONENT)?;
                Some(base.to_rational_fn()?.pow(exp))
            },
        }
    }

    /// Evaluates an expression with no variable to an exact real, such as `2√3` or `(1-√5)/2`.
    ///
    /// Returns [`None`] if the expression has a variable, divides by zero, takes the square root
    /// of a negative number, or mixes square roots of different radicands.
    pub fn eval_constant(&self) -> Option<ExactReal> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(ExactReal::rational(n.clone())),
            Self::Primary(Primary::Symbol(_)) => None,
            Self::Primary(Primary::Call(..)) => {
                let (name, arg) = self.as_unary_call()?;
                if name != "sqrt" {
                    return None;
                }
                let arg = arg.eval_constant()?;
                ExactReal::sqrt_of(arg.as_rational()?)
            },
            Self::Add(terms) => terms.iter().try_fold(ExactReal::zero(), |acc, term| {
                acc.checked_add(&term.eval_constant()?)
            }),
            Self::Mul(factors) => factors.iter().try_fold(ExactReal::rational(1), |acc, factor| {
                acc.checked_mul(&factor.eval_constant()?)
            }),
            Self::Exp(base, exp) => {
                let exp = exp.as_small_integer().filter(|e| e.unsigned_abs() <= MAX_EXPONENT)?;
                base.eval_constant()?.checked_pow(exp)
            },
        }
    }
}

/// Largest exponent expanded when converting to polynomials.
const MAX_EXPONENT: u32 = 64;

impl From<&AstExpr> for Expr {
    fn from(expr: &AstExpr) -> Self {
        match expr {
            AstExpr::Literal(Literal::Integer(int)) => match int_from_str(&int.value) {
                Some(n) => Self::number(n),
                None => Self::Primary(Primary::Symbol(int.value.clone())),
            },
            AstExpr::Literal(Literal::Float(float)) => match rat_from_decimal(&float.value) {
                Some(n) => Self::number(n),
                None => Self::Primary(Primary::Symbol(float.value.clone())),
            },
            AstExpr::Literal(Literal::Symbol(sym)) => Self::Primary(Primary::Symbol(sym.name.clone())),
            AstExpr::Paren(paren) => Self::from(paren.innermost()),
            AstExpr::Call(call) => {
                let args = call.args.iter().map(Self::from).collect();
                Self::Primary(Primary::Call(call.name.name.clone(), args))
            },
            AstExpr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => Self::from(&*unary.operand).negate(),
                UnaryOpKind::Pos => Self::from(&*unary.operand),
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::from(&*bin.lhs);
                let rhs = Self::from(&*bin.rhs);
                match bin.op.kind {
                    BinOpKind::Exp => Self::Exp(Box::new(lhs), Box::new(rhs)),
                    BinOpKind::Mul => {
                        let mut factors = Vec::new();
                        Self::push_factor(&mut factors, lhs);
                        Self::push_factor(&mut factors, rhs);
                        Self::Mul(factors)
                    },
                    BinOpKind::Div => {
                        // lhs * rhs^-1
                        let mut factors = Vec::new();
                        Self::push_factor(&mut factors, lhs);
                        factors.push(Self::Exp(Box::new(rhs), Box::new(Self::number(-1))));
                        Self::Mul(factors)
                    },
                    BinOpKind::Add => {
                        let mut terms = Vec::new();
                        Self::push_term(&mut terms, lhs);
                        Self::push_term(&mut terms, rhs);
                        Self::Add(terms)
                    },
                    BinOpKind::Sub => {
                        let mut terms = Vec::new();
                        Self::push_term(&mut terms, lhs);
                        Self::push_term(&mut terms, rhs.negate());
                        Self::Add(terms)
                    },
                }
            },
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(Primary::Number(n)) => write!(f, "{}", n),
            Self::Primary(Primary::Symbol(sym)) => write!(f, "{}", sym),
            Self::Primary(Primary::Call(name, args)) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            },
            Self::Add(terms) => {
                write!(f, "(")?;
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    write!(f, "{}", term)?;
                }
                write!(f, ")")
            },
            Self::Mul(factors) => {
                for (i, factor) in factors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "*")?;
                    }
                    write!(f, "{}", factor)?;
                }
                Ok(())
            },
            Self::Exp(base, exp) => write!(f, "{}^{}", base, exp),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use domain_parser::parser::Parser;
    use crate::poly::Poly;
    use super::*;

    fn parse(source: &str) -> Expr {
        let ast = Parser::new(source).try_parse_full::<AstExpr>().unwrap();
        Expr::from(&ast)
    }

    #[test]
    fn flattens_sums() {
        let expr = parse("x + (1 + x) - 2");
        let Expr::Add(terms) = expr else { panic!("expected a sum") };
        assert_eq!(terms.len(), 4);
    }

    #[test]
    fn rational_function() {
        let f = parse("(x - 1)/(x + 2)").to_rational_fn().unwrap();
        assert_eq!(f.numer, Poly::new(vec![rat(-1), rat(1)]));
        assert_eq!(f.denom, Poly::new(vec![rat(2), rat(1)]));
    }

    #[test]
    fn decimals_are_exact() {
        let f = parse("0.5*x").to_rational_fn().unwrap();
        assert_eq!(f.numer, Poly::new(vec![rat(0), rat((1, 2))]));
    }

    #[test]
    fn not_rational_functions() {
        assert_eq!(parse("sqrt(x)").to_rational_fn(), None);
        assert_eq!(parse("x^0.5").to_rational_fn(), None);
        assert_eq!(parse("a*x").to_rational_fn(), None);
    }

    #[test]
    fn constants() {
        assert_eq!(parse("2*sqrt(3)").eval_constant().unwrap().to_string(), "2√3");
        assert_eq!(parse("(1-sqrt(5))/2").eval_constant().unwrap().to_string(), "(1-√5)/2");
        assert_eq!(parse("sqrt(8)/2").eval_constant().unwrap().to_string(), "√2");
        assert_eq!(parse("1/0").eval_constant(), None);
        assert_eq!(parse("sqrt(2)+sqrt(3)").eval_constant(), None);
        assert_eq!(parse("x").eval_constant(), None);
    }
}
