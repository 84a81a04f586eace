//! Exact solver for conditions of the form `argument ≥ 0`, `argument > 0` and `argument ≠ 0`.
//!
//! The real line is cut at every point where the argument may change sign or definedness: its
//! zeros, the poles of its rational parts, and the boundaries of the square roots and logarithms
//! it contains. The condition is then checked exactly at each of those points, and at one
//! rational point inside each piece between them. The argument keeps its sign on each piece, so
//! checking one point decides the whole piece.

use crate::{
    condition::{Condition, Relation},
    error::{Error, UnsolvableCondition},
    expr::Expr,
    poly::RationalFn,
    primitive::rat,
    real::ExactReal,
    set::{Bound, Endpoint, Interval, SolutionSet},
};
use rug::Rational;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Why a condition could not be solved.
type Reason = &'static str;

/// Solves the condition exactly over the real numbers.
///
/// Points where the argument is undefined never satisfy the condition. Fails with
/// [`UnsolvableCondition`] when the argument involves something this solver cannot handle exactly,
/// such as a polynomial of degree three or more without rational roots, or a sum involving square
/// roots or logarithms.
pub fn solve(condition: &Condition) -> Result<SolutionSet, Error> {
    let expr = Expr::from(&condition.argument);
    solve_expr(&expr, condition.relation).map_err(|reason| {
        warn!(%condition, reason, "condition cannot be solved exactly");
        Error::new(vec![condition.argument.span()], UnsolvableCondition { reason })
    })
}

/// Solves `expr <relation> 0`.
fn solve_expr(expr: &Expr, relation: Relation) -> Result<SolutionSet, Reason> {
    let zero = rat(0);
    let mut points = boundaries(expr)?;
    points.extend(level_set(expr, &zero)?);
    points.sort();
    points.dedup();
    debug!(%expr, points = points.len(), "critical points found");

    let holds = |x: &ExactReal| -> Result<bool, Reason> {
        Ok(match cmp_at(expr, &zero, x)? {
            None => false,
            Some(ordering) => match relation {
                Relation::GreaterEq => ordering != Ordering::Less,
                Relation::Greater => ordering == Ordering::Greater,
                Relation::NotEq => ordering != Ordering::Equal,
            },
        })
    };

    let mut pieces = Vec::with_capacity(points.len() * 2 + 1);
    let mut lower = Endpoint::NegInfinity;
    for (i, point) in points.iter().enumerate() {
        let sample = match i {
            0 => rat(point.floor() - 1u32),
            _ => points[i - 1].rational_between(point)
                .ok_or("critical points are too close to separate")?,
        };
        if holds(&ExactReal::rational(sample))? {
            pieces.extend(Interval::new(Bound::open(lower.clone()), Bound::open(point.clone())));
        }
        if holds(point)? {
            pieces.push(Interval::point(point.clone()));
        }
        lower = Endpoint::Finite(point.clone());
    }

    let sample = match points.last() {
        Some(last) => rat(last.floor() + 1u32),
        None => rat(0),
    };
    if holds(&ExactReal::rational(sample))? {
        pieces.extend(Interval::new(Bound::open(lower), Bound::open(Endpoint::PosInfinity)));
    }

    Ok(SolutionSet::from_intervals(pieces))
}

/// The ways an argument is handled by the solver.
enum Shape<'a> {
    /// A quotient of polynomials.
    Rational(RationalFn),

    /// `sqrt(v)`
    Sqrt(&'a Expr),

    /// `log(v)`
    Log(&'a Expr),

    /// `k·g` with `k` a non-zero rational.
    Scaled(Rational, &'a Expr),

    /// A product of several factors that are not all rational.
    Product(&'a [Expr]),

    /// `b^n` with `b` not rational and `n` an integer.
    Power(&'a Expr, i32),
}

fn shape(expr: &Expr) -> Result<Shape, Reason> {
    if let Some(f) = expr.to_rational_fn() {
        return Ok(Shape::Rational(f));
    }

    match expr {
        Expr::Primary(_) => match expr.as_unary_call() {
            Some(("sqrt", arg)) => Ok(Shape::Sqrt(arg)),
            Some(("log", arg)) => Ok(Shape::Log(arg)),
            Some(_) => Err("unknown function"),
            None => Err("unknown symbol or function"),
        },
        Expr::Add(_) => Err("sum involving a square root or a logarithm"),
        Expr::Mul(factors) => {
            let mut constant = rat(1);
            let mut rest = Vec::new();
            for factor in factors {
                match factor.to_rational_fn().and_then(|f| f.as_constant()) {
                    Some(c) => constant *= c,
                    None => rest.push(factor),
                }
            }

            match rest.as_slice() {
                [single] if constant != 0 => Ok(Shape::Scaled(constant, single)),
                _ => Ok(Shape::Product(factors)),
            }
        },
        Expr::Exp(base, exp) => match exp.as_small_integer() {
            Some(n) => Ok(Shape::Power(base, n)),
            None => Err("exponent that is not an integer"),
        },
    }
}

/// The exact points where `expr = c`. An expression equal to `c` on a whole piece contributes no
/// points.
fn level_set(expr: &Expr, c: &Rational) -> Result<Vec<ExactReal>, Reason> {
    match shape(expr)? {
        Shape::Rational(f) => {
            let diff = f.numer.sub(&f.denom.scale(c));
            if diff.is_zero() {
                return Ok(Vec::new());
            }
            diff.real_roots().ok_or("polynomial of degree 3 or more without rational roots")
        },
        Shape::Sqrt(arg) => {
            if *c < 0 {
                Ok(Vec::new())
            } else {
                level_set(arg, &rat(c.square_ref()))
            }
        },
        Shape::Log(arg) => {
            if *c == 0 {
                level_set(arg, &rat(1))
            } else {
                Err("logarithm equal to a non-zero constant")
            }
        },
        Shape::Scaled(k, inner) => level_set(inner, &rat(c / &k)),
        Shape::Product(factors) => {
            if *c != 0 {
                return Err("product equal to a non-zero constant");
            }
            let mut points = Vec::new();
            for factor in factors {
                points.extend(level_set(factor, c)?);
            }
            Ok(points)
        },
        Shape::Power(base, n) => {
            if *c != 0 {
                Err("power equal to a non-zero constant")
            } else if n > 0 {
                level_set(base, c)
            } else {
                Ok(Vec::new())
            }
        },
    }
}

/// The exact points where `expr` may become defined or undefined.
fn boundaries(expr: &Expr) -> Result<Vec<ExactReal>, Reason> {
    let zero = rat(0);
    match shape(expr)? {
        Shape::Rational(f) => {
            if f.denom.is_zero() || f.denom.as_constant().is_some() {
                return Ok(Vec::new());
            }
            f.denom.real_roots().ok_or("denominator of degree 3 or more without rational roots")
        },
        Shape::Sqrt(arg) | Shape::Log(arg) => {
            let mut points = boundaries(arg)?;
            points.extend(level_set(arg, &zero)?);
            Ok(points)
        },
        Shape::Scaled(_, inner) => boundaries(inner),
        Shape::Product(factors) => {
            let mut points = Vec::new();
            for factor in factors {
                points.extend(boundaries(factor)?);
            }
            Ok(points)
        },
        Shape::Power(base, n) => {
            let mut points = boundaries(base)?;
            if n < 0 {
                points.extend(level_set(base, &zero)?);
            }
            Ok(points)
        },
    }
}

/// Compares `expr` with `c` at the exact point `x`. Returns [`None`] if `expr` is undefined at `x`.
fn cmp_at(expr: &Expr, c: &Rational, x: &ExactReal) -> Result<Option<Ordering>, Reason> {
    let zero = rat(0);
    match shape(expr)? {
        Shape::Rational(f) => Ok(f.cmp_at(c, x)),
        Shape::Sqrt(arg) => match cmp_at(arg, &zero, x)? {
            None | Some(Ordering::Less) => Ok(None),
            // √v is defined and non-negative; when c ≥ 0, √v compares with c as v with c²
            Some(_) if *c < 0 => Ok(Some(Ordering::Greater)),
            Some(_) => cmp_at(arg, &rat(c.square_ref()), x),
        },
        Shape::Log(arg) => {
            if *c != 0 {
                return Err("logarithm compared with a non-zero constant");
            }
            match cmp_at(arg, &zero, x)? {
                Some(Ordering::Greater) => cmp_at(arg, &rat(1), x),
                _ => Ok(None),
            }
        },
        Shape::Scaled(k, inner) => {
            let ordering = cmp_at(inner, &rat(c / &k), x)?;
            Ok(if k < 0 { ordering.map(Ordering::reverse) } else { ordering })
        },
        Shape::Product(factors) => {
            if *c != 0 {
                return Err("product compared with a non-zero constant");
            }
            let mut sign = Some(Ordering::Greater);
            for factor in factors {
                let factor_sign = cmp_at(factor, &zero, x)?;
                sign = match (sign, factor_sign) {
                    (_, None) | (None, _) => None,
                    (Some(a), Some(b)) => Some(mul_signs(a, b)),
                };
            }
            Ok(sign)
        },
        Shape::Power(base, n) => {
            if *c != 0 {
                return Err("power compared with a non-zero constant");
            }
            Ok(match cmp_at(base, &zero, x)? {
                None => None,
                Some(Ordering::Equal) if n < 0 => None,
                Some(_) if n == 0 => Some(Ordering::Greater),
                Some(sign) if n % 2 == 0 => Some(mul_signs(sign, sign)),
                sign => sign,
            })
        },
    }
}

/// The sign of a product, from the signs of its two factors.
fn mul_signs(a: Ordering, b: Ordering) -> Ordering {
    match (a, b) {
        (Ordering::Equal, _) | (_, Ordering::Equal) => Ordering::Equal,
        (a, b) if a == b => Ordering::Greater,
        _ => Ordering::Less,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{
        component::{extract, ComponentKind},
        notation::{render, Notation},
    };
    use super::*;

    /// Solves the condition of the first component of the given kind, and renders the result.
    fn solved(expr: &str, kind: ComponentKind) -> String {
        let component = extract(expr).unwrap()
            .into_iter()
            .find(|component| component.kind == kind)
            .unwrap();
        let set = solve(&Condition::from(&component)).unwrap();
        render(&set, Notation::French)
    }

    fn unsolvable(expr: &str, kind: ComponentKind) -> bool {
        let component = extract(expr).unwrap()
            .into_iter()
            .find(|component| component.kind == kind)
            .unwrap();
        solve(&Condition::from(&component)).unwrap_err().is::<UnsolvableCondition>()
    }

    #[test]
    fn linear_root() {
        assert_eq!(solved("sqrt(x-2)", ComponentKind::Root), "[2,+∞[");
        assert_eq!(solved("sqrt(3-x)", ComponentKind::Root), "]-∞,3]");
    }

    #[test]
    fn root_in_denominator() {
        assert_eq!(solved("1/sqrt(x-2)", ComponentKind::Denominator), "]2,+∞[");
    }

    #[test]
    fn linear_log() {
        assert_eq!(solved("log(2*x+1)", ComponentKind::Log), "]-1/2,+∞[");
    }

    #[test]
    fn quadratic_root() {
        assert_eq!(solved("sqrt(x^2-4)", ComponentKind::Root), "]-∞,-2] ∪ [2,+∞[");
        assert_eq!(solved("sqrt(4-x^2)", ComponentKind::Root), "[-2,2]");
        assert_eq!(solved("sqrt(x^2+1)", ComponentKind::Root), "ℝ");
        assert_eq!(solved("sqrt(-x^2-1)", ComponentKind::Root), "∅");
        assert_eq!(solved("sqrt(-x^2)", ComponentKind::Root), "{0}");
    }

    #[test]
    fn surd_boundaries() {
        assert_eq!(solved("sqrt(x^2-x-1)", ComponentKind::Root), "]-∞,(1-√5)/2] ∪ [(1+√5)/2,+∞[");
        assert_eq!(solved("log(2-x^2)", ComponentKind::Log), "]-√2,√2[");
    }

    #[test]
    fn denominators() {
        assert_eq!(solved("1/(x^2-4)", ComponentKind::Denominator), "]-∞,-2[ ∪ ]-2,2[ ∪ ]2,+∞[");
        assert_eq!(solved("1/(x^2+1)", ComponentKind::Denominator), "ℝ");
        assert_eq!(solved("1/(1/x)", ComponentKind::Denominator), "]-∞,0[ ∪ ]0,+∞[");
    }

    #[test]
    fn rational_argument() {
        assert_eq!(solved("sqrt((x-1)/(x+2))", ComponentKind::Root), "]-∞,-2[ ∪ [1,+∞[");
    }

    #[test]
    fn nested_root_and_log() {
        assert_eq!(solved("sqrt(log(x))", ComponentKind::Root), "[1,+∞[");
        assert_eq!(solved("log(sqrt(x))", ComponentKind::Log), "]0,+∞[");
        assert_eq!(solved("log(-sqrt(x))", ComponentKind::Log), "∅");
    }

    #[test]
    fn products() {
        assert_eq!(solved("sqrt((x-1)*sqrt(x))", ComponentKind::Root), "{0} ∪ [1,+∞[");
    }

    #[test]
    fn unsolvable_conditions() {
        assert!(unsolvable("sqrt(x^3-2)", ComponentKind::Root));
        assert!(unsolvable("sqrt(sqrt(x)-1)", ComponentKind::Root));
        assert!(unsolvable("sqrt(x^0.5)", ComponentKind::Root));
        assert!(unsolvable("sqrt(exp(x))", ComponentKind::Root));
    }
}
