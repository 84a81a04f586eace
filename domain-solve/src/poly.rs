//! Univariate polynomials and rational functions in `x` with exact rational coefficients.

use crate::{
    primitive::{divisors, int, rat},
    real::ExactReal,
};
use rug::{Integer, Rational};
use std::cmp::Ordering;

/// A polynomial in `x` with rational coefficients.
///
/// Coefficients are stored in ascending degree order, with no trailing zeros; the zero
/// polynomial has no coefficients at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly {
    coeffs: Vec<Rational>,
}

impl Poly {
    /// Creates a polynomial from its coefficients, in ascending degree order.
    pub fn new(mut coeffs: Vec<Rational>) -> Self {
        while coeffs.last().is_some_and(|c| *c == 0) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// A constant polynomial.
    pub fn constant(c: Rational) -> Self {
        Self::new(vec![c])
    }

    /// The polynomial `x`.
    pub fn x() -> Self {
        Self::new(vec![rat(0), rat(1)])
    }

    /// Returns true if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// The degree of the polynomial. The zero polynomial has no degree.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// If the polynomial is a constant (including zero), returns it.
    pub fn as_constant(&self) -> Option<Rational> {
        match self.coeffs.as_slice() {
            [] => Some(rat(0)),
            [c] => Some(c.clone()),
            _ => None,
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| {
                let a = self.coeffs.get(i).cloned().unwrap_or_default();
                let b = other.coeffs.get(i).cloned().unwrap_or_default();
                a + b
            })
            .collect();
        Self::new(coeffs)
    }

    pub fn neg(&self) -> Self {
        Self::new(self.coeffs.iter().map(|c| -c.clone()).collect())
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn scale(&self, factor: &Rational) -> Self {
        Self::new(self.coeffs.iter().map(|c| rat(c * factor)).collect())
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        let mut coeffs = vec![rat(0); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] += rat(a * b);
            }
        }
        Self::new(coeffs)
    }

    pub fn pow(&self, exp: u32) -> Self {
        (0..exp).fold(Self::constant(rat(1)), |acc, _| acc.mul(self))
    }

    /// Evaluates the polynomial at a rational point.
    pub fn eval(&self, x: &Rational) -> Rational {
        self.coeffs.iter().rev().fold(rat(0), |acc, c| acc * x + c)
    }

    /// Evaluates the polynomial at an exact real, staying in the field `ℚ(√d)` of the point.
    pub fn eval_exact(&self, x: &ExactReal) -> Option<ExactReal> {
        self.coeffs.iter().rev().try_fold(ExactReal::zero(), |acc, c| {
            acc.checked_mul(x)?.checked_add(&ExactReal::rational(c.clone()))
        })
    }

    /// Divides the polynomial by `x - root`, assuming `root` is a root. The remainder is dropped.
    fn deflate(&self, root: &Rational) -> Self {
        let mut quotient = vec![rat(0); self.coeffs.len().saturating_sub(1)];
        let mut carry = rat(0);
        for (i, c) in self.coeffs.iter().enumerate().rev().take(quotient.len()) {
            carry = carry * root + c;
            quotient[i - 1] = carry.clone();
        }
        Self::new(quotient)
    }

    /// Returns the polynomial with integer coefficients and the same roots.
    fn to_integer_coeffs(&self) -> Vec<Integer> {
        let lcm = self.coeffs.iter().fold(int(1), |acc, c| acc.lcm(c.denom()));
        self.coeffs.iter()
            .map(|c| {
                let scaled = rat(c * &lcm);
                scaled.numer().clone()
            })
            .collect()
    }

    /// Finds every real root of the polynomial exactly, in increasing order and without
    /// repetition.
    ///
    /// Rational roots are found with the rational root theorem. The factor left once they are
    /// divided out is solved with the quadratic formula if it has degree two. Returns [`None`] if a
    /// factor of degree three or more remains, or if the coefficients have too many divisors to
    /// search, and for the zero polynomial.
    pub fn real_roots(&self) -> Option<Vec<ExactReal>> {
        if self.is_zero() {
            return None;
        }

        let mut rest = self.clone();
        let mut roots = Vec::new();

        // zero is never found by the divisor search, since the constant term vanishes
        if rest.coeffs.first().is_some_and(|c| *c == 0) {
            roots.push(ExactReal::zero());
            let skip = rest.coeffs.iter().take_while(|c| **c == 0).count();
            rest = Self::new(rest.coeffs[skip..].to_vec());
        }

        if rest.degree().is_some_and(|d| d >= 3) {
            let ints = rest.to_integer_coeffs();
            let constant = ints.first()?;
            let leading = ints.last()?;
            let (p_divs, q_divs) = (divisors(constant)?, divisors(leading)?);

            for p in &p_divs {
                for q in &q_divs {
                    for candidate in [rat((p.clone(), q.clone())), -rat((p.clone(), q.clone()))] {
                        while rest.degree().is_some_and(|d| d >= 1) && rest.eval(&candidate) == 0 {
                            rest = rest.deflate(&candidate);
                            roots.push(ExactReal::rational(candidate.clone()));
                        }
                    }
                }
            }
        }

        match rest.coeffs.as_slice() {
            [] | [_] => (),
            [b, a] => roots.push(ExactReal::rational(-rat(b / a))),
            [c, b, a] => roots.extend(quadratic_roots(a, b, c)?),
            _ => return None,
        }

        roots.sort();
        roots.dedup();
        Some(roots)
    }
}

/// Real roots of `a·x² + b·x + c`, with `a != 0`.
fn quadratic_roots(a: &Rational, b: &Rational, c: &Rational) -> Option<Vec<ExactReal>> {
    let discriminant = rat(b.square_ref()) - rat(a * c) * 4u32;
    let two_a = rat(a * 2u32);
    let vertex = -rat(b / &two_a);

    match discriminant.cmp0() {
        Ordering::Less => Some(Vec::new()),
        Ordering::Equal => Some(vec![ExactReal::rational(vertex)]),
        Ordering::Greater => {
            let root = ExactReal::sqrt_of(&discriminant)?
                .checked_div(&ExactReal::rational(two_a))?;
            let vertex = ExactReal::rational(vertex);
            Some(vec![vertex.checked_sub(&root)?, vertex.checked_add(&root)?])
        },
    }
}

/// A quotient `P/Q` of two polynomials. No common factor is cancelled, so the poles of the
/// quotient are exactly the points where the written expression divides by zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RationalFn {
    pub numer: Poly,
    pub denom: Poly,
}

impl RationalFn {
    pub fn constant(c: Rational) -> Self {
        Self::from(Poly::constant(c))
    }

    pub fn x() -> Self {
        Self::from(Poly::x())
    }

    /// If the function is a constant with no pole, returns it.
    pub fn as_constant(&self) -> Option<Rational> {
        let numer = self.numer.as_constant()?;
        let denom = self.denom.as_constant()?;
        (denom != 0).then(|| numer / denom)
    }

    pub fn add(&self, other: &Self) -> Self {
        if self.denom == other.denom {
            return Self { numer: self.numer.add(&other.numer), denom: self.denom.clone() };
        }

        Self {
            numer: self.numer.mul(&other.denom).add(&other.numer.mul(&self.denom)),
            denom: self.denom.mul(&other.denom),
        }
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self {
            numer: self.numer.mul(&other.numer),
            denom: self.denom.mul(&other.denom),
        }
    }

    pub fn recip(&self) -> Self {
        Self { numer: self.denom.clone(), denom: self.numer.clone() }
    }

    pub fn pow(&self, exp: i32) -> Self {
        let base = if exp < 0 { self.recip() } else { self.clone() };
        Self {
            numer: base.numer.pow(exp.unsigned_abs()),
            denom: base.denom.pow(exp.unsigned_abs()),
        }
    }

    /// Compares `P(x)/Q(x)` with `c` at an exact point. Returns [`None`] at a pole.
    pub fn cmp_at(&self, c: &Rational, x: &ExactReal) -> Option<Ordering> {
        let denom = self.denom.eval_exact(x)?;
        if denom.is_zero() {
            return None;
        }

        // sign(P/Q - c) = sign(P - cQ) · sign(Q)
        let diff = self.numer.sub(&self.denom.scale(c)).eval_exact(x)?;
        Some(match denom.signum() {
            Ordering::Less => diff.signum().reverse(),
            _ => diff.signum(),
        })
    }
}

impl From<Poly> for RationalFn {
    fn from(numer: Poly) -> Self {
        Self { numer, denom: Poly::constant(rat(1)) }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn poly(coeffs: &[i32]) -> Poly {
        Poly::new(coeffs.iter().map(|&c| rat(c)).collect())
    }

    fn real(n: i32) -> ExactReal {
        ExactReal::rational(n)
    }

    #[test]
    fn arithmetic() {
        let a = poly(&[-1, 1]);
        let b = poly(&[1, 1]);
        assert_eq!(a.mul(&b), poly(&[-1, 0, 1]));
        assert_eq!(a.add(&b), poly(&[0, 2]));
        assert_eq!(a.sub(&a), Poly::zero());
        assert_eq!(b.pow(2), poly(&[1, 2, 1]));
    }

    #[test]
    fn linear_root() {
        assert_eq!(poly(&[-2, 1]).real_roots(), Some(vec![real(2)]));
        assert_eq!(poly(&[3, 2]).real_roots(), Some(vec![ExactReal::rational((-3, 2))]));
    }

    #[test]
    fn quadratic_roots_are_exact() {
        // x² - x - 1
        let roots = poly(&[-1, -1, 1]).real_roots().unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].to_string(), "(1-√5)/2");
        assert_eq!(roots[1].to_string(), "(1+√5)/2");

        assert_eq!(poly(&[1, 0, 1]).real_roots(), Some(vec![]));
        assert_eq!(poly(&[1, -2, 1]).real_roots(), Some(vec![real(1)]));
    }

    #[test]
    fn cubic_with_rational_roots() {
        // (x - 1)(x + 2)(x - 3) = x³ - 2x² - 5x + 6
        let roots = poly(&[6, -5, -2, 1]).real_roots().unwrap();
        assert_eq!(roots, vec![real(-2), real(1), real(3)]);
    }

    #[test]
    fn cubic_with_surd_roots() {
        // x³ - 2x = x(x² - 2)
        let roots = poly(&[0, -2, 0, 1]).real_roots().unwrap();
        assert_eq!(roots.len(), 3);
        assert_eq!(roots[1], real(0));
        assert_eq!(roots[2].to_string(), "√2");
    }

    #[test]
    fn irreducible_cubic_is_unsolvable() {
        // x³ - 2 has no rational root
        assert_eq!(poly(&[-2, 0, 0, 1]).real_roots(), None);
    }

    #[test]
    fn sign_of_quotient() {
        // (x - 1) / (x + 1)
        let f = RationalFn { numer: poly(&[-1, 1]), denom: poly(&[1, 1]) };
        assert_eq!(f.cmp_at(&rat(0), &real(0)), Some(Ordering::Less));
        assert_eq!(f.cmp_at(&rat(0), &real(2)), Some(Ordering::Greater));
        assert_eq!(f.cmp_at(&rat(0), &real(-2)), Some(Ordering::Greater));
        assert_eq!(f.cmp_at(&rat(0), &real(-1)), None);
    }
}
