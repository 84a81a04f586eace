//! Exact real numbers of the form `a + b√d`.
//!
//! Every boundary of a solution set is a root of a polynomial of degree at most two with rational
//! coefficients, so it can be written exactly as `a + b√d` with `a` and `b` rational and `d` a
//! square-free integer. [`ExactReal`] stores numbers in that form, which is unique: two
//! [`ExactReal`]s are equal if and only if their fields are equal.

use crate::primitive::{float, int, rat, square_free_split, PRECISION};
use rug::{Float, Integer, Rational};
use std::{cmp::Ordering, fmt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An exact real number `rational + surd·√radicand`.
///
/// Invariant: either `surd == 0` and `radicand == 1`, or `surd != 0` and `radicand` is a
/// square-free integer greater than 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExactReal {
    rational: Rational,
    surd: Rational,
    radicand: Integer,
}

impl ExactReal {
    /// Creates an exact real from a rational number.
    pub fn rational(value: impl Into<Rational>) -> Self {
        Self {
            rational: value.into(),
            surd: rat(0),
            radicand: int(1),
        }
    }

    /// Creates the exact real `0`.
    pub fn zero() -> Self {
        Self::rational(0)
    }

    /// Creates `rational + surd·√radicand` for any non-negative `radicand`, pulling square factors
    /// out of the radicand. Returns [`None`] if `radicand` is negative or cannot be factored.
    pub fn with_surd(rational: Rational, surd: Rational, radicand: &Integer) -> Option<Self> {
        if *radicand < 0 {
            return None;
        }

        let (square, free) = square_free_split(radicand)?;
        let surd = surd * square;
        if surd == 0 || free == 1 {
            // the radicand was a perfect square (or the surd vanished)
            let root_part = if free == 1 { surd } else { rat(0) };
            return Some(Self::rational(rational + root_part));
        }

        Some(Self { rational, surd, radicand: free })
    }

    /// Returns the exact square root of a non-negative rational, or [`None`] if the rational is
    /// negative or its radicand cannot be factored.
    pub fn sqrt_of(value: &Rational) -> Option<Self> {
        if *value < 0 {
            return None;
        }

        // √(p/q) = √(p·q) / q
        let (numer, denom) = (value.numer(), value.denom());
        let radicand = int(numer * denom);
        let surd = Rational::from((int(1), denom.clone()));
        Self::with_surd(rat(0), surd, &radicand)
    }

    /// Returns the value as a rational number, if it is one.
    pub fn as_rational(&self) -> Option<&Rational> {
        if self.is_rational() {
            Some(&self.rational)
        } else {
            None
        }
    }

    /// Returns true if the value is rational.
    pub fn is_rational(&self) -> bool {
        self.surd == 0
    }

    /// Returns true if the value is zero.
    pub fn is_zero(&self) -> bool {
        self.is_rational() && self.rational == 0
    }

    /// Returns the radicand shared by `self` and `other`, if they live in the same field
    /// `ℚ(√d)`.
    fn common_radicand(&self, other: &Self) -> Option<Integer> {
        match (self.is_rational(), other.is_rational()) {
            (true, true) => Some(int(1)),
            (true, false) => Some(other.radicand.clone()),
            (false, true) => Some(self.radicand.clone()),
            (false, false) if self.radicand == other.radicand => Some(self.radicand.clone()),
            _ => None,
        }
    }

    /// Builds `rational + surd·√radicand` for an already square-free radicand.
    fn from_parts(rational: Rational, surd: Rational, radicand: Integer) -> Self {
        if surd == 0 || radicand == 1 {
            Self::rational(rational)
        } else {
            Self { rational, surd, radicand }
        }
    }

    /// Adds two numbers of the same field `ℚ(√d)`.
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        let radicand = self.common_radicand(other)?;
        Some(Self::from_parts(
            rat(&self.rational + &other.rational),
            rat(&self.surd + &other.surd),
            radicand,
        ))
    }

    /// Subtracts two numbers of the same field `ℚ(√d)`.
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.checked_add(&other.neg())
    }

    /// Multiplies two numbers of the same field `ℚ(√d)`.
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        let radicand = self.common_radicand(other)?;

        // (a + b√d)(c + e√d) = (ac + be·d) + (ae + bc)√d
        let rational = rat(&self.rational * &other.rational)
            + rat(&self.surd * &other.surd) * &radicand;
        let surd = rat(&self.rational * &other.surd) + rat(&self.surd * &other.rational);
        Some(Self::from_parts(rational, surd, radicand))
    }

    /// Returns the multiplicative inverse, or [`None`] for zero.
    pub fn recip(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }

        // 1 / (a + b√d) = (a - b√d) / (a² - b²·d)
        let norm = rat(self.rational.square_ref()) - rat(self.surd.square_ref()) * &self.radicand;
        Some(Self::from_parts(
            rat(&self.rational / &norm),
            -rat(&self.surd / &norm),
            self.radicand.clone(),
        ))
    }

    /// Divides two numbers of the same field `ℚ(√d)`. Returns [`None`] if `other` is zero.
    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        self.checked_mul(&other.recip()?)
    }

    /// Raises the number to an integer power. Returns [`None`] for a negative power of zero.
    pub fn checked_pow(&self, exp: i32) -> Option<Self> {
        let base = if exp < 0 { self.recip()? } else { self.clone() };
        let mut result = Self::rational(1);
        for _ in 0..exp.unsigned_abs() {
            result = result.checked_mul(&base)?;
        }
        Some(result)
    }

    /// Returns the negation of the number.
    pub fn neg(&self) -> Self {
        Self {
            rational: -self.rational.clone(),
            surd: -self.surd.clone(),
            radicand: self.radicand.clone(),
        }
    }

    /// Returns the sign of the number, computed exactly.
    pub fn signum(&self) -> Ordering {
        let a = self.rational.cmp0();
        let b = self.surd.cmp0();
        if b == Ordering::Equal || a == b {
            return if a == Ordering::Equal { b } else { a };
        }
        if a == Ordering::Equal {
            return b;
        }

        // opposite signs: the part with the larger square wins
        let a2 = rat(self.rational.square_ref());
        let b2 = rat(self.surd.square_ref()) * &self.radicand;
        if a2 > b2 { a } else { b }
    }

    /// Compares the number with a rational, exactly.
    pub fn cmp_rational(&self, other: &Rational) -> Ordering {
        Self::from_parts(
            rat(&self.rational - other),
            self.surd.clone(),
            self.radicand.clone(),
        ).signum()
    }

    /// Returns a 512-bit approximation of the number.
    pub fn to_float(&self) -> Float {
        let root = float(&self.radicand).sqrt();
        float(&self.rational) + float(&self.surd) * root
    }

    /// Returns the largest integer not greater than the number.
    pub fn floor(&self) -> Integer {
        if let Some(rational) = self.as_rational() {
            return rational.clone().floor().numer().clone();
        }

        // the approximation is far more precise than the gap to the nearest integer, except when
        // the number is within rounding of one, which the exact check below corrects
        let guess = self.to_float().floor().to_integer().unwrap_or_default();
        match self.cmp_rational(&rat(&guess)) {
            Ordering::Less => guess - 1,
            _ if self.cmp_rational(&rat(int(&guess + 1))) != Ordering::Less => guess + 1,
            _ => guess,
        }
    }

    /// Returns a rational number strictly between `self` and `other`, which must be distinct.
    pub fn rational_between(&self, other: &Self) -> Option<Rational> {
        let (low, high) = match self.cmp(other) {
            Ordering::Less => (self, other),
            Ordering::Greater => (other, self),
            Ordering::Equal => return None,
        };

        if let (Some(low), Some(high)) = (low.as_rational(), high.as_rational()) {
            return Some((rat(low + high)) / 2);
        }

        let mid = (low.to_float() + high.to_float()) / 2u32;
        let mid = Float::with_val(PRECISION, mid).to_rational()?;
        let between = low.cmp_rational(&mid) == Ordering::Less
            && high.cmp_rational(&mid) == Ordering::Greater;
        between.then_some(mid)
    }
}

impl From<Rational> for ExactReal {
    fn from(value: Rational) -> Self {
        Self::rational(value)
    }
}

impl From<i32> for ExactReal {
    fn from(value: i32) -> Self {
        Self::rational(value)
    }
}

impl PartialOrd for ExactReal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Exact whenever both numbers live in the same field `ℚ(√d)`. Two numbers with different
/// radicands are never equal, and are ordered by a 512-bit approximation.
impl Ord for ExactReal {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.checked_sub(other) {
            Some(diff) => diff.signum(),
            None => self.to_float()
                .partial_cmp(&other.to_float())
                .unwrap_or(Ordering::Equal),
        }
    }
}

/// Formats the number the way it is written by hand: `2`, `-1/2`, `√5`, `2√3`, `(1-√5)/2`.
impl fmt::Display for ExactReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_rational() {
            return write!(f, "{}", self.rational);
        }

        // write as (p + q√d) / r with integers p, q, r
        let denom = int(self.rational.denom().lcm_ref(self.surd.denom()));
        let p = int(self.rational.numer() * &denom) / self.rational.denom();
        let q = int(self.surd.numer() * &denom) / self.surd.denom();

        let surd = if q == 1 {
            format!("√{}", self.radicand)
        } else if q == -1 {
            format!("-√{}", self.radicand)
        } else {
            format!("{}√{}", q, self.radicand)
        };

        let numer = if p == 0 {
            surd
        } else if q > 0 {
            format!("{}+{}", p, surd)
        } else {
            format!("{}{}", p, surd)
        };

        if denom == 1 {
            write!(f, "{}", numer)
        } else if p == 0 {
            write!(f, "{}/{}", numer, denom)
        } else {
            write!(f, "({})/{}", numer, denom)
        }
    }
}
