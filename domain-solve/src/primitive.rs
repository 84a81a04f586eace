//! Functions to construct [`Integer`]s, [`Rational`]s and [`Float`]s from various types.

use rug::{ops::Pow, Assign, Float, Integer, Rational};

/// The number of bits of precision to use when approximating irrational values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rat<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Parses an integer literal as written in the source.
pub fn int_from_str(s: &str) -> Option<Integer> {
    Integer::from_str_radix(s, 10).ok()
}

/// Parses a decimal literal such as `2.5` or `.75` into the exact [`Rational`] it denotes.
pub fn rat_from_decimal(s: &str) -> Option<Rational> {
    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    let digits = format!("{}{}", whole, frac);
    if digits.is_empty() {
        return None;
    }

    let numer = int_from_str(&digits)?;
    let denom = int(10).pow(frac.len() as u32);
    Some(Rational::from((numer, denom)))
}

/// Returns `n` as `s² · d` with `d` square-free, as the pair `(s, d)`.
///
/// Trial division runs up to [`TRIAL_LIMIT`]; whatever is left after that is accepted only if it
/// is a perfect square or too small to hide a repeated prime factor. Returns [`None`] otherwise.
pub fn square_free_split(n: &Integer) -> Option<(Integer, Integer)> {
    let mut rest = n.clone().abs();
    if rest == 0 {
        return Some((int(0), int(1)));
    }

    let mut square = int(1);
    let mut free = int(1);
    let mut p = 2u32;
    while p <= TRIAL_LIMIT && int(p) * p <= rest {
        let mut count = 0u32;
        while rest.is_divisible_u(p) {
            rest /= p;
            count += 1;
        }
        if count > 0 {
            square *= int(p).pow(count / 2);
            if count % 2 == 1 {
                free *= p;
            }
        }
        p += if p == 2 { 1 } else { 2 };
    }

    if rest > 1 {
        if rest.is_perfect_square() {
            square *= rest.sqrt();
        } else if rest < int(TRIAL_LIMIT).pow(3) || int(p) * p > rest {
            // at most two prime factors remain, both above the limit, and they are distinct
            free *= rest;
        } else {
            return None;
        }
    }

    Some((square, free))
}

/// Largest trial divisor used by [`square_free_split`] and divisor enumeration.
pub const TRIAL_LIMIT: u32 = 10_000;

/// Returns the positive divisors of `n`, or [`None`] if `n` has more than [`MAX_DIVISORS`] of
/// them or cannot be factored by trial division.
pub fn divisors(n: &Integer) -> Option<Vec<Integer>> {
    let mut rest = n.clone().abs();
    if rest == 0 {
        return None;
    }

    let mut factors: Vec<(Integer, u32)> = Vec::new();
    let mut p = 2u32;
    while int(p) * p <= rest {
        if p > TRIAL_LIMIT {
            return None;
        }
        let mut count = 0u32;
        while rest.is_divisible_u(p) {
            rest /= p;
            count += 1;
        }
        if count > 0 {
            factors.push((int(p), count));
        }
        p += if p == 2 { 1 } else { 2 };
    }
    if rest > 1 {
        factors.push((rest, 1));
    }

    let count = factors.iter().map(|(_, e)| *e as usize + 1).product::<usize>();
    if count > MAX_DIVISORS {
        return None;
    }

    let mut divisors = vec![int(1)];
    for (prime, exp) in factors {
        let mut next = Vec::with_capacity(divisors.len() * (exp as usize + 1));
        for d in &divisors {
            let mut power = int(1);
            for _ in 0..=exp {
                next.push(int(d * &power));
                power *= &prime;
            }
        }
        divisors = next;
    }
    divisors.sort();
    Some(divisors)
}

/// Upper bound on the number of divisors enumerated for the rational root search.
pub const MAX_DIVISORS: usize = 4096;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn decimals_are_exact() {
        assert_eq!(rat_from_decimal("2.5"), Some(rat((5, 2))));
        assert_eq!(rat_from_decimal(".75"), Some(rat((3, 4))));
        assert_eq!(rat_from_decimal("12"), Some(rat(12)));
    }

    #[test]
    fn square_free() {
        assert_eq!(square_free_split(&int(12)), Some((int(2), int(3))));
        assert_eq!(square_free_split(&int(49)), Some((int(7), int(1))));
        assert_eq!(square_free_split(&int(5)), Some((int(1), int(5))));
        assert_eq!(square_free_split(&int(72)), Some((int(6), int(2))));
    }

    #[test]
    fn divisor_list() {
        assert_eq!(divisors(&int(12)), Some(vec![int(1), int(2), int(3), int(4), int(6), int(12)]));
        assert_eq!(divisors(&int(-7)), Some(vec![int(1), int(7)]));
        assert_eq!(divisors(&int(0)), None);
    }
}
