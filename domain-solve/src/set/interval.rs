use crate::real::ExactReal;
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An end of an interval: a finite exact number, or one of the infinities.
///
/// The derived ordering places `-∞` below every finite number, and `+∞` above.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Endpoint {
    NegInfinity,
    Finite(ExactReal),
    PosInfinity,
}

impl Endpoint {
    /// Returns the finite value of the endpoint, if it has one.
    pub fn as_finite(&self) -> Option<&ExactReal> {
        match self {
            Self::Finite(value) => Some(value),
            _ => None,
        }
    }
}

impl From<ExactReal> for Endpoint {
    fn from(value: ExactReal) -> Self {
        Self::Finite(value)
    }
}

/// Whether an interval includes its endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundType {
    Open,
    Closed,
}

/// One side of an interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bound {
    /// Where the interval stops.
    pub value: Endpoint,

    /// Whether the interval includes [`Bound::value`]. Always [`BoundType::Open`] for infinite
    /// endpoints.
    pub kind: BoundType,
}

impl Bound {
    /// Creates an open bound.
    pub fn open(value: impl Into<Endpoint>) -> Self {
        Self { value: value.into(), kind: BoundType::Open }
    }

    /// Creates a closed bound. Infinite endpoints are never included, so they stay open.
    pub fn closed(value: impl Into<Endpoint>) -> Self {
        let value = value.into();
        let kind = match value {
            Endpoint::Finite(_) => BoundType::Closed,
            _ => BoundType::Open,
        };
        Self { value, kind }
    }

    /// Returns true if the bound includes its endpoint.
    pub fn is_closed(&self) -> bool {
        self.kind == BoundType::Closed
    }

    /// Compares two lower bounds: the one that lets in more numbers is smaller.
    pub(crate) fn cmp_lower(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value).then_with(|| match (self.kind, other.kind) {
            (BoundType::Closed, BoundType::Open) => Ordering::Less,
            (BoundType::Open, BoundType::Closed) => Ordering::Greater,
            _ => Ordering::Equal,
        })
    }

    /// Compares two upper bounds: the one that lets in more numbers is larger.
    pub(crate) fn cmp_upper(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value).then_with(|| match (self.kind, other.kind) {
            (BoundType::Closed, BoundType::Open) => Ordering::Greater,
            (BoundType::Open, BoundType::Closed) => Ordering::Less,
            _ => Ordering::Equal,
        })
    }
}

/// A non-empty interval of real numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    lower: Bound,
    upper: Bound,
}

impl Interval {
    /// Creates the interval between the two bounds, or returns [`None`] if it would be empty.
    pub fn new(lower: Bound, upper: Bound) -> Option<Self> {
        // infinities are never part of an interval
        let lower = match lower.value {
            Endpoint::PosInfinity => return None,
            Endpoint::NegInfinity => Bound::open(Endpoint::NegInfinity),
            _ => lower,
        };
        let upper = match upper.value {
            Endpoint::NegInfinity => return None,
            Endpoint::PosInfinity => Bound::open(Endpoint::PosInfinity),
            _ => upper,
        };

        match lower.value.cmp(&upper.value) {
            Ordering::Less => Some(Self { lower, upper }),
            Ordering::Equal if lower.is_closed() && upper.is_closed() => Some(Self { lower, upper }),
            _ => None,
        }
    }

    /// The whole real line `]-∞,+∞[`.
    pub fn all_reals() -> Self {
        Self {
            lower: Bound::open(Endpoint::NegInfinity),
            upper: Bound::open(Endpoint::PosInfinity),
        }
    }

    /// The single point `{value}`.
    pub fn point(value: ExactReal) -> Self {
        Self {
            lower: Bound::closed(value.clone()),
            upper: Bound::closed(value),
        }
    }

    /// The lower bound of the interval.
    pub fn lower(&self) -> &Bound {
        &self.lower
    }

    /// The upper bound of the interval.
    pub fn upper(&self) -> &Bound {
        &self.upper
    }

    /// If the interval is a single point, returns that point.
    pub fn as_point(&self) -> Option<&ExactReal> {
        match (&self.lower.value, &self.upper.value) {
            (Endpoint::Finite(lower), Endpoint::Finite(upper)) if lower == upper => Some(lower),
            _ => None,
        }
    }

    /// Returns true if the interval is the whole real line.
    pub fn is_all_reals(&self) -> bool {
        self.lower.value == Endpoint::NegInfinity && self.upper.value == Endpoint::PosInfinity
    }

    /// Returns true if the number lies inside the interval.
    pub fn contains(&self, value: &ExactReal) -> bool {
        let value = Endpoint::Finite(value.clone());
        let above = match self.lower.value.cmp(&value) {
            Ordering::Less => true,
            Ordering::Equal => self.lower.is_closed(),
            Ordering::Greater => false,
        };
        let below = match value.cmp(&self.upper.value) {
            Ordering::Less => true,
            Ordering::Equal => self.upper.is_closed(),
            Ordering::Greater => false,
        };
        above && below
    }

    /// Returns the intersection of the two intervals, if it is not empty.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let lower = if self.lower.cmp_lower(&other.lower) == Ordering::Less {
            other.lower.clone()
        } else {
            self.lower.clone()
        };
        let upper = if self.upper.cmp_upper(&other.upper) == Ordering::Greater {
            other.upper.clone()
        } else {
            self.upper.clone()
        };
        Self::new(lower, upper)
    }

    /// Returns true if `self` reaches `next` without a gap, assuming `self` starts first. Such
    /// intervals merge into one.
    pub(crate) fn touches(&self, next: &Self) -> bool {
        match self.upper.value.cmp(&next.lower.value) {
            Ordering::Greater => true,
            Ordering::Equal => self.upper.is_closed() || next.lower.is_closed(),
            Ordering::Less => false,
        }
    }

    /// Merges `next` into `self`, assuming [`Interval::touches`] holds.
    pub(crate) fn merge(&mut self, next: Self) {
        if next.upper.cmp_upper(&self.upper) == Ordering::Greater {
            self.upper = next.upper;
        }
    }

    /// Sorting key: by lower bound.
    pub(crate) fn cmp_start(&self, other: &Self) -> Ordering {
        self.lower.cmp_lower(&other.lower)
            .then_with(|| self.upper.cmp_upper(&other.upper))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn real(n: i32) -> ExactReal {
        ExactReal::rational(n)
    }

    #[test]
    fn empty_intervals_are_rejected() {
        assert_eq!(Interval::new(Bound::open(real(2)), Bound::closed(real(2))), None);
        assert_eq!(Interval::new(Bound::closed(real(3)), Bound::closed(real(2))), None);
        assert!(Interval::new(Bound::closed(real(2)), Bound::closed(real(2))).is_some());
    }

    #[test]
    fn infinite_ends_are_open() {
        let interval = Interval::new(Bound::closed(Endpoint::NegInfinity), Bound::closed(real(0)))
            .unwrap();
        assert_eq!(interval.lower(), &Bound::open(Endpoint::NegInfinity));
    }

    #[test]
    fn intersection_keeps_the_stricter_end() {
        let a = Interval::new(Bound::closed(real(2)), Bound::open(Endpoint::PosInfinity)).unwrap();
        let b = Interval::new(Bound::open(real(2)), Bound::open(Endpoint::PosInfinity)).unwrap();
        assert_eq!(a.intersect(&b), Some(b.clone()));

        let c = Interval::new(Bound::open(Endpoint::NegInfinity), Bound::open(real(2))).unwrap();
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn membership() {
        let a = Interval::new(Bound::closed(real(-1)), Bound::open(real(3))).unwrap();
        assert!(a.contains(&real(-1)));
        assert!(a.contains(&real(2)));
        assert!(!a.contains(&real(3)));
    }
}
