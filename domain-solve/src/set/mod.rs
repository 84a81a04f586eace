//! Sets of real numbers made of finitely many intervals.
//!
//! A [`SolutionSet`] is always kept in canonical form: its intervals are non-empty, sorted, and
//! separated by gaps. Two sets that contain the same numbers therefore have the same
//! representation, and the derived [`PartialEq`] is exact set equality.

mod interval;

pub use interval::{Bound, BoundType, Endpoint, Interval};

use crate::real::ExactReal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A finite union of disjoint intervals of real numbers, in increasing order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolutionSet {
    intervals: Vec<Interval>,
}

impl SolutionSet {
    /// The empty set `∅`.
    pub fn empty() -> Self {
        Self { intervals: Vec::new() }
    }

    /// The real line `ℝ`.
    pub fn all_reals() -> Self {
        Self { intervals: vec![Interval::all_reals()] }
    }

    /// The set containing exactly the given interval.
    pub fn interval(interval: Interval) -> Self {
        Self { intervals: vec![interval] }
    }

    /// The set of the given points.
    pub fn points(points: impl IntoIterator<Item = ExactReal>) -> Self {
        Self::from_intervals(points.into_iter().map(Interval::point))
    }

    /// The real line with finitely many points taken out. This is the union of the maximal open
    /// intervals around the excluded points.
    pub fn all_reals_except(points: impl IntoIterator<Item = ExactReal>) -> Self {
        Self::points(points).complement()
    }

    /// Builds the canonical union of the given intervals, which may overlap or come in any order.
    pub fn from_intervals(intervals: impl IntoIterator<Item = Interval>) -> Self {
        let mut intervals = intervals.into_iter().collect::<Vec<_>>();
        intervals.sort_by(|a, b| a.cmp_start(b));

        let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
        for interval in intervals {
            match merged.last_mut() {
                Some(last) if last.touches(&interval) => last.merge(interval),
                _ => merged.push(interval),
            }
        }

        Self { intervals: merged }
    }

    /// The intervals of the set, disjoint and in increasing order.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Returns true if the set is `∅`.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Returns true if the set is `ℝ`.
    pub fn is_all_reals(&self) -> bool {
        matches!(self.intervals.as_slice(), [interval] if interval.is_all_reals())
    }

    /// If the set is the real line with finitely many (at least one) points removed, returns
    /// those points.
    pub fn excluded_points(&self) -> Option<Vec<&ExactReal>> {
        let (first, last) = (self.intervals.first()?, self.intervals.last()?);
        if first.lower().value != Endpoint::NegInfinity || last.upper().value != Endpoint::PosInfinity {
            return None;
        }

        self.intervals.windows(2)
            .map(|pair| match (&pair[0].upper().value, &pair[1].lower().value) {
                (Endpoint::Finite(a), Endpoint::Finite(b)) if a == b => Some(a),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .filter(|points| !points.is_empty())
    }

    /// Returns true if the number belongs to the set.
    pub fn contains(&self, value: &ExactReal) -> bool {
        self.intervals.iter().any(|interval| interval.contains(value))
    }

    /// Returns the union of the two sets.
    pub fn union(&self, other: &Self) -> Self {
        Self::from_intervals(self.intervals.iter().chain(&other.intervals).cloned())
    }

    /// Returns the intersection of the two sets.
    pub fn intersect(&self, other: &Self) -> Self {
        Self::from_intervals(self.intervals.iter().flat_map(|a| {
            other.intervals.iter().filter_map(move |b| a.intersect(b))
        }))
    }

    /// Returns the set of real numbers not in this set.
    pub fn complement(&self) -> Self {
        let mut gaps = Vec::with_capacity(self.intervals.len() + 1);
        let mut lower = Bound::open(Endpoint::NegInfinity);

        for interval in &self.intervals {
            let upper = flip(interval.lower());
            gaps.extend(Interval::new(lower, upper));
            lower = flip(interval.upper());
        }
        gaps.extend(Interval::new(lower, Bound::open(Endpoint::PosInfinity)));

        Self { intervals: gaps }
    }

    /// Intersects every set in the iterator. The intersection of no sets is `ℝ`.
    pub fn intersect_all<'a>(sets: impl IntoIterator<Item = &'a SolutionSet>) -> Self {
        sets.into_iter().fold(Self::all_reals(), |acc, set| acc.intersect(set))
    }
}

/// The bound on the other side of the same endpoint: `[a` becomes `a[`, and `]a` becomes `a]`.
fn flip(bound: &Bound) -> Bound {
    match bound.kind {
        BoundType::Open => Bound::closed(bound.value.clone()),
        BoundType::Closed => Bound::open(bound.value.clone()),
    }
}

impl From<Interval> for SolutionSet {
    fn from(interval: Interval) -> Self {
        Self::interval(interval)
    }
}
