//! Property-based tests for solution sets and their notations.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{
        notation::{parse_answer, render, render_chain, Notation},
        primitive::{int, rat},
        real::ExactReal,
        set::{Bound, BoundType, Endpoint, Interval, SolutionSet},
    };

    // Strategy for exact reals: small fractions, sometimes with a square root of 2, 3 or 5
    fn exact_real() -> impl Strategy<Value = ExactReal> {
        (-20i32..20, 1i32..4, -3i32..4, prop::sample::select(vec![2, 3, 5])).prop_map(
            |(numer, denom, surd, radicand)| {
                ExactReal::with_surd(rat((numer, denom)), rat((surd, denom)), &int(radicand))
                    .unwrap_or_else(|| ExactReal::rational(numer))
            },
        )
    }

    fn bound_type() -> impl Strategy<Value = BoundType> {
        prop_oneof![Just(BoundType::Open), Just(BoundType::Closed)]
    }

    // Strategy for endpoints, with an occasional infinity
    fn endpoint() -> impl Strategy<Value = Endpoint> {
        prop_oneof![
            1 => Just(Endpoint::NegInfinity),
            6 => exact_real().prop_map(Endpoint::Finite),
            1 => Just(Endpoint::PosInfinity),
        ]
    }

    fn interval() -> impl Strategy<Value = Option<Interval>> {
        (endpoint(), bound_type(), endpoint(), bound_type()).prop_map(|(a, a_kind, b, b_kind)| {
            let (a, b) = if a <= b { (a, b) } else { (b, a) };
            Interval::new(Bound { value: a, kind: a_kind }, Bound { value: b, kind: b_kind })
        })
    }

    // Strategy for sets shaped like the ones the solver produces
    fn solution_set() -> impl Strategy<Value = SolutionSet> {
        prop_oneof![
            prop::collection::vec(interval(), 0..4)
                .prop_map(|intervals| SolutionSet::from_intervals(intervals.into_iter().flatten())),
            prop::collection::vec(exact_real(), 1..4).prop_map(SolutionSet::all_reals_except),
            prop::collection::vec(exact_real(), 1..3).prop_map(SolutionSet::points),
        ]
    }

    proptest! {
        #[test]
        fn french_notation_round_trip(set in solution_set()) {
            let text = render(&set, Notation::French);
            prop_assert_eq!(parse_answer(&text).ok(), Some(set), "{}", text);
        }

        #[test]
        fn international_notation_round_trip(set in solution_set()) {
            let text = render(&set, Notation::International);
            prop_assert_eq!(parse_answer(&text).ok(), Some(set), "{}", text);
        }

        #[test]
        fn chain_notation_round_trip(set in solution_set()) {
            let text = render_chain(&set);
            prop_assert_eq!(parse_answer(&text).ok(), Some(set), "{}", text);
        }

        #[test]
        fn intersection_commutative(a in solution_set(), b in solution_set()) {
            prop_assert_eq!(a.intersect(&b), b.intersect(&a));
        }

        #[test]
        fn intersection_associative(a in solution_set(), b in solution_set(), c in solution_set()) {
            prop_assert_eq!(a.intersect(&b).intersect(&c), a.intersect(&b.intersect(&c)));
        }

        #[test]
        fn equality_symmetric(a in solution_set(), b in solution_set()) {
            prop_assert_eq!(a == b, b == a);
        }

        #[test]
        fn intersection_is_contained(a in solution_set(), b in solution_set(), x in exact_real()) {
            let both = a.intersect(&b);
            prop_assert_eq!(both.contains(&x), a.contains(&x) && b.contains(&x));
        }
    }
}
