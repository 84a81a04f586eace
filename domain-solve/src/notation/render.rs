use crate::set::{Bound, Endpoint, Interval, SolutionSet};
use super::Notation;
use std::fmt::Write;

fn endpoint(value: &Endpoint) -> String {
    match value {
        Endpoint::NegInfinity => "-∞".to_string(),
        Endpoint::Finite(value) => value.to_string(),
        Endpoint::PosInfinity => "+∞".to_string(),
    }
}

fn interval(out: &mut String, interval: &Interval, notation: Notation) {
    if let Some(point) = interval.as_point() {
        let _ = write!(out, "{{{}}}", point);
        return;
    }

    let (lower, upper) = (interval.lower(), interval.upper());
    let (open, close, separator) = match notation {
        Notation::French => (
            if lower.is_closed() { '[' } else { ']' },
            if upper.is_closed() { ']' } else { '[' },
            ",",
        ),
        Notation::International => (
            if lower.is_closed() { '[' } else { '(' },
            if upper.is_closed() { ']' } else { ')' },
            ", ",
        ),
    };
    let _ = write!(out, "{}{}{}{}{}", open, endpoint(&lower.value), separator, endpoint(&upper.value), close);
}

/// Writes the set in interval notation, such as `]-∞,-2] ∪ [2,+∞[`.
///
/// `ℝ` and `∅` are written with their symbols, and an interval reduced to one number `a` is
/// written `{a}`.
pub fn render(set: &SolutionSet, notation: Notation) -> String {
    if set.is_empty() {
        return "∅".to_string();
    }
    if set.is_all_reals() {
        return "ℝ".to_string();
    }

    let mut out = String::new();
    for (i, piece) in set.intervals().iter().enumerate() {
        if i > 0 {
            out.push_str(" ∪ ");
        }
        interval(&mut out, piece, notation);
    }
    out
}

fn lower_relation(bound: &Bound) -> &'static str {
    if bound.is_closed() { "≤" } else { "<" }
}

/// Writes the set as inequalities on `x`, such as `x ≤ -2 ou x ≥ 2`, or `x ≠ 1 et x ≠ 3` for the
/// real line with points removed.
pub fn render_chain(set: &SolutionSet) -> String {
    if set.is_empty() {
        return "aucune valeur de x".to_string();
    }
    if set.is_all_reals() {
        return "x ∈ ℝ".to_string();
    }
    if let Some(points) = set.excluded_points() {
        return points.iter()
            .map(|point| format!("x ≠ {}", point))
            .collect::<Vec<_>>()
            .join(" et ");
    }

    set.intervals()
        .iter()
        .map(|piece| {
            if let Some(point) = piece.as_point() {
                return format!("x = {}", point);
            }

            let (lower, upper) = (piece.lower(), piece.upper());
            match (&lower.value, &upper.value) {
                (Endpoint::NegInfinity, value) => format!("x {} {}", lower_relation(upper), endpoint(value)),
                (value, Endpoint::PosInfinity) => {
                    let relation = if lower.is_closed() { "≥" } else { ">" };
                    format!("x {} {}", relation, endpoint(value))
                },
                (a, b) => format!(
                    "{} {} x {} {}",
                    endpoint(a),
                    lower_relation(lower),
                    lower_relation(upper),
                    endpoint(b),
                ),
            }
        })
        .collect::<Vec<_>>()
        .join(" ou ")
}
