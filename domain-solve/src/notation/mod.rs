//! Conversion between [`SolutionSet`](crate::set::SolutionSet)s and the ways students write them:
//! interval notation such as `]-∞,2[ ∪ ]2,+∞[`, and inequality chains such as `x ≠ 2`.

mod parse;
mod render;

pub use parse::parse_answer;
pub use render::{render, render_chain};

use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The bracket style used to write intervals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Notation {
    /// Outward brackets for open ends, as taught in France: `]2,+∞[`.
    #[default]
    French,

    /// Parentheses for open ends: `(2, +∞)`.
    International,
}

impl FromStr for Notation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "french" | "fr" | "francaise" | "française" => Ok(Self::French),
            "international" | "intl" | "en" => Ok(Self::International),
            _ => Err(format!("unknown notation `{}`, expected `french` or `international`", s)),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::French => write!(f, "french"),
            Self::International => write!(f, "international"),
        }
    }
}
