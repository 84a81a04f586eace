//! The admissibility condition of each restricting sub-expression.

use crate::component::{Component, ComponentKind};
use domain_parser::parser::expr::Expr;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the sub-expression compares with zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Relation {
    /// `≥ 0`
    GreaterEq,

    /// `> 0`
    Greater,

    /// `≠ 0`
    NotEq,
}

impl Relation {
    /// The mathematical symbol of the relation.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::GreaterEq => "≥",
            Self::Greater => ">",
            Self::NotEq => "≠",
        }
    }
}

/// The condition `argument ≥ 0`, `argument > 0` or `argument ≠ 0` that a component imposes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Condition {
    /// The kind of component the condition was derived from.
    pub kind: ComponentKind,

    /// The expression being compared with zero.
    pub argument: Expr,

    /// How the expression compares with zero.
    pub relation: Relation,
}

impl Condition {
    /// Derives the condition of a component of the given kind.
    pub fn derive(kind: ComponentKind, argument: Expr) -> Self {
        let relation = match kind {
            ComponentKind::Root => Relation::GreaterEq,
            ComponentKind::Log => Relation::Greater,
            ComponentKind::Denominator => Relation::NotEq,
        };
        Self { kind, argument, relation }
    }
}

impl From<&Component> for Condition {
    fn from(component: &Component) -> Self {
        Self::derive(component.kind, component.argument.clone())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} 0", self.argument, self.relation.symbol())
    }
}
