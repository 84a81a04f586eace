//! Kinds of errors produced while solving conditions and reading student answers.

use ariadne::Fmt;
use domain_attrs::ErrorKind;
use domain_error::EXPR;

pub use domain_error::{Error, ErrorKind};

/// The condition could not be solved exactly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot solve this condition exactly",
    labels = [format!("the solution set of this {} is unknown", "expression".fg(EXPR))],
    help = format!("reason: {}", reason),
)]
pub struct UnsolvableCondition {
    /// Why the solver gave up.
    pub reason: &'static str,
}

/// A student's answer could not be read as a set of real numbers.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unrecognized answer",
    labels = ["I could not read this part of the answer as a set of real numbers"],
    help = "write an interval such as `]2,+∞[`, a union of intervals, or an inequality such as `x ≥ 2`",
)]
pub struct UnparseableStudentAnswer;

/// The function expression has no square root, logarithm or division, so it is defined
/// everywhere.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the function has no restricting sub-expression",
    labels = ["this expression is defined for every real number"],
)]
pub struct EmptyDomainComponents;

/// A square root or logarithm was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes exactly one argument", name),
    labels = [format!("this call has {} arguments", found)],
)]
pub struct WrongArgumentCount {
    /// The name of the function.
    pub name: String,

    /// The number of arguments given.
    pub found: usize,
}
