//! Exact computation of the domain of definition of real functions built from square roots,
//! logarithms and divisions.
//!
//! The pipeline goes from a normalized function expression to the sub-expressions that restrict
//! its domain ([`component`]), to the condition each of them imposes ([`condition`]), to the exact
//! set of real numbers satisfying that condition ([`solve`]). Sets are written and read in
//! interval notation by [`notation`].
//!
//! ```
//! use domain_solve::{
//!     component::extract,
//!     condition::Condition,
//!     notation::{render, Notation},
//!     set::SolutionSet,
//!     solve::solve,
//! };
//!
//! let sets = extract("1/sqrt(x-2)").unwrap()
//!     .iter()
//!     .map(|component| solve(&Condition::from(component)).unwrap())
//!     .collect::<Vec<_>>();
//! let domain = SolutionSet::intersect_all(&sets);
//! assert_eq!(render(&domain, Notation::French), "]2,+∞[");
//! ```

pub mod component;
pub mod condition;
pub mod error;
pub mod expr;
pub mod notation;
pub mod poly;
pub mod primitive;
pub mod real;
pub mod set;
pub mod solve;

mod proptests;
