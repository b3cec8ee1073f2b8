//! Version and constraint primitives for the grip dependency solver
//!
//! This crate provides the version universe the solver works over (semantic
//! releases, VCS branches, raw revisions) and opaque, composable version
//! constraints with intersection semantics.

pub mod constraint;
mod parse;
mod version;

pub use constraint::{
    Bound, Constraint, ExactConstraint, MatchAllConstraint, MatchNoneConstraint, MultiConstraint,
    Operator, RangeConstraint,
};
pub use parse::{parse_constraint, ConstraintParseError};
pub use version::{Semver, Version, VersionError};
