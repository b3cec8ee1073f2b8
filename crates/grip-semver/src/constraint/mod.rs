//! Constraint types for version matching

mod bound;
mod constraint_interface;
mod exact;
mod match_all;
mod match_none;
mod multi_constraint;
mod operator;
mod range;

pub use bound::Bound;
pub use constraint_interface::{intersects, Constraint};
pub use exact::ExactConstraint;
pub use match_all::MatchAllConstraint;
pub use match_none::MatchNoneConstraint;
pub use multi_constraint::MultiConstraint;
pub use operator::{InvalidOperatorError, Operator};
pub use range::RangeConstraint;
