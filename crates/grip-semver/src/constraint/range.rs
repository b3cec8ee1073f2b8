//! Single comparison constraint over semantic versions

use std::fmt;

use super::{intersects, Bound, Constraint, Operator};
use crate::version::{Semver, Version};

/// A constraint comparing versions against a single semantic version.
///
/// Only semantic versions can match; branches and revisions are outside the
/// ordered universe and never satisfy a range.
#[derive(Debug, Clone)]
pub struct RangeConstraint {
    op: Operator,
    version: Semver,
}

impl RangeConstraint {
    /// Create a new range constraint
    pub fn new(op: Operator, version: Semver) -> Self {
        RangeConstraint { op, version }
    }

    pub fn operator(&self) -> Operator {
        self.op
    }

    pub fn version(&self) -> &Semver {
        &self.version
    }
}

impl Constraint for RangeConstraint {
    fn matches(&self, version: &Version) -> bool {
        let candidate = match version.as_semantic() {
            Some(candidate) => candidate,
            None => return false,
        };
        match self.op {
            Operator::Equal => candidate == &self.version,
            Operator::LessThan => candidate < &self.version,
            Operator::LessThanOrEqual => candidate <= &self.version,
            Operator::GreaterThan => candidate > &self.version,
            Operator::GreaterThanOrEqual => candidate >= &self.version,
        }
    }

    fn matches_any(&self, other: &dyn Constraint) -> bool {
        intersects(self, other)
    }

    fn lower_bound(&self) -> Bound {
        match self.op {
            Operator::Equal => Bound::new(self.version.clone(), true),
            Operator::GreaterThan => Bound::new(self.version.clone(), false),
            Operator::GreaterThanOrEqual => Bound::new(self.version.clone(), true),
            Operator::LessThan | Operator::LessThanOrEqual => Bound::zero(),
        }
    }

    fn upper_bound(&self) -> Bound {
        match self.op {
            Operator::Equal => Bound::new(self.version.clone(), true),
            Operator::LessThan => Bound::new(self.version.clone(), false),
            Operator::LessThanOrEqual => Bound::new(self.version.clone(), true),
            Operator::GreaterThan | Operator::GreaterThanOrEqual => Bound::positive_infinity(),
        }
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(self.clone())
    }
}

impl fmt::Display for RangeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)
    }
}
