//! Exact version pin: tags, branches, and revisions

use std::fmt;

use super::{intersects, Bound, Constraint};
use crate::version::Version;

/// A constraint satisfied by exactly one version.
///
/// This is how tag, branch, and revision requirements are expressed: the
/// target is pinned and the only question is equality.
#[derive(Debug, Clone)]
pub struct ExactConstraint {
    version: Version,
}

impl ExactConstraint {
    /// Create a new exact pin
    pub fn new(version: Version) -> Self {
        ExactConstraint { version }
    }

    pub fn version(&self) -> &Version {
        &self.version
    }
}

impl Constraint for ExactConstraint {
    fn matches(&self, version: &Version) -> bool {
        version == &self.version
    }

    fn matches_any(&self, other: &dyn Constraint) -> bool {
        intersects(self, other)
    }

    fn lower_bound(&self) -> Bound {
        match self.version.as_semantic() {
            Some(version) => Bound::new(version.clone(), true),
            // Branches and revisions sit outside the ordered universe; their
            // interval form cannot exclude anything.
            None => Bound::zero(),
        }
    }

    fn upper_bound(&self) -> Bound {
        match self.version.as_semantic() {
            Some(version) => Bound::new(version.clone(), true),
            None => Bound::positive_infinity(),
        }
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(self.clone())
    }

    fn as_exact(&self) -> Option<&Version> {
        Some(&self.version)
    }
}

impl fmt::Display for ExactConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}
