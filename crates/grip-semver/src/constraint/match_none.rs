//! MatchNoneConstraint - matches no version

use std::fmt;

use super::{Bound, Constraint};
use crate::version::{Semver, Version};

/// A constraint that matches no version
#[derive(Debug, Clone, Default)]
pub struct MatchNoneConstraint;

impl MatchNoneConstraint {
    /// Create a new MatchNoneConstraint
    pub fn new() -> Self {
        MatchNoneConstraint
    }
}

impl Constraint for MatchNoneConstraint {
    fn matches(&self, _version: &Version) -> bool {
        false
    }

    fn matches_any(&self, _other: &dyn Constraint) -> bool {
        false
    }

    fn lower_bound(&self) -> Bound {
        Bound::new(Semver::new(0, 0, 0), false)
    }

    fn upper_bound(&self) -> Bound {
        Bound::new(Semver::new(0, 0, 0), false)
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(self.clone())
    }

    fn is_match_none(&self) -> bool {
        true
    }
}

impl fmt::Display for MatchNoneConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::MatchAllConstraint;

    #[test]
    fn test_match_none_matches_nothing() {
        let none = MatchNoneConstraint::new();
        assert!(!none.matches(&Version::semantic(1, 0, 0)));
        assert!(!none.matches(&Version::Branch("main".to_string())));
    }

    #[test]
    fn test_match_none_intersects_nothing() {
        let none = MatchNoneConstraint::new();
        assert!(!none.matches_any(&MatchAllConstraint::new()));
        assert!(!MatchAllConstraint::new().matches_any(&none));
    }
}
