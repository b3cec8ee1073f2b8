//! MatchAllConstraint - matches any version

use std::fmt;

use super::{Bound, Constraint};
use crate::version::Version;

/// A constraint that matches any version
#[derive(Debug, Clone, Default)]
pub struct MatchAllConstraint;

impl MatchAllConstraint {
    /// Create a new MatchAllConstraint
    pub fn new() -> Self {
        MatchAllConstraint
    }
}

impl Constraint for MatchAllConstraint {
    fn matches(&self, _version: &Version) -> bool {
        true
    }

    fn matches_any(&self, other: &dyn Constraint) -> bool {
        !other.is_match_none()
    }

    fn lower_bound(&self) -> Bound {
        Bound::zero()
    }

    fn upper_bound(&self) -> Bound {
        Bound::positive_infinity()
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(self.clone())
    }

    fn is_match_all(&self) -> bool {
        true
    }
}

impl fmt::Display for MatchAllConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_all_matches_everything() {
        let any = MatchAllConstraint::new();
        assert!(any.matches(&Version::semantic(1, 0, 0)));
        assert!(any.matches(&Version::Branch("main".to_string())));
        assert!(any.matches(&Version::revision("deadbeef")));
    }

    #[test]
    fn test_match_all_display() {
        assert_eq!(MatchAllConstraint::new().to_string(), "*");
    }

    #[test]
    fn test_match_all_bounds() {
        let any = MatchAllConstraint::new();
        assert!(any.lower_bound().is_zero());
        assert!(any.upper_bound().is_positive_infinity());
    }
}
