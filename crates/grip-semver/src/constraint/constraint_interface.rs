//! Constraint interface trait

use super::Bound;
use crate::version::Version;

/// Trait for all constraint types.
///
/// A constraint is an opaque predicate over versions. Constraints compose by
/// intersection (see [`super::MultiConstraint`]); the solver only ever asks
/// whether a concrete version matches, or whether two constraints can both be
/// satisfied by at least one version.
pub trait Constraint: std::fmt::Debug + std::fmt::Display + Send + Sync {
    /// Check whether a concrete version satisfies this constraint.
    fn matches(&self, version: &Version) -> bool;

    /// Check whether this constraint and `other` have a non-empty
    /// intersection over the universe of versions.
    fn matches_any(&self, other: &dyn Constraint) -> bool;

    /// Get the lower bound of this constraint.
    fn lower_bound(&self) -> Bound;

    /// Get the upper bound of this constraint.
    fn upper_bound(&self) -> Bound;

    /// Clone this constraint into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Constraint>;

    /// Check if this constraint matches every version.
    fn is_match_all(&self) -> bool {
        false
    }

    /// Check if this constraint matches no version.
    fn is_match_none(&self) -> bool {
        false
    }

    /// The pinned version, when this constraint is an exact pin.
    fn as_exact(&self) -> Option<&Version> {
        None
    }

    /// The member constraints, when this is a compound constraint.
    fn as_multi(&self) -> Option<&[Box<dyn Constraint>]> {
        None
    }
}

impl Clone for Box<dyn Constraint> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Decide whether two constraints admit at least one common version.
///
/// Exact pins are resolved by membership; everything else is an interval
/// check on the constraint bounds, which is precise for ranges and their
/// conjunctions and conservative for compounds that mix in non-semantic pins.
pub fn intersects(a: &dyn Constraint, b: &dyn Constraint) -> bool {
    if a.is_match_none() || b.is_match_none() {
        return false;
    }
    if a.is_match_all() || b.is_match_all() {
        return true;
    }
    if let Some(version) = b.as_exact() {
        return a.matches(version);
    }
    if let Some(version) = a.as_exact() {
        return b.matches(version);
    }

    Bound::lower_fits_upper(&a.lower_bound(), &b.upper_bound())
        && Bound::lower_fits_upper(&b.lower_bound(), &a.upper_bound())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{
        ExactConstraint, MatchAllConstraint, MatchNoneConstraint, Operator, RangeConstraint,
    };
    use crate::version::Semver;

    fn range(op: Operator, version: &str) -> RangeConstraint {
        RangeConstraint::new(op, Semver::parse(version).unwrap())
    }

    #[test]
    fn test_disjoint_ranges() {
        let gte2 = range(Operator::GreaterThanOrEqual, "2.0.0");
        let lt2 = range(Operator::LessThan, "2.0.0");
        assert!(!intersects(&gte2, &lt2));
        assert!(!intersects(&lt2, &gte2));
    }

    #[test]
    fn test_overlapping_ranges() {
        let gte1 = range(Operator::GreaterThanOrEqual, "1.0.0");
        let lt2 = range(Operator::LessThan, "2.0.0");
        assert!(intersects(&gte1, &lt2));

        let lte2 = range(Operator::LessThanOrEqual, "2.0.0");
        let gte2 = range(Operator::GreaterThanOrEqual, "2.0.0");
        // Touching at an inclusive boundary is still an intersection.
        assert!(intersects(&lte2, &gte2));
    }

    #[test]
    fn test_match_all_and_none() {
        let any = MatchAllConstraint::new();
        let none = MatchNoneConstraint::new();
        let gte1 = range(Operator::GreaterThanOrEqual, "1.0.0");

        assert!(intersects(&any, &gte1));
        assert!(!intersects(&none, &gte1));
        assert!(!intersects(&any, &none));
    }

    #[test]
    fn test_exact_pin_membership() {
        let pin = ExactConstraint::new(crate::Version::semantic(1, 5, 0));
        let lt2 = range(Operator::LessThan, "2.0.0");
        let gte2 = range(Operator::GreaterThanOrEqual, "2.0.0");

        assert!(intersects(&pin, &lt2));
        assert!(!intersects(&pin, &gte2));
    }

    #[test]
    fn test_branch_pin_never_intersects_ranges() {
        let pin = ExactConstraint::new(crate::Version::Branch("main".to_string()));
        let lt2 = range(Operator::LessThan, "2.0.0");
        assert!(!intersects(&pin, &lt2));
        assert!(intersects(&pin, &MatchAllConstraint::new()));
    }
}
