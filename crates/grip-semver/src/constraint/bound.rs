//! Bound type for constraint boundaries

use std::cmp::Ordering;
use std::fmt;

use crate::version::Semver;

/// Represents a bound (lower or upper) of a version constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    version: Semver,
    inclusive: bool,
}

impl Bound {
    /// Create a new bound.
    pub fn new(version: Semver, inclusive: bool) -> Self {
        Bound { version, inclusive }
    }

    /// Get the version at the bound.
    pub fn version(&self) -> &Semver {
        &self.version
    }

    /// Check if the bound is inclusive.
    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    /// Create the zero bound (minimum possible version).
    pub fn zero() -> Self {
        Bound {
            version: Semver::new(0, 0, 0),
            inclusive: true,
        }
    }

    /// Create the positive-infinity bound (maximum possible version).
    pub fn positive_infinity() -> Self {
        Bound {
            version: Semver::new(u64::MAX, 0, 0),
            inclusive: false,
        }
    }

    /// Check if this is the zero bound.
    pub fn is_zero(&self) -> bool {
        self.inclusive && self.version == Semver::new(0, 0, 0)
    }

    /// Check if this is the positive-infinity bound.
    pub fn is_positive_infinity(&self) -> bool {
        !self.inclusive && self.version == Semver::new(u64::MAX, 0, 0)
    }

    /// Whether the interval from `lower` up to `upper` is non-empty.
    pub fn lower_fits_upper(lower: &Bound, upper: &Bound) -> bool {
        match lower.version.cmp(&upper.version) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => lower.inclusive && upper.inclusive,
        }
    }

    /// The tighter of two lower bounds: the one that starts later.
    pub(crate) fn tighter_lower(a: Bound, b: Bound) -> Bound {
        match a.version.cmp(&b.version) {
            Ordering::Greater => a,
            Ordering::Less => b,
            // Same version: the exclusive bound excludes one more point.
            Ordering::Equal => {
                if a.inclusive {
                    b
                } else {
                    a
                }
            }
        }
    }

    /// The tighter of two upper bounds: the one that ends earlier.
    pub(crate) fn tighter_upper(a: Bound, b: Bound) -> Bound {
        match a.version.cmp(&b.version) {
            Ordering::Less => a,
            Ordering::Greater => b,
            Ordering::Equal => {
                if a.inclusive {
                    b
                } else {
                    a
                }
            }
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]",
            self.version,
            if self.inclusive {
                "inclusive"
            } else {
                "exclusive"
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_creation() {
        let bound = Bound::new(Semver::new(1, 0, 0), true);
        assert_eq!(bound.version(), &Semver::new(1, 0, 0));
        assert!(bound.is_inclusive());
    }

    #[test]
    fn test_sentinels() {
        assert!(Bound::zero().is_zero());
        assert!(!Bound::zero().is_positive_infinity());
        assert!(Bound::positive_infinity().is_positive_infinity());
        assert!(!Bound::positive_infinity().is_zero());
    }

    #[test]
    fn test_lower_fits_upper() {
        let lower = Bound::new(Semver::new(1, 0, 0), true);
        let upper = Bound::new(Semver::new(2, 0, 0), false);
        assert!(Bound::lower_fits_upper(&lower, &upper));
        assert!(!Bound::lower_fits_upper(&upper, &lower));

        // Touching bounds intersect only when both sides are inclusive.
        let touch_incl = Bound::new(Semver::new(2, 0, 0), true);
        let touch_excl = Bound::new(Semver::new(2, 0, 0), false);
        assert!(Bound::lower_fits_upper(&touch_incl, &touch_incl));
        assert!(!Bound::lower_fits_upper(&touch_incl, &touch_excl));
        assert!(!Bound::lower_fits_upper(&touch_excl, &touch_incl));
    }

    #[test]
    fn test_tighter_bounds() {
        let one_incl = Bound::new(Semver::new(1, 0, 0), true);
        let one_excl = Bound::new(Semver::new(1, 0, 0), false);
        let two = Bound::new(Semver::new(2, 0, 0), true);

        assert_eq!(Bound::tighter_lower(one_incl.clone(), two.clone()), two);
        assert_eq!(
            Bound::tighter_lower(one_incl.clone(), one_excl.clone()),
            one_excl
        );
        assert_eq!(Bound::tighter_upper(one_incl.clone(), two), one_incl);
    }
}
