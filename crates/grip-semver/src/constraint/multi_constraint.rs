//! MultiConstraint - compound constraint intersecting multiple constraints

use std::fmt;

use super::{intersects, Bound, Constraint, MatchAllConstraint, MatchNoneConstraint};
use crate::version::Version;

/// The intersection of several constraints: a version matches only when
/// every member accepts it.
#[derive(Debug, Clone)]
pub struct MultiConstraint {
    constraints: Vec<Box<dyn Constraint>>,
}

impl MultiConstraint {
    /// Build the intersection of a set of constraints, optimizing where
    /// possible: the empty set collapses to match-all, a singleton to its
    /// only member, nested compounds are flattened, and any match-none
    /// member poisons the whole result.
    pub fn intersection(constraints: Vec<Box<dyn Constraint>>) -> Box<dyn Constraint> {
        let mut flattened: Vec<Box<dyn Constraint>> = Vec::new();
        for constraint in constraints {
            if constraint.is_match_none() {
                return Box::new(MatchNoneConstraint::new());
            }
            if constraint.is_match_all() {
                continue;
            }
            match constraint.as_multi() {
                Some(members) => flattened.extend(members.iter().cloned()),
                None => flattened.push(constraint),
            }
        }

        match flattened.len() {
            0 => Box::new(MatchAllConstraint::new()),
            1 => flattened.into_iter().next().unwrap(),
            _ => Box::new(MultiConstraint {
                constraints: flattened,
            }),
        }
    }

    /// Intersect two constraints.
    pub fn intersect(a: Box<dyn Constraint>, b: Box<dyn Constraint>) -> Box<dyn Constraint> {
        Self::intersection(vec![a, b])
    }

    /// Get the member constraints
    pub fn constraints(&self) -> &[Box<dyn Constraint>] {
        &self.constraints
    }
}

impl Constraint for MultiConstraint {
    fn matches(&self, version: &Version) -> bool {
        self.constraints
            .iter()
            .all(|constraint| constraint.matches(version))
    }

    fn matches_any(&self, other: &dyn Constraint) -> bool {
        intersects(self, other)
    }

    fn lower_bound(&self) -> Bound {
        self.constraints
            .iter()
            .map(|constraint| constraint.lower_bound())
            .fold(Bound::zero(), Bound::tighter_lower)
    }

    fn upper_bound(&self) -> Bound {
        self.constraints
            .iter()
            .map(|constraint| constraint.upper_bound())
            .fold(Bound::positive_infinity(), Bound::tighter_upper)
    }

    fn clone_box(&self) -> Box<dyn Constraint> {
        Box::new(self.clone())
    }

    fn as_multi(&self) -> Option<&[Box<dyn Constraint>]> {
        Some(&self.constraints)
    }
}

impl fmt::Display for MultiConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<String> = self
            .constraints
            .iter()
            .map(|constraint| constraint.to_string())
            .collect();
        write!(f, "[{}]", members.join(" "))
    }
}
