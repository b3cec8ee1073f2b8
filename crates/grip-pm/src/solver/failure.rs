//! Structured records of why a candidate atom was rejected
//!
//! Each failure carries the state needed for a readable post-mortem: who was
//! being tested, which existing edges disagreed, and what the accumulated
//! constraint looked like at the time. `Display` is a one-line headline;
//! `describe` renders the full account.

use std::fmt;

use grip_semver::{Constraint, Version};

use crate::error::SolveError;
use crate::package::{Dependency, ProjectAtom, ProjectName};

/// A candidate version contradicted the constraint accumulated from the
/// inbound edges on its project.
#[derive(Debug, Clone)]
pub struct VersionNotAllowedFailure {
    /// The atom under test.
    pub goal: ProjectAtom,
    /// The inbound edges whose individual constraints reject the version.
    pub fail_parents: Vec<Dependency>,
    /// The accumulated constraint the version failed against.
    pub constraint: Box<dyn Constraint>,
}

impl VersionNotAllowedFailure {
    pub fn describe(&self) -> String {
        let mut lines = vec![format!(
            "could not use {}: the current constraint is {}",
            self.goal, self.constraint
        )];
        for parent in &self.fail_parents {
            lines.push(format!("  - {}", parent));
        }
        lines.join("\n")
    }
}

impl fmt::Display for VersionNotAllowedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "version {} of {} is not allowed by constraint {}",
            self.goal.version, self.goal.name, self.constraint
        )
    }
}

impl std::error::Error for VersionNotAllowedFailure {}

/// A candidate's outbound edge has no possible intersection with the edges
/// already recorded on the same target.
#[derive(Debug, Clone)]
pub struct DisjointConstraintFailure {
    /// The edge the candidate tried to introduce.
    pub goal: Dependency,
    /// Existing edges individually disjoint with the new one.
    pub failed_siblings: Vec<Dependency>,
    /// Existing edges that are compatible on their own; the conflict only
    /// arises through the combination.
    pub other_siblings: Vec<Dependency>,
    /// The accumulated constraint on the target.
    pub constraint: Box<dyn Constraint>,
}

impl DisjointConstraintFailure {
    pub fn describe(&self) -> String {
        let mut lines = vec![format!(
            "{} is incompatible with the constraints already on {} ({})",
            self.goal, self.goal.dep.name, self.constraint
        )];
        for sibling in &self.failed_siblings {
            lines.push(format!("  - disagrees with {}", sibling));
        }
        for sibling in &self.other_siblings {
            lines.push(format!("  - combined with {}", sibling));
        }
        lines.join("\n")
    }
}

impl fmt::Display for DisjointConstraintFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "constraint {} on {} from {} is disjoint with existing constraints",
            self.goal.dep.constraint, self.goal.dep.name, self.goal.depender
        )
    }
}

impl std::error::Error for DisjointConstraintFailure {}

/// A candidate's outbound edge conflicts with an already selected atom of
/// the target project.
#[derive(Debug, Clone)]
pub struct ConstraintNotAllowedFailure {
    /// The edge the candidate tried to introduce.
    pub goal: Dependency,
    /// The version of the target that is already committed.
    pub selected: Version,
}

impl ConstraintNotAllowedFailure {
    pub fn describe(&self) -> String {
        format!(
            "{}, but {}@{} is already selected",
            self.goal, self.goal.dep.name, self.selected
        )
    }
}

impl fmt::Display for ConstraintNotAllowedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "constraint {} on {} from {} does not allow the selected version {}",
            self.goal.dep.constraint, self.goal.dep.name, self.goal.depender, self.selected
        )
    }
}

impl std::error::Error for ConstraintNotAllowedFailure {}

/// A version queue was walked to exhaustion without finding a satisfiable
/// candidate. Carries the per-candidate failures recorded during the walk.
#[derive(Debug, Clone)]
pub struct NoVersionFailure {
    /// The project whose queue ran dry.
    pub name: ProjectName,
    /// One failure per candidate tried, in discovery order. The type is
    /// recursive on purpose: an entry may itself be a `NoVersion` aggregate
    /// when a failure chain runs through another exhausted queue, and
    /// `describe` follows the chain with no depth guard. Nesting is bounded
    /// by the chain that produced it, never by this type.
    pub fails: Vec<SolveError>,
}

impl NoVersionFailure {
    pub fn describe(&self) -> String {
        let mut lines = vec![format!(
            "no version of {} satisfies the current constraints:",
            self.name
        )];
        for fail in &self.fails {
            lines.push(format!("  - {}", fail));
        }
        lines.join("\n")
    }
}

impl fmt::Display for NoVersionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no satisfiable version found for {} ({} candidates rejected)",
            self.name,
            self.fails.len()
        )
    }
}

impl std::error::Error for NoVersionFailure {}

#[cfg(test)]
mod tests {
    use super::*;
    use grip_semver::parse_constraint;
    use grip_semver::Version;

    use crate::package::ProjectDep;

    fn edge(depender: &str, dv: &str, target: &str, constraint: &str) -> Dependency {
        Dependency::new(
            ProjectAtom::new(ProjectName::from(depender), Version::parse(dv)),
            ProjectDep::new(
                ProjectName::from(target),
                parse_constraint(constraint).unwrap(),
            ),
        )
    }

    #[test]
    fn test_version_not_allowed_describe() {
        let failure = VersionNotAllowedFailure {
            goal: ProjectAtom::new(ProjectName::from("a"), Version::semantic(1, 0, 0)),
            fail_parents: vec![edge("root", "1.0.0", "a", ">=2.0.0")],
            constraint: parse_constraint(">=2.0.0").unwrap(),
        };
        let described = failure.describe();
        assert!(described.contains("a@1.0.0"));
        assert!(described.contains("root@1.0.0 requires a"));
    }

    #[test]
    fn test_no_version_describe_lists_candidates() {
        let inner = VersionNotAllowedFailure {
            goal: ProjectAtom::new(ProjectName::from("a"), Version::semantic(1, 0, 0)),
            fail_parents: vec![],
            constraint: parse_constraint(">=2.0.0").unwrap(),
        };
        let failure = NoVersionFailure {
            name: ProjectName::from("a"),
            fails: vec![SolveError::VersionNotAllowed(inner)],
        };
        assert!(failure.to_string().contains("1 candidates rejected"));
        assert!(failure.describe().contains("no version of a"));
    }

    #[test]
    fn test_no_version_aggregates_nest() {
        // An aggregate may carry another aggregate among its candidate
        // failures; both levels render.
        let leaf = NoVersionFailure {
            name: ProjectName::from("c"),
            fails: vec![],
        };
        let outer = NoVersionFailure {
            name: ProjectName::from("b"),
            fails: vec![SolveError::NoVersion(leaf)],
        };

        let described = outer.describe();
        assert!(described.contains("no version of b"));
        assert!(described.contains("no satisfiable version found for c"));
    }
}
