//! Lock data from a prior solve, consumed as version-selection hints

use std::collections::BTreeSet;

use grip_semver::Version;
use serde::{Deserialize, Serialize};

use crate::package::ProjectName;

/// A single pinned project carried over from a prior solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedProject {
    pub name: ProjectName,
    pub version: Version,
}

impl LockedProject {
    pub fn new(name: ProjectName, version: Version) -> Self {
        LockedProject { name, version }
    }
}

/// The output of a prior solve. The solver treats it purely as a set of
/// per-project version preferences; the on-disk format is the concern of
/// whoever produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lock {
    projects: Vec<LockedProject>,
}

impl Lock {
    pub fn new(projects: Vec<LockedProject>) -> Self {
        Lock { projects }
    }

    pub fn projects(&self) -> &[LockedProject] {
        &self.projects
    }

    /// Add a pin. Version strings that do not parse as releases become
    /// branch pins.
    pub fn pin(mut self, name: &str, version: &str) -> Self {
        self.projects.push(LockedProject::new(
            ProjectName::from(name),
            Version::parse(version),
        ));
        self
    }
}

/// Which projects should ignore the lock and chase upstream versions.
///
/// The distinction between "upgrade everything" and an enumerated list is
/// kept structural so callers can tell an explicitly named project apart
/// from one swept up by a blanket upgrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeScope {
    /// Upgrade only the listed projects. An empty list upgrades nothing.
    Listed(BTreeSet<ProjectName>),
    /// Upgrade every project.
    All,
}

impl UpgradeScope {
    /// Upgrade nothing.
    pub fn none() -> Self {
        UpgradeScope::Listed(BTreeSet::new())
    }

    /// Upgrade the given projects only.
    pub fn listed<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<ProjectName>,
    {
        UpgradeScope::Listed(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &ProjectName) -> bool {
        match self {
            UpgradeScope::All => true,
            UpgradeScope::Listed(names) => names.contains(name),
        }
    }
}

impl Default for UpgradeScope {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_pin_builder() {
        let lock = Lock::default().pin("a", "1.0.0").pin("b", "main");
        assert_eq!(lock.projects().len(), 2);
        assert_eq!(lock.projects()[0].version, Version::semantic(1, 0, 0));
        assert_eq!(
            lock.projects()[1].version,
            Version::Branch("main".to_string())
        );
    }

    #[test]
    fn test_upgrade_scope_membership() {
        let scope = UpgradeScope::listed(["a", "b"]);
        assert!(scope.contains(&ProjectName::from("a")));
        assert!(!scope.contains(&ProjectName::from("c")));

        assert!(UpgradeScope::All.contains(&ProjectName::from("anything")));
        assert!(!UpgradeScope::none().contains(&ProjectName::from("a")));
    }
}
