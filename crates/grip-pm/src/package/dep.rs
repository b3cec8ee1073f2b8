use std::fmt;

use grip_semver::Constraint;

use super::{ProjectAtom, ProjectName};

/// A declared dependency: the target project and the version constraint the
/// declarer imposes on it.
#[derive(Debug, Clone)]
pub struct ProjectDep {
    pub name: ProjectName,
    pub constraint: Box<dyn Constraint>,
}

impl ProjectDep {
    /// Creates a new declared dependency
    pub fn new(name: ProjectName, constraint: Box<dyn Constraint>) -> Self {
        ProjectDep { name, constraint }
    }
}

impl fmt::Display for ProjectDep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.constraint)
    }
}

/// An instantiated dependency edge: a declared dependency currently imposed
/// by a committed atom.
#[derive(Debug, Clone)]
pub struct Dependency {
    pub depender: ProjectAtom,
    pub dep: ProjectDep,
}

impl Dependency {
    pub fn new(depender: ProjectAtom, dep: ProjectDep) -> Self {
        Dependency { depender, dep }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requires {} ({})",
            self.depender, self.dep.name, self.dep.constraint
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grip_semver::parse_constraint;
    use grip_semver::Version;

    #[test]
    fn test_dependency_display() {
        let edge = Dependency::new(
            ProjectAtom::new(ProjectName::from("app"), Version::semantic(1, 0, 0)),
            ProjectDep::new(ProjectName::from("lib"), parse_constraint("^1.2").unwrap()),
        );
        let rendered = edge.to_string();
        assert!(rendered.contains("app@1.0.0"));
        assert!(rendered.contains("requires lib"));
    }
}
