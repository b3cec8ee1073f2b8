//! The current partial solution: committed atoms and their inbound edges

use grip_semver::{Constraint, MatchAllConstraint, MultiConstraint};
use indexmap::IndexMap;

use crate::package::{Dependency, ProjectAtom, ProjectName};

/// The selection is mutated only by the driver, which keeps `projects` in
/// commit order and every edge list in creation order. Both orders are load
/// bearing: the first edge on a name identifies the project that introduced
/// it into the search.
#[derive(Debug, Default)]
pub(crate) struct Selection {
    pub(crate) projects: Vec<ProjectAtom>,
    pub(crate) deps: IndexMap<ProjectName, Vec<Dependency>>,
}

impl Selection {
    /// The intersection of every constraint currently imposed on `name`.
    /// With no inbound edges this is the universal constraint.
    pub(crate) fn get_constraint(&self, name: &ProjectName) -> Box<dyn Constraint> {
        let deps = match self.deps.get(name) {
            Some(deps) if !deps.is_empty() => deps,
            _ => return Box::new(MatchAllConstraint::new()),
        };
        MultiConstraint::intersection(
            deps.iter()
                .map(|dependency| dependency.dep.constraint.clone())
                .collect(),
        )
    }

    /// Inbound edges on `name` in creation order. The first element is the
    /// oldest depender still live.
    pub(crate) fn get_dependencies_on(&self, name: &ProjectName) -> &[Dependency] {
        self.deps.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The committed atom for `name`, if one exists.
    pub(crate) fn selected(&self, name: &ProjectName) -> Option<&ProjectAtom> {
        self.projects.iter().find(|atom| &atom.name == name)
    }
}
