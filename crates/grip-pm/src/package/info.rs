use super::{ProjectAtom, ProjectDep};
use crate::lock::Lock;

/// The declared dependency lists for one concrete project version.
///
/// Development dependencies only take effect for the root of a solve; for
/// every other project they are carried but ignored. The lock is likewise
/// only meaningful on the root's info.
#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub atom: ProjectAtom,
    pub dependencies: Vec<ProjectDep>,
    pub dev_dependencies: Vec<ProjectDep>,
    pub lock: Option<Lock>,
}

impl ProjectInfo {
    pub fn new(atom: ProjectAtom) -> Self {
        ProjectInfo {
            atom,
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
            lock: None,
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<ProjectDep>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_dev_dependencies(mut self, dev_dependencies: Vec<ProjectDep>) -> Self {
        self.dev_dependencies = dev_dependencies;
        self
    }

    pub fn with_lock(mut self, lock: Lock) -> Self {
        self.lock = Some(lock);
        self
    }
}
