//! In-memory source manager backed by inline project definitions
//!
//! Useful for tests and for callers that assemble a project universe by
//! hand. Versions are listed in the order they were published here, so
//! fixtures should register the preferred (usually newest) version first.

use std::collections::HashMap;

use grip_semver::{parse_constraint, Version};

use super::{SourceError, SourceManager};
use crate::package::{ProjectAtom, ProjectDep, ProjectInfo, ProjectName};

#[derive(Debug, Default)]
struct ProjectRecord {
    upstream: bool,
    vendored: bool,
    versions: Vec<Version>,
    infos: Vec<ProjectInfo>,
    io_error: Option<String>,
}

/// A [`SourceManager`] holding everything in memory.
#[derive(Debug, Default)]
pub struct MemorySourceManager {
    projects: HashMap<ProjectName, ProjectRecord>,
}

impl MemorySourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an upstream release with its declared dependencies, given as
    /// `(name, constraint)` pairs in the constraint grammar of
    /// [`grip_semver::parse_constraint`].
    ///
    /// Panics on a malformed constraint; this is fixture-construction code
    /// and a bad fixture is a bug at the call site.
    pub fn publish(&mut self, name: &str, version: &str, deps: &[(&str, &str)]) -> &mut Self {
        let atom = ProjectAtom::new(ProjectName::from(name), Version::parse(version));
        let info = ProjectInfo::new(atom).with_dependencies(parse_deps(deps));
        self.publish_info(info)
    }

    /// Register an upstream release from a fully built [`ProjectInfo`].
    pub fn publish_info(&mut self, info: ProjectInfo) -> &mut Self {
        let record = self.projects.entry(info.atom.name.clone()).or_default();
        record.upstream = true;
        record.versions.push(info.atom.version.clone());
        record.infos.push(info);
        self
    }

    /// Register a project that exists only as vendored code: it has a
    /// manifest but no upstream history, so nothing is enumerable.
    pub fn vendor_info(&mut self, info: ProjectInfo) -> &mut Self {
        let record = self.projects.entry(info.atom.name.clone()).or_default();
        record.vendored = true;
        record.infos.push(info);
        self
    }

    /// Flag an already registered project as also having vendored code.
    pub fn mark_vendored(&mut self, name: &str) -> &mut Self {
        self.projects
            .entry(ProjectName::from(name))
            .or_default()
            .vendored = true;
        self
    }

    /// Make every version enumeration of `name` fail as if the backing
    /// store were unreadable, for exercising source-failure paths.
    pub fn fail_listing(&mut self, name: &str, message: &str) -> &mut Self {
        self.projects
            .entry(ProjectName::from(name))
            .or_default()
            .io_error = Some(message.to_string());
        self
    }
}

fn parse_deps(deps: &[(&str, &str)]) -> Vec<ProjectDep> {
    deps.iter()
        .map(|(name, constraint)| {
            ProjectDep::new(
                ProjectName::from(*name),
                parse_constraint(constraint).expect("invalid constraint in fixture"),
            )
        })
        .collect()
}

impl SourceManager for MemorySourceManager {
    fn repo_exists(&self, name: &ProjectName) -> Result<bool, SourceError> {
        Ok(self
            .projects
            .get(name)
            .map(|record| record.upstream)
            .unwrap_or(false))
    }

    fn vendor_code_exists(&self, name: &ProjectName) -> Result<bool, SourceError> {
        Ok(self
            .projects
            .get(name)
            .map(|record| record.vendored)
            .unwrap_or(false))
    }

    fn list_versions(&self, name: &ProjectName) -> Result<Vec<Version>, SourceError> {
        match self.projects.get(name) {
            Some(record) => {
                if let Some(message) = &record.io_error {
                    return Err(SourceError::Io(message.clone()));
                }
                Ok(record.versions.clone())
            }
            None => Err(SourceError::UnknownProject { name: name.clone() }),
        }
    }

    fn project_info(&self, atom: &ProjectAtom) -> Result<ProjectInfo, SourceError> {
        let record = self
            .projects
            .get(&atom.name)
            .ok_or_else(|| SourceError::UnknownProject {
                name: atom.name.clone(),
            })?;
        record
            .infos
            .iter()
            .find(|info| info.atom.version == atom.version)
            .cloned()
            .ok_or_else(|| SourceError::UnknownVersion { atom: atom.clone() })
    }
}
