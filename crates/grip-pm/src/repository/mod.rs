//! Source manager: the capability through which the solver learns about
//! projects
//!
//! The solver never touches the network, a VCS, or the filesystem itself;
//! everything it knows about upstream projects arrives through this trait.

mod memory;

pub use memory::MemorySourceManager;

use grip_semver::Version;
use thiserror::Error;

use crate::package::{ProjectAtom, ProjectInfo, ProjectName};

/// Errors produced by a source manager.
///
/// Transport-level failures (network, VCS, disk) are folded into
/// [`SourceError::Repository`] by the implementation so that errors stay
/// cheap to carry around in the solver's failure logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("unknown project '{name}'")]
    UnknownProject { name: ProjectName },

    #[error("no manifest available for {atom}")]
    UnknownVersion { atom: ProjectAtom },

    /// A read from the backing store failed. Carried as the rendered
    /// message rather than the underlying `std::io::Error`, which is not
    /// `Clone`.
    #[error("io error: {0}")]
    Io(String),

    #[error("repository error: {0}")]
    Repository(String),
}

/// Synchronous window onto the universe of projects.
///
/// Implementations may parallelize internally but must present a sequential
/// request/response interface, and must answer identically when asked the
/// same question twice within one solve: the solver replays lookups while
/// rolling back speculative decisions and relies on the answers not moving.
pub trait SourceManager {
    /// Is this project known upstream?
    fn repo_exists(&self, name: &ProjectName) -> Result<bool, SourceError>;

    /// Is there a local vendored copy of this project?
    fn vendor_code_exists(&self, name: &ProjectName) -> Result<bool, SourceError>;

    /// All known versions of a project, in the manager's preferred order
    /// (typically newest first).
    fn list_versions(&self, name: &ProjectName) -> Result<Vec<Version>, SourceError>;

    /// The declared dependencies (and dev dependencies) of a concrete atom.
    fn project_info(&self, atom: &ProjectAtom) -> Result<ProjectInfo, SourceError>;
}
