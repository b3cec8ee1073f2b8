// Dependency resolution engine for grip
//
// This crate provides the project model (atoms, dependency edges, manifests),
// the source manager capability the solver consumes, the lock model, and the
// backtracking solver itself.

pub mod error;
pub mod lock;
pub mod package;
pub mod repository;
pub mod solver;

pub use error::{Result, SolveError};
pub use lock::{Lock, LockedProject, UpgradeScope};
pub use package::{Dependency, ProjectAtom, ProjectDep, ProjectInfo, ProjectName};
pub use repository::{MemorySourceManager, SourceError, SourceManager};
pub use solver::{Resolution, Solver};
