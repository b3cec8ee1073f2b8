use thiserror::Error;

use crate::package::ProjectName;
use crate::repository::SourceError;
use crate::solver::failure::{
    ConstraintNotAllowedFailure, DisjointConstraintFailure, NoVersionFailure,
    VersionNotAllowedFailure,
};

/// Failure of a solve, or of a single candidate during one.
///
/// The same type serves both levels: candidate-level rejections are recorded
/// in the version queues' failure logs and aggregate into [`SolveError::NoVersion`],
/// and whatever failure survives backtracking to the top is returned
/// unchanged as the solve's result.
#[derive(Error, Debug, Clone)]
pub enum SolveError {
    /// The project exists in no upstream and no vendor directory.
    #[error("project '{name}' could not be located")]
    CannotResolve { name: ProjectName },

    #[error(transparent)]
    VersionNotAllowed(#[from] VersionNotAllowedFailure),

    #[error(transparent)]
    DisjointConstraint(#[from] DisjointConstraintFailure),

    #[error(transparent)]
    ConstraintNotAllowed(#[from] ConstraintNotAllowedFailure),

    #[error(transparent)]
    NoVersion(#[from] NoVersionFailure),

    /// A source manager call failed; surfaced as-is.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl SolveError {
    /// Render the full multi-line account of the failure. `Display` stays a
    /// one-line headline.
    pub fn describe(&self) -> String {
        match self {
            SolveError::CannotResolve { .. } | SolveError::Source(_) => self.to_string(),
            SolveError::VersionNotAllowed(failure) => failure.describe(),
            SolveError::DisjointConstraint(failure) => failure.describe(),
            SolveError::ConstraintNotAllowed(failure) => failure.describe(),
            SolveError::NoVersion(failure) => failure.describe(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SolveError>;
