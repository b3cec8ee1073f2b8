// Project model for the solver
//
// This module provides the types the solver commits and reasons about:
// project identities, concrete atoms, declared dependencies, and the
// instantiated edges between committed atoms.

mod atom;
mod dep;
mod info;

pub use atom::{ProjectAtom, ProjectName};
pub use dep::{Dependency, ProjectDep};
pub use info::ProjectInfo;
