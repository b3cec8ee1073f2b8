//! Backtracking dependency solver
//!
//! The driver lives in [`solver`]; [`selection`], [`unselected`], and
//! [`version_queue`] hold the three data structures it keeps in lockstep,
//! and [`failure`] the structured rejection records.

pub mod failure;

mod selection;
#[allow(clippy::module_inception)]
mod solver;
mod unselected;
mod version_queue;


pub use solver::{Resolution, Solver};
