//! Per-project enumerator of candidate versions

use std::fmt;

use grip_semver::Version;

use crate::error::SolveError;
use crate::package::{ProjectAtom, ProjectName};
use crate::repository::SourceManager;

/// Candidate versions for one project.
///
/// When a usable locked version exists it forms the head of the queue and
/// the upstream enumeration is deferred until that head is consumed; in the
/// common case where the lock holds, upstream is never asked for its list at
/// all. Failures observed while walking the queue accumulate in `fails` so
/// an exhausted queue can explain itself.
pub(crate) struct VersionQueue<'a> {
    pub(crate) ref_name: ProjectName,
    candidates: Vec<Version>,
    pub(crate) fails: Vec<SolveError>,
    /// Set by the driver when the currently selected version is known bad
    /// and the queue must advance before being reused.
    pub(crate) failed: bool,
    pub(crate) has_lock: bool,
    all_loaded: bool,
    sm: &'a dyn SourceManager,
}

impl<'a> VersionQueue<'a> {
    /// Create a queue for `ref_name`. A lock atom other than the nil
    /// placeholder seeds the queue; otherwise the upstream list is loaded
    /// immediately.
    pub(crate) fn new(
        ref_name: ProjectName,
        lock: ProjectAtom,
        sm: &'a dyn SourceManager,
    ) -> Result<Self, SolveError> {
        let mut queue = VersionQueue {
            ref_name,
            candidates: Vec::new(),
            fails: Vec::new(),
            failed: false,
            has_lock: false,
            all_loaded: false,
            sm,
        };
        if &lock != ProjectAtom::nil_placeholder() {
            queue.has_lock = true;
            queue.candidates.push(lock.version);
        } else {
            queue.load_remaining()?;
        }
        Ok(queue)
    }

    /// A queue holding exactly one fixed candidate, with nothing upstream to
    /// fall back to. Used for the root, which has no versions to choose
    /// among.
    pub(crate) fn trivial(ref_name: ProjectName, version: Version, sm: &'a dyn SourceManager) -> Self {
        VersionQueue {
            ref_name,
            candidates: vec![version],
            fails: Vec::new(),
            failed: false,
            has_lock: false,
            all_loaded: true,
            sm,
        }
    }

    /// The candidate at the head of the queue, if any remain.
    pub(crate) fn current(&self) -> Option<&Version> {
        self.candidates.first()
    }

    /// Record `reason` (when given) and drop the current head. Errors only
    /// when drawing the next batch from the source manager fails.
    pub(crate) fn advance(&mut self, reason: Option<SolveError>) -> Result<(), SolveError> {
        if let Some(reason) = reason {
            self.fails.push(reason);
        }
        if !self.candidates.is_empty() {
            self.candidates.remove(0);
        }
        if self.candidates.is_empty() && !self.all_loaded {
            self.load_remaining()?;
        }
        Ok(())
    }

    /// No candidates remain and none are left to load.
    pub(crate) fn is_exhausted(&self) -> bool {
        self.all_loaded && self.candidates.is_empty()
    }

    pub(crate) fn all_loaded(&self) -> bool {
        self.all_loaded
    }

    fn load_remaining(&mut self) -> Result<(), SolveError> {
        let versions = self.sm.list_versions(&self.ref_name)?;
        self.candidates.extend(versions);
        self.all_loaded = true;
        Ok(())
    }
}

impl fmt::Debug for VersionQueue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionQueue")
            .field("ref_name", &self.ref_name)
            .field("candidates", &self.candidates)
            .field("fails", &self.fails.len())
            .field("failed", &self.failed)
            .field("has_lock", &self.has_lock)
            .field("all_loaded", &self.all_loaded)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemorySourceManager;

    fn sample_error() -> SolveError {
        SolveError::CannotResolve {
            name: ProjectName::from("x"),
        }
    }

    #[test]
    fn test_queue_without_lock_loads_upstream() {
        let mut sm = MemorySourceManager::new();
        sm.publish("a", "2.0.0", &[]).publish("a", "1.0.0", &[]);

        let queue = VersionQueue::new(
            ProjectName::from("a"),
            ProjectAtom::nil_placeholder().clone(),
            &sm,
        )
        .unwrap();
        assert!(!queue.has_lock);
        assert!(queue.all_loaded());
        assert_eq!(queue.current(), Some(&Version::semantic(2, 0, 0)));
    }

    #[test]
    fn test_queue_with_lock_defers_upstream() {
        let mut sm = MemorySourceManager::new();
        sm.publish("a", "2.0.0", &[]).publish("a", "1.0.0", &[]);

        let lock = ProjectAtom::new(ProjectName::from("a"), Version::semantic(1, 0, 0));
        let mut queue = VersionQueue::new(ProjectName::from("a"), lock, &sm).unwrap();
        assert!(queue.has_lock);
        assert!(!queue.all_loaded());
        assert_eq!(queue.current(), Some(&Version::semantic(1, 0, 0)));

        // Consuming the lock head pulls in the upstream tail.
        queue.advance(None).unwrap();
        assert!(queue.all_loaded());
        assert_eq!(queue.current(), Some(&Version::semantic(2, 0, 0)));
    }

    #[test]
    fn test_advance_records_failures() {
        let mut sm = MemorySourceManager::new();
        sm.publish("a", "2.0.0", &[]).publish("a", "1.0.0", &[]);

        let mut queue = VersionQueue::new(
            ProjectName::from("a"),
            ProjectAtom::nil_placeholder().clone(),
            &sm,
        )
        .unwrap();
        queue.advance(Some(sample_error())).unwrap();
        queue.advance(Some(sample_error())).unwrap();

        assert_eq!(queue.fails.len(), 2);
        assert!(queue.is_exhausted());
        assert_eq!(queue.current(), None);
    }

    #[test]
    fn test_queue_for_unknown_project_errors() {
        let sm = MemorySourceManager::new();
        let result = VersionQueue::new(
            ProjectName::from("ghost"),
            ProjectAtom::nil_placeholder().clone(),
            &sm,
        );
        assert!(matches!(result, Err(SolveError::Source(_))));
    }

    #[test]
    fn test_trivial_queue() {
        let sm = MemorySourceManager::new();
        let queue = VersionQueue::trivial(
            ProjectName::from("root"),
            Version::semantic(1, 0, 0),
            &sm,
        );
        assert_eq!(queue.current(), Some(&Version::semantic(1, 0, 0)));
        assert!(!queue.is_exhausted());
    }
}
