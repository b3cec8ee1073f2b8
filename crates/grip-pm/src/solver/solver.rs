//! The backtracking solver driver
//!
//! A specialized chronological-backtracking search with satisfiability
//! conditions hardcoded to the shape of the project dependency problem. The
//! driver owns three structures that move in lockstep: the selection (the
//! committed partial solution), the unselected frontier, and a stack of
//! version queues, one per committed non-root project.

use std::collections::{HashMap, HashSet};

use crate::error::SolveError;
use crate::lock::{LockedProject, UpgradeScope};
use crate::package::{Dependency, ProjectAtom, ProjectDep, ProjectInfo, ProjectName};
use crate::repository::SourceManager;
use crate::solver::failure::{
    ConstraintNotAllowedFailure, DisjointConstraintFailure, NoVersionFailure,
    VersionNotAllowedFailure,
};

use super::selection::Selection;
use super::unselected::Unselected;
use super::version_queue::VersionQueue;

/// A complete assignment of one concrete version per transitively required
/// project, the root included.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Committed atoms in commit order. Names are unique and every declared
    /// constraint is satisfied.
    pub projects: Vec<ProjectAtom>,
    /// Number of successful backtracks performed while searching; exposed
    /// for diagnostics.
    pub attempts: u32,
}

/// The solver entry point.
pub struct Solver<'a> {
    sm: &'a dyn SourceManager,
}

impl<'a> Solver<'a> {
    pub fn new(sm: &'a dyn SourceManager) -> Self {
        Solver { sm }
    }

    /// Find one concrete version of every transitively required project such
    /// that all declared constraints hold, or prove no assignment exists.
    ///
    /// `root` describes the project being solved for; its lock (if any)
    /// biases version selection, and `to_upgrade` names the projects for
    /// which that bias should be ignored.
    pub fn solve(
        &self,
        root: ProjectInfo,
        to_upgrade: UpgradeScope,
    ) -> Result<Resolution, SolveError> {
        let mut state = SolveState::new(self.sm, root, to_upgrade);
        let root_atom = state.root.atom.clone();
        state.select_version(root_atom);
        let projects = state.run()?;
        Ok(Resolution {
            projects,
            attempts: state.attempts,
        })
    }
}

/// All mutable solve state, created per solve and torn down with it.
pub(crate) struct SolveState<'a> {
    sm: &'a dyn SourceManager,
    pub(crate) root: ProjectInfo,
    locked: HashMap<ProjectName, LockedProject>,
    to_upgrade: UpgradeScope,
    pub(crate) sel: Selection,
    pub(crate) unsel: Unselected,
    pub(crate) versions: Vec<VersionQueue<'a>>,
    pub(crate) attempts: u32,
}

impl<'a> SolveState<'a> {
    pub(crate) fn new(
        sm: &'a dyn SourceManager,
        root: ProjectInfo,
        to_upgrade: UpgradeScope,
    ) -> Self {
        let mut locked = HashMap::new();
        if let Some(lock) = &root.lock {
            for project in lock.projects() {
                locked.insert(project.name.clone(), project.clone());
            }
        }
        let locked_names: HashSet<ProjectName> = locked.keys().cloned().collect();
        let unsel = Unselected::new(root.atom.name.clone(), locked_names);

        SolveState {
            sm,
            root,
            locked,
            to_upgrade,
            sel: Selection::default(),
            unsel,
            versions: Vec::new(),
            attempts: 0,
        }
    }

    fn root_name(&self) -> &ProjectName {
        &self.root.atom.name
    }

    /// The main step loop: pick the next unselected project, find it a
    /// version, commit, repeat until the frontier drains.
    pub(crate) fn run(&mut self) -> Result<Vec<ProjectAtom>, SolveError> {
        loop {
            let ref_name = match self.unsel.peek() {
                Some(name) => name.clone(),
                None => break,
            };

            log::debug!(
                "beginning step in solve loop: attempts={} name={} selected={} frontier={}",
                self.attempts,
                ref_name,
                self.sel.projects.len(),
                self.unsel.len()
            );

            let queue = match self.create_version_queue(ref_name) {
                Ok(queue) => queue,
                Err(err) => {
                    // Failure somewhere down the line; try walking back to a
                    // decision with untried candidates.
                    if self.backtrack() {
                        continue;
                    }
                    return Err(err);
                }
            };

            let version = match queue.current() {
                Some(version) => version.clone(),
                None => panic!(
                    "version queue for '{}' is empty although construction reported success",
                    queue.ref_name
                ),
            };

            log::info!("accepted project atom {}@{}", queue.ref_name, version);

            let atom = ProjectAtom::new(queue.ref_name.clone(), version);
            self.select_version(atom);
            self.versions.push(queue);
            debug_assert_eq!(self.versions.len() + 1, self.sel.projects.len());
        }

        Ok(self.sel.projects.clone())
    }

    /// Build the version queue for `ref_name` and advance it to its first
    /// satisfiable candidate.
    fn create_version_queue(
        &mut self,
        ref_name: ProjectName,
    ) -> Result<VersionQueue<'a>, SolveError> {
        if &ref_name == self.root_name() {
            // The root has no candidates to choose among.
            return Ok(VersionQueue::trivial(
                ref_name,
                ProjectAtom::nil_placeholder().version.clone(),
                self.sm,
            ));
        }

        let mut exists = self.sm.repo_exists(&ref_name)?;
        if !exists {
            exists = self.sm.vendor_code_exists(&ref_name)?;
            if exists {
                log::warn!(
                    "code for '{}' found in vendor, but no history upstream or in cache",
                    ref_name
                );
            } else {
                log::warn!("project '{}' does not exist upstream or in vendor", ref_name);
                return Err(SolveError::CannotResolve { name: ref_name });
            }
        }

        let lock_atom = self.lock_version_if_valid(&ref_name);
        let seeded_from_lock = &lock_atom != ProjectAtom::nil_placeholder();

        let mut queue = match VersionQueue::new(ref_name, lock_atom, self.sm) {
            Ok(queue) => queue,
            Err(err) => {
                log::warn!("failed to create a version queue: {}", err);
                return Err(err);
            }
        };

        if seeded_from_lock {
            log::debug!("created version queue for '{}' seeded from lock", queue.ref_name);
        } else {
            log::debug!("created version queue for '{}', no data in lock", queue.ref_name);
        }

        self.find_valid_version(&mut queue)?;
        Ok(queue)
    }

    /// Walk `queue` until a candidate passes the satisfiability check.
    ///
    /// If the walk exhausts the queue, the project that originally
    /// introduced `queue.ref_name` into the search is marked failed so its
    /// queue becomes the first retry candidate while backtracking, and the
    /// failures recorded during this walk are returned as an aggregate.
    fn find_valid_version(&mut self, queue: &mut VersionQueue<'a>) -> Result<(), SolveError> {
        if queue.current().is_none() {
            panic!(
                "version queue for '{}' is empty at the start of the search",
                queue.ref_name
            );
        }

        let fail_mark = queue.fails.len();

        log::debug!(
            "searching for a valid version of '{}': has_lock={} all_loaded={}",
            queue.ref_name,
            queue.has_lock,
            queue.all_loaded()
        );

        loop {
            let current = match queue.current() {
                Some(version) => version.clone(),
                None => break,
            };
            let atom = ProjectAtom::new(queue.ref_name.clone(), current.clone());
            match self.satisfiable(&atom) {
                Ok(()) => {
                    log::debug!("found acceptable version {}@{}", queue.ref_name, current);
                    return Ok(());
                }
                Err(err) => {
                    if queue.advance(Some(err)).is_err() {
                        log::warn!(
                            "advancing the version queue for '{}' failed, marking project as failed",
                            queue.ref_name
                        );
                        break;
                    }
                    if queue.is_exhausted() {
                        log::info!(
                            "version queue for '{}' was completely exhausted, marking project as failed",
                            queue.ref_name
                        );
                        break;
                    }
                }
            }
        }

        // The first inbound edge belongs to the project that introduced this
        // one into the search; its queue becomes the first retry candidate.
        let introducer = self
            .sel
            .get_dependencies_on(&queue.ref_name)
            .first()
            .map(|edge| edge.depender.name.clone())
            .unwrap_or_else(|| {
                panic!(
                    "no inbound dependers recorded for '{}' while failing its queue",
                    queue.ref_name
                )
            });
        self.fail(&introducer);

        Err(SolveError::NoVersion(NoVersionFailure {
            name: queue.ref_name.clone(),
            fails: queue.fails[fail_mark..].to_vec(),
        }))
    }

    /// Derive the lock-biased atom for `ref_name`, or the nil placeholder
    /// when the lock should not (or cannot) bias this project.
    fn lock_version_if_valid(&self, ref_name: &ProjectName) -> ProjectAtom {
        let mut upgrade_fallback = false;
        if self.to_upgrade.contains(ref_name) {
            // Ignore the error here; a real problem will resurface when the
            // queue loads its candidates.
            let exists = self.sm.repo_exists(ref_name).unwrap_or(false);
            if exists {
                return ProjectAtom::nil_placeholder().clone();
            }
            // No upstream repository: whatever the lock holds is the only
            // version obtainable at all, so keep it despite the upgrade mark.
            upgrade_fallback = true;
        }

        let locked = match self.locked.get(ref_name) {
            Some(locked) => locked,
            None => {
                log::debug!("project '{}' not present in lock", ref_name);
                return ProjectAtom::nil_placeholder().clone();
            }
        };

        let constraint = self.sel.get_constraint(ref_name);
        if !constraint.matches(&locked.version) {
            log::info!(
                "lock has {}@{}, but the version is not allowed by current constraints",
                locked.name,
                locked.version
            );
            return ProjectAtom::nil_placeholder().clone();
        }

        if upgrade_fallback {
            log::warn!(
                "'{}' is marked for upgrade but has no upstream; using locked version {}",
                locked.name,
                locked.version
            );
        } else {
            log::info!("project found in lock: {}@{}", locked.name, locked.version);
        }

        ProjectAtom::new(locked.name.clone(), locked.version.clone())
    }

    /// Decide whether committing `atom` keeps every requirement satisfiable.
    ///
    /// Phase 1 tests the atom's version against the constraints already on
    /// its name; phase 2 tests each of the atom's declared dependencies
    /// against the edges and selections already in place. On every rejection
    /// the specific dependers responsible are marked failed so that their
    /// queues become the retry candidates during backtracking.
    ///
    /// An edge that would close a cycle through the selection is accepted
    /// as-is; the solver performs no cycle detection.
    pub(crate) fn satisfiable(&mut self, atom: &ProjectAtom) -> Result<(), SolveError> {
        if atom.is_empty() {
            panic!("checked satisfiability of an empty project atom");
        }

        log::debug!(
            "checking satisfiability of {}@{} against current constraints",
            atom.name,
            atom.version
        );

        let constraint = self.sel.get_constraint(&atom.name);
        if !constraint.matches(&atom.version) {
            log::info!(
                "current constraint {} does not allow {}@{}",
                constraint,
                atom.name,
                atom.version
            );

            let edges = self.sel.get_dependencies_on(&atom.name).to_vec();
            let mut fail_parents = Vec::new();
            for edge in edges {
                if !edge.dep.constraint.matches(&atom.version) {
                    log::debug!(
                        "marking depender '{}' as failed: its constraint {} rejects {}",
                        edge.depender.name,
                        edge.dep.constraint,
                        atom.version
                    );
                    self.fail(&edge.depender.name);
                    fail_parents.push(edge);
                }
            }

            return Err(SolveError::VersionNotAllowed(VersionNotAllowedFailure {
                goal: atom.clone(),
                fail_parents,
                constraint,
            }));
        }

        let deps = self.get_dependencies_of(atom)?;
        for dep in deps {
            let siblings = self.sel.get_dependencies_on(&dep.name).to_vec();
            let constraint = self.sel.get_constraint(&dep.name);

            // The new edge must leave at least some possible intersection
            // with the edges already on the target.
            if !constraint.matches_any(dep.constraint.as_ref()) {
                log::debug!(
                    "{}@{} cannot be added: constraint {} on '{}' is disjoint with existing {}",
                    atom.name,
                    atom.version,
                    dep.constraint,
                    dep.name,
                    constraint
                );

                let mut failed_siblings = Vec::new();
                let mut other_siblings = Vec::new();
                for sibling in siblings {
                    if !sibling.dep.constraint.matches_any(dep.constraint.as_ref()) {
                        log::debug!(
                            "marking '{}' as failed: its constraint on '{}' is disjoint with the candidate's",
                            sibling.depender.name,
                            dep.name
                        );
                        self.fail(&sibling.depender.name);
                        failed_siblings.push(sibling);
                    } else {
                        other_siblings.push(sibling);
                    }
                }

                return Err(SolveError::DisjointConstraint(DisjointConstraintFailure {
                    goal: Dependency::new(atom.clone(), dep),
                    failed_siblings,
                    other_siblings,
                    constraint,
                }));
            }

            if let Some(selected) = self.sel.selected(&dep.name).cloned() {
                if !dep.constraint.matches(&selected.version) {
                    log::debug!(
                        "{}@{} cannot be added: constraint {} on '{}' does not allow selected {}",
                        atom.name,
                        atom.version,
                        dep.constraint,
                        dep.name,
                        selected.version
                    );
                    self.fail(&dep.name);

                    return Err(SolveError::ConstraintNotAllowed(
                        ConstraintNotAllowedFailure {
                            goal: Dependency::new(atom.clone(), dep),
                            selected: selected.version,
                        },
                    ));
                }
            }
        }

        log::debug!(
            "{}@{} passed satisfiability against current state",
            atom.name,
            atom.version
        );
        Ok(())
    }

    /// The declared dependencies of `atom`; for the root, the dev list is
    /// merged in.
    fn get_dependencies_of(&self, atom: &ProjectAtom) -> Result<Vec<ProjectDep>, SolveError> {
        let info = self.sm.project_info(atom)?;
        let mut deps = info.dependencies;
        if &atom.name == self.root_name() {
            deps.extend(info.dev_dependencies);
        }
        Ok(deps)
    }

    /// Mark the oldest version queue for `name` as failed. The root is never
    /// marked; the backtracker pops through any younger queues on its way.
    fn fail(&mut self, name: &ProjectName) {
        if name == self.root_name() {
            log::debug!("not marking the root project as failed");
            return;
        }

        for queue in self.versions.iter_mut() {
            if &queue.ref_name == name {
                queue.failed = true;
                return;
            }
        }
    }

    /// Commit `atom`: remove its name from the frontier, append it to the
    /// selection, and record one inbound edge per declared dependency,
    /// pushing newly referenced names onto the frontier.
    pub(crate) fn select_version(&mut self, atom: ProjectAtom) {
        self.unsel.remove(&atom.name);
        self.sel.projects.push(atom.clone());

        // The atom was either supplied by the caller or already vetted by
        // the satisfiability check, so its declarations must be fetchable.
        let deps = match self.get_dependencies_of(&atom) {
            Ok(deps) => deps,
            Err(err) => panic!(
                "dependency fetch for committed atom {}@{} failed: {}",
                atom.name, atom.version, err
            ),
        };

        for dep in deps {
            let name = dep.name.clone();

            // Cache the upstream version count the frontier comparator needs
            // before the name can take part in heap ordering. Lookup errors
            // are ignored; they resurface when the project is selected.
            if self.unsel.needs_version_count(&name) {
                let count = self
                    .sm
                    .list_versions(&name)
                    .map(|versions| versions.len())
                    .unwrap_or(0);
                self.unsel.record_version_count(name.clone(), count);
            }

            let edges = self.sel.deps.entry(name.clone()).or_default();
            edges.push(Dependency::new(atom.clone(), dep));
            let first_edge = edges.len() == 1;
            if first_edge {
                self.unsel.push(name);
            }
        }
    }

    /// The exact inverse of [`SolveState::select_version`], consulting the
    /// same declaration list. The source manager's determinism contract is
    /// what makes the replayed lookup safe.
    pub(crate) fn unselect_last(&mut self) {
        let atom = match self.sel.projects.pop() {
            Some(atom) => atom,
            None => panic!("unselect requested with an empty selection"),
        };
        self.unsel.push(atom.name.clone());

        let deps = match self.get_dependencies_of(&atom) {
            Ok(deps) => deps,
            Err(err) => panic!(
                "dependency fetch for {}@{} failed during unselect after succeeding at select: {}",
                atom.name, atom.version, err
            ),
        };

        for dep in deps {
            let edges = match self.sel.deps.get_mut(&dep.name) {
                Some(edges) => edges,
                None => panic!(
                    "no edge list for '{}' while unselecting {}",
                    dep.name, atom.name
                ),
            };
            edges.pop();
            if edges.is_empty() {
                self.sel.deps.shift_remove(&dep.name);
                log::debug!(
                    "removing '{}' from the frontier; last depender {} was unselected",
                    dep.name,
                    atom.name
                );
                self.unsel.remove(&dep.name);
            }
        }
    }

    /// Work backwards from a failure to the nearest past decision whose
    /// queue still has untried candidates, and resume from there. Returns
    /// false when the stack is exhausted and the solve has truly failed.
    fn backtrack(&mut self) -> bool {
        if self.versions.is_empty() {
            // Nothing to backtrack to.
            return false;
        }

        log::debug!(
            "beginning backtracking: selected={} queues={} attempts={}",
            self.sel.projects.len(),
            self.versions.len(),
            self.attempts
        );

        loop {
            // Discard frames until a queue marked as failed surfaces.
            loop {
                match self.versions.last() {
                    None => return false,
                    Some(queue) if queue.failed => break,
                    Some(queue) => {
                        log::info!("backtracking popped off '{}' (not failed)", queue.ref_name)
                    }
                }
                self.versions.pop();
                self.unselect_last();
            }

            // Take the failed queue off the stack while retrying it, and
            // retract the atom it had committed.
            let mut queue = self
                .versions
                .pop()
                .expect("a failed queue was just observed at the top of the stack");

            log::debug!(
                "trying failed queue for '{}' with next version (known bad: {:?})",
                queue.ref_name,
                queue.current()
            );

            self.unselect_last();

            // Advance past the current version, which is known bad.
            if queue.advance(None).is_ok() && !queue.is_exhausted() {
                if self.find_valid_version(&mut queue).is_ok() {
                    let version = queue
                        .current()
                        .cloned()
                        .expect("a successful search leaves a current candidate");
                    log::info!(
                        "backtracking found valid version {}@{}, attempting next solution",
                        queue.ref_name,
                        version
                    );

                    let atom = ProjectAtom::new(queue.ref_name.clone(), version);
                    self.select_version(atom);
                    self.versions.push(queue);
                    break;
                }
            }

            log::info!("backtracking popped off '{}' (failed)", queue.ref_name);
            // This frame is dead; continue down the stack.
        }

        self.attempts += 1;
        debug_assert_eq!(self.versions.len() + 1, self.sel.projects.len());
        true
    }
}
