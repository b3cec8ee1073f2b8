use std::fmt;
use std::sync::OnceLock;

use grip_semver::Version;
use serde::{Deserialize, Serialize};

/// Identity of a project. Names are unique: no two distinct projects share
/// one, and ordering is plain lexical ordering of the name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(name: impl Into<String>) -> Self {
        ProjectName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProjectName {
    fn from(name: &str) -> Self {
        ProjectName(name.to_string())
    }
}

impl From<String> for ProjectName {
    fn from(name: String) -> Self {
        ProjectName(name)
    }
}

/// A (project name, concrete version) pair: what the solver ultimately
/// commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAtom {
    pub name: ProjectName,
    pub version: Version,
}

impl ProjectAtom {
    pub fn new(name: ProjectName, version: Version) -> Self {
        ProjectAtom { name, version }
    }

    /// The sentinel for "no version chosen".
    pub fn empty() -> Self {
        ProjectAtom {
            name: ProjectName::new(""),
            version: Version::Revision(String::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::empty()
    }

    /// The placeholder atom meaning "no lock preference": no name, and a
    /// process-unique random revision so it cannot collide with a real atom.
    pub fn nil_placeholder() -> &'static ProjectAtom {
        static NIL: OnceLock<ProjectAtom> = OnceLock::new();
        NIL.get_or_init(|| ProjectAtom {
            name: ProjectName::new(""),
            version: Version::Revision(base36(rand::random::<u64>())),
        })
    }
}

impl fmt::Display for ProjectAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

fn base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).expect("base36 digits are ascii")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_ordering_is_lexical() {
        assert!(ProjectName::from("alpha") < ProjectName::from("beta"));
        assert!(ProjectName::from("a") < ProjectName::from("aa"));
    }

    #[test]
    fn test_empty_atom_detection() {
        assert!(ProjectAtom::empty().is_empty());
        let real = ProjectAtom::new(ProjectName::from("a"), Version::semantic(1, 0, 0));
        assert!(!real.is_empty());
    }

    #[test]
    fn test_nil_placeholder_is_stable_and_distinct() {
        let first = ProjectAtom::nil_placeholder();
        let second = ProjectAtom::nil_placeholder();
        assert_eq!(first, second);
        assert!(!first.is_empty());
        assert!(first.name.is_empty());
    }

    #[test]
    fn test_atom_display() {
        let atom = ProjectAtom::new(ProjectName::from("a"), Version::semantic(1, 2, 3));
        assert_eq!(atom.to_string(), "a@1.2.3");
    }

    #[test]
    fn test_base36() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
    }
}
