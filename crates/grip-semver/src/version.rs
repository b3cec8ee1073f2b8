//! Version representation: semantic releases, branches, and revisions

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,
    #[error("invalid version component '{0}'")]
    InvalidComponent(String),
    #[error("too many version components in '{0}'")]
    TooManyComponents(String),
}

/// A semantic version: `major.minor.patch` with an optional pre-release tag.
///
/// Build metadata (`+...`) is accepted by the parser and discarded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Semver {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<String>,
}

impl Semver {
    /// Create a release version without a pre-release tag.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Semver {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Attach a pre-release tag.
    pub fn with_pre(mut self, pre: impl Into<String>) -> Self {
        self.pre = Some(pre.into());
        self
    }

    /// Parse a version string such as `1.2.3`, `v2.0`, or `1.0.0-beta.1`.
    ///
    /// Missing minor/patch components default to zero.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        Self::parse_partial(input).map(|(version, _)| version)
    }

    /// Parse like [`Semver::parse`], additionally reporting how many numeric
    /// components the input spelled out (1 to 3). Caret and tilde ranges need
    /// the count to pick the right upper bound.
    pub(crate) fn parse_partial(input: &str) -> Result<(Self, usize), VersionError> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let trimmed = match trimmed.split_once('+') {
            Some((head, _meta)) => head,
            None => trimmed,
        };
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        let (numeric, pre) = match trimmed.split_once('-') {
            Some((head, tail)) => (head, Some(tail.to_string())),
            None => (trimmed, None),
        };

        let mut parts = [0u64; 3];
        let mut count = 0;
        for piece in numeric.split('.') {
            if count == 3 {
                return Err(VersionError::TooManyComponents(input.to_string()));
            }
            let value = piece
                .parse::<u64>()
                .map_err(|_| VersionError::InvalidComponent(piece.to_string()))?;
            parts[count] = value;
            count += 1;
        }

        Ok((
            Semver {
                major: parts[0],
                minor: parts[1],
                patch: parts[2],
                pre,
            },
            count,
        ))
    }
}

impl Ord for Semver {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                // A release sorts above any of its pre-releases.
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for Semver {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Semver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref pre) = self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

/// A concrete version of a project.
///
/// Projects are not always released: the solver also has to handle projects
/// pinned to a VCS branch or to a bare revision identifier. Only semantic
/// versions participate in range comparisons; branches and revisions match
/// solely by equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Version {
    Semantic(Semver),
    Branch(String),
    Revision(String),
}

impl Version {
    /// Parse a version string, falling back to a branch name when the input
    /// is not a semantic version.
    pub fn parse(input: &str) -> Self {
        match Semver::parse(input) {
            Ok(version) => Version::Semantic(version),
            Err(_) => Version::Branch(input.trim().to_string()),
        }
    }

    /// Shorthand for a plain semantic release.
    pub fn semantic(major: u64, minor: u64, patch: u64) -> Self {
        Version::Semantic(Semver::new(major, minor, patch))
    }

    /// A raw revision identifier (commit hash or similar).
    pub fn revision(id: impl Into<String>) -> Self {
        Version::Revision(id.into())
    }

    pub fn as_semantic(&self) -> Option<&Semver> {
        match self {
            Version::Semantic(version) => Some(version),
            _ => None,
        }
    }

    pub fn is_semantic(&self) -> bool {
        self.as_semantic().is_some()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Semantic(version) => write!(f, "{}", version),
            Version::Branch(name) => write!(f, "{}", name),
            Version::Revision(id) => write!(f, "{}", id),
        }
    }
}

impl From<Semver> for Version {
    fn from(version: Semver) -> Self {
        Version::Semantic(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_version() {
        let version = Semver::parse("1.2.3").unwrap();
        assert_eq!(version, Semver::new(1, 2, 3));
    }

    #[test]
    fn test_parse_short_versions() {
        assert_eq!(Semver::parse("2").unwrap(), Semver::new(2, 0, 0));
        assert_eq!(Semver::parse("1.5").unwrap(), Semver::new(1, 5, 0));
    }

    #[test]
    fn test_parse_v_prefix_and_metadata() {
        assert_eq!(Semver::parse("v1.2.3").unwrap(), Semver::new(1, 2, 3));
        assert_eq!(Semver::parse("1.2.3+build.9").unwrap(), Semver::new(1, 2, 3));
    }

    #[test]
    fn test_parse_pre_release() {
        let version = Semver::parse("1.0.0-beta.2").unwrap();
        assert_eq!(version, Semver::new(1, 0, 0).with_pre("beta.2"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Semver::parse("").is_err());
        assert!(Semver::parse("1.x.0").is_err());
        assert!(Semver::parse("1.2.3.4").is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(Semver::new(2, 0, 0) > Semver::new(1, 9, 9));
        assert!(Semver::new(1, 2, 3) < Semver::new(1, 2, 4));
        // Pre-releases sort below the release they precede.
        assert!(Semver::new(2, 0, 0).with_pre("beta") < Semver::new(2, 0, 0));
        assert!(Semver::new(2, 0, 0).with_pre("alpha") < Semver::new(2, 0, 0).with_pre("beta"));
    }

    #[test]
    fn test_version_parse_falls_back_to_branch() {
        assert_eq!(Version::parse("1.0.0"), Version::semantic(1, 0, 0));
        assert_eq!(Version::parse("main"), Version::Branch("main".to_string()));
    }

    #[test]
    fn test_version_display() {
        assert_eq!(Version::semantic(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(Version::Branch("main".to_string()).to_string(), "main");
        assert_eq!(Version::revision("abc123").to_string(), "abc123");
    }
}
