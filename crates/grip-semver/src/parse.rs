//! String form of constraints
//!
//! The solver itself treats constraints as opaque, but manifests and test
//! fixtures spell them as strings. The grammar is deliberately small:
//! `*`/`any`, the comparison operators, caret and tilde ranges, and
//! comma-separated conjunctions. Anything else is taken as an exact pin
//! (a release, or a branch name when the input is not a version).

use thiserror::Error;

use crate::constraint::{
    Constraint, ExactConstraint, MatchAllConstraint, MultiConstraint, Operator, RangeConstraint,
};
use crate::version::{Semver, Version, VersionError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintParseError {
    #[error("empty constraint string")]
    Empty,
    #[error("invalid version in constraint: {0}")]
    Version(#[from] VersionError),
}

/// Parse a constraint string such as `>=1.0.0, <2.0.0`, `^1.2`, or `*`.
pub fn parse_constraint(input: &str) -> Result<Box<dyn Constraint>, ConstraintParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ConstraintParseError::Empty);
    }
    if trimmed == "*" || trimmed == "any" {
        return Ok(Box::new(MatchAllConstraint::new()));
    }

    let mut parts = Vec::new();
    for piece in trimmed.split(',') {
        let piece = piece.trim();
        if piece.is_empty() {
            return Err(ConstraintParseError::Empty);
        }
        parts.push(parse_single(piece)?);
    }
    Ok(MultiConstraint::intersection(parts))
}

fn parse_single(piece: &str) -> Result<Box<dyn Constraint>, ConstraintParseError> {
    if let Some(rest) = piece.strip_prefix('^') {
        return caret_range(rest.trim());
    }
    if let Some(rest) = piece.strip_prefix('~') {
        return tilde_range(rest.trim());
    }

    // Two-character operators must be tried before their one-character prefixes.
    let operators = [
        (">=", Operator::GreaterThanOrEqual),
        ("<=", Operator::LessThanOrEqual),
        ("==", Operator::Equal),
        (">", Operator::GreaterThan),
        ("<", Operator::LessThan),
        ("=", Operator::Equal),
    ];
    for (token, op) in operators {
        if let Some(rest) = piece.strip_prefix(token) {
            let version = Semver::parse(rest.trim())?;
            return Ok(Box::new(RangeConstraint::new(op, version)));
        }
    }

    // Bare input: an exact release, or a branch pin for anything that is not
    // a version.
    match Semver::parse(piece) {
        Ok(version) => Ok(Box::new(ExactConstraint::new(Version::Semantic(version)))),
        Err(_) => Ok(Box::new(ExactConstraint::new(Version::Branch(
            piece.to_string(),
        )))),
    }
}

/// `^1.2.3` admits everything up to the next breaking release.
fn caret_range(rest: &str) -> Result<Box<dyn Constraint>, ConstraintParseError> {
    let (lower, components) = Semver::parse_partial(rest)?;
    let upper = if components == 1 || lower.major > 0 {
        Semver::new(lower.major + 1, 0, 0)
    } else if components == 2 || lower.minor > 0 {
        Semver::new(0, lower.minor + 1, 0)
    } else {
        Semver::new(0, 0, lower.patch + 1)
    };
    Ok(range_pair(lower, upper))
}

/// `~1.2.3` allows patch-level changes; `~1.2` allows minor-level changes.
fn tilde_range(rest: &str) -> Result<Box<dyn Constraint>, ConstraintParseError> {
    let (lower, components) = Semver::parse_partial(rest)?;
    let upper = if components >= 3 {
        Semver::new(lower.major, lower.minor + 1, 0)
    } else {
        Semver::new(lower.major + 1, 0, 0)
    };
    Ok(range_pair(lower, upper))
}

fn range_pair(lower: Semver, upper: Semver) -> Box<dyn Constraint> {
    MultiConstraint::intersection(vec![
        Box::new(RangeConstraint::new(Operator::GreaterThanOrEqual, lower)),
        Box::new(RangeConstraint::new(Operator::LessThan, upper)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(constraint: &str, version: &str) -> bool {
        parse_constraint(constraint)
            .unwrap()
            .matches(&Version::parse(version))
    }

    #[test]
    fn test_parse_wildcard() {
        assert!(parse_constraint("*").unwrap().is_match_all());
        assert!(parse_constraint("any").unwrap().is_match_all());
    }

    #[test]
    fn test_parse_operators() {
        assert!(matches(">=1.0.0", "1.0.0"));
        assert!(matches(">=1.0.0", "2.3.4"));
        assert!(!matches(">=1.0.0", "0.9.0"));
        assert!(matches("<2", "1.9.9"));
        assert!(!matches("<2", "2.0.0"));
        assert!(matches("<=2.0.0", "2.0.0"));
        assert!(matches(">1.0", "1.0.1"));
        assert!(!matches(">1.0", "1.0.0"));
        assert!(matches("=1.2.3", "1.2.3"));
    }

    #[test]
    fn test_parse_conjunction() {
        assert!(matches(">=1.0.0, <2.0.0", "1.5.0"));
        assert!(!matches(">=1.0.0, <2.0.0", "2.0.0"));
        assert!(!matches(">=1.0.0, <2.0.0", "0.5.0"));
    }

    #[test]
    fn test_parse_caret() {
        assert!(matches("^1.2.3", "1.8.1"));
        assert!(!matches("^1.2.3", "2.0.0"));
        assert!(!matches("^1.2.3", "1.2.2"));
        assert!(matches("^0.2.3", "0.2.9"));
        assert!(!matches("^0.2.3", "0.3.0"));
        assert!(matches("^0.0.3", "0.0.3"));
        assert!(!matches("^0.0.3", "0.0.4"));
        assert!(matches("^0", "0.9.1"));
        assert!(!matches("^0", "1.0.0"));
    }

    #[test]
    fn test_parse_tilde() {
        assert!(matches("~1.2.3", "1.2.9"));
        assert!(!matches("~1.2.3", "1.3.0"));
        assert!(matches("~1.2", "1.9.0"));
        assert!(!matches("~1.2", "2.0.0"));
        assert!(matches("~1", "1.5.0"));
    }

    #[test]
    fn test_parse_exact_release() {
        assert!(matches("1.2.3", "1.2.3"));
        assert!(!matches("1.2.3", "1.2.4"));
    }

    #[test]
    fn test_parse_branch_pin() {
        assert!(matches("main", "main"));
        assert!(!matches("main", "develop"));
        assert!(!matches("main", "1.0.0"));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(parse_constraint("").is_err());
        assert!(parse_constraint(">=1.0.0,").is_err());
    }
}
