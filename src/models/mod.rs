//! Shared data models for lint output and parsed feature files.

pub mod feature;

use serde::{Serialize, Serializer};
use std::fmt;

/// Source position of a violation: file path plus 1-based line number.
///
/// Rendered canonically as `path:line` wherever a location appears in a
/// report, including the JSON output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub line: usize,
}

impl Location {
    pub fn new(path: impl Into<String>, line: usize) -> Self {
        Location {
            path: path.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single reported instance of a rule being broken at a location.
pub struct Violation {
    pub rule: String,
    pub problem: String,
    pub location: Location,
}

impl Violation {
    pub fn new(rule: impl Into<String>, problem: impl Into<String>, location: Location) -> Self {
        Violation {
            rule: rule.into(),
            problem: problem.into(),
            location,
        }
    }
}

#[derive(Debug, Serialize)]
/// Lint results container: every violation found plus the scanned file count.
pub struct LintResult {
    pub violations: Vec<Violation>,
    pub files: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display_is_canonical() {
        let loc = Location::new("features/login.feature", 12);
        assert_eq!(loc.to_string(), "features/login.feature:12");
    }

    #[test]
    fn test_location_serializes_as_string() {
        let loc = Location::new("f.feature", 3);
        assert_eq!(
            serde_json::to_value(&loc).unwrap(),
            serde_json::json!("f.feature:3")
        );
    }

    #[test]
    fn test_violation_serializes_with_flat_location() {
        let v = Violation::new("some-rule", "Some problem", Location::new("f", 1));
        let out = serde_json::to_value(&v).unwrap();
        assert_eq!(out["rule"], "some-rule");
        assert_eq!(out["location"], "f:1");
    }
}
