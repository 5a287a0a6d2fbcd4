//! Violation aggregation and report formatting.
//!
//! Rules emit violations in whatever order their files were linted; this
//! module turns that flat list into a deterministic report:
//! - Violations are grouped by exact `(rule, problem)` equality.
//! - Groups keep the first-seen order of their key in the input.
//! - Locations within a group are ordered by path, then numerically by
//!   line (line 2 before line 11). The sort is stable, so duplicate
//!   locations stay adjacent in input order.
//! Nothing is deduplicated; the summary counts input records, not groups.

use crate::models::{Location, Violation};
use serde_json::json;
use serde_json::Value as JsonVal;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Violations sharing a rule and problem, with their ordered locations.
pub struct ViolationGroup {
    pub rule: String,
    pub problem: String,
    pub locations: Vec<Location>,
}

/// Group violations by `(rule, problem)` in first-seen order and sort each
/// group's locations. Never fails; empty input yields no groups.
pub fn aggregate(records: &[Violation]) -> Vec<ViolationGroup> {
    let mut order: Vec<(String, String)> = Vec::new();
    let mut grouped: HashMap<(String, String), Vec<Location>> = HashMap::new();
    for v in records {
        let slot = grouped.entry((v.rule.clone(), v.problem.clone())).or_default();
        if slot.is_empty() {
            order.push((v.rule.clone(), v.problem.clone()));
        }
        slot.push(v.location.clone());
    }
    order
        .into_iter()
        .map(|key| {
            let mut locations = grouped.remove(&key).unwrap_or_default();
            locations.sort_by(location_order);
            ViolationGroup {
                rule: key.0,
                problem: key.1,
                locations,
            }
        })
        .collect()
}

// Paths compare as bytes; lines compare as numbers. A single string compare
// on "path:line" would put line 11 before line 2.
fn location_order(a: &Location, b: &Location) -> Ordering {
    a.path.cmp(&b.path).then(a.line.cmp(&b.line))
}

/// Renders a violation report in one output format.
///
/// Every implementation preserves the group and location order defined by
/// [`aggregate`], includes each input record exactly once, and reports the
/// total count.
pub trait Formatter {
    fn format(&self, violations: &[Violation]) -> String;
}

/// Select a formatter by output mode. Unknown modes fall back to pretty.
pub fn formatter_for(output: &str) -> Box<dyn Formatter> {
    match output {
        "json" => Box::new(JsonFormatter),
        _ => Box::new(PrettyFormatter),
    }
}

/// Plain-text formatter: rule name, indented problem, indented locations,
/// then a blank line and a `N issues found` summary.
pub struct PrettyFormatter;

impl Formatter for PrettyFormatter {
    fn format(&self, violations: &[Violation]) -> String {
        let mut lines: Vec<String> = Vec::new();
        for group in aggregate(violations) {
            lines.push(group.rule);
            lines.push(format!("  {}", group.problem));
            for loc in &group.locations {
                lines.push(format!("    {}", loc));
            }
        }
        lines.push(String::new());
        lines.push(format!("{} issues found", violations.len()));
        lines.join("\n")
    }
}

/// JSON formatter over the same aggregated structure.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, violations: &[Violation]) -> String {
        serde_json::to_string_pretty(&compose_report_json(violations)).unwrap_or_default()
    }
}

/// Compose the JSON report object (pure) for testing/snapshot purposes.
pub fn compose_report_json(violations: &[Violation]) -> JsonVal {
    let groups: Vec<JsonVal> = aggregate(violations)
        .iter()
        .map(|g| {
            json!({
                "rule": g.rule,
                "problem": g.problem,
                "locations": g.locations.iter().map(Location::to_string).collect::<Vec<_>>(),
            })
        })
        .collect();
    json!({
        "issues": groups,
        "summary": { "issues": violations.len() },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(rule: &str, problem: &str, path: &str, line: usize) -> Violation {
        Violation::new(rule, problem, Location::new(path, line))
    }

    #[test]
    fn test_pretty_formats_violations_as_text() {
        let violations = vec![
            violation("SomeLinter", "Some problem", "path/to/the_file", 1),
            violation("SomeOtherLinter", "Some other problem", "path/to/the_file", 1),
        ];
        let out = PrettyFormatter.format(&violations);
        assert_eq!(
            out,
            [
                "SomeLinter",
                "  Some problem",
                "    path/to/the_file:1",
                "SomeOtherLinter",
                "  Some other problem",
                "    path/to/the_file:1",
                "",
                "2 issues found",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_pretty_groups_by_rule_and_problem_in_first_seen_order() {
        let violations = vec![
            violation("SomeLinter", "Some problem", "path/to/the_file", 1),
            violation("SomeOtherLinter", "Some other problem", "path/to/the_file", 1),
            violation("SomeLinter", "Some problem", "path/to/the_file", 11),
        ];
        let out = PrettyFormatter.format(&violations);
        assert_eq!(
            out,
            [
                "SomeLinter",
                "  Some problem",
                "    path/to/the_file:1",
                "    path/to/the_file:11",
                "SomeOtherLinter",
                "  Some other problem",
                "    path/to/the_file:1",
                "",
                "3 issues found",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_locations_order_by_path_before_line() {
        let violations = vec![
            violation("SomeLinter", "Some problem", "path/to/the_file", 1),
            violation("SomeLinter", "Some problem", "path/to/the_file", 3),
            violation("SomeLinter", "Some problem", "path/to/a_different_file", 2),
        ];
        let groups = aggregate(&violations);
        assert_eq!(groups.len(), 1);
        let rendered: Vec<String> = groups[0].locations.iter().map(Location::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "path/to/a_different_file:2",
                "path/to/the_file:1",
                "path/to/the_file:3",
            ]
        );
    }

    #[test]
    fn test_lines_order_numerically_not_lexicographically() {
        let violations = vec![
            violation("SomeLinter", "Some problem", "f", 2),
            violation("SomeLinter", "Some problem", "f", 3),
            violation("SomeLinter", "Some problem", "f", 11),
            violation("SomeLinter", "Some problem", "f", 3),
            violation("SomeLinter", "Some problem", "f", 1),
        ];
        let groups = aggregate(&violations);
        let lines: Vec<usize> = groups[0].locations.iter().map(|l| l.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 3, 11]);
    }

    #[test]
    fn test_duplicate_locations_are_kept_adjacent() {
        let violations = vec![
            violation("r", "p", "f", 5),
            violation("r", "p", "f", 2),
            violation("r", "p", "f", 5),
        ];
        let groups = aggregate(&violations);
        assert_eq!(groups[0].locations.len(), 3);
        assert_eq!(groups[0].locations[1], groups[0].locations[2]);
        let out = PrettyFormatter.format(&violations);
        assert!(out.contains("    f:5\n    f:5"));
        assert!(out.ends_with("3 issues found"));
    }

    #[test]
    fn test_grouping_is_case_sensitive_and_exact() {
        let violations = vec![
            violation("rule", "Problem", "f", 1),
            violation("rule", "problem", "f", 2),
            violation("Rule", "Problem", "f", 3),
        ];
        assert_eq!(aggregate(&violations).len(), 3);
    }

    #[test]
    fn test_empty_input_yields_empty_report() {
        assert!(aggregate(&[]).is_empty());
        assert_eq!(PrettyFormatter.format(&[]), "\n0 issues found");
    }

    #[test]
    fn test_count_and_coverage_invariants() {
        let violations = vec![
            violation("a", "p1", "x", 9),
            violation("b", "p2", "y", 1),
            violation("a", "p1", "x", 9),
            violation("a", "p3", "z", 4),
        ];
        let groups = aggregate(&violations);
        let total: usize = groups.iter().map(|g| g.locations.len()).sum();
        assert_eq!(total, violations.len());
        // first-seen order of keys
        let keys: Vec<&str> = groups.iter().map(|g| g.problem.as_str()).collect();
        assert_eq!(keys, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_opaque_values_do_not_break_formatting() {
        let violations = vec![violation("", "", "", 1)];
        let out = PrettyFormatter.format(&violations);
        assert_eq!(out, ["", "  ", "    :1", "", "1 issues found"].join("\n"));
    }

    #[test]
    fn test_json_formatter_preserves_order_and_count() {
        let violations = vec![
            violation("SomeLinter", "Some problem", "f", 11),
            violation("SomeOtherLinter", "Some other problem", "f", 1),
            violation("SomeLinter", "Some problem", "f", 2),
        ];
        let out = compose_report_json(&violations);
        assert_eq!(out["summary"]["issues"], 3);
        assert_eq!(out["issues"][0]["rule"], "SomeLinter");
        assert_eq!(out["issues"][1]["rule"], "SomeOtherLinter");
        assert_eq!(
            out["issues"][0]["locations"],
            serde_json::json!(["f:2", "f:11"])
        );
        // the rendered string is real JSON that round-trips
        let rendered = JsonFormatter.format(&violations);
        let parsed: JsonVal = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, out);
    }

    #[test]
    fn test_json_formatter_empty_input() {
        let out = compose_report_json(&[]);
        assert_eq!(out["summary"]["issues"], 0);
        assert_eq!(out["issues"], serde_json::json!([]));
    }

    #[test]
    fn test_formatter_selection_by_output_mode() {
        let violations = vec![violation("r", "p", "f", 1)];
        let json = formatter_for("json").format(&violations);
        assert!(json.trim_start().starts_with('{'));
        let human = formatter_for("human").format(&violations);
        assert!(human.starts_with("r\n"));
        // unknown modes fall back to pretty
        assert_eq!(formatter_for("whatever").format(&violations), human);
    }
}
