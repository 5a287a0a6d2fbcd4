//! Lint runner: expands glob patterns and checks each matched feature file.
//!
//! Files are linted in parallel; per-file results are concatenated in the
//! sorted target order so the report's group order is reproducible between
//! runs. Unreadable or unparsable files never abort the run, they surface
//! as violations under the reserved `read-file` / `parse-feature` rules.

use crate::models::{LintResult, Location, Violation};
use crate::parser;
use crate::rules::{Rule, RuleParams};
use glob::glob;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Rule name used when a matched file cannot be read.
pub const READ_RULE: &str = "read-file";
/// Rule name used when a matched file cannot be parsed.
pub const PARSE_RULE: &str = "parse-feature";

/// Run the given rules across files matched by `patterns` under `repo_root`.
pub fn run_lint(
    repo_root: &str,
    patterns: &[String],
    rules: &[Box<dyn Rule>],
    params: &RuleParams,
) -> LintResult {
    let root = PathBuf::from(repo_root);
    let mut violations: Vec<Violation> = Vec::new();

    let mut targets: Vec<PathBuf> = Vec::new();
    for pat in patterns {
        let abs_glob = root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        match glob(&pattern) {
            Ok(entries) => {
                targets.extend(entries.flatten());
            }
            Err(_) => {
                violations.push(Violation::new(
                    "bad-pattern",
                    "Glob pattern is invalid",
                    Location::new(pat.clone(), 1),
                ));
            }
        }
    }
    targets.sort();
    targets.dedup();

    let per_file: Vec<(Vec<Violation>, usize)> = targets
        .par_iter()
        .map(|path| lint_file(&root, path, rules, params))
        .collect();

    let mut files = 0usize;
    for (found, parsed) in per_file {
        violations.extend(found);
        files += parsed;
    }
    LintResult { violations, files }
}

/// Lint one file; the second element is 1 when the file was parsed.
fn lint_file(
    root: &Path,
    path: &Path,
    rules: &[Box<dyn Rule>],
    params: &RuleParams,
) -> (Vec<Violation>, usize) {
    let rel = display_path(root, path);
    let data = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => {
            return (
                vec![Violation::new(
                    READ_RULE,
                    "Feature file could not be read",
                    Location::new(rel, 1),
                )],
                0,
            );
        }
    };
    let feature = match parser::parse(&data) {
        Ok(f) => f,
        Err(err) => {
            return (
                vec![Violation::new(
                    PARSE_RULE,
                    err.to_string(),
                    Location::new(rel, err.line()),
                )],
                0,
            );
        }
    };
    let mut found: Vec<Violation> = Vec::new();
    for rule in rules {
        found.extend(rule.check(&feature, &rel, params));
    }
    (found, 1)
}

/// Report paths relative to the repo root when possible.
fn display_path(root: &Path, path: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}
