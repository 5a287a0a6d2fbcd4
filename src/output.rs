//! Output rendering for lint results and the rule listing.
//!
//! Report bodies go to stdout uncolored so they stay byte-stable for CI;
//! only stderr diagnostics carry color (see `utils`).

use crate::models::LintResult;
use crate::report;
use crate::rules::Rule;
use serde_json::json;
use serde_json::Value as JsonVal;

/// Print lint results in the requested format.
pub fn print_lint(result: &LintResult, output: &str) {
    let formatter = report::formatter_for(output);
    println!("{}", formatter.format(&result.violations));
}

/// Print the rule catalog listing.
pub fn print_rules(rules: &[Box<dyn Rule>], output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_rules_json(rules)).unwrap_or_default()
        ),
        _ => {
            for rule in rules {
                println!("{:<26} {}", rule.name(), rule.description());
            }
        }
    }
}

/// Compose the rule listing JSON (pure) for testing/snapshot purposes.
pub fn compose_rules_json(rules: &[Box<dyn Rule>]) -> JsonVal {
    let items: Vec<JsonVal> = rules
        .iter()
        .map(|r| {
            json!({
                "name": r.name(),
                "description": r.description(),
            })
        })
        .collect();
    json!({ "rules": items })
}
