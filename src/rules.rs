//! Lint rule catalog for feature files.
//!
//! Each rule is a pure check over a parsed `Feature`: no I/O, no state.
//! The rule's `name()` becomes the violation's `rule` field and the problem
//! strings are fixed per rule so reports group cleanly.

use crate::models::feature::Feature;
use crate::models::{Location, Violation};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Thresholds for the parameterized rules, adjustable via `[rules.<name>]
/// max` in the config file.
#[derive(Debug, Clone)]
pub struct RuleParams {
    pub max_steps: usize,
    pub max_tags: usize,
}

impl Default for RuleParams {
    fn default() -> Self {
        RuleParams {
            max_steps: 10,
            max_tags: 3,
        }
    }
}

/// A named check applied to a feature file.
pub trait Rule: Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn check(&self, feature: &Feature, path: &str, params: &RuleParams) -> Vec<Violation>;
}

/// The full catalog in listing order.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FeatureWithoutName),
        Box::new(FeatureWithoutScenarios),
        Box::new(ScenarioWithoutName),
        Box::new(ScenarioWithoutSteps),
        Box::new(StepWithEndPeriod),
        Box::new(TooManySteps),
        Box::new(TooManyTags),
        Box::new(OutlineWithoutExamples),
        Box::new(FileNameNotSnakeCase),
    ]
}

struct FeatureWithoutName;

impl Rule for FeatureWithoutName {
    fn name(&self) -> &'static str {
        "feature-without-name"
    }
    fn description(&self) -> &'static str {
        "Features should have a name after the Feature keyword"
    }
    fn check(&self, feature: &Feature, path: &str, _params: &RuleParams) -> Vec<Violation> {
        if feature.name.is_empty() {
            return vec![Violation::new(
                self.name(),
                "Feature has no name",
                Location::new(path, feature.line),
            )];
        }
        Vec::new()
    }
}

struct FeatureWithoutScenarios;

impl Rule for FeatureWithoutScenarios {
    fn name(&self) -> &'static str {
        "feature-without-scenarios"
    }
    fn description(&self) -> &'static str {
        "Feature files should contain at least one scenario"
    }
    fn check(&self, feature: &Feature, path: &str, _params: &RuleParams) -> Vec<Violation> {
        if feature.scenarios.is_empty() {
            return vec![Violation::new(
                self.name(),
                "Feature file has no scenarios",
                Location::new(path, feature.line),
            )];
        }
        Vec::new()
    }
}

struct ScenarioWithoutName;

impl Rule for ScenarioWithoutName {
    fn name(&self) -> &'static str {
        "scenario-without-name"
    }
    fn description(&self) -> &'static str {
        "Scenarios should have a name after the Scenario keyword"
    }
    fn check(&self, feature: &Feature, path: &str, _params: &RuleParams) -> Vec<Violation> {
        feature
            .scenarios
            .iter()
            .filter(|sc| sc.name.is_empty())
            .map(|sc| {
                Violation::new(
                    self.name(),
                    "Scenario has no name",
                    Location::new(path, sc.line),
                )
            })
            .collect()
    }
}

struct ScenarioWithoutSteps;

impl Rule for ScenarioWithoutSteps {
    fn name(&self) -> &'static str {
        "scenario-without-steps"
    }
    fn description(&self) -> &'static str {
        "Scenarios should contain at least one step of their own"
    }
    fn check(&self, feature: &Feature, path: &str, _params: &RuleParams) -> Vec<Violation> {
        feature
            .scenarios
            .iter()
            .filter(|sc| sc.steps.is_empty())
            .map(|sc| {
                Violation::new(
                    self.name(),
                    "Scenario has no steps",
                    Location::new(path, sc.line),
                )
            })
            .collect()
    }
}

struct StepWithEndPeriod;

impl Rule for StepWithEndPeriod {
    fn name(&self) -> &'static str {
        "step-with-end-period"
    }
    fn description(&self) -> &'static str {
        "Steps should not end with a period"
    }
    fn check(&self, feature: &Feature, path: &str, _params: &RuleParams) -> Vec<Violation> {
        let background = feature.background.iter().flat_map(|bg| bg.steps.iter());
        let scenarios = feature.scenarios.iter().flat_map(|sc| sc.steps.iter());
        background
            .chain(scenarios)
            .filter(|step| step.text.ends_with('.'))
            .map(|step| {
                Violation::new(
                    self.name(),
                    "Step ends with a period",
                    Location::new(path, step.line),
                )
            })
            .collect()
    }
}

struct TooManySteps;

impl Rule for TooManySteps {
    fn name(&self) -> &'static str {
        "too-many-steps"
    }
    fn description(&self) -> &'static str {
        "Scenarios should stay below the configured step count"
    }
    fn check(&self, feature: &Feature, path: &str, params: &RuleParams) -> Vec<Violation> {
        feature
            .scenarios
            .iter()
            .filter(|sc| sc.steps.len() > params.max_steps)
            .map(|sc| {
                Violation::new(
                    self.name(),
                    format!("Scenario has too many steps (max {})", params.max_steps),
                    Location::new(path, sc.line),
                )
            })
            .collect()
    }
}

struct TooManyTags;

impl Rule for TooManyTags {
    fn name(&self) -> &'static str {
        "too-many-tags"
    }
    fn description(&self) -> &'static str {
        "Features and scenarios should stay below the configured tag count"
    }
    fn check(&self, feature: &Feature, path: &str, params: &RuleParams) -> Vec<Violation> {
        let problem = format!("Element has too many tags (max {})", params.max_tags);
        let mut found = Vec::new();
        if feature.tags.len() > params.max_tags {
            found.push(Violation::new(
                self.name(),
                problem.clone(),
                Location::new(path, feature.line),
            ));
        }
        for sc in &feature.scenarios {
            if sc.tags.len() > params.max_tags {
                found.push(Violation::new(
                    self.name(),
                    problem.clone(),
                    Location::new(path, sc.line),
                ));
            }
        }
        found
    }
}

struct OutlineWithoutExamples;

impl Rule for OutlineWithoutExamples {
    fn name(&self) -> &'static str {
        "outline-without-examples"
    }
    fn description(&self) -> &'static str {
        "Scenario outlines should have at least one example row"
    }
    fn check(&self, feature: &Feature, path: &str, _params: &RuleParams) -> Vec<Violation> {
        feature
            .scenarios
            .iter()
            .filter(|sc| sc.outline && sc.example_rows() == 0)
            .map(|sc| {
                Violation::new(
                    self.name(),
                    "Scenario Outline has no example rows",
                    Location::new(path, sc.line),
                )
            })
            .collect()
    }
}

struct FileNameNotSnakeCase;

static SNAKE_CASE: OnceLock<Regex> = OnceLock::new();

impl Rule for FileNameNotSnakeCase {
    fn name(&self) -> &'static str {
        "file-name-not-snake-case"
    }
    fn description(&self) -> &'static str {
        "Feature file names should be snake_case"
    }
    fn check(&self, _feature: &Feature, path: &str, _params: &RuleParams) -> Vec<Violation> {
        let re = SNAKE_CASE.get_or_init(|| Regex::new(r"^[a-z0-9_]+$").expect("valid literal"));
        let stem = Path::new(path)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        if !re.is_match(&stem) {
            return vec![Violation::new(
                self.name(),
                "Feature file name is not snake_case",
                Location::new(path, 1),
            )];
        }
        Vec::new()
    }
}
