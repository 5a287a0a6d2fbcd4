//! Line-oriented parser for Gherkin feature files.
//!
//! Produces a `Feature` model with 1-based source lines on every node.
//! The parser is deliberately tolerant: description text, step tables, and
//! doc string contents are opaque. Only two shapes are rejected, a file
//! with no `Feature:` header and non-comment content appearing before it.
//! Callers report those as lint issues rather than aborting the run.

use crate::models::feature::{Background, Examples, Feature, Scenario, Step, Tag};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Why a feature file could not be parsed.
pub enum ParseError {
    /// The file contains no `Feature:` header at all.
    MissingFeature,
    /// Content other than tags, comments, or blank lines appeared before
    /// the `Feature:` header.
    UnexpectedContent { line: usize },
}

impl ParseError {
    /// Line the error should be reported at.
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingFeature => 1,
            ParseError::UnexpectedContent { line } => *line,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingFeature => write!(f, "No Feature header found"),
            ParseError::UnexpectedContent { .. } => {
                write!(f, "Unexpected content before the Feature header")
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(PartialEq)]
enum Block {
    Preamble,
    Feature,
    Background,
    Scenario,
    Examples,
}

/// Parse Gherkin source text into a `Feature`.
pub fn parse(source: &str) -> Result<Feature, ParseError> {
    let mut feature = Feature::default();
    let mut seen_feature = false;
    let mut block = Block::Preamble;
    let mut pending_tags: Vec<Tag> = Vec::new();
    // Fence string of an open doc string, if any
    let mut doc_fence: Option<&'static str> = None;
    let mut examples_header_seen = false;

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if let Some(fence) = doc_fence {
            if line.starts_with(fence) {
                doc_fence = None;
            }
            continue;
        }
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with("\"\"\"") {
            doc_fence = Some("\"\"\"");
            continue;
        }
        if line.starts_with("```") {
            doc_fence = Some("```");
            continue;
        }

        if line.starts_with('@') {
            for tok in line.split_whitespace() {
                if tok.starts_with('@') {
                    pending_tags.push(Tag {
                        name: tok.to_string(),
                        line: line_no,
                    });
                }
            }
            continue;
        }

        if !seen_feature {
            match header(line, &["Feature:"]) {
                Some(name) => {
                    seen_feature = true;
                    feature.name = name.to_string();
                    feature.line = line_no;
                    feature.tags = std::mem::take(&mut pending_tags);
                    block = Block::Feature;
                }
                None => return Err(ParseError::UnexpectedContent { line: line_no }),
            }
            continue;
        }

        if header(line, &["Background:"]).is_some() {
            feature.background = Some(Background {
                line: line_no,
                steps: Vec::new(),
            });
            pending_tags.clear();
            block = Block::Background;
            continue;
        }
        if let Some(name) = header(line, &["Scenario Outline:", "Scenario Template:"]) {
            feature.scenarios.push(Scenario {
                name: name.to_string(),
                line: line_no,
                tags: std::mem::take(&mut pending_tags),
                outline: true,
                ..Default::default()
            });
            block = Block::Scenario;
            continue;
        }
        if let Some(name) = header(line, &["Scenario:", "Example:"]) {
            feature.scenarios.push(Scenario {
                name: name.to_string(),
                line: line_no,
                tags: std::mem::take(&mut pending_tags),
                outline: false,
                ..Default::default()
            });
            block = Block::Scenario;
            continue;
        }
        if header(line, &["Examples:", "Scenarios:"]).is_some() {
            if let Some(sc) = feature.scenarios.last_mut() {
                sc.examples.push(Examples {
                    line: line_no,
                    rows: 0,
                });
                block = Block::Examples;
                examples_header_seen = false;
            }
            pending_tags.clear();
            continue;
        }

        if let Some((keyword, text)) = step_keyword(line) {
            let step = Step {
                keyword: keyword.to_string(),
                text: text.to_string(),
                line: line_no,
            };
            match block {
                Block::Background => {
                    if let Some(bg) = feature.background.as_mut() {
                        bg.steps.push(step);
                    }
                }
                Block::Scenario | Block::Examples => {
                    if let Some(sc) = feature.scenarios.last_mut() {
                        sc.steps.push(step);
                    }
                }
                // A bare step in the description slot stays description text
                Block::Feature | Block::Preamble => {
                    feature.description.push(line.to_string());
                }
            }
            continue;
        }

        if line.starts_with('|') {
            if block == Block::Examples {
                if let Some(ex) = feature
                    .scenarios
                    .last_mut()
                    .and_then(|sc| sc.examples.last_mut())
                {
                    if examples_header_seen {
                        ex.rows += 1;
                    } else {
                        examples_header_seen = true;
                    }
                }
            }
            // Step data tables are opaque
            continue;
        }

        if block == Block::Feature {
            feature.description.push(line.to_string());
        }
    }

    if !seen_feature {
        return Err(ParseError::MissingFeature);
    }
    Ok(feature)
}

fn header<'a>(line: &'a str, keywords: &[&str]) -> Option<&'a str> {
    for kw in keywords {
        if let Some(rest) = line.strip_prefix(kw) {
            return Some(rest.trim());
        }
    }
    None
}

fn step_keyword(line: &str) -> Option<(&str, &str)> {
    for kw in ["Given", "When", "Then", "And", "But", "*"] {
        if let Some(rest) = line.strip_prefix(kw) {
            if rest.is_empty() {
                return Some((kw, ""));
            }
            if kw == "*" || rest.starts_with(' ') {
                return Some((kw, rest.trim()));
            }
        }
    }
    None
}
