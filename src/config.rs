//! Configuration discovery and effective settings resolution.
//!
//! Gherlint reads `gherlint.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Defaults:
//! - `patterns`: `["**/*.feature"]`
//! - `output`: `human`
//! - every catalog rule enabled, `too-many-steps` max 10, `too-many-tags`
//!   max 3
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::rules::RuleParams;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Per-rule settings under `[rules.<name>]`.
pub struct RuleCfg {
    pub enabled: Option<bool>,
    /// Threshold for the parameterized rules.
    pub max: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `gherlint.toml|yaml`.
pub struct GherlintConfig {
    pub patterns: Option<Vec<String>>,
    pub output: Option<String>,
    #[serde(default)]
    pub rules: Option<HashMap<String, RuleCfg>>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub patterns: Vec<String>,
    /// True when patterns came from the CLI or config rather than defaults.
    pub patterns_configured: bool,
    pub output: String,
    pub disabled: HashSet<String>,
    pub params: RuleParams,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `gherlint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("gherlint.toml").exists()
            || cur.join("gherlint.yaml").exists()
            || cur.join("gherlint.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `GherlintConfig` from `gherlint.toml` or `gherlint.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<GherlintConfig> {
    let toml_path = root.join("gherlint.toml");
    if toml_path.exists() {
        return load_config_file(&toml_path);
    }
    for yml in ["gherlint.yaml", "gherlint.yml"] {
        let p = root.join(yml);
        if p.exists() {
            return load_config_file(&p);
        }
    }
    None
}

/// Load a specific config file, picking the parser by extension.
pub fn load_config_file(path: &Path) -> Option<GherlintConfig> {
    let s = fs::read_to_string(path).ok()?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&s).ok(),
        _ => toml::from_str(&s).ok(),
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_config: Option<&str>,
    cli_patterns: &[String],
    cli_output: Option<&str>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = match cli_config {
        Some(p) => load_config_file(Path::new(p)).unwrap_or_default(),
        None => load_config(&repo_root).unwrap_or_default(),
    };

    let (patterns, patterns_configured) = if !cli_patterns.is_empty() {
        (cli_patterns.to_vec(), true)
    } else if let Some(pats) = cfg.patterns.filter(|p| !p.is_empty()) {
        (pats, true)
    } else {
        (vec!["**/*.feature".to_string()], false)
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let rule_cfg = cfg.rules.unwrap_or_default();
    let disabled: HashSet<String> = rule_cfg
        .iter()
        .filter(|(_, rc)| rc.enabled == Some(false))
        .map(|(name, _)| name.clone())
        .collect();

    let defaults = RuleParams::default();
    let params = RuleParams {
        max_steps: rule_cfg
            .get("too-many-steps")
            .and_then(|rc| rc.max)
            .unwrap_or(defaults.max_steps),
        max_tags: rule_cfg
            .get("too-many-tags")
            .and_then(|rc| rc.max)
            .unwrap_or(defaults.max_tags),
    };

    Effective {
        repo_root,
        patterns,
        patterns_configured,
        output,
        disabled,
        params,
    }
}
