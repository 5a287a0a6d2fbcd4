//! Gherlint CLI binary entry point.
//! Delegates to modules for linting and prints results.

mod cli;
mod config;
mod lint;
mod models;
mod output;
mod parser;
mod report;
mod rules;
mod utils;

use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Rules { output } => {
            let rules = rules::all_rules();
            output::print_rules(&rules, output.as_deref().unwrap_or("human"));
        }
        Commands::Lint {
            repo_root,
            patterns,
            output,
            config,
        } => {
            // Friendly error if an explicit config file is missing
            if let Some(cfg_path) = config.as_deref() {
                if !Path::new(cfg_path).is_file() {
                    eprintln!(
                        "{} {}",
                        utils::error_prefix(),
                        format!("Config file not found: {}", cfg_path)
                    );
                    std::process::exit(2);
                }
            }
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                config.as_deref(),
                &patterns,
                output.as_deref(),
            );
            // Friendly note if no gherlint config was found
            if config.is_none() && config::load_config(&eff.repo_root).is_none() {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "No gherlint.toml found; using defaults."
                );
            }
            // Emit single top info when the default pattern is in use
            if eff.output != "json" && !eff.patterns_configured {
                eprintln!(
                    "{} {}",
                    utils::info_prefix(),
                    format!("Using default pattern: [{}]", eff.patterns.join(", "))
                );
            }
            let rules: Vec<_> = rules::all_rules()
                .into_iter()
                .filter(|r| !eff.disabled.contains(r.name()))
                .collect();
            let repo_root_str = eff.repo_root.to_string_lossy().to_string();
            let result = lint::run_lint(&repo_root_str, &eff.patterns, &rules, &eff.params);
            output::print_lint(&result, &eff.output);
            if !result.violations.is_empty() {
                std::process::exit(1);
            }
        }
    }
}
