//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gherlint",
    version,
    about = "Gherlint (Rust)",
    long_about = "Gherlint — a tiny, fast CLI to lint Gherkin feature files for style problems.\n\nConfiguration precedence: CLI > gherlint.toml > defaults.",
    after_help = "Examples:\n  gherlint lint\n  gherlint lint --pattern 'features/**/*.feature' --output json\n  gherlint lint --config ci/gherlint.toml\n  gherlint rules",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for linting and rule discovery.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current gherlint version."
    )]
    Version,
    /// Lint feature files
    #[command(
        about = "Run lint checks",
        long_about = "Lint feature files matched by the configured glob patterns. Exits 1 when any issues are found.",
        after_help = "Examples:\n  gherlint lint\n  gherlint lint --pattern 'features/**/*.feature'\n  gherlint lint --output json"
    )]
    Lint {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(
            long = "pattern",
            help = "Glob pattern for feature files (repeatable; default: **/*.feature)"
        )]
        patterns: Vec<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Path to a config file (default: discovered gherlint.toml)")]
        config: Option<String>,
    },
    /// List the rule catalog
    #[command(
        about = "List rules",
        long_about = "List every lint rule with its description."
    )]
    Rules {
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
