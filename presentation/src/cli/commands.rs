//! CLI command definitions

use alias_domain::{CallerScope, PUBLIC_LAYER};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for resolution results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report with the action plan
    Full,
    /// JSON output
    Json,
}

/// CLI arguments for alias-router
#[derive(Parser, Debug)]
#[command(name = "alias-router")]
#[command(author, version, about = "Resolve natural-language requests to tool-call plans")]
#[command(long_about = r#"
alias-router matches a request against registered aliases and prints the
tool-call plan it maps to.

Matching runs in three stages:
1. Exact: the request matches an alias pattern, placeholders are captured
2. Stripped: a conversational opener ("can you", "show me") is removed first
3. Fuzzy: up to three suggestions ranked by keyword overlap, no plan

Configuration files are loaded from (in priority order):
1. ALIAS_ROUTER_* environment variables
2. --config <path>          Explicit config file
3. ./alias-router.toml      Project-level config
4. ~/.config/alias-router/config.toml   Global config

Example:
  alias-router "add task buy milk"
  alias-router --layer founder:justin --context desk "show me my pipeline"
  alias-router --check --aliases team-aliases.toml
"#)]
pub struct Cli {
    /// The request to resolve (not required with --check or --list)
    pub request: Option<String>,

    /// Caller layer; only public aliases and aliases of this layer are visible
    #[arg(short, long, value_name = "LAYER", default_value = PUBLIC_LAYER)]
    pub layer: String,

    /// Caller context tag (can be specified multiple times)
    #[arg(short = 't', long = "context", value_name = "TAG")]
    pub context: Vec<String>,

    /// Alias file to read (overrides [store] path)
    #[arg(short, long, value_name = "PATH")]
    pub aliases: Option<PathBuf>,

    /// Tool scope the executor grants, glob style (can be specified multiple times)
    #[arg(short, long, value_name = "SCOPE")]
    pub grant: Vec<String>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Validate the alias file and exit
    #[arg(long)]
    pub check: bool,

    /// List the aliases visible to the caller and exit
    #[arg(long)]
    pub list: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Caller scope built from `--layer` and `--context`
    pub fn scope(&self) -> CallerScope {
        CallerScope::new(self.layer.clone()).with_contexts(self.context.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["alias-router", "my tasks"]).unwrap();
        assert_eq!(cli.request.as_deref(), Some("my tasks"));
        assert_eq!(cli.layer, "public");
        assert!(cli.context.is_empty());
        assert!(cli.output.is_none());
        assert_eq!(cli.scope(), CallerScope::public());
    }

    #[test]
    fn test_scope_flags() {
        let cli = Cli::try_parse_from([
            "alias-router",
            "--layer",
            "founder:justin",
            "-t",
            "desk",
            "--context",
            "mobile",
            "-o",
            "json",
            "my pipeline",
        ])
        .unwrap();

        let scope = cli.scope();
        assert_eq!(scope.layer, "founder:justin");
        assert!(scope.context.contains("desk"));
        assert!(scope.context.contains("mobile"));
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_verbosity_count() {
        let cli = Cli::try_parse_from(["alias-router", "-vv", "--check"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.check);
        assert!(cli.request.is_none());
    }
}
