//! CLI entrypoint for alias-router
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use alias_application::{PatternStorePort, ResolutionLogger, ResolveAliasUseCase, ResolveInput};
use alias_domain::AliasSnapshot;
use alias_infrastructure::{
    ConfigLoader, FileConfig, FileOutputFormat, FilePatternStore, JsonlResolutionLogger,
};
use alias_presentation::{Cli, ConsoleFormatter, OutputFormat};
use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else {
        match cli.verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"), // -vvv or more
        }
    };

    // Logs go to stderr so JSON output stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    // === Configuration ===
    let config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    let format = cli.output.unwrap_or(match config.output.format {
        Some(FileOutputFormat::Json) => OutputFormat::Json,
        Some(FileOutputFormat::Full) | None => OutputFormat::Full,
    });

    // === Dependency Injection ===
    let store_path = cli.aliases.clone().unwrap_or(config.store.path.clone());
    let store = Arc::new(FilePatternStore::new(store_path));
    info!(
        "Reading aliases from {} ({:?})",
        store.path().display(),
        store.format()
    );

    if cli.check {
        return check(&store).await;
    }

    let mut use_case = ResolveAliasUseCase::new(
        Arc::clone(&store),
        config.resolver.to_resolver_params(),
    );
    let params = use_case.params();
    info!(
        "Resolver: refresh {:?}, serve stale {}, max {} suggestion(s)",
        params.refresh_interval, params.serve_stale_on_error, params.max_suggestions
    );

    if let Some(path) = config.logging.resolution_log_path() {
        match JsonlResolutionLogger::new(&path) {
            Some(logger) => {
                info!("Logging resolutions to {}", path.display());
                let logger: Arc<dyn ResolutionLogger> = Arc::new(logger);
                use_case = use_case.with_logger(logger);
            }
            None => warn!("Resolution log disabled"),
        }
    }

    let scope = cli.scope();

    if cli.list {
        let (snapshot, _) = use_case.current_snapshot().await?;
        print!("{}", ConsoleFormatter::format_alias_list(&snapshot.eligible(&scope)));
        return Ok(());
    }

    let Some(request) = cli.request.clone() else {
        bail!("A request is required. Use --list to see available aliases.");
    };

    let output = use_case
        .execute(ResolveInput::new(request.clone()).with_scope(scope))
        .await?;

    let rendered = match format {
        OutputFormat::Full => ConsoleFormatter::format(&request, &output, &cli.grant),
        OutputFormat::Json => ConsoleFormatter::format_json(&output),
    };
    println!("{}", rendered);

    Ok(())
}

/// Validate every alias in the store and report issues.
async fn check(store: &FilePatternStore) -> Result<()> {
    let aliases = store.load_snapshot().await?;
    let checked = aliases.len();

    match AliasSnapshot::strict(0, aliases) {
        Ok(snapshot) => {
            print!("{}", ConsoleFormatter::format_issues(snapshot.issues(), checked));
            Ok(())
        }
        Err(e) => {
            print!("{}", ConsoleFormatter::format_issues(e.issues(), checked));
            bail!("{}: {}", store.id(), e)
        }
    }
}
