// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use jackett_sync::config::DEFAULT_CONFIG_PATH;
use jackett_sync::utils::logging::{format_error, format_step, format_success, format_warning};
use jackett_sync::{
    ArrClient, CategoryProfile, CategoryScanner, Config, HealthCheck, HealthReport,
    JackettClient, OperationTimer, ScanProgress, SyncRunner, TargetKind, TsvExporter,
    TsvRow, Validator,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "jackett-sync")]
#[command(author = "cipher")]
#[command(version)]
#[command(about = "Sync Jackett indexers into Sonarr, Radarr and Listenarr", long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add Jackett indexers missing from the target applications
    Sync {
        /// Log what would be added without creating anything
        #[arg(long)]
        dry_run: bool,

        /// Restrict the run to these targets (default: all enabled)
        #[arg(long = "target", value_enum)]
        targets: Vec<TargetKind>,
    },

    /// Write every Jackett indexer to a TSV file
    Export {
        #[arg(short, long, default_value = "indexers.tsv")]
        output: PathBuf,

        #[arg(long)]
        configured_only: bool,
    },

    /// Find indexers supporting a category profile and write them to a TSV file
    Scan {
        #[arg(long, value_enum, default_value_t = CategoryProfile::Audiobooks)]
        profile: CategoryProfile,

        #[arg(short, long, default_value = "audiobook-indexers.tsv")]
        output: PathBuf,

        /// Put the real Jackett API key in the file instead of a placeholder
        #[arg(long)]
        with_api_key: bool,
    },

    /// Check connectivity to Jackett and every enabled target
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    jackett_sync::utils::logging::init_logger(cli.color, cli.verbose);

    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Config::load(Some(path.as_path())).context("Failed to load configuration")?
        }
        None => {
            if !Path::new(DEFAULT_CONFIG_PATH).exists() {
                warn!(
                    "{} not found, using defaults and environment",
                    DEFAULT_CONFIG_PATH
                );
            }
            Config::load(None).context("Failed to load configuration")?
        }
    };

    match cli.command {
        Commands::Sync { dry_run, targets } => {
            cmd_sync(&config, dry_run || config.dry_run, targets).await?;
        }
        Commands::Export {
            output,
            configured_only,
        } => {
            cmd_export(&config, output, configured_only).await?;
        }
        Commands::Scan {
            profile,
            output,
            with_api_key,
        } => {
            cmd_scan(&config, profile, output, with_api_key, cli.color).await?;
        }
        Commands::Check => {
            cmd_check(&config).await?;
        }
    }

    Ok(())
}

fn request_timeout(config: &Config) -> Duration {
    Duration::from_secs(config.jackett.timeout_secs)
}

async fn cmd_sync(config: &Config, dry_run: bool, requested: Vec<TargetKind>) -> Result<()> {
    let timer = OperationTimer::new("indexer sync");

    let targets = config.resolve_targets(&requested);

    if targets.is_empty() {
        bail!("No targets enabled; enable sonarr, radarr or listenarr in the configuration");
    }

    let names: Vec<_> = targets.iter().map(|t| t.to_string()).collect();
    println!("Syncing Jackett indexers to {}\n", names.join(", "));

    // Every selected target needs a key before anything is fetched
    let missing = config.missing_api_keys(&targets);
    if !missing.is_empty() {
        eprintln!("{}", format_error("Missing API keys! Set them in the .env file:"));
        for variable in &missing {
            eprintln!("   {}=xxx", variable);
        }
        eprintln!("   JACKETT_API_KEY=xxx (optional)");
        bail!("Missing API keys: {}", missing.join(", "));
    }

    for kind in &targets {
        Validator::validate_api_key(&kind.to_string(), config.require_api_key(*kind)?)?;
    }

    println!("{}", format_step(1, 3, "Fetching indexers from Jackett"));
    let jackett = JackettClient::connect(&config.jackett)
        .await
        .context("Failed to connect to Jackett")?;
    let indexers = jackett
        .discover_indexers()
        .await
        .context("Failed to fetch Jackett indexers")?;
    println!("   Found {} configured indexers\n", indexers.len());

    let torznab_key = match config.jackett.api_key.clone().filter(|k| !k.is_empty()) {
        Some(key) => Some(key),
        None => jackett.server_config().await.ok().and_then(|c| c.api_key),
    };
    if torznab_key.is_none() {
        warn!("No Jackett API key available; feeds are added without one");
    }

    println!("{}", format_step(2, 3, "Loading existing indexers"));
    let mut runner = SyncRunner::new(jackett.base_url(), torznab_key, dry_run);
    for kind in &targets {
        let target = config.target(*kind);
        let api_key = config.require_api_key(*kind)?;
        let client = ArrClient::new(*kind, target, api_key, request_timeout(config))?;
        let categories = config.categories.ids(kind.profile()).to_vec();
        runner.add_target(client, categories, target.priority).await;
    }

    let step = if dry_run {
        "Adding indexers (dry run)"
    } else {
        "Adding indexers"
    };
    println!("{}", format_step(3, 3, step));
    let report = runner.run(&indexers).await;

    println!("\n{}", format_success("Done!"));
    print!("{}", report.format());

    if report.total_failed() > 0 {
        println!(
            "{}",
            format_warning(&format!(
                "{} indexers could not be added, see the log above",
                report.total_failed()
            ))
        );
    }

    timer.finish_with_count(indexers.len());
    Ok(())
}

async fn cmd_export(config: &Config, output: PathBuf, configured_only: bool) -> Result<()> {
    Validator::validate_output_path(&output)?;
    println!("Exporting Jackett indexers to TSV\n");

    let jackett = JackettClient::connect(&config.jackett)
        .await
        .context("Failed to connect to Jackett")?;
    let indexers = jackett
        .require_indexers(configured_only)
        .await
        .context("Failed to fetch Jackett indexers")?;
    println!("   Found {} indexers", indexers.len());

    if let Some(sample) = indexers.first() {
        debug!(
            "Sample indexer: {} ({} categories, first: {:?})",
            sample.name,
            sample.caps.len(),
            sample.caps.iter().take(5).collect::<Vec<_>>()
        );
    }

    let api_key = jackett
        .discover_api_key(&config.export.placeholder_api_key)
        .await;

    let rows: Vec<TsvRow> = indexers
        .iter()
        .map(|indexer| TsvRow {
            name: indexer.name.clone(),
            torznab_url: jackett.torznab_url(&indexer.id),
            categories: indexer.category_ids(),
            api_key: api_key.clone(),
        })
        .collect();

    let exporter = TsvExporter::new(output)?;
    let written = exporter.write(&rows)?;

    println!(
        "\n{}",
        format_success(&format!(
            "Exported {} indexers to {}",
            written,
            exporter.path().display()
        ))
    );
    println!("\nFormat: Name | Torznab Feed URL | Categories | API Key");
    println!("\nYou can import this TSV into:");
    println!("   - Listenarr (Settings → Indexers → Import)");
    println!("   - Readarr (Settings → Indexers → Import)");
    println!("   - Other *arr applications");

    Ok(())
}

async fn cmd_scan(
    config: &Config,
    profile: CategoryProfile,
    output: PathBuf,
    with_api_key: bool,
    color: bool,
) -> Result<()> {
    Validator::validate_output_path(&output)?;
    let wanted = config.categories.ids(profile);

    let jackett = JackettClient::connect(&config.jackett)
        .await
        .context("Failed to connect to Jackett")?;
    let indexers = jackett
        .list_indexers(false)
        .await
        .context("Failed to fetch Jackett indexers")?;
    println!("   Found {} total indexers\n", indexers.len());

    let timer = OperationTimer::new("category scan");
    let progress = ScanProgress::with_color(indexers.len(), color);
    let matches = CategoryScanner::new(&jackett, config.jackett.concurrency)
        .scan(&indexers, wanted, &progress)
        .await;
    progress.finish();

    let stats = progress.get_stats();
    info!(
        "Scanned {} indexers in {}s, {:.1}% support {}",
        stats.indexers_scanned,
        stats.duration_secs,
        stats.match_rate(),
        profile
    );
    timer.warn_if_slow(Duration::from_secs(60));
    timer.finish_with_count(indexers.len());

    let ids = jackett_sync::models::join_ids(wanted);
    println!(
        "{}\n",
        format_success(&format!(
            "Found {} indexers with {} support ({}):",
            matches.len(),
            profile,
            ids
        ))
    );

    for found in &matches {
        println!("{} ({})", found.name, found.id);
        println!("   Categories: {}", jackett_sync::models::join_ids(&found.categories));
        println!("   Torznab: {}", found.torznab_url);
        println!("   Link: {}\n", found.link);
    }

    let api_key = if with_api_key {
        jackett
            .discover_api_key(&config.export.placeholder_api_key)
            .await
    } else {
        config.export.placeholder_api_key.clone()
    };

    let rows: Vec<TsvRow> = matches
        .into_iter()
        .map(|found| TsvRow {
            name: found.name,
            torznab_url: found.torznab_url,
            categories: found.categories,
            api_key: api_key.clone(),
        })
        .collect();

    let exporter = TsvExporter::new(output)?;
    exporter.write(&rows)?;
    println!("Exported to {}", exporter.path().display());

    Ok(())
}

async fn cmd_check(config: &Config) -> Result<()> {
    info!("Checking service connectivity");
    let mut checks = Vec::new();

    let started = Instant::now();
    let jackett = match JackettClient::connect(&config.jackett).await {
        Ok(client) => {
            let result = client.ping().await;
            checks.push(HealthCheck::from_result(
                "Jackett",
                &result,
                |_| Some(config.jackett.url.clone()),
                started.elapsed(),
            ));
            Some(client)
        }
        Err(e) => {
            checks.push(HealthCheck::unhealthy(
                "Jackett",
                e.to_string(),
                started.elapsed(),
            ));
            None
        }
    };

    if let Some(client) = &jackett {
        match client.discover_indexers().await {
            Ok(indexers) => info!("Jackett exposes {} syncable indexers", indexers.len()),
            Err(e) => warn!("Could not list Jackett indexers: {}", e),
        }
    }

    for kind in config.enabled_targets() {
        let service = kind.to_string();
        let api_key = match config.require_api_key(kind) {
            Ok(key) => key,
            Err(e) => {
                checks.push(HealthCheck::degraded(&service, e.to_string(), Duration::ZERO));
                continue;
            }
        };

        let started = Instant::now();
        let client = ArrClient::new(kind, config.target(kind), api_key, request_timeout(config))?;
        let result = client.ping().await;
        checks.push(HealthCheck::from_result(
            &service,
            &result,
            |status| {
                Some(format!(
                    "{} {}",
                    status.app_name.as_deref().unwrap_or(&service),
                    status.version.as_deref().unwrap_or("(unknown version)")
                ))
            },
            started.elapsed(),
        ));
    }

    let report = HealthReport::new(checks, env!("CARGO_PKG_VERSION").to_string());
    println!("{}", report.format());

    if !report.is_healthy() {
        bail!("One or more services are not healthy");
    }

    Ok(())
}
