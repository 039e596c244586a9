//! score-exporter - student homework score aggregation
//!
//! A CLI tool that merges per-server submission logs and score files into
//! one record per student, applies competition overrides, and exports a
//! formatted Excel workbook.
//!
//! Exit codes:
//!   0 - Success (including dry runs and empty rosters)
//!   1 - Runtime error (bad arguments, config, or workbook write failure)

mod aggregate;
mod cli;
mod config;
mod models;
mod overrides;
mod report;
mod scanner;

use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("score-exporter v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the export
    if let Err(e) = run_export(args) {
        error!("Export failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .scores.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".scores.toml");

    if path.exists() {
        eprintln!("⚠️  .scores.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .scores.toml")?;

    println!("✅ Created .scores.toml with default settings.");
    println!("   Edit it to customize servers, assignment count, and paths.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete export workflow.
fn run_export(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let base_dir = config.paths.base_dir.clone();
    if !base_dir.exists() {
        // Missing inputs are absent data all the way down; the run still
        // succeeds with an empty roster.
        warn!(
            "Score directory {} does not exist; the roster will be empty",
            base_dir.display()
        );
    }

    // Step 1: Collect and merge scores
    println!("📂 Collecting scores from: {}", base_dir.display());
    let scanner = scanner::ScoreScanner::new(base_dir);
    let overrides = overrides::Overrides::load(&config.extra_path(), &config.course.competition);
    if !overrides.is_empty() {
        info!("Loaded {} competition override(s)", overrides.len());
    }

    let roster = aggregate::collect_students(&scanner, &config, &overrides);
    println!("   Students found: {}", roster.len());
    println!("   Graded slots: {}", aggregate::graded_slot_count(&roster));

    // Handle --dry-run: print the roster and exit
    if args.dry_run {
        println!("\n🔍 Dry run: roster only, no workbook written.\n");
        let listing = report::roster_listing(&roster, &config);
        if listing.is_empty() {
            println!("   (no students found)");
        } else {
            println!("{}", listing);
        }
        return Ok(());
    }

    // Step 2: Write the workbook (the only fatal failure point)
    println!("\n📝 Writing workbook...");
    report::write_workbook(&roster, &config, &config.paths.output)
        .with_context(|| format!("Failed to export {}", config.paths.output.display()))?;

    println!(
        "\n✅ Exported {} students to: {}",
        roster.len(),
        config.paths.output.display()
    );
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .scores.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
