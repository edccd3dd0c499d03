//! ROI Examples - sample runs of the ROI automation agents
//!
//! A CLI that builds the master orchestration cog and the specialist agents
//! from their profiles, runs them on hard-coded scenarios and prints the
//! interesting parts of each result.
//!
//! Exit codes:
//!   0 - Examples ran (failures inside an example are reported, not fatal)
//!   1 - Invalid arguments, an unreadable --config file, or a failed config write

mod agent;
mod cli;
mod config;
mod demos;
mod error;
mod models;
mod report;

use anyhow::Result;
use chrono::Utc;
use cli::Args;
use config::{Config, CONFIG_FILE};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments (after .env, so its values reach clap's env fallbacks)
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if args.list {
        print!("{}", report::generate_example_list());
        return Ok(());
    }

    // Handle --init-config / --init-profiles early (no logging needed)
    if args.init_config || args.init_profiles {
        return handle_init(&args);
    }

    // Initialize logging
    init_logging(&args);

    info!("ROI Examples v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run_examples(args).await {
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config and --init-profiles.
fn handle_init(args: &Args) -> Result<()> {
    if args.init_config {
        if Config::write_default(Path::new(CONFIG_FILE))? {
            println!("✅ Created {} with default settings.", CONFIG_FILE);
            println!("   Edit it to customize the model, endpoint, and profile directories.");
        } else {
            eprintln!(
                "⚠️  {} already exists; leaving it unchanged. Remove it first to regenerate.",
                CONFIG_FILE
            );
        }
    }

    if args.init_profiles {
        let mut config = load_config(args)?;
        config.merge_with_args(args);

        let written = agent::profile::write_builtin_profiles(
            &config.profiles.prompts_dir,
            &config.profiles.cogs_dir,
        )?;

        if written.is_empty() {
            println!("✅ All built-in profiles already exist; nothing written.");
        } else {
            println!("✅ Wrote {} profile(s):", written.len());
            for path in &written {
                println!("   📄 {}", path.display());
            }
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a tracing subscriber was already installed");
    }
}

/// Print the banner, run the selected examples behind the failure guard and
/// print the footer. Only setup errors are returned.
async fn run_examples(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.apply_env();

    let examples = args.selected_examples();
    let mut stdout = std::io::stdout();

    write!(stdout, "{}", report::generate_banner(&examples))?;

    if args.dry_run {
        return demos::dry_run(&examples, &mut stdout);
    }

    let framework = agent::OllamaFramework::new(config.agent_config())?;
    let checklist = report::generate_remediation_checklist(
        &config.backend.ollama_url,
        &config.profiles.prompts_dir,
        &config.profiles.cogs_dir,
    );

    let outcome = demos::run_guarded(&examples, &framework, &mut stdout, &checklist).await;
    if outcome.is_success() {
        info!("Completed {} example(s)", outcome.completed.len());
    } else {
        warn!(
            "Stopped after {} of {} example(s)",
            outcome.completed.len(),
            examples.len()
        );
    }

    write!(stdout, "{}", report::generate_footer(Utc::now()))?;
    stdout.flush()?;

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
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
