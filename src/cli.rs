//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::demos::Example;
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// ROI Examples - run the ROI automation agents on sample scenarios
///
/// Invokes the master orchestration cog and the three specialist agents
/// (revenue, productivity, knowledge management) with hard-coded example
/// parameters and prints the interesting parts of each result.
///
/// Examples:
///   roi-examples
///   roi-examples --example revenue,graphrag
///   roi-examples --example all --model qwen2.5:14b
///   roi-examples --example workflow --dry-run
///   roi-examples --init-config --init-profiles
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Examples to run, in the order given
    ///
    /// Comma-separated or repeated. Defaults to the master cog example.
    #[arg(
        short,
        long = "example",
        value_name = "NAME",
        value_delimiter = ',',
        default_value = "master"
    )]
    pub examples: Vec<ExampleArg>,

    /// Model used by agents without their own override
    ///
    /// Can also be set via ROI_MODEL env var or .roi-examples.toml config.
    #[arg(short, long, env = "ROI_MODEL")]
    pub model: Option<String>,

    /// Ollama API endpoint URL
    #[arg(long, env = "OLLAMA_URL")]
    pub ollama_url: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .roi-examples.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding agent profiles (<name>.toml)
    #[arg(long, value_name = "DIR")]
    pub prompts_dir: Option<PathBuf>,

    /// Directory holding cog profiles (<name>.toml)
    #[arg(long, value_name = "DIR")]
    pub cogs_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Temperature for agents without their own override (0.0 - 1.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the parameters each example would send and exit
    #[arg(long)]
    pub dry_run: bool,

    /// List the available examples and exit
    #[arg(long)]
    pub list: bool,

    /// Generate a default .roi-examples.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Write the built-in agent and cog profiles
    #[arg(long)]
    pub init_profiles: bool,
}

/// Example selector accepted by --example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExampleArg {
    /// Master orchestration cog
    Master,
    /// Montreal Revenue Extractor
    Revenue,
    /// Productivity Optimizer
    Productivity,
    /// GraphRAG Architect
    Graphrag,
    /// All three agents in sequence
    Workflow,
    /// Every example, in menu order
    All,
}

impl Args {
    /// Parse command-line arguments, loading `.env` from the working
    /// directory (or a parent) first.
    pub fn parse_args() -> Self {
        match Self::parse_with_env_file(None, std::env::args_os()) {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    /// Load `env_file` (or the nearest `.env` when `None`) into the process
    /// environment, then parse `argv`. Variables already set are kept.
    pub fn parse_with_env_file<I, T>(env_file: Option<&Path>, argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        // A missing .env is the normal case.
        let _ = match env_file {
            Some(path) => dotenvy::from_path(path),
            None => dotenvy::dotenv().map(|_| ()),
        };
        Self::try_parse_from(argv)
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref url) = self.ollama_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Ollama URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(temperature) = self.temperature {
            if !(0.0..=1.0).contains(&temperature) {
                return Err("Temperature must be between 0.0 and 1.0".to_string());
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if self.examples.is_empty() {
            return Err("Select at least one example".to_string());
        }

        Ok(())
    }

    /// Selected examples, de-duplicated, in the order first requested.
    pub fn selected_examples(&self) -> Vec<Example> {
        let mut selected: Vec<Example> = Vec::new();

        for arg in &self.examples {
            let expanded: &[Example] = match arg {
                ExampleArg::Master => &[Example::Master],
                ExampleArg::Revenue => &[Example::Revenue],
                ExampleArg::Productivity => &[Example::Productivity],
                ExampleArg::Graphrag => &[Example::Graphrag],
                ExampleArg::Workflow => &[Example::Workflow],
                ExampleArg::All => &Example::ALL,
            };
            for example in expanded {
                if !selected.contains(example) {
                    selected.push(*example);
                }
            }
        }

        selected
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
