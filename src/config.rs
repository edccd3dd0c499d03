//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.roi-examples.toml` files.

use crate::agent::AgentConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".roi-examples.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Model backend settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Where agent and cog profiles live.
    #[serde(default)]
    pub profiles: ProfilesConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Show a spinner while waiting on the model.
    #[serde(default = "default_true")]
    pub progress: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            progress: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// LLM backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Default model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Ollama API URL.
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Temperature for generation.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Bearer token; the ROI_API_KEY env var takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            ollama_url: default_ollama_url(),
            temperature: default_temperature(),
            timeout_seconds: default_timeout(),
            api_key: None,
        }
    }
}

fn default_model() -> String {
    "llama3.2:latest".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_timeout() -> u64 {
    600
}

/// Profile directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesConfig {
    /// Agent profiles, one `<name>.toml` per agent.
    #[serde(default = "default_prompts_dir")]
    pub prompts_dir: PathBuf,

    /// Cog profiles, one `<name>.toml` per cog.
    #[serde(default = "default_cogs_dir")]
    pub cogs_dir: PathBuf,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            prompts_dir: default_prompts_dir(),
            cogs_dir: default_cogs_dir(),
        }
    }
}

fn default_prompts_dir() -> PathBuf {
    PathBuf::from(".roi/prompts")
}

fn default_cogs_dir() -> PathBuf {
    PathBuf::from(".roi/cogs")
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.roi-examples.toml` from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref model) = args.model {
            self.backend.model = model.clone();
        }
        if let Some(ref url) = args.ollama_url {
            self.backend.ollama_url = url.clone();
        }
        if let Some(temperature) = args.temperature {
            self.backend.temperature = temperature;
        }
        if let Some(timeout) = args.timeout {
            self.backend.timeout_seconds = timeout;
        }

        if let Some(ref dir) = args.prompts_dir {
            self.profiles.prompts_dir = dir.clone();
        }
        if let Some(ref dir) = args.cogs_dir {
            self.profiles.cogs_dir = dir.clone();
        }

        // --quiet always wins over the file
        if args.quiet {
            self.general.progress = false;
        }
    }

    /// Apply `ROI_API_KEY` from the environment, if set.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("ROI_API_KEY") {
            if !key.trim().is_empty() {
                self.backend.api_key = Some(key);
            }
        }
    }

    /// Backend settings for the agent framework.
    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            ollama_url: self.backend.ollama_url.clone(),
            model_name: self.backend.model.clone(),
            temperature: self.backend.temperature,
            timeout_seconds: self.backend.timeout_seconds,
            api_key: self.backend.api_key.clone(),
            prompts_dir: self.profiles.prompts_dir.clone(),
            cogs_dir: self.profiles.cogs_dir.clone(),
            show_progress: self.general.progress,
        }
    }

    /// Write the default configuration to `path` unless a file is already there.
    ///
    /// Returns whether the file was written.
    pub fn write_default(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, Self::default_toml())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(true)
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend.model, "llama3.2:latest");
        assert_eq!(config.backend.ollama_url, "http://localhost:11434");
        assert_eq!(config.profiles.prompts_dir, PathBuf::from(".roi/prompts"));
        assert!(config.general.progress);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
progress = false

[backend]
model = "qwen2.5:14b"
temperature = 0.2

[profiles]
prompts_dir = "agents"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert!(!config.general.progress);
        assert_eq!(config.backend.model, "qwen2.5:14b");
        assert_eq!(config.backend.temperature, 0.2);
        assert_eq!(config.backend.timeout_seconds, 600);
        assert_eq!(config.profiles.prompts_dir, PathBuf::from("agents"));
        assert_eq!(config.profiles.cogs_dir, PathBuf::from(".roi/cogs"));
    }

    #[test]
    fn test_cli_overrides_only_explicit_values() {
        let mut config: Config = toml::from_str("[backend]\nmodel = \"from-file\"\ntimeout_seconds = 90\n").unwrap();
        let args = Args::try_parse_from([
            "roi-examples",
            "--ollama-url",
            "http://gpu-box:11434",
            "--cogs-dir",
            "cogs",
            "--quiet",
        ])
        .unwrap();

        config.merge_with_args(&args);

        if std::env::var("ROI_MODEL").is_err() {
            assert_eq!(config.backend.model, "from-file");
        }
        assert_eq!(config.backend.timeout_seconds, 90);
        assert_eq!(config.backend.ollama_url, "http://gpu-box:11434");
        assert_eq!(config.profiles.cogs_dir, PathBuf::from("cogs"));
        assert!(!config.general.progress);

        let agent_config = config.agent_config();
        assert_eq!(agent_config.ollama_url, "http://gpu-box:11434");
        assert!(!agent_config.show_progress);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join(CONFIG_FILE), Config::default_toml()).unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.backend.model, "llama3.2:latest");

        std::fs::write(dir.path().join(CONFIG_FILE), "[backend\n").unwrap();
        assert!(Config::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_general_section_has_no_logging_switch() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.contains("verbose"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }

    #[test]
    fn test_write_default_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        assert!(Config::write_default(&path).unwrap());
        assert!(Config::load(&path).is_ok());

        std::fs::write(&path, "[backend]\nmodel = \"mine\"\n").unwrap();
        assert!(!Config::write_default(&path).unwrap());
        assert_eq!(Config::load(&path).unwrap().backend.model, "mine");
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[backend]"));
        assert!(toml_str.contains("[profiles]"));
        assert!(!toml_str.contains("api_key"));
    }
}
