//! Ollama-backed agents and cogs.
//!
//! An agent run is one chat request: the profile's system prompt plus the
//! parameters as JSON. A cog asks the model which of its agents should take
//! the request, then runs that agent.

use crate::agent::profile::{load_agent_profile, load_cog_profile, AgentProfile, CogProfile};
use crate::agent::{Collaborator, Framework};
use crate::error::CollaboratorError;
use crate::models::{Params, Payload};
use anyhow::{Context, Result};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Configuration for the Ollama backend.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub ollama_url: String,
    pub model_name: String,
    pub temperature: f32,
    pub timeout_seconds: u64,
    /// Bearer token for hosted Ollama-compatible endpoints.
    pub api_key: Option<String>,
    pub prompts_dir: PathBuf,
    pub cogs_dir: PathBuf,
    /// Show a spinner while waiting on the model.
    pub show_progress: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".to_string(),
            model_name: "llama3.2:latest".to_string(),
            temperature: 0.3,
            timeout_seconds: 600,
            api_key: None,
            prompts_dir: PathBuf::from(".roi/prompts"),
            cogs_dir: PathBuf::from(".roi/cogs"),
            show_progress: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

/// Ollama chat API request.
#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
}

/// Ollama chat API response.
#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// One chat turn to send.
struct ChatTurn<'a> {
    model: &'a str,
    temperature: f32,
    system: &'a str,
    user: &'a str,
    json_output: bool,
    label: &'a str,
}

/// Shared HTTP client for all agents and cogs.
pub struct OllamaClient {
    config: AgentConfig,
    http_client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(config: AgentConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            http_client,
        })
    }

    async fn chat(&self, turn: ChatTurn<'_>) -> Result<String, CollaboratorError> {
        let url = format!("{}/api/chat", self.config.ollama_url.trim_end_matches('/'));

        let request = OllamaChatRequest {
            model: turn.model,
            messages: vec![ChatMessage::system(turn.system), ChatMessage::user(turn.user)],
            stream: false,
            format: turn.json_output.then_some("json"),
            options: OllamaOptions {
                temperature: turn.temperature,
            },
        };

        debug!("Sending chat request for {} to {}", turn.label, url);
        let spinner = self.spinner(turn.label);

        let mut builder = self.http_client.post(&url).json(&request);
        if let Some(ref key) = self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let result = self.send(builder).await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        result
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<String, CollaboratorError> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                CollaboratorError::Timeout(self.config.timeout_seconds)
            } else if e.is_connect() {
                CollaboratorError::Connect(self.config.ollama_url.clone())
            } else {
                CollaboratorError::Transport(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Api { status, body });
        }

        let chat_response: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::MalformedResponse(e.to_string()))?;

        Ok(chat_response.message.content)
    }

    fn spinner(&self, label: &str) -> Option<ProgressBar> {
        if !self.config.show_progress {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Waiting on {}", label));
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    }
}

/// A single agent backed by its profile.
pub struct OllamaAgent {
    client: Arc<OllamaClient>,
    profile: AgentProfile,
}

impl OllamaAgent {
    fn model(&self) -> &str {
        self.profile
            .model
            .as_deref()
            .unwrap_or(&self.client.config.model_name)
    }
}

#[async_trait]
impl Collaborator for OllamaAgent {
    fn name(&self) -> &str {
        &self.profile.name
    }

    async fn run(&self, params: &Params) -> Result<Payload, CollaboratorError> {
        info!("Running agent {} with {} parameters", self.profile.name, params.len());

        let content = self
            .client
            .chat(ChatTurn {
                model: self.model(),
                temperature: self
                    .profile
                    .temperature
                    .unwrap_or(self.client.config.temperature),
                system: &self.profile.system_prompt,
                user: &params.to_pretty_json(),
                json_output: true,
                label: &self.profile.name,
            })
            .await?;

        Ok(Payload::Text(content))
    }
}

/// An orchestration cog that hands each request to one of its agents.
pub struct OllamaCog {
    client: Arc<OllamaClient>,
    profile: CogProfile,
}

impl OllamaCog {
    fn routing_message(&self, params: &Params) -> String {
        let mut message = String::new();
        message.push_str("Request:\n");
        message.push_str(&params.to_pretty_json());
        message.push_str("\n\nSpecialists:\n");

        for name in &self.profile.agents {
            match load_agent_profile(&self.client.config.prompts_dir, name) {
                Ok(p) if !p.description.is_empty() => {
                    message.push_str(&format!("- {}: {}\n", name, p.description))
                }
                _ => message.push_str(&format!("- {}\n", name)),
            }
        }

        message.push_str("\nAnswer with one specialist name.");
        message
    }
}

#[async_trait]
impl Collaborator for OllamaCog {
    fn name(&self) -> &str {
        &self.profile.name
    }

    async fn run(&self, params: &Params) -> Result<Payload, CollaboratorError> {
        let route = if self.profile.agents.len() == 1 {
            self.profile.agents[0].clone()
        } else {
            let reply = self
                .client
                .chat(ChatTurn {
                    model: &self.client.config.model_name,
                    temperature: 0.0,
                    system: self
                        .profile
                        .router_prompt
                        .as_deref()
                        .unwrap_or(DEFAULT_ROUTER_PROMPT),
                    user: &self.routing_message(params),
                    json_output: false,
                    label: &self.profile.name,
                })
                .await?;
            pick_route(&reply, &self.profile.agents).to_string()
        };

        info!("Cog {} routed request to {}", self.profile.name, route);

        let profile = load_agent_profile(&self.client.config.prompts_dir, &route)?;
        let agent = OllamaAgent {
            client: Arc::clone(&self.client),
            profile,
        };
        agent.run(params).await
    }
}

/// Pick the agent named in `reply`, falling back to the first candidate.
///
/// `candidates` must be non-empty.
pub fn pick_route<'a>(reply: &str, candidates: &'a [String]) -> &'a str {
    let reply = reply.to_lowercase();

    // Longest names first so a name that contains another wins.
    let mut by_length: Vec<&String> = candidates.iter().collect();
    by_length.sort_by_key(|name| std::cmp::Reverse(name.len()));

    match by_length
        .into_iter()
        .find(|name| reply.contains(&name.to_lowercase()))
    {
        Some(name) => name.as_str(),
        None => {
            warn!("Router reply named no known agent, using {}", candidates[0]);
            candidates[0].as_str()
        }
    }
}

/// Framework that builds Ollama-backed collaborators from profiles on disk.
pub struct OllamaFramework {
    client: Arc<OllamaClient>,
}

impl OllamaFramework {
    pub fn new(config: AgentConfig) -> Result<Self> {
        info!(
            "Using model {} at {} (profiles: {}, cogs: {})",
            config.model_name,
            config.ollama_url,
            config.prompts_dir.display(),
            config.cogs_dir.display()
        );

        Ok(Self {
            client: Arc::new(OllamaClient::new(config)?),
        })
    }
}

impl Framework for OllamaFramework {
    fn agent(&self, name: &str) -> Result<Box<dyn Collaborator>, CollaboratorError> {
        let profile = load_agent_profile(&self.client.config.prompts_dir, name)?;
        Ok(Box::new(OllamaAgent {
            client: Arc::clone(&self.client),
            profile,
        }))
    }

    fn cog(&self, name: &str) -> Result<Box<dyn Collaborator>, CollaboratorError> {
        let profile = load_cog_profile(&self.client.config.cogs_dir, name)?;
        Ok(Box::new(OllamaCog {
            client: Arc::clone(&self.client),
            profile,
        }))
    }
}

const DEFAULT_ROUTER_PROMPT: &str =
    "You route each request to exactly one specialist. Reply with the specialist's name only.";
