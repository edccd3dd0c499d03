//! Agent and cog profiles.
//!
//! Profiles are TOML files named after the agent or cog they configure:
//! `<prompts_dir>/<name>.toml` for agents, `<cogs_dir>/<name>.toml` for cogs.

use crate::error::CollaboratorError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration of a single agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// System message sent with every request.
    pub system_prompt: String,

    /// Model override for this agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Temperature override for this agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Configuration of an orchestration cog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CogProfile {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Agents the cog may hand a request to. The first one is the fallback.
    pub agents: Vec<String>,

    /// Instructions for choosing an agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub router_prompt: Option<String>,
}

/// Path of the profile for `name` inside `dir`.
pub fn profile_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.toml", name))
}

pub fn load_agent_profile(dir: &Path, name: &str) -> Result<AgentProfile, CollaboratorError> {
    let profile: AgentProfile = load_profile(dir, name)?;
    if profile.system_prompt.trim().is_empty() {
        return Err(CollaboratorError::InvalidProfile {
            name: name.to_string(),
            message: "system_prompt is empty".to_string(),
        });
    }
    Ok(profile)
}

pub fn load_cog_profile(dir: &Path, name: &str) -> Result<CogProfile, CollaboratorError> {
    let profile: CogProfile = load_profile(dir, name)?;
    if profile.agents.is_empty() {
        return Err(CollaboratorError::InvalidProfile {
            name: name.to_string(),
            message: "cog lists no agents".to_string(),
        });
    }
    Ok(profile)
}

fn load_profile<T: for<'de> Deserialize<'de>>(
    dir: &Path,
    name: &str,
) -> Result<T, CollaboratorError> {
    if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(CollaboratorError::InvalidProfile {
            name: name.to_string(),
            message: "name must be a plain file stem".to_string(),
        });
    }

    let path = profile_path(dir, name);
    debug!("Loading profile {} from {}", name, path.display());

    let content = std::fs::read_to_string(&path).map_err(|_| CollaboratorError::ProfileNotFound {
        name: name.to_string(),
        path: path.clone(),
    })?;

    toml::from_str(&content).map_err(|e| CollaboratorError::InvalidProfile {
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// Built-in profiles for the three specialist agents.
pub fn builtin_agent_profiles() -> Vec<AgentProfile> {
    vec![
        AgentProfile {
            name: "montreal_revenue_extractor".to_string(),
            description: "Market analysis and client acquisition strategies for AI freelancing"
                .to_string(),
            system_prompt: REVENUE_PROMPT.to_string(),
            model: None,
            temperature: None,
        },
        AgentProfile {
            name: "productivity_optimizer".to_string(),
            description: "Neuroscience-based performance enhancement protocols".to_string(),
            system_prompt: PRODUCTIVITY_PROMPT.to_string(),
            model: None,
            temperature: None,
        },
        AgentProfile {
            name: "graphrag_architect".to_string(),
            description: "Knowledge management system design".to_string(),
            system_prompt: GRAPHRAG_PROMPT.to_string(),
            model: None,
            temperature: None,
        },
    ]
}

/// Built-in profile for the master orchestration cog.
pub fn builtin_cog_profiles() -> Vec<CogProfile> {
    vec![CogProfile {
        name: "roi_automation_master".to_string(),
        description: "Routes a request to the right ROI specialist".to_string(),
        agents: builtin_agent_profiles()
            .into_iter()
            .map(|p| p.name)
            .collect(),
        router_prompt: Some(ROUTER_PROMPT.to_string()),
    }]
}

/// Write the built-in profiles, leaving existing files untouched.
///
/// Returns the paths that were written.
pub fn write_builtin_profiles(prompts_dir: &Path, cogs_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for profile in builtin_agent_profiles() {
        let path = profile_path(prompts_dir, &profile.name);
        if write_if_absent(&path, &toml::to_string_pretty(&profile)?)? {
            written.push(path);
        }
    }

    for profile in builtin_cog_profiles() {
        let path = profile_path(cogs_dir, &profile.name);
        if write_if_absent(&path, &toml::to_string_pretty(&profile)?)? {
            written.push(path);
        }
    }

    Ok(written)
}

fn write_if_absent(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        info!("Keeping existing profile {}", path.display());
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write profile {}", path.display()))?;
    Ok(true)
}

const REVENUE_PROMPT: &str = r#"You are a freelance market strategist for the Montreal AI services market.
Given the freelancer's skills, income target, availability and context, respond with a single JSON object:
{
  "market_analysis": {"underserved_niches": [{"niche": "...", "rate_range": "...", "demand": "..."}]},
  "service_packages": {"<package name>": {"price": "...", "deliverables": ["..."]}},
  "acquisition_pipeline": {"week_1": ["..."], "week_2": ["..."], "week_3": ["..."]},
  "revenue_projections": {"monthly_income": 0, "time_to_first_client": 0}
}
Only output JSON."#;

const PRODUCTIVITY_PROMPT: &str = r#"You are a productivity coach grounded in chronobiology and neuroscience.
Given the person's schedule, energy pattern, triggers and goals, respond with a single JSON object:
{
  "chronobiological_analysis": {"chronotype": "...", "optimal_work_windows": [{"time": "...", "ideal_tasks": ["..."]}]},
  "neurochemical_optimization": {"morning_stack": [{"supplement": "...", "purpose": "...", "evidence": "..."}]},
  "deep_work_architecture": {"daily_capacity": 0},
  "roi_projection": {"weekly_time_saved": 0}
}
Use "practice" instead of "supplement" for non-supplement interventions. Only output JSON."#;

const GRAPHRAG_PROMPT: &str = r#"You are a knowledge management architect specialising in GraphRAG systems.
Given the data sources, budget, skills and use cases, respond with a single JSON object:
{
  "architecture": {"components": [{"name": "...", "purpose": "...", "deployment": "...", "cost_monthly": 0}], "total_monthly_cost": 0},
  "implementation_roadmap": {"<phase name>": ["task", "..."]},
  "roi_projection": {"time_saved_monthly": 0, "annual_roi_percentage": 0}
}
Only output JSON."#;

const ROUTER_PROMPT: &str = r#"You route requests about AI freelancing to exactly one specialist.
Pick the specialist whose focus best matches the request: revenue and clients, productivity and energy, or knowledge management.
Reply with the specialist's name only."#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_profile_is_reported_with_path() {
        let dir = TempDir::new().unwrap();
        let err = load_agent_profile(dir.path(), "graphrag_architect").unwrap_err();

        match err {
            CollaboratorError::ProfileNotFound { name, path } => {
                assert_eq!(name, "graphrag_architect");
                assert_eq!(path, dir.path().join("graphrag_architect.toml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_agent_profile() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("writer.toml"),
            r#"
name = "writer"
system_prompt = "Write things."
temperature = 0.7
"#,
        )
        .unwrap();

        let profile = load_agent_profile(dir.path(), "writer").unwrap();
        assert_eq!(profile.name, "writer");
        assert_eq!(profile.description, "");
        assert_eq!(profile.temperature, Some(0.7));
        assert_eq!(profile.model, None);
    }

    #[test]
    fn test_cog_without_agents_is_invalid() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("empty.toml"), "name = \"empty\"\nagents = []\n").unwrap();

        let err = load_cog_profile(dir.path(), "empty").unwrap_err();
        assert!(matches!(err, CollaboratorError::InvalidProfile { .. }));
    }

    #[test]
    fn test_rejects_path_like_names() {
        let dir = TempDir::new().unwrap();
        let err = load_agent_profile(dir.path(), "../secrets").unwrap_err();
        assert!(matches!(err, CollaboratorError::InvalidProfile { .. }));
    }

    #[test]
    fn test_write_builtin_profiles_round_trips_and_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let prompts = dir.path().join("prompts");
        let cogs = dir.path().join("cogs");

        let written = write_builtin_profiles(&prompts, &cogs).unwrap();
        assert_eq!(written.len(), 4);

        let cog = load_cog_profile(&cogs, "roi_automation_master").unwrap();
        assert_eq!(cog.agents.len(), 3);
        for agent in &cog.agents {
            assert!(load_agent_profile(&prompts, agent).is_ok());
        }

        std::fs::write(profile_path(&prompts, "productivity_optimizer"), "custom").unwrap();
        let written = write_builtin_profiles(&prompts, &cogs).unwrap();
        assert!(written.is_empty());
        assert_eq!(
            std::fs::read_to_string(profile_path(&prompts, "productivity_optimizer")).unwrap(),
            "custom"
        );
    }
}
