//! Agent and cog clients.
//!
//! Examples only see the [`Framework`] and [`Collaborator`] traits. What an
//! agent actually does is decided by its profile and the model behind it.

pub mod ollama;
pub mod profile;

#[cfg(test)]
pub mod scripted;

pub use ollama::{AgentConfig, OllamaFramework};

use crate::error::CollaboratorError;
use crate::models::{Params, Payload};
use async_trait::async_trait;

/// A named unit that accepts parameters and returns a result payload.
#[async_trait]
pub trait Collaborator: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, params: &Params) -> Result<Payload, CollaboratorError>;
}

/// Builds agents and cogs by name.
pub trait Framework: Send + Sync {
    fn agent(&self, name: &str) -> Result<Box<dyn Collaborator>, CollaboratorError>;

    fn cog(&self, name: &str) -> Result<Box<dyn Collaborator>, CollaboratorError>;
}
