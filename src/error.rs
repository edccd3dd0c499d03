//! Error types for collaborator calls and payload decoding.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a payload into a mapping.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Result payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Result payload is a JSON {0}, expected an object")]
    NotAnObject(&'static str),
}

/// Failure to build or invoke an agent or cog.
#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error("No configuration for '{name}' at {}", .path.display())]
    ProfileNotFound { name: String, path: PathBuf },

    #[error("Invalid configuration for '{name}': {message}")]
    InvalidProfile { name: String, message: String },

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Cannot connect to Ollama at {0}. Is Ollama running?")]
    Connect(String),

    #[error("Ollama API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to send request: {0}")]
    Transport(String),

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),
}
