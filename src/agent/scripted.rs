//! In-memory framework with canned replies, for tests.

use crate::agent::{Collaborator, Framework};
use crate::error::CollaboratorError;
use crate::models::{Params, Payload};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// What a scripted collaborator does when run.
#[derive(Debug, Clone)]
pub enum Reply {
    Payload(Payload),
    Fail(String),
    Panic(String),
}

impl Reply {
    pub fn json(text: &str) -> Self {
        Reply::Payload(Payload::Text(text.to_string()))
    }
}

#[derive(Default)]
pub struct ScriptedFramework {
    replies: HashMap<String, Reply>,
    calls: Arc<Mutex<Vec<(String, Params)>>>,
}

impl ScriptedFramework {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the reply for an agent or cog name. Unscripted names are missing.
    pub fn with(mut self, name: &str, reply: Reply) -> Self {
        self.replies.insert(name.to_string(), reply);
        self
    }

    /// Names invoked so far, in call order.
    pub fn called(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn params_for(&self, name: &str) -> Option<Params> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p.clone())
    }

    fn build(&self, name: &str) -> Result<Box<dyn Collaborator>, CollaboratorError> {
        let reply = self
            .replies
            .get(name)
            .cloned()
            .ok_or_else(|| CollaboratorError::ProfileNotFound {
                name: name.to_string(),
                path: format!("scripted/{}.toml", name).into(),
            })?;

        Ok(Box::new(ScriptedCollaborator {
            name: name.to_string(),
            reply,
            calls: Arc::clone(&self.calls),
        }))
    }
}

impl Framework for ScriptedFramework {
    fn agent(&self, name: &str) -> Result<Box<dyn Collaborator>, CollaboratorError> {
        self.build(name)
    }

    fn cog(&self, name: &str) -> Result<Box<dyn Collaborator>, CollaboratorError> {
        self.build(name)
    }
}

struct ScriptedCollaborator {
    name: String,
    reply: Reply,
    calls: Arc<Mutex<Vec<(String, Params)>>>,
}

#[async_trait]
impl Collaborator for ScriptedCollaborator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, params: &Params) -> Result<Payload, CollaboratorError> {
        self.calls
            .lock()
            .unwrap()
            .push((self.name.clone(), params.clone()));

        match &self.reply {
            Reply::Payload(payload) => Ok(payload.clone()),
            Reply::Fail(message) => Err(CollaboratorError::Transport(message.clone())),
            Reply::Panic(message) => panic!("{}", message),
        }
    }
}
