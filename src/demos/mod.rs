//! The example scenarios and the guard that runs them.
//!
//! Each example builds its parameters, invokes one or more collaborators,
//! decodes the payload and prints selected fields. Examples share nothing.

pub mod graphrag;
pub mod master;
pub mod productivity;
pub mod revenue;
pub mod runner;
pub mod workflow;

pub use runner::{dry_run, run_guarded};

use crate::agent::Framework;
use crate::models::Params;
use anyhow::Result;
use std::fmt;
use std::io::Write;

/// Whether an invocation targets an agent or a cog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Agent,
    Cog,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Agent => write!(f, "agent"),
            Target::Cog => write!(f, "cog"),
        }
    }
}

/// One planned call: who gets invoked and with what.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub target: Target,
    pub name: &'static str,
    pub params: Params,
}

impl Invocation {
    pub fn agent(name: &'static str, params: Params) -> Self {
        Self {
            target: Target::Agent,
            name,
            params,
        }
    }

    pub fn cog(name: &'static str, params: Params) -> Self {
        Self {
            target: Target::Cog,
            name,
            params,
        }
    }
}

/// The available examples, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Example {
    Master,
    Revenue,
    Productivity,
    Graphrag,
    Workflow,
}

impl Example {
    pub const ALL: [Example; 5] = [
        Example::Master,
        Example::Revenue,
        Example::Productivity,
        Example::Graphrag,
        Example::Workflow,
    ];

    /// Position in the menu, starting at 1.
    pub fn number(&self) -> usize {
        match self {
            Example::Master => 1,
            Example::Revenue => 2,
            Example::Productivity => 3,
            Example::Graphrag => 4,
            Example::Workflow => 5,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Example::Master => "master",
            Example::Revenue => "revenue",
            Example::Productivity => "productivity",
            Example::Graphrag => "graphrag",
            Example::Workflow => "workflow",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Example::Master => "Master Orchestration Cog (Recommended)",
            Example::Revenue => "Montreal Revenue Extractor",
            Example::Productivity => "Productivity Optimizer",
            Example::Graphrag => "GraphRAG Architect",
            Example::Workflow => "Comprehensive Workflow",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Example::Master => "Automatic routing to the right specialist agent",
            Example::Revenue => "Market analysis and client acquisition strategies",
            Example::Productivity => "Neuroscience-based performance enhancement",
            Example::Graphrag => "Knowledge management system design",
            Example::Workflow => "Using all agents together for maximum impact",
        }
    }

    /// Every call this example makes, with its parameters.
    pub fn invocations(&self) -> Vec<Invocation> {
        match self {
            Example::Master => vec![Invocation::cog(master::COG, master::params())],
            Example::Revenue => vec![Invocation::agent(revenue::AGENT, revenue::params())],
            Example::Productivity => vec![Invocation::agent(
                productivity::AGENT,
                productivity::params(),
            )],
            Example::Graphrag => vec![Invocation::agent(graphrag::AGENT, graphrag::params())],
            Example::Workflow => workflow::invocations(),
        }
    }

    pub async fn run(&self, framework: &dyn Framework, out: &mut dyn Write) -> Result<()> {
        match self {
            Example::Master => master::run(framework, out).await,
            Example::Revenue => revenue::run(framework, out).await,
            Example::Productivity => productivity::run(framework, out).await,
            Example::Graphrag => graphrag::run(framework, out).await,
            Example::Workflow => workflow::run(framework, out).await,
        }
    }
}

impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
