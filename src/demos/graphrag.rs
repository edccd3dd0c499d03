//! Example 4: knowledge system design from the GraphRAG Architect.

use crate::agent::Framework;
use crate::models::{display_item, Document, Params, MISSING};
use crate::report::heading;
use anyhow::Result;
use serde_json::Value;
use std::io::Write;

pub const AGENT: &str = "graphrag_architect";

/// How many tasks to show per roadmap phase.
const TASK_PREVIEW: usize = 3;

pub fn params() -> Params {
    Params::new()
        .with(
            "data_sources",
            vec![
                "Gmail (5 years of emails, ~50,000 messages)",
                "Google Drive (200GB documents, PDFs, presentations)",
                "Notion (500 notes on AI, freelancing, projects)",
                "GitHub (20 repositories, code and documentation)",
                "Coursera (5 AI certification materials)",
                "Browser bookmarks (1000+ AI resources)",
            ],
        )
        .with("document_count", "~60,000")
        .with("data_size_gb", "220")
        .with("monthly_growth", "~2GB, 500 new documents")
        // USD
        .with("monthly_budget", 500)
        // USD one-time
        .with("setup_budget", 200)
        // hours per week
        .with("maintenance_hours", 2)
        .with("cloud_preference", "AWS or GCP")
        .with("self_hosting", "Comfortable with Docker, basic DevOps")
        .with("programming_level", "Intermediate Python, familiar with APIs")
        .with(
            "use_cases",
            vec![
                "Research past projects and client work for proposals",
                "Find relevant AI techniques and tools for specific problems",
                "Track learning progress and identify knowledge gaps",
                "Generate context-aware prompts for new projects",
                "Decision support with historical data",
            ],
        )
        .with("queries_per_day", "20-30")
        .with("acceptable_latency", "<2 seconds")
        .with("accuracy_requirements", "85%+ relevant results in top 5")
        .with(
            "data_sensitivity",
            "Medium (no passwords/API keys, but personal correspondence)",
        )
        .with(
            "compliance_requirements",
            "None specific, but GDPR-aware practices preferred",
        )
        .with(
            "third_party_sharing",
            "No - all data stays in personal infrastructure",
        )
        .with(
            "additional_context",
            "
        - Need fast retrieval for client calls and proposals
        - Want to learn from past successes and failures
        - Interested in multi-agent systems for different query types
        - Budget-conscious but willing to invest in high-ROI tools
        ",
        )
}

/// Shorter parameter set used by the comprehensive workflow.
pub fn brief_params() -> Params {
    Params::new()
        .with(
            "data_sources",
            vec!["Gmail", "Google Drive", "Notion", "GitHub"],
        )
        .with("document_count", "60000")
        .with("monthly_budget", 500)
        .with(
            "use_cases",
            vec!["Research past work", "Find AI techniques", "Generate prompts"],
        )
}

pub async fn run(framework: &dyn Framework, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "\n{}",
        heading("Example 4: GraphRAG Knowledge Management Architect (Direct)")
    )?;

    let agent = framework.agent(AGENT)?;

    writeln!(out, "\nDesigning GraphRAG architecture...")?;
    let design = agent.run(&params()).await?.decode()?;

    writeln!(out, "\n{}", heading("System Architecture:"))?;
    let architecture = design.section("architecture");
    for component in architecture.list("components") {
        let component = Document::from_value(component);
        writeln!(out, "\n{}", component.text_or("name", MISSING))?;
        writeln!(out, "  Purpose: {}", component.text_or("purpose", MISSING))?;
        writeln!(out, "  Deployment: {}", component.text_or("deployment", MISSING))?;
        writeln!(out, "  Cost: ${}/month", component.text_or("cost_monthly", MISSING))?;
    }
    writeln!(out, "\nTotal Monthly Cost: ${}", total_monthly_cost(&design))?;

    writeln!(out, "\n{}", heading("90-Day Implementation Roadmap:"))?;
    for (phase, details) in design.section("implementation_roadmap").entries() {
        writeln!(out, "\n{}:", phase)?;
        if let Value::Array(tasks) = details {
            for task in tasks.iter().take(TASK_PREVIEW) {
                writeln!(out, "  - {}", display_item(task))?;
            }
        }
    }

    writeln!(out, "\n{}", heading("ROI Projection:"))?;
    writeln!(out, "{}", design.section("roi_projection").to_pretty_json())?;

    Ok(())
}

/// `architecture.total_monthly_cost` as the model wrote it, or 0 when absent.
pub fn total_monthly_cost(design: &Document) -> String {
    design
        .section("architecture")
        .text_or("total_monthly_cost", "0")
}

/// Numeric `architecture.total_monthly_cost` for arithmetic.
///
/// Absent counts as 0; a value that is present but not a number is `None`.
pub fn monthly_cost_amount(design: &Document) -> Option<f64> {
    let architecture = design.section("architecture");
    match architecture.text("total_monthly_cost") {
        None => Some(0.0),
        Some(_) => architecture.number("total_monthly_cost"),
    }
}
