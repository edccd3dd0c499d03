//! Example 2: market analysis from the Montreal Revenue Extractor.

use crate::agent::Framework;
use crate::models::{display_item, Document, Params, MISSING};
use crate::report::heading;
use anyhow::Result;
use std::io::Write;
use tracing::{debug, warn};

pub const AGENT: &str = "montreal_revenue_extractor";

pub fn params() -> Params {
    Params::new()
        .with(
            "current_skills",
            "Prompt engineering, AI automation, Python, LangChain, AgentForge",
        )
        // CAD per 2 weeks
        .with("target_income", 4000)
        // hours per week available for freelancing
        .with("available_hours", 20)
        .with("current_employment", "Operator at Labatt, 15h-23h shift")
        .with(
            "additional_context",
            "
        - 5 Coursera AI certifications
        - Based in Montreal (bilingual FR/EN)
        - Experience with GPT-4, Claude, local models
        - Interest in helping SMBs automate workflows
        ",
        )
}

/// Shorter parameter set used by the comprehensive workflow.
pub fn brief_params() -> Params {
    Params::new()
        .with("current_skills", "Prompt engineering, AI automation")
        .with("target_income", 4000)
        .with("available_hours", 20)
        .with("current_employment", "Labatt operator")
        .with("additional_context", "Montreal-based, bilingual")
}

pub async fn run(framework: &dyn Framework, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\n{}", heading("Example 2: Montreal Revenue Extractor (Direct)"))?;

    let agent = framework.agent(AGENT)?;

    writeln!(out, "\nRunning analysis...")?;
    let analysis = agent.run(&params()).await?.decode()?;
    if analysis.is_empty() {
        warn!("Revenue analysis came back empty, printing defaults");
    } else {
        debug!("Revenue analysis returned {} top-level keys", analysis.len());
    }

    writeln!(out, "\n{}", heading("Market Analysis:"))?;
    writeln!(out, "{}", analysis.section("market_analysis").to_pretty_json())?;
    write_niche_summary(&analysis, out)?;

    writeln!(out, "\n{}", heading("Service Packages:"))?;
    writeln!(out, "{}", analysis.section("service_packages").to_pretty_json())?;

    writeln!(out, "\n{}", heading("21-Day Acquisition Pipeline:"))?;
    write_pipeline(&analysis.section("acquisition_pipeline"), out)?;

    Ok(())
}

/// Underserved niches found in `market_analysis`.
pub fn niches(analysis: &Document) -> Vec<Document> {
    analysis
        .section("market_analysis")
        .list("underserved_niches")
        .iter()
        .map(Document::from_value)
        .collect()
}

/// Niche count plus the top niche and its rate range.
pub fn write_niche_summary(analysis: &Document, out: &mut dyn Write) -> Result<()> {
    let niches = niches(analysis);
    let top = niches.first();

    writeln!(out, "Found {} potential niches", niches.len())?;
    writeln!(
        out,
        "Top niche: {}",
        top.map_or(MISSING.to_string(), |n| n.text_or("niche", MISSING))
    )?;
    writeln!(
        out,
        "Rate range: {}",
        top.map_or(MISSING.to_string(), |n| n.text_or("rate_range", MISSING))
    )?;
    Ok(())
}

fn write_pipeline(pipeline: &Document, out: &mut dyn Write) -> Result<()> {
    for (week, tasks) in pipeline.entries() {
        writeln!(out, "\n{}:", week.to_uppercase())?;
        match tasks.as_array() {
            Some(tasks) => {
                for task in tasks {
                    writeln!(out, "  - {}", display_item(task))?;
                }
            }
            None => writeln!(out, "  - {}", display_item(tasks))?,
        }
    }
    Ok(())
}
