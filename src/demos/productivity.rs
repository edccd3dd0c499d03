//! Example 3: a personal protocol from the Productivity Optimizer.

use crate::agent::Framework;
use crate::models::{Document, Params, MISSING};
use crate::report::heading;
use anyhow::Result;
use std::io::Write;

pub const AGENT: &str = "productivity_optimizer";

/// How many morning-stack interventions to show.
const STACK_PREVIEW: usize = 3;

pub fn params() -> Params {
    Params::new()
        .with("work_schedule", "15:00-23:00 weekdays (Labatt shift)")
        .with("sleep_pattern", "01:00-09:00")
        .with("wake_time", "09:00")
        .with(
            "energy_peaks",
            "Morning after waking (09:30-11:30), Late afternoon (16:00-18:00)",
        )
        .with(
            "energy_troughs",
            "Post-lunch (13:00-14:30), Late evening (21:00-23:00)",
        )
        .with(
            "procrastination_triggers",
            "Complex projects without clear structure, administrative tasks, cold emailing",
        )
        .with(
            "focus_difficulties",
            "Context switching between Labatt work and freelance projects",
        )
        .with("sleep_quality", "7/10 - Sometimes disrupted by shift work")
        .with(
            "primary_goal",
            "Transition to full-time freelancing within 6 months while maintaining current income",
        )
        // target hours per day
        .with("deep_work_hours", 4)
        .with("transition_timeline", "6 months")
        .with("dietary_restrictions", "None")
        .with("medical_conditions", "None")
        // CAD per month
        .with("supplement_budget", 100)
        .with(
            "additional_context",
            "
        - Night owl chronotype due to shift work
        - Need to balance current job with building freelance business
        - Want to maximize limited free time (mornings and weekends)
        ",
        )
}

/// Shorter parameter set used by the comprehensive workflow.
pub fn brief_params() -> Params {
    Params::new()
        .with("work_schedule", "15:00-23:00")
        .with("sleep_pattern", "01:00-09:00")
        .with("wake_time", "09:00")
        .with("energy_peaks", "Morning, late afternoon")
        .with("procrastination_triggers", "Complex projects, admin tasks")
        .with("primary_goal", "Build freelance business")
        .with("deep_work_hours", 4)
}

pub async fn run(framework: &dyn Framework, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "\n{}",
        heading("Example 3: Neuroscientific Productivity Optimizer (Direct)")
    )?;

    let agent = framework.agent(AGENT)?;

    writeln!(out, "\nGenerating personalized productivity protocol...")?;
    let protocol = agent.run(&params()).await?.decode()?;

    writeln!(out, "\n{}", heading("Chronobiological Analysis:"))?;
    writeln!(
        out,
        "{}",
        protocol.section("chronobiological_analysis").to_pretty_json()
    )?;

    writeln!(out, "\n{}", heading("Neurochemical Optimization Stack:"))?;
    let stack = protocol.section("neurochemical_optimization");
    for item in stack.list("morning_stack").iter().take(STACK_PREVIEW) {
        let item = Document::from_value(item);
        writeln!(
            out,
            "\n{}",
            item.first_text_or(&["supplement", "practice"], "Intervention")
        )?;
        writeln!(out, "  Purpose: {}", item.text_or("purpose", MISSING))?;
        writeln!(out, "  Evidence: {}", item.text_or("evidence", MISSING))?;
    }

    Ok(())
}

/// Optimal work windows from the chronobiological analysis.
pub fn optimal_windows(protocol: &Document) -> Vec<Document> {
    protocol
        .section("chronobiological_analysis")
        .list("optimal_work_windows")
        .iter()
        .map(Document::from_value)
        .collect()
}
