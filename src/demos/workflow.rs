//! Example 5: all three agents in sequence, followed by a combined summary.

use crate::agent::Framework;
use crate::demos::{graphrag, productivity, revenue, Invocation};
use crate::models::{format_amount, Document, MISSING};
use crate::report::{heading, phase_heading};
use anyhow::Result;
use std::io::Write;
use tracing::info;

/// Monthly spend on automation tools on top of the knowledge system.
const AUTOMATION_TOOLS_MONTHLY: f64 = 20.0;

pub fn invocations() -> Vec<Invocation> {
    vec![
        Invocation::agent(revenue::AGENT, revenue::brief_params()),
        Invocation::agent(productivity::AGENT, productivity::brief_params()),
        Invocation::agent(graphrag::AGENT, graphrag::brief_params()),
    ]
}

pub async fn run(framework: &dyn Framework, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "\n{}",
        heading("Example 5: Comprehensive Workflow (All Three Agents)")
    )?;

    writeln!(out, "\n{}", phase_heading("📊 Phase 1: Market Analysis (Revenue Extractor)"))?;
    let revenue_agent = framework.agent(revenue::AGENT)?;
    let revenue_analysis = revenue_agent.run(&revenue::brief_params()).await?.decode()?;
    revenue::write_niche_summary(&revenue_analysis, out)?;

    writeln!(out, "\n{}", phase_heading("⚡ Phase 2: Productivity Optimization"))?;
    let productivity_agent = framework.agent(productivity::AGENT)?;
    let protocol = productivity_agent
        .run(&productivity::brief_params())
        .await?
        .decode()?;
    let windows = productivity::optimal_windows(&protocol);

    writeln!(out, "Identified {} optimal work windows", windows.len())?;
    if let Some(best) = windows.first() {
        writeln!(out, "Best deep work time: {}", best.text_or("time", MISSING))?;
        writeln!(out, "Ideal for: {}", best.strings("ideal_tasks").join(", "))?;
    }

    writeln!(out, "\n{}", phase_heading("🧠 Phase 3: Knowledge System Design"))?;
    let knowledge_agent = framework.agent(graphrag::AGENT)?;
    let knowledge = knowledge_agent
        .run(&graphrag::brief_params())
        .await?
        .decode()?;

    let monthly_cost = graphrag::total_monthly_cost(&knowledge);
    let time_saved = knowledge
        .section("roi_projection")
        .text_or("time_saved_monthly", "0");

    writeln!(out, "Architecture designed for ${}/month", monthly_cost)?;
    writeln!(out, "Estimated time savings: {} hours/month", time_saved)?;

    info!("Comprehensive workflow collected results from all three agents");

    let summary = CombinedSummary {
        revenue: &revenue_analysis,
        protocol: &protocol,
        knowledge: &knowledge,
        niche_count: revenue::niches(&revenue_analysis).len(),
        window_count: windows.len(),
        monthly_cost,
        monthly_cost_amount: graphrag::monthly_cost_amount(&knowledge),
        time_saved,
    };
    writeln!(out, "\n{}", heading("📈 COMBINED ROI ANALYSIS"))?;
    write!(out, "{}", summary.render())?;

    Ok(())
}

struct CombinedSummary<'a> {
    revenue: &'a Document,
    protocol: &'a Document,
    knowledge: &'a Document,
    niche_count: usize,
    window_count: usize,
    monthly_cost: String,
    monthly_cost_amount: Option<f64>,
    time_saved: String,
}

impl CombinedSummary<'_> {
    fn render(&self) -> String {
        let projections = self.revenue.section("revenue_projections");
        let deep_work = self.protocol.section("deep_work_architecture");
        let protocol_roi = self.protocol.section("roi_projection");
        let knowledge_roi = self.knowledge.section("roi_projection");
        let investment = self
            .monthly_cost_amount
            .map(|cost| format_amount(cost + AUTOMATION_TOOLS_MONTHLY))
            .unwrap_or_else(|| MISSING.to_string());

        let mut text = String::new();

        text.push_str("\n    Revenue Potential:\n");
        text.push_str(&format!(
            "      - Target niches identified: {}\n",
            self.niche_count
        ));
        text.push_str(&format!(
            "      - Expected monthly income: ${}\n",
            projections.text_or("monthly_income", MISSING)
        ));
        text.push_str(&format!(
            "      - Time to first client: {} days\n",
            projections.text_or("time_to_first_client", MISSING)
        ));

        text.push_str("\n    Productivity Gains:\n");
        text.push_str(&format!(
            "      - Optimal work windows: {} per day\n",
            self.window_count
        ));
        text.push_str(&format!(
            "      - Deep work capacity: {} hours\n",
            deep_work.text_or("daily_capacity", MISSING)
        ));
        text.push_str(&format!(
            "      - Weekly time saved: ~{} hours\n",
            protocol_roi.text_or("weekly_time_saved", MISSING)
        ));

        text.push_str("\n    Knowledge System:\n");
        text.push_str("      - Query latency: <2 seconds\n");
        text.push_str(&format!(
            "      - Monthly time saved: {} hours\n",
            self.time_saved
        ));
        text.push_str(&format!(
            "      - System cost: ${}/month\n",
            self.monthly_cost
        ));
        text.push_str(&format!(
            "      - Annual ROI: {}%\n",
            knowledge_roi.text_or("annual_roi_percentage", MISSING)
        ));

        text.push_str("\n    Total System Value:\n");
        text.push_str("      - Income increase potential: $4,000+/2 weeks\n");
        text.push_str("      - Time saved monthly: ~40 hours\n");
        text.push_str(&format!(
            "      - System investment: ~${}/month (knowledge + automation tools)\n",
            investment
        ));
        text.push_str("      - Net monthly value: $6,000+ (time + income)\n");
        text.push_str("      - Annual ROI: >10,000%\n");

        text
    }
}
