//! Console text generation.
//!
//! Every piece of framing text the runner prints is built here as a
//! `String`, so examples only decide what goes between the headings.

use crate::demos::Example;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Width of horizontal rules.
pub const RULE_WIDTH: usize = 80;

/// A horizontal rule of `ch`.
pub fn rule(ch: char) -> String {
    std::iter::repeat(ch).take(RULE_WIDTH).collect()
}

/// A title framed by `=` rules.
pub fn heading(title: &str) -> String {
    let line = rule('=');
    format!("{}\n{}\n{}", line, title, line)
}

/// A phase title underlined with `-`.
pub fn phase_heading(title: &str) -> String {
    format!("{}\n{}", title, rule('-'))
}

/// Opening banner listing the available examples.
pub fn generate_banner(examples: &[Example]) -> String {
    let mut banner = String::new();

    banner.push_str("\n    ╔══════════════════════════════════════════════════════════════════════════╗\n");
    banner.push_str("    ║                                                                          ║\n");
    banner.push_str("    ║              ROI AUTOMATION SYSTEM - USAGE EXAMPLES                      ║\n");
    banner.push_str("    ║                                                                          ║\n");
    banner.push_str("    ║  Agent-backed planning for freelance income, productivity, and          ║\n");
    banner.push_str("    ║  knowledge management.                                                  ║\n");
    banner.push_str("    ║                                                                          ║\n");
    banner.push_str("    ╚══════════════════════════════════════════════════════════════════════════╝\n\n");

    banner.push_str(&format!(
        "    This run covers {} of {} examples:\n\n",
        examples.len(),
        Example::ALL.len()
    ));
    for example in examples {
        banner.push_str(&format!(
            "    {}. {}\n       → {}\n\n",
            example.number(),
            example.title(),
            example.summary()
        ));
    }

    banner
}

/// `--list` output: one line per example.
pub fn generate_example_list() -> String {
    let mut list = String::new();
    for example in Example::ALL {
        list.push_str(&format!(
            "{:<14} {}. {} - {}\n",
            example.id(),
            example.number(),
            example.title(),
            example.summary()
        ));
    }
    list
}

/// Remediation steps printed after a failed run.
pub fn generate_remediation_checklist(
    ollama_url: &str,
    prompts_dir: &Path,
    cogs_dir: &Path,
) -> String {
    let mut checklist = String::new();

    checklist.push_str("\nMake sure you have:\n");
    checklist.push_str(&format!(
        "  1. Started Ollama (ollama serve) and made it reachable at {}\n",
        ollama_url
    ));
    checklist.push_str("  2. Configured API keys in .env or environment (ROI_API_KEY) if your endpoint needs one\n");
    checklist.push_str(&format!(
        "  3. Copied the agent configurations to {}/\n",
        prompts_dir.display()
    ));
    checklist.push_str(&format!(
        "  4. Copied the cog configuration to {}/\n",
        cogs_dir.display()
    ));
    checklist.push_str("\nRun `roi-examples --init-profiles` to write the built-in configurations.\n");

    checklist
}

/// Closing section printed after every run, successful or not.
pub fn generate_footer(finished_at: DateTime<Utc>) -> String {
    let mut footer = String::new();

    footer.push_str(&format!("\n{}\n", heading("Examples completed!")));
    footer.push_str(&format!(
        "Finished at {}\n",
        finished_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    footer.push_str("\nNext steps:\n");
    footer.push_str("  1. Review the outputs above\n");
    footer.push_str("  2. Customize the parameters for your specific situation\n");
    footer.push_str("  3. Tune the agent profiles to your workflow\n");
    footer.push_str("  4. Track your ROI over time\n");
    footer.push_str(&format!("{}\n", rule('=')));

    footer
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_heading() {
        let h = heading("Result:");
        let lines: Vec<_> = h.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), RULE_WIDTH);
        assert_eq!(lines[1], "Result:");
    }

    #[test]
    fn test_banner_lists_selected_examples() {
        let banner = generate_banner(&[Example::Revenue, Example::Workflow]);
        assert!(banner.contains("ROI AUTOMATION SYSTEM"));
        assert!(banner.contains("This run covers 2 of 5 examples"));
        assert!(banner.contains("2. Montreal Revenue Extractor"));
        assert!(banner.contains("5. Comprehensive Workflow"));
        assert!(!banner.contains("GraphRAG Architect"));
    }

    #[test]
    fn test_example_list_has_every_id() {
        let list = generate_example_list();
        for example in Example::ALL {
            assert!(list.contains(example.id()));
        }
    }

    #[test]
    fn test_remediation_checklist() {
        let checklist = generate_remediation_checklist(
            "http://localhost:11434",
            Path::new(".roi/prompts"),
            Path::new(".roi/cogs"),
        );
        assert!(checklist.contains("Make sure you have:"));
        assert!(checklist.contains("http://localhost:11434"));
        assert!(checklist.contains(".roi/prompts/"));
        assert!(checklist.contains(".roi/cogs/"));
    }

    #[test]
    fn test_footer() {
        let at = Utc.with_ymd_and_hms(2025, 11, 7, 12, 30, 0).unwrap();
        let footer = generate_footer(at);
        assert!(footer.contains("Examples completed!"));
        assert!(footer.contains("Finished at 2025-11-07 12:30:00 UTC"));
        assert!(footer.contains("Next steps:"));
    }
}
