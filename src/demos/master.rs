//! Example 1: hand a free-form request to the master orchestration cog.

use crate::agent::Framework;
use crate::models::Params;
use crate::report::heading;
use anyhow::Result;
use std::io::Write;
use tracing::info;

pub const COG: &str = "roi_automation_master";

pub const USER_REQUEST: &str = "
    I'm currently working at Labatt (15h-23h shift) and want to transition to
    full-time AI freelancing. I need to make $4000 CAD every 2 weeks to match
    my current income. I have 5 AI certifications and strong prompt engineering
    skills. I live in Montreal and can work in both French and English.
    ";

pub fn params() -> Params {
    Params::new().with("user_input", USER_REQUEST)
}

pub async fn run(framework: &dyn Framework, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", heading("Example 1: Master Orchestration Cog"))?;

    let cog = framework.cog(COG)?;
    info!("Handing the request to cog {}", cog.name());

    writeln!(out, "\nUser Request:\n{}\n", USER_REQUEST)?;
    writeln!(out, "Processing with ROI Automation Master Cog...\n")?;

    let result = cog.run(&params()).await?;

    writeln!(out, "\n{}", heading("Result:"))?;
    writeln!(out, "{}", result)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::scripted::{Reply, ScriptedFramework};

    #[test]
    fn test_prints_raw_result() {
        let framework = ScriptedFramework::new().with(COG, Reply::json(r#"{"routed_to": "x"}"#));
        let mut out = Vec::new();

        tokio_test::block_on(run(&framework, &mut out)).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Example 1: Master Orchestration Cog"));
        assert!(text.contains("Labatt (15h-23h shift)"));
        assert!(text.ends_with("{\"routed_to\": \"x\"}\n"));
        assert_eq!(
            framework.params_for(COG).unwrap().get("user_input").unwrap(),
            USER_REQUEST
        );
    }

    #[test]
    fn test_undecodable_result_is_still_printed() {
        let framework = ScriptedFramework::new().with(COG, Reply::json("plain text answer"));
        let mut out = Vec::new();

        tokio_test::block_on(run(&framework, &mut out)).unwrap();

        assert!(String::from_utf8(out).unwrap().contains("plain text answer"));
    }
}
