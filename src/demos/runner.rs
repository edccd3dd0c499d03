//! Sequential example execution behind a single failure guard.

use crate::agent::Framework;
use crate::demos::Example;
use anyhow::Result;
use futures::FutureExt;
use std::any::Any;
use std::io::Write;
use std::panic::AssertUnwindSafe;
use tracing::{error, info};

/// What happened during a guarded run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunOutcome {
    /// Examples that ran to completion, in order.
    pub completed: Vec<Example>,
    /// The example that stopped the run and its error message.
    pub failure: Option<(Example, String)>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Run `examples` in order. The first error or panic stops the run and is
/// reported on `out` together with `checklist`; it never propagates.
pub async fn run_guarded(
    examples: &[Example],
    framework: &dyn Framework,
    out: &mut dyn Write,
    checklist: &str,
) -> RunOutcome {
    let mut outcome = RunOutcome::default();

    for &example in examples {
        info!("Running example {}", example);

        let result = AssertUnwindSafe(example.run(framework, &mut *out))
            .catch_unwind()
            .await;

        let message = match result {
            Ok(Ok(())) => {
                outcome.completed.push(example);
                continue;
            }
            Ok(Err(e)) => format!("{:#}", e),
            Err(panic) => panic_message(panic),
        };

        error!("Example {} failed: {}", example, message);
        // Best effort: the output itself may be what failed.
        let _ = writeln!(out, "\n❌ Error running examples: {}", message);
        let _ = write!(out, "{}", checklist);

        outcome.failure = Some((example, message));
        break;
    }

    outcome
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

/// Print what each example would send, without calling anything.
pub fn dry_run(examples: &[Example], out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\n🔍 Dry run: no agent or cog will be called.\n")?;

    for example in examples {
        writeln!(out, "{}. {} ({})", example.number(), example.title(), example.id())?;
        for invocation in example.invocations() {
            if invocation.params.is_empty() {
                writeln!(out, "   → {} {} with no parameters", invocation.target, invocation.name)?;
                continue;
            }
            writeln!(
                out,
                "   → {} {} with {} parameters:",
                invocation.target,
                invocation.name,
                invocation.params.len()
            )?;
            for line in invocation.params.to_pretty_json().lines() {
                writeln!(out, "     {}", line)?;
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "✅ Dry run complete. No backend calls were made.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::scripted::{Reply, ScriptedFramework};
    use crate::demos::{master, revenue};

    const CHECKLIST: &str = "\nMake sure you have:\n  1. something\n";

    fn guarded(examples: &[Example], framework: &ScriptedFramework) -> (RunOutcome, String) {
        let mut out = Vec::new();
        let outcome = tokio_test::block_on(run_guarded(examples, framework, &mut out, CHECKLIST));
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_success_prints_no_checklist() {
        let framework = ScriptedFramework::new().with(master::COG, Reply::json("{}"));
        let (outcome, text) = guarded(&[Example::Master], &framework);

        assert!(outcome.is_success());
        assert_eq!(outcome.completed, vec![Example::Master]);
        assert!(!text.contains("Make sure you have"));
    }

    #[test]
    fn test_collaborator_error_is_suppressed() {
        let framework =
            ScriptedFramework::new().with(master::COG, Reply::Fail("connection refused".to_string()));
        let (outcome, text) = guarded(&[Example::Master], &framework);

        let (example, message) = outcome.failure.unwrap();
        assert_eq!(example, Example::Master);
        assert!(message.contains("connection refused"));
        assert!(text.contains("\n❌ Error running examples: Failed to send request: connection refused\n"));
        assert!(text.ends_with(CHECKLIST));
    }

    #[test]
    fn test_missing_configuration_is_suppressed() {
        let framework = ScriptedFramework::new();
        let (outcome, text) = guarded(&[Example::Revenue], &framework);

        assert!(!outcome.is_success());
        assert!(text.contains("No configuration for 'montreal_revenue_extractor'"));
        assert!(text.contains("Make sure you have:"));
    }

    #[test]
    fn test_panic_is_suppressed() {
        let framework =
            ScriptedFramework::new().with(master::COG, Reply::Panic("backend exploded".to_string()));
        let (outcome, text) = guarded(&[Example::Master], &framework);

        let (_, message) = outcome.failure.unwrap();
        assert_eq!(message, "panicked: backend exploded");
        assert!(text.contains("❌ Error running examples: panicked: backend exploded"));
        assert!(text.ends_with(CHECKLIST));
    }

    #[test]
    fn test_malformed_payload_is_suppressed() {
        let framework = ScriptedFramework::new().with(revenue::AGENT, Reply::json("[]"));
        let (outcome, text) = guarded(&[Example::Revenue], &framework);

        assert!(!outcome.is_success());
        assert!(text.contains("expected an object"));
    }

    #[test]
    fn test_failure_stops_remaining_examples() {
        let framework = ScriptedFramework::new()
            .with(master::COG, Reply::Fail("down".to_string()))
            .with(revenue::AGENT, Reply::json("{}"));
        let (outcome, _) = guarded(&[Example::Master, Example::Revenue], &framework);

        assert!(outcome.completed.is_empty());
        assert_eq!(framework.called(), vec![master::COG]);
    }

    #[test]
    fn test_dry_run_prints_params_without_calls() {
        let mut out = Vec::new();
        dry_run(&[Example::Master, Example::Workflow], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("→ cog roi_automation_master with 1 parameters:"));
        assert!(text.contains("→ agent montreal_revenue_extractor with 5 parameters:"));
        assert!(text.contains("→ agent graphrag_architect with 4 parameters:"));
        assert!(text.contains("\"deep_work_hours\": 4"));
        assert!(text.contains("Dry run complete"));
    }
}
