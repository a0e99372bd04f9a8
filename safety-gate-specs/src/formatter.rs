//! Plain-text reporting for fixture checks.

use std::fmt::Write;

use crate::runner::{CheckOutcome, CheckResult};
use crate::{FailureState, GateFixture, HarnessTally};

/// Format a failed check with the fixture's input for context.
pub fn format_failure(
    fixture_name: &str,
    fixture: &GateFixture,
    check: &CheckResult,
    state: FailureState,
) -> String {
    let mut output = String::new();
    let label = match state {
        FailureState::Known => "KNOWN",
        FailureState::Pending => "PENDING",
        FailureState::Regression => "FAIL",
    };

    let _ = writeln!(output, "\n{}: {} {}", label, fixture_name, check.reference);
    let _ = writeln!(output, "  {}", fixture.title);
    let _ = writeln!(output, "  mode: {}", fixture.mode);
    let _ = writeln!(output, "  text: {}", fixture.text.trim());

    match &check.outcome {
        CheckOutcome::Failed { expected, actual } => {
            let _ = writeln!(output, "    expected: {}", expected);
            let _ = writeln!(output, "    actual:   {}", actual);
        }
        CheckOutcome::Passed => {
            let _ = writeln!(output, "  (passed)");
        }
    }

    output
}

/// Format a summary line for one fixture.
pub fn format_summary(fixture_name: &str, tally: &HarnessTally) -> String {
    let status = if tally.is_clean() { "PASS" } else { "FAIL" };
    format!(
        "{}: {}\n  {} passed, {} failed ({} expected, {} regressions)",
        status,
        fixture_name,
        tally.passed,
        tally.expected_failures() + tally.regressions,
        tally.expected_failures(),
        tally.regressions
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_failure() {
        let fixture = GateFixture::parse(
            "title = \"Targets\"\ntext = \"Yesterday Ali Khan stole the funds.\"\nmode = \"research_only\"\n[expect]\ntargets = [\"Ali Khan\"]\n",
        )
        .unwrap();
        let check = CheckResult {
            reference: "targets[0]".into(),
            outcome: CheckOutcome::Failed {
                expected: "Ali Khan".into(),
                actual: "Yesterday Ali Khan".into(),
            },
        };

        let output = format_failure("targets.toml", &fixture, &check, FailureState::Known);
        insta::assert_snapshot!(output.trim(), @r###"
        KNOWN: targets.toml targets[0]
          Targets
          mode: research_only
          text: Yesterday Ali Khan stole the funds.
            expected: Ali Khan
            actual:   Yesterday Ali Khan
        "###);
    }

    #[test]
    fn test_format_summary() {
        let tally = HarnessTally {
            passed: 3,
            known: 1,
            ..HarnessTally::default()
        };
        assert_eq!(
            format_summary("a.toml", &tally),
            "PASS: a.toml\n  3 passed, 1 failed (1 expected, 0 regressions)"
        );
        let failing = HarnessTally {
            regressions: 2,
            ..HarnessTally::default()
        };
        assert!(format_summary("b.toml", &failing).starts_with("FAIL: b.toml"));
    }
}
