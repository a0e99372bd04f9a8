//! Runs fixtures through the gate and checks their expectations.

use std::collections::BTreeSet;
use std::path::Path;

use safety_gate_risk::{GateOutcome, SafetyGate};

use crate::failures::LEDGER_FILE;
use crate::formatter::{format_failure, format_summary};
use crate::{load_all_fixtures, ExpectedFailures, FailureEntry, GateFixture, HarnessTally, SpecResult};

/// Outcome of one expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    Failed { expected: String, actual: String },
}

/// One expectation, identified by its reference (e.g. `targets[0]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub reference: String,
    pub outcome: CheckOutcome,
}

impl CheckResult {
    fn new(reference: String, passed: bool, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        let outcome = if passed {
            CheckOutcome::Passed
        } else {
            CheckOutcome::Failed {
                expected: expected.into(),
                actual: actual.into(),
            }
        };
        Self { reference, outcome }
    }

    pub fn passed(&self) -> bool {
        self.outcome == CheckOutcome::Passed
    }
}

fn indexed(field: &str, index: usize) -> String {
    format!("{field}[{index}]")
}

/// Run the gate over a fixture.
pub fn run_fixture(fixture: &GateFixture, gate: &SafetyGate<'_>) -> GateOutcome {
    let context = fixture.context();
    gate.run(&fixture.text, context.as_ref(), &fixture.options())
}

/// Check every expectation of `fixture` against `outcome`.
pub fn check_fixture(fixture: &GateFixture, outcome: &GateOutcome) -> Vec<CheckResult> {
    let expect = &fixture.expect;
    let decision = &outcome.decision;
    let mut results = Vec::with_capacity(expect.check_count());

    if let Some(overall) = expect.overall {
        results.push(CheckResult::new(
            "overall".into(),
            decision.overall == overall,
            overall.as_str(),
            decision.overall.as_str(),
        ));
    }

    let fired: Vec<_> = decision.categories.iter().map(|c| c.as_str()).collect();
    for (i, category) in expect.categories.iter().enumerate() {
        results.push(CheckResult::new(
            indexed("categories", i),
            decision.categories.contains(category),
            format!("`{category}` fired"),
            fired.join(", "),
        ));
    }
    for (i, category) in expect.absent_categories.iter().enumerate() {
        results.push(CheckResult::new(
            indexed("absent_categories", i),
            !decision.categories.contains(category),
            format!("`{category}` absent"),
            fired.join(", "),
        ));
    }

    let targets: BTreeSet<&str> = outcome
        .detection
        .signals
        .iter()
        .flat_map(|s| s.targets.iter().map(String::as_str))
        .collect();
    for (i, target) in expect.targets.iter().enumerate() {
        results.push(CheckResult::new(
            indexed("targets", i),
            targets.contains(target.as_str()),
            target.as_str(),
            targets.iter().copied().collect::<Vec<_>>().join(", "),
        ));
    }

    for (i, needle) in expect.output_contains.iter().enumerate() {
        results.push(CheckResult::new(
            indexed("output_contains", i),
            outcome.rewritten.contains(needle.as_str()),
            format!("output containing \"{needle}\""),
            outcome.rewritten.as_str(),
        ));
    }
    for (i, needle) in expect.output_excludes.iter().enumerate() {
        results.push(CheckResult::new(
            indexed("output_excludes", i),
            !outcome.rewritten.contains(needle.as_str()),
            format!("output without \"{needle}\""),
            outcome.rewritten.as_str(),
        ));
    }

    let rules: Vec<_> = outcome.transformations.iter().map(|t| t.rule_id.as_str()).collect();
    for (i, rule) in expect.rules.iter().enumerate() {
        results.push(CheckResult::new(
            indexed("rules", i),
            rules.contains(&rule.as_str()),
            rule.as_str(),
            rules.join(", "),
        ));
    }

    if let Some(mitigations) = &expect.mitigations {
        let actual: Vec<_> = decision.mitigations.iter().map(|m| m.kind()).collect();
        let names = |kinds: &[safety_gate::MitigationKind]| {
            kinds.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", ")
        };
        results.push(CheckResult::new(
            "mitigations".into(),
            &actual == mitigations,
            names(mitigations.as_slice()),
            names(actual.as_slice()),
        ));
    }

    results
}

/// Aggregate result of a harness run, with a printable report.
#[derive(Debug, Clone, Default)]
pub struct HarnessReport {
    pub tally: HarnessTally,
    /// Ledger entries whose check passed.
    pub stale: Vec<FailureEntry>,
    /// Failure details and per-fixture summaries, in fixture order.
    pub report: Vec<String>,
}

/// Run every fixture under `dir`, classifying failures against the
/// `expected-failures.toml` ledger in the same directory.
pub fn run_harness(dir: &Path, gate: &SafetyGate<'_>) -> SpecResult<HarnessReport> {
    let ledger = ExpectedFailures::load(&dir.join(LEDGER_FILE))?;
    let mut harness = HarnessReport::default();
    let mut failed = Vec::new();

    for (name, fixture) in load_all_fixtures(dir)? {
        let outcome = run_fixture(&fixture, gate);
        let mut tally = HarnessTally::default();

        for check in check_fixture(&fixture, &outcome) {
            if check.passed() {
                tally.record(None);
                continue;
            }
            let state = ledger.classify(&name, &check.reference);
            tally.record(Some(state));
            harness.report.push(format_failure(&name, &fixture, &check, state));
            failed.push((name.clone(), check.reference));
        }

        harness.report.push(format_summary(&name, &tally));
        harness.tally.passed += tally.passed;
        harness.tally.known += tally.known;
        harness.tally.pending += tally.pending;
        harness.tally.regressions += tally.regressions;
    }

    harness.stale = ledger.stale(&failed).into_iter().cloned().collect();
    for entry in &harness.stale {
        harness
            .report
            .push(format!("STALE: {} {} no longer fails", entry.fixture, entry.check));
    }

    Ok(harness)
}
