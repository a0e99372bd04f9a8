//! The expected-failures ledger.
//!
//! Fixtures pin down behaviour the gate does not have yet, or will never have
//! with the current heuristics. Each such check is listed in
//! `expected-failures.toml` next to the fixtures:
//!
//! ```toml
//! [[known]]
//! fixture = "sentence-initial-target.toml"
//! check = "targets[0]"
//! reason = "Capitalization heuristic absorbs sentence-initial words"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{SpecError, SpecResult};

/// File name of the ledger inside a fixtures directory.
pub const LEDGER_FILE: &str = "expected-failures.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectedFailures {
    /// Heuristic limitations with no fix planned.
    #[serde(default)]
    pub known: Vec<FailureEntry>,
    /// Checks that should start passing once a fix lands.
    #[serde(default)]
    pub pending: Vec<FailureEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FailureEntry {
    /// Fixture path relative to the fixtures directory.
    pub fixture: String,
    /// Check reference as reported by the runner, e.g. `targets[0]`.
    pub check: String,
    #[serde(default)]
    pub reason: Option<String>,
    /// Date the entry was added (YYYY-MM-DD).
    #[serde(default)]
    pub added: Option<String>,
}

/// How a failed check is classified against the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureState {
    Known,
    Pending,
    /// Not in the ledger.
    Regression,
}

impl FailureState {
    pub fn is_expected(self) -> bool {
        self != FailureState::Regression
    }
}

impl ExpectedFailures {
    /// Load the ledger. A missing file is an empty ledger.
    pub fn load(path: &Path) -> SpecResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| SpecError::from_toml(&content, e))
    }

    pub fn classify(&self, fixture: &str, check: &str) -> FailureState {
        if self.entry_in(&self.known, fixture, check).is_some() {
            FailureState::Known
        } else if self.entry_in(&self.pending, fixture, check).is_some() {
            FailureState::Pending
        } else {
            FailureState::Regression
        }
    }

    /// Ledger entries that did not fail in a run.
    ///
    /// `failed` holds `(fixture, check)` pairs for every failed check. A stale
    /// entry usually means a fix landed and the entry can go.
    pub fn stale<'a>(&'a self, failed: &[(String, String)]) -> Vec<&'a FailureEntry> {
        self.known
            .iter()
            .chain(&self.pending)
            .filter(|entry| {
                !failed
                    .iter()
                    .any(|(fixture, check)| entry.fixture == *fixture && entry.check == *check)
            })
            .collect()
    }

    fn entry_in<'a>(
        &self,
        entries: &'a [FailureEntry],
        fixture: &str,
        check: &str,
    ) -> Option<&'a FailureEntry> {
        entries
            .iter()
            .find(|entry| entry.fixture == fixture && entry.check == check)
    }
}

/// Check counts for a harness run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarnessTally {
    pub passed: usize,
    pub known: usize,
    pub pending: usize,
    pub regressions: usize,
}

impl HarnessTally {
    pub fn record(&mut self, state: Option<FailureState>) {
        match state {
            None => self.passed += 1,
            Some(FailureState::Known) => self.known += 1,
            Some(FailureState::Pending) => self.pending += 1,
            Some(FailureState::Regression) => self.regressions += 1,
        }
    }

    pub fn checks(&self) -> usize {
        self.passed + self.expected_failures() + self.regressions
    }

    pub fn expected_failures(&self) -> usize {
        self.known + self.pending
    }

    /// No check failed outside the ledger.
    pub fn is_clean(&self) -> bool {
        self.regressions == 0
    }
}
