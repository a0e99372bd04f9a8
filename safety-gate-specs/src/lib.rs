//! Fixture-driven regression harness for safety-gate.
//!
//! Gate behaviour is pinned down in declarative TOML fixtures: an input text,
//! a distribution mode, optional entity and evidence context, and the
//! expectations the gate's outcome must satisfy.
//!
//! ## Modules
//!
//! - [`fixture`] - The fixture schema and its validation
//! - [`loader`] - Fixture discovery under a directory
//! - [`runner`] - Running fixtures through the gate and checking them
//! - [`failures`] - Expected failures tracking via TOML
//! - [`formatter`] - Plain-text failure reports
//! - [`errors`] - Error types for the harness

pub mod errors;
pub mod failures;
pub mod fixture;
pub mod formatter;
pub mod loader;
pub mod runner;

pub use errors::{SpecError, SpecResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState, HarnessTally};
pub use fixture::{Expectations, GateFixture};
pub use formatter::{format_failure, format_summary};
pub use loader::{load_all_fixtures, load_fixture};
pub use runner::{check_fixture, run_fixture, run_harness, CheckOutcome, CheckResult, HarnessReport};
