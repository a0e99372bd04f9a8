//! Risk detection, scoring and rewriting for safety-gate.
//!
//! - [`RiskDetector`] - scans text against the declarative tables in
//!   [`patterns`] and emits signals, claim units and a rewrite plan
//! - [`RiskScorer`] - maps a detection result and a distribution mode to an
//!   overall level and the mitigations that must accompany the text
//! - [`Rewriter`] - applies the plan, redacts personal data, frames
//!   allegations and opens court filings
//! - [`SafetyGate`] - all three in one call, with a JSON audit log
//!
//! ## Example
//!
//! ```
//! use safety_gate::{DistributionMode, RiskLevel};
//! use safety_gate_risk::{GateOptions, SafetyGate};
//!
//! let gate = SafetyGate::new();
//! let outcome = gate.run(
//!     "Contact him at 0300-1234567.",
//!     None,
//!     &GateOptions::new(DistributionMode::ResearchOnly),
//! );
//! assert_eq!(outcome.decision.overall, RiskLevel::Critical);
//! assert_eq!(outcome.rewritten, "Contact him at [REDACTED-PHONE].");
//! ```

mod detector;
pub mod patterns;
mod pipeline;
mod redaction;
mod rewriter;
mod scorer;
mod targets;

pub use detector::{backfill_evidence, RiskDetector};
pub use pipeline::{GateOptions, GateOutcome, SafetyGate};
pub use redaction::{redact_personal_data, PersonalData, Redacted};
pub use rewriter::{apply_plan, RewriteOptions, RewriteOutput, Rewriter};
pub use scorer::{overall_level, RiskScorer};
pub use targets::{CapitalizedPhraseExtractor, TargetExtractor};
