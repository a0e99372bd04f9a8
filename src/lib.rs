//! Core data model for the Safety Gate.
//!
//! The Safety Gate is a deterministic pipeline that scans investigative
//! narratives for defamation, sub-judice and privacy risk, scores that risk
//! against a distribution mode, and rewrites the text into a court-safe form
//! with an auditable log of every change.
//!
//! This crate holds the types every stage shares:
//!
//! - [`RiskSignal`], [`ClaimUnit`], [`RewriteTransformation`] and the
//!   [`DefamationDetectionResult`] aggregate produced by detection
//! - [`ReputationRiskDecision`] and its [`ReputationMitigation`] directives
//! - [`DistributionMode`], [`CourtStyle`] and [`FilingType`], the axes that
//!   drive scoring, rewriting and phrase resolution
//! - [`Span`] offset arithmetic and the [`text`] helpers built on it
//! - [`GateConfig`], loaded from TOML
//!
//! The stages themselves live in the plugin crates: `safety-gate-phrases`
//! (phrase library and front matter) and `safety-gate-risk` (detector, scorer,
//! rewriter and the `SafetyGate` pipeline).

mod config;
mod errors;
mod model;
mod span;
pub mod text;

pub use config::GateConfig;
pub use errors::{ConfigError, ConfigResult};
pub use model::{
    ClaimUnit, CourtContext, CourtStyle, DefamationDetectionResult, DisclaimerKey,
    DistributionMode, EvidenceArtifact, FilingType, GateContext, MitigationKind, NamedEntity,
    RedactionTarget, ReputationMitigation, ReputationRiskDecision, ReviewRole, RewritePlan,
    RewriteTransformation, RiskCategory, RiskLevel, RiskSignal,
};
pub use span::Span;
