//! Data model shared by every stage of the gate.

mod claim;
mod context;
mod decision;
mod detection;
mod mode;
mod signal;

pub use claim::{ClaimUnit, RewritePlan, RewriteTransformation};
pub use context::{EvidenceArtifact, GateContext, NamedEntity};
pub use decision::{
    DisclaimerKey, MitigationKind, RedactionTarget, ReputationMitigation,
    ReputationRiskDecision, ReviewRole,
};
pub use detection::DefamationDetectionResult;
pub use mode::{CourtContext, CourtStyle, DistributionMode, FilingType};
pub use signal::{RiskCategory, RiskLevel, RiskSignal};
