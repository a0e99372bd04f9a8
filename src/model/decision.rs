//! Risk decisions and the mitigations they require.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CourtContext, DistributionMode, RiskCategory, RiskLevel, RiskSignal};

/// Disclaimer blocks a decision can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisclaimerKey {
    NoJudicialDetermination,
    DataLimitations,
    Methodology,
    /// List-of-dates appendix.
    LodAppendix,
    KeyIssuesAppendix,
}

impl DisclaimerKey {
    pub const ALL: [DisclaimerKey; 5] = [
        DisclaimerKey::NoJudicialDetermination,
        DisclaimerKey::DataLimitations,
        DisclaimerKey::Methodology,
        DisclaimerKey::LodAppendix,
        DisclaimerKey::KeyIssuesAppendix,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisclaimerKey::NoJudicialDetermination => "no_judicial_determination",
            DisclaimerKey::DataLimitations => "data_limitations",
            DisclaimerKey::Methodology => "methodology",
            DisclaimerKey::LodAppendix => "lod_appendix",
            DisclaimerKey::KeyIssuesAppendix => "key_issues_appendix",
        }
    }
}

/// Field classes a redaction mitigation can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionTarget {
    IdentityNumber,
    PhoneNumber,
    Address,
    CardNumber,
    /// Names not already on the public record.
    UnlistedNames,
}

impl RedactionTarget {
    /// The four personal-data field classes.
    pub const PERSONAL_DATA: [RedactionTarget; 4] = [
        RedactionTarget::IdentityNumber,
        RedactionTarget::PhoneNumber,
        RedactionTarget::Address,
        RedactionTarget::CardNumber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RedactionTarget::IdentityNumber => "identity_number",
            RedactionTarget::PhoneNumber => "phone_number",
            RedactionTarget::Address => "address",
            RedactionTarget::CardNumber => "card_number",
            RedactionTarget::UnlistedNames => "unlisted_names",
        }
    }
}

/// Who must sign off a gated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewRole {
    AdminCompliance,
}

/// The six mitigation keys, without their payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MitigationKind {
    AddDisclaimer,
    ForceAllegationLanguage,
    RequireEvidence,
    RemoveOrRedact,
    RestrictDistribution,
    RequireHumanReview,
}

impl MitigationKind {
    pub const ALL: [MitigationKind; 6] = [
        MitigationKind::AddDisclaimer,
        MitigationKind::ForceAllegationLanguage,
        MitigationKind::RequireEvidence,
        MitigationKind::RemoveOrRedact,
        MitigationKind::RestrictDistribution,
        MitigationKind::RequireHumanReview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MitigationKind::AddDisclaimer => "add_disclaimer",
            MitigationKind::ForceAllegationLanguage => "force_allegation_language",
            MitigationKind::RequireEvidence => "require_evidence",
            MitigationKind::RemoveOrRedact => "remove_or_redact",
            MitigationKind::RestrictDistribution => "restrict_distribution",
            MitigationKind::RequireHumanReview => "require_human_review",
        }
    }
}

impl fmt::Display for MitigationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A required corrective action attached to a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReputationMitigation {
    AddDisclaimer { disclaimer: DisclaimerKey },
    ForceAllegationLanguage,
    RequireEvidence { targets: Vec<String> },
    RemoveOrRedact { targets: Vec<RedactionTarget> },
    RestrictDistribution { allowed_modes: Vec<DistributionMode> },
    RequireHumanReview { role: ReviewRole },
}

impl ReputationMitigation {
    pub fn kind(&self) -> MitigationKind {
        match self {
            ReputationMitigation::AddDisclaimer { .. } => MitigationKind::AddDisclaimer,
            ReputationMitigation::ForceAllegationLanguage => {
                MitigationKind::ForceAllegationLanguage
            }
            ReputationMitigation::RequireEvidence { .. } => MitigationKind::RequireEvidence,
            ReputationMitigation::RemoveOrRedact { .. } => MitigationKind::RemoveOrRedact,
            ReputationMitigation::RestrictDistribution { .. } => {
                MitigationKind::RestrictDistribution
            }
            ReputationMitigation::RequireHumanReview { .. } => MitigationKind::RequireHumanReview,
        }
    }
}

/// The scorer's verdict for one detection result under one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationRiskDecision {
    pub overall: RiskLevel,
    pub categories: BTreeSet<RiskCategory>,
    pub signals: Vec<RiskSignal>,
    pub mitigations: Vec<ReputationMitigation>,
    pub mode: DistributionMode,
    /// Court pair the decision was planned against (court mode only).
    pub court: Option<CourtContext>,
}

impl ReputationRiskDecision {
    pub fn has_mitigation(&self, kind: MitigationKind) -> bool {
        self.mitigations.iter().any(|m| m.kind() == kind)
    }

    pub fn requires_human_review(&self) -> bool {
        self.has_mitigation(MitigationKind::RequireHumanReview)
    }

    /// Disclaimer keys in the order they were required.
    pub fn disclaimer_keys(&self) -> Vec<DisclaimerKey> {
        self.mitigations
            .iter()
            .filter_map(|m| match m {
                ReputationMitigation::AddDisclaimer { disclaimer } => Some(*disclaimer),
                _ => None,
            })
            .collect()
    }

    /// Whether the gated text may go out through `mode`.
    pub fn allows_distribution(&self, mode: DistributionMode) -> bool {
        self.mitigations.iter().all(|m| match m {
            ReputationMitigation::RestrictDistribution { allowed_modes } => {
                allowed_modes.contains(&mode)
            }
            _ => true,
        })
    }

    /// Every field class some mitigation asks to be redacted.
    pub fn redaction_targets(&self) -> BTreeSet<RedactionTarget> {
        self.mitigations
            .iter()
            .filter_map(|m| match m {
                ReputationMitigation::RemoveOrRedact { targets } => Some(targets.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}
