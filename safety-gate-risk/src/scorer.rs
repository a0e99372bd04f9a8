//! Mapping detected risk to an overall level and required mitigations.

use std::collections::{BTreeSet, HashSet};

use safety_gate::{
    CourtContext, DefamationDetectionResult, DisclaimerKey, DistributionMode, GateConfig,
    RedactionTarget, ReputationMitigation, ReputationRiskDecision, ReviewRole, RiskCategory,
    RiskLevel,
};

/// Disclaimers every legal-distribution decision carries.
const LEGAL_DISCLAIMERS: [DisclaimerKey; 3] = [
    DisclaimerKey::NoJudicialDetermination,
    DisclaimerKey::DataLimitations,
    DisclaimerKey::Methodology,
];

/// Appendices a court filing adds on top of [`LEGAL_DISCLAIMERS`].
const COURT_APPENDICES: [DisclaimerKey; 2] =
    [DisclaimerKey::LodAppendix, DisclaimerKey::KeyIssuesAppendix];

#[derive(Debug, Clone)]
pub struct RiskScorer {
    fallback: CourtContext,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskScorer {
    pub fn new() -> Self {
        Self {
            fallback: CourtContext::FALLBACK,
        }
    }

    pub fn with_config(config: &GateConfig) -> Self {
        Self {
            fallback: config.fallback_court(),
        }
    }

    /// Score `detection` for distribution through `mode`.
    pub fn assess(
        &self,
        detection: &DefamationDetectionResult,
        mode: DistributionMode,
        court: Option<CourtContext>,
    ) -> ReputationRiskDecision {
        let overall = overall_level(detection);
        let court = match mode {
            DistributionMode::CourtMode => Some(court.unwrap_or_else(|| {
                tracing::debug!(
                    style = %self.fallback.style,
                    filing = %self.fallback.filing,
                    "court mode decision without a court pair, using fallback"
                );
                self.fallback
            })),
            _ => court,
        };

        ReputationRiskDecision {
            overall,
            categories: detection.signals.iter().map(|s| s.category).collect::<BTreeSet<_>>(),
            signals: detection.signals.clone(),
            mitigations: mitigations(detection, mode, overall),
            mode,
            court,
        }
    }
}

/// Overall level by the decision table; the first matching row wins.
pub fn overall_level(detection: &DefamationDetectionResult) -> RiskLevel {
    if detection.has_category(RiskCategory::SensitivePersonalData)
        || detection.has_level(RiskCategory::SubJudice, RiskLevel::Critical)
        || detection.has_level(RiskCategory::UnverifiedCriminalAllegation, RiskLevel::Critical)
    {
        return RiskLevel::Critical;
    }

    if detection.count_at_least(RiskCategory::InstitutionalAccusation, RiskLevel::High) >= 2
        || detection.unevidenced_severe_claims().count() >= 2
    {
        return RiskLevel::High;
    }

    if detection.signals.iter().any(|s| s.level >= RiskLevel::Medium) {
        return RiskLevel::Medium;
    }

    RiskLevel::Low
}

fn mitigations(
    detection: &DefamationDetectionResult,
    mode: DistributionMode,
    overall: RiskLevel,
) -> Vec<ReputationMitigation> {
    let mut out = Vec::new();

    if mode.requires_allegation_framing() {
        out.extend(disclaimers(&LEGAL_DISCLAIMERS));
        out.push(ReputationMitigation::ForceAllegationLanguage);

        let targets = unevidenced_targets(detection);
        if !targets.is_empty() {
            out.push(ReputationMitigation::RequireEvidence { targets });
        }

        if mode == DistributionMode::CourtMode {
            out.extend(disclaimers(&COURT_APPENDICES));
        }
    }

    if detection.has_category(RiskCategory::SensitivePersonalData) {
        out.push(ReputationMitigation::RemoveOrRedact {
            targets: RedactionTarget::PERSONAL_DATA.to_vec(),
        });
    }

    if mode == DistributionMode::Public {
        if overall.is_severe() {
            out.push(ReputationMitigation::RestrictDistribution {
                allowed_modes: vec![DistributionMode::ControlledLegal, DistributionMode::ResearchOnly],
            });
        }
        out.push(ReputationMitigation::RemoveOrRedact {
            targets: vec![RedactionTarget::UnlistedNames],
        });
    }

    if overall == RiskLevel::Critical {
        out.push(ReputationMitigation::RequireHumanReview {
            role: ReviewRole::AdminCompliance,
        });
    }

    out
}

fn disclaimers(keys: &[DisclaimerKey]) -> impl Iterator<Item = ReputationMitigation> + '_ {
    keys.iter()
        .map(|key| ReputationMitigation::AddDisclaimer { disclaimer: *key })
}

/// Targets of severe claims lacking evidence, first-seen order.
fn unevidenced_targets(detection: &DefamationDetectionResult) -> Vec<String> {
    let mut seen = HashSet::new();
    detection
        .unevidenced_severe_claims()
        .map(|claim| claim.target.clone())
        .filter(|target| seen.insert(target.clone()))
        .collect()
}
