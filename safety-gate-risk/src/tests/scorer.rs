use safety_gate::{
    ClaimUnit, CourtContext, CourtStyle, DefamationDetectionResult, DisclaimerKey,
    DistributionMode, FilingType, MitigationKind, RedactionTarget, ReputationMitigation,
    ReviewRole, RiskCategory, RiskLevel, RiskSignal, Span,
};
use tracing_test::traced_test;

use crate::{overall_level, RiskScorer};

fn signal(category: RiskCategory, level: RiskLevel) -> RiskSignal {
    RiskSignal {
        id: "SIG-0001".into(),
        category,
        level,
        span: Span::new(0, 4),
        matched_text: "text".into(),
        rationale: String::new(),
        pattern_id: "TEST".into(),
        targets: vec![],
        confidence: 0.5,
    }
}

fn claim(target: &str, severity: RiskLevel, has_evidence: bool) -> ClaimUnit {
    ClaimUnit {
        target: target.into(),
        predicate: "stole".into(),
        severity,
        has_evidence,
        evidence_refs: vec![],
        suggested_rewrite: String::new(),
        signal_id: "SIG-0001".into(),
    }
}

fn detection(signals: Vec<RiskSignal>, claim_units: Vec<ClaimUnit>) -> DefamationDetectionResult {
    DefamationDetectionResult {
        signals,
        claim_units,
        ..Default::default()
    }
}

#[test]
fn decision_table() {
    use RiskCategory::*;
    use RiskLevel::*;

    let cases = vec![
        (detection(vec![], vec![]), Low),
        (detection(vec![signal(Defamation, Low)], vec![]), Low),
        (detection(vec![signal(SensitivePersonalData, Critical)], vec![]), Critical),
        (detection(vec![signal(SubJudice, Critical)], vec![]), Critical),
        (detection(vec![signal(SubJudice, High)], vec![]), Medium),
        (detection(vec![signal(UnverifiedCriminalAllegation, Critical)], vec![]), Critical),
        (detection(vec![signal(UnverifiedCriminalAllegation, High)], vec![]), Medium),
        (detection(vec![signal(InstitutionalAccusation, High)], vec![]), Medium),
        (
            detection(
                vec![signal(InstitutionalAccusation, High), signal(InstitutionalAccusation, High)],
                vec![],
            ),
            High,
        ),
        (
            detection(
                vec![signal(InstitutionalAccusation, High), signal(InstitutionalAccusation, Medium)],
                vec![],
            ),
            Medium,
        ),
        (
            detection(
                vec![signal(UnverifiedCriminalAllegation, High)],
                vec![claim("A", High, false), claim("B", High, false)],
            ),
            High,
        ),
        (
            detection(
                vec![signal(UnverifiedCriminalAllegation, High)],
                vec![claim("A", High, false), claim("B", High, true)],
            ),
            Medium,
        ),
        (detection(vec![signal(IncitementOrHarassment, Medium)], vec![]), Medium),
    ];

    for (i, (detection, expected)) in cases.iter().enumerate() {
        assert_eq!(overall_level(detection), *expected, "case {i}");
    }
}

#[test]
fn controlled_legal_mitigations_in_order() {
    let detection = detection(
        vec![signal(RiskCategory::UnverifiedCriminalAllegation, RiskLevel::High)],
        vec![
            claim("Ali Khan", RiskLevel::High, false),
            claim("Sara Malik", RiskLevel::Critical, false),
            claim("Ali Khan", RiskLevel::High, false),
            claim("Omar Farooq", RiskLevel::High, true),
            claim("Bilal Ahmed", RiskLevel::Medium, false),
        ],
    );
    let decision = RiskScorer::new().assess(&detection, DistributionMode::ControlledLegal, None);

    assert_eq!(decision.overall, RiskLevel::High);
    assert_eq!(
        decision.mitigations,
        vec![
            ReputationMitigation::AddDisclaimer {
                disclaimer: DisclaimerKey::NoJudicialDetermination
            },
            ReputationMitigation::AddDisclaimer {
                disclaimer: DisclaimerKey::DataLimitations
            },
            ReputationMitigation::AddDisclaimer {
                disclaimer: DisclaimerKey::Methodology
            },
            ReputationMitigation::ForceAllegationLanguage,
            ReputationMitigation::RequireEvidence {
                targets: vec!["Ali Khan".into(), "Sara Malik".into()]
            },
        ]
    );
    assert_eq!(decision.court, None);
}

#[test]
fn court_mode_adds_appendices_and_review() {
    let detection = detection(
        vec![signal(RiskCategory::UnverifiedCriminalAllegation, RiskLevel::Critical)],
        vec![],
    );
    let court = CourtContext::new(CourtStyle::HighCourt, FilingType::Petition);
    let decision = RiskScorer::new().assess(&detection, DistributionMode::CourtMode, Some(court));

    assert_eq!(decision.court, Some(court));
    assert_eq!(
        decision.disclaimer_keys(),
        vec![
            DisclaimerKey::NoJudicialDetermination,
            DisclaimerKey::DataLimitations,
            DisclaimerKey::Methodology,
            DisclaimerKey::LodAppendix,
            DisclaimerKey::KeyIssuesAppendix,
        ]
    );
    assert!(!decision.has_mitigation(MitigationKind::RequireEvidence));
    assert_eq!(
        decision.mitigations.last(),
        Some(&ReputationMitigation::RequireHumanReview {
            role: ReviewRole::AdminCompliance
        })
    );
}

#[test]
#[traced_test]
fn court_mode_without_pair_uses_fallback() {
    let decision = RiskScorer::new().assess(&DefamationDetectionResult::empty(), DistributionMode::CourtMode, None);
    assert_eq!(decision.court, Some(CourtContext::FALLBACK));
    assert!(logs_contain("using fallback"));
}

#[test]
fn public_high_risk_is_restricted() {
    let detection = detection(
        vec![
            signal(RiskCategory::InstitutionalAccusation, RiskLevel::High),
            signal(RiskCategory::InstitutionalAccusation, RiskLevel::High),
        ],
        vec![],
    );
    let decision = RiskScorer::new().assess(&detection, DistributionMode::Public, None);

    assert_eq!(
        decision.mitigations,
        vec![
            ReputationMitigation::RestrictDistribution {
                allowed_modes: vec![DistributionMode::ControlledLegal, DistributionMode::ResearchOnly]
            },
            ReputationMitigation::RemoveOrRedact {
                targets: vec![RedactionTarget::UnlistedNames]
            },
        ]
    );
    assert!(!decision.allows_distribution(DistributionMode::Public));
    assert!(decision.allows_distribution(DistributionMode::ResearchOnly));
}

#[test]
fn personal_data_requires_redaction_in_every_mode() {
    let detection = detection(vec![signal(RiskCategory::SensitivePersonalData, RiskLevel::Critical)], vec![]);
    for mode in DistributionMode::ALL {
        let decision = RiskScorer::new().assess(&detection, mode, None);
        assert_eq!(decision.overall, RiskLevel::Critical);
        assert!(decision.requires_human_review(), "{mode}");
        for target in RedactionTarget::PERSONAL_DATA {
            assert!(decision.redaction_targets().contains(&target), "{mode}");
        }
    }
}

#[test]
fn research_only_low_risk_needs_nothing() {
    let detection = detection(vec![signal(RiskCategory::SubJudice, RiskLevel::Medium)], vec![]);
    let decision = RiskScorer::new().assess(&detection, DistributionMode::ResearchOnly, None);
    assert_eq!(decision.overall, RiskLevel::Medium);
    assert!(decision.mitigations.is_empty());
    assert_eq!(
        decision.categories.iter().copied().collect::<Vec<_>>(),
        vec![RiskCategory::SubJudice]
    );
}
