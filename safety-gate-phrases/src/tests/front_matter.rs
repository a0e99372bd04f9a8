use std::collections::BTreeSet;

use safety_gate::{
    CourtContext, CourtStyle, DisclaimerKey, DistributionMode, FilingType, MitigationKind,
    RedactionTarget, ReputationMitigation, ReputationRiskDecision, ReviewRole, RiskLevel,
};

use crate::{mode_disclaimers, FrontMatterBuilder, FrontMatterRequest, PhraseLibrary};

fn every_mitigation() -> Vec<ReputationMitigation> {
    let mut all: Vec<_> = DisclaimerKey::ALL
        .iter()
        .map(|key| ReputationMitigation::AddDisclaimer { disclaimer: *key })
        .collect();
    all.extend([
        ReputationMitigation::ForceAllegationLanguage,
        ReputationMitigation::RequireEvidence {
            targets: vec!["Ali Khan".into(), "Sara Malik".into()],
        },
        ReputationMitigation::RemoveOrRedact {
            targets: RedactionTarget::PERSONAL_DATA.to_vec(),
        },
        ReputationMitigation::RestrictDistribution {
            allowed_modes: vec![DistributionMode::ControlledLegal, DistributionMode::ResearchOnly],
        },
        ReputationMitigation::RequireHumanReview {
            role: ReviewRole::AdminCompliance,
        },
    ]);
    all
}

#[test]
fn every_disclaimer_key_renders_for_every_court_pair() {
    let builder = FrontMatterBuilder::default();
    for style in CourtStyle::ALL {
        for filing in FilingType::ALL {
            for key in DisclaimerKey::ALL {
                let block = builder.disclaimer_block(key, CourtContext::new(style, filing));
                assert_eq!(block.key, key.as_str());
                assert!(!block.heading.is_empty());
                assert!(!block.body.trim().is_empty(), "{style}/{filing}/{:?}", key);
            }
        }
    }
}

#[test]
fn every_mitigation_kind_has_a_block() {
    let builder = FrontMatterBuilder::default();
    let mitigations = every_mitigation();
    let kinds: BTreeSet<_> = mitigations.iter().map(ReputationMitigation::kind).collect();
    assert_eq!(kinds.len(), MitigationKind::ALL.len());

    for mitigation in &mitigations {
        let block = builder.mitigation_block(mitigation, CourtContext::FALLBACK);
        assert!(!block.body.trim().is_empty(), "{:?}", mitigation);
    }
}

#[test]
fn evidence_block_names_targets() {
    let builder = FrontMatterBuilder::default();
    let block = builder.mitigation_block(
        &ReputationMitigation::RequireEvidence {
            targets: vec!["Ali Khan".into(), "Sara Malik".into()],
        },
        CourtContext::FALLBACK,
    );
    assert_eq!(
        block.body,
        "Supporting evidence must be linked before release for claims concerning: Ali Khan, Sara Malik."
    );
}

#[test]
fn allegation_block_uses_court_prefix() {
    let builder = FrontMatterBuilder::default();
    let block = builder.mitigation_block(
        &ReputationMitigation::ForceAllegationLanguage,
        CourtContext::new(CourtStyle::DistrictCourt, FilingType::Complaint),
    );
    assert!(block.body.contains("(\"The Complainant alleges that ...\")"));
}

#[test]
fn mode_disclaimers_match_legal_modes() {
    assert_eq!(mode_disclaimers(DistributionMode::CourtMode).len(), 5);
    assert!(mode_disclaimers(DistributionMode::ControlledLegal)
        .contains(&DisclaimerKey::NoJudicialDetermination));
    assert!(!mode_disclaimers(DistributionMode::Public)
        .contains(&DisclaimerKey::NoJudicialDetermination));
}

#[test]
fn court_front_matter_title_and_appendices() {
    let request = FrontMatterRequest::new(DistributionMode::CourtMode, "State v. Khan")
        .with_court(CourtStyle::HighCourt, FilingType::Petition)
        .with_counts(40, 9);
    let front = FrontMatterBuilder::default().build(&request);

    assert_eq!(front.title, "In the High Court: State v. Khan (Petition)");
    assert!(front.block("lod_appendix").is_some());
    assert!(front.block("key_issues_appendix").is_some());
    assert!(front.block("methodology").is_none());
    assert!(front
        .methodology
        .body
        .starts_with("This document draws on 40 recorded events and 9 sources."));
}

#[test]
fn research_front_matter_renders_plain_text() {
    let request = FrontMatterRequest::new(DistributionMode::ResearchOnly, "Case 14: Procurement review")
        .with_counts(1, 3);
    let rendered = FrontMatterBuilder::default().build(&request).render_plain();

    insta::assert_snapshot!(rendered, @r###"
    Case 14: Procurement review

    Methodology
    This document draws on 1 recorded event and 3 sources. Narrative text was screened by a rule-based safety gate for defamation, sub-judice and privacy risk. Flagged passages were reframed as allegations and personal data was redacted before inclusion.

    Data Limitations
    This document is compiled from sources available at the time of preparation. Those sources may be incomplete, contested or subsequently revised.

    Distribution
    Prepared for internal research only. Not for onward distribution.
    "###);
}

#[test]
fn decision_front_matter_follows_mitigations() {
    let decision = ReputationRiskDecision {
        overall: RiskLevel::Critical,
        categories: BTreeSet::new(),
        signals: vec![],
        mitigations: vec![
            ReputationMitigation::AddDisclaimer {
                disclaimer: DisclaimerKey::NoJudicialDetermination,
            },
            ReputationMitigation::AddDisclaimer {
                disclaimer: DisclaimerKey::Methodology,
            },
            ReputationMitigation::RequireHumanReview {
                role: ReviewRole::AdminCompliance,
            },
        ],
        mode: DistributionMode::ControlledLegal,
        court: None,
    };
    let request = FrontMatterRequest::new(DistributionMode::ControlledLegal, "Case 3");
    let front = FrontMatterBuilder::default().for_decision(&decision, &request);

    let keys: Vec<_> = front.blocks.iter().map(|b| b.key.as_str()).collect();
    assert_eq!(keys, vec!["no_judicial_determination", "require_human_review"]);
    assert_eq!(front.methodology.key, "methodology");
}

#[test]
fn custom_library_feeds_blocks() {
    let mut library = PhraseLibrary::standard();
    library
        .extend_from_toml("[defaults]\ndata_limitations = [\"Only two sources were available.\"]\n")
        .unwrap();
    let builder = FrontMatterBuilder::new(&library);
    let block = builder.disclaimer_block(DisclaimerKey::DataLimitations, CourtContext::FALLBACK);
    assert_eq!(block.body, "Only two sources were available.");
}
