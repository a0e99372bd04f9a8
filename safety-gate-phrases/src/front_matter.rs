//! Front matter and disclaimer blocks for gated documents.
//!
//! Blocks are plain text. The renderer decides how to lay them out; nothing
//! here assumes HTML or any other output format.

use safety_gate::{
    CourtContext, CourtStyle, DisclaimerKey, DistributionMode, FilingType, RedactionTarget,
    ReputationMitigation, ReputationRiskDecision, ReviewRole,
};
use serde::Serialize;

use crate::{PhraseKey, PhraseLibrary};

/// One titled block of disclosure text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisclosureBlock {
    /// Machine key (a disclaimer or mitigation key).
    pub key: String,
    pub heading: String,
    pub body: String,
}

impl DisclosureBlock {
    fn new(key: &str, heading: &str, body: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            heading: heading.to_string(),
            body: body.into(),
        }
    }
}

/// Assembled front matter for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    pub title: String,
    pub methodology: DisclosureBlock,
    pub blocks: Vec<DisclosureBlock>,
}

impl FrontMatter {
    /// Title, methodology and blocks as plain text separated by blank lines.
    pub fn render_plain(&self) -> String {
        let mut out = self.title.clone();
        for block in std::iter::once(&self.methodology).chain(self.blocks.iter()) {
            out.push_str("\n\n");
            out.push_str(&block.heading);
            out.push('\n');
            out.push_str(&block.body);
        }
        out
    }

    pub fn block(&self, key: &str) -> Option<&DisclosureBlock> {
        self.blocks.iter().find(|b| b.key == key)
    }
}

/// Inputs describing the document the front matter introduces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterRequest<'a> {
    pub mode: DistributionMode,
    pub court_style: Option<CourtStyle>,
    pub filing_type: Option<FilingType>,
    pub case_title: &'a str,
    pub event_count: usize,
    pub source_count: usize,
}

impl<'a> FrontMatterRequest<'a> {
    pub fn new(mode: DistributionMode, case_title: &'a str) -> Self {
        Self {
            mode,
            court_style: None,
            filing_type: None,
            case_title,
            event_count: 0,
            source_count: 0,
        }
    }

    pub fn with_court(mut self, style: CourtStyle, filing: FilingType) -> Self {
        self.court_style = Some(style);
        self.filing_type = Some(filing);
        self
    }

    pub fn with_counts(mut self, event_count: usize, source_count: usize) -> Self {
        self.event_count = event_count;
        self.source_count = source_count;
        self
    }
}

/// Builds disclosure blocks from the phrase library.
#[derive(Debug, Clone)]
pub struct FrontMatterBuilder<'p> {
    phrases: &'p PhraseLibrary,
    fallback: CourtContext,
}

impl Default for FrontMatterBuilder<'static> {
    fn default() -> Self {
        Self::new(PhraseLibrary::builtin())
    }
}

impl<'p> FrontMatterBuilder<'p> {
    pub fn new(phrases: &'p PhraseLibrary) -> Self {
        Self {
            phrases,
            fallback: CourtContext::FALLBACK,
        }
    }

    /// Court pair used when a request does not name one.
    pub fn with_fallback(mut self, fallback: CourtContext) -> Self {
        self.fallback = fallback;
        self
    }

    /// Front matter with the disclaimers the mode calls for.
    pub fn build(&self, request: &FrontMatterRequest<'_>) -> FrontMatter {
        let keys = mode_disclaimers(request.mode);
        let court = self.court_for(request);
        FrontMatter {
            title: title(request, court),
            methodology: self.methodology_block(request, court),
            blocks: keys
                .iter()
                .filter(|key| **key != DisclaimerKey::Methodology)
                .map(|key| self.disclaimer_block(*key, court))
                .chain(std::iter::once(distribution_notice(request.mode)))
                .collect(),
        }
    }

    /// Front matter carrying exactly the blocks `decision` requires.
    pub fn for_decision(
        &self,
        decision: &ReputationRiskDecision,
        request: &FrontMatterRequest<'_>,
    ) -> FrontMatter {
        let court = decision.court.unwrap_or_else(|| self.court_for(request));
        FrontMatter {
            title: title(request, court),
            methodology: self.methodology_block(request, court),
            blocks: decision
                .mitigations
                .iter()
                .filter(|m| {
                    !matches!(
                        m,
                        ReputationMitigation::AddDisclaimer {
                            disclaimer: DisclaimerKey::Methodology
                        }
                    )
                })
                .map(|m| self.mitigation_block(m, court))
                .collect(),
        }
    }

    /// The block for one disclaimer key. Total over [`DisclaimerKey`].
    pub fn disclaimer_block(&self, key: DisclaimerKey, court: CourtContext) -> DisclosureBlock {
        let phrase = |k| self.phrases.first_phrase(court.style, court.filing, k);
        match key {
            DisclaimerKey::NoJudicialDetermination => DisclosureBlock::new(
                key.as_str(),
                "No Judicial Determination",
                phrase(PhraseKey::NoJudicialDetermination),
            ),
            DisclaimerKey::DataLimitations => DisclosureBlock::new(
                key.as_str(),
                "Data Limitations",
                phrase(PhraseKey::DataLimitations),
            ),
            DisclaimerKey::Methodology => {
                DisclosureBlock::new(key.as_str(), "Methodology", phrase(PhraseKey::Methodology))
            }
            DisclaimerKey::LodAppendix => {
                DisclosureBlock::new(key.as_str(), "List of Dates", phrase(PhraseKey::LodAppendix))
            }
            DisclaimerKey::KeyIssuesAppendix => DisclosureBlock::new(
                key.as_str(),
                "Key Issues",
                phrase(PhraseKey::KeyIssuesAppendix),
            ),
        }
    }

    /// The block for one mitigation. Total over [`ReputationMitigation`].
    pub fn mitigation_block(
        &self,
        mitigation: &ReputationMitigation,
        court: CourtContext,
    ) -> DisclosureBlock {
        let key = mitigation.kind().as_str();
        match mitigation {
            ReputationMitigation::AddDisclaimer { disclaimer } => {
                self.disclaimer_block(*disclaimer, court)
            }
            ReputationMitigation::ForceAllegationLanguage => {
                let prefix =
                    self.phrases
                        .first_phrase(court.style, court.filing, PhraseKey::AllegationPrefix);
                DisclosureBlock::new(
                    key,
                    "Allegation Language",
                    format!(
                        "Accusatory statements in this document are framed as allegations \
                         (\"{prefix} ...\") and are not assertions of proven fact."
                    ),
                )
            }
            ReputationMitigation::RequireEvidence { targets } => {
                let body = if targets.is_empty() {
                    "Supporting evidence must be linked for every severe claim before release."
                        .to_string()
                } else {
                    format!(
                        "Supporting evidence must be linked before release for claims concerning: {}.",
                        targets.join(", ")
                    )
                };
                DisclosureBlock::new(key, "Evidence Required", body)
            }
            ReputationMitigation::RemoveOrRedact { targets } => {
                let labels: Vec<_> = targets.iter().map(redaction_label).collect();
                DisclosureBlock::new(
                    key,
                    "Redactions",
                    format!(
                        "The following must be removed or redacted before release: {}.",
                        labels.join(", ")
                    ),
                )
            }
            ReputationMitigation::RestrictDistribution { allowed_modes } => {
                let labels: Vec<_> = allowed_modes.iter().map(mode_label).collect();
                DisclosureBlock::new(
                    key,
                    "Distribution Restricted",
                    format!(
                        "Distribution of this document is restricted to: {}.",
                        labels.join(", ")
                    ),
                )
            }
            ReputationMitigation::RequireHumanReview { role } => DisclosureBlock::new(
                key,
                "Human Review Required",
                format!(
                    "This document must be reviewed and approved by {} before release.",
                    review_label(*role)
                ),
            ),
        }
    }

    fn court_for(&self, request: &FrontMatterRequest<'_>) -> CourtContext {
        CourtContext::from_parts(request.court_style, request.filing_type, self.fallback).0
    }

    fn methodology_block(&self, request: &FrontMatterRequest<'_>, court: CourtContext) -> DisclosureBlock {
        let scope = format!(
            "This document draws on {} and {}.",
            counted(request.event_count, "recorded event"),
            counted(request.source_count, "source"),
        );
        let method = self
            .phrases
            .first_phrase(court.style, court.filing, PhraseKey::Methodology);
        DisclosureBlock::new(
            DisclaimerKey::Methodology.as_str(),
            "Methodology",
            format!("{scope} {method}"),
        )
    }
}

/// Disclaimers the scorer requires for `mode` regardless of detected risk.
pub fn mode_disclaimers(mode: DistributionMode) -> Vec<DisclaimerKey> {
    match mode {
        DistributionMode::CourtMode => DisclaimerKey::ALL.to_vec(),
        DistributionMode::ControlledLegal => vec![
            DisclaimerKey::NoJudicialDetermination,
            DisclaimerKey::DataLimitations,
            DisclaimerKey::Methodology,
        ],
        DistributionMode::Public | DistributionMode::ResearchOnly => {
            vec![DisclaimerKey::DataLimitations, DisclaimerKey::Methodology]
        }
    }
}

fn title(request: &FrontMatterRequest<'_>, court: CourtContext) -> String {
    match request.mode {
        DistributionMode::CourtMode => format!(
            "In the {}: {} ({})",
            court.style.label(),
            request.case_title,
            court.filing.label()
        ),
        _ => request.case_title.to_string(),
    }
}

fn distribution_notice(mode: DistributionMode) -> DisclosureBlock {
    let body = match mode {
        DistributionMode::Public => "Prepared for public distribution. Names not already on the public record have been withheld.",
        DistributionMode::ControlledLegal => "Prepared for controlled legal distribution. Not for publication.",
        DistributionMode::ResearchOnly => "Prepared for internal research only. Not for onward distribution.",
        DistributionMode::CourtMode => "Prepared for submission to the court named above.",
    };
    DisclosureBlock::new("distribution", "Distribution", body)
}

fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn redaction_label(target: &RedactionTarget) -> &'static str {
    match target {
        RedactionTarget::IdentityNumber => "identity numbers",
        RedactionTarget::PhoneNumber => "phone numbers",
        RedactionTarget::Address => "addresses",
        RedactionTarget::CardNumber => "card numbers",
        RedactionTarget::UnlistedNames => "names not already on the public record",
    }
}

fn mode_label(mode: &DistributionMode) -> &'static str {
    match mode {
        DistributionMode::Public => "public",
        DistributionMode::ControlledLegal => "controlled legal",
        DistributionMode::ResearchOnly => "research only",
        DistributionMode::CourtMode => "court",
    }
}

fn review_label(role: ReviewRole) -> &'static str {
    match role {
        ReviewRole::AdminCompliance => "an administrator or compliance officer",
    }
}
