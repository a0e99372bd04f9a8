//! Risk detection over raw narrative text.

use safety_gate::text::{
    is_sentence_start, sentence_window, significant_tokens, truncate_chars, uppercase_first,
};
use safety_gate::{
    ClaimUnit, DefamationDetectionResult, DistributionMode, EvidenceArtifact, GateConfig,
    GateContext, RewritePlan, RewriteTransformation, RiskCategory, RiskLevel, RiskSignal, Span,
};

use crate::patterns::{is_allegation_framed, COMPILED_REWRITE_RULES, COMPILED_RISK_RULES};
use crate::redaction::PersonalData;
use crate::targets::{targets_in_sentence, CapitalizedPhraseExtractor, TargetExtractor};

/// Prefix used for the suggested rewrite of a claim unit.
const CLAIM_PREFIX: &str = "It is alleged that";

/// Scans text against the pattern tables.
///
/// Detection never depends on the distribution mode: the same text yields the
/// same signals, claims and plan whatever the caller intends to do with it.
#[derive(Debug, Clone)]
pub struct RiskDetector<E = CapitalizedPhraseExtractor> {
    config: GateConfig,
    extractor: E,
}

impl Default for RiskDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskDetector {
    pub fn new() -> Self {
        Self::with_config(GateConfig::default())
    }

    pub fn with_config(config: GateConfig) -> Self {
        Self::with_extractor(config, CapitalizedPhraseExtractor)
    }
}

/// Per-call state shared by the scanning passes.
struct Scan<'t> {
    text: &'t str,
    targets: Vec<&'t str>,
    signals: Vec<RiskSignal>,
    claims: Vec<ClaimUnit>,
}

impl<E: TargetExtractor> RiskDetector<E> {
    pub fn with_extractor(config: GateConfig, extractor: E) -> Self {
        Self { config, extractor }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Detect risk in `text`.
    ///
    /// `mode` is recorded in the trace output only.
    pub fn detect(
        &self,
        text: &str,
        context: Option<&GateContext>,
        mode: DistributionMode,
    ) -> DefamationDetectionResult {
        if text.trim().is_empty() {
            return DefamationDetectionResult::empty();
        }

        let extracted = self.extractor.extract_candidate_targets(text);
        let mut scan = Scan {
            text,
            targets: extracted
                .iter()
                .map(String::as_str)
                .chain(context.into_iter().flat_map(GateContext::entity_names))
                .collect(),
            signals: Vec::new(),
            claims: Vec::new(),
        };

        self.scan_hedgeable(&mut scan);
        self.scan_personal_data(&mut scan);
        let rewrite_plan = self.plan_rewrites(text);

        let mut claim_units = scan.claims;
        if let Some(context) = context {
            backfill_evidence(
                &mut claim_units,
                &context.evidence_artifacts,
                self.config.evidence_min_token_chars,
            );
        }

        tracing::trace!(
            mode = %mode,
            signals = scan.signals.len(),
            claims = claim_units.len(),
            planned = rewrite_plan.len(),
            "detection complete"
        );

        DefamationDetectionResult {
            signals: scan.signals,
            claim_units,
            rewrite_plan,
        }
    }

    fn sentence<'t>(&self, text: &'t str, span: Span) -> &'t str {
        sentence_window(text, span, self.config.sentence_window_chars)
            .slice(text)
            .unwrap_or_default()
    }

    fn scan_hedgeable(&self, scan: &mut Scan<'_>) {
        for compiled in COMPILED_RISK_RULES.iter() {
            let rule = compiled.rule;
            for m in compiled.regex.find_iter(scan.text) {
                let span = Span::from(m);
                let sentence = self.sentence(scan.text, span);
                if is_allegation_framed(sentence) {
                    tracing::trace!(pattern = rule.id, ?span, "suppressed by allegation marker");
                    continue;
                }

                let targets = targets_in_sentence(sentence, scan.targets.iter().copied());
                if rule.requires_target && targets.is_empty() {
                    continue;
                }

                let signal = self.signal(
                    scan.signals.len() + 1,
                    rule.category,
                    rule.level,
                    span,
                    m.as_str(),
                    rule.rationale,
                    rule.id,
                    targets,
                    rule.confidence,
                );
                if let Some(claim) = claim_for(&signal, m.as_str()) {
                    scan.claims.push(claim);
                }
                scan.signals.push(signal);
            }
        }
    }

    fn scan_personal_data(&self, scan: &mut Scan<'_>) {
        for class in PersonalData::ALL {
            for m in class.regex().find_iter(scan.text) {
                let signal = self.signal(
                    scan.signals.len() + 1,
                    RiskCategory::SensitivePersonalData,
                    RiskLevel::Critical,
                    Span::from(m),
                    m.as_str(),
                    class.rationale(),
                    class.pattern_id(),
                    Vec::new(),
                    1.0,
                );
                scan.signals.push(signal);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn signal(
        &self,
        ordinal: usize,
        category: RiskCategory,
        level: RiskLevel,
        span: Span,
        matched: &str,
        rationale: &str,
        pattern_id: &str,
        targets: Vec<String>,
        confidence: f64,
    ) -> RiskSignal {
        RiskSignal {
            id: RiskSignal::format_id(ordinal),
            category,
            level,
            span,
            matched_text: truncate_chars(matched, self.config.matched_text_limit),
            rationale: rationale.to_string(),
            pattern_id: pattern_id.to_string(),
            targets,
            confidence: RiskSignal::clamp_confidence(confidence),
        }
    }

    fn plan_rewrites(&self, text: &str) -> RewritePlan {
        let mut transformations = Vec::new();
        for compiled in COMPILED_REWRITE_RULES.iter() {
            let rule = compiled.rule;
            for caps in compiled.regex.captures_iter(text) {
                let Some(m) = caps.get(0) else { continue };
                let span = Span::from(m);
                if is_allegation_framed(self.sentence(text, span)) {
                    continue;
                }

                let mut to = String::new();
                caps.expand(rule.template, &mut to);
                if is_sentence_start(text, span.start) {
                    to = uppercase_first(&to);
                }
                transformations.push(RewriteTransformation::positioned(
                    rule.id,
                    m.as_str(),
                    to,
                    rule.reason,
                    span,
                ));
            }
        }
        RewritePlan { transformations }
    }
}

/// Criminal and institutional matches naming someone become claim units.
fn claim_for(signal: &RiskSignal, matched: &str) -> Option<ClaimUnit> {
    if !matches!(
        signal.category,
        RiskCategory::UnverifiedCriminalAllegation | RiskCategory::InstitutionalAccusation
    ) {
        return None;
    }
    let target = signal.targets.first()?;
    let predicate = matched.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    Some(ClaimUnit {
        target: target.clone(),
        suggested_rewrite: format!("{CLAIM_PREFIX} {target} {predicate}"),
        predicate,
        severity: signal.level,
        has_evidence: false,
        evidence_refs: Vec::new(),
        signal_id: signal.id.clone(),
    })
}

/// Link claims to artifacts sharing a significant token with the predicate.
pub fn backfill_evidence(claims: &mut [ClaimUnit], artifacts: &[EvidenceArtifact], min_chars: usize) {
    if artifacts.is_empty() {
        return;
    }
    let indexed: Vec<_> = artifacts
        .iter()
        .map(|artifact| (artifact, significant_tokens(&artifact.value, min_chars)))
        .collect();

    let mut linked = 0;
    for claim in claims.iter_mut() {
        let predicate = significant_tokens(&claim.predicate, min_chars);
        for (artifact, tokens) in &indexed {
            if !predicate.is_disjoint(tokens) {
                claim.attach_evidence(&artifact.id);
                linked += 1;
            }
        }
    }
    tracing::trace!(claims = claims.len(), linked, "evidence back-fill");
}
