//! Detect, assess and rewrite in one call.

use safety_gate::{
    CourtContext, CourtStyle, DefamationDetectionResult, DistributionMode, FilingType, GateConfig,
    GateContext, ReputationMitigation, ReputationRiskDecision, RewriteTransformation, RiskCategory,
    RiskLevel,
};
use safety_gate_phrases::PhraseLibrary;
use serde::Serialize;

use crate::{RewriteOptions, Rewriter, RiskDetector, RiskScorer};

/// How the caller intends to distribute the gated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateOptions {
    pub mode: DistributionMode,
    pub court_style: Option<CourtStyle>,
    pub filing_type: Option<FilingType>,
}

impl GateOptions {
    pub fn new(mode: DistributionMode) -> Self {
        Self {
            mode,
            court_style: None,
            filing_type: None,
        }
    }

    pub fn with_court(mut self, style: CourtStyle, filing: FilingType) -> Self {
        self.court_style = Some(style);
        self.filing_type = Some(filing);
        self
    }

    /// The court pair, with a missing axis taken from `fallback`. `None` when
    /// the caller named neither.
    pub fn court(&self, fallback: CourtContext) -> Option<CourtContext> {
        if self.court_style.is_none() && self.filing_type.is_none() {
            return None;
        }
        Some(CourtContext::from_parts(self.court_style, self.filing_type, fallback).0)
    }

    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            mode: self.mode,
            court_style: self.court_style,
            filing_type: self.filing_type,
        }
    }
}

/// Everything one gate run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome {
    /// The text the gate was run on.
    pub source: String,
    pub detection: DefamationDetectionResult,
    pub decision: ReputationRiskDecision,
    pub rewritten: String,
    pub transformations: Vec<RewriteTransformation>,
}

#[derive(Serialize)]
struct AuditLog<'a> {
    mode: DistributionMode,
    overall: RiskLevel,
    categories: Vec<RiskCategory>,
    mitigations: &'a [ReputationMitigation],
    transformations: Vec<AuditEntry<'a>>,
}

/// A transformation plus its span in characters of the source text.
#[derive(Serialize)]
struct AuditEntry<'a> {
    #[serde(flatten)]
    transformation: &'a RewriteTransformation,
    char_span: Option<(usize, usize)>,
}

impl GateOutcome {
    /// The audit log as pretty-printed JSON, for the report appendix.
    pub fn audit_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&AuditLog {
            mode: self.decision.mode,
            overall: self.decision.overall,
            categories: self.decision.categories.iter().copied().collect(),
            mitigations: &self.decision.mitigations,
            transformations: self
                .transformations
                .iter()
                .map(|transformation| AuditEntry {
                    transformation,
                    char_span: transformation
                        .is_positional()
                        .then(|| transformation.span.char_range(&self.source))
                        .flatten(),
                })
                .collect(),
        })
    }
}

/// The whole gate. Tables are shared read-only, so one instance can serve
/// any number of threads.
#[derive(Debug, Clone)]
pub struct SafetyGate<'p> {
    fallback: CourtContext,
    detector: RiskDetector,
    scorer: RiskScorer,
    rewriter: Rewriter<'p>,
}

impl Default for SafetyGate<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl SafetyGate<'static> {
    pub fn new() -> Self {
        Self::with_config(GateConfig::default())
    }

    pub fn with_config(config: GateConfig) -> Self {
        Self::with_phrases(config, PhraseLibrary::builtin())
    }
}

impl<'p> SafetyGate<'p> {
    /// A gate resolving court phrases from `phrases`.
    pub fn with_phrases(config: GateConfig, phrases: &'p PhraseLibrary) -> Self {
        Self {
            fallback: config.fallback_court(),
            scorer: RiskScorer::with_config(&config),
            rewriter: Rewriter::new(phrases, config.clone()),
            detector: RiskDetector::with_config(config),
        }
    }

    pub fn detector(&self) -> &RiskDetector {
        &self.detector
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    pub fn rewriter(&self) -> &Rewriter<'p> {
        &self.rewriter
    }

    pub fn run(&self, text: &str, context: Option<&GateContext>, options: &GateOptions) -> GateOutcome {
        let detection = self.detector.detect(text, context, options.mode);
        let decision = self.scorer.assess(&detection, options.mode, options.court(self.fallback));
        let rewritten = self
            .rewriter
            .rewrite(text, &options.rewrite_options(), &detection);

        tracing::debug!(
            mode = %options.mode,
            overall = %decision.overall,
            signals = detection.signals.len(),
            edits = rewritten.applied.len(),
            "gate run"
        );

        GateOutcome {
            source: text.to_string(),
            detection,
            decision,
            rewritten: rewritten.text,
            transformations: rewritten.applied,
        }
    }
}
