//! Court-safe rewriting.
//!
//! Four passes, in order: the detector's rewrite plan, personal-data
//! redaction, allegation framing for legal modes, and the court opening.
//! Only the first pass works by offset; the rest substitute text and record
//! their edits with [`Span::NONE`].

use safety_gate::text::{is_honorific, lowercase_first, sentence_segments};
use safety_gate::{
    CourtContext, CourtStyle, DefamationDetectionResult, DistributionMode, FilingType, GateConfig,
    RewritePlan, RewriteTransformation, Span,
};
use safety_gate_phrases::{PhraseKey, PhraseLibrary};

use crate::patterns::{is_allegation_framed, COURT_OPENING, SEVERE_WORD};
use crate::redaction::redact_personal_data;

const ALLEGATION_FRAME: &str = "It is alleged that ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteOptions {
    pub mode: DistributionMode,
    pub court_style: Option<CourtStyle>,
    pub filing_type: Option<FilingType>,
}

impl RewriteOptions {
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
}

/// Rewritten text and the audit log of every edit attempted on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutput {
    pub text: String,
    pub applied: Vec<RewriteTransformation>,
}

#[derive(Debug, Clone)]
pub struct Rewriter<'p> {
    phrases: &'p PhraseLibrary,
    config: GateConfig,
}

impl Default for Rewriter<'static> {
    fn default() -> Self {
        Self::new(PhraseLibrary::builtin(), GateConfig::default())
    }
}

impl<'p> Rewriter<'p> {
    pub fn new(phrases: &'p PhraseLibrary, config: GateConfig) -> Self {
        Self { phrases, config }
    }

    /// Produce the court-safe form of `text`. Never fails.
    pub fn rewrite(
        &self,
        text: &str,
        options: &RewriteOptions,
        detection: &DefamationDetectionResult,
    ) -> RewriteOutput {
        let (planned, mut applied) = apply_plan(text, &detection.rewrite_plan);

        let redacted = redact_personal_data(&planned);
        applied.extend(redacted.transformations);
        let mut current = redacted.text;

        if options.mode.requires_allegation_framing() {
            current = frame_allegations(&current, &mut applied);
        }

        if options.mode == DistributionMode::CourtMode {
            current = self.open_for_court(current, options, &mut applied);
        }

        tracing::trace!(mode = %options.mode, edits = applied.len(), "rewrite complete");
        RewriteOutput {
            text: current,
            applied,
        }
    }

    fn open_for_court(
        &self,
        text: String,
        options: &RewriteOptions,
        applied: &mut Vec<RewriteTransformation>,
    ) -> String {
        let scan_end = text
            .char_indices()
            .nth(self.config.opening_scan_chars)
            .map_or(text.len(), |(idx, _)| idx);
        if COURT_OPENING.is_match(&text[..scan_end]) {
            return text;
        }

        let (court, filled) = CourtContext::from_parts(
            options.court_style,
            options.filing_type,
            self.config.fallback_court(),
        );
        if filled {
            tracing::debug!(
                style = %court.style,
                filing = %court.filing,
                "court pair not fully specified, using fallback"
            );
        }

        let opening = self
            .phrases
            .first_phrase(court.style, court.filing, PhraseKey::SubmissionOpen);
        if opening.trim().is_empty() {
            tracing::debug!(style = %court.style, filing = %court.filing, "no submission opening phrase");
            return text;
        }

        applied.push(RewriteTransformation::unpositioned(
            "COURT_OPENING",
            "(none)",
            opening.clone(),
            format!("Opening for {} {}", court.style.label(), court.filing.label()),
        ));
        format!("{opening}\n\n{text}")
    }
}

/// Apply `plan` to `text`, last span first.
///
/// A transformation is spliced by offset when its span ends at or before the
/// previously spliced span and still reads `from`. Otherwise it replaces the
/// first occurrence of `from` in the text as edited so far. Once that happens
/// the remaining offsets are stale, so every later transformation is applied
/// the same way.
pub fn apply_plan(text: &str, plan: &RewritePlan) -> (String, Vec<RewriteTransformation>) {
    let mut frontier = text.len();
    let mut spliced = Vec::new();
    let mut drifted: Option<String> = None;
    let mut applied = Vec::with_capacity(plan.len());

    for t in plan.descending() {
        applied.push(t.clone());
        if let Some(live) = drifted.as_mut() {
            replace_first(live, t);
            continue;
        }

        let in_place = t.is_positional()
            && t.span.end <= frontier
            && t.span.slice(text) == Some(t.from.as_str());
        if in_place {
            frontier = t.span.start;
            spliced.push(t);
        } else {
            let mut live = splice(text, &spliced);
            replace_first(&mut live, t);
            drifted = Some(live);
        }
    }

    let out = drifted.unwrap_or_else(|| splice(text, &spliced));
    (out, applied)
}

/// Copy `text` into a fresh buffer with `spliced` (in descending order) applied.
fn splice(text: &str, spliced: &[&RewriteTransformation]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for t in spliced.iter().rev() {
        out.push_str(&text[cursor..t.span.start]);
        out.push_str(&t.to);
        cursor = t.span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

fn replace_first(text: &mut String, t: &RewriteTransformation) {
    if t.from.is_empty() {
        tracing::debug!(rule = %t.rule_id, "skipping transformation with empty source");
        return;
    }
    match text.find(&t.from) {
        Some(pos) => {
            tracing::debug!(rule = %t.rule_id, span = ?t.span, "span stale, replacing first occurrence");
            text.replace_range(pos..pos + t.from.len(), &t.to);
        }
        None => {
            tracing::debug!(rule = %t.rule_id, span = ?t.span, "source text no longer present");
        }
    }
}

/// Prefix severe, unframed sentences with allegation language.
fn frame_allegations(text: &str, applied: &mut Vec<RewriteTransformation>) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in sentence_segments(text) {
        let body = segment.trim();
        if body.is_empty() || !SEVERE_WORD.is_match(body) || is_allegation_framed(body) {
            out.push_str(segment);
            continue;
        }

        let leading = segment.len() - segment.trim_start().len();
        let trailing = segment.len() - segment.trim_end().len();
        let opens_with_title = body.split_whitespace().next().map_or(false, is_honorific);
        let framed = if opens_with_title {
            format!("{ALLEGATION_FRAME}{body}")
        } else {
            format!("{ALLEGATION_FRAME}{}", lowercase_first(body))
        };
        out.push_str(&segment[..leading]);
        out.push_str(&framed);
        out.push_str(&segment[segment.len() - trailing..]);

        applied.push(RewriteTransformation::unpositioned(
            "ALLEGATION_FRAME",
            body,
            framed,
            "Severe accusation framed as an allegation",
        ));
    }
    out
}
