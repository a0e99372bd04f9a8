//! Structured allegations and the rewrite edits planned against them.

use serde::{Deserialize, Serialize};

use crate::{RiskLevel, Span};

/// A structured allegation extracted from a criminal or institutional match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimUnit {
    /// Who the allegation is about.
    pub target: String,
    /// Short summary of what is alleged (the matched phrase, lowercased).
    pub predicate: String,
    pub severity: RiskLevel,
    /// Whether any evidence artifact appears to support the claim.
    pub has_evidence: bool,
    /// Identifiers of the supporting evidence artifacts.
    pub evidence_refs: Vec<String>,
    /// Allegation-framed wording suggested for the claim.
    pub suggested_rewrite: String,
    /// The signal this claim was extracted from.
    pub signal_id: String,
}

impl ClaimUnit {
    /// Severe claims with no supporting evidence drive evidence requirements.
    pub fn is_unevidenced_severe(&self) -> bool {
        !self.has_evidence && self.severity.is_severe()
    }

    /// Record an artifact as supporting this claim.
    pub fn attach_evidence(&mut self, artifact_id: &str) {
        self.has_evidence = true;
        if !self.evidence_refs.iter().any(|id| id == artifact_id) {
            self.evidence_refs.push(artifact_id.to_string());
        }
    }
}

/// A planned or applied text edit, kept for the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteTransformation {
    pub rule_id: String,
    pub from: String,
    pub to: String,
    pub reason: String,
    /// Span in the original text; [`Span::NONE`] for non-positional edits.
    pub span: Span,
}

impl RewriteTransformation {
    /// An edit anchored at `span` in the original text.
    pub fn positioned(
        rule_id: &str,
        from: impl Into<String>,
        to: impl Into<String>,
        reason: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            from: from.into(),
            to: to.into(),
            reason: reason.into(),
            span,
        }
    }

    /// An edit applied by substitution rather than by index.
    pub fn unpositioned(
        rule_id: &str,
        from: impl Into<String>,
        to: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::positioned(rule_id, from, to, reason, Span::NONE)
    }

    pub fn is_positional(&self) -> bool {
        !self.span.is_placeholder()
    }
}

/// Ordered list of edits the detector proposes for the rewriter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewritePlan {
    pub transformations: Vec<RewriteTransformation>,
}

impl RewritePlan {
    pub fn is_empty(&self) -> bool {
        self.transformations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transformations.len()
    }

    /// Transformations ordered by span start, last first.
    pub fn descending(&self) -> Vec<&RewriteTransformation> {
        let mut ordered: Vec<_> = self.transformations.iter().collect();
        ordered.sort_by(|a, b| b.span.start.cmp(&a.span.start).then(b.span.end.cmp(&a.span.end)));
        ordered
    }
}
