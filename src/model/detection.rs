//! The aggregate produced by one detection call.

use serde::{Deserialize, Serialize};

use crate::{ClaimUnit, RewritePlan, RiskCategory, RiskLevel, RiskSignal};

/// Signals, claim units and the rewrite plan for one piece of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefamationDetectionResult {
    pub signals: Vec<RiskSignal>,
    pub claim_units: Vec<ClaimUnit>,
    pub rewrite_plan: RewritePlan,
}

impl DefamationDetectionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty() && self.claim_units.is_empty() && self.rewrite_plan.is_empty()
    }

    pub fn signals_in(&self, category: RiskCategory) -> impl Iterator<Item = &RiskSignal> {
        self.signals.iter().filter(move |s| s.category == category)
    }

    pub fn has_category(&self, category: RiskCategory) -> bool {
        self.signals_in(category).next().is_some()
    }

    /// Count signals of `category` at or above `level`.
    pub fn count_at_least(&self, category: RiskCategory, level: RiskLevel) -> usize {
        self.signals_in(category).filter(|s| s.level >= level).count()
    }

    pub fn has_level(&self, category: RiskCategory, level: RiskLevel) -> bool {
        self.signals_in(category).any(|s| s.level == level)
    }

    pub fn unevidenced_severe_claims(&self) -> impl Iterator<Item = &ClaimUnit> {
        self.claim_units.iter().filter(|c| c.is_unevidenced_severe())
    }

    /// Highest signal level, if any signal fired.
    pub fn max_level(&self) -> Option<RiskLevel> {
        self.signals.iter().map(|s| s.level).max()
    }
}
