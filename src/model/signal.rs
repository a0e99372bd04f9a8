//! Risk categories, severity levels and detected signals.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Span;

/// Severity of a signal, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    /// HIGH or CRITICAL.
    pub fn is_severe(&self) -> bool {
        *self >= RiskLevel::High
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The concern a signal was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    /// A criminal act stated as fact about an identifiable person.
    UnverifiedCriminalAllegation,
    /// Wrongdoing attributed to an institution as fact.
    InstitutionalAccusation,
    /// Reputation-damaging labels and unsupported assertions.
    Defamation,
    /// Calls to action against, or harassment of, a person or group.
    IncitementOrHarassment,
    /// Identity numbers, phone numbers, addresses, card numbers.
    SensitivePersonalData,
    /// Prejudging matters pending before a court.
    SubJudice,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 6] = [
        RiskCategory::UnverifiedCriminalAllegation,
        RiskCategory::InstitutionalAccusation,
        RiskCategory::Defamation,
        RiskCategory::IncitementOrHarassment,
        RiskCategory::SensitivePersonalData,
        RiskCategory::SubJudice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::UnverifiedCriminalAllegation => "unverified_criminal_allegation",
            RiskCategory::InstitutionalAccusation => "institutional_accusation",
            RiskCategory::Defamation => "defamation",
            RiskCategory::IncitementOrHarassment => "incitement_or_harassment",
            RiskCategory::SensitivePersonalData => "sensitive_personal_data",
            RiskCategory::SubJudice => "sub_judice",
        }
    }

    /// Returns a human-readable description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            RiskCategory::UnverifiedCriminalAllegation => "Unverified criminal allegation",
            RiskCategory::InstitutionalAccusation => "Institutional accusation",
            RiskCategory::Defamation => "Defamatory statement",
            RiskCategory::IncitementOrHarassment => "Incitement or harassment",
            RiskCategory::SensitivePersonalData => "Sensitive personal data",
            RiskCategory::SubJudice => "Sub-judice prejudgment",
        }
    }

    /// Whether allegation framing in the surrounding sentence neutralizes the
    /// risk. Personal data is a redaction concern, not a hedging one.
    pub fn is_hedgeable(&self) -> bool {
        !matches!(self, RiskCategory::SensitivePersonalData)
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected risk occurrence in the original text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSignal {
    /// Stable identifier, numbered in detection order (`SIG-0001`).
    pub id: String,
    pub category: RiskCategory,
    pub level: RiskLevel,
    /// Where the match sits in the original text.
    pub span: Span,
    /// The matched text, truncated for storage.
    pub matched_text: String,
    pub rationale: String,
    /// Identifier of the pattern that fired.
    pub pattern_id: String,
    /// Named targets found in the sentence around the match.
    pub targets: Vec<String>,
    /// Confidence from 0.0 to 1.0.
    pub confidence: f64,
}

impl RiskSignal {
    /// Format the stable identifier for the `ordinal`-th signal (1-based).
    pub fn format_id(ordinal: usize) -> String {
        format!("SIG-{:04}", ordinal)
    }

    /// Clamp a raw confidence into `[0, 1]`.
    pub fn clamp_confidence(confidence: f64) -> f64 {
        if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        }
    }

    pub fn has_targets(&self) -> bool {
        !self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
        assert!(RiskLevel::High.is_severe());
        assert!(!RiskLevel::Medium.is_severe());
    }

    #[test]
    fn test_only_personal_data_is_unhedgeable() {
        let unhedgeable: Vec<_> = RiskCategory::ALL
            .iter()
            .filter(|c| !c.is_hedgeable())
            .collect();
        assert_eq!(unhedgeable, vec![&RiskCategory::SensitivePersonalData]);
    }

    #[test]
    fn test_signal_id_and_confidence() {
        assert_eq!(RiskSignal::format_id(7), "SIG-0007");
        assert_eq!(RiskSignal::clamp_confidence(1.4), 1.0);
        assert_eq!(RiskSignal::clamp_confidence(-0.2), 0.0);
        assert_eq!(RiskSignal::clamp_confidence(f64::NAN), 0.0);
    }
}
