//! Distribution modes and the court axes that index the phrase library.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The intended audience or channel for the gated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionMode {
    /// Published to the general public.
    Public,
    /// Shared with counsel and legal teams under controlled access.
    ControlledLegal,
    /// Internal research; not for onward distribution.
    ResearchOnly,
    /// Filed with or presented to a court.
    CourtMode,
}

impl DistributionMode {
    pub const ALL: [DistributionMode; 4] = [
        DistributionMode::Public,
        DistributionMode::ControlledLegal,
        DistributionMode::ResearchOnly,
        DistributionMode::CourtMode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionMode::Public => "public",
            DistributionMode::ControlledLegal => "controlled_legal",
            DistributionMode::ResearchOnly => "research_only",
            DistributionMode::CourtMode => "court_mode",
        }
    }

    /// Modes in which accusatory sentences must carry allegation framing.
    pub fn requires_allegation_framing(&self) -> bool {
        matches!(
            self,
            DistributionMode::ControlledLegal | DistributionMode::CourtMode
        )
    }
}

impl fmt::Display for DistributionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Jurisdiction style of the forum a filing is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtStyle {
    SupremeCourt,
    HighCourt,
    DistrictCourt,
    SpecialTribunal,
}

impl CourtStyle {
    pub const ALL: [CourtStyle; 4] = [
        CourtStyle::SupremeCourt,
        CourtStyle::HighCourt,
        CourtStyle::DistrictCourt,
        CourtStyle::SpecialTribunal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CourtStyle::SupremeCourt => "supreme_court",
            CourtStyle::HighCourt => "high_court",
            CourtStyle::DistrictCourt => "district_court",
            CourtStyle::SpecialTribunal => "special_tribunal",
        }
    }

    /// Human-readable forum name.
    pub fn label(&self) -> &'static str {
        match self {
            CourtStyle::SupremeCourt => "Supreme Court",
            CourtStyle::HighCourt => "High Court",
            CourtStyle::DistrictCourt => "District Court",
            CourtStyle::SpecialTribunal => "Special Tribunal",
        }
    }
}

impl fmt::Display for CourtStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of document being filed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingType {
    Petition,
    Application,
    WrittenStatement,
    Affidavit,
    Complaint,
}

impl FilingType {
    pub const ALL: [FilingType; 5] = [
        FilingType::Petition,
        FilingType::Application,
        FilingType::WrittenStatement,
        FilingType::Affidavit,
        FilingType::Complaint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilingType::Petition => "petition",
            FilingType::Application => "application",
            FilingType::WrittenStatement => "written_statement",
            FilingType::Affidavit => "affidavit",
            FilingType::Complaint => "complaint",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilingType::Petition => "Petition",
            FilingType::Application => "Application",
            FilingType::WrittenStatement => "Written Statement",
            FilingType::Affidavit => "Affidavit",
            FilingType::Complaint => "Complaint",
        }
    }
}

impl fmt::Display for FilingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved (court style, filing type) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourtContext {
    pub style: CourtStyle,
    pub filing: FilingType,
}

impl CourtContext {
    /// Smallest-common jurisdiction and filing, used whenever a caller does
    /// not name a pair.
    pub const FALLBACK: CourtContext = CourtContext {
        style: CourtStyle::DistrictCourt,
        filing: FilingType::Application,
    };

    pub fn new(style: CourtStyle, filing: FilingType) -> Self {
        Self { style, filing }
    }

    /// Build a context from optional axes, filling gaps from `fallback`.
    ///
    /// Returns the context and whether any axis had to be filled.
    pub fn from_parts(
        style: Option<CourtStyle>,
        filing: Option<FilingType>,
        fallback: CourtContext,
    ) -> (Self, bool) {
        let filled = style.is_none() || filing.is_none();
        (
            Self {
                style: style.unwrap_or(fallback.style),
                filing: filing.unwrap_or(fallback.filing),
            },
            filled,
        )
    }
}

impl Default for CourtContext {
    fn default() -> Self {
        Self::FALLBACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allegation_framing_modes() {
        let framed: Vec<_> = DistributionMode::ALL
            .iter()
            .filter(|mode| mode.requires_allegation_framing())
            .collect();
        assert_eq!(
            framed,
            vec![&DistributionMode::ControlledLegal, &DistributionMode::CourtMode]
        );
    }

    #[test]
    fn test_court_context_from_parts() {
        let (ctx, filled) = CourtContext::from_parts(
            Some(CourtStyle::HighCourt),
            None,
            CourtContext::FALLBACK,
        );
        assert!(filled);
        assert_eq!(ctx.style, CourtStyle::HighCourt);
        assert_eq!(ctx.filing, FilingType::Application);

        let (ctx, filled) = CourtContext::from_parts(
            Some(CourtStyle::SupremeCourt),
            Some(FilingType::Petition),
            CourtContext::FALLBACK,
        );
        assert!(!filled);
        assert_eq!(ctx, CourtContext::new(CourtStyle::SupremeCourt, FilingType::Petition));
    }

    #[test]
    fn test_wire_names_match_as_str() {
        for mode in DistributionMode::ALL {
            let value = toml::Value::try_from(mode).unwrap();
            assert_eq!(value.as_str(), Some(mode.as_str()));
        }
        for style in CourtStyle::ALL {
            let value = toml::Value::try_from(style).unwrap();
            assert_eq!(value.as_str(), Some(style.as_str()));
        }
        for filing in FilingType::ALL {
            let value = toml::Value::try_from(filing).unwrap();
            assert_eq!(value.as_str(), Some(filing.as_str()));
        }
    }
}
