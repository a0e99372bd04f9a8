//! Declarative gate fixtures.
//!
//! A fixture is one TOML document: the input text, how it is to be
//! distributed, optional case context, and what the gate must produce.
//!
//! ```toml
//! title = "Fraud claim in a district court application"
//! text = "Ali Khan committed fraud against the company."
//! mode = "court_mode"
//!
//! [expect]
//! overall = "CRITICAL"
//! targets = ["Ali Khan"]
//! output_contains = ["It is alleged that Ali Khan engaged in irregular conduct"]
//! ```

use safety_gate::{
    CourtStyle, DistributionMode, EvidenceArtifact, FilingType, GateContext, MitigationKind,
    NamedEntity, RiskCategory, RiskLevel,
};
use safety_gate_risk::GateOptions;
use serde::Deserialize;

use crate::{SpecError, SpecResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateFixture {
    pub title: String,
    pub text: String,
    pub mode: DistributionMode,
    #[serde(default)]
    pub court_style: Option<CourtStyle>,
    #[serde(default)]
    pub filing_type: Option<FilingType>,
    #[serde(default)]
    pub entities: Vec<NamedEntity>,
    #[serde(default)]
    pub evidence: Vec<EvidenceArtifact>,
    pub expect: Expectations,
}

/// What the gate must produce. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Expectations {
    pub overall: Option<RiskLevel>,
    /// Categories that must be among the decision's categories.
    pub categories: Vec<RiskCategory>,
    /// Categories that must not fire.
    pub absent_categories: Vec<RiskCategory>,
    /// Names that must appear among the signals' targets.
    pub targets: Vec<String>,
    pub output_contains: Vec<String>,
    pub output_excludes: Vec<String>,
    /// Rule ids that must appear in the audit log.
    pub rules: Vec<String>,
    /// The exact ordered list of mitigation kinds, when given.
    pub mitigations: Option<Vec<MitigationKind>>,
}

impl Expectations {
    /// Number of individual checks these expectations expand to.
    pub fn check_count(&self) -> usize {
        usize::from(self.overall.is_some())
            + self.categories.len()
            + self.absent_categories.len()
            + self.targets.len()
            + self.output_contains.len()
            + self.output_excludes.len()
            + self.rules.len()
            + usize::from(self.mitigations.is_some())
    }
}

impl GateFixture {
    /// Parse and validate a fixture document.
    pub fn parse(content: &str) -> SpecResult<Self> {
        let fixture: GateFixture =
            toml::from_str(content).map_err(|e| SpecError::from_toml(content, e))?;
        fixture.validate()?;
        Ok(fixture)
    }

    fn validate(&self) -> SpecResult<()> {
        if self.expect.check_count() == 0 {
            return Err(SpecError::Invalid {
                message: format!("fixture `{}` has no expectations", self.title),
            });
        }
        if let Some(category) = self
            .expect
            .categories
            .iter()
            .find(|c| self.expect.absent_categories.contains(*c))
        {
            return Err(SpecError::Invalid {
                message: format!("`{category}` is both expected and absent in `{}`", self.title),
            });
        }
        Ok(())
    }

    pub fn context(&self) -> Option<GateContext> {
        if self.entities.is_empty() && self.evidence.is_empty() {
            return None;
        }
        Some(GateContext {
            entities: self.entities.clone(),
            evidence_artifacts: self.evidence.clone(),
        })
    }

    pub fn options(&self) -> GateOptions {
        GateOptions {
            mode: self.mode,
            court_style: self.court_style,
            filing_type: self.filing_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let fixture = GateFixture::parse(
            r#"
title = "Minimal"
text = "Nothing here."
mode = "public"

[expect]
overall = "LOW"
"#,
        )
        .unwrap();
        assert_eq!(fixture.mode, DistributionMode::Public);
        assert_eq!(fixture.expect.overall, Some(RiskLevel::Low));
        assert_eq!(fixture.expect.check_count(), 1);
        assert!(fixture.context().is_none());
    }

    #[test]
    fn test_parse_context_and_court() {
        let fixture = GateFixture::parse(
            r#"
title = "Context"
text = "The board met."
mode = "court_mode"
court_style = "high_court"
filing_type = "affidavit"

[[entities]]
name = "Procurement Board"
category = "organization"

[[evidence]]
id = "EV-1"
value = "Minutes of the board meeting"

[expect]
categories = ["institutional_accusation"]
mitigations = ["add_disclaimer", "require_human_review"]
"#,
        )
        .unwrap();
        let options = fixture.options();
        assert_eq!(options.court_style, Some(CourtStyle::HighCourt));
        assert_eq!(options.filing_type, Some(FilingType::Affidavit));
        let context = fixture.context().unwrap();
        assert_eq!(context.entities[0].name, "Procurement Board");
        assert_eq!(context.evidence_artifacts[0].id, "EV-1");
        assert_eq!(fixture.expect.check_count(), 2);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = GateFixture::parse("title = \"Broken\"\ntext = \"x\"\nmode = sideways\n[expect]\n")
            .unwrap_err();
        match err {
            SpecError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_contradictions() {
        let err = GateFixture::parse(
            r#"
title = "Contradiction"
text = "x"
mode = "public"

[expect]
categories = ["sub_judice"]
absent_categories = ["sub_judice"]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, SpecError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_empty_expectations() {
        let err = GateFixture::parse("title = \"Empty\"\ntext = \"x\"\nmode = \"public\"\n[expect]\n")
            .unwrap_err();
        assert!(err.to_string().contains("no expectations"));
    }
}
