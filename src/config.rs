//! Gate configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ConfigResult};
use crate::{CourtContext, CourtStyle, FilingType};

/// Tunables shared by the detector and the rewriter.
///
/// Every field has a default, so a partial TOML file only needs to name the
/// values it changes:
///
/// ```
/// use safety_gate::GateConfig;
///
/// let config = GateConfig::from_toml_str("matched_text_limit = 80").unwrap();
/// assert_eq!(config.matched_text_limit, 80);
/// assert_eq!(config.opening_scan_chars, 200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Characters searched on each side of a match when recovering its sentence.
    pub sentence_window_chars: usize,
    /// Maximum characters of matched text stored on a signal.
    pub matched_text_limit: usize,
    /// Characters inspected for an existing court opening.
    pub opening_scan_chars: usize,
    /// Evidence tokens must be longer than this many characters to count.
    pub evidence_min_token_chars: usize,
    /// Court style used when a court-mode caller names none.
    pub fallback_court_style: CourtStyle,
    /// Filing type used when a court-mode caller names none.
    pub fallback_filing_type: FilingType,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            sentence_window_chars: 300,
            matched_text_limit: 160,
            opening_scan_chars: 200,
            evidence_min_token_chars: 4,
            fallback_court_style: CourtContext::FALLBACK.style,
            fallback_filing_type: CourtContext::FALLBACK.filing,
        }
    }
}

impl GateConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: GateConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject values that would make the gate degenerate.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.sentence_window_chars == 0 {
            return Err(ConfigError::Invalid {
                field: "sentence_window_chars",
                message: "must be at least 1".into(),
            });
        }
        if self.matched_text_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "matched_text_limit",
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn fallback_court(&self) -> CourtContext {
        CourtContext::new(self.fallback_court_style, self.fallback_filing_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GateConfig::default();
        assert_eq!(config.sentence_window_chars, 300);
        assert_eq!(config.evidence_min_token_chars, 4);
        assert_eq!(config.fallback_court(), CourtContext::FALLBACK);
    }

    #[test]
    fn test_defaults_as_toml() {
        let rendered = toml::to_string(&GateConfig::default()).unwrap();
        insta::assert_snapshot!(rendered, @r###"
        sentence_window_chars = 300
        matched_text_limit = 160
        opening_scan_chars = 200
        evidence_min_token_chars = 4
        fallback_court_style = "district_court"
        fallback_filing_type = "application"
        "###);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GateConfig::from_toml_str(
            r#"
            fallback_court_style = "high_court"
            fallback_filing_type = "petition"
            "#,
        )
        .unwrap();
        assert_eq!(config.fallback_court_style, CourtStyle::HighCourt);
        assert_eq!(config.fallback_filing_type, FilingType::Petition);
        assert_eq!(config.matched_text_limit, 160);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = GateConfig::from_toml_str("sentence_windw_chars = 10").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_limit_is_invalid() {
        let err = GateConfig::from_toml_str("matched_text_limit = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "matched_text_limit",
                ..
            }
        ));
        assert!(err.to_string().contains("matched_text_limit"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "opening_scan_chars = 120").unwrap();
        let config = GateConfig::load(file.path()).unwrap();
        assert_eq!(config.opening_scan_chars, 120);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GateConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
