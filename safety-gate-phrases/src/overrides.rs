//! Layering phrase overrides from TOML.
//!
//! ```toml
//! [defaults]
//! data_limitations = ["Sources were limited to the public record."]
//!
//! [[overrides]]
//! style = "high_court"
//! filing = "petition"
//!
//! [overrides.phrases]
//! submission_open = ["May it please My Lords:"]
//! ```

use std::fs;
use std::path::Path;

use safety_gate::{CourtContext, CourtStyle, FilingType};
use serde::Deserialize;
use thiserror::Error;

use crate::{PhraseKey, PhraseLibrary, PhraseSet};

/// Errors that can occur while loading phrase overrides.
#[derive(Debug, Error)]
pub enum PhraseError {
    /// The override file could not be read.
    #[error("failed to read phrase overrides: {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The override file is not valid TOML for this schema.
    #[error("failed to parse phrase overrides: {0}")]
    Parse(#[from] toml::de::Error),

    /// A key was given an empty list of alternatives.
    #[error("phrase `{key}` has no alternatives ({scope})")]
    EmptyAlternatives { key: PhraseKey, scope: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverrideFile {
    #[serde(default)]
    defaults: PhraseSet,
    #[serde(default)]
    overrides: Vec<OverrideEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverrideEntry {
    style: CourtStyle,
    filing: FilingType,
    #[serde(default)]
    phrases: PhraseSet,
}

impl PhraseLibrary {
    /// Layer defaults and overrides from a TOML document onto this library.
    ///
    /// The document is validated in full before anything is applied, so a
    /// failed load leaves the library unchanged.
    pub fn extend_from_toml(&mut self, content: &str) -> Result<(), PhraseError> {
        let file: OverrideFile = toml::from_str(content)?;

        check_alternatives(&file.defaults, "defaults")?;
        for entry in &file.overrides {
            check_alternatives(
                &entry.phrases,
                &format!("{}/{}", entry.style.as_str(), entry.filing.as_str()),
            )?;
        }

        for (key, phrases) in file.defaults {
            self.set_default(key, phrases);
        }
        for entry in file.overrides {
            let layer = self
                .overrides_mut()
                .entry(CourtContext::new(entry.style, entry.filing))
                .or_default();
            layer.extend(entry.phrases);
        }
        Ok(())
    }

    /// The built-in library with overrides loaded from a TOML file.
    pub fn load_with_overrides(path: &Path) -> Result<Self, PhraseError> {
        let content = fs::read_to_string(path).map_err(|source| PhraseError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut library = Self::standard();
        library.extend_from_toml(&content)?;
        Ok(library)
    }
}

fn check_alternatives(set: &PhraseSet, scope: &str) -> Result<(), PhraseError> {
    match set.iter().find(|(_, phrases)| phrases.iter().all(|p| p.trim().is_empty())) {
        Some((key, _)) => Err(PhraseError::EmptyAlternatives {
            key: *key,
            scope: scope.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[defaults]
data_limitations = ["Sources were limited to the public record."]

[[overrides]]
style = "high_court"
filing = "petition"

[overrides.phrases]
closing_prayer = ["Prayed accordingly."]

[[overrides]]
style = "supreme_court"
filing = "complaint"

[overrides.phrases]
submission_open = ["May it please My Lords:"]
"#;

    #[test]
    fn test_extend_merges_keys() {
        let mut library = PhraseLibrary::standard();
        library.extend_from_toml(SAMPLE).unwrap();

        // new key merged into an existing override layer
        assert_eq!(
            library.first_phrase(CourtStyle::HighCourt, FilingType::Petition, PhraseKey::ClosingPrayer),
            "Prayed accordingly."
        );
        // existing key of that layer survives
        assert!(library
            .first_phrase(CourtStyle::HighCourt, FilingType::Petition, PhraseKey::SubmissionOpen)
            .starts_with("May it please this Honourable Court"));
        // new layer
        assert_eq!(
            library.first_phrase(CourtStyle::SupremeCourt, FilingType::Complaint, PhraseKey::SubmissionOpen),
            "May it please My Lords:"
        );
        // default replaced for every pair without its own entry
        assert_eq!(
            library.first_phrase(CourtStyle::DistrictCourt, FilingType::Affidavit, PhraseKey::DataLimitations),
            "Sources were limited to the public record."
        );
    }

    #[test]
    fn test_empty_alternatives_rejected_without_partial_apply() {
        let mut library = PhraseLibrary::standard();
        let before = library.clone();
        let err = library
            .extend_from_toml(
                r#"
[defaults]
methodology = ["Replaced."]

[[overrides]]
style = "high_court"
filing = "affidavit"

[overrides.phrases]
submission_open = []
"#,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            PhraseError::EmptyAlternatives {
                key: PhraseKey::SubmissionOpen,
                ..
            }
        ));
        assert_eq!(err.to_string(), "phrase `submission_open` has no alternatives (high_court/affidavit)");
        assert_eq!(library, before);
    }

    #[test]
    fn test_unknown_phrase_key_is_a_parse_error() {
        let mut library = PhraseLibrary::standard();
        let err = library
            .extend_from_toml("[defaults]\nopening_flourish = [\"Hear ye\"]\n")
            .unwrap_err();
        assert!(matches!(err, PhraseError::Parse(_)));
    }

    #[test]
    fn test_load_with_overrides_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let library = PhraseLibrary::load_with_overrides(file.path()).unwrap();
        assert!(library.has_entry(CourtStyle::SupremeCourt, FilingType::Complaint));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PhraseLibrary::load_with_overrides(&dir.path().join("phrases.toml")).unwrap_err();
        assert!(matches!(err, PhraseError::Read { .. }));
    }
}
