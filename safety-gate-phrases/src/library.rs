//! The phrase library: default boilerplate with per-(court, filing) overrides.
//!
//! Resolution is a flat two-level merge. Every (style, filing) pair starts from
//! the default set; if an override is registered for exactly that pair, the
//! keys it defines replace the defaults and every other key keeps its default
//! alternatives. Resolution is total over the enumerated axes.
//!
//! # Example
//!
//! ```
//! use safety_gate::{CourtStyle, FilingType};
//! use safety_gate_phrases::{PhraseKey, PhraseLibrary};
//!
//! let library = PhraseLibrary::builtin();
//! let opening = library.first_phrase(CourtStyle::HighCourt, FilingType::Petition, PhraseKey::SubmissionOpen);
//! assert!(opening.starts_with("May it please"));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use once_cell::sync::Lazy;
use safety_gate::{CourtContext, CourtStyle, FilingType};
use serde::{Deserialize, Serialize};

/// Keys of the canonical phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseKey {
    /// Opening line of a court submission.
    SubmissionOpen,
    /// Lead-in used when reframing a statement as an allegation.
    AllegationPrefix,
    NoJudicialDetermination,
    DataLimitations,
    Methodology,
    /// Note announcing the list-of-dates appendix.
    LodAppendix,
    KeyIssuesAppendix,
    ClosingPrayer,
}

impl PhraseKey {
    pub const ALL: [PhraseKey; 8] = [
        PhraseKey::SubmissionOpen,
        PhraseKey::AllegationPrefix,
        PhraseKey::NoJudicialDetermination,
        PhraseKey::DataLimitations,
        PhraseKey::Methodology,
        PhraseKey::LodAppendix,
        PhraseKey::KeyIssuesAppendix,
        PhraseKey::ClosingPrayer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PhraseKey::SubmissionOpen => "submission_open",
            PhraseKey::AllegationPrefix => "allegation_prefix",
            PhraseKey::NoJudicialDetermination => "no_judicial_determination",
            PhraseKey::DataLimitations => "data_limitations",
            PhraseKey::Methodology => "methodology",
            PhraseKey::LodAppendix => "lod_appendix",
            PhraseKey::KeyIssuesAppendix => "key_issues_appendix",
            PhraseKey::ClosingPrayer => "closing_prayer",
        }
    }
}

impl fmt::Display for PhraseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alternative wordings per key. The first alternative is canonical.
pub type PhraseSet = BTreeMap<PhraseKey, Vec<String>>;

static BUILTIN: Lazy<PhraseLibrary> = Lazy::new(PhraseLibrary::standard);

/// Default phrases plus sparse overrides keyed by (court style, filing type).
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseLibrary {
    defaults: PhraseSet,
    overrides: HashMap<CourtContext, PhraseSet>,
}

impl Default for PhraseLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

impl PhraseLibrary {
    /// The process-wide built-in library, built on first use.
    pub fn builtin() -> &'static PhraseLibrary {
        &BUILTIN
    }

    /// A fresh copy of the built-in phrases, for callers that layer their own
    /// overrides on top.
    pub fn standard() -> Self {
        let mut library = Self::with_defaults(default_phrases());
        for (style, filing, key, phrases) in STANDARD_OVERRIDES {
            library.set_override(
                CourtContext::new(*style, *filing),
                *key,
                phrases.iter().map(|p| p.to_string()).collect(),
            );
        }
        library
    }

    /// A library with the given defaults and no overrides.
    pub fn with_defaults(defaults: PhraseSet) -> Self {
        Self {
            defaults,
            overrides: HashMap::new(),
        }
    }

    /// Replace the default alternatives for `key`.
    pub fn set_default(&mut self, key: PhraseKey, phrases: Vec<String>) {
        self.defaults.insert(key, phrases);
    }

    /// Register (or replace) the alternatives for `key` under `context`.
    pub fn set_override(&mut self, context: CourtContext, key: PhraseKey, phrases: Vec<String>) {
        self.overrides
            .entry(context)
            .or_default()
            .insert(key, phrases);
    }

    pub fn defaults(&self) -> &PhraseSet {
        &self.defaults
    }

    /// Whether a dedicated override exists for this exact pair.
    pub fn has_entry(&self, style: CourtStyle, filing: FilingType) -> bool {
        self.overrides
            .contains_key(&CourtContext::new(style, filing))
    }

    /// Defaults merged with the override for exactly `(style, filing)`.
    pub fn resolve(&self, style: CourtStyle, filing: FilingType) -> PhraseSet {
        let mut resolved = self.defaults.clone();
        if let Some(layer) = self.overrides.get(&CourtContext::new(style, filing)) {
            for (key, phrases) in layer {
                resolved.insert(*key, phrases.clone());
            }
        }
        resolved
    }

    /// Resolve with missing axes filled from `fallback`.
    ///
    /// Returns the pair actually used alongside the merged phrase set.
    pub fn resolve_or_fallback(
        &self,
        style: Option<CourtStyle>,
        filing: Option<FilingType>,
        fallback: CourtContext,
    ) -> (CourtContext, PhraseSet) {
        let (context, filled) = CourtContext::from_parts(style, filing, fallback);
        if filled {
            tracing::debug!(
                style = context.style.as_str(),
                filing = context.filing.as_str(),
                "court pair not fully specified, using fallback"
            );
        }
        (context, self.resolve(context.style, context.filing))
    }

    /// All alternatives for one key under `(style, filing)`.
    pub fn alternatives(&self, style: CourtStyle, filing: FilingType, key: PhraseKey) -> &[String] {
        self.overrides
            .get(&CourtContext::new(style, filing))
            .and_then(|layer| layer.get(&key))
            .or_else(|| self.defaults.get(&key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The canonical (first) alternative for `key` under `(style, filing)`.
    pub fn first_phrase(&self, style: CourtStyle, filing: FilingType, key: PhraseKey) -> String {
        self.alternatives(style, filing, key)
            .first()
            .cloned()
            .unwrap_or_default()
    }

    /// Keys with no default alternative. Empty for a well-formed library.
    pub fn missing_defaults(&self) -> Vec<PhraseKey> {
        PhraseKey::ALL
            .iter()
            .copied()
            .filter(|key| self.defaults.get(key).map_or(true, |v| v.is_empty()))
            .collect()
    }

    pub(crate) fn overrides_mut(&mut self) -> &mut HashMap<CourtContext, PhraseSet> {
        &mut self.overrides
    }
}

fn default_phrases() -> PhraseSet {
    DEFAULT_PHRASES
        .iter()
        .map(|(key, phrases)| (*key, phrases.iter().map(|p| p.to_string()).collect()))
        .collect()
}

const DEFAULT_PHRASES: &[(PhraseKey, &[&str])] = &[
    (
        PhraseKey::SubmissionOpen,
        &[
            "It is respectfully submitted as follows:",
            "May it please this Honourable Court:",
        ],
    ),
    (
        PhraseKey::AllegationPrefix,
        &["It is alleged that", "It is the case of the applicant that"],
    ),
    (
        PhraseKey::NoJudicialDetermination,
        &["Nothing in this document constitutes a judicial determination of guilt or liability. \
           Statements concerning identifiable persons are allegations unless and until proven \
           before a competent forum."],
    ),
    (
        PhraseKey::DataLimitations,
        &["This document is compiled from sources available at the time of preparation. \
           Those sources may be incomplete, contested or subsequently revised."],
    ),
    (
        PhraseKey::Methodology,
        &["Narrative text was screened by a rule-based safety gate for defamation, sub-judice \
           and privacy risk. Flagged passages were reframed as allegations and personal data \
           was redacted before inclusion."],
    ),
    (
        PhraseKey::LodAppendix,
        &["A list of dates setting out the chronology relied upon is annexed to this document."],
    ),
    (
        PhraseKey::KeyIssuesAppendix,
        &["The key issues arising for determination are set out in the annexed schedule."],
    ),
    (
        PhraseKey::ClosingPrayer,
        &["It is therefore respectfully prayed that the relief sought may graciously be granted."],
    ),
];

type OverrideRow = (CourtStyle, FilingType, PhraseKey, &'static [&'static str]);

const STANDARD_OVERRIDES: &[OverrideRow] = &[
    (
        CourtStyle::SupremeCourt,
        FilingType::Petition,
        PhraseKey::SubmissionOpen,
        &["May it please this Honourable Court, the Petitioner most respectfully submits as under:"],
    ),
    (
        CourtStyle::SupremeCourt,
        FilingType::Petition,
        PhraseKey::ClosingPrayer,
        &["It is therefore most respectfully prayed that this Honourable Court may be pleased \
           to accept this petition and grant the relief sought."],
    ),
    (
        CourtStyle::HighCourt,
        FilingType::Petition,
        PhraseKey::SubmissionOpen,
        &["May it please this Honourable Court, the Petitioner respectfully submits as follows:"],
    ),
    (
        CourtStyle::HighCourt,
        FilingType::WrittenStatement,
        PhraseKey::SubmissionOpen,
        &["It is respectfully submitted on behalf of the Respondent as under:"],
    ),
    (
        CourtStyle::HighCourt,
        FilingType::Affidavit,
        PhraseKey::SubmissionOpen,
        &["I, the deponent above named, do hereby solemnly affirm and declare as under:"],
    ),
    (
        CourtStyle::DistrictCourt,
        FilingType::Application,
        PhraseKey::SubmissionOpen,
        &["It is respectfully submitted on behalf of the Applicant as follows:"],
    ),
    (
        CourtStyle::DistrictCourt,
        FilingType::Complaint,
        PhraseKey::SubmissionOpen,
        &["It is humbly submitted by the Complainant as follows:"],
    ),
    (
        CourtStyle::DistrictCourt,
        FilingType::Complaint,
        PhraseKey::AllegationPrefix,
        &["The Complainant alleges that"],
    ),
    (
        CourtStyle::SpecialTribunal,
        FilingType::Application,
        PhraseKey::SubmissionOpen,
        &["May it please the Learned Tribunal:"],
    ),
    (
        CourtStyle::SpecialTribunal,
        FilingType::Application,
        PhraseKey::NoJudicialDetermination,
        &["Nothing in this application constitutes a finding of this Tribunal or of any court. \
           Statements concerning identifiable persons are allegations unless and until proven."],
    ),
];
