//! Sensitive personal data patterns and their redaction.
//!
//! The same table drives detection (always CRITICAL) and redaction, so
//! anything the detector reports is also what the rewriter removes.

use once_cell::sync::Lazy;
use regex::Regex;
use safety_gate::{RedactionTarget, RewriteTransformation};

/// Classes of personal data, in the order they are redacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonalData {
    Card,
    Cnic,
    Phone,
    Address,
}

impl PersonalData {
    /// Redaction order: card-like numbers first so their digit groups are
    /// never partly consumed by the shorter patterns.
    pub const ALL: [PersonalData; 4] = [
        PersonalData::Card,
        PersonalData::Cnic,
        PersonalData::Phone,
        PersonalData::Address,
    ];

    pub fn placeholder(&self) -> &'static str {
        match self {
            PersonalData::Card => "[REDACTED-CARD]",
            PersonalData::Cnic => "[REDACTED-CNIC]",
            PersonalData::Phone => "[REDACTED-PHONE]",
            PersonalData::Address => "[REDACTED-ADDRESS]",
        }
    }

    pub fn pattern_id(&self) -> &'static str {
        match self {
            PersonalData::Card => "PII_CARD",
            PersonalData::Cnic => "PII_CNIC",
            PersonalData::Phone => "PII_PHONE",
            PersonalData::Address => "PII_ADDRESS",
        }
    }

    pub fn rule_id(&self) -> &'static str {
        match self {
            PersonalData::Card => "REDACT_CARD",
            PersonalData::Cnic => "REDACT_CNIC",
            PersonalData::Phone => "REDACT_PHONE",
            PersonalData::Address => "REDACT_ADDRESS",
        }
    }

    pub fn rationale(&self) -> &'static str {
        match self {
            PersonalData::Card => "Card-like number in text",
            PersonalData::Cnic => "National identity number in text",
            PersonalData::Phone => "Phone number in text",
            PersonalData::Address => "Structured street address in text",
        }
    }

    pub fn target(&self) -> RedactionTarget {
        match self {
            PersonalData::Card => RedactionTarget::CardNumber,
            PersonalData::Cnic => RedactionTarget::IdentityNumber,
            PersonalData::Phone => RedactionTarget::PhoneNumber,
            PersonalData::Address => RedactionTarget::Address,
        }
    }

    pub(crate) fn regex(&self) -> &'static Regex {
        match self {
            PersonalData::Card => &CARD,
            PersonalData::Cnic => &CNIC,
            PersonalData::Phone => &PHONE,
            PersonalData::Address => &ADDRESS,
        }
    }
}

static CARD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\d{4}[ -]?){3}\d{4}\b").expect("Invalid card number regex")
});

static CNIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\d{5}-\d{7}-\d|\d{13})\b").expect("Invalid identity number regex")
});

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:\+92[ -]?|\b0)3\d{2}[ -]?\d{7}\b|\+\d{1,3}[ -]\d{2,4}[ -]\d{3,4}[ -]?\d{3,4}\b",
    )
    .expect("Invalid phone number regex")
});

static ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:house|flat|plot|apartment|apt\.?|shop)\s{0,3}(?:no\.?\s{0,3}|#\s{0,3})?\d{1,5}[a-z]?\s{0,3},?\s{0,3}(?:street|st\.?|road|lane|block|sector)\s{0,3}(?:no\.?\s{0,3}|#\s{0,3})?[a-z0-9]{1,8}\b",
    )
    .expect("Invalid address regex")
});

/// Text with personal data replaced by placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redacted {
    pub text: String,
    /// One entry per redacted occurrence, in redaction order.
    pub transformations: Vec<RewriteTransformation>,
}

/// Replace every personal-data match with its placeholder.
///
/// Placeholders contain no digits, so running this twice changes nothing the
/// second time.
pub fn redact_personal_data(text: &str) -> Redacted {
    let mut current = text.to_string();
    let mut transformations = Vec::new();

    for class in PersonalData::ALL {
        let regex = class.regex();
        let before = transformations.len();
        transformations.extend(regex.find_iter(&current).map(|m| {
            RewriteTransformation::unpositioned(
                class.rule_id(),
                m.as_str(),
                class.placeholder(),
                class.rationale(),
            )
        }));
        if transformations.len() > before {
            current = regex.replace_all(&current, class.placeholder()).into_owned();
        }
    }

    Redacted {
        text: current,
        transformations,
    }
}
