//! Declarative pattern tables.
//!
//! Every rule is a row of data: adding a rule never touches the detection or
//! rewriting code. All patterns use bounded quantifiers over bounded character
//! classes, on top of the linear-time guarantee of the `regex` engine.

use once_cell::sync::Lazy;
use regex::Regex;
use safety_gate::{RiskCategory, RiskLevel};

/// One categorized risk pattern.
#[derive(Debug, Clone, Copy)]
pub struct RiskRule {
    pub id: &'static str,
    pub category: RiskCategory,
    pub level: RiskLevel,
    pub pattern: &'static str,
    pub rationale: &'static str,
    pub confidence: f64,
    /// Inflammatory labels only count when the sentence names someone.
    pub requires_target: bool,
}

/// One rewrite rule: a pattern and a `regex` replacement template.
#[derive(Debug, Clone, Copy)]
pub struct RewriteRule {
    pub id: &'static str,
    pub pattern: &'static str,
    pub template: &'static str,
    pub reason: &'static str,
}

#[derive(Debug)]
pub(crate) struct Compiled<R: 'static> {
    pub rule: &'static R,
    pub regex: Regex,
}

fn compile<R>(rules: &'static [R], pattern: impl Fn(&R) -> &'static str) -> Vec<Compiled<R>> {
    rules
        .iter()
        .map(|rule| Compiled {
            rule,
            regex: Regex::new(pattern(rule)).expect("Invalid rule table regex"),
        })
        .collect()
}

pub(crate) static COMPILED_RISK_RULES: Lazy<Vec<Compiled<RiskRule>>> =
    Lazy::new(|| compile(RISK_RULES, |r| r.pattern));

pub(crate) static COMPILED_REWRITE_RULES: Lazy<Vec<Compiled<RewriteRule>>> =
    Lazy::new(|| compile(REWRITE_RULES, |r| r.pattern));

/// Hedging language that already marks a statement as an allegation.
pub(crate) static ALLEGATION_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:alleged(?:ly)?|allegations?|alleges?|it\s+is\s+(?:most\s+)?(?:humbly\s+|respectfully\s+)?submitted\s+that|prima\s+facie|reportedly|purportedly|accused\s+of)\b",
    )
    .expect("Invalid allegation marker regex")
});

/// Words that force allegation framing in legal distribution modes.
pub(crate) static SEVERE_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:fraud|corruption|criminal|harassment|sabotage|torture|extortion|kidnapping|murder|bribery)\b",
    )
    .expect("Invalid severe word regex")
});

/// Openings that show a text is already addressed to a court.
pub(crate) static COURT_OPENING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:may\s+it\s+please|it\s+is\s+(?:most\s+)?(?:humbly|respectfully)\s+submitted|solemnly\s+affirm)",
    )
    .expect("Invalid court opening regex")
});

/// Returns true if `sentence` already carries allegation framing.
pub fn is_allegation_framed(sentence: &str) -> bool {
    ALLEGATION_MARKER.is_match(sentence)
}

pub const RISK_RULES: &[RiskRule] = &[
    // Unverified criminal allegations
    RiskRule {
        id: "CR01",
        category: RiskCategory::UnverifiedCriminalAllegation,
        level: RiskLevel::Critical,
        pattern: r"(?i)\b(?:committed|perpetrated|orchestrated|masterminded)\s+(?:a\s+|an\s+|the\s+)?(?:fraud|forgery|murder|theft|robbery|extortion|kidnapping|bribery|embezzlement|money\s+laundering|torture|sabotage)\b",
        rationale: "Criminal act stated as established fact",
        confidence: 0.9,
        requires_target: false,
    },
    RiskRule {
        id: "CR02",
        category: RiskCategory::UnverifiedCriminalAllegation,
        level: RiskLevel::Critical,
        pattern: r"(?i)\b(?:is|was|are|were)\s+(?:a\s+|an\s+)?(?:known\s+)?(?:criminal|murderer|thief|fraudster|extortionist|kidnapper|terrorist|smuggler|money\s+launderer)s?\b",
        rationale: "Person labelled as a criminal without a conviction on record",
        confidence: 0.85,
        requires_target: false,
    },
    RiskRule {
        id: "CR03",
        category: RiskCategory::UnverifiedCriminalAllegation,
        level: RiskLevel::High,
        pattern: r"(?i)\b(?:stole|embezzled|laundered|extorted|kidnapped|murdered|bribed|tortured|misappropriated)\b",
        rationale: "Criminal verb asserted without attribution",
        confidence: 0.75,
        requires_target: false,
    },
    RiskRule {
        id: "CR04",
        category: RiskCategory::UnverifiedCriminalAllegation,
        level: RiskLevel::High,
        pattern: r"(?i)\b(?:took|accepted|received|demanded|paid)\s+(?:a\s+|huge\s+|large\s+)?(?:bribes?|kickbacks?)\b",
        rationale: "Bribery asserted as fact",
        confidence: 0.8,
        requires_target: false,
    },
    // Institutional accusations
    RiskRule {
        id: "IN01",
        category: RiskCategory::InstitutionalAccusation,
        level: RiskLevel::High,
        pattern: r"(?i)\b(?:agency|department|ministry|police|judiciary|administration|authorities|authority|government|company|board|bank|commission|bureau|municipality|institution)\s+(?:is|was|are|were|has\s+been|have\s+been|remains)\s+(?:thoroughly\s+|deeply\s+|totally\s+|completely\s+|utterly\s+)?(?:corrupt|complicit|captured|rigged|compromised|criminal)\b",
        rationale: "Institution characterised as corrupt or complicit",
        confidence: 0.85,
        requires_target: false,
    },
    RiskRule {
        id: "IN02",
        category: RiskCategory::InstitutionalAccusation,
        level: RiskLevel::High,
        pattern: r"(?i)\b(?:corrupt|complicit|rogue|criminal)\s+(?:agency|department|ministry|police|officials?|officers?|judges?|administration|government|institution|regime|bureaucrats?)\b",
        rationale: "Officials or institution labelled corrupt",
        confidence: 0.8,
        requires_target: false,
    },
    RiskRule {
        id: "IN03",
        category: RiskCategory::InstitutionalAccusation,
        level: RiskLevel::Medium,
        pattern: r"(?i)\b(?:cover-?up|covered\s+up|whitewash(?:ed)?)\b",
        rationale: "Concealment attributed without attribution",
        confidence: 0.6,
        requires_target: false,
    },
    // Defamation
    RiskRule {
        id: "DF01",
        category: RiskCategory::Defamation,
        level: RiskLevel::High,
        pattern: r"(?i)\b(?:is|was|are|were)\s+(?:a\s+|an\s+)?(?:liar|cheat|crook|scammer|con\s+artist|charlatan|hypocrite|fraud)s?\b",
        rationale: "Inflammatory label applied to an identifiable person",
        confidence: 0.7,
        requires_target: true,
    },
    RiskRule {
        id: "DF02",
        category: RiskCategory::Defamation,
        level: RiskLevel::Medium,
        pattern: r"(?i)\b(?:dishonest|incompetent|crooked|shady|disgraced|notorious)\s+(?:man|woman|person|official|officer|businessman|businesswoman|politician|lawyer|individual)\b",
        rationale: "Disparaging characterisation of an identifiable person",
        confidence: 0.6,
        requires_target: true,
    },
    RiskRule {
        id: "DF03",
        category: RiskCategory::Defamation,
        level: RiskLevel::Medium,
        pattern: r"(?i)\b(?:everyone\s+knows|it\s+is\s+(?:common\s+knowledge|well\s+known|obvious|beyond\s+doubt))\s+that\b",
        rationale: "Unsupported assertion presented as common knowledge",
        confidence: 0.5,
        requires_target: false,
    },
    // Incitement and harassment
    RiskRule {
        id: "IH01",
        category: RiskCategory::IncitementOrHarassment,
        level: RiskLevel::High,
        pattern: r"(?i)\b(?:must|should|deserves?\s+to|ought\s+to)\s+(?:be\s+)?(?:punished|attacked|beaten|hanged|killed|destroyed|eliminated|lynched|boycotted|shamed)\b",
        rationale: "Call for action against a person or group",
        confidence: 0.8,
        requires_target: false,
    },
    RiskRule {
        id: "IH02",
        category: RiskCategory::IncitementOrHarassment,
        level: RiskLevel::High,
        pattern: r"(?i)\b(?:track|hunt|smoke)\s+(?:him|her|them)\s+(?:down|out)\b",
        rationale: "Encourages pursuit of a person",
        confidence: 0.8,
        requires_target: false,
    },
    RiskRule {
        id: "IH03",
        category: RiskCategory::IncitementOrHarassment,
        level: RiskLevel::High,
        pattern: r"(?i)\b(?:traitor|enemy\s+of\s+the\s+(?:people|state|nation)|blasphemer|agent\s+of\s+(?:the\s+)?(?:enemy|foreign\s+powers?))\b",
        rationale: "Inflammatory label capable of inciting hostility",
        confidence: 0.7,
        requires_target: true,
    },
    RiskRule {
        id: "IH04",
        category: RiskCategory::IncitementOrHarassment,
        level: RiskLevel::Medium,
        pattern: r"(?i)\b(?:harass(?:ed|es|ing)?|intimidat(?:e|ed|es|ing)|threaten(?:ed|s|ing)?)\b",
        rationale: "Harassment or intimidation asserted as fact",
        confidence: 0.6,
        requires_target: false,
    },
    // Sub judice
    RiskRule {
        id: "SJ01",
        category: RiskCategory::SubJudice,
        level: RiskLevel::Critical,
        pattern: r"(?i)\b(?:is|was|are|were)\s+(?:clearly\s+|obviously\s+|definitely\s+|undoubtedly\s+)?guilty\b",
        rationale: "Guilt asserted ahead of a judicial finding",
        confidence: 0.85,
        requires_target: false,
    },
    RiskRule {
        id: "SJ02",
        category: RiskCategory::SubJudice,
        level: RiskLevel::High,
        pattern: r"(?i)\b(?:court|judge|bench|tribunal|jury)\s+(?:will|must|should|is\s+bound\s+to|has\s+no\s+choice\s+but\s+to)\s+(?:convict|acquit|rule|decide|find|sentence)\b",
        rationale: "Outcome of proceedings prejudged",
        confidence: 0.75,
        requires_target: false,
    },
    RiskRule {
        id: "SJ03",
        category: RiskCategory::SubJudice,
        level: RiskLevel::Medium,
        pattern: r"(?i)\b(?:pending|ongoing|sub[\s-]judice)\s+(?:case|trial|proceedings?|litigation|matter|inquiry|reference)\b",
        rationale: "Commentary on a matter pending before a court",
        confidence: 0.5,
        requires_target: false,
    },
];

pub const REWRITE_RULES: &[RewriteRule] = &[
    RewriteRule {
        id: "RW01",
        pattern: r"\b(?P<name>[A-Z][a-z]{1,30}(?:\s+[A-Z][a-z]{1,30}){0,3})\s+committed\s+(?:a\s+|an\s+)?(?:fraud|forgery|embezzlement)\b",
        template: "it is alleged that ${name} engaged in irregular conduct",
        reason: "Fraud stated as fact about a named person",
    },
    RewriteRule {
        id: "RW02",
        pattern: r"(?i)\b(?P<verb>is|was|are|were)\s+(?:a\s+|an\s+)?(?:known\s+)?(?:criminal|fraudster|thief|crook|murderer|extortionist)s?\b",
        template: "${verb} alleged to have engaged in misconduct",
        reason: "Criminal label replaced with allegation",
    },
    RewriteRule {
        id: "RW03",
        pattern: r"(?i)\b(?:stole|embezzled|misappropriated|siphoned\s+off)\b",
        template: "is alleged to have misappropriated",
        reason: "Theft asserted as fact",
    },
    RewriteRule {
        id: "RW04",
        pattern: r"(?i)\b(?:took|accepted|received|demanded)\s+(?:a\s+|huge\s+|large\s+)?(?:bribes?|kickbacks?)\b",
        template: "is alleged to have received improper payments",
        reason: "Bribery asserted as fact",
    },
    RewriteRule {
        id: "RW05",
        pattern: r"(?i)\b(?P<verb>is|was|are|were)\s+(?:clearly\s+|obviously\s+|definitely\s+|undoubtedly\s+)?guilty\b",
        template: "${verb} accused",
        reason: "Guilt prejudged ahead of a judicial finding",
    },
    RewriteRule {
        id: "RW06",
        pattern: r"(?i)\b(?:corrupt|crooked|rogue)\s+(?P<who>officials?|officers?|judges?|police|bureaucrats?)\b",
        template: "${who} whose conduct is in question",
        reason: "Corruption label applied to officials",
    },
    RewriteRule {
        id: "RW07",
        pattern: r"(?i)\b(?:liar|cheat|crook|scammer|con\s+artist|charlatan)\b",
        template: "person whose account is disputed",
        reason: "Inflammatory personal label",
    },
    RewriteRule {
        id: "RW08",
        pattern: r"(?i)\beveryone\s+knows\s+that\b",
        template: "it has been asserted that",
        reason: "Unsupported assertion presented as common knowledge",
    },
];
