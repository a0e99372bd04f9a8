//! Optional context supplied by the entity and evidence stores.

use serde::{Deserialize, Serialize};

/// A named entity known to the case file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub name: String,
    /// Free-form category from the entity store (person, organization, ...).
    #[serde(default)]
    pub category: String,
}

impl NamedEntity {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}

/// An indexed evidence artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceArtifact {
    pub id: String,
    /// Searchable value: a title, description or extracted text.
    pub value: String,
}

impl EvidenceArtifact {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Context supplied alongside the text to be gated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateContext {
    #[serde(default)]
    pub entities: Vec<NamedEntity>,
    #[serde(default)]
    pub evidence_artifacts: Vec<EvidenceArtifact>,
}

impl GateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, name: impl Into<String>, category: impl Into<String>) -> Self {
        self.entities.push(NamedEntity::new(name, category));
        self
    }

    pub fn with_evidence(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.evidence_artifacts.push(EvidenceArtifact::new(id, value));
        self
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities
            .iter()
            .map(|entity| entity.name.trim())
            .filter(|name| !name.is_empty())
    }
}
