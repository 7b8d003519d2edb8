//! Document-level records of the editing model.
//!
//! These map one-to-one onto CSAF `document` fields; only the naming and a few
//! array-of-string vs array-of-record shapes differ.

use super::EntityId;
use serde::{Deserialize, Serialize};

/// Document-level information edited in the wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentInformation {
    /// `tracking.id`
    pub id: String,
    pub title: String,
    /// CSAF document category (`csaf_base`, `csaf_security_advisory`, ...)
    pub category: String,
    pub csaf_version: String,
    pub lang: Option<String>,
    pub source_lang: Option<String>,
    pub status: TrackingStatus,
    /// `tracking.version`
    pub version: String,
    pub initial_release_date: Option<String>,
    pub current_release_date: Option<String>,
    pub tlp: Option<Tlp>,
    pub distribution_text: Option<String>,
    pub publisher: Publisher,
    pub notes: Vec<Note>,
    pub references: Vec<Reference>,
    pub acknowledgments: Vec<Acknowledgment>,
    pub revision_history: Vec<RevisionHistoryEntry>,
}

impl Default for DocumentInformation {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            category: "csaf_base".to_string(),
            csaf_version: String::new(),
            lang: None,
            source_lang: None,
            status: TrackingStatus::Draft,
            version: String::new(),
            initial_release_date: None,
            current_release_date: None,
            tlp: None,
            distribution_text: None,
            publisher: Publisher::default(),
            notes: Vec::new(),
            references: Vec::new(),
            acknowledgments: Vec::new(),
            revision_history: Vec::new(),
        }
    }
}

/// `tracking.status`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStatus {
    #[default]
    Draft,
    Interim,
    Final,
    Other(String),
}

impl TrackingStatus {
    /// Parse a CSAF status value
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "draft" | "" => Self::Draft,
            "interim" => Self::Interim,
            "final" => Self::Final,
            other => Self::Other(other.to_string()),
        }
    }

    /// CSAF status value
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Interim => "interim",
            Self::Final => "final",
            Self::Other(s) => s,
        }
    }
}

/// Traffic Light Protocol marking from `distribution.tlp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tlp {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Publisher of the document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Publisher {
    /// `coordinator`, `discoverer`, `other`, `translator`, `user` or `vendor`
    pub category: String,
    pub name: String,
    pub namespace: String,
    pub contact_details: Option<String>,
    pub issuing_authority: Option<String>,
}

/// CSAF note category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteCategory {
    Description,
    Details,
    Faq,
    #[default]
    General,
    LegalDisclaimer,
    Other,
    Summary,
    Unknown(String),
}

impl NoteCategory {
    /// Parse a CSAF note category
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "description" => Self::Description,
            "details" => Self::Details,
            "faq" => Self::Faq,
            "general" => Self::General,
            "legal_disclaimer" => Self::LegalDisclaimer,
            "other" => Self::Other,
            "summary" => Self::Summary,
            unknown => Self::Unknown(unknown.to_string()),
        }
    }

    /// CSAF note category value
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Description => "description",
            Self::Details => "details",
            Self::Faq => "faq",
            Self::General => "general",
            Self::LegalDisclaimer => "legal_disclaimer",
            Self::Other => "other",
            Self::Summary => "summary",
            Self::Unknown(s) => s,
        }
    }
}

/// A note attached to the document or a vulnerability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: EntityId,
    pub category: NoteCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// CSAF `text`
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

impl Note {
    /// Create a note with a fresh id
    pub fn new(category: NoteCategory, content: impl Into<String>) -> Self {
        Self {
            id: EntityId::fresh(),
            category,
            title: None,
            content: content.into(),
            audience: None,
        }
    }
}

/// CSAF reference category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceCategory {
    #[default]
    External,
    #[serde(rename = "self")]
    SelfRef,
}

impl ReferenceCategory {
    /// Parse a CSAF reference category, treating unknown values as external
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        if value == "self" {
            Self::SelfRef
        } else {
            Self::External
        }
    }

    /// CSAF reference category value
    #[must_use]
    pub const fn as_wire(&self) -> &'static str {
        match self {
            Self::External => "external",
            Self::SelfRef => "self",
        }
    }
}

/// A reference to an external resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub id: EntityId,
    #[serde(default)]
    pub category: ReferenceCategory,
    #[serde(default)]
    pub summary: String,
    pub url: String,
}

/// Acknowledgment of contributors.
///
/// CSAF stores `names` and `urls` as plain string arrays; the editor needs each
/// entry individually addressable, so they become records with ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgment {
    pub id: EntityId,
    #[serde(default)]
    pub names: Vec<AcknowledgmentName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub urls: Vec<AcknowledgmentUrl>,
}

/// One acknowledged name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcknowledgmentName {
    pub id: EntityId,
    pub name: String,
}

/// One acknowledgment URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcknowledgmentUrl {
    pub id: EntityId,
    pub url: String,
}

/// Entry of `tracking.revision_history`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionHistoryEntry {
    pub id: EntityId,
    pub date: String,
    pub number: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_category_round_trips_unknown_values() {
        assert_eq!(NoteCategory::from_wire("faq"), NoteCategory::Faq);
        let unknown = NoteCategory::from_wire("threat_model");
        assert_eq!(unknown.as_wire(), "threat_model");
    }

    #[test]
    fn reference_category_self() {
        assert_eq!(ReferenceCategory::from_wire("self"), ReferenceCategory::SelfRef);
        assert_eq!(ReferenceCategory::SelfRef.as_wire(), "self");
        assert_eq!(ReferenceCategory::from_wire("weird"), ReferenceCategory::External);
    }

    #[test]
    fn tracking_status_defaults_to_draft() {
        assert_eq!(TrackingStatus::from_wire(""), TrackingStatus::Draft);
        assert_eq!(TrackingStatus::from_wire("final").as_wire(), "final");
    }

    #[test]
    fn publisher_uses_camel_case_fields() {
        let publisher = Publisher {
            contact_details: Some("psirt@example.com".to_string()),
            ..Publisher::default()
        };
        let json = serde_json::to_value(&publisher).unwrap();
        assert_eq!(json["contactDetails"], "psirt@example.com");
    }
}
