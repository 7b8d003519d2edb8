//! CSAF `document` section structures.

use super::{CsafProductTree, CsafVulnerability};
use serde::{Deserialize, Serialize};

/// A CSAF 2.0 document, restricted to the sections the editor round-trips.
///
/// Every struct in this module deserializes leniently: missing fields take
/// their defaults, while present fields of the wrong JSON type fail decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafDocument {
    pub document: CsafDocumentMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_tree: Option<CsafProductTree>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vulnerabilities: Vec<CsafVulnerability>,
}

/// The `document` object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafDocumentMeta {
    pub category: String,
    pub csaf_version: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<CsafDistribution>,
    pub publisher: CsafPublisher,
    pub tracking: CsafTracking,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<CsafNote>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<CsafReference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub acknowledgments: Vec<CsafAcknowledgment>,
}

/// `document.distribution`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafDistribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tlp: Option<CsafTlp>,
}

/// `document.distribution.tlp`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafTlp {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// `document.publisher`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafPublisher {
    pub category: String,
    pub name: String,
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuing_authority: Option<String>,
}

/// `document.tracking`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafTracking {
    pub id: String,
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub initial_release_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub current_release_date: String,
    pub revision_history: Vec<CsafRevision>,
}

/// Entry of `document.tracking.revision_history`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafRevision {
    pub date: String,
    pub number: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_version: Option<String>,
}

/// A note in `document.notes` or `vulnerabilities[].notes`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafNote {
    pub category: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

/// A reference in `document.references`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub summary: String,
    pub url: String,
}

/// An acknowledgment in `document.acknowledgments`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafAcknowledgment {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
}
