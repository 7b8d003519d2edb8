//! Direct field mappings between document-level records and their wire form.
//!
//! Nothing here depends on the product tree. Editing records that have no
//! identifier on the wire get a fresh [`EntityId`] on import.

use crate::csaf::{
    CsafAcknowledgment, CsafCwe, CsafDistribution, CsafDocumentMeta, CsafNote, CsafPublisher,
    CsafReference, CsafRevision, CsafTlp, CsafTracking,
};
use crate::model::{
    Acknowledgment, AcknowledgmentName, AcknowledgmentUrl, Cwe, DocumentInformation, EntityId,
    Note, NoteCategory, Publisher, Reference, ReferenceCategory, RevisionHistoryEntry, Tlp,
    TrackingStatus,
};

// ============================================================================
// Notes
// ============================================================================

impl From<&Note> for CsafNote {
    fn from(note: &Note) -> Self {
        Self {
            category: note.category.as_wire().to_string(),
            text: note.content.clone(),
            title: note.title.clone(),
            audience: note.audience.clone(),
        }
    }
}

impl From<&CsafNote> for Note {
    fn from(note: &CsafNote) -> Self {
        Self {
            id: EntityId::fresh(),
            category: NoteCategory::from_wire(&note.category),
            title: note.title.clone(),
            content: note.text.clone(),
            audience: note.audience.clone(),
        }
    }
}

// ============================================================================
// References
// ============================================================================

impl From<&Reference> for CsafReference {
    fn from(reference: &Reference) -> Self {
        Self {
            category: Some(reference.category.as_wire().to_string()),
            summary: reference.summary.clone(),
            url: reference.url.clone(),
        }
    }
}

impl From<&CsafReference> for Reference {
    fn from(reference: &CsafReference) -> Self {
        Self {
            id: EntityId::fresh(),
            category: reference
                .category
                .as_deref()
                .map(ReferenceCategory::from_wire)
                .unwrap_or_default(),
            summary: reference.summary.clone(),
            url: reference.url.clone(),
        }
    }
}

// ============================================================================
// Acknowledgments
// ============================================================================

impl From<&Acknowledgment> for CsafAcknowledgment {
    fn from(ack: &Acknowledgment) -> Self {
        Self {
            names: ack.names.iter().map(|n| n.name.clone()).collect(),
            organization: ack.organization.clone(),
            summary: ack.summary.clone(),
            urls: ack.urls.iter().map(|u| u.url.clone()).collect(),
        }
    }
}

impl From<&CsafAcknowledgment> for Acknowledgment {
    fn from(ack: &CsafAcknowledgment) -> Self {
        Self {
            id: EntityId::fresh(),
            names: ack
                .names
                .iter()
                .map(|name| AcknowledgmentName {
                    id: EntityId::fresh(),
                    name: name.clone(),
                })
                .collect(),
            organization: ack.organization.clone(),
            summary: ack.summary.clone(),
            urls: ack
                .urls
                .iter()
                .map(|url| AcknowledgmentUrl {
                    id: EntityId::fresh(),
                    url: url.clone(),
                })
                .collect(),
        }
    }
}

// ============================================================================
// Revision history
// ============================================================================

impl From<&RevisionHistoryEntry> for CsafRevision {
    fn from(entry: &RevisionHistoryEntry) -> Self {
        Self {
            date: entry.date.clone(),
            number: entry.number.clone(),
            summary: entry.summary.clone(),
            legacy_version: entry.legacy_version.clone(),
        }
    }
}

impl From<&CsafRevision> for RevisionHistoryEntry {
    fn from(entry: &CsafRevision) -> Self {
        Self {
            id: EntityId::fresh(),
            date: entry.date.clone(),
            number: entry.number.clone(),
            summary: entry.summary.clone(),
            legacy_version: entry.legacy_version.clone(),
        }
    }
}

// ============================================================================
// Publisher and CWE
// ============================================================================

impl From<&Publisher> for CsafPublisher {
    fn from(publisher: &Publisher) -> Self {
        Self {
            category: publisher.category.clone(),
            name: publisher.name.clone(),
            namespace: publisher.namespace.clone(),
            contact_details: publisher.contact_details.clone(),
            issuing_authority: publisher.issuing_authority.clone(),
        }
    }
}

impl From<&CsafPublisher> for Publisher {
    fn from(publisher: &CsafPublisher) -> Self {
        Self {
            category: publisher.category.clone(),
            name: publisher.name.clone(),
            namespace: publisher.namespace.clone(),
            contact_details: publisher.contact_details.clone(),
            issuing_authority: publisher.issuing_authority.clone(),
        }
    }
}

impl From<&Cwe> for CsafCwe {
    fn from(cwe: &Cwe) -> Self {
        Self {
            id: cwe.id.clone(),
            name: cwe.name.clone(),
        }
    }
}

impl From<&CsafCwe> for Cwe {
    fn from(cwe: &CsafCwe) -> Self {
        Self {
            id: cwe.id.clone(),
            name: cwe.name.clone(),
        }
    }
}

// ============================================================================
// Document information
// ============================================================================

/// Map document information to the CSAF `document` section.
///
/// `fallback_version` is written when the model names no CSAF version.
pub fn document_meta(info: &DocumentInformation, fallback_version: &str) -> CsafDocumentMeta {
    let csaf_version = if info.csaf_version.is_empty() {
        fallback_version.to_string()
    } else {
        info.csaf_version.clone()
    };

    let distribution = match (&info.distribution_text, &info.tlp) {
        (None, None) => None,
        (text, tlp) => Some(CsafDistribution {
            text: text.clone(),
            tlp: tlp.as_ref().map(|tlp| CsafTlp {
                label: tlp.label.clone(),
                url: tlp.url.clone(),
            }),
        }),
    };

    CsafDocumentMeta {
        category: info.category.clone(),
        csaf_version,
        title: info.title.clone(),
        lang: info.lang.clone(),
        source_lang: info.source_lang.clone(),
        distribution,
        publisher: CsafPublisher::from(&info.publisher),
        tracking: CsafTracking {
            id: info.id.clone(),
            status: info.status.as_wire().to_string(),
            version: info.version.clone(),
            initial_release_date: info.initial_release_date.clone().unwrap_or_default(),
            current_release_date: info.current_release_date.clone().unwrap_or_default(),
            revision_history: info.revision_history.iter().map(CsafRevision::from).collect(),
        },
        notes: info.notes.iter().map(CsafNote::from).collect(),
        references: info.references.iter().map(CsafReference::from).collect(),
        acknowledgments: info
            .acknowledgments
            .iter()
            .map(CsafAcknowledgment::from)
            .collect(),
    }
}

/// Map the CSAF `document` section to document information
pub fn document_information(meta: &CsafDocumentMeta) -> DocumentInformation {
    let distribution = meta.distribution.as_ref();
    let non_empty = |value: &str| (!value.is_empty()).then(|| value.to_string());

    DocumentInformation {
        id: meta.tracking.id.clone(),
        title: meta.title.clone(),
        category: if meta.category.is_empty() {
            DocumentInformation::default().category
        } else {
            meta.category.clone()
        },
        csaf_version: meta.csaf_version.clone(),
        lang: meta.lang.clone(),
        source_lang: meta.source_lang.clone(),
        status: TrackingStatus::from_wire(&meta.tracking.status),
        version: meta.tracking.version.clone(),
        initial_release_date: non_empty(&meta.tracking.initial_release_date),
        current_release_date: non_empty(&meta.tracking.current_release_date),
        tlp: distribution.and_then(|d| d.tlp.as_ref()).map(|tlp| Tlp {
            label: tlp.label.clone(),
            url: tlp.url.clone(),
        }),
        distribution_text: distribution.and_then(|d| d.text.clone()),
        publisher: Publisher::from(&meta.publisher),
        notes: meta.notes.iter().map(Note::from).collect(),
        references: meta.references.iter().map(Reference::from).collect(),
        acknowledgments: meta.acknowledgments.iter().map(Acknowledgment::from).collect(),
        revision_history: meta
            .tracking
            .revision_history
            .iter()
            .map(RevisionHistoryEntry::from)
            .collect(),
    }
}
