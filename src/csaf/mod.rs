//! CSAF 2.0 wire structures.
//!
//! Serde mirrors of the CSAF JSON sections the editor round-trips:
//! `document` (tracking, publisher, notes, references, acknowledgments),
//! `product_tree` (branches, relationships) and `vulnerabilities`. Field
//! names match the CSAF schema exactly. Categories are kept as strings on
//! this side; [`crate::model`] owns the typed variants.
//!
//! ```
//! use csaf_bridge::csaf::{detect, CsafDocument};
//!
//! let value = serde_json::json!({
//!     "document": {"csaf_version": "2.0", "tracking": {"id": "T1"}}
//! });
//! assert!(detect(&value).can_import());
//! let doc: CsafDocument = serde_json::from_value(value).unwrap();
//! assert_eq!(doc.document.tracking.id, "T1");
//! ```

mod detection;
mod document;
mod product_tree;
mod vulnerability;

pub use detection::{
    detect, is_csaf_document, CsafDetection, FormatConfidence, SUPPORTED_VERSIONS,
};
pub use document::*;
pub use product_tree::*;
pub use vulnerability::*;
