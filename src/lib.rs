//! **Bidirectional transformation between a flat advisory editing model and CSAF 2.0.**
//!
//! `csaf-bridge` converts security advisories between two shapes:
//!
//! - the **editing model** ([`EditingModel`]), a flat set of independently
//!   addressable records (product branches, product families, relationships,
//!   vulnerabilities) suited to form-based editing;
//! - the **CSAF 2.0 wire document** ([`CsafDocument`]), with its nested
//!   `product_tree`, product family wrapper branches and `product_id`
//!   cross-references.
//!
//! The library performs no I/O. Callers hand in parsed JSON values or text and
//! receive serializable values back.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The editing model, the product family arena and the
//!   per-pass [`IdCache`].
//! - **[`csaf`]**: Serde structures mirroring the CSAF JSON sections, plus
//!   confidence-scored shape detection.
//! - **[`transform`]**: The engine. [`DocumentAssembler`] drives the product
//!   tree linearizer, tree builder, family chain codec and reference resolver.
//! - **[`config`]**: [`TransformConfig`] with defaults for names, product ID
//!   prefix and CSAF version.
//!
//! ## Getting Started
//!
//! ```
//! use csaf_bridge::{import_document_str, DocumentAssembler};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let text = r#"{
//!         "document": {"csaf_version": "2.0", "tracking": {"id": "ACME-2024-001"}},
//!         "product_tree": {"branches": [{
//!             "category": "vendor", "name": "Acme",
//!             "branches": [{
//!                 "category": "product_name", "name": "Widget",
//!                 "branches": [{
//!                     "category": "product_version", "name": "1.0",
//!                     "product": {"name": "Acme Widget 1.0", "product_id": "CSAFPID-1"}
//!                 }]
//!             }]
//!         }]}
//!     }"#;
//!
//!     let imported = import_document_str(text)?.expect("a CSAF document");
//!     assert_eq!(imported.model.version_count(), 1);
//!
//!     // Re-export with the product IDs the document came in with
//!     let exported = DocumentAssembler::new()
//!         .export_seeded(&imported.model, imported.export_seed());
//!     let json = serde_json::to_value(&exported.document)?;
//!     assert_eq!(
//!         json["product_tree"]["branches"][0]["branches"][0]["branches"][0]["product"]["product_id"],
//!         "CSAFPID-1"
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Dangling references
//!
//! Editing sessions routinely delete products that are still referenced
//! elsewhere. Export never fails on such references: they are left out of the
//! document and counted in [`transform::DroppedReferences`].

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Variable names like `product`/`products` are clear in context
    clippy::similar_names
)]

pub mod config;
pub mod csaf;
pub mod error;
pub mod model;
pub mod transform;

// Re-export main types for convenience
pub use config::{ConfigError, ExportConfig, ImportConfig, TransformConfig, Validatable};
pub use csaf::{detect, is_csaf_document, CsafDocument};
pub use error::{CsafBridgeError, ErrorContext, Result};
pub use model::{EditingModel, EntityId, IdCache, ProductFamilies, ProductTreeBranch};
pub use transform::{
    export_document_string, import_document_str, DocumentAssembler, DroppedReferences,
    ExportOutcome, ImportOutcome,
};
