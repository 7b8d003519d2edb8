//! Transformation engine between the editing model and CSAF documents.
//!
//! Export order within one pass:
//! 1. [`ProductTreeLinearizer`] turns the product forest into CSAF branches,
//!    wrapping products in their family chains and minting product IDs.
//! 2. [`ReferenceResolver`] maps relationships, then vulnerabilities, onto
//!    the product IDs minted in step 1.
//!
//! Import mirrors this with [`ProductTreeBuilder`] before the resolver.
//! [`DocumentAssembler`] drives both and adds the document-level fields.
//!
//! ```
//! use csaf_bridge::transform::DocumentAssembler;
//!
//! let assembler = DocumentAssembler::new();
//! let imported = assembler
//!     .import_str(r#"{"document": {"csaf_version": "2.0", "tracking": {"id": "T1"}}}"#)
//!     .unwrap()
//!     .expect("CSAF document");
//! assert_eq!(imported.model.document_information.id, "T1");
//!
//! let exported = assembler.export(&imported.model);
//! assert_eq!(exported.document.document.tracking.id, "T1");
//! ```

mod assembler;
mod builder;
mod family_chain;
mod fields;
mod linearizer;
mod references;

pub use assembler::{DocumentAssembler, ExportOutcome, ImportOutcome};
pub use builder::{BuiltProductTree, ProductTreeBuilder};
pub use family_chain::{attach_family, extract_families, ExtractedFamilies, TaggedBranch};
pub use fields::{document_information, document_meta};
pub use linearizer::ProductTreeLinearizer;
pub use references::{DroppedReferences, ImportedReferences, ReferenceResolver, ResolvedReferences};

use crate::error::Result;
use crate::model::EditingModel;

/// Import CSAF JSON text with the default configuration.
///
/// `Ok(None)` means the text is JSON but not a CSAF document.
pub fn import_document_str(content: &str) -> Result<Option<ImportOutcome>> {
    DocumentAssembler::new().import_str(content)
}

/// Export the editing model as pretty-printed CSAF JSON with the default configuration
pub fn export_document_string(model: &EditingModel) -> Result<String> {
    DocumentAssembler::new().export_string(model)
}
