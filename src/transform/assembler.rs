//! Whole-document import and export.
//!
//! The assembler owns one [`IdCache`] per call. Export runs the product tree
//! linearizer before the reference resolver so that every status list sees
//! the product IDs the tree was given; import runs the tree builder before
//! the reference resolver for the same reason.

use super::builder::ProductTreeBuilder;
use super::fields::{document_information, document_meta};
use super::linearizer::ProductTreeLinearizer;
use super::references::{DroppedReferences, ReferenceResolver};
use crate::config::{TransformConfig, Validatable};
use crate::csaf::{detect, CsafDocument, CsafProductTree};
use crate::error::{CsafBridgeError, ErrorContext, ExportErrorKind, ImportErrorKind, Result};
use crate::model::{full_product_names, EditingModel, EntityId, IdCache};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Result of one import pass.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// The editing-model snapshot
    pub model: EditingModel,
    /// Wire product ID -> internal id pairs resolved during the pass
    pub id_cache: IdCache,
}

impl ImportOutcome {
    /// Internal id -> original product ID pairs.
    ///
    /// Pass this to [`DocumentAssembler::export_seeded`] to re-export with
    /// the product IDs the document was imported with.
    #[must_use]
    pub fn export_seed(&self) -> IndexMap<String, String> {
        self.id_cache.inverse()
    }

    /// The product ID an internal id was imported from
    #[must_use]
    pub fn original_product_id(&self, id: &EntityId) -> Option<&str> {
        self.id_cache
            .iter()
            .find(|(_, internal)| *internal == id.as_str())
            .map(|(pid, _)| pid)
    }
}

/// Result of one export pass.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// The CSAF document
    pub document: CsafDocument,
    /// Internal id -> product ID pairs resolved during the pass
    pub id_cache: IdCache,
    /// Dangling references left out of `document`
    pub dropped: DroppedReferences,
}

impl ExportOutcome {
    /// The product ID a version or relationship was exported with
    #[must_use]
    pub fn product_id(&self, id: &EntityId) -> Option<&str> {
        self.id_cache.get(id.as_str())
    }
}

/// Converts whole documents between the editing model and CSAF.
#[derive(Debug, Clone, Default)]
pub struct DocumentAssembler {
    config: TransformConfig,
}

impl DocumentAssembler {
    /// Create an assembler with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an assembler with a validated configuration
    pub fn with_config(config: TransformConfig) -> Result<Self> {
        let errors = config.validate();
        if !errors.is_empty() {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            return Err(CsafBridgeError::config(messages.join("; ")));
        }
        Ok(Self { config })
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &TransformConfig {
        &self.config
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Export the editing model with freshly minted product IDs.
    ///
    /// Dangling references are dropped and counted, never reported as errors.
    pub fn export(&self, model: &EditingModel) -> ExportOutcome {
        self.export_with_cache(model, IdCache::with_prefix(&self.config.export.pid_prefix))
    }

    /// Export, reusing `seed` product IDs for the internal ids it names.
    ///
    /// `seed` maps internal ids to product IDs, as returned by
    /// [`ImportOutcome::export_seed`]. Ids absent from the seed get fresh IDs.
    pub fn export_seeded<I, K, V>(&self, model: &EditingModel, seed: I) -> ExportOutcome
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let cache = IdCache::preferring(self.config.export.pid_prefix.as_str(), seed);
        self.export_with_cache(model, cache)
    }

    /// Export and serialize to a JSON value
    pub fn export_json(&self, model: &EditingModel) -> Result<Value> {
        serde_json::to_value(self.export(model).document).map_err(|e| {
            CsafBridgeError::export(
                "converting CSAF document to JSON",
                ExportErrorKind::Serialization(e.to_string()),
            )
        })
    }

    /// Export and serialize to pretty-printed JSON text
    pub fn export_string(&self, model: &EditingModel) -> Result<String> {
        serde_json::to_string_pretty(&self.export(model).document).map_err(|e| {
            CsafBridgeError::export(
                "serializing CSAF document",
                ExportErrorKind::Serialization(e.to_string()),
            )
        })
    }

    fn export_with_cache(&self, model: &EditingModel, mut cache: IdCache) -> ExportOutcome {
        let mut linearizer = ProductTreeLinearizer::new(&model.families, &mut cache);
        let branches = linearizer.linearize(&model.products);
        let dangling_families = linearizer.dangling_families();

        let mut resolver = ReferenceResolver::new(&mut cache);
        if self.config.export.name_relationships {
            resolver = resolver.naming_relationships(full_product_names(&model.products));
        }
        let references = resolver.resolve_out(&model.vulnerabilities, &model.relationships);
        let dropped = DroppedReferences {
            families: dangling_families,
            ..resolver.dropped()
        };

        let product_tree = CsafProductTree {
            branches,
            relationships: references.relationships,
        };
        let document = CsafDocument {
            document: document_meta(
                &model.document_information,
                &self.config.export.csaf_version,
            ),
            product_tree: (!product_tree.is_empty()).then_some(product_tree),
            vulnerabilities: references.vulnerabilities,
        };

        tracing::info!(
            product_ids = cache.len(),
            vulnerabilities = document.vulnerabilities.len(),
            dropped = dropped.total(),
            "Exported CSAF document"
        );

        ExportOutcome {
            document,
            id_cache: cache,
            dropped,
        }
    }

    // ========================================================================
    // Import
    // ========================================================================

    /// Import a parsed JSON value.
    ///
    /// Returns `Ok(None)` when the value is not shaped like a CSAF document
    /// and an error when it is CSAF-shaped but does not decode.
    pub fn import(&self, value: &Value) -> Result<Option<ImportOutcome>> {
        let detection = detect(value);
        if !detection.can_import() {
            tracing::debug!(
                confidence = detection.confidence.value(),
                "Value is not a CSAF document"
            );
            return Ok(None);
        }
        for warning in &detection.warnings {
            tracing::warn!("{warning}");
        }

        let document = CsafDocument::deserialize(value).map_err(|e| {
            CsafBridgeError::import(
                "decoding CSAF document",
                ImportErrorKind::InvalidStructure(e.to_string()),
            )
        })?;
        Ok(Some(self.import_document(&document)))
    }

    /// Import JSON text
    pub fn import_str(&self, content: &str) -> Result<Option<ImportOutcome>> {
        let value: Value = serde_json::from_str(content).context("parsing JSON text")?;
        self.import(&value)
    }

    /// Import an already decoded CSAF document
    pub fn import_document(&self, document: &CsafDocument) -> ImportOutcome {
        let mut cache = IdCache::new();
        let empty = CsafProductTree::default();
        let tree = document.product_tree.as_ref().unwrap_or(&empty);

        let built = ProductTreeBuilder::new(&self.config.import, &mut cache).build(&tree.branches);
        let references = ReferenceResolver::new(&mut cache)
            .resolve_in(&document.vulnerabilities, &tree.relationships);

        let model = EditingModel {
            document_information: document_information(&document.document),
            products: built.products,
            families: built.families,
            relationships: references.relationships,
            vulnerabilities: references.vulnerabilities,
        };

        tracing::info!(
            versions = model.version_count(),
            families = model.families.len(),
            vulnerabilities = model.vulnerabilities.len(),
            "Imported CSAF document"
        );

        ImportOutcome {
            model,
            id_cache: cache,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BranchCategory, ProductStatus, ProductTreeBranch, Vulnerability, VulnerabilityProduct,
    };
    use serde_json::json;

    fn sample_model() -> (EditingModel, EntityId) {
        let mut model = EditingModel::new();
        let version = ProductTreeBranch::new(BranchCategory::ProductVersion, "1.0");
        let version_id = version.id.clone();
        model.products.push(
            ProductTreeBranch::new(BranchCategory::Vendor, "Acme").with_child(
                ProductTreeBranch::new(BranchCategory::ProductName, "Widget").with_child(version),
            ),
        );
        let mut vuln = Vulnerability::new("Overflow");
        vuln.products
            .push(VulnerabilityProduct::new(version_id.clone(), ProductStatus::KnownAffected));
        model.vulnerabilities.push(vuln);
        (model, version_id)
    }

    #[test]
    fn export_shares_pid_between_tree_and_status() {
        let (model, version_id) = sample_model();
        let outcome = DocumentAssembler::new().export(&model);

        let pid = outcome.product_id(&version_id).expect("version exported");
        let json = serde_json::to_value(&outcome.document).unwrap();
        assert_eq!(
            json["product_tree"]["branches"][0]["branches"][0]["branches"][0]["product"]["product_id"],
            pid
        );
        assert_eq!(
            json["vulnerabilities"][0]["product_status"]["known_affected"][0],
            pid
        );
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn export_writes_configured_csaf_version() {
        let (model, _) = sample_model();
        let config = TransformConfig::builder().csaf_version("2.1").build();
        let assembler = DocumentAssembler::with_config(config).unwrap();
        let json = assembler.export_json(&model).unwrap();
        assert_eq!(json["document"]["csaf_version"], "2.1");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = TransformConfig::builder().pid_prefix("has space").build();
        assert!(matches!(
            DocumentAssembler::with_config(config),
            Err(CsafBridgeError::Config(_))
        ));
    }

    #[test]
    fn non_csaf_value_is_none() {
        let assembler = DocumentAssembler::new();
        assert!(assembler
            .import(&json!({"bomFormat": "CycloneDX"}))
            .unwrap()
            .is_none());
    }

    #[test]
    fn csaf_shaped_but_undecodable_is_error() {
        let value = json!({
            "document": {"csaf_version": "2.0", "tracking": {"id": "T1"}},
            "vulnerabilities": "not a list"
        });
        let err = DocumentAssembler::new().import(&value).unwrap_err();
        assert!(matches!(
            err,
            CsafBridgeError::Import {
                source: ImportErrorKind::InvalidStructure(_),
                ..
            }
        ));
    }

    #[test]
    fn malformed_text_is_json_error() {
        let err = DocumentAssembler::new().import_str("{not json").unwrap_err();
        assert!(matches!(
            err,
            CsafBridgeError::Import {
                source: ImportErrorKind::InvalidJson(_),
                ..
            }
        ));
    }

    #[test]
    fn seeded_export_reuses_imported_pids() {
        let value = json!({
            "document": {"csaf_version": "2.0", "tracking": {"id": "T1"}},
            "product_tree": {"branches": [{
                "category": "product_version",
                "name": "1.0",
                "product": {"name": "Widget 1.0", "product_id": "ACME-1"}
            }]}
        });
        let assembler = DocumentAssembler::new();
        let imported = assembler.import(&value).unwrap().expect("is CSAF");
        let version_id = imported.model.products[0].id.clone();
        assert_eq!(imported.original_product_id(&version_id), Some("ACME-1"));

        let exported = assembler.export_seeded(&imported.model, imported.export_seed());
        assert_eq!(exported.product_id(&version_id), Some("ACME-1"));
    }
}
