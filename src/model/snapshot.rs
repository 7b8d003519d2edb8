//! The editing-model snapshot exchanged with the application state store.

use super::{
    count_versions, DocumentInformation, ProductFamilies, ProductTreeBranch, Relationship,
    Vulnerability,
};
use serde::{Deserialize, Serialize};

/// Complete editing-model state of one advisory.
///
/// This is the only shape the engine accepts on export and returns on import;
/// how the surrounding application stores or renders it is not its concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditingModel {
    pub document_information: DocumentInformation,
    /// Vendor branches at the root of the product tree
    pub products: Vec<ProductTreeBranch>,
    pub families: ProductFamilies,
    pub relationships: Vec<Relationship>,
    pub vulnerabilities: Vec<Vulnerability>,
}

impl EditingModel {
    /// Create an empty model
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `product_version` leaves in the product tree
    #[must_use]
    pub fn version_count(&self) -> usize {
        count_versions(&self.products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BranchCategory;

    #[test]
    fn empty_snapshot_deserializes() {
        let model: EditingModel = serde_json::from_str("{}").unwrap();
        assert!(model.products.is_empty());
        assert!(model.families.is_empty());
    }

    #[test]
    fn snapshot_uses_store_field_names() {
        let mut model = EditingModel::new();
        model
            .products
            .push(ProductTreeBranch::new(BranchCategory::Vendor, "Acme"));
        let json = serde_json::to_value(&model).unwrap();
        assert!(json.get("documentInformation").is_some());
        assert_eq!(json["products"][0]["name"], "Acme");
        assert_eq!(model.version_count(), 0);
    }
}
