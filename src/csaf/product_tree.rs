//! CSAF `product_tree` section structures.

use crate::model::{BranchCategory, IdentificationHelper};
use serde::{Deserialize, Serialize};

/// The `product_tree` object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafProductTree {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<CsafBranch>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<CsafRelationship>,
}

impl CsafProductTree {
    /// Whether the tree carries neither branches nor relationships
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty() && self.relationships.is_empty()
    }
}

/// One node of the nested branch tree.
///
/// `category` stays a string so categories outside the editing model
/// (`architecture`, `patch_level`, ...) survive decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafBranch {
    pub category: String,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<CsafBranch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<CsafFullProductName>,
}

impl CsafBranch {
    /// Create a branch of a supported category with no children
    pub fn new(category: BranchCategory, name: impl Into<String>) -> Self {
        Self {
            category: category.as_wire().to_string(),
            name: name.into(),
            branches: Vec::new(),
            product: None,
        }
    }

    /// Create a `product_family` wrapper around `branches`
    pub fn family(name: impl Into<String>, branches: Vec<CsafBranch>) -> Self {
        Self {
            branches,
            ..Self::new(BranchCategory::ProductFamily, name)
        }
    }

    /// The supported category of this branch, if any
    #[must_use]
    pub fn branch_category(&self) -> Option<BranchCategory> {
        BranchCategory::from_wire(&self.category)
    }

    /// The product ID carried by this branch
    #[must_use]
    pub fn product_id(&self) -> Option<&str> {
        self.product.as_ref().map(|p| p.product_id.as_str())
    }
}

/// `full_product_name`: a referencable product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafFullProductName {
    pub name: String,
    pub product_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_identification_helper: Option<IdentificationHelper>,
}

/// An entry of `product_tree.relationships`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafRelationship {
    pub category: String,
    pub full_product_name: CsafFullProductName,
    pub product_reference: String,
    pub relates_to_product_reference: String,
}
