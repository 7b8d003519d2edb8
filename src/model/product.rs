//! Product tree records of the editing model.

use super::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Category of a product tree branch supported by the editing model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchCategory {
    Vendor,
    ProductFamily,
    ProductName,
    ProductVersion,
}

impl BranchCategory {
    /// All supported categories, outermost first
    pub const ALL: [Self; 4] = [
        Self::Vendor,
        Self::ProductFamily,
        Self::ProductName,
        Self::ProductVersion,
    ];

    /// CSAF `category` value for this branch kind
    #[must_use]
    pub const fn as_wire(&self) -> &'static str {
        match self {
            Self::Vendor => "vendor",
            Self::ProductFamily => "product_family",
            Self::ProductName => "product_name",
            Self::ProductVersion => "product_version",
        }
    }

    /// Parse a CSAF `category` value, returning `None` for categories the
    /// editing model does not represent (`architecture`, `patch_level`, ...)
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "vendor" => Some(Self::Vendor),
            "product_family" => Some(Self::ProductFamily),
            "product_name" => Some(Self::ProductName),
            "product_version" => Some(Self::ProductVersion),
            _ => None,
        }
    }
}

impl std::fmt::Display for BranchCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

/// CSAF `product_identification_helper`, carried between both shapes unchanged.
///
/// `cpe` and `purl` are typed because they are the helpers the editor exposes;
/// every other helper (`hashes`, `sbom_urls`, ...) is preserved verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentificationHelper {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

/// One node of the editing-model product tree.
///
/// `product_version` leaves, and other branches flagged with `has_product`,
/// are the only branches referenced from outside the tree. `family_id` on a `product_name` branch is a weak reference into
/// [`ProductFamilies`](super::ProductFamilies).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTreeBranch {
    pub id: EntityId,
    pub category: BranchCategory,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identification_helper: Option<IdentificationHelper>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_id: Option<EntityId>,
    /// A non-version branch that carries its own `product` on the wire
    #[serde(default)]
    pub has_product: bool,
    #[serde(default)]
    pub sub_branches: Vec<ProductTreeBranch>,
}

impl ProductTreeBranch {
    /// Create a branch with a fresh id and no children
    pub fn new(category: BranchCategory, name: impl Into<String>) -> Self {
        Self {
            id: EntityId::fresh(),
            category,
            name: name.into(),
            description: String::new(),
            identification_helper: None,
            family_id: None,
            has_product: false,
            sub_branches: Vec::new(),
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the family reference
    #[must_use]
    pub fn with_family(mut self, family_id: EntityId) -> Self {
        self.family_id = Some(family_id);
        self
    }

    /// Set the identification helper
    #[must_use]
    pub fn with_identification_helper(mut self, helper: IdentificationHelper) -> Self {
        self.identification_helper = Some(helper);
        self
    }

    /// Mark the branch as carrying its own product
    #[must_use]
    pub fn with_product(mut self) -> Self {
        self.has_product = true;
        self
    }

    /// Append a child branch
    #[must_use]
    pub fn with_child(mut self, child: ProductTreeBranch) -> Self {
        self.sub_branches.push(child);
        self
    }

    /// Whether this branch is a version leaf that gets a product ID on export
    #[must_use]
    pub fn is_version(&self) -> bool {
        self.category == BranchCategory::ProductVersion
    }

    /// Whether this branch gets a `product` object and product ID on export
    #[must_use]
    pub fn carries_product(&self) -> bool {
        self.is_version() || self.has_product
    }

    /// Visit this branch and all descendants depth-first, parents first
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ProductTreeBranch)) {
        visit(self);
        for child in &self.sub_branches {
            child.walk(visit);
        }
    }

    /// Find a branch by id in this subtree
    #[must_use]
    pub fn find(&self, id: &EntityId) -> Option<&ProductTreeBranch> {
        if &self.id == id {
            return Some(self);
        }
        self.sub_branches.iter().find_map(|child| child.find(id))
    }
}

/// Count the `product_version` leaves of a forest
#[must_use]
pub fn count_versions(products: &[ProductTreeBranch]) -> usize {
    let mut count = 0;
    for root in products {
        root.walk(&mut |b| {
            if b.is_version() {
                count += 1;
            }
        });
    }
    count
}

/// Map every branch id to its space-joined path of names from the root,
/// e.g. `"Acme Widget 1.0"` for a version leaf.
#[must_use]
pub fn full_product_names(products: &[ProductTreeBranch]) -> HashMap<EntityId, String> {
    fn collect(branch: &ProductTreeBranch, prefix: &str, out: &mut HashMap<EntityId, String>) {
        let name = if prefix.is_empty() {
            branch.name.clone()
        } else {
            format!("{prefix} {}", branch.name)
        };
        for child in &branch.sub_branches {
            collect(child, &name, out);
        }
        out.insert(branch.id.clone(), name);
    }

    let mut out = HashMap::new();
    for root in products {
        collect(root, "", &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProductTreeBranch {
        ProductTreeBranch::new(BranchCategory::Vendor, "Acme").with_child(
            ProductTreeBranch::new(BranchCategory::ProductName, "Widget")
                .with_child(ProductTreeBranch::new(BranchCategory::ProductVersion, "1.0"))
                .with_child(ProductTreeBranch::new(BranchCategory::ProductVersion, "2.0")),
        )
    }

    #[test]
    fn category_wire_names_round_trip() {
        for category in BranchCategory::ALL {
            assert_eq!(BranchCategory::from_wire(category.as_wire()), Some(category));
        }
        assert_eq!(BranchCategory::from_wire("architecture"), None);
    }

    #[test]
    fn full_names_follow_the_path() {
        let tree = sample();
        let version = &tree.sub_branches[0].sub_branches[0];
        let names = full_product_names(std::slice::from_ref(&tree));
        assert_eq!(names[&version.id], "Acme Widget 1.0");
        assert_eq!(names[&tree.id], "Acme");
    }

    #[test]
    fn only_versions_and_flagged_branches_carry_products() {
        let tree = sample();
        assert!(!tree.carries_product());
        assert!(!tree.sub_branches[0].carries_product());
        assert!(tree.sub_branches[0].sub_branches[0].carries_product());

        let leaf = ProductTreeBranch::new(BranchCategory::ProductName, "Gadget").with_product();
        assert!(leaf.carries_product());
        assert!(!leaf.is_version());
    }

    #[test]
    fn count_versions_counts_leaves() {
        assert_eq!(count_versions(&[sample(), sample()]), 4);
    }

    #[test]
    fn find_locates_nested_branch() {
        let tree = sample();
        let target = tree.sub_branches[0].sub_branches[1].id.clone();
        assert_eq!(tree.find(&target).map(|b| b.name.as_str()), Some("2.0"));
    }

    #[test]
    fn serializes_in_editor_shape() {
        let branch = ProductTreeBranch::new(BranchCategory::ProductName, "Widget")
            .with_family(EntityId::from("fam-1"));
        let json = serde_json::to_value(&branch).unwrap();
        assert_eq!(json["category"], "product_name");
        assert_eq!(json["familyId"], "fam-1");
        assert!(json["subBranches"].as_array().unwrap().is_empty());
    }

    #[test]
    fn identification_helper_keeps_unknown_fields() {
        let helper: IdentificationHelper = serde_json::from_value(serde_json::json!({
            "cpe": "cpe:2.3:a:acme:widget:1.0:*:*:*:*:*:*:*",
            "serial_numbers": ["A1"]
        }))
        .unwrap();
        assert!(helper.cpe.is_some());
        assert!(helper.other.contains_key("serial_numbers"));
        let back = serde_json::to_value(&helper).unwrap();
        assert_eq!(back["serial_numbers"][0], "A1");
    }
}
