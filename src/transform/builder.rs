//! CSAF `product_tree.branches` to the editing-model product forest.

use super::family_chain::{extract_families, TaggedBranch};
use crate::config::ImportConfig;
use crate::csaf::CsafBranch;
use crate::model::{BranchCategory, EntityId, IdCache, ProductFamilies, ProductTreeBranch};

/// Product forest and family forest recovered from a CSAF tree.
///
/// `family_id` fields in `products` point into `families`.
#[derive(Debug, Clone, Default)]
pub struct BuiltProductTree {
    pub products: Vec<ProductTreeBranch>,
    pub families: ProductFamilies,
}

/// Rebuilds the editing-model product forest from CSAF branches.
pub struct ProductTreeBuilder<'a> {
    config: &'a ImportConfig,
    cache: &'a mut IdCache,
    coerced: usize,
}

impl<'a> ProductTreeBuilder<'a> {
    pub fn new(config: &'a ImportConfig, cache: &'a mut IdCache) -> Self {
        Self {
            config,
            cache,
            coerced: 0,
        }
    }

    /// Strip family wrappers, then convert the remaining branches.
    ///
    /// Branch ids are resolved through the borrowed [`IdCache`] keyed by the
    /// wire `product_id`, so the reference resolver of the same pass maps
    /// status lists onto the same internal ids.
    pub fn build(&mut self, branches: &[CsafBranch]) -> BuiltProductTree {
        let default_family_name = self
            .config
            .default_names
            .get(BranchCategory::ProductFamily);
        let extracted = extract_families(branches, default_family_name);
        let products = extracted
            .tagged
            .iter()
            .map(|tagged| self.convert(tagged, ""))
            .collect();

        BuiltProductTree {
            products,
            families: extracted.families,
        }
    }

    /// Number of branches whose category was coerced
    #[must_use]
    pub fn coerced(&self) -> usize {
        self.coerced
    }

    fn convert(&mut self, tagged: &TaggedBranch<'_>, parent_path: &str) -> ProductTreeBranch {
        let source = tagged.source;
        let category = self.category_of(source);

        let name = if source.name.is_empty() {
            self.config.default_names.get(category).to_string()
        } else {
            source.name.clone()
        };
        let path = if parent_path.is_empty() {
            name.clone()
        } else {
            format!("{parent_path} {name}")
        };
        // A product named by its path had no description of its own
        let description = match &source.product {
            Some(product) if product.name == path => String::new(),
            Some(product) => product.name.clone(),
            None => self.config.default_descriptions.get(category).to_string(),
        };
        let family_id = if category == BranchCategory::ProductName {
            tagged.family_id.clone()
        } else {
            None
        };

        ProductTreeBranch {
            id: EntityId::from(self.cache.resolve(source.product_id())),
            category,
            name,
            description,
            identification_helper: source
                .product
                .as_ref()
                .and_then(|p| p.product_identification_helper.clone()),
            family_id,
            has_product: source.product.is_some() && category != BranchCategory::ProductVersion,
            sub_branches: tagged
                .branches
                .iter()
                .map(|child| self.convert(child, &path))
                .collect(),
        }
    }

    fn category_of(&mut self, branch: &CsafBranch) -> BranchCategory {
        if let Some(category) = branch.branch_category() {
            return category;
        }

        let coerced = if branch.product.is_some() {
            BranchCategory::ProductVersion
        } else {
            BranchCategory::ProductName
        };
        self.coerced += 1;
        tracing::warn!(
            category = %branch.category,
            name = %branch.name,
            coerced = %coerced,
            "Unsupported branch category, coercing"
        );
        coerced
    }
}
