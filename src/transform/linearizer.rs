//! Editing-model product forest to CSAF `product_tree.branches`.

use super::family_chain::attach_family;
use crate::csaf::{CsafBranch, CsafFullProductName};
use crate::model::{BranchCategory, IdCache, ProductFamilies, ProductTreeBranch};

/// Converts the editing-model product forest into nested CSAF branches.
///
/// Product IDs are drawn from the borrowed [`IdCache`], keyed by the internal
/// branch id. The same cache must later serve the reference resolver of the
/// same export pass so that status lists name the same IDs as the tree.
pub struct ProductTreeLinearizer<'a> {
    families: &'a ProductFamilies,
    cache: &'a mut IdCache,
    dangling_families: usize,
}

impl<'a> ProductTreeLinearizer<'a> {
    pub fn new(families: &'a ProductFamilies, cache: &'a mut IdCache) -> Self {
        Self {
            families,
            cache,
            dangling_families: 0,
        }
    }

    /// Linearize a product forest, preserving sibling order.
    ///
    /// A `product_name` branch with a family reference is replaced in its
    /// parent's list by the outermost family wrapper that contains it.
    pub fn linearize(&mut self, branches: &[ProductTreeBranch]) -> Vec<CsafBranch> {
        branches
            .iter()
            .map(|branch| self.linearize_branch(branch, ""))
            .collect()
    }

    /// Number of family references that named no existing family
    #[must_use]
    pub fn dangling_families(&self) -> usize {
        self.dangling_families
    }

    fn linearize_branch(&mut self, branch: &ProductTreeBranch, parent_path: &str) -> CsafBranch {
        let path = if parent_path.is_empty() {
            branch.name.clone()
        } else {
            format!("{parent_path} {}", branch.name)
        };

        let mut out = CsafBranch::new(branch.category, branch.name.as_str());
        out.branches = branch
            .sub_branches
            .iter()
            .map(|child| self.linearize_branch(child, &path))
            .collect();

        // An empty description exports as the joined path, which the builder
        // reads back as empty.
        if branch.carries_product() {
            let name = if branch.description.is_empty() {
                path
            } else {
                branch.description.clone()
            };
            out.product = Some(CsafFullProductName {
                name,
                product_id: self.cache.resolve(Some(branch.id.as_str())),
                product_identification_helper: branch.identification_helper.clone(),
            });
        }

        match (&branch.category, &branch.family_id) {
            (BranchCategory::ProductName, Some(family_id)) => {
                if !self.families.contains(family_id) {
                    self.dangling_families += 1;
                }
                attach_family(out, family_id, self.families)
            }
            _ => out,
        }
    }
}
