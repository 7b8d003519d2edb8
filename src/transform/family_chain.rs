//! Conversion between the family forest and nested `product_family` branches.
//!
//! The editing model stores a product's family as a weak `family_id`. On the
//! wire the same information is a chain of `product_family` branches wrapped
//! around the product, root family outermost. Chain order (leaf to root) is
//! therefore the reverse of tree order (root to leaf).

use crate::csaf::CsafBranch;
use crate::model::{BranchCategory, EntityId, IdCache, ProductFamilies, ProductFamily};

/// Wrap `product` in the `product_family` chain of `family_id`.
///
/// An unknown `family_id` returns `product` unchanged: a dangling family
/// reference is dropped, not reported as an error.
#[must_use]
pub fn attach_family(
    product: CsafBranch,
    family_id: &EntityId,
    families: &ProductFamilies,
) -> CsafBranch {
    let chain = families.chain(family_id);
    if chain.is_empty() {
        tracing::debug!(family_id = %family_id, "Dropping dangling family reference");
    }

    // Innermost wrapper first: the chain already runs leaf to root.
    chain.into_iter().fold(product, |wrapped, family| {
        CsafBranch::family(family.name.clone(), vec![wrapped])
    })
}

/// A wire branch with family wrappers removed from its subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedBranch<'a> {
    /// The original wire branch; its `branches` are superseded by `branches` here
    pub source: &'a CsafBranch,
    /// Nearest enclosing family, set on `product_name` branches only
    pub family_id: Option<EntityId>,
    /// Children with family wrappers hoisted away
    pub branches: Vec<TaggedBranch<'a>>,
}

/// Result of [`extract_families`]
#[derive(Debug, Clone, Default)]
pub struct ExtractedFamilies<'a> {
    /// Every family met in the tree, deduplicated by structural position
    pub families: ProductFamilies,
    /// The branch forest with family wrappers stripped
    pub tagged: Vec<TaggedBranch<'a>>,
}

/// Strip `product_family` wrappers from `branches`.
///
/// Each wrapper becomes a [`ProductFamily`] whose parent is the enclosing
/// family; its children are hoisted into the wrapper's place. Every
/// `product_name` branch is tagged with its nearest enclosing family.
///
/// Families are identified by position: the path of enclosing non-family
/// branches, the parent family and the name. Two vendors may each own a
/// family called "Pro", while the separate "Pro" wrappers that export emits
/// for each product of one vendor collapse back into one family.
#[must_use]
pub fn extract_families<'a>(
    branches: &'a [CsafBranch],
    default_family_name: &str,
) -> ExtractedFamilies<'a> {
    let mut extractor = FamilyExtractor {
        families: ProductFamilies::new(),
        positions: IdCache::new(),
        default_family_name,
    };
    let mut tagged = Vec::new();
    extractor.walk(branches, None, "", &mut tagged);

    ExtractedFamilies {
        families: extractor.families,
        tagged,
    }
}

struct FamilyExtractor<'d> {
    families: ProductFamilies,
    /// Structural position key -> family id
    positions: IdCache,
    default_family_name: &'d str,
}

impl FamilyExtractor<'_> {
    fn walk<'a>(
        &mut self,
        branches: &'a [CsafBranch],
        enclosing: Option<&EntityId>,
        path: &str,
        out: &mut Vec<TaggedBranch<'a>>,
    ) {
        for branch in branches {
            if branch.branch_category() == Some(BranchCategory::ProductFamily) {
                let family_id = self.family_at(branch, enclosing, path);
                self.walk(&branch.branches, Some(&family_id), path, out);
                continue;
            }

            let family_id = if branch.branch_category() == Some(BranchCategory::ProductName) {
                enclosing.cloned()
            } else {
                None
            };
            let mut tagged = TaggedBranch {
                source: branch,
                family_id,
                branches: Vec::new(),
            };
            let child_path = format!("{path}/{}:{}", branch.category, branch.name);
            self.walk(&branch.branches, enclosing, &child_path, &mut tagged.branches);
            out.push(tagged);
        }
    }

    /// The family for a wrapper branch, created on first sight of its position
    fn family_at(
        &mut self,
        branch: &CsafBranch,
        parent: Option<&EntityId>,
        path: &str,
    ) -> EntityId {
        let name = if branch.name.is_empty() {
            self.default_family_name
        } else {
            branch.name.as_str()
        };
        let parent_key = parent.map_or("", EntityId::as_str);
        let key = format!("{path}\u{1f}{parent_key}\u{1f}{name}");

        let id = EntityId::from(self.positions.resolve(Some(&key)));
        if !self.families.contains(&id) {
            self.families.insert(ProductFamily {
                id: id.clone(),
                name: name.to_string(),
                parent: parent.cloned(),
            });
        }
        id
    }
}
