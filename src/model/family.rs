//! Product family forest.
//!
//! Families form a forest through `parent` ids rather than direct references,
//! stored in an arena keyed by [`EntityId`]. A family chain is the ancestor list
//! of a family, starting with the family itself and ending at its root.

use super::EntityId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A product family node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFamily {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub parent: Option<EntityId>,
}

impl ProductFamily {
    /// Create a family with a fresh id
    pub fn new(name: impl Into<String>, parent: Option<EntityId>) -> Self {
        Self {
            id: EntityId::fresh(),
            name: name.into(),
            parent,
        }
    }
}

/// Arena of product families indexed by id, in insertion order.
///
/// Serialized as a plain list of families so the surrounding application
/// store sees the same shape it hands in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ProductFamily>", into = "Vec<ProductFamily>")]
pub struct ProductFamilies {
    families: IndexMap<EntityId, ProductFamily>,
}

impl ProductFamilies {
    /// Create an empty arena
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new family under `parent` and return its id.
    ///
    /// A parent id that is not in the arena is stored as no parent, so the
    /// arena cannot be made cyclic through this method.
    pub fn add(&mut self, name: impl Into<String>, parent: Option<&EntityId>) -> EntityId {
        let parent = parent.filter(|p| self.families.contains_key(*p)).cloned();
        let family = ProductFamily::new(name, parent);
        let id = family.id.clone();
        self.families.insert(id.clone(), family);
        id
    }

    /// Insert a family record as-is, replacing any record with the same id
    pub fn insert(&mut self, family: ProductFamily) -> Option<ProductFamily> {
        self.families.insert(family.id.clone(), family)
    }

    /// Get a family by id
    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<&ProductFamily> {
        self.families.get(id)
    }

    /// Whether a family with this id exists
    #[must_use]
    pub fn contains(&self, id: &EntityId) -> bool {
        self.families.contains_key(id)
    }

    /// The chain from `id` up to its root, leaf first.
    ///
    /// Returns an empty chain when `id` is unknown. A dangling `parent`
    /// terminates the chain at the last family that exists.
    #[must_use]
    pub fn chain(&self, id: &EntityId) -> Vec<&ProductFamily> {
        let mut chain = Vec::new();
        let mut current = self.families.get(id);
        while let Some(family) = current {
            if chain.len() == self.families.len() {
                break;
            }
            chain.push(family);
            current = family.parent.as_ref().and_then(|p| self.families.get(p));
        }
        chain
    }

    /// Iterate over families in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ProductFamily> {
        self.families.values()
    }

    /// Number of families
    #[must_use]
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Whether the arena is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

impl From<Vec<ProductFamily>> for ProductFamilies {
    fn from(families: Vec<ProductFamily>) -> Self {
        Self {
            families: families.into_iter().map(|f| (f.id.clone(), f)).collect(),
        }
    }
}

impl From<ProductFamilies> for Vec<ProductFamily> {
    fn from(arena: ProductFamilies) -> Self {
        arena.families.into_values().collect()
    }
}

impl FromIterator<ProductFamily> for ProductFamilies {
    fn from_iter<T: IntoIterator<Item = ProductFamily>>(iter: T) -> Self {
        Self {
            families: iter.into_iter().map(|f| (f.id.clone(), f)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_runs_leaf_to_root() {
        let mut families = ProductFamilies::new();
        let a = families.add("A", None);
        let b = families.add("B", Some(&a));
        let c = families.add("C", Some(&b));

        let names: Vec<_> = families.chain(&c).iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["C", "B", "A"]);
    }

    #[test]
    fn unknown_family_has_empty_chain() {
        let families = ProductFamilies::new();
        assert!(families.chain(&EntityId::from("missing")).is_empty());
    }

    #[test]
    fn add_drops_unknown_parent() {
        let mut families = ProductFamilies::new();
        let id = families.add("Orphan", Some(&EntityId::from("missing")));
        assert_eq!(families.get(&id).and_then(|f| f.parent.as_ref()), None);
    }

    #[test]
    fn dangling_parent_ends_chain() {
        let families: ProductFamilies = vec![ProductFamily {
            id: EntityId::from("f1"),
            name: "Pro".to_string(),
            parent: Some(EntityId::from("gone")),
        }]
        .into();
        assert_eq!(families.chain(&EntityId::from("f1")).len(), 1);
    }

    #[test]
    fn serializes_as_list() {
        let mut families = ProductFamilies::new();
        families.add("Pro", None);
        let json = serde_json::to_value(&families).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(1));
        assert_eq!(json[0]["name"], "Pro");
        assert!(json[0]["parent"].is_null());

        let back: ProductFamilies = serde_json::from_value(json).unwrap();
        assert_eq!(back, families);
    }
}
