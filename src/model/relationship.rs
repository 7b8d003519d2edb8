//! Product relationships of the editing model.

use super::EntityId;
use serde::{Deserialize, Serialize};

/// CSAF relationship category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipCategory {
    DefaultComponentOf,
    ExternalComponentOf,
    InstalledOn,
    InstalledWith,
    OptionalComponentOf,
    Other(String),
}

impl RelationshipCategory {
    /// Parse a CSAF relationship category
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "default_component_of" => Self::DefaultComponentOf,
            "external_component_of" => Self::ExternalComponentOf,
            "installed_on" => Self::InstalledOn,
            "installed_with" => Self::InstalledWith,
            "optional_component_of" => Self::OptionalComponentOf,
            other => Self::Other(other.to_string()),
        }
    }

    /// CSAF relationship category value
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::DefaultComponentOf => "default_component_of",
            Self::ExternalComponentOf => "external_component_of",
            Self::InstalledOn => "installed_on",
            Self::InstalledWith => "installed_with",
            Self::OptionalComponentOf => "optional_component_of",
            Self::Other(s) => s,
        }
    }

    /// Phrase joining the two product names in a synthesized relationship name
    #[must_use]
    pub fn phrase(&self) -> String {
        match self {
            Self::DefaultComponentOf => "as a default component of".to_string(),
            Self::ExternalComponentOf => "as an external component of".to_string(),
            Self::InstalledOn => "installed on".to_string(),
            Self::InstalledWith => "installed with".to_string(),
            Self::OptionalComponentOf => "as an optional component of".to_string(),
            Self::Other(s) => s.replace('_', " "),
        }
    }
}

/// Relationship between two products, exported as a combined product.
///
/// `product_id` and `relates_to_product_id` are weak references to branches;
/// `id` keys the synthetic product ID of the combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: EntityId,
    pub category: RelationshipCategory,
    pub product_id: EntityId,
    pub relates_to_product_id: EntityId,
    #[serde(default)]
    pub name: String,
}

impl Relationship {
    /// Create a relationship with a fresh id and no explicit name
    #[must_use]
    pub fn new(
        category: RelationshipCategory,
        product_id: EntityId,
        relates_to_product_id: EntityId,
    ) -> Self {
        Self {
            id: EntityId::fresh(),
            category,
            product_id,
            relates_to_product_id,
            name: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trip() {
        for raw in [
            "default_component_of",
            "external_component_of",
            "installed_on",
            "installed_with",
            "optional_component_of",
            "bundled_with",
        ] {
            assert_eq!(RelationshipCategory::from_wire(raw).as_wire(), raw);
        }
    }

    #[test]
    fn unknown_category_phrase_uses_spaces() {
        assert_eq!(
            RelationshipCategory::Other("bundled_with".to_string()).phrase(),
            "bundled with"
        );
    }
}
