//! Vulnerability records of the editing model.

use super::{EntityId, Note};
use serde::{Deserialize, Serialize};

/// A vulnerability being described by the advisory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cve: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwe: Option<Cwe>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub products: Vec<VulnerabilityProduct>,
    #[serde(default)]
    pub remediations: Vec<Remediation>,
    #[serde(default)]
    pub scores: Vec<Score>,
}

impl Vulnerability {
    /// Create an empty vulnerability with a fresh id
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: EntityId::fresh(),
            cve: None,
            cwe: None,
            title: title.into(),
            notes: Vec::new(),
            products: Vec::new(),
            remediations: Vec::new(),
            scores: Vec::new(),
        }
    }
}

/// CWE classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cwe {
    pub id: String,
    pub name: String,
}

/// The status of one product version with respect to a vulnerability.
///
/// `product_id` is a weak reference to a `product_version` branch and may be
/// dangling after that branch was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityProduct {
    pub id: EntityId,
    pub product_id: EntityId,
    pub status: ProductStatus,
}

impl VulnerabilityProduct {
    /// Create a status entry with a fresh id
    #[must_use]
    pub fn new(product_id: EntityId, status: ProductStatus) -> Self {
        Self {
            id: EntityId::fresh(),
            product_id,
            status,
        }
    }
}

/// CSAF `product_status` bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    FirstAffected,
    KnownAffected,
    KnownNotAffected,
    LastAffected,
    FirstFixed,
    Fixed,
    Recommended,
    UnderInvestigation,
}

impl ProductStatus {
    /// All buckets in CSAF schema order
    pub const ALL: [Self; 8] = [
        Self::FirstAffected,
        Self::KnownAffected,
        Self::KnownNotAffected,
        Self::LastAffected,
        Self::FirstFixed,
        Self::Fixed,
        Self::Recommended,
        Self::UnderInvestigation,
    ];

    /// CSAF field name of the bucket
    #[must_use]
    pub const fn as_wire(&self) -> &'static str {
        match self {
            Self::FirstAffected => "first_affected",
            Self::KnownAffected => "known_affected",
            Self::KnownNotAffected => "known_not_affected",
            Self::LastAffected => "last_affected",
            Self::FirstFixed => "first_fixed",
            Self::Fixed => "fixed",
            Self::Recommended => "recommended",
            Self::UnderInvestigation => "under_investigation",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

/// CVSS version of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CvssVersion {
    #[serde(rename = "2.0")]
    V2,
    #[serde(rename = "3.0")]
    V30,
    #[serde(rename = "3.1")]
    V31,
    #[serde(rename = "4.0")]
    V4,
}

impl CvssVersion {
    /// Version string as written in the CVSS object
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V2 => "2.0",
            Self::V30 => "3.0",
            Self::V31 => "3.1",
            Self::V4 => "4.0",
        }
    }

    /// Pick the v3 minor version from a CVSS object's `version` field
    #[must_use]
    pub fn v3_from(version: &str) -> Self {
        if version == "3.0" {
            Self::V30
        } else {
            Self::V31
        }
    }
}

impl std::fmt::Display for CvssVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CVSS:{}", self.as_str())
    }
}

/// A CVSS score applying to a set of products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub id: EntityId,
    #[serde(default)]
    pub product_ids: Vec<EntityId>,
    pub version: CvssVersion,
    pub vector_string: String,
    pub base_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_severity: Option<String>,
    /// Remaining CVSS metrics, preserved verbatim
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// CSAF remediation category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemediationCategory {
    Mitigation,
    NoFixPlanned,
    NoneAvailable,
    VendorFix,
    Workaround,
    Other(String),
}

impl RemediationCategory {
    /// Parse a CSAF category value
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "mitigation" => Self::Mitigation,
            "no_fix_planned" => Self::NoFixPlanned,
            "none_available" => Self::NoneAvailable,
            "vendor_fix" => Self::VendorFix,
            "workaround" => Self::Workaround,
            other => Self::Other(other.to_string()),
        }
    }

    /// CSAF category value
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Mitigation => "mitigation",
            Self::NoFixPlanned => "no_fix_planned",
            Self::NoneAvailable => "none_available",
            Self::VendorFix => "vendor_fix",
            Self::Workaround => "workaround",
            Self::Other(s) => s,
        }
    }
}

/// A remediation for some of the affected products
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remediation {
    pub id: EntityId,
    pub category: RemediationCategory,
    #[serde(default)]
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub product_ids: Vec<EntityId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_status_serializes_as_bucket_name() {
        for status in ProductStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.as_wire());
        }
    }

    #[test]
    fn cvss_version_picks_v3_minor() {
        assert_eq!(CvssVersion::v3_from("3.0"), CvssVersion::V30);
        assert_eq!(CvssVersion::v3_from("3.1"), CvssVersion::V31);
        assert_eq!(CvssVersion::V31.to_string(), "CVSS:3.1");
    }

    #[test]
    fn remediation_category_keeps_unknown_values() {
        let category = RemediationCategory::from_wire("fix_planned");
        assert_eq!(category, RemediationCategory::Other("fix_planned".to_string()));
        assert_eq!(category.as_wire(), "fix_planned");
        assert_eq!(
            RemediationCategory::from_wire("vendor_fix"),
            RemediationCategory::VendorFix
        );
    }
}
