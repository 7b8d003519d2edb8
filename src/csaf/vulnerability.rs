//! CSAF `vulnerabilities` section structures.

use super::CsafNote;
use crate::model::ProductStatus;
use serde::{Deserialize, Serialize};

/// An entry of `vulnerabilities`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafVulnerability {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cve: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwe: Option<CsafCwe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<CsafNote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_status: Option<CsafProductStatus>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remediations: Vec<CsafRemediation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scores: Vec<CsafScore>,
}

/// `cwe`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafCwe {
    pub id: String,
    pub name: String,
}

/// `product_status`: product IDs partitioned into status buckets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafProductStatus {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub first_affected: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub known_affected: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub known_not_affected: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub last_affected: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub first_fixed: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fixed: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommended: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub under_investigation: Vec<String>,
}

impl CsafProductStatus {
    /// Product IDs in one bucket
    #[must_use]
    pub fn bucket(&self, status: ProductStatus) -> &[String] {
        match status {
            ProductStatus::FirstAffected => &self.first_affected,
            ProductStatus::KnownAffected => &self.known_affected,
            ProductStatus::KnownNotAffected => &self.known_not_affected,
            ProductStatus::LastAffected => &self.last_affected,
            ProductStatus::FirstFixed => &self.first_fixed,
            ProductStatus::Fixed => &self.fixed,
            ProductStatus::Recommended => &self.recommended,
            ProductStatus::UnderInvestigation => &self.under_investigation,
        }
    }

    /// Mutable access to one bucket
    pub fn bucket_mut(&mut self, status: ProductStatus) -> &mut Vec<String> {
        match status {
            ProductStatus::FirstAffected => &mut self.first_affected,
            ProductStatus::KnownAffected => &mut self.known_affected,
            ProductStatus::KnownNotAffected => &mut self.known_not_affected,
            ProductStatus::LastAffected => &mut self.last_affected,
            ProductStatus::FirstFixed => &mut self.first_fixed,
            ProductStatus::Fixed => &mut self.fixed,
            ProductStatus::Recommended => &mut self.recommended,
            ProductStatus::UnderInvestigation => &mut self.under_investigation,
        }
    }

    /// Add a product ID to a bucket unless it is already listed there
    pub fn insert(&mut self, status: ProductStatus, product_id: &str) {
        let bucket = self.bucket_mut(status);
        if !bucket.iter().any(|p| p == product_id) {
            bucket.push(product_id.to_string());
        }
    }

    /// Iterate over `(status, product_id)` pairs in schema bucket order
    pub fn entries(&self) -> impl Iterator<Item = (ProductStatus, &str)> {
        ProductStatus::ALL
            .into_iter()
            .flat_map(move |status| self.bucket(status).iter().map(move |p| (status, p.as_str())))
    }

    /// Whether every bucket is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        ProductStatus::ALL
            .into_iter()
            .all(|status| self.bucket(status).is_empty())
    }
}

/// An entry of `remediations`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafRemediation {
    pub category: String,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub product_ids: Vec<String>,
}

/// An entry of `scores`; one object may carry several CVSS versions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafScore {
    pub products: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvss_v2: Option<CsafCvss>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvss_v3: Option<CsafCvss>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvss_v4: Option<CsafCvss>,
}

/// A CVSS object (`cvss_v2`, `cvss_v3` or `cvss_v4`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsafCvss {
    pub version: String,
    #[serde(rename = "vectorString")]
    pub vector_string: String,
    #[serde(rename = "baseScore")]
    pub base_score: f64,
    #[serde(rename = "baseSeverity", skip_serializing_if = "Option::is_none")]
    pub base_severity: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
