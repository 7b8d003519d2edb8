//! Product references outside the product tree.
//!
//! Vulnerability statuses, scores, remediations and relationships name
//! products by ID. On export those IDs come from the [`IdCache`] the
//! linearizer filled for the same pass; on import they resolve through the
//! cache the tree builder filled. References that no longer resolve are
//! dropped and counted in [`DroppedReferences`].

use crate::csaf::{
    CsafCvss, CsafFullProductName, CsafNote, CsafProductStatus, CsafRelationship, CsafRemediation,
    CsafScore, CsafVulnerability,
};
use crate::model::{
    Cwe, CvssVersion, EntityId, IdCache, Note, Relationship, RelationshipCategory, Remediation,
    RemediationCategory, Score, Vulnerability, VulnerabilityProduct,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Counts of dangling references dropped during one export pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DroppedReferences {
    /// `familyId` values naming no family
    pub families: usize,
    /// Vulnerability product entries naming no product
    pub vulnerability_products: usize,
    /// Score targets naming no product
    pub score_targets: usize,
    /// Remediation targets naming no product
    pub remediation_targets: usize,
    /// Relationships with an endpoint naming no product
    pub relationships: usize,
}

impl DroppedReferences {
    /// Total number of dropped references
    #[must_use]
    pub const fn total(&self) -> usize {
        self.families
            + self.vulnerability_products
            + self.score_targets
            + self.remediation_targets
            + self.relationships
    }

    /// Whether nothing was dropped
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Wire-side vulnerabilities and relationships produced by [`ReferenceResolver::resolve_out`]
#[derive(Debug, Clone, Default)]
pub struct ResolvedReferences {
    pub vulnerabilities: Vec<CsafVulnerability>,
    pub relationships: Vec<CsafRelationship>,
}

/// Editing-side vulnerabilities and relationships produced by [`ReferenceResolver::resolve_in`]
#[derive(Debug, Clone, Default)]
pub struct ImportedReferences {
    pub vulnerabilities: Vec<Vulnerability>,
    pub relationships: Vec<Relationship>,
}

/// Resolves product references against the pass-wide [`IdCache`].
pub struct ReferenceResolver<'a> {
    cache: &'a mut IdCache,
    product_names: Option<HashMap<EntityId, String>>,
    dropped: DroppedReferences,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(cache: &'a mut IdCache) -> Self {
        Self {
            cache,
            product_names: None,
            dropped: DroppedReferences::default(),
        }
    }

    /// Synthesize names for unnamed relationships from these full product names
    #[must_use]
    pub fn naming_relationships(mut self, product_names: HashMap<EntityId, String>) -> Self {
        self.product_names = Some(product_names);
        self
    }

    /// References dropped so far
    #[must_use]
    pub fn dropped(&self) -> DroppedReferences {
        self.dropped
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Map editing-model references to their wire form.
    ///
    /// Relationships go first: each one mints the product ID of the
    /// combination it describes, which statuses and scores may reference.
    /// A relationship may name another relationship as an endpoint in any
    /// order, so surviving relationships mint their IDs before any endpoint
    /// is checked.
    pub fn resolve_out(
        &mut self,
        vulnerabilities: &[Vulnerability],
        relationships: &[Relationship],
    ) -> ResolvedReferences {
        let live = self.live_relationships(relationships);
        for rel in relationships.iter().filter(|rel| live.contains(&rel.id)) {
            self.cache.resolve(Some(rel.id.as_str()));
        }

        let relationships = relationships
            .iter()
            .filter_map(|rel| self.relationship_out(rel))
            .collect();
        let vulnerabilities = vulnerabilities
            .iter()
            .map(|vuln| self.vulnerability_out(vuln))
            .collect();

        ResolvedReferences {
            vulnerabilities,
            relationships,
        }
    }

    fn lookup(&self, id: &EntityId) -> Option<String> {
        self.cache.get(id.as_str()).map(str::to_string)
    }

    /// Relationships whose endpoints resolve to a product or to another
    /// surviving relationship
    fn live_relationships(&self, relationships: &[Relationship]) -> HashSet<EntityId> {
        let mut live: HashSet<EntityId> = relationships.iter().map(|rel| rel.id.clone()).collect();
        loop {
            let dead: Vec<EntityId> = relationships
                .iter()
                .filter(|rel| live.contains(&rel.id))
                .filter(|rel| {
                    [&rel.product_id, &rel.relates_to_product_id]
                        .iter()
                        .any(|end| !live.contains(*end) && !self.cache.contains(end.as_str()))
                })
                .map(|rel| rel.id.clone())
                .collect();
            if dead.is_empty() {
                return live;
            }
            for id in &dead {
                live.remove(id);
            }
        }
    }

    fn relationship_out(&mut self, rel: &Relationship) -> Option<CsafRelationship> {
        let (Some(product_reference), Some(relates_to_product_reference)) = (
            self.lookup(&rel.product_id),
            self.lookup(&rel.relates_to_product_id),
        ) else {
            self.dropped.relationships += 1;
            tracing::debug!(
                relationship = %rel.id,
                product = %rel.product_id,
                relates_to = %rel.relates_to_product_id,
                "Dropping relationship with dangling endpoint"
            );
            return None;
        };

        let name = if rel.name.is_empty() {
            self.relationship_name(rel, &product_reference, &relates_to_product_reference)
        } else {
            rel.name.clone()
        };

        Some(CsafRelationship {
            category: rel.category.as_wire().to_string(),
            full_product_name: CsafFullProductName {
                name,
                product_id: self.cache.resolve(Some(rel.id.as_str())),
                product_identification_helper: None,
            },
            product_reference,
            relates_to_product_reference,
        })
    }

    /// `"<product> <phrase> <relates-to product>"`, empty when naming is off
    fn relationship_name(
        &self,
        rel: &Relationship,
        product_pid: &str,
        relates_pid: &str,
    ) -> String {
        let Some(names) = &self.product_names else {
            return String::new();
        };
        let product = names.get(&rel.product_id).map_or(product_pid, String::as_str);
        let relates_to = names
            .get(&rel.relates_to_product_id)
            .map_or(relates_pid, String::as_str);
        format!("{product} {} {relates_to}", rel.category.phrase())
    }

    fn vulnerability_out(&mut self, vuln: &Vulnerability) -> CsafVulnerability {
        let mut status = CsafProductStatus::default();
        for entry in &vuln.products {
            match self.lookup(&entry.product_id) {
                Some(pid) => status.insert(entry.status, &pid),
                None => {
                    self.dropped.vulnerability_products += 1;
                    tracing::debug!(
                        vulnerability = %vuln.id,
                        product = %entry.product_id,
                        status = %entry.status,
                        "Dropping dangling vulnerability product"
                    );
                }
            }
        }

        let scores = vuln
            .scores
            .iter()
            .filter_map(|score| self.score_out(score))
            .collect();
        let remediations = vuln
            .remediations
            .iter()
            .filter_map(|remediation| self.remediation_out(remediation))
            .collect();

        CsafVulnerability {
            cve: vuln.cve.clone(),
            cwe: vuln.cwe.as_ref().map(Into::into),
            title: (!vuln.title.is_empty()).then(|| vuln.title.clone()),
            notes: vuln.notes.iter().map(CsafNote::from).collect(),
            product_status: (!status.is_empty()).then_some(status),
            remediations,
            scores,
        }
    }

    /// Resolve target ids, returning the PIDs found and the number missing
    fn targets_out(&self, ids: &[EntityId]) -> (Vec<String>, usize) {
        let mut pids = Vec::with_capacity(ids.len());
        let mut missing = 0;
        for id in ids {
            match self.lookup(id) {
                Some(pid) if !pids.contains(&pid) => pids.push(pid),
                Some(_) => {}
                None => missing += 1,
            }
        }
        (pids, missing)
    }

    fn score_out(&mut self, score: &Score) -> Option<CsafScore> {
        let (products, missing) = self.targets_out(&score.product_ids);
        self.dropped.score_targets += missing;
        if products.is_empty() {
            tracing::debug!(score = %score.id, "Dropping score without resolvable products");
            return None;
        }

        let cvss = CsafCvss {
            version: score.version.as_str().to_string(),
            vector_string: score.vector_string.clone(),
            base_score: score.base_score,
            base_severity: score.base_severity.clone(),
            extra: score.extra.clone(),
        };
        let mut out = CsafScore {
            products,
            ..CsafScore::default()
        };
        match score.version {
            CvssVersion::V2 => out.cvss_v2 = Some(cvss),
            CvssVersion::V30 | CvssVersion::V31 => out.cvss_v3 = Some(cvss),
            CvssVersion::V4 => out.cvss_v4 = Some(cvss),
        }
        Some(out)
    }

    fn remediation_out(&mut self, remediation: &Remediation) -> Option<CsafRemediation> {
        let (product_ids, missing) = self.targets_out(&remediation.product_ids);
        self.dropped.remediation_targets += missing;
        if product_ids.is_empty() && !remediation.product_ids.is_empty() {
            tracing::debug!(
                remediation = %remediation.id,
                "Dropping remediation without resolvable products"
            );
            return None;
        }

        Some(CsafRemediation {
            category: remediation.category.as_wire().to_string(),
            details: remediation.details.clone(),
            url: remediation.url.clone(),
            date: remediation.date.clone(),
            product_ids,
        })
    }

    // ========================================================================
    // Import
    // ========================================================================

    /// Map wire references back into the editing model.
    ///
    /// Every product ID resolves through the pass-wide cache, so an ID named
    /// in the tree and in a status list ends up as one internal id. IDs the
    /// tree never defined still get a stable id within the pass.
    pub fn resolve_in(
        &mut self,
        vulnerabilities: &[CsafVulnerability],
        relationships: &[CsafRelationship],
    ) -> ImportedReferences {
        let relationships = relationships
            .iter()
            .map(|rel| self.relationship_in(rel))
            .collect();
        let vulnerabilities = vulnerabilities
            .iter()
            .map(|vuln| self.vulnerability_in(vuln))
            .collect();

        ImportedReferences {
            vulnerabilities,
            relationships,
        }
    }

    fn resolve(&mut self, pid: &str) -> EntityId {
        EntityId::from(self.cache.resolve(Some(pid)))
    }

    fn relationship_in(&mut self, rel: &CsafRelationship) -> Relationship {
        Relationship {
            id: self.resolve(&rel.full_product_name.product_id),
            category: RelationshipCategory::from_wire(&rel.category),
            product_id: self.resolve(&rel.product_reference),
            relates_to_product_id: self.resolve(&rel.relates_to_product_reference),
            name: rel.full_product_name.name.clone(),
        }
    }

    fn vulnerability_in(&mut self, vuln: &CsafVulnerability) -> Vulnerability {
        let products = vuln
            .product_status
            .as_ref()
            .map(|buckets| {
                buckets
                    .entries()
                    .map(|(status, pid)| VulnerabilityProduct::new(self.resolve(pid), status))
                    .collect()
            })
            .unwrap_or_default();

        Vulnerability {
            id: EntityId::fresh(),
            cve: vuln.cve.clone(),
            cwe: vuln.cwe.as_ref().map(Cwe::from),
            title: vuln.title.clone().unwrap_or_default(),
            notes: vuln.notes.iter().map(Note::from).collect(),
            products,
            remediations: vuln
                .remediations
                .iter()
                .map(|r| self.remediation_in(r))
                .collect(),
            scores: vuln
                .scores
                .iter()
                .flat_map(|score| self.scores_in(score))
                .collect(),
        }
    }

    fn remediation_in(&mut self, remediation: &CsafRemediation) -> Remediation {
        Remediation {
            id: EntityId::fresh(),
            category: RemediationCategory::from_wire(&remediation.category),
            details: remediation.details.clone(),
            url: remediation.url.clone(),
            date: remediation.date.clone(),
            product_ids: remediation
                .product_ids
                .iter()
                .map(|pid| self.resolve(pid))
                .collect(),
        }
    }

    /// One editing score per CVSS version present in the wire score
    fn scores_in(&mut self, score: &CsafScore) -> Vec<Score> {
        let product_ids: Vec<EntityId> = score
            .products
            .iter()
            .map(|pid| self.resolve(pid))
            .collect();

        let versions = [
            score.cvss_v2.as_ref().map(|cvss| (CvssVersion::V2, cvss)),
            score
                .cvss_v3
                .as_ref()
                .map(|cvss| (CvssVersion::v3_from(&cvss.version), cvss)),
            score.cvss_v4.as_ref().map(|cvss| (CvssVersion::V4, cvss)),
        ];

        versions
            .into_iter()
            .flatten()
            .map(|(version, cvss)| Score {
                id: EntityId::fresh(),
                product_ids: product_ids.clone(),
                version,
                vector_string: cvss.vector_string.clone(),
                base_score: cvss.base_score,
                base_severity: cvss.base_severity.clone(),
                extra: cvss.extra.clone(),
            })
            .collect()
    }
}
