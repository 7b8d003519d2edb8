//! Integration tests for csaf-bridge
//!
//! These tests run whole documents through import and export and check the
//! wire output against the fixtures they came from.

use csaf_bridge::{
    import_document_str,
    model::{
        BranchCategory, EntityId, ProductStatus, ProductTreeBranch, ReferenceCategory,
        RelationshipCategory, TrackingStatus,
    },
    DocumentAssembler, EditingModel, ImportOutcome, TransformConfig,
};
use serde_json::Value;
use std::path::Path;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/csaf");

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(Path::new(FIXTURES_DIR).join(name))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}

fn fixture_json(name: &str) -> Value {
    serde_json::from_str(&load_fixture(name)).expect("fixture is valid JSON")
}

fn import_fixture(name: &str) -> ImportOutcome {
    import_document_str(&load_fixture(name))
        .expect("fixture should import")
        .expect("fixture should be detected as CSAF")
}

fn find_branch<'a>(products: &'a [ProductTreeBranch], name: &str) -> &'a ProductTreeBranch {
    fn walk<'a>(branch: &'a ProductTreeBranch, name: &str) -> Option<&'a ProductTreeBranch> {
        if branch.name == name {
            return Some(branch);
        }
        branch.sub_branches.iter().find_map(|child| walk(child, name))
    }
    products
        .iter()
        .find_map(|root| walk(root, name))
        .unwrap_or_else(|| panic!("branch {name} not found"))
}

fn export_value(assembler: &DocumentAssembler, imported: &ImportOutcome) -> Value {
    let outcome = assembler.export_seeded(&imported.model, imported.export_seed());
    serde_json::to_value(&outcome.document).expect("document serializes")
}

// ============================================================================
// Minimal document with one family
// ============================================================================

mod family_scenario {
    use super::*;

    #[test]
    fn import_yields_family_product_and_version() {
        let imported = import_fixture("concrete_scenario.json");
        let model = &imported.model;

        assert_eq!(model.document_information.id, "T1");
        assert_eq!(model.families.len(), 1);
        let family = model.families.iter().next().expect("one family");
        assert_eq!(family.name, "Pro");
        assert_eq!(family.parent, None);

        let widget = find_branch(&model.products, "Widget");
        assert_eq!(widget.category, BranchCategory::ProductName);
        assert_eq!(widget.family_id.as_ref(), Some(&family.id));

        let version = find_branch(&model.products, "1.0");
        assert_eq!(version.category, BranchCategory::ProductVersion);
        assert_eq!(imported.original_product_id(&version.id), Some("CSAFPID-1"));
        assert_eq!(imported.id_cache.get("CSAFPID-1"), Some(version.id.as_str()));
    }

    #[test]
    fn re_export_reproduces_product_id() {
        let imported = import_fixture("concrete_scenario.json");
        let version_id = find_branch(&imported.model.products, "1.0").id.clone();

        let outcome = DocumentAssembler::new()
            .export_seeded(&imported.model, imported.export_seed());
        assert_eq!(outcome.product_id(&version_id), Some("CSAFPID-1"));

        let json = serde_json::to_value(&outcome.document).unwrap();
        let vendor = &json["product_tree"]["branches"][0];
        assert_eq!(vendor["name"], "Acme");
        let family = &vendor["branches"][0];
        assert_eq!(family["category"], "product_family");
        assert_eq!(family["name"], "Pro");
        let widget = &family["branches"][0];
        assert_eq!(widget["name"], "Widget");
        assert_eq!(widget["branches"][0]["product"]["product_id"], "CSAFPID-1");
    }

    #[test]
    fn unseeded_export_mints_prefixed_ids() {
        let imported = import_fixture("concrete_scenario.json");
        let version_id = find_branch(&imported.model.products, "1.0").id.clone();

        let outcome = DocumentAssembler::new().export(&imported.model);
        let pid = outcome.product_id(&version_id).expect("version exported");
        assert!(pid.starts_with("CSAFPID-"));
        assert_ne!(pid, "CSAFPID-1");
    }
}

// ============================================================================
// Full advisory
// ============================================================================

mod full_advisory {
    use super::*;

    #[test]
    fn document_information_is_mapped() {
        let info = import_fixture("full_advisory.json").model.document_information;

        assert_eq!(info.id, "ACME-SA-2024-001");
        assert_eq!(info.category, "csaf_security_advisory");
        assert_eq!(info.status, TrackingStatus::Final);
        assert_eq!(info.tlp.as_ref().map(|t| t.label.as_str()), Some("WHITE"));
        assert_eq!(
            info.publisher.contact_details.as_deref(),
            Some("psirt@acme.example")
        );
        assert_eq!(info.revision_history.len(), 2);
        assert_eq!(info.notes.len(), 2);
        assert!(info.notes[0].content.starts_with("A heap overflow"));
        assert_eq!(info.references[0].category, ReferenceCategory::SelfRef);
        assert_eq!(info.references[1].category, ReferenceCategory::External);
        assert_eq!(info.acknowledgments[0].names.len(), 2);
    }

    #[test]
    fn nested_families_form_a_chain() {
        let model = import_fixture("full_advisory.json").model;

        assert_eq!(model.families.len(), 2);
        let widget = find_branch(&model.products, "Widget");
        let family_id = widget.family_id.as_ref().expect("widget has a family");
        let chain: Vec<_> = model
            .families
            .chain(family_id)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(chain, ["Pro", "Enterprise"]);

        let gadget = find_branch(&model.products, "Gadget");
        assert_eq!(gadget.family_id, None);
        // Family wrappers are gone from the product forest
        let vendor = &model.products[0];
        assert_eq!(vendor.sub_branches.len(), 2);
        assert_eq!(vendor.sub_branches[0].name, "Widget");
    }

    #[test]
    fn references_share_ids_with_the_tree() {
        let model = import_fixture("full_advisory.json").model;
        let widget_10 = find_branch(&model.products, "1.0");
        let gadget_32 = find_branch(&model.products, "3.2");
        // Named by its own path, so no description of its own
        assert_eq!(widget_10.description, "");

        let relationship = &model.relationships[0];
        assert_eq!(relationship.category, RelationshipCategory::InstalledOn);
        assert_eq!(relationship.product_id, widget_10.id);
        assert_eq!(relationship.relates_to_product_id, gadget_32.id);

        let vuln = &model.vulnerabilities[0];
        assert_eq!(vuln.cve.as_deref(), Some("CVE-2024-0001"));
        let affected: Vec<&EntityId> = vuln
            .products
            .iter()
            .filter(|p| p.status == ProductStatus::KnownAffected)
            .map(|p| &p.product_id)
            .collect();
        assert_eq!(affected, [&widget_10.id, &relationship.id]);

        assert_eq!(vuln.scores.len(), 2, "one editing score per CVSS version");
        assert!(vuln.scores.iter().all(|s| s.product_ids.len() == 2));
        assert_eq!(
            vuln.remediations[0].product_ids,
            [widget_10.id.clone(), relationship.id.clone()]
        );
    }

    #[test]
    fn seeded_round_trip_preserves_tree_and_references() {
        let original = fixture_json("full_advisory.json");
        let imported = import_fixture("full_advisory.json");
        let exported = export_value(&DocumentAssembler::new(), &imported);

        assert_eq!(
            exported["product_tree"]["branches"],
            original["product_tree"]["branches"]
        );
        assert_eq!(
            exported["product_tree"]["relationships"],
            original["product_tree"]["relationships"]
        );
        assert_eq!(
            exported["vulnerabilities"][0]["product_status"],
            original["vulnerabilities"][0]["product_status"]
        );
        assert_eq!(
            exported["vulnerabilities"][0]["remediations"],
            original["vulnerabilities"][0]["remediations"]
        );
        assert_eq!(exported["document"]["tracking"], original["document"]["tracking"]);
        assert_eq!(exported["document"]["publisher"], original["document"]["publisher"]);
        assert_eq!(
            exported["document"]["distribution"],
            original["document"]["distribution"]
        );
    }

    #[test]
    fn scores_export_one_object_per_version() {
        let imported = import_fixture("full_advisory.json");
        let exported = export_value(&DocumentAssembler::new(), &imported);

        let scores = exported["vulnerabilities"][0]["scores"]
            .as_array()
            .expect("scores array");
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0]["cvss_v2"]["version"], "2.0");
        assert_eq!(scores[1]["cvss_v3"]["baseScore"], 9.8);
        assert_eq!(scores[1]["cvss_v3"]["attackVector"], "NETWORK");
        assert!(scores.iter().all(|s| s["products"].as_array().map(Vec::len) == Some(2)));
    }
}

// ============================================================================
// Dangling references
// ============================================================================

mod dangling_references {
    use super::*;

    fn remove_branch(products: &mut Vec<ProductTreeBranch>, name: &str) -> bool {
        if let Some(pos) = products.iter().position(|b| b.name == name) {
            products.remove(pos);
            return true;
        }
        products
            .iter_mut()
            .any(|b| remove_branch(&mut b.sub_branches, name))
    }

    #[test]
    fn deleted_version_drops_out_of_every_reference() {
        let mut imported = import_fixture("full_advisory.json");
        assert!(remove_branch(&mut imported.model.products, "1.0"));

        let outcome = DocumentAssembler::new()
            .export_seeded(&imported.model, imported.export_seed());
        let json = serde_json::to_value(&outcome.document).unwrap();

        let status = &json["vulnerabilities"][0]["product_status"];
        assert!(status.get("known_affected").is_none());
        assert_eq!(status["fixed"][0], "CSAFPID-0002");
        assert!(json["product_tree"].get("relationships").is_none());
        assert!(json["vulnerabilities"][0].get("remediations").is_none());
        assert!(json["vulnerabilities"][0].get("scores").is_none());

        let dropped = outcome.dropped;
        assert_eq!(dropped.relationships, 1);
        assert_eq!(dropped.vulnerability_products, 2);
        assert_eq!(dropped.remediation_targets, 2);
        assert_eq!(dropped.score_targets, 4);
        assert_eq!(dropped.families, 0);
    }

    #[test]
    fn dangling_family_leaves_product_unwrapped() {
        let mut imported = import_fixture("concrete_scenario.json");
        imported.model.products[0].sub_branches[0].family_id = Some(EntityId::fresh());

        let outcome = DocumentAssembler::new().export(&imported.model);
        let json = serde_json::to_value(&outcome.document).unwrap();

        let child = &json["product_tree"]["branches"][0]["branches"][0];
        assert_eq!(child["category"], "product_name");
        assert_eq!(child["name"], "Widget");
        assert_eq!(outcome.dropped.families, 1);
    }
}

// ============================================================================
// Family chain export
// ============================================================================

// ============================================================================
// Product round trips
// ============================================================================

mod product_round_trip {
    use super::*;

    #[test]
    fn empty_version_description_stays_empty() {
        let mut model = EditingModel::new();
        model.products.push(
            ProductTreeBranch::new(BranchCategory::Vendor, "Acme").with_child(
                ProductTreeBranch::new(BranchCategory::ProductName, "Widget")
                    .with_child(ProductTreeBranch::new(BranchCategory::ProductVersion, "1.0"))
                    .with_child(
                        ProductTreeBranch::new(BranchCategory::ProductVersion, "2.0")
                            .with_description("Widget 2.0 LTS"),
                    ),
            ),
        );

        let text = DocumentAssembler::new()
            .export_string(&model)
            .expect("export serializes");
        let wire: Value = serde_json::from_str(&text).expect("export is JSON");
        assert_eq!(
            wire["product_tree"]["branches"][0]["branches"][0]["branches"][0]["product"]["name"],
            "Acme Widget 1.0"
        );

        let imported = import_document_str(&text)
            .expect("exported text imports")
            .expect("exported text is CSAF");
        assert_eq!(find_branch(&imported.model.products, "1.0").description, "");
        assert_eq!(
            find_branch(&imported.model.products, "2.0").description,
            "Widget 2.0 LTS"
        );
    }

    #[test]
    fn product_name_leaf_keeps_its_references() {
        let text = r#"{
            "document": {"csaf_version": "2.0", "tracking": {"id": "T2"}},
            "product_tree": {"branches": [{
                "category": "vendor", "name": "Acme",
                "branches": [{
                    "category": "product_name", "name": "Gadget",
                    "product": {"name": "Acme Gadget", "product_id": "CSAFPID-1"}
                }]
            }]},
            "vulnerabilities": [{
                "product_status": {"known_affected": ["CSAFPID-1"]},
                "remediations": [{
                    "category": "vendor_fix", "details": "Upgrade",
                    "product_ids": ["CSAFPID-1"]
                }]
            }]
        }"#;

        let imported = import_document_str(text)
            .expect("document imports")
            .expect("document is CSAF");
        let gadget = find_branch(&imported.model.products, "Gadget");
        assert!(gadget.has_product);

        let outcome = DocumentAssembler::new()
            .export_seeded(&imported.model, imported.export_seed());
        assert!(outcome.dropped.is_empty());

        let json = serde_json::to_value(&outcome.document).expect("document serializes");
        let product = &json["product_tree"]["branches"][0]["branches"][0]["product"];
        assert_eq!(product["product_id"], "CSAFPID-1");
        assert_eq!(product["name"], "Acme Gadget");
        let vuln = &json["vulnerabilities"][0];
        assert_eq!(vuln["product_status"]["known_affected"][0], "CSAFPID-1");
        assert_eq!(vuln["remediations"][0]["product_ids"][0], "CSAFPID-1");
    }
}

#[test]
fn family_chain_nests_root_first() {
    let mut model = EditingModel::new();
    let a = model.families.add("A", None);
    let b = model.families.add("B", Some(&a));
    let c = model.families.add("C", Some(&b));
    model.products.push(
        ProductTreeBranch::new(BranchCategory::ProductName, "X")
            .with_family(c)
            .with_child(ProductTreeBranch::new(BranchCategory::ProductVersion, "1.0")),
    );

    let json = DocumentAssembler::new().export_json(&model).unwrap();

    let a_branch = &json["product_tree"]["branches"][0];
    assert_eq!(a_branch["name"], "A");
    let b_branch = &a_branch["branches"][0];
    assert_eq!(b_branch["name"], "B");
    let c_branch = &b_branch["branches"][0];
    assert_eq!(c_branch["name"], "C");
    let x_branch = &c_branch["branches"][0];
    assert_eq!(x_branch["name"], "X");
    assert_eq!(x_branch["category"], "product_name");
    assert_eq!(x_branch["branches"][0]["product"]["name"], "X 1.0");
}

// ============================================================================
// Shape detection and configuration
// ============================================================================

#[test]
fn non_csaf_json_is_not_imported() {
    assert!(import_document_str(&load_fixture("not_csaf.json"))
        .expect("valid JSON")
        .is_none());
    assert!(!csaf_bridge::is_csaf_document(&fixture_json("not_csaf.json")));
}

#[test]
fn malformed_json_is_an_error() {
    assert!(import_document_str("{\"document\": ").is_err());
}

#[test]
fn configured_prefix_and_defaults_apply() {
    let config = TransformConfig::from_yaml_str(
        "import:\n  default_names:\n    vendor: Anonymous vendor\nexport:\n  pid_prefix: ACME-\n",
    )
    .unwrap();
    let assembler = DocumentAssembler::with_config(config).unwrap();

    let imported = assembler
        .import_str(
            r#"{"document": {"csaf_version": "2.0", "tracking": {"id": "T2"}},
                "product_tree": {"branches": [{"category": "vendor", "name": "",
                  "branches": [{"category": "product_version", "name": "1.0"}]}]}}"#,
        )
        .unwrap()
        .expect("CSAF document");
    assert_eq!(imported.model.products[0].name, "Anonymous vendor");

    let outcome = assembler.export(&imported.model);
    let version = &imported.model.products[0].sub_branches[0];
    let pid = outcome.product_id(&version.id).expect("version exported");
    assert!(pid.starts_with("ACME-"));
}
