/// Supplier catalog and matcher.
///
/// The catalog is static reference data: loaded once at process start,
/// shared read-only across request handlers, never mutated. Matching is
/// deliberately broad-recall substring containment — a fabric type like
/// "cotton lace" matches both the cotton and the lace suppliers.
use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CommonError;

/// A supplier the service can recommend for a fabric specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierRecord {
    /// Unique catalog id.
    pub id: u32,
    /// Display name, e.g. "Guangzhou Royal Lace Co.".
    pub name: String,
    /// Single lowercase token the supplier is filtered on, e.g. "lace".
    pub specialization: String,
    /// Fabric names the supplier can source.
    pub fabrics: Vec<String>,
    /// Human-readable location, e.g. "Guangzhou, China".
    pub location: String,
    /// Aggregate trust score on a 0–5 scale.
    pub trust_score: f64,
}

/// Return every supplier whose specialization keyword appears as a substring
/// of the fabric type, case-insensitively, in catalog order.
///
/// Both sides are lowercased explicitly so a catalog entry with mixed-case
/// specialization still matches. "Not specified" matches nothing in the
/// builtin catalog; that falls out of containment, it is not a special case.
pub fn match_suppliers<'a>(
    fabric_type: &str,
    catalog: &'a [SupplierRecord],
) -> Vec<&'a SupplierRecord> {
    let wanted = fabric_type.to_lowercase();
    catalog
        .iter()
        .filter(|supplier| wanted.contains(&supplier.specialization.to_lowercase()))
        .collect()
}

/// Load a supplier catalog from a JSON file (an array of `SupplierRecord`).
///
/// Ids must be unique. Specialization keywords are lowercased on load so the
/// match key is canonical regardless of how the file was authored.
pub fn load_catalog(path: &Path) -> Result<Vec<SupplierRecord>, CommonError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CommonError::Catalog(format!("failed to read {}: {e}", path.display())))?;
    let mut catalog: Vec<SupplierRecord> = serde_json::from_str(&raw).map_err(|e| {
        CommonError::Catalog(format!("invalid catalog JSON in {}: {e}", path.display()))
    })?;

    if catalog.is_empty() {
        return Err(CommonError::Catalog(format!(
            "catalog {} contains no suppliers",
            path.display()
        )));
    }

    let mut seen: HashSet<u32> = HashSet::new();
    for supplier in &mut catalog {
        if !seen.insert(supplier.id) {
            return Err(CommonError::Catalog(format!(
                "duplicate supplier id {} in {}",
                supplier.id,
                path.display()
            )));
        }
        supplier.specialization = supplier.specialization.to_lowercase();
    }

    Ok(catalog)
}

/// The shipped 12-supplier catalog, compiled in as the default when no
/// catalog file is configured.
pub fn builtin_catalog() -> Vec<SupplierRecord> {
    fn supplier(
        id: u32,
        name: &str,
        specialization: &str,
        fabrics: &[&str],
        location: &str,
        trust_score: f64,
    ) -> SupplierRecord {
        SupplierRecord {
            id,
            name: name.to_string(),
            specialization: specialization.to_string(),
            fabrics: fabrics.iter().map(|f| f.to_string()).collect(),
            location: location.to_string(),
            trust_score,
        }
    }

    vec![
        supplier(
            1,
            "Guangzhou Royal Lace Co.",
            "lace",
            &[
                "embroidered lace",
                "beaded lace",
                "cord lace",
                "chantilly lace",
                "french lace",
                "net lace",
                "cotton lace",
                "tulle",
            ],
            "Guangzhou, China",
            4.8,
        ),
        supplier(
            2,
            "Shantou Bridal Lace Factory",
            "lace",
            &["beaded lace", "chantilly lace", "french lace", "net lace"],
            "Shantou, China",
            4.7,
        ),
        supplier(
            3,
            "Huzhou Velvet Textiles",
            "velvet",
            &["plain velvet", "sequins velvet", "crushed velvet", "pattern velvet"],
            "Huzhou, China",
            4.6,
        ),
        supplier(
            4,
            "Foshan Silk Mills",
            "silk",
            &["raw silk", "silk satin", "silk chiffon"],
            "Foshan, China",
            4.8,
        ),
        supplier(
            5,
            "Suzhou Premium Silks",
            "silk",
            &["raw silk", "silk satin", "silk chiffon"],
            "Suzhou, China",
            4.9,
        ),
        supplier(
            6,
            "Shaoxing Cotton Textiles",
            "cotton",
            &["cotton", "cotton lace", "linen blend", "ankara", "wax print"],
            "Shaoxing, China",
            4.5,
        ),
        supplier(
            7,
            "Shaoxing Elegant Fabrics",
            "chiffon",
            &["chiffon", "georgette", "crepe", "vintage crepe", "peach skin"],
            "Shaoxing, China",
            4.6,
        ),
        supplier(
            8,
            "Hangzhou Satin & Organza",
            "satin",
            &["satin", "organza"],
            "Hangzhou, China",
            4.7,
        ),
        supplier(
            9,
            "Jiangsu Brocade Works",
            "brocade",
            &["brocade", "jacquard", "damask"],
            "Jiangsu, China",
            4.6,
        ),
        supplier(
            10,
            "Foshan Sequins Factory",
            "sequins",
            &["sequins fabric", "sequins velvet"],
            "Foshan, China",
            4.7,
        ),
        supplier(
            11,
            "Guangzhou Performance Textiles",
            "scuba",
            &["scuba fabric"],
            "Guangzhou, China",
            4.5,
        ),
        supplier(
            12,
            "Guangzhou Fashion Denim",
            "denim",
            &["denim", "fashion grade denim"],
            "Guangzhou, China",
            4.4,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::NOT_SPECIFIED;

    fn ids(matches: &[&SupplierRecord]) -> Vec<u32> {
        matches.iter().map(|s| s.id).collect()
    }

    #[test]
    fn builtin_catalog_ids_are_unique() {
        let catalog = builtin_catalog();
        let unique: HashSet<u32> = catalog.iter().map(|s| s.id).collect();
        assert_eq!(unique.len(), catalog.len());
    }

    #[test]
    fn builtin_specializations_are_lowercase_tokens() {
        for supplier in builtin_catalog() {
            assert_eq!(supplier.specialization, supplier.specialization.to_lowercase());
            assert!(!supplier.specialization.contains(' '), "{}", supplier.specialization);
        }
    }

    #[test]
    fn lace_request_matches_both_lace_suppliers_in_order() {
        let catalog = builtin_catalog();
        let matches = match_suppliers("Premium white lace for gowns", &catalog);
        assert_eq!(ids(&matches), vec![1, 2]);
    }

    #[test]
    fn not_specified_matches_nothing() {
        let catalog = builtin_catalog();
        assert!(match_suppliers(NOT_SPECIFIED, &catalog).is_empty());
        assert!(match_suppliers("", &catalog).is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let catalog = builtin_catalog();
        let upper = ids(&match_suppliers("SILK SATIN", &catalog));
        let lower = ids(&match_suppliers("silk satin", &catalog));
        assert_eq!(upper, lower);
        assert_eq!(lower, vec![4, 5, 8]);
    }

    #[test]
    fn mixed_case_catalog_specialization_still_matches() {
        let mut catalog = builtin_catalog();
        catalog[0].specialization = "Lace".to_string();
        let matches = match_suppliers("cord lace", &catalog);
        assert_eq!(ids(&matches), vec![1, 2]);
    }

    #[test]
    fn compound_fabric_type_matches_broadly() {
        // "cotton lace" contains both "cotton" and "lace"; broad recall is
        // intentional, so all three suppliers come back in catalog order.
        let catalog = builtin_catalog();
        let matches = match_suppliers("cotton lace", &catalog);
        assert_eq!(ids(&matches), vec![1, 2, 6]);
    }

    #[test]
    fn unrelated_fabric_type_matches_nothing() {
        let catalog = builtin_catalog();
        assert!(match_suppliers("recycled polyester fleece", &catalog).is_empty());
    }

    #[test]
    fn load_catalog_lowercases_and_validates() {
        let dir = std::env::temp_dir().join("weinly-catalog-test");
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "name": "Test Mills", "specialization": "Velvet",
                 "fabrics": ["plain velvet"], "location": "Testville", "trust_score": 4.0}]"#,
        )
        .expect("write catalog");

        let catalog = load_catalog(&path).expect("load catalog");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].specialization, "velvet");
    }

    #[test]
    fn load_catalog_rejects_duplicate_ids() {
        let dir = std::env::temp_dir().join("weinly-catalog-test");
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("dup.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "name": "A", "specialization": "silk", "fabrics": [],
                 "location": "X", "trust_score": 4.0},
                {"id": 1, "name": "B", "specialization": "lace", "fabrics": [],
                 "location": "Y", "trust_score": 4.1}]"#,
        )
        .expect("write catalog");

        let err = load_catalog(&path).expect_err("duplicate ids must fail");
        assert!(err.to_string().contains("duplicate supplier id 1"));
    }
}
