use psf_domain::catalog::{BenefitFlags, BenefitId, CatalogDocument, PackageId};
use serde_json::json;

#[test]
fn catalog_document_accepts_numeric_and_text_ids() {
    let raw = json!({
        "benefits": [
            { "id": 1, "name": "Logo on python.org", "flags": "PACKAGE_ONLY" },
            { "id": "booth", "name": "Booth", "cost": 200, "conflicts": [1], "flags": "STANDALONE | NEW" }
        ],
        "packages": [
            { "id": "gold", "name": "Gold", "cost": 5000, "benefits": [1] }
        ]
    });

    let doc: CatalogDocument = serde_json::from_value(raw).expect("catalog deserialize");
    assert_eq!(doc.benefits[0].id, BenefitId::from("1"));
    assert_eq!(doc.benefits[0].flags, BenefitFlags::PACKAGE_ONLY);
    assert_eq!(doc.benefits[0].cost, None);
    assert_eq!(doc.benefits[1].flags, BenefitFlags::STANDALONE | BenefitFlags::NEW);
    assert_eq!(doc.benefits[1].conflicts, vec![BenefitId::new("1")]);

    let gold = &doc.packages[0];
    assert_eq!(gold.id, PackageId::from("gold"));
    assert!(gold.allow_a_la_carte, "a la carte is allowed unless disabled");
}

#[test]
fn ids_serialize_as_plain_strings() {
    let value = serde_json::to_value(BenefitId::from("42")).expect("serialize id");
    assert_eq!(value, json!("42"));
    assert!(PackageId::from("  ").is_blank());
}
