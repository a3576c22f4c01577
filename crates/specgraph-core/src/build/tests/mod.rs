mod property;

use crate::{
    BuildError, build,
    model::Cardinality,
    options::BuildOptions,
    test_fixtures::{build_schemas, document},
};
use serde_json::json;

#[test]
fn version_must_be_three() {
    for version in [json!("2.0"), json!(3), json!(null)] {
        let doc = document(json!({ "openapi": version, "components": { "schemas": {} } }));
        let err = build(&doc, &BuildOptions::default()).unwrap_err();

        assert!(
            matches!(err, BuildError::SchemaShape { ref owner, .. } if owner == "openapi"),
            "{version}: {err}"
        );
    }

    let doc = document(json!({ "openapi": "3.1.0" }));
    assert!(build(&doc, &BuildOptions::default()).is_ok());
}

#[test]
fn options_flow_into_entities() {
    let options = BuildOptions::default()
        .with_default_namespace("shop")
        .with_primary_key("uuid")
        .with_table_name("Person", "people");
    let doc = crate::test_fixtures::with_schemas(json!({
        "Person": { "type": "object", "properties": {
            "cart": { "$ref": "#/components/schemas/Cart" }
        }},
        "Cart": { "type": "object", "properties": { "name": { "type": "string" } } }
    }));

    let graph = build(&doc, &options).unwrap();
    let person = &graph.entities["Person"];

    assert_eq!(person.namespace, "shop");
    assert_eq!(person.table_name, "people");
    assert_eq!(person.primary_key, "uuid");
    assert_eq!(
        person.columns["cart_id"].foreign_key.as_deref(),
        Some("shop.carts.uuid")
    );
    assert_eq!(graph.options, options);
}

#[test]
fn cardinality_is_symmetric_across_sides() {
    let graph = build_schemas(json!({
        "Shopper": { "type": "object", "properties": {
            "wallet": { "$ref": "#/components/schemas/Wallet" },
            "orders": { "type": "array", "items": { "$ref": "#/components/schemas/Order" } },
            "stores": { "type": "array", "items": { "$ref": "#/components/schemas/Store" } }
        }},
        "Wallet": { "type": "object", "properties": {
            "owner": { "$ref": "#/components/schemas/Shopper" }
        }},
        "Order": { "type": "object", "properties": {
            "buyer": { "oneOf": [{ "$ref": "#/components/schemas/Shopper" }] }
        }},
        "Store": { "type": "object", "properties": {
            "shoppers": { "type": "array", "items": { "$ref": "#/components/schemas/Shopper" } }
        }}
    }))
    .unwrap();

    let shopper = &graph.entities["Shopper"];
    let pairs = [
        (&shopper.relationships["wallet"], &graph.entities["Wallet"].relationships["owner"]),
        (&shopper.relationships["orders"], &graph.entities["Order"].relationships["buyer_shopper"]),
        (&shopper.relationships["stores"], &graph.entities["Store"].relationships["shoppers"]),
    ];

    for (forward, reverse) in pairs {
        assert_eq!(
            forward.cardinality.inverse(),
            Some(reverse.cardinality),
            "{forward:?} / {reverse:?}"
        );
    }
    assert_eq!(shopper.relationships["orders"].cardinality, Cardinality::OneToMany);
}
