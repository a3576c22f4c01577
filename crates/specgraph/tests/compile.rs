use serde_json::{Value, json};
use specgraph::{
    ErrorKind, ErrorOrigin, compile,
    core::{graph::ModelGraph, model::Cardinality, options::BuildOptions},
    schema::types::HttpMethod,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

fn fixture(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(rel)
}

fn compile_fixture(rel: &str) -> ModelGraph {
    compile(&fixture(rel), &BuildOptions::default()).unwrap()
}

fn write(dir: &Path, rel: &str, value: &Value) -> PathBuf {
    let path = dir.join(rel);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

//
// relationships
//

#[test]
fn array_property_without_back_reference() {
    let graph = compile_fixture("grocery.json");

    let cart = &graph.entities["Cart"];
    let item = &graph.entities["GroceryItem"];
    let rel = &cart.relationships["groceryitems"];

    assert_eq!(cart.namespace, "grocery");
    assert_eq!(cart.table_name, "carts");
    assert_eq!(rel.cardinality, Cardinality::ToMany);
    assert!(rel.uses_list);
    assert_eq!(
        item.columns["cart_id"].foreign_key.as_deref(),
        Some("grocery.carts.identifier")
    );
    assert!(!cart.columns["name"].nullable);
    assert_eq!(cart.columns["name"].max_length, Some(100));
}

#[test]
fn reciprocal_references_are_one_to_one() {
    let graph = compile_fixture("grocery.json");

    let shopper = &graph.entities["Shopper"];
    let wallet = &graph.entities["Wallet"];

    assert_eq!(shopper.relationships["wallet"].cardinality, Cardinality::OneToOne);
    assert_eq!(wallet.relationships["owner"].cardinality, Cardinality::OneToOne);
    assert_eq!(
        shopper.columns["wallet_id"].foreign_key.as_deref(),
        Some("grocery.wallets.identifier")
    );
    assert!(!wallet.columns.contains_key("shopper_id"));
}

#[test]
fn one_of_alternatives_compile_by_kind() {
    let graph = compile_fixture("grocery.json");
    let cart = &graph.entities["Cart"];

    assert!(cart.columns["cartitems_string"].nullable);
    assert_eq!(
        cart.relationships["cartitems_groceryitem"].cardinality,
        Cardinality::ToOne
    );
    assert_eq!(
        cart.columns["groceryitem_id"].foreign_key.as_deref(),
        Some("grocery.groceryitems.identifier")
    );
}

#[test]
fn every_key_points_at_a_known_table() {
    let graph = compile_fixture("grocery.json");

    for key in graph.foreign_keys() {
        assert!(
            graph
                .entities
                .values()
                .any(|e| e.foreign_key_target() == key.target),
            "{}.{} -> {}",
            key.owner,
            key.column,
            key.target
        );
    }
    assert_eq!(graph.foreign_keys().count(), 3);
}

//
// composition
//

#[test]
fn all_of_yaml_document() {
    let graph = compile_fixture("steak.yaml");
    let steak = &graph.entities["Steak"];

    assert_eq!(
        steak.columns.keys().collect::<Vec<_>>(),
        ["type", "animal", "steakType", "weight"]
    );
    assert!(!steak.columns["animal"].nullable);
    assert!(steak.columns["weight"].nullable);
    assert_eq!(steak.columns["weight"].ty.to_string(), "Float");
    assert_eq!(graph.entities["Meat"].columns.len(), 2);
}

//
// endpoints
//

#[test]
fn endpoints_keep_supported_methods() {
    let graph = compile_fixture("grocery.json");
    let carts = &graph.endpoints["/carts"];

    assert_eq!(carts.namespace, "grocery");
    assert_eq!(carts.microservice.as_deref(), Some("grocery"));
    assert_eq!(carts.methods.len(), 4);
    assert!(!carts.methods.contains_key(&HttpMethod::Head));
    assert_eq!(graph.servers[0].url, "http://localhost:5000/api");
    assert_eq!(graph.microservices, ["grocery"]);

    let get = &carts.methods[&HttpMethod::Get];
    let response = get.response.as_ref().unwrap();
    assert!(get.supported);
    assert_eq!(response.success_code, 200);
    assert_eq!(response.entity.as_deref(), Some("Cart"));
    assert_eq!(get.query_params, ["limit"]);

    let post = &carts.methods[&HttpMethod::Post];
    assert_eq!(post.request.as_deref(), Some("Cart"));
    assert_eq!(post.response.as_ref().unwrap().success_code, 201);

    assert!(!carts.methods[&HttpMethod::Delete].supported);
    assert!(!carts.methods[&HttpMethod::Put].supported);
}

#[test]
fn namespaces_group_the_graph() {
    let graph = compile_fixture("grocery.json");
    let grocery = &graph.namespaces["grocery"];

    assert_eq!(graph.namespaces.len(), 1);
    assert_eq!(grocery.entities, ["Cart", "GroceryItem", "Shopper", "Wallet"]);
    assert_eq!(grocery.endpoints, ["/carts"]);
    assert!(grocery.relationships.contains(&"Cart.groceryitems".to_string()));
}

//
// multi-file
//

#[test]
fn split_document_inlines_nested_files() {
    let merged = specgraph::merge_file(&fixture("split/root.json")).unwrap();
    let schemas = &merged.document["components"]["schemas"];

    assert_eq!(
        schemas["car"]["properties"]["wheels"]["items"]["$ref"],
        "#/components/schemas/wheel"
    );
    assert_eq!(
        schemas["wheel"]["properties"]["tire"]["$ref"],
        "#/components/schemas/tire"
    );
    assert_eq!(
        schemas["tire"]["properties"]["wheel"]["$ref"],
        "#/components/schemas/wheel"
    );
    assert_eq!(merged.inlined.len(), 2);
}

#[test]
fn split_document_compiles() {
    let graph = compile_fixture("split/root.json");

    let wheel = &graph.entities["wheel"];
    let tire = &graph.entities["tire"];

    assert_eq!(
        graph.entities["car"].relationships["wheels"].cardinality,
        Cardinality::ToMany
    );
    assert_eq!(
        wheel.columns["car_id"].foreign_key.as_deref(),
        Some("default.cars.identifier")
    );
    assert_eq!(wheel.relationships["tire"].cardinality, Cardinality::OneToOne);
    assert_eq!(
        tire.columns["wheel_id"].foreign_key.as_deref(),
        Some("default.wheels.identifier")
    );
    assert!(!wheel.columns.contains_key("tire_id"));
}

#[test]
fn merged_output_is_stable() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("merged.json");

    let first = specgraph::merge_file(&fixture("split/root.json")).unwrap();
    specgraph::write_document(&out, &first.document).unwrap();

    let second = specgraph::merge_file(&out).unwrap();
    assert_eq!(first.document, second.document);
    assert!(second.inlined.is_empty());
}

#[test]
fn sources_merge_into_master() {
    let sources = [
        fixture("sources/grocery.json"),
        fixture("sources/accounts.json"),
    ];
    let merged = specgraph::merge_sources(&fixture("sources/master.yaml"), &sources).unwrap();
    let schemas = &merged["components"]["schemas"];

    assert_eq!(merged["info"]["title"], "Combined");
    assert!(merged["paths"].get("/stale").is_none());
    assert!(merged["paths"]["/carts"].get("x-controller").is_none());
    assert!(merged["paths"].get("/accounts").is_some());
    assert!(schemas.get("Stale").is_none());
    assert!(schemas["Cart"].get("x-model").is_none());
    assert!(schemas["Cart"]["properties"].get("audit").is_none());
    assert_eq!(
        schemas["Cart"]["properties"]["owner"]["$ref"],
        "#/components/schemas/Account"
    );
    // accounts.json comes last and wins
    assert!(schemas["Account"]["properties"].get("verified").is_none());
    assert_eq!(merged["components"]["parameters"]["limit"]["in"], "query");

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("api.yaml");
    specgraph::write_document(&out, &merged).unwrap();

    let graph = compile(&out, &BuildOptions::default()).unwrap();
    let cart = &graph.entities["Cart"];
    assert_eq!(cart.relationships["owner"].cardinality, Cardinality::ToOne);
    assert!(cart.columns.contains_key("account_id"));
    assert_eq!(
        graph.endpoints["/accounts"].methods[&HttpMethod::Delete]
            .response
            .as_ref()
            .unwrap()
            .success_code,
        204
    );
}

//
// options
//

#[test]
fn config_next_to_the_input_is_discovered() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "api.json",
        &json!({
            "openapi": "3.0.1",
            "paths": {},
            "components": { "schemas": {
                "Person": { "type": "object", "properties": { "name": { "type": "string" } } }
            }}
        }),
    );
    fs::write(
        dir.path().join("specgraph.toml"),
        "default_namespace = \"people\"\nprimary_key = \"uuid\"\n\n[table_names]\nPerson = \"folks\"\n",
    )
    .unwrap();

    let options = specgraph::options_for(&input, None).unwrap();
    let graph = compile(&input, &options).unwrap();
    let person = &graph.entities["Person"];

    assert_eq!(person.namespace, "people");
    assert_eq!(person.table_name, "folks");
    assert_eq!(person.foreign_key_target(), "people.folks.uuid");
    assert_eq!(graph.options.primary_key, "uuid");
}

#[test]
fn invalid_config_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, "primary_kee = \"uuid\"\n").unwrap();

    let err = specgraph::options_for(&fixture("grocery.json"), Some(&config)).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Config);
    assert_eq!(err.origin, ErrorOrigin::Config);
}

//
// graph output
//

#[test]
fn written_graph_reads_back() {
    let graph = compile_fixture("grocery.json");
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("graph.json");

    specgraph::write_graph(&out, &graph).unwrap();
    let text = fs::read_to_string(&out).unwrap();

    assert_eq!(ModelGraph::from_json(&text).unwrap(), graph);
    assert!(text.contains("\"ONE_TO_ONE\""));
}

//
// errors
//

#[test]
fn unknown_extension_is_a_format_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("api.txt");
    fs::write(&input, "openapi: 3.0.0").unwrap();

    let err = compile(&input, &BuildOptions::default()).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Format);
}

#[test]
fn missing_file_is_broken() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "api.json",
        &json!({
            "openapi": "3.0.0",
            "paths": {},
            "components": { "schemas": {
                "Cart": { "type": "object", "properties": {
                    "owner": { "$ref": "missing.json#/components/schemas/Owner" }
                }}
            }}
        }),
    );

    let err = compile(&input, &BuildOptions::default()).unwrap_err();

    assert_eq!(err.kind, ErrorKind::BrokenReference);
    assert_eq!(err.origin, ErrorOrigin::Merge);
}

#[test]
fn alias_cycle_across_files_is_rejected() {
    let err = compile(&fixture("cycle/root.json"), &BuildOptions::default()).unwrap_err();

    assert_eq!(err.kind, ErrorKind::SchemaShape);
    assert_eq!(err.origin, ErrorOrigin::Merge);
}

#[test]
fn cross_namespace_many_to_many_is_unsupported() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "api.json",
        &json!({
            "openapi": "3.0.0",
            "paths": {},
            "components": { "schemas": {
                "Post": { "type": "object", "x-namespace": "blog", "properties": {
                    "tags": { "type": "array", "items": { "$ref": "#/components/schemas/Tag" } }
                }},
                "Tag": { "type": "object", "x-namespace": "taxonomy", "properties": {
                    "posts": { "type": "array", "items": { "$ref": "#/components/schemas/Post" } }
                }}
            }}
        }),
    );

    let err = compile(&input, &BuildOptions::default()).unwrap_err();

    assert_eq!(err.kind, ErrorKind::UnsupportedRelationship);
    assert!(err.message.contains("blog"), "{}", err.message);
}
