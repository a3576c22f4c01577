use crate::{
    build,
    model::Cardinality,
    options::BuildOptions,
    test_fixtures::with_schemas,
};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

const NAMES: [&str; 5] = ["Alpha", "Bravo", "Charlie", "Delta", "Echo"];

///
/// Edge
///
/// `from.prop` references `to`, once or as an array.
///

#[derive(Clone, Debug)]
struct Edge {
    from: usize,
    to: usize,
    many: bool,
}

fn arb_edge() -> impl Strategy<Value = Edge> {
    (0..NAMES.len(), 0..NAMES.len(), any::<bool>()).prop_map(|(from, to, many)| Edge {
        from,
        to,
        many,
    })
}

// every definition lives in one namespace, so many-to-many never fails
fn schemas(edges: &[Edge], order: &[usize]) -> Value {
    let mut table = Map::new();

    for &i in order {
        let mut properties = Map::new();
        properties.insert("label".to_string(), json!({ "type": "string" }));

        for (n, edge) in edges.iter().enumerate().filter(|(_, e)| e.from == i) {
            let reference = json!({ "$ref": format!("#/components/schemas/{}", NAMES[edge.to]) });
            let prop = if edge.many {
                json!({ "type": "array", "items": reference })
            } else {
                reference
            };
            properties.insert(format!("link{n}"), prop);
        }

        table.insert(
            NAMES[i].to_string(),
            json!({ "type": "object", "properties": properties }),
        );
    }

    Value::Object(table)
}

fn arb_order() -> impl Strategy<Value = Vec<usize>> {
    Just((0..NAMES.len()).collect::<Vec<_>>()).prop_shuffle()
}

proptest! {
    #[test]
    fn every_key_is_bound_to_an_existing_table(
        edges in prop::collection::vec(arb_edge(), 0..8),
        order in arb_order(),
    ) {
        let graph = build(&with_schemas(schemas(&edges, &order)), &BuildOptions::default()).unwrap();

        for key in graph.foreign_keys() {
            let parts: Vec<_> = key.target.split('.').collect();
            prop_assert_eq!(parts.len(), 3);
            prop_assert!(
                graph.entities.values().any(|e| e.namespace == parts[0]
                    && e.table_name == parts[1]
                    && e.primary_key == parts[2]),
                "{} has no table", key.target
            );
        }
    }

    #[test]
    fn one_to_one_placement_ignores_definition_order(
        a in 0..NAMES.len(),
        b in 0..NAMES.len(),
        first in arb_order(),
        second in arb_order(),
    ) {
        prop_assume!(a != b);
        let edges = [
            Edge { from: a, to: b, many: false },
            Edge { from: b, to: a, many: false },
        ];

        let one = build(&with_schemas(schemas(&edges, &first)), &BuildOptions::default()).unwrap();
        let two = build(&with_schemas(schemas(&edges, &second)), &BuildOptions::default()).unwrap();

        let keys = |g: &crate::graph::ModelGraph| {
            let mut keys: Vec<_> = g
                .foreign_keys()
                .map(|k| (k.owner.to_string(), k.column.to_string(), k.target.to_string()))
                .collect();
            keys.sort();
            keys
        };

        prop_assert_eq!(keys(&one), keys(&two));
        prop_assert_eq!(keys(&one).len(), 1);

        let (low, _) = if NAMES[a] < NAMES[b] { (NAMES[a], NAMES[b]) } else { (NAMES[b], NAMES[a]) };
        prop_assert_eq!(&keys(&one)[0].0, low);
        prop_assert_eq!(
            one.entities[NAMES[a]].relationships["link0"].cardinality,
            Cardinality::OneToOne
        );
    }
}
