use super::*;

fn comp(name: &str, kind: Option<&str>) -> Component {
    Component {
        name: name.to_owned(),
        kind: kind.map(str::to_owned),
    }
}

fn rel(from: &str, to: &str) -> Relation {
    Relation {
        from: from.to_owned(),
        to: to.to_owned(),
        relation: None,
    }
}

#[test]
fn slugify_lowercases_and_replaces_spaces() {
    assert_eq!(slugify("User Data"), "user_data");
    assert_eq!(slugify("GPU Cluster A"), "gpu_cluster_a");
    assert_eq!(slugify("already_slug"), "already_slug");
}

#[test]
fn single_storage_entity_becomes_storage_node() {
    let plan = build(&[comp("User Data", Some("storage"))], &[]);
    assert_eq!(plan.title, DEFAULT_GRAPH_TITLE);
    assert_eq!(plan.nodes.len(), 1);
    assert_eq!(plan.nodes[0].id, "user_data");
    assert_eq!(plan.nodes[0].label, "User Data");
    assert_eq!(plan.nodes[0].role, Role::Storage);
    assert!(plan.edges.is_empty());
}

#[test]
fn duplicate_slugs_merge_last_write_wins() {
    let plan = build(
        &[
            comp("Data Lake", Some("storage")),
            comp("Trainer", Some("compute")),
            comp("data lake", Some("platform")),
        ],
        &[],
    );
    assert_eq!(plan.nodes.len(), 2);
    assert_eq!(plan.nodes[0].id, "data_lake");
    assert_eq!(plan.nodes[0].label, "data lake");
    assert_eq!(plan.nodes[0].role, Role::Core);
    assert_eq!(plan.nodes[1].id, "trainer");
}

#[test]
fn dangling_relations_are_dropped_silently() {
    let plan = build(
        &[comp("A", None), comp("B", None)],
        &[rel("A", "B"), rel("A", "Ghost"), rel("Nope", "B")],
    );
    assert_eq!(
        plan.edges,
        vec![Edge {
            from: "a".to_owned(),
            to: "b".to_owned()
        }]
    );
}

#[test]
fn relations_resolve_through_slugs_and_dedupe() {
    let plan = build(
        &[comp("Feature Store", Some("storage")), comp("Model", None)],
        &[
            rel("feature store", "MODEL"),
            rel("Feature Store", "Model"),
        ],
    );
    assert_eq!(plan.edges.len(), 1);
    assert_eq!(plan.edges[0].from, "feature_store");
    assert_eq!(plan.edges[0].to, "model");
}

#[test]
fn empty_entities_give_empty_graph() {
    let plan = build(&[], &[rel("A", "B")]);
    assert!(plan.is_empty());
    assert!(plan.edges.is_empty());
}

#[test]
fn build_from_extraction_uses_given_title() {
    let ex = ExtractionResult {
        components: vec![comp("Queue", Some("service"))],
        relations: vec![],
    };
    let plan = build_from_extraction("Messaging", &ex);
    assert_eq!(plan.title, "Messaging");
    assert_eq!(plan.nodes[0].role, Role::External);
}
