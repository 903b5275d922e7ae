use super::*;
use crate::diagram::builder::build;
use crate::diagram::extract::{Component, Relation};
use crate::diagram::model::Edge;

fn node(id: &str, role: Role) -> Node {
    Node {
        id: id.to_owned(),
        label: id.to_uppercase(),
        role,
    }
}

fn edge(from: &str, to: &str) -> Edge {
    Edge {
        from: from.to_owned(),
        to: to.to_owned(),
    }
}

fn ids(frame: &Frame) -> Vec<&str> {
    frame.nodes.iter().map(|n| n.id.as_str()).collect()
}

fn mixed_plan() -> GraphPlan {
    GraphPlan {
        title: "Pipeline".to_owned(),
        nodes: vec![
            node("api", Role::External),
            node("trainer", Role::Process),
            node("lake", Role::Storage),
            node("ingest", Role::Input),
            node("warehouse", Role::Storage),
        ],
        edges: vec![
            edge("ingest", "lake"),
            edge("lake", "trainer"),
            edge("trainer", "api"),
            edge("warehouse", "trainer"),
        ],
    }
}

#[test]
fn single_storage_entity_yields_one_focused_frame() {
    let plan = build(
        &[Component {
            name: "User Data".to_owned(),
            kind: Some("storage".to_owned()),
        }],
        &[],
    );
    let frames = sequence(&plan);
    assert_eq!(frames.len(), 1);
    assert_eq!(ids(&frames[0]), ["user_data"]);
    assert_eq!(frames[0].focus_node_id.as_deref(), Some("user_data"));
}

#[test]
fn roles_reveal_in_precedence_order() {
    let frames = sequence(&mixed_plan());
    assert_eq!(frames.len(), 4);
    assert_eq!(ids(&frames[0]), ["ingest"]);
    assert_eq!(ids(&frames[1]), ["ingest", "lake", "warehouse"]);
    assert_eq!(ids(&frames[2]), ["ingest", "lake", "warehouse", "trainer"]);
    assert_eq!(
        ids(&frames[3]),
        ["ingest", "lake", "warehouse", "trainer", "api"]
    );
    let focus: Vec<_> = frames
        .iter()
        .map(|f| f.focus_node_id.as_deref().unwrap())
        .collect();
    assert_eq!(focus, ["ingest", "warehouse", "trainer", "api"]);
    let steps: Vec<_> = frames.iter().map(|f| f.step).collect();
    assert_eq!(steps, [0, 1, 2, 3]);
}

#[test]
fn edges_are_restricted_to_visible_nodes() {
    let frames = sequence(&mixed_plan());
    assert!(frames[0].edges.is_empty());
    assert_eq!(frames[1].edges, vec![edge("ingest", "lake")]);
    assert_eq!(
        frames[2].edges,
        vec![
            edge("ingest", "lake"),
            edge("lake", "trainer"),
            edge("warehouse", "trainer")
        ]
    );
    assert_eq!(frames[3].edges.len(), 4);
}

#[test]
fn frames_grow_strictly_and_end_with_full_node_set() {
    let plan = mixed_plan();
    let frames = sequence(&plan);
    for pair in frames.windows(2) {
        let prev = pair[0].visible_ids();
        let next = pair[1].visible_ids();
        assert!(prev.is_subset(&next));
        assert!(next.len() > prev.len());
    }
    let all: HashSet<&str> = plan.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(frames.last().unwrap().visible_ids(), all);
}

#[test]
fn every_role_present_gives_six_frames() {
    let plan = GraphPlan {
        title: "t".to_owned(),
        nodes: Role::REVEAL_ORDER
            .iter()
            .rev()
            .map(|r| node(r.as_str(), *r))
            .collect(),
        edges: vec![],
    };
    let frames = sequence(&plan);
    assert_eq!(frames.len(), 6);
    assert_eq!(frames[5].nodes.len(), 6);
    assert_eq!(frames[0].focus_node_id.as_deref(), Some("input"));
}

#[test]
fn empty_plan_passes_through_as_single_frame() {
    let plan = GraphPlan {
        title: "Empty".to_owned(),
        nodes: vec![],
        edges: vec![edge("x", "y")],
    };
    let frames = sequence(&plan);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].title, "Empty");
    assert!(frames[0].nodes.is_empty());
    assert_eq!(frames[0].edges, plan.edges);
    assert_eq!(frames[0].focus_node_id, None);
}

#[test]
fn sequencing_is_deterministic() {
    let plan = build(
        &[
            Component {
                name: "B".to_owned(),
                kind: Some("platform".to_owned()),
            },
            Component {
                name: "A".to_owned(),
                kind: Some("storage".to_owned()),
            },
        ],
        &[Relation {
            from: "A".to_owned(),
            to: "B".to_owned(),
            relation: None,
        }],
    );
    assert_eq!(sequence(&plan), sequence(&plan));
}
