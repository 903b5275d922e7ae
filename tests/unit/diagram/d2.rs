use super::*;
use crate::diagram::model::{Edge, Node};

fn frame() -> Frame {
    Frame {
        step: 1,
        title: "Arch".to_owned(),
        nodes: vec![
            Node {
                id: "ingest".to_owned(),
                label: "Ingest".to_owned(),
                role: Role::Input,
            },
            Node {
                id: "lake".to_owned(),
                label: "Data \"Lake\": raw".to_owned(),
                role: Role::Storage,
            },
        ],
        edges: vec![Edge {
            from: "ingest".to_owned(),
            to: "lake".to_owned(),
        }],
        focus_node_id: Some("lake".to_owned()),
    }
}

#[test]
fn d2_source_has_direction_nodes_and_edges() {
    let src = frame_to_d2(&frame());
    let lines: Vec<&str> = src.lines().collect();
    assert_eq!(lines[0], "direction: right");
    assert_eq!(
        lines[2],
        r##""ingest": "Ingest" { style.fill: "#dcfce7"; style.stroke: "#166534" }"##
    );
    assert!(src.contains(r#""ingest" -> "lake""#));
}

#[test]
fn labels_are_escaped() {
    let src = frame_to_d2(&frame());
    assert!(src.contains(r#""Data \"Lake\" - raw""#));
}

#[test]
fn focus_node_is_emphasized() {
    let src = frame_to_d2(&frame());
    let lake = src.lines().find(|l| l.starts_with("\"lake\"")).unwrap();
    assert!(lake.contains("style.stroke-width: 4"));
    let ingest = src.lines().find(|l| l.starts_with("\"ingest\":")).unwrap();
    assert!(!ingest.contains("stroke-width"));
}

#[test]
fn storage_and_process_have_no_palette() {
    assert_eq!(role_palette(Role::Storage), None);
    assert_eq!(role_palette(Role::Process), None);
    assert_eq!(role_palette(Role::Core), Some(("#e0f2fe", "#0369a1")));
}
