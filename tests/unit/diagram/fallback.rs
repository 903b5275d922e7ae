use super::*;
use crate::diagram::model::Edge;

fn plan_with(n: usize) -> GraphPlan {
    let nodes: Vec<Node> = (0..n)
        .map(|i| Node {
            id: format!("n{i}"),
            label: format!("N{i}"),
            role: Role::Process,
        })
        .collect();
    let edges = (1..n)
        .map(|i| Edge {
            from: format!("n{}", i - 1),
            to: format!("n{i}"),
        })
        .collect();
    GraphPlan {
        title: "t".to_owned(),
        nodes,
        edges,
    }
}

#[test]
fn opening_slide_uses_first_sentence() {
    let slide = Slide::new(0, "Slide 1:", "Kubernetes orchestrates containers. It also heals.");
    let plan = fallback_plan(&slide, &PipelineOpts::default());
    assert_eq!(plan.title, "Slide 1");
    assert_eq!(plan.nodes.len(), 1);
    assert_eq!(plan.nodes[0].id, FALLBACK_NODE_ID);
    assert_eq!(plan.nodes[0].label, "Kubernetes orchestrates containers");
    assert_eq!(plan.nodes[0].role, Role::Core);
    assert!(plan.edges.is_empty());
}

#[test]
fn opening_label_is_truncated_by_chars() {
    let slide = Slide::new(0, "Slide 1:", "ééééééééééééééééééééééééééééééééééééééééééééé");
    let opts = PipelineOpts {
        fallback_label_chars: 5,
        ..PipelineOpts::default()
    };
    assert_eq!(fallback_plan(&slide, &opts).nodes[0].label, "ééééé");
}

#[test]
fn later_and_blank_slides_use_configured_label() {
    let opts = PipelineOpts::default();
    let later = fallback_plan(&Slide::new(3, "Slide 4:", "Some text."), &opts);
    assert_eq!(later.title, "Slide 4");
    assert_eq!(later.nodes[0].label, opts.fallback_label);

    let blank = fallback_plan(&Slide::new(0, "Slide 1:", ""), &opts);
    assert_eq!(blank.nodes[0].label, opts.fallback_label);
}

#[test]
fn finalize_substitutes_fallback_for_empty_plan() {
    let slide = Slide::new(1, "Slide 2:", "x");
    let (plan, used) = finalize_plan(GraphPlan::default(), &slide, &PipelineOpts::default());
    assert!(used);
    assert_eq!(plan.nodes.len(), 1);
}

#[test]
fn finalize_caps_nodes_without_dangling_edges() {
    let slide = Slide::new(0, "Slide 1:", "x");
    let opts = PipelineOpts {
        max_nodes: 3,
        ..PipelineOpts::default()
    };
    let (plan, used) = finalize_plan(plan_with(5), &slide, &opts);
    assert!(!used);
    assert_eq!(plan.nodes.len(), 3);
    let ids = ["n0", "n1", "n2"];
    for e in &plan.edges {
        assert!(ids.contains(&e.from.as_str()) && ids.contains(&e.to.as_str()));
    }
    assert_eq!(plan.edges.len(), 2);
}
