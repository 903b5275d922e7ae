use std::collections::HashSet;

use crate::diagram::model::{Frame, GraphPlan, Node, Role};

/// Expand a graph into progressive reveal frames.
///
/// Roles are revealed in [`Role::REVEAL_ORDER`]. Each present role adds all of its nodes to the
/// visible set and emits one frame holding every visible node (role-ordered, input order within a
/// role) plus every edge with both endpoints visible. The focus is the last node of the role just
/// added. Absent roles emit nothing, so a plan yields between one and six frames, each a strict
/// superset of the previous one.
///
/// An empty plan yields a single passthrough frame with no focus.
#[tracing::instrument(skip(plan), fields(nodes = plan.nodes.len(), edges = plan.edges.len()))]
pub fn sequence(plan: &GraphPlan) -> Vec<Frame> {
    if plan.nodes.is_empty() {
        return vec![Frame {
            step: 0,
            title: plan.title.clone(),
            nodes: plan.nodes.clone(),
            edges: plan.edges.clone(),
            focus_node_id: None,
        }];
    }

    let mut frames = Vec::with_capacity(Role::REVEAL_ORDER.len());
    let mut visible_nodes: Vec<Node> = Vec::with_capacity(plan.nodes.len());
    let mut visible_ids = HashSet::<&str>::with_capacity(plan.nodes.len());

    for role in Role::REVEAL_ORDER {
        let mut focus = None;
        for node in plan.nodes.iter().filter(|n| n.role == role) {
            visible_nodes.push(node.clone());
            visible_ids.insert(node.id.as_str());
            focus = Some(node.id.clone());
        }
        let Some(focus) = focus else {
            continue;
        };

        let edges = plan
            .edges
            .iter()
            .filter(|e| visible_ids.contains(e.from.as_str()) && visible_ids.contains(e.to.as_str()))
            .cloned()
            .collect();

        frames.push(Frame {
            step: frames.len(),
            title: plan.title.clone(),
            nodes: visible_nodes.clone(),
            edges,
            focus_node_id: Some(focus),
        });
    }

    frames
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/sequence.rs"]
mod tests;
