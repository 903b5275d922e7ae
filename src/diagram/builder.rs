use std::collections::{HashMap, HashSet};

use crate::diagram::{
    extract::{Component, ExtractionResult, Relation},
    model::{Edge, GraphPlan, Node, NodeId, Role},
};

/// Default title for graphs built from extracted entities.
pub const DEFAULT_GRAPH_TITLE: &str = "System Architecture";

/// Canonical node id for a component name: lowercase, spaces replaced by underscores.
pub fn slugify(name: &str) -> NodeId {
    name.to_lowercase().replace(' ', "_")
}

/// Map extracted entities and relations onto a node/edge graph.
///
/// - Duplicate slugs merge into one node: first position, last label/role.
/// - Relations with an endpoint that matches no node are dropped.
/// - Duplicate edges collapse to one.
///
/// An empty entity list yields an empty graph. Substituting a fallback is the caller's job
/// (see [`crate::fallback_plan`]).
pub fn build(entities: &[Component], relations: &[Relation]) -> GraphPlan {
    build_titled(DEFAULT_GRAPH_TITLE, entities, relations)
}

/// [`build`] with an explicit diagram title.
pub fn build_titled(
    title: impl Into<String>,
    entities: &[Component],
    relations: &[Relation],
) -> GraphPlan {
    let mut nodes: Vec<Node> = Vec::with_capacity(entities.len());
    let mut slot_by_id: HashMap<NodeId, usize> = HashMap::with_capacity(entities.len());

    for entity in entities {
        let node = Node {
            id: slugify(&entity.name),
            label: entity.name.clone(),
            role: Role::from_component_type(entity.kind.as_deref()),
        };
        match slot_by_id.get(&node.id) {
            Some(&slot) => nodes[slot] = node,
            None => {
                slot_by_id.insert(node.id.clone(), nodes.len());
                nodes.push(node);
            }
        }
    }

    let mut seen = HashSet::<Edge>::new();
    let mut edges = Vec::new();
    for relation in relations {
        let edge = Edge {
            from: slugify(&relation.from),
            to: slugify(&relation.to),
        };
        if !slot_by_id.contains_key(&edge.from) || !slot_by_id.contains_key(&edge.to) {
            tracing::debug!(from = %edge.from, to = %edge.to, "dropping dangling relation");
            continue;
        }
        if seen.insert(edge.clone()) {
            edges.push(edge);
        }
    }

    GraphPlan {
        title: title.into(),
        nodes,
        edges,
    }
}

/// [`build_titled`] over a whole extractor response.
pub fn build_from_extraction(title: impl Into<String>, extraction: &ExtractionResult) -> GraphPlan {
    build_titled(title, &extraction.components, &extraction.relations)
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/builder.rs"]
mod tests;
