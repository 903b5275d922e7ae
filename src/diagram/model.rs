use std::collections::HashSet;

/// Node identifier, slug-derived from the node label.
pub type NodeId = String;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// Visual category of a diagram node. Declaration order is reveal order.
pub enum Role {
    /// Entry points and data sources.
    Input,
    /// Persistent stores.
    Storage,
    /// The central platform.
    Core,
    /// Compute and processing steps (default).
    Process,
    /// Results and sinks.
    Output,
    /// Third-party services.
    External,
}

impl Role {
    /// Fixed reveal precedence used by [`crate::sequence`].
    pub const REVEAL_ORDER: [Role; 6] = [
        Role::Input,
        Role::Storage,
        Role::Core,
        Role::Process,
        Role::Output,
        Role::External,
    ];

    /// Map an extractor component type onto a role.
    ///
    /// Unknown and missing types fall back to [`Role::Process`].
    pub fn from_component_type(kind: Option<&str>) -> Self {
        match kind {
            Some("storage") => Role::Storage,
            Some("compute") => Role::Process,
            Some("platform") => Role::Core,
            Some("service") => Role::External,
            _ => Role::Process,
        }
    }

    /// Lowercase name as used in serialized plans.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Input => "input",
            Role::Storage => "storage",
            Role::Core => "core",
            Role::Process => "process",
            Role::Output => "output",
            Role::External => "external",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A diagram component.
pub struct Node {
    /// Unique id within the graph.
    pub id: NodeId,
    /// Display label.
    pub label: String,
    /// Visual role.
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Directed connection between two nodes of the same graph.
pub struct Edge {
    /// Source node id.
    pub from: NodeId,
    /// Target node id.
    pub to: NodeId,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Node/edge graph for one slide.
pub struct GraphPlan {
    /// Diagram title.
    pub title: String,
    /// Nodes with unique ids, in input order.
    pub nodes: Vec<Node>,
    /// Edges whose endpoints both exist in `nodes`.
    pub edges: Vec<Edge>,
}

impl GraphPlan {
    /// `true` when the plan has nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Keep the first `max_nodes` nodes and drop edges that lose an endpoint.
    pub fn truncate_nodes(&mut self, max_nodes: usize) {
        if self.nodes.len() <= max_nodes {
            return;
        }
        self.nodes.truncate(max_nodes);
        let kept: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges
            .retain(|e| kept.contains(e.from.as_str()) && kept.contains(e.to.as_str()));
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One progressive reveal snapshot of a slide diagram.
pub struct Frame {
    /// Reveal step within the slide (0-based).
    pub step: usize,
    /// Diagram title carried over from the plan.
    pub title: String,
    /// Every node visible so far, role-ordered.
    pub nodes: Vec<Node>,
    /// Edges between visible nodes.
    pub edges: Vec<Edge>,
    /// Newest node to highlight. `None` only for an empty passthrough frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_node_id: Option<NodeId>,
}

impl Frame {
    /// Ids of all visible nodes.
    pub fn visible_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    /// `true` when `id` is the highlighted node.
    pub fn is_focus(&self, id: &str) -> bool {
        self.focus_node_id.as_deref() == Some(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/model.rs"]
mod tests;
