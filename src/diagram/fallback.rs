use crate::{
    diagram::model::{GraphPlan, Node, Role},
    narration::slide::Slide,
    pipeline::opts::PipelineOpts,
};

/// Id of the single node in a fallback plan.
pub const FALLBACK_NODE_ID: &str = "core";

/// Deterministic single-node plan used when extraction produced nothing.
///
/// The opening slide is labelled with its first sentence, truncated to
/// `opts.fallback_label_chars` characters. Later slides, and an opening slide with no usable
/// text, use `opts.fallback_label`.
pub fn fallback_plan(slide: &Slide, opts: &PipelineOpts) -> GraphPlan {
    let label = if slide.index == 0 {
        first_sentence(&slide.body_text, opts.fallback_label_chars)
    } else {
        String::new()
    };
    let label = if label.is_empty() {
        opts.fallback_label.clone()
    } else {
        label
    };

    GraphPlan {
        title: format!("Slide {}", slide.index + 1),
        nodes: vec![Node {
            id: FALLBACK_NODE_ID.to_owned(),
            label,
            role: Role::Core,
        }],
        edges: Vec::new(),
    }
}

/// Substitute the fallback for an empty plan, then enforce the node cap.
///
/// Returns the plan to forward and whether the fallback was used. The result always has at
/// least one node.
pub fn finalize_plan(plan: GraphPlan, slide: &Slide, opts: &PipelineOpts) -> (GraphPlan, bool) {
    let (mut plan, used_fallback) = if plan.is_empty() {
        (fallback_plan(slide, opts), true)
    } else {
        (plan, false)
    };
    plan.truncate_nodes(opts.max_nodes.max(1));
    (plan, used_fallback)
}

fn first_sentence(text: &str, max_chars: usize) -> String {
    let sentence = text.split('.').next().unwrap_or_default().trim();
    sentence.chars().take(max_chars).collect::<String>().trim_end().to_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/fallback.rs"]
mod tests;
