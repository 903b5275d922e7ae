use crate::diagram::model::{Frame, Role};

/// Fill/stroke colors for a role. Roles without a palette entry use the D2 defaults.
pub fn role_palette(role: Role) -> Option<(&'static str, &'static str)> {
    match role {
        Role::Core => Some(("#e0f2fe", "#0369a1")),
        Role::Input => Some(("#dcfce7", "#166534")),
        Role::Output => Some(("#fee2e2", "#991b1b")),
        Role::External => Some(("#ede9fe", "#5b21b6")),
        Role::Storage | Role::Process => None,
    }
}

/// Render one frame as D2 source, laid out left to right.
///
/// Ids and labels are quoted, so slugs containing `.` or other D2 syntax stay literal. The focus
/// node is drawn with a bold, thick stroke.
pub fn frame_to_d2(frame: &Frame) -> String {
    let mut out = String::from("direction: right\n\n");

    for node in &frame.nodes {
        let mut style = Vec::<String>::new();
        if let Some((fill, stroke)) = role_palette(node.role) {
            style.push(format!("style.fill: \"{fill}\""));
            style.push(format!("style.stroke: \"{stroke}\""));
        }
        if frame.is_focus(&node.id) {
            style.push("style.stroke-width: 4".to_owned());
            style.push("style.bold: true".to_owned());
        }
        out.push_str(&format!(
            "\"{}\": \"{}\" {{ {} }}\n",
            escape_d2(&node.id),
            escape_d2(&node.label),
            style.join("; ")
        ));
    }

    out.push('\n');

    for edge in &frame.edges {
        out.push_str(&format!(
            "\"{}\" -> \"{}\"\n",
            escape_d2(&edge.from),
            escape_d2(&edge.to)
        ));
    }

    out
}

fn escape_d2(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', " ")
        .replace(':', " -")
        .trim()
        .to_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/d2.rs"]
mod tests;
