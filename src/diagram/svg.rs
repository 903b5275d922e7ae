use std::{collections::HashMap, fmt::Write as _};

use crate::diagram::{
    d2::role_palette,
    model::{Frame, Role},
};

const DEFAULT_FILL: &str = "#f1f5f9";
const DEFAULT_STROKE: &str = "#475569";

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Canvas geometry for SVG frame documents.
pub struct SvgLayout {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Outer margin in pixels.
    pub margin: f64,
    /// Height reserved for the title band.
    pub title_band: f64,
    /// Label font size in pixels.
    pub font_size: f64,
}

impl Default for SvgLayout {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            margin: 48.0,
            title_band: 72.0,
            font_size: 18.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BoxGeom {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

/// Render one frame as a standalone SVG document.
///
/// Roles occupy fixed-pitch columns from the left in reveal order, so a node keeps its position
/// in every later frame of the same slide. Nodes of one role stack vertically, centered in the
/// drawing area.
pub fn frame_to_svg(frame: &Frame, layout: &SvgLayout) -> String {
    let geoms = layout_nodes(frame, layout);
    let w = layout.width;
    let h = layout.height;

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    out.push_str(
        r##"<defs><marker id="arrow" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse"><path d="M 0 0 L 10 5 L 0 10 z" fill="#334155"/></marker></defs>"##,
    );
    out.push('\n');
    let _ = writeln!(
        out,
        r##"<rect x="0" y="0" width="{w}" height="{h}" fill="#ffffff"/>"##
    );
    let _ = writeln!(
        out,
        r##"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="{:.1}" font-weight="bold" text-anchor="middle" fill="#0f172a">{}</text>"##,
        f64::from(w) / 2.0,
        layout.margin + layout.font_size * 1.5,
        layout.font_size * 1.6,
        escape_xml(&frame.title)
    );

    for edge in &frame.edges {
        let (Some(a), Some(b)) = (geoms.get(edge.from.as_str()), geoms.get(edge.to.as_str()))
        else {
            continue;
        };
        let (x1, x2) = if b.x >= a.x + a.w {
            (a.x + a.w, b.x)
        } else if a.x >= b.x + b.w {
            (a.x, b.x + b.w)
        } else {
            (a.x + a.w / 2.0, b.x + b.w / 2.0)
        };
        let _ = writeln!(
            out,
            r##"<line x1="{x1:.1}" y1="{:.1}" x2="{x2:.1}" y2="{:.1}" stroke="#334155" stroke-width="2" marker-end="url(#arrow)"/>"##,
            a.y + a.h / 2.0,
            b.y + b.h / 2.0,
        );
    }

    for node in &frame.nodes {
        let Some(g) = geoms.get(node.id.as_str()) else {
            continue;
        };
        let (fill, stroke) = role_palette(node.role).unwrap_or((DEFAULT_FILL, DEFAULT_STROKE));
        let stroke_width = if frame.is_focus(&node.id) { 4.0 } else { 1.5 };
        let _ = writeln!(
            out,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="10" fill="{fill}" stroke="{stroke}" stroke-width="{stroke_width}"/>"#,
            g.x, g.y, g.w, g.h
        );
        let _ = writeln!(
            out,
            r##"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="{:.1}" text-anchor="middle" dominant-baseline="middle" fill="#0f172a">{}</text>"##,
            g.x + g.w / 2.0,
            g.y + g.h / 2.0,
            layout.font_size,
            escape_xml(&fit_label(&node.label, g.w, layout.font_size))
        );
    }

    out.push_str("</svg>\n");
    out
}

fn layout_nodes<'a>(frame: &'a Frame, layout: &SvgLayout) -> HashMap<&'a str, BoxGeom> {
    let present: Vec<Role> = Role::REVEAL_ORDER
        .into_iter()
        .filter(|r| frame.nodes.iter().any(|n| n.role == *r))
        .collect();

    let left = layout.margin;
    let top = layout.margin + layout.title_band;
    let usable_w = (f64::from(layout.width) - 2.0 * layout.margin).max(1.0);
    let usable_h = (f64::from(layout.height) - top - layout.margin).max(1.0);
    let pitch = usable_w / Role::REVEAL_ORDER.len() as f64;
    let box_w = pitch * 0.8;

    let mut out = HashMap::with_capacity(frame.nodes.len());
    for (col, role) in present.iter().enumerate() {
        let members: Vec<&str> = frame
            .nodes
            .iter()
            .filter(|n| n.role == *role)
            .map(|n| n.id.as_str())
            .collect();
        let rows = members.len() as f64;
        let slot_h = usable_h / rows;
        let box_h = (slot_h * 0.7).min(layout.font_size * 4.0);
        for (row, id) in members.into_iter().enumerate() {
            out.insert(
                id,
                BoxGeom {
                    x: left + pitch * col as f64 + (pitch - box_w) / 2.0,
                    y: top + slot_h * row as f64 + (slot_h - box_h) / 2.0,
                    w: box_w,
                    h: box_h,
                },
            );
        }
    }
    out
}

fn fit_label(label: &str, box_w: f64, font_size: f64) -> String {
    let max_chars = ((box_w / (font_size * 0.55)).floor() as usize).max(4);
    if label.chars().count() <= max_chars {
        return label.to_owned();
    }
    let mut s: String = label.chars().take(max_chars - 1).collect();
    s.push('…');
    s
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/svg.rs"]
mod tests;
