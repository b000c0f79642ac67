//! Markup output: serializes the drawable tree to an SVG string (and a static
//! HTML page around it) without touching any display surface.

use std::fmt::Write;

use super::node::{Document, Geometry, Group, Node, Shape, Text};
use super::palette::Fill;

/// Format a coordinate with up to 3 decimals, trimming trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn fill_attrs(fill: &Fill) -> String {
    if fill.opacity < 1.0 {
        format!(r#"fill="{}" fill-opacity="{}""#, fill.rgb.to_hex(), num(fill.opacity))
    } else {
        format!(r#"fill="{}""#, fill.rgb.to_hex())
    }
}

fn class_attr(class: &Option<String>) -> String {
    class
        .as_deref()
        .map(|c| format!(r#" class="{}""#, escape_xml(c)))
        .unwrap_or_default()
}

fn write_shape(out: &mut String, shape: &Shape) {
    let fill = fill_attrs(&shape.fill);
    // writing into a String cannot fail
    let _ = match &shape.geometry {
        Geometry::Rect { x, y, width, height } => write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" {fill}/>"#,
            num(*x),
            num(*y),
            num(*width),
            num(*height)
        ),
        Geometry::Ellipse { cx, cy, rx, ry } => write!(
            out,
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" {fill}/>"#,
            num(*cx),
            num(*cy),
            num(*rx),
            num(*ry)
        ),
        Geometry::Polygon { points } => {
            let pts = points
                .iter()
                .map(|(x, y)| format!("{},{}", num(*x), num(*y)))
                .collect::<Vec<_>>()
                .join(" ");
            write!(out, r#"<polygon points="{pts}" {fill}/>"#)
        }
    };
}

fn write_text(out: &mut String, text: &Text) {
    let dy = text
        .dy_em
        .map(|em| format!(r#" dy="{}em""#, num(em)))
        .unwrap_or_default();
    let _ = write!(
        out,
        r#"<text{} x="{}" y="{}" text-anchor="{}"{dy} font-size="{}">{}</text>"#,
        class_attr(&text.class),
        num(text.x),
        num(text.y),
        text.anchor.as_str(),
        num(text.size),
        escape_xml(&text.content)
    );
}

fn write_group(out: &mut String, group: &Group) {
    let t = &group.transform;
    let transform = if t.is_identity() {
        String::new()
    } else if t.scale == 1.0 {
        format!(r#" transform="translate({}, {})""#, num(t.dx), num(t.dy))
    } else {
        format!(
            r#" transform="translate({}, {}) scale({})""#,
            num(t.dx),
            num(t.dy),
            num(t.scale)
        )
    };
    let _ = write!(out, "<g{}{transform}>", class_attr(&group.class));
    for child in &group.children {
        write_node(out, child);
    }
    out.push_str("</g>");
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Group(g) => write_group(out, g),
        Node::Shape(s) => write_shape(out, s),
        Node::Text(t) => write_text(out, t),
    }
}

/// Serialize a document as a standalone `<svg>` element. The `viewBox` maps
/// the logical layout space onto the physical size.
pub fn render_to_string(document: &Document) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        num(document.width),
        num(document.height),
        num(document.view_width),
        num(document.view_height)
    );
    for child in &document.children {
        write_node(&mut out, child);
    }
    out.push_str("</svg>");
    out
}

/// A complete static HTML page with the chart inside `<main>`.
pub fn render_page(document: &Document, title: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, r#"<html lang="en">"#);
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, r#"<meta charset="utf-8">"#);
    let _ = writeln!(out, "<title>{}</title>", escape_xml(title));
    let _ = writeln!(
        out,
        "<style>body{{margin:0;font-family:sans-serif}} main{{width:100%}}</style>"
    );
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    let _ = writeln!(out, "<main>{}</main>", render_to_string(document));
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}
