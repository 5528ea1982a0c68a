//! Serializes recorded draw calls as a standalone SVG document.

use std::fmt::Write;

use super::{DrawCall, Shape, Size};
use crate::keyframe::Rgba;

/// Renders `calls` back-to-front into an SVG document of the given size.
pub fn to_svg(size: Size, calls: &[DrawCall], background: Option<Rgba>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = size.width,
        h = size.height,
    );

    if let Some(color) = background {
        let _ = writeln!(
            out,
            r#"  <rect width="100%" height="100%" {}/>"#,
            fill_attrs(color, 1.0)
        );
    }

    for call in calls {
        let _ = writeln!(out, "  {}", element(call));
    }

    out.push_str("</svg>\n");
    out
}

fn element(call: &DrawCall) -> String {
    let fill = fill_attrs(call.fill, call.opacity);
    let transform = if call.rotation == 0.0 {
        String::new()
    } else {
        format!(
            r#" transform="rotate({} {} {})""#,
            call.rotation, call.pivot.x, call.pivot.y
        )
    };

    match &call.shape {
        Shape::Circle { center, radius } => format!(
            r#"<circle cx="{}" cy="{}" r="{}" {fill}{transform}/>"#,
            center.x, center.y, radius
        ),
        Shape::Rect {
            top_left,
            size,
            corner_radius,
        } => {
            // SVG clamps rx/ry to half the side; match that up front.
            let rx = corner_radius
                .min(size.width / 2.0)
                .min(size.height / 2.0)
                .max(0.0);
            format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{rx}" ry="{rx}" {fill}{transform}/>"#,
                top_left.x, top_left.y, size.width, size.height
            )
        }
        Shape::Triangle { vertices } => {
            let points = vertices
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            format!(r#"<polygon points="{points}" {fill}{transform}/>"#)
        }
    }
}

fn fill_attrs(color: Rgba, opacity: f32) -> String {
    let [r, g, b, _] = color.to_bytes();
    let alpha = (color.a * opacity).clamp(0.0, 1.0);
    format!(r##"fill="#{r:02x}{g:02x}{b:02x}" fill-opacity="{alpha}""##)
}
