use std::fmt::Write;

use crate::chart::scene::{Scene, TextAnchor};

const ACCENT: &str = "#0077cc";
const GRID_STROKE: &str = "#eee";
const LABEL_FILL: &str = "#666";
const MARKER_RADIUS: u32 = 4;

/// Serialize a scene as a standalone SVG document.
pub fn to_svg(scene: &Scene) -> String {
    let mut out = String::new();
    let vp = scene.viewport;
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" role="img" aria-label="Stock price chart. Use keyboard to navigate data points." tabindex="0">"#,
        vp.width, vp.height
    );

    if !scene.grid.is_empty() {
        out.push_str("  <g aria-hidden=\"true\">\n");
        for line in &scene.grid {
            let _ = writeln!(
                out,
                r#"    <line x1="{}" x2="{}" y1="{}" y2="{}" stroke="{}" stroke-width="1"/>"#,
                line.from.x, line.to.x, line.from.y, line.to.y, GRID_STROKE
            );
        }
        out.push_str("  </g>\n");
    }

    if !scene.path.is_empty() {
        let _ = writeln!(
            out,
            r#"  <path d="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
            scene.path_data(),
            ACCENT
        );
    }

    if !scene.markers.is_empty() {
        out.push_str("  <g role=\"list\">\n");
        for marker in &scene.markers {
            let _ = writeln!(
                out,
                r##"    <circle r="{}" cx="{}" cy="{}" fill="#fff" stroke="{}" tabindex="0" role="listitem" aria-label="{}"/>"##,
                MARKER_RADIUS,
                marker.center.x,
                marker.center.y,
                ACCENT,
                escape(&marker.label)
            );
        }
        out.push_str("  </g>\n");
    }

    for label in &scene.labels {
        let anchor = match label.anchor {
            TextAnchor::Start => "",
            TextAnchor::Middle => r#" text-anchor="middle""#,
        };
        let _ = writeln!(
            out,
            r#"  <text x="{}" y="{}"{} fill="{}">{}</text>"#,
            label.at.x,
            label.at.y,
            anchor,
            LABEL_FILL,
            escape(&label.text)
        );
    }

    out.push_str("</svg>\n");
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape(r#"a<b>&"c""#), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
