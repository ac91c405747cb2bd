//! SVG renderer for the tree view
//!
//! Links are drawn as vertical cubic curves between skill centers; skills as
//! labelled rectangles centered on their position, with starting skills
//! filled in the root color.

use crate::core::layout::{Layout, PositionedNode};
use crate::core::render::{RenderError, RenderSettings, Renderer};
use std::fmt::Write;

/// Extra room around the drawing so edge rectangles are not clipped
const MARGIN: f64 = 20.0;

/// Renders a layout as a standalone SVG document
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    settings: RenderSettings,
}

impl SvgRenderer {
    /// Create a new SVG renderer
    #[must_use]
    pub const fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Styling in use
    #[must_use]
    pub const fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Visible region as `(x, y, width, height)`
    ///
    /// Covers the canvas plus every node rectangle, so trees that spill past
    /// the canvas edges stay visible without panning.
    fn view_box(&self, layout: &Layout) -> (f64, f64, f64, f64) {
        let half_w = self.settings.node_width / 2.0 + MARGIN;
        let half_h = self.settings.node_height / 2.0 + MARGIN;

        let (mut min_x, mut min_y, mut max_x, mut max_y) =
            (0.0_f64, 0.0_f64, layout.canvas_width, layout.canvas_height);
        if let Some((lo_x, lo_y, hi_x, hi_y)) = layout.bounds() {
            min_x = min_x.min(lo_x - half_w);
            min_y = min_y.min(lo_y - half_h);
            max_x = max_x.max(hi_x + half_w);
            max_y = max_y.max(hi_y + half_h);
        }

        (min_x, min_y, max_x - min_x, max_y - min_y)
    }

    fn write_links(&self, svg: &mut String, layout: &Layout) {
        let s = &self.settings;
        for link in &layout.edges {
            let (Some(source), Some(target)) = (layout.node(&link.source), layout.node(&link.target))
            else {
                continue;
            };
            let mid_y = (source.y + target.y) / 2.0;
            let _ = writeln!(
                svg,
                "    <path class=\"link\" d=\"M{},{} C{},{} {},{} {},{}\" style=\"stroke: {}; stroke-width: {}px; fill: none\"/>",
                source.x,
                source.y,
                source.x,
                mid_y,
                target.x,
                mid_y,
                target.x,
                target.y,
                escape_xml(&s.link_color),
                s.link_width
            );
        }
    }

    fn write_node(&self, svg: &mut String, node: &PositionedNode) {
        let s = &self.settings;
        let fill = if node.is_root {
            &s.root_color
        } else {
            &s.child_color
        };

        let _ = writeln!(
            svg,
            "    <g class=\"node\" transform=\"translate({},{})\">",
            node.x, node.y
        );
        let _ = writeln!(
            svg,
            "      <rect width=\"{}\" height=\"{}\" x=\"{}\" y=\"{}\" style=\"fill: {}; stroke: {}; stroke-width: {}\"/>",
            s.node_width,
            s.node_height,
            -s.node_width / 2.0,
            -s.node_height / 2.0,
            escape_xml(fill),
            escape_xml(&s.stroke_color),
            s.stroke_width
        );
        let _ = writeln!(
            svg,
            "      <text dy=\".35em\" text-anchor=\"middle\" style=\"font-size: {}px; fill: {}\">{}</text>",
            s.font_size,
            escape_xml(&s.text_color),
            escape_xml(&node.id)
        );
        svg.push_str("    </g>\n");
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, layout: &Layout) -> Result<String, RenderError> {
        let (x, y, width, height) = self.view_box(layout);
        let mut svg = String::new();

        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"{x} {y} {width} {height}\">"
        );
        svg.push_str("  <g>\n");
        self.write_links(&mut svg, layout);
        for node in &layout.nodes {
            self.write_node(&mut svg, node);
        }
        svg.push_str("  </g>\n");
        svg.push_str("</svg>\n");

        Ok(svg)
    }
}

/// Escape text for use inside XML content and attribute values
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::{compute_layout, LayoutSettings};
    use crate::core::models::{Link, Skill};

    fn sample_layout() -> Layout {
        compute_layout(
            &[Skill::new("A"), Skill::new("B"), Skill::new("C")],
            &[Link::new("A", "B"), Link::new("A", "C")],
            &LayoutSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_svg_structure() {
        let svg = SvgRenderer::default().render(&sample_layout()).unwrap();

        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 3);
        assert_eq!(svg.matches("class=\"link\"").count(), 2);
    }

    #[test]
    fn test_link_curve() {
        let svg = SvgRenderer::default().render(&sample_layout()).unwrap();
        // A at (250, 600), B at (175, 450)
        assert!(svg.contains("d=\"M250,600 C250,525 175,525 175,450\""));
    }

    #[test]
    fn test_root_colored_differently() {
        let svg = SvgRenderer::default().render(&sample_layout()).unwrap();
        assert_eq!(svg.matches("fill: red").count(), 1);
        assert_eq!(svg.matches("fill: blue").count(), 2);
        assert!(svg.contains("transform=\"translate(250,600)\""));
    }

    #[test]
    fn test_view_box_covers_canvas_and_nodes() {
        let svg = SvgRenderer::default().render(&sample_layout()).unwrap();
        // Bottom row at y = 600 plus half a node and the margin
        assert!(svg.contains("viewBox=\"0 0 1000 640\""));
    }

    #[test]
    fn test_labels_escaped() {
        let layout = compute_layout(
            &[Skill::new("Fire & <Ice>")],
            &[],
            &LayoutSettings::default(),
        )
        .unwrap();
        let svg = SvgRenderer::default().render(&layout).unwrap();
        assert!(svg.contains("Fire &amp; &lt;Ice&gt;"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a\"b'c"), "a&quot;b&apos;c");
        assert_eq!(escape_xml("plain"), "plain");
    }
}
