//! Coordinate assignment for laid-out skill graphs

use crate::core::layout::graph::SkillGraph;
use crate::core::layout::LayoutSettings;

/// Assign horizontal positions
///
/// Starting skills are placed left to right from a quarter of the canvas
/// width, each one offset by the previous tree's width. Every other skill is
/// then visited in `order` (parents before children):
/// - a skill with several prerequisites is centered between its leftmost and
///   rightmost prerequisite;
/// - children are spread under their parent in proportion to their subtree
///   widths.
///
/// `order` must be a topological order of `graph` and `widths` the result of
/// [`SkillGraph::subtree_widths`].
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn assign_x(
    graph: &SkillGraph,
    widths: &[usize],
    order: &[usize],
    settings: &LayoutSettings,
) -> Vec<f64> {
    let spacing = settings.horizontal_spacing;
    let mut xs = vec![0.0; graph.node_count()];

    let mut current_x = settings.canvas_width / 4.0;
    for root in graph.roots() {
        xs[root] = current_x;
        current_x += widths[root] as f64 * spacing;
    }

    for &idx in order {
        let node = graph.node(idx);

        if node.parents.len() > 1 {
            let (min_x, max_x) = node.parents.iter().map(|&p| xs[p]).fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), x| (lo.min(x), hi.max(x)),
            );
            xs[idx] = (min_x + max_x) / 2.0;
        }

        if node.children.is_empty() {
            continue;
        }

        let total_child_width: usize = node.children.iter().map(|&c| widths[c]).sum();
        // Keep at least one spacing unit per leaf even when children are wider than the node
        let normalized = spacing.max(widths[idx] as f64 * spacing / total_child_width as f64);

        let mut cursor = xs[idx] - total_child_width as f64 * normalized / 2.0;
        for &child in &node.children {
            let span = widths[child] as f64 * normalized;
            if graph.node(child).parents.len() <= 1 {
                xs[child] = cursor + span / 2.0;
            }
            cursor += span;
        }
    }

    xs
}

/// Assign vertical positions: depth 0 at the bottom of the canvas, deeper
/// skills higher up
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn assign_y(depths: &[usize], settings: &LayoutSettings) -> Vec<f64> {
    depths
        .iter()
        .map(|&depth| settings.canvas_height - depth as f64 * settings.vertical_spacing)
        .collect()
}
