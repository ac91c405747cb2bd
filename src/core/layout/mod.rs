//! Tree layout for skill prerequisite graphs
//!
//! A layout pass builds a [`SkillGraph`] from the skill and link lists, then:
//! 1. measures every subtree (leaf count), failing on cycles;
//! 2. assigns depths according to the [`DepthPolicy`];
//! 3. places skills horizontally, parents before children, centering skills
//!    with several prerequisites between them;
//! 4. places skills vertically by depth, starting skills at the bottom.
//!
//! The result is a [`Layout`] that renderers draw without further graph work.

pub mod depth;
pub mod error;
pub mod graph;
pub mod position;

pub use depth::DepthPolicy;
pub use error::LayoutError;
pub use graph::{SkillGraph, SkillNode};

use crate::core::models::{Link, Skill};
use crate::debug;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Canvas size, spacing, and policy knobs for one layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSettings {
    /// Canvas width; the first tree starts at a quarter of it
    pub canvas_width: f64,
    /// Canvas height; starting skills sit on this line
    pub canvas_height: f64,
    /// Horizontal distance per leaf
    pub horizontal_spacing: f64,
    /// Vertical distance per depth level
    pub vertical_spacing: f64,
    /// How skills with several prerequisites get their depth
    pub depth_policy: DepthPolicy,
    /// Skip links to unknown skills instead of failing
    pub skip_dangling_edges: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            canvas_width: 1000.0,
            canvas_height: 600.0,
            horizontal_spacing: 150.0,
            vertical_spacing: 150.0,
            depth_policy: DepthPolicy::default(),
            skip_dangling_edges: false,
        }
    }
}

/// A skill with its computed position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    /// Skill name
    pub id: String,
    /// Horizontal center
    pub x: f64,
    /// Vertical center
    pub y: f64,
    /// Depth level (0 for starting skills)
    pub depth: usize,
    /// Number of leaves below this skill
    pub subtree_width: usize,
    /// Whether this skill has no prerequisites
    pub is_root: bool,
    /// Prerequisite names in link order
    pub parents: Vec<String>,
    /// Unlocked skill names in link order
    pub children: Vec<String>,
}

/// Positions for every skill plus the resolved links
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Canvas width used for the pass
    pub canvas_width: f64,
    /// Canvas height used for the pass
    pub canvas_height: f64,
    /// Starting skill names in declaration order
    pub roots: Vec<String>,
    /// Positioned skills in declaration order
    pub nodes: Vec<PositionedNode>,
    /// Links that made it into the graph
    pub edges: Vec<Link>,
    /// Links dropped because they named unknown skills
    #[serde(skip)]
    pub skipped: Vec<LayoutError>,
    /// Name to position in `nodes`
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Layout {
    /// Look up a positioned skill by name
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Bounding box of all skill centers as `(min_x, min_y, max_x, max_y)`
    #[must_use]
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.nodes.first()?;
        Some(self.nodes.iter().fold(
            (first.x, first.y, first.x, first.y),
            |(min_x, min_y, max_x, max_y), n| {
                (min_x.min(n.x), min_y.min(n.y), max_x.max(n.x), max_y.max(n.y))
            },
        ))
    }

    /// Deepest depth level
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Layout ({} skills, {} links, {} starting):",
            self.nodes.len(),
            self.edges.len(),
            self.roots.len()
        )?;
        writeln!(f)?;

        let name_width = self.nodes.iter().map(|n| n.id.len()).max().unwrap_or(0);
        for node in &self.nodes {
            writeln!(
                f,
                "  {:<name_width$}  x={:>8.1}  y={:>8.1}  depth={}  width={}{}",
                node.id,
                node.x,
                node.y,
                node.depth,
                node.subtree_width,
                if node.is_root { "  (start)" } else { "" }
            )?;
        }

        Ok(())
    }
}

/// Lay out a skill graph
///
/// # Errors
/// - [`LayoutError::DuplicateNode`] when a skill name repeats
/// - [`LayoutError::DanglingEdge`] when a link names an unknown skill and
///   `settings.skip_dangling_edges` is off
/// - [`LayoutError::Cycle`] when prerequisites loop
/// - [`LayoutError::EmptyGraph`] when no skill is free of prerequisites
pub fn compute_layout(
    skills: &[Skill],
    links: &[Link],
    settings: &LayoutSettings,
) -> Result<Layout, LayoutError> {
    let (graph, skipped) = if settings.skip_dangling_edges {
        SkillGraph::build_lenient(skills, links)?
    } else {
        (SkillGraph::build(skills, links)?, Vec::new())
    };

    let widths = graph.subtree_widths()?;
    let roots = graph.roots();
    if roots.is_empty() {
        return Err(LayoutError::EmptyGraph);
    }

    let depths = depth::assign_depths(&graph, settings.depth_policy)?;
    let order = graph.topological_order()?;
    let xs = position::assign_x(&graph, &widths, &order, settings);
    let ys = position::assign_y(&depths, settings);

    let names = |indices: &[usize]| -> Vec<String> {
        indices
            .iter()
            .map(|&idx| graph.node(idx).id.clone())
            .collect()
    };

    let nodes: Vec<PositionedNode> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(idx, node)| PositionedNode {
            id: node.id.clone(),
            x: xs[idx],
            y: ys[idx],
            depth: depths[idx],
            subtree_width: widths[idx],
            is_root: node.is_root(),
            parents: names(&node.parents),
            children: names(&node.children),
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .map(|&(source, target)| Link::new(&graph.node(source).id, &graph.node(target).id))
        .collect();

    let index = nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.id.clone(), idx))
        .collect();

    let layout = Layout {
        canvas_width: settings.canvas_width,
        canvas_height: settings.canvas_height,
        roots: names(&roots),
        nodes,
        edges,
        skipped,
        index,
    };

    debug!(
        "Laid out {} skills over {} levels ({} starting, policy {})",
        layout.nodes.len(),
        layout.max_depth() + 1,
        layout.roots.len(),
        settings.depth_policy
    );

    Ok(layout)
}
