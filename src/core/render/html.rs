//! HTML page renderer
//!
//! Produces a standalone page with the SVG tree view inside the
//! `skill-tree-container-tree` element, so it can be dropped into a host page
//! or opened directly.

use crate::core::layout::Layout;
use crate::core::render::{RenderError, Renderer, SvgRenderer};
use askama::Template;

/// Element id of the tree view container
pub const TREE_CONTAINER_ID: &str = "skill-tree-container-tree";

#[derive(Template)]
#[template(path = "skill_tree.html")]
struct SkillTreePage<'a> {
    title: &'a str,
    container_id: &'a str,
    skill_count: usize,
    root_count: usize,
    level_count: usize,
    svg: &'a str,
}

/// Renders a layout as an HTML page embedding the SVG drawing
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    svg: SvgRenderer,
    title: String,
}

impl HtmlRenderer {
    /// Create a new HTML renderer
    #[must_use]
    pub fn new(svg: SvgRenderer, title: impl Into<String>) -> Self {
        Self {
            svg,
            title: title.into(),
        }
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, layout: &Layout) -> Result<String, RenderError> {
        let svg = self.svg.render(layout)?;
        let page = SkillTreePage {
            title: &self.title,
            container_id: TREE_CONTAINER_ID,
            skill_count: layout.nodes.len(),
            root_count: layout.roots.len(),
            level_count: if layout.nodes.is_empty() {
                0
            } else {
                layout.max_depth() + 1
            },
            svg: &svg,
        };
        Ok(page.render()?)
    }
}
