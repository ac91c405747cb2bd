//! Mermaid diagram renderer for skill trees
//!
//! Generates Mermaid flowchart syntax that can be embedded in Markdown files
//! and rendered by GitHub, GitLab, and other Markdown viewers. The chart runs
//! bottom-to-top so starting skills sit at the bottom, as in the tree view.

use crate::core::layout::Layout;
use crate::core::render::{RenderError, RenderSettings, Renderer};
use std::collections::{HashMap, HashSet};
use std::fmt::Write;

/// Renders a layout as a Mermaid flowchart
#[derive(Debug, Clone, Default)]
pub struct MermaidRenderer {
    settings: RenderSettings,
    heading: Option<String>,
}

impl MermaidRenderer {
    /// Create a renderer emitting a bare flowchart
    #[must_use]
    pub const fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            heading: None,
        }
    }

    /// Emit a Markdown document with a heading and a fenced flowchart instead
    #[must_use]
    pub fn fenced(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    fn generate_flowchart(&self, layout: &Layout) -> String {
        let ids = Self::assign_ids(layout);
        let mut output = String::from("flowchart BT\n");

        for node in &layout.nodes {
            let label = Self::escape_label(&node.id);
            let _ = writeln!(output, "    {}[\"{label}\"]", id_of(&ids, &node.id));
        }

        output.push('\n');

        for link in &layout.edges {
            let _ = writeln!(
                output,
                "    {} --> {}",
                id_of(&ids, &link.source),
                id_of(&ids, &link.target)
            );
        }

        let s = &self.settings;
        output.push('\n');
        let _ = writeln!(
            output,
            "    classDef root fill:{},stroke:{},color:{}",
            s.root_color, s.stroke_color, s.text_color
        );
        let _ = writeln!(
            output,
            "    classDef skill fill:{},stroke:{},color:{}",
            s.child_color, s.stroke_color, s.text_color
        );

        let (roots, others): (Vec<_>, Vec<_>) = layout.nodes.iter().partition(|n| n.is_root);
        for (class, group) in [("root", roots), ("skill", others)] {
            if group.is_empty() {
                continue;
            }
            let members: Vec<&str> = group.iter().map(|n| id_of(&ids, &n.id)).collect();
            let _ = writeln!(output, "    class {} {class}", members.join(","));
        }

        output
    }

    /// Map every skill name to a unique Mermaid node ID
    fn assign_ids(layout: &Layout) -> HashMap<String, String> {
        let mut used = HashSet::new();
        let mut ids = HashMap::new();

        for node in &layout.nodes {
            let base = Self::sanitize_id(&node.id);
            let mut candidate = base.clone();
            let mut suffix = 2;
            while !used.insert(candidate.clone()) {
                candidate = format!("{base}_{suffix}");
                suffix += 1;
            }
            ids.insert(node.id.clone(), candidate);
        }

        ids
    }

    /// Sanitize a skill name for use as a Mermaid node ID
    fn sanitize_id(key: &str) -> String {
        let id: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        if id.is_empty() {
            "_".to_string()
        } else {
            id
        }
    }

    fn escape_label(label: &str) -> String {
        label.replace('"', "#quot;")
    }
}

fn id_of<'a>(ids: &'a HashMap<String, String>, name: &str) -> &'a str {
    ids.get(name).map_or("_", String::as_str)
}

impl Renderer for MermaidRenderer {
    fn render(&self, layout: &Layout) -> Result<String, RenderError> {
        let flowchart = self.generate_flowchart(layout);
        Ok(match &self.heading {
            Some(heading) => format!("# {heading}\n\n```mermaid\n{flowchart}```\n"),
            None => flowchart,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::{compute_layout, LayoutSettings};
    use crate::core::models::{Link, Skill};

    fn layout(ids: &[&str], pairs: &[(&str, &str)]) -> Layout {
        let skills: Vec<Skill> = ids.iter().map(|id| Skill::new(*id)).collect();
        let links: Vec<Link> = pairs.iter().map(|(s, t)| Link::new(*s, *t)).collect();
        compute_layout(&skills, &links, &LayoutSettings::default()).unwrap()
    }

    #[test]
    fn test_mermaid_generation() {
        let diagram = MermaidRenderer::default()
            .render(&layout(&["Fire Access", "Conjure Fire"], &[("Fire Access", "Conjure Fire")]))
            .unwrap();

        assert!(diagram.starts_with("flowchart BT"));
        assert!(diagram.contains("Fire_Access[\"Fire Access\"]"));
        assert!(diagram.contains("Fire_Access --> Conjure_Fire"));
        assert!(diagram.contains("class Fire_Access root"));
        assert!(diagram.contains("class Conjure_Fire skill"));
        assert!(!diagram.contains("```"));
    }

    #[test]
    fn test_fenced_output() {
        let diagram = MermaidRenderer::default()
            .fenced("Tiny")
            .render(&layout(&["A"], &[]))
            .unwrap();

        assert!(diagram.starts_with("# Tiny\n\n```mermaid\nflowchart BT\n"));
        assert!(diagram.trim_end().ends_with("```"));
    }

    #[test]
    fn test_sanitize_id() {
        assert_eq!(MermaidRenderer::sanitize_id("Fire Immunity 2"), "Fire_Immunity_2");
        assert_eq!(MermaidRenderer::sanitize_id("Fire-Lock"), "Fire_Lock");
        assert_eq!(MermaidRenderer::sanitize_id(""), "_");
    }

    #[test]
    fn test_colliding_ids_get_suffix() {
        let diagram = MermaidRenderer::default()
            .render(&layout(&["A B", "A-B"], &[]))
            .unwrap();
        assert!(diagram.contains("A_B[\"A B\"]"));
        assert!(diagram.contains("A_B_2[\"A-B\"]"));
    }
}
