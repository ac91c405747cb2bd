//! Prerequisite graph for skill trees

use crate::core::layout::LayoutError;
use crate::core::models::{Link, Skill};
use crate::{debug, warn};
use std::collections::{BTreeSet, HashMap};

/// A skill inside a [`SkillGraph`]
///
/// Parents and children are indices into the owning graph, kept in link
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillNode {
    /// Unique skill name
    pub id: String,
    /// Prerequisites of this skill
    pub parents: Vec<usize>,
    /// Skills this one unlocks
    pub children: Vec<usize>,
}

impl SkillNode {
    fn new(id: String) -> Self {
        Self {
            id,
            parents: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Whether this skill has no prerequisites
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Directed prerequisite graph built once per layout
///
/// The graph owns every node in an arena; nodes refer to each other by
/// index, and a name lookup table resolves links.
#[derive(Debug, Clone, Default)]
pub struct SkillGraph {
    nodes: Vec<SkillNode>,
    index: HashMap<String, usize>,
    edges: Vec<(usize, usize)>,
}

impl SkillGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph, failing on the first dangling link
    ///
    /// # Errors
    /// Returns [`LayoutError::DuplicateNode`] for a repeated skill name and
    /// [`LayoutError::DanglingEdge`] for a link to an unknown skill
    pub fn build(skills: &[Skill], links: &[Link]) -> Result<Self, LayoutError> {
        let mut graph = Self::with_skills(skills)?;
        for link in links {
            graph.add_link(link)?;
        }
        debug!(
            "Built skill graph: {} skills, {} links",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Build a graph, skipping dangling links
    ///
    /// Skipped links are logged and returned alongside the graph so the
    /// caller can report them.
    ///
    /// # Errors
    /// Returns [`LayoutError::DuplicateNode`] for a repeated skill name
    pub fn build_lenient(
        skills: &[Skill],
        links: &[Link],
    ) -> Result<(Self, Vec<LayoutError>), LayoutError> {
        let mut graph = Self::with_skills(skills)?;
        let mut skipped = Vec::new();
        for link in links {
            if let Err(err) = graph.add_link(link) {
                warn!("Skipping link: {err}");
                skipped.push(err);
            }
        }
        debug!(
            "Built skill graph: {} skills, {} links, {} skipped",
            graph.node_count(),
            graph.edge_count(),
            skipped.len()
        );
        Ok((graph, skipped))
    }

    fn with_skills(skills: &[Skill]) -> Result<Self, LayoutError> {
        let mut graph = Self::new();
        for skill in skills {
            graph.add_skill(&skill.id)?;
        }
        Ok(graph)
    }

    /// Add a skill and return its index
    ///
    /// # Errors
    /// Returns [`LayoutError::DuplicateNode`] if the name is already present
    pub fn add_skill(&mut self, id: &str) -> Result<usize, LayoutError> {
        if self.index.contains_key(id) {
            return Err(LayoutError::DuplicateNode { id: id.to_string() });
        }
        let idx = self.nodes.len();
        self.nodes.push(SkillNode::new(id.to_string()));
        self.index.insert(id.to_string(), idx);
        Ok(idx)
    }

    /// Add a prerequisite link between two existing skills
    ///
    /// Repeating a link that is already present has no effect.
    ///
    /// # Errors
    /// Returns [`LayoutError::DanglingEdge`] if either end is unknown
    pub fn add_link(&mut self, link: &Link) -> Result<(), LayoutError> {
        let source = self.resolve(link, &link.source)?;
        let target = self.resolve(link, &link.target)?;

        if self.nodes[source].children.contains(&target) {
            debug!("Ignoring repeated link {} -> {}", link.source, link.target);
            return Ok(());
        }

        self.nodes[source].children.push(target);
        self.nodes[target].parents.push(source);
        self.edges.push((source, target));
        Ok(())
    }

    fn resolve(&self, link: &Link, name: &str) -> Result<usize, LayoutError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| LayoutError::DanglingEdge {
                prerequisite: link.source.clone(),
                unlocks: link.target.clone(),
                missing: name.to_string(),
            })
    }

    /// Number of skills
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct links
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes in declaration order
    #[must_use]
    pub fn nodes(&self) -> &[SkillNode] {
        &self.nodes
    }

    /// Node at `idx`
    ///
    /// # Panics
    /// Panics if `idx` is out of range
    #[must_use]
    pub fn node(&self, idx: usize) -> &SkillNode {
        &self.nodes[idx]
    }

    /// Links as `(source, target)` index pairs in declaration order
    #[must_use]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Look up a skill index by name
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Check if a skill exists
    #[must_use]
    pub fn contains_skill(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Skills without prerequisites, in declaration order
    #[must_use]
    pub fn roots(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&idx| self.nodes[idx].is_root())
            .collect()
    }

    /// Compute the subtree width of every node
    ///
    /// A leaf has width 1; any other node has the sum of its children's
    /// widths. A node reachable along several paths is computed once.
    ///
    /// # Errors
    /// Returns [`LayoutError::Cycle`] if a node is reached again while its
    /// own subtree is still being measured
    pub fn subtree_widths(&self) -> Result<Vec<usize>, LayoutError> {
        let mut widths = vec![None; self.nodes.len()];
        let mut visiting = vec![false; self.nodes.len()];

        for idx in 0..self.nodes.len() {
            if widths[idx].is_none() {
                self.measure(idx, &mut widths, &mut visiting)?;
            }
        }

        Ok(widths.into_iter().map(|w| w.unwrap_or(1)).collect())
    }

    /// Post-order walk from `start` on an explicit stack, so deep chains do
    /// not grow the call stack
    fn measure(
        &self,
        start: usize,
        widths: &mut [Option<usize>],
        visiting: &mut [bool],
    ) -> Result<(), LayoutError> {
        // Each frame holds a node and the position of its next child to visit
        let mut stack = vec![(start, 0_usize)];
        visiting[start] = true;

        while let Some(frame) = stack.last_mut() {
            let (idx, next) = *frame;
            let children = &self.nodes[idx].children;

            if let Some(&child) = children.get(next) {
                frame.1 += 1;
                if widths[child].is_some() {
                    continue;
                }
                if visiting[child] {
                    return Err(LayoutError::Cycle {
                        node: self.nodes[child].id.clone(),
                    });
                }
                visiting[child] = true;
                stack.push((child, 0));
            } else {
                let width = if children.is_empty() {
                    1
                } else {
                    children
                        .iter()
                        .map(|&c| widths[c].unwrap_or(1))
                        .fold(0, usize::saturating_add)
                };
                visiting[idx] = false;
                widths[idx] = Some(width);
                stack.pop();
            }
        }

        Ok(())
    }

    /// Order nodes so every parent comes before its children
    ///
    /// Among nodes that are ready at the same time, the one declared first
    /// goes first, so the order is stable for identical input.
    ///
    /// # Errors
    /// Returns [`LayoutError::Cycle`] if some nodes can never become ready
    pub fn topological_order(&self) -> Result<Vec<usize>, LayoutError> {
        let mut indegree: Vec<usize> = self.nodes.iter().map(|n| n.parents.len()).collect();
        let mut ready: BTreeSet<usize> = (0..self.nodes.len())
            .filter(|&idx| indegree[idx] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(idx) = ready.pop_first() {
            order.push(idx);
            for &child in &self.nodes[idx].children {
                indegree[child] -= 1;
                if indegree[child] == 0 {
                    ready.insert(child);
                }
            }
        }

        if order.len() < self.nodes.len() {
            let stuck = indegree.iter().position(|&d| d > 0).unwrap_or(0);
            return Err(LayoutError::Cycle {
                node: self.nodes[stuck].id.clone(),
            });
        }

        Ok(order)
    }
}

impl std::fmt::Display for SkillGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Skill graph ({} skills):", self.nodes.len())?;
        writeln!(f)?;

        for node in &self.nodes {
            if node.parents.is_empty() {
                writeln!(f, "  {} → (starting skill)", node.id)?;
            } else {
                let parents: Vec<&str> = node
                    .parents
                    .iter()
                    .map(|&p| self.nodes[p].id.as_str())
                    .collect();
                writeln!(f, "  {} → {}", node.id, parents.join(", "))?;
            }
        }

        Ok(())
    }
}
