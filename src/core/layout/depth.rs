//! Depth assignment for skill graphs

use crate::core::layout::graph::SkillGraph;
use crate::core::layout::LayoutError;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// Rule used to pick a depth for skills with several prerequisites
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DepthPolicy {
    /// Breadth-first from all starting skills at once; a skill keeps the
    /// depth at which it is first reached
    FirstSeen,
    /// One more than the deepest prerequisite, so every link points upward
    #[default]
    Longest,
}

impl FromStr for DepthPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first-seen" | "first_seen" | "bfs" => Ok(Self::FirstSeen),
            "longest" | "max" => Ok(Self::Longest),
            _ => Err(format!("Unknown depth policy: '{s}'")),
        }
    }
}

impl fmt::Display for DepthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstSeen => write!(f, "first-seen"),
            Self::Longest => write!(f, "longest"),
        }
    }
}

/// Assign a depth to every node; starting skills sit at depth 0
///
/// # Errors
/// Returns [`LayoutError::Cycle`] if the `Longest` policy cannot order the
/// graph
pub fn assign_depths(graph: &SkillGraph, policy: DepthPolicy) -> Result<Vec<usize>, LayoutError> {
    match policy {
        DepthPolicy::FirstSeen => Ok(first_seen_depths(graph)),
        DepthPolicy::Longest => longest_depths(graph),
    }
}

fn first_seen_depths(graph: &SkillGraph) -> Vec<usize> {
    let mut depths: Vec<Option<usize>> = vec![None; graph.node_count()];
    let mut queue: VecDeque<(usize, usize)> =
        graph.roots().into_iter().map(|root| (root, 0)).collect();

    while let Some((idx, depth)) = queue.pop_front() {
        if depths[idx].is_some() {
            continue;
        }
        depths[idx] = Some(depth);
        for &child in &graph.node(idx).children {
            if depths[child].is_none() {
                queue.push_back((child, depth + 1));
            }
        }
    }

    depths.into_iter().map(|d| d.unwrap_or(0)).collect()
}

fn longest_depths(graph: &SkillGraph) -> Result<Vec<usize>, LayoutError> {
    let mut depths = vec![0; graph.node_count()];
    for idx in graph.topological_order()? {
        depths[idx] = graph
            .node(idx)
            .parents
            .iter()
            .map(|&parent| depths[parent] + 1)
            .max()
            .unwrap_or(0);
    }
    Ok(depths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Link, Skill};

    /// A -> B -> C plus a shortcut A -> C
    fn shortcut_graph() -> SkillGraph {
        SkillGraph::build(
            &[Skill::new("A"), Skill::new("B"), Skill::new("C")],
            &[Link::new("A", "B"), Link::new("B", "C"), Link::new("A", "C")],
        )
        .unwrap()
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("longest".parse::<DepthPolicy>(), Ok(DepthPolicy::Longest));
        assert_eq!("MAX".parse::<DepthPolicy>(), Ok(DepthPolicy::Longest));
        assert_eq!(
            "first-seen".parse::<DepthPolicy>(),
            Ok(DepthPolicy::FirstSeen)
        );
        assert_eq!("bfs".parse::<DepthPolicy>(), Ok(DepthPolicy::FirstSeen));
        assert!("deepest".parse::<DepthPolicy>().is_err());
    }

    #[test]
    fn test_policy_display_round_trips() {
        for policy in [DepthPolicy::FirstSeen, DepthPolicy::Longest] {
            assert_eq!(policy.to_string().parse::<DepthPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_first_seen_takes_shortest_route() {
        let depths = assign_depths(&shortcut_graph(), DepthPolicy::FirstSeen).unwrap();
        assert_eq!(depths, vec![0, 1, 1]);
    }

    #[test]
    fn test_longest_takes_deepest_parent() {
        let depths = assign_depths(&shortcut_graph(), DepthPolicy::Longest).unwrap();
        assert_eq!(depths, vec![0, 1, 2]);
    }

    #[test]
    fn test_multiple_roots_start_at_zero() {
        let graph = SkillGraph::build(
            &[Skill::new("A"), Skill::new("B"), Skill::new("C")],
            &[Link::new("A", "C"), Link::new("B", "C")],
        )
        .unwrap();

        for policy in [DepthPolicy::FirstSeen, DepthPolicy::Longest] {
            assert_eq!(assign_depths(&graph, policy).unwrap(), vec![0, 0, 1]);
        }
    }
}
