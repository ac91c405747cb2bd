//! Input-integrity errors raised while building or laying out a skill graph

use thiserror::Error;

/// Errors that make a skill graph impossible to lay out
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A link names a skill that is not in the skill list
    #[error("Dangling link {prerequisite} -> {unlocks}: unknown skill '{missing}'")]
    DanglingEdge {
        /// Source name of the offending link
        prerequisite: String,
        /// Target name of the offending link
        unlocks: String,
        /// The name that could not be resolved
        missing: String,
    },

    /// The prerequisite graph loops back on itself
    #[error("Cycle detected at skill '{node}'")]
    Cycle {
        /// A skill that lies on the cycle
        node: String,
    },

    /// Every skill has a prerequisite, so there is nowhere to start
    #[error("No starting skill: every skill has at least one prerequisite")]
    EmptyGraph,

    /// The same skill name was declared twice
    #[error("Duplicate skill '{id}'")]
    DuplicateNode {
        /// The repeated name
        id: String,
    },
}
