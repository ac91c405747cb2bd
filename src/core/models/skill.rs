//! Skill tree definitions loaded from TOML

use crate::core::layout::{compute_layout, Layout, LayoutError, LayoutSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Bundled sample tree (the elemental fire/water tree)
const SAMPLE_TREE: &str = include_str!("../../../assets/skilltrees/elemental.toml");

/// A single unlockable skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Unique skill name, also used as the display label
    pub id: String,
}

impl Skill {
    /// Create a new skill
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A prerequisite link: `source` must be unlocked before `target`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Prerequisite skill name
    pub source: String,
    /// Skill unlocked by the prerequisite
    pub target: String,
}

impl Link {
    /// Create a new prerequisite link
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Errors raised while loading a skill tree file
#[derive(Debug, Error)]
pub enum SkillTreeError {
    /// The file could not be read
    #[error("Failed to read skill tree {path}: {source}")]
    Read {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not a valid skill tree document
    #[error("Failed to parse skill tree {path}: {source}")]
    Parse {
        /// Path of the file
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },
}

/// A named set of skills and the prerequisite links between them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTree {
    /// Display name of the tree
    #[serde(default)]
    pub name: String,
    /// Skills in declaration order
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Prerequisite links in declaration order
    #[serde(default)]
    pub links: Vec<Link>,
}

impl SkillTree {
    /// Create an empty tree with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            skills: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Append a skill
    pub fn add_skill(&mut self, id: impl Into<String>) {
        self.skills.push(Skill::new(id));
    }

    /// Append a prerequisite link
    pub fn add_link(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.links.push(Link::new(source, target));
    }

    /// Parse a skill tree from a TOML document
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or does not match the schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load a skill tree from a TOML file
    ///
    /// When the document has no `name`, the file stem is used.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SkillTreeError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SkillTreeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut tree = Self::from_toml(&content).map_err(|source| SkillTreeError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if tree.name.is_empty() {
            tree.name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("skill tree")
                .to_string();
        }

        Ok(tree)
    }

    /// The bundled sample tree
    ///
    /// # Panics
    /// Panics if the embedded sample is invalid TOML. It is compiled into the
    /// binary, so this only happens if the asset itself is broken.
    #[must_use]
    pub fn sample() -> Self {
        Self::from_toml(SAMPLE_TREE).expect("Failed to parse bundled sample skill tree")
    }

    /// Lay out this tree
    ///
    /// # Errors
    /// Returns the first input-integrity error found (dangling link, cycle,
    /// duplicate skill, or no starting skill)
    pub fn layout(&self, settings: &LayoutSettings) -> Result<Layout, LayoutError> {
        compute_layout(&self.skills, &self.links, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml() {
        let tree = SkillTree::from_toml(
            r#"
name = "Tiny"

[[skills]]
id = "A"

[[skills]]
id = "B"

[[links]]
source = "A"
target = "B"
"#,
        )
        .unwrap();

        assert_eq!(tree.name, "Tiny");
        assert_eq!(tree.skills, vec![Skill::new("A"), Skill::new("B")]);
        assert_eq!(tree.links, vec![Link::new("A", "B")]);
    }

    #[test]
    fn test_from_toml_empty_sections() {
        let tree = SkillTree::from_toml("name = \"Nothing\"").unwrap();
        assert!(tree.skills.is_empty());
        assert!(tree.links.is_empty());
    }

    #[test]
    fn test_from_toml_rejects_bad_link() {
        let result = SkillTree::from_toml("[[links]]\nsource = \"A\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_sample_tree() {
        let tree = SkillTree::sample();
        assert_eq!(tree.name, "Elemental Access");
        assert_eq!(tree.skills.len(), 28);
        assert_eq!(tree.links.len(), 29);
        assert_eq!(tree.skills[0].id, "Elemental Access");
    }

    #[test]
    fn test_builder_methods() {
        let mut tree = SkillTree::new("Built");
        tree.add_skill("A");
        tree.add_skill("B");
        tree.add_link("A", "B");

        let layout = tree.layout(&LayoutSettings::default()).unwrap();
        assert_eq!(layout.roots, vec!["A".to_string()]);
    }
}
