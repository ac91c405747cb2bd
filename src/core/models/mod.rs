//! Data models for skill trees

pub mod skill;

pub use skill::{Link, Skill, SkillTree, SkillTreeError};
