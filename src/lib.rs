//! Shared library for `skill-tree`
//! Contains the layout engine, renderers, configuration, and logger used by the CLI

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::get_version;
