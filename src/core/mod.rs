//! Core module: skill tree models, layout, and rendering

pub mod layout;
pub mod models;
pub mod render;

/// Returns the current version of the `skill-tree` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
