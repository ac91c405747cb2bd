//! CLI command handlers for `skilltree`.
//!
//! Each command is implemented in its own submodule.

pub mod config;
pub mod layout;
pub mod render;

use skill_tree::config::Config;
use skill_tree::core::layout::Layout;
use skill_tree::core::models::SkillTree;
use skill_tree::{error, info, verbose, warn};
use std::path::Path;

/// Load the skill tree at `input_file`, or the bundled sample when absent
fn load_tree(input_file: Option<&Path>) -> Result<SkillTree, String> {
    let Some(path) = input_file else {
        info!("No input file given, using the bundled sample tree");
        return Ok(SkillTree::sample());
    };

    let tree = SkillTree::load(path).map_err(|e| {
        error!("{e}");
        format!("✗ {e}")
    })?;

    verbose!(
        "✓ Loaded '{}' from {} ({} skills, {} links)",
        tree.name,
        path.display(),
        tree.skills.len(),
        tree.links.len()
    );
    Ok(tree)
}

/// Load a tree and lay it out with the configured settings
fn load_and_layout(input_file: Option<&Path>, config: &Config) -> Result<(SkillTree, Layout), String> {
    let tree = load_tree(input_file)?;
    let settings = config
        .layout_settings()
        .map_err(|e| format!("✗ Invalid layout configuration: {e}"))?;

    let layout = tree.layout(&settings).map_err(|e| {
        error!("Layout failed for '{}': {e}", tree.name);
        format!("✗ Failed to lay out '{}': {e}", tree.name)
    })?;

    for skipped in &layout.skipped {
        warn!("'{}': {skipped}", tree.name);
        eprintln!("⚠ Skipped {skipped}");
    }

    Ok((tree, layout))
}
