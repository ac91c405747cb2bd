//! Layout command handler
//!
//! Prints computed skill positions as a table or as TOML.

use super::load_and_layout;
use skill_tree::config::Config;
use skill_tree::{error, info};
use std::path::Path;

/// Run the layout command.
///
/// # Arguments
/// * `input_file` - Skill tree TOML file, or `None` for the bundled sample
/// * `as_toml` - Print TOML instead of a table
/// * `config` - Configuration providing layout settings
pub fn run(input_file: Option<&Path>, as_toml: bool, config: &Config) {
    if let Err(err) = print_layout(input_file, as_toml, config) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn print_layout(input_file: Option<&Path>, as_toml: bool, config: &Config) -> Result<(), String> {
    let (tree, layout) = load_and_layout(input_file, config)?;

    if as_toml {
        let toml_str = toml::to_string_pretty(&layout).map_err(|e| {
            error!("Failed to serialize layout for '{}': {e}", tree.name);
            format!("✗ Failed to serialize layout: {e}")
        })?;
        print!("{toml_str}");
    } else {
        println!("{}\n", tree.name);
        print!("{layout}");
    }

    info!(
        "Printed layout for '{}' ({} skills)",
        tree.name,
        layout.nodes.len()
    );
    Ok(())
}
