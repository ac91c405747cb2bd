//! Render command handler
//!
//! Lays out a skill tree and writes it as SVG, HTML, or Mermaid.

use super::load_and_layout;
use skill_tree::config::Config;
use skill_tree::core::render::OutputFormat;
use skill_tree::{error, info, verbose};
use std::path::{Path, PathBuf};

/// Run the render command.
///
/// # Arguments
/// * `input_file` - Skill tree TOML file, or `None` for the bundled sample
/// * `format_str` - Output format (svg, html, mermaid, markdown)
/// * `output_file` - Optional output path
/// * `to_stdout` - Print instead of writing a file
/// * `config` - Configuration providing layout, styling, and output directory
pub fn run(
    input_file: Option<&Path>,
    format_str: &str,
    output_file: Option<&Path>,
    to_stdout: bool,
    config: &Config,
) {
    match render(input_file, format_str, output_file, to_stdout, config) {
        Ok(Some(path)) => println!("✓ Rendered: {}", path.display()),
        Ok(None) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

/// Render and return the written path, or `None` when printed to stdout
fn render(
    input_file: Option<&Path>,
    format_str: &str,
    output_file: Option<&Path>,
    to_stdout: bool,
    config: &Config,
) -> Result<Option<PathBuf>, String> {
    let format: OutputFormat = format_str.parse().map_err(|e| format!("✗ {e}"))?;
    let (tree, layout) = load_and_layout(input_file, config)?;
    let renderer = format.renderer(config.render_settings(), &tree.name);

    if to_stdout {
        let content = renderer.render(&layout).map_err(|e| {
            error!("Rendering '{}' as {format} failed: {e}", tree.name);
            format!("✗ Failed to render '{}': {e}", tree.name)
        })?;
        print!("{content}");
        return Ok(None);
    }

    let output_path = match output_file {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input_file, &tree.name, format, config)?,
    };

    renderer.render_to_file(&layout, &output_path).map_err(|e| {
        error!("Rendering '{}' as {format} failed: {e}", tree.name);
        format!("✗ Failed to render '{}': {e}", tree.name)
    })?;

    info!("Rendered '{}' as {format} to {}", tree.name, output_path.display());
    verbose!(
        "  {} skills, {} links, {} starting skills",
        layout.nodes.len(),
        layout.edges.len(),
        layout.roots.len()
    );
    Ok(Some(output_path))
}

/// `<out_dir>/<input stem or tree name>.<ext>`, creating `out_dir` if needed
fn default_output_path(
    input_file: Option<&Path>,
    tree_name: &str,
    format: OutputFormat,
    config: &Config,
) -> Result<PathBuf, String> {
    let out_dir = PathBuf::from(&config.paths.out_dir);
    std::fs::create_dir_all(&out_dir).map_err(|e| {
        format!(
            "✗ Failed to create output directory {}: {e}",
            out_dir.display()
        )
    })?;

    let stem = input_file
        .and_then(Path::file_stem)
        .and_then(|stem| stem.to_str())
        .map_or_else(|| file_stem_from_name(tree_name), str::to_string);

    Ok(out_dir.join(format!("{stem}.{}", format.extension())))
}

/// Turn a tree name into a file stem: lowercase, non-alphanumerics as `_`
fn file_stem_from_name(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "skill_tree".to_string()
    } else {
        stem
    }
}
