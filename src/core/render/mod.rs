//! Rendering backends for laid-out skill trees
//!
//! Every backend implements [`Renderer`], taking a finished [`Layout`] and
//! producing a document. Layout never depends on a backend, so backends can
//! be swapped or tested without a graphical surface.

pub mod html;
pub mod mermaid;
pub mod svg;

pub use html::HtmlRenderer;
pub use mermaid::MermaidRenderer;
pub use svg::SvgRenderer;

use crate::core::layout::Layout;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while rendering a layout
#[derive(Debug, Error)]
pub enum RenderError {
    /// Page template failed to render
    #[error("Failed to render template: {0}")]
    Template(#[from] askama::Error),

    /// Output could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Destination path
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Trait for rendering backends
pub trait Renderer {
    /// Render a layout to a document string
    ///
    /// # Errors
    /// Returns an error if the backend cannot produce output
    fn render(&self, layout: &Layout) -> Result<String, RenderError>;

    /// Render a layout straight to a file
    ///
    /// # Errors
    /// Returns an error if rendering or writing fails
    fn render_to_file(&self, layout: &Layout, output_path: &Path) -> Result<(), RenderError> {
        let content = self.render(layout)?;
        fs::write(output_path, content).map_err(|source| RenderError::Write {
            path: output_path.display().to_string(),
            source,
        })
    }
}

/// Node and link styling shared by the backends
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Node rectangle width
    pub node_width: f64,
    /// Node rectangle height
    pub node_height: f64,
    /// Fill for starting skills
    pub root_color: String,
    /// Fill for every other skill
    pub child_color: String,
    /// Node outline color
    pub stroke_color: String,
    /// Node outline width
    pub stroke_width: f64,
    /// Label color
    pub text_color: String,
    /// Label size in pixels
    pub font_size: f64,
    /// Link color
    pub link_color: String,
    /// Link width in pixels
    pub link_width: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            node_width: 125.0,
            node_height: 40.0,
            root_color: "red".to_string(),
            child_color: "blue".to_string(),
            stroke_color: "#000".to_string(),
            stroke_width: 2.0,
            text_color: "white".to_string(),
            font_size: 14.0,
            link_color: "#aaa".to_string(),
            link_width: 2.0,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Standalone SVG drawing
    Svg,
    /// HTML page embedding the SVG drawing
    Html,
    /// Bare Mermaid flowchart
    Mermaid,
    /// Markdown with a fenced Mermaid flowchart
    Markdown,
}

impl OutputFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Html => "html",
            Self::Mermaid => "mmd",
            Self::Markdown => "md",
        }
    }

    /// Build the renderer for this format
    ///
    /// `title` is used by formats that carry a heading.
    #[must_use]
    pub fn renderer(&self, settings: RenderSettings, title: &str) -> Box<dyn Renderer> {
        match self {
            Self::Svg => Box::new(SvgRenderer::new(settings)),
            Self::Html => Box::new(HtmlRenderer::new(SvgRenderer::new(settings), title)),
            Self::Mermaid => Box::new(MermaidRenderer::new(settings)),
            Self::Markdown => Box::new(MermaidRenderer::new(settings).fenced(title)),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "html" | "htm" => Ok(Self::Html),
            "mermaid" | "mmd" => Ok(Self::Mermaid),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Svg => write!(f, "svg"),
            Self::Html => write!(f, "html"),
            Self::Mermaid => write!(f, "mermaid"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}
