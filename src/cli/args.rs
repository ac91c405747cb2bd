//! CLI argument definitions for `skilltree`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use skill_tree::config::ConfigOverrides;
use skill_tree::core::layout::DepthPolicy;
use skill_tree::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `Level` for
/// runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

/// CLI depth policy argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum DepthPolicyArg {
    /// One level above the deepest prerequisite
    Longest,
    /// Depth at which breadth-first search first reaches the skill
    FirstSeen,
}

impl From<DepthPolicyArg> for DepthPolicy {
    fn from(arg: DepthPolicyArg) -> Self {
        match arg {
            DepthPolicyArg::Longest => Self::Longest,
            DepthPolicyArg::FirstSeen => Self::FirstSeen,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `canvas_width`, `out_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// List every configuration key.
    Keys,
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Compute and print skill positions.
    ///
    /// Loads a skill tree TOML file (or the bundled sample) and prints the
    /// position, depth, and subtree width of every skill.
    Layout {
        /// Path to a skill tree TOML file (defaults to the bundled sample)
        #[arg(value_name = "FILE")]
        input_file: Option<PathBuf>,

        /// Print the layout as TOML instead of a table
        #[arg(long)]
        toml: bool,
    },
    /// Render a skill tree to SVG, HTML, or Mermaid.
    Render {
        /// Path to a skill tree TOML file (defaults to the bundled sample)
        #[arg(value_name = "FILE")]
        input_file: Option<PathBuf>,

        /// Output format: svg, html, mermaid (mmd), or markdown (md)
        #[arg(short, long, value_name = "FORMAT", default_value = "svg")]
        format: String,

        /// Output file path (optional; defaults to `out_dir`/<name>.<ext>)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Write to stdout instead of a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "skilltree",
    about = "Skill tree layout and rendering",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (this run only)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override canvas width
    #[arg(long, value_name = "PIXELS")]
    pub canvas_width: Option<f64>,

    /// Override canvas height
    #[arg(long, value_name = "PIXELS")]
    pub canvas_height: Option<f64>,

    /// Override the depth policy for skills with several prerequisites
    #[arg(long, value_enum)]
    pub depth_policy: Option<DepthPolicyArg>,

    /// Override config output directory
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means no override for that field.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            depth_policy: self
                .depth_policy
                .map(|policy| DepthPolicy::from(policy).to_string()),
            out_dir: self
                .out_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
