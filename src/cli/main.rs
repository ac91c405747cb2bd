//! Command-line interface entry point for `skilltree`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use skill_tree::config::Config;
use skill_tree::info;
use skill_tree::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let stored = Config::load();
    let defaults = Config::from_defaults();
    let mut config = stored.clone();
    config.apply_overrides(&args.to_config_overrides());

    // Effective runtime level: CLI flag, then config, then warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            // Edit the stored config so one-off CLI overrides are never persisted
            let mut stored = stored;
            commands::config::run(subcommand, &mut stored, &defaults);
        }
        Command::Layout { input_file, toml } => {
            commands::layout::run(input_file.as_deref(), toml, &config);
        }
        Command::Render {
            input_file,
            format,
            output,
            stdout,
        } => {
            commands::render::run(
                input_file.as_deref(),
                &format,
                output.as_deref(),
                stdout,
                &config,
            );
        }
    }
}
