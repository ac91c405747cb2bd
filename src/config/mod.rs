//! Configuration module for `skill-tree`

use crate::core::layout::{DepthPolicy, LayoutSettings};
use crate::core::render::RenderSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the config directory in path values
const DIR_VARIABLE: &str = "$SKILL_TREE";

/// Every key accepted by [`Config::get`], [`Config::set`] and [`Config::unset`]
pub const CONFIG_KEYS: &[&str] = &[
    "level",
    "file",
    "verbose",
    "canvas_width",
    "canvas_height",
    "horizontal_spacing",
    "vertical_spacing",
    "depth_policy",
    "skip_dangling_edges",
    "node_width",
    "node_height",
    "root_color",
    "child_color",
    "stroke_color",
    "stroke_width",
    "text_color",
    "font_size",
    "link_color",
    "link_width",
    "out_dir",
];

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Canvas width
    pub canvas_width: f64,
    /// Canvas height
    pub canvas_height: f64,
    /// Horizontal distance per leaf
    pub horizontal_spacing: f64,
    /// Vertical distance per depth level
    pub vertical_spacing: f64,
    /// Depth policy (longest, first-seen)
    pub depth_policy: String,
    /// Skip links naming unknown skills instead of failing
    pub skip_dangling_edges: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let settings = LayoutSettings::default();
        Self {
            canvas_width: settings.canvas_width,
            canvas_height: settings.canvas_height,
            horizontal_spacing: settings.horizontal_spacing,
            vertical_spacing: settings.vertical_spacing,
            depth_policy: settings.depth_policy.to_string(),
            skip_dangling_edges: settings.skip_dangling_edges,
        }
    }
}

/// Render styling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Node rectangle width
    pub node_width: f64,
    /// Node rectangle height
    pub node_height: f64,
    /// Fill for starting skills
    pub root_color: String,
    /// Fill for other skills
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

impl Default for RenderConfig {
    fn default() -> Self {
        let settings = RenderSettings::default();
        Self {
            node_width: settings.node_width,
            node_height: settings.node_height,
            root_color: settings.root_color,
            child_color: settings.child_color,
            stroke_color: settings.stroke_color,
            stroke_width: settings.stroke_width,
            text_color: settings.text_color,
            font_size: settings.font_size,
            link_color: settings.link_color,
            link_width: settings.link_width,
        }
    }
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for rendered output files
    #[serde(default)]
    pub out_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Layout settings
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Render styling
    #[serde(default)]
    pub render: RenderConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override canvas width
    pub canvas_width: Option<f64>,
    /// Override canvas height
    pub canvas_height: Option<f64>,
    /// Override depth policy
    pub depth_policy: Option<String>,
    /// Override output directory
    pub out_dir: Option<String>,
}

/// Copy `default` into `target` when `target` is empty. Returns `true` if changed.
fn merge_string(target: &mut String, default: &str) -> bool {
    if target.is_empty() && !default.is_empty() {
        default.clone_into(target);
        true
    } else {
        false
    }
}

/// Insert every key of `defaults` that `target` lacks, descending into
/// tables present in both. Returns `true` if anything was inserted.
fn fill_missing(target: &mut toml::Table, defaults: &toml::Table) -> bool {
    let mut filled = false;
    for (key, default) in defaults {
        if !target.contains_key(key) {
            target.insert(key.clone(), default.clone());
            filled = true;
            continue;
        }
        if let (Some(toml::Value::Table(section)), toml::Value::Table(default_section)) =
            (target.get_mut(key), default)
        {
            filled |= fill_missing(section, default_section);
        }
    }
    filled
}

fn parse_number(key: &str, value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Invalid number for '{key}': '{value}'"))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    value
        .parse::<bool>()
        .map_err(|_| format!("Invalid boolean value for '{key}': '{value}'"))
}

impl Config {
    /// Get the `$SKILL_TREE` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/skilltree`
    /// - macOS: `~/Library/Application Support/skilltree`
    /// - Windows: `%APPDATA%\skilltree`
    #[must_use]
    pub fn get_skilltree_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skilltree")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Fills string fields left empty here and non-empty in `defaults`.
    /// Absent keys never reach this point: [`from_toml`](Config::from_toml)
    /// takes them from the embedded defaults.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let merged = [
            merge_string(&mut self.logging.level, &defaults.logging.level),
            merge_string(&mut self.logging.file, &defaults.logging.file),
            merge_string(&mut self.layout.depth_policy, &defaults.layout.depth_policy),
            merge_string(&mut self.render.root_color, &defaults.render.root_color),
            merge_string(&mut self.render.child_color, &defaults.render.child_color),
            merge_string(&mut self.render.stroke_color, &defaults.render.stroke_color),
            merge_string(&mut self.render.text_color, &defaults.render.text_color),
            merge_string(&mut self.render.link_color, &defaults.render.link_color),
            merge_string(&mut self.paths.out_dir, &defaults.paths.out_dir),
        ];
        merged.contains(&true)
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only affect this run; the configuration file is untouched.
    /// Only non-`None` values replace config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(width) = overrides.canvas_width {
            self.layout.canvas_width = width;
        }
        if let Some(height) = overrides.canvas_height {
            self.layout.canvas_height = height;
        }
        if let Some(policy) = &overrides.depth_policy {
            self.layout.depth_policy.clone_from(policy);
        }

        if let Some(out_dir) = &overrides.out_dir {
            self.paths.out_dir.clone_from(out_dir);
        }
    }

    /// Get the user config file path
    ///
    /// Returns the full path to the configuration file:
    /// - `config.toml` for release builds
    /// - `dconfig.toml` for debug builds (allows separate debug config)
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_skilltree_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$SKILL_TREE` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_skilltree_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Keys the document omits, whole sections included, take their values
    /// from the embedded defaults. Path values have `$SKILL_TREE` expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        Self::from_toml_filled(toml_str).map(|(config, _)| config)
    }

    /// Like [`from_toml`](Config::from_toml), also reporting whether any
    /// key had to be taken from the embedded defaults
    fn from_toml_filled(toml_str: &str) -> Result<(Self, bool), toml::de::Error> {
        let mut table: toml::Table = toml::from_str(toml_str)?;
        let defaults: toml::Table = toml::from_str(CONFIG_DEFAULTS)?;
        let filled = fill_missing(&mut table, &defaults);

        let mut config: Self = toml::Value::Table(table).try_into()?;
        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.out_dir = Self::expand_variables(&config.paths.out_dir);

        Ok((config, filled))
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary, so this only happens if the
    /// asset itself is broken.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields from
    ///   defaults, and save it back if anything was added
    /// - On first run: create the config directory and save the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok((mut config, filled)) = Self::from_toml_filled(&content) {
                    let merged = config.merge_defaults(&defaults);
                    if filled || merged {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the
    /// file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// See [`CONFIG_KEYS`] for the supported keys. Dashes and underscores are
    /// interchangeable (`out-dir` and `out_dir`).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let l = &self.layout;
        let r = &self.render;
        let value = match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone(),
            "file" => self.logging.file.clone(),
            "verbose" => self.logging.verbose.to_string(),
            "canvas_width" => l.canvas_width.to_string(),
            "canvas_height" => l.canvas_height.to_string(),
            "horizontal_spacing" => l.horizontal_spacing.to_string(),
            "vertical_spacing" => l.vertical_spacing.to_string(),
            "depth_policy" => l.depth_policy.clone(),
            "skip_dangling_edges" => l.skip_dangling_edges.to_string(),
            "node_width" => r.node_width.to_string(),
            "node_height" => r.node_height.to_string(),
            "root_color" => r.root_color.clone(),
            "child_color" => r.child_color.clone(),
            "stroke_color" => r.stroke_color.clone(),
            "stroke_width" => r.stroke_width.to_string(),
            "text_color" => r.text_color.clone(),
            "font_size" => r.font_size.to_string(),
            "link_color" => r.link_color.clone(),
            "link_width" => r.link_width.to_string(),
            "out_dir" => self.paths.out_dir.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a configuration value by key
    ///
    /// Values are validated and converted: numbers must be finite, booleans
    /// are `true`/`false`, log levels and depth policies must be known.
    /// Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value is invalid
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let key = key.replace('-', "_");
        let l = &mut self.layout;
        let r = &mut self.render;
        match key.as_str() {
            "level" => {
                value.parse::<crate::logger::Level>()?;
                self.logging.level = value.to_ascii_lowercase();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_bool(&key, value)?,
            "canvas_width" => l.canvas_width = parse_number(&key, value)?,
            "canvas_height" => l.canvas_height = parse_number(&key, value)?,
            "horizontal_spacing" => l.horizontal_spacing = parse_number(&key, value)?,
            "vertical_spacing" => l.vertical_spacing = parse_number(&key, value)?,
            "depth_policy" => l.depth_policy = value.parse::<DepthPolicy>()?.to_string(),
            "skip_dangling_edges" => l.skip_dangling_edges = parse_bool(&key, value)?,
            "node_width" => r.node_width = parse_number(&key, value)?,
            "node_height" => r.node_height = parse_number(&key, value)?,
            "root_color" => r.root_color = value.to_string(),
            "child_color" => r.child_color = value.to_string(),
            "stroke_color" => r.stroke_color = value.to_string(),
            "stroke_width" => r.stroke_width = parse_number(&key, value)?,
            "text_color" => r.text_color = value.to_string(),
            "font_size" => r.font_size = parse_number(&key, value)?,
            "link_color" => r.link_color = value.to_string(),
            "link_width" => r.link_width = parse_number(&key, value)?,
            "out_dir" => self.paths.out_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to its default)
    ///
    /// Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        let value = defaults
            .get(key)
            .ok_or_else(|| format!("Unknown config key: '{key}'"))?;
        self.set(key, &value).or_else(|err| {
            // Empty defaults (e.g. no log file) are valid even where `set` is strict
            if value.is_empty() {
                self.set_raw_empty(key)
            } else {
                Err(err)
            }
        })
    }

    fn set_raw_empty(&mut self, key: &str) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clear(),
            "depth_policy" => self.layout.depth_policy.clear(),
            _ => return Err(format!("Empty value not allowed for '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file, so the next [`load()`](Config::load)
    /// recreates it from defaults. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Convert the `[layout]` section into layout settings
    ///
    /// # Errors
    /// Returns an error if a size is not positive or the depth policy is unknown
    pub fn layout_settings(&self) -> Result<LayoutSettings, String> {
        let l = &self.layout;
        for (name, value) in [
            ("canvas_width", l.canvas_width),
            ("canvas_height", l.canvas_height),
            ("horizontal_spacing", l.horizontal_spacing),
            ("vertical_spacing", l.vertical_spacing),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("'{name}' must be a positive number, got {value}"));
            }
        }

        let depth_policy = if l.depth_policy.is_empty() {
            DepthPolicy::default()
        } else {
            l.depth_policy.parse()?
        };

        Ok(LayoutSettings {
            canvas_width: l.canvas_width,
            canvas_height: l.canvas_height,
            horizontal_spacing: l.horizontal_spacing,
            vertical_spacing: l.vertical_spacing,
            depth_policy,
            skip_dangling_edges: l.skip_dangling_edges,
        })
    }

    /// Convert the `[render]` section into render settings
    #[must_use]
    pub fn render_settings(&self) -> RenderSettings {
        let r = &self.render;
        RenderSettings {
            node_width: r.node_width,
            node_height: r.node_height,
            root_color: r.root_color.clone(),
            child_color: r.child_color.clone(),
            stroke_color: r.stroke_color.clone(),
            stroke_width: r.stroke_width,
            text_color: r.text_color.clone(),
            font_size: r.font_size,
            link_color: r.link_color.clone(),
            link_width: r.link_width,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        let l = &self.layout;
        writeln!(f, "\n[layout]")?;
        writeln!(f, "  canvas_width = {}", l.canvas_width)?;
        writeln!(f, "  canvas_height = {}", l.canvas_height)?;
        writeln!(f, "  horizontal_spacing = {}", l.horizontal_spacing)?;
        writeln!(f, "  vertical_spacing = {}", l.vertical_spacing)?;
        writeln!(f, "  depth_policy = \"{}\"", l.depth_policy)?;
        writeln!(f, "  skip_dangling_edges = {}", l.skip_dangling_edges)?;

        let r = &self.render;
        writeln!(f, "\n[render]")?;
        writeln!(f, "  node_width = {}", r.node_width)?;
        writeln!(f, "  node_height = {}", r.node_height)?;
        writeln!(f, "  root_color = \"{}\"", r.root_color)?;
        writeln!(f, "  child_color = \"{}\"", r.child_color)?;
        writeln!(f, "  stroke_color = \"{}\"", r.stroke_color)?;
        writeln!(f, "  stroke_width = {}", r.stroke_width)?;
        writeln!(f, "  text_color = \"{}\"", r.text_color)?;
        writeln!(f, "  font_size = {}", r.font_size)?;
        writeln!(f, "  link_color = \"{}\"", r.link_color)?;
        writeln!(f, "  link_width = {}", r.link_width)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  out_dir = \"{}\"", self.paths.out_dir)?;

        Ok(())
    }
}
