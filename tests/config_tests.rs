//! Integration tests for configuration management

use skill_tree::config::{Config, ConfigOverrides, CONFIG_KEYS};
use skill_tree::core::layout::DepthPolicy;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.out_dir.is_empty(),
        "Default out_dir should not be empty"
    );
    assert_eq!(config.layout.depth_policy, "longest");
    assert!(config.layout.skip_dangling_edges);
}

#[test]
fn test_defaults_expand_dir_variable() {
    let config = Config::from_defaults();
    assert!(!config.paths.out_dir.contains("$SKILL_TREE"));
    assert!(config.paths.out_dir.contains("skilltree"));
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r##"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[layout]
canvas_width = 1200.0
canvas_height = 800.0
horizontal_spacing = 100.0
vertical_spacing = 120.0
depth_policy = "first-seen"
skip_dangling_edges = false

[render]
root_color = "#c00"
font_size = 12.0

[paths]
out_dir = "./renders"
"##;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert!((config.layout.canvas_width - 1200.0).abs() < f64::EPSILON);
    assert!((config.layout.vertical_spacing - 120.0).abs() < f64::EPSILON);
    assert_eq!(config.layout.depth_policy, "first-seen");
    assert!(!config.layout.skip_dangling_edges);
    assert_eq!(config.render.root_color, "#c00");
    assert_eq!(config.render.child_color, "blue");
    assert_eq!(config.paths.out_dir, "./renders");
}

#[test]
fn test_config_from_toml_partial() {
    // Missing sections and fields take the embedded defaults
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");
    let defaults = Config::from_defaults();

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, defaults.logging.file);
    assert_eq!(config.logging.verbose, defaults.logging.verbose);
    assert!((config.layout.canvas_width - defaults.layout.canvas_width).abs() < f64::EPSILON);
    assert!((config.render.node_width - defaults.render.node_width).abs() < f64::EPSILON);
    assert_eq!(config.paths.out_dir, defaults.paths.out_dir);
}

#[test]
fn test_missing_layout_keys_use_shipped_defaults() {
    let toml_str = r#"
[logging]
level = "warn"

[layout]
canvas_width = 800.0
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse partial layout");
    let defaults = Config::from_defaults();
    config.merge_defaults(&defaults);

    assert!((config.layout.canvas_width - 800.0).abs() < f64::EPSILON);
    assert_eq!(
        config.layout.skip_dangling_edges,
        defaults.layout.skip_dangling_edges
    );
    assert!(config.layout.skip_dangling_edges);
    assert!(config.layout_settings().unwrap().skip_dangling_edges);
}

#[test]
fn test_explicit_false_is_kept() {
    let toml_str = r#"
[layout]
skip_dangling_edges = false
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse layout");
    assert!(!config.layout.skip_dangling_edges);
}

#[test]
fn test_config_without_logging_section() {
    let toml_str = r##"
[layout]
canvas_width = 800.0

[render]
root_color = "#c00"

[paths]
out_dir = "./renders"
"##;

    let config = Config::from_toml(toml_str).expect("Missing [logging] should parse");
    let defaults = Config::from_defaults();

    assert_eq!(config.logging.level, defaults.logging.level);
    assert!((config.layout.canvas_width - 800.0).abs() < f64::EPSILON);
    assert_eq!(config.render.root_color, "#c00");
    assert_eq!(config.paths.out_dir, "./renders");
}

#[test]
fn test_empty_document_equals_defaults() {
    let config = Config::from_toml("").expect("Empty document should parse");
    assert_eq!(config.to_string(), Config::from_defaults().to_string());
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$SKILL_TREE/skilltree.log"

[paths]
out_dir = "$SKILL_TREE/out"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("skilltree"));
    assert!(!config.logging.file.contains("$SKILL_TREE"));
    assert!(config.paths.out_dir.ends_with("out"));
    assert!(!config.paths.out_dir.contains("$SKILL_TREE"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "DEBUG").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config.set("verbose", "true").expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config.set("canvas-width", "1280").expect("Failed to set canvas width");
    assert_eq!(config.get("canvas_width").unwrap(), "1280");

    config.set("depth_policy", "bfs").expect("Failed to set depth policy");
    assert_eq!(config.get("depth-policy").unwrap(), "first-seen");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let mut config = Config::from_defaults();

    assert!(config.set("level", "loud").is_err());
    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("canvas_width", "wide").is_err());
    assert!(config.set("node_height", "NaN").is_err());
    assert!(config.set("depth_policy", "shortest").is_err());
}

#[test]
fn test_every_key_is_gettable() {
    let config = Config::from_defaults();
    for key in CONFIG_KEYS {
        assert!(config.get(key).is_some(), "key '{key}' not readable");
    }
}

#[test]
fn test_every_key_round_trips_through_set() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();
    for key in CONFIG_KEYS {
        let value = defaults.get(key).unwrap();
        if value.is_empty() {
            continue;
        }
        config
            .set(key, &value)
            .unwrap_or_else(|e| panic!("key '{key}' rejected its own default: {e}"));
    }
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "error").expect("Failed to set level");
    config.set("node_width", "90").expect("Failed to set node width");

    config.unset("level", &defaults).expect("Failed to unset level");
    config
        .unset("node-width", &defaults)
        .expect("Failed to unset node width");

    assert_eq!(config.logging.level, defaults.logging.level);
    assert!((config.render.node_width - defaults.render.node_width).abs() < f64::EPSILON);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_unset_to_empty_default() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("file", "/tmp/x.log").unwrap();
    config.unset("file", &defaults).unwrap();
    assert_eq!(config.logging.file, defaults.logging.file);
}

#[test]
fn test_config_save_format_round_trips() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("link_color", "#333").expect("Failed to set link color");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.render.link_color, "#333");
    assert_eq!(loaded.layout.depth_policy, config.layout.depth_policy);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        canvas_width: Some(640.0),
        canvas_height: Some(480.0),
        depth_policy: Some("first-seen".to_string()),
        out_dir: Some("./custom_renders".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert!((config.layout.canvas_width - 640.0).abs() < f64::EPSILON);
    assert!((config.layout.canvas_height - 480.0).abs() < f64::EPSILON);
    assert_eq!(config.layout.depth_policy, "first-seen");
    assert_eq!(config.paths.out_dir, "./custom_renders");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.clone();

    config.apply_overrides(&ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    });

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.out_dir, before.paths.out_dir);
    assert_eq!(config.layout.depth_policy, before.layout.depth_policy);
}

#[test]
fn test_config_display_format() {
    let display_str = Config::from_defaults().to_string();

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[layout]"));
    assert!(display_str.contains("[render]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("depth_policy"));
    assert!(display_str.contains("out_dir"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = ""

[layout]
depth_policy = ""

[paths]
out_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.layout.depth_policy, defaults.layout.depth_policy);
    assert_eq!(config.paths.out_dir, defaults.paths.out_dir);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let mut config = Config::from_defaults();
    config.set("file", "/my/custom/path.log").unwrap();
    config.set("root_color", "gold").unwrap();
    let defaults = Config::from_defaults();

    assert!(!config.merge_defaults(&defaults));
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.render.root_color, "gold");
}

#[test]
fn test_layout_settings_conversion() {
    let mut config = Config::from_defaults();
    config.set("depth_policy", "first-seen").unwrap();
    config.set("vertical_spacing", "75").unwrap();

    let settings = config.layout_settings().expect("valid settings");
    assert_eq!(settings.depth_policy, DepthPolicy::FirstSeen);
    assert!((settings.vertical_spacing - 75.0).abs() < f64::EPSILON);
    assert!(settings.skip_dangling_edges);
}

#[test]
fn test_layout_settings_rejects_non_positive_sizes() {
    let mut config = Config::from_defaults();
    config.set("canvas_width", "0").unwrap();
    assert!(config.layout_settings().is_err());

    let mut config = Config::from_defaults();
    config.set("horizontal_spacing", "-10").unwrap();
    let err = config.layout_settings().unwrap_err();
    assert!(err.contains("horizontal_spacing"));
}

#[test]
fn test_layout_settings_empty_policy_uses_default() {
    let mut config = Config::from_defaults();
    config.layout.depth_policy.clear();
    assert_eq!(
        config.layout_settings().unwrap().depth_policy,
        DepthPolicy::default()
    );
}

#[test]
fn test_render_settings_conversion() {
    let mut config = Config::from_defaults();
    config.set("child_color", "teal").unwrap();
    config.set("font_size", "18").unwrap();

    let settings = config.render_settings();
    assert_eq!(settings.child_color, "teal");
    assert!((settings.font_size - 18.0).abs() < f64::EPSILON);
    assert_eq!(settings.root_color, "red");
}
