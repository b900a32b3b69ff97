//! Unit tests for TOML configuration parsing.

use boxjoint_motion::config::{load_config, JigConfig};
use boxjoint_motion::{Inches, StepScale};

/// Test parsing the pin map and front panel.
#[test]
fn test_parse_pins_and_buttons() {
    let toml_str = r#"
[pins]
enable = 23
direction = 24
step = 18

[buttons]
go = 12
left = 13
right = 16
reset = 26
debounce_us = 5000
"#;

    let config: JigConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.pins.step, 18);
    assert_eq!(config.buttons.reset, 26);
    assert_eq!(config.buttons.debounce_us, 5000);
    assert_eq!(config.gpio_numbers(), [23, 24, 18, 12, 13, 16, 26]);
}

/// Test that omitted sections fall back to the stock jig.
#[test]
fn test_partial_sections_keep_defaults() {
    let toml_str = r#"
[motor]
threads_per_inch = 20.0

[pulse]
low_us = 300
"#;

    let config: JigConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.motor.steps_per_revolution, 200);
    assert_eq!(config.pulse.high_us, 500);
    assert_eq!(config.pulse.low_us, 300);
    assert_eq!(config.pulse.period_us(), 800);
    assert_eq!(config.scale(), StepScale::new(4000.0));
    assert_eq!(config.pins.enable, 22);
}

/// Test the nudge section key.
#[test]
fn test_parse_nudge_travel() {
    let config: JigConfig =
        toml::from_str("[nudge]\ntravel_inches = 0.0625\n").expect("Failed to parse TOML");

    assert_eq!(config.nudge.travel, Inches(0.0625));
}

/// Test loading a configuration file from disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!("boxjoint-jig-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
[motor]
enable_active_low = true

[job]
offset = false
work_piece_width = 0.75
"#,
    )
    .expect("Failed to write config");

    let config = load_config(&path).expect("Config should load");

    assert!(config.motor.enable_active_low);
    assert!(!config.job.offset);
    assert_eq!(config.job.work_piece_width, Inches(0.75));
    assert_eq!(config.job.finger_width, Inches(0.25));

    let _ = std::fs::remove_file(&path);
}
