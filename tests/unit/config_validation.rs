//! Unit tests for configuration validation.

use boxjoint_motion::config::{parse_config, validate_config, JigConfig};
use boxjoint_motion::error::{ConfigError, Error, GeometryError};
use boxjoint_motion::Inches;

/// Test validation of the stock configuration.
#[test]
fn test_stock_config_passes_validation() {
    assert!(validate_config(&JigConfig::default()).is_ok());
}

/// Test validation fails for a motor without steps.
#[test]
fn test_zero_steps_per_revolution() {
    let result = parse_config("[motor]\nsteps_per_revolution = 0\n");

    assert_eq!(
        result.err(),
        Some(Error::Config(ConfigError::InvalidStepsPerRevolution(0)))
    );
}

/// Test validation fails for a zero-width pulse edge.
#[test]
fn test_zero_pulse_width() {
    let mut config = JigConfig::default();
    config.pulse.low_us = 0;

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidPulseTiming {
            high_us: 500,
            low_us: 0
        }))
    );
}

/// Test validation fails for a zero poll interval.
#[test]
fn test_zero_poll_interval() {
    let mut config = JigConfig::default();
    config.pulse.poll_interval_us = 0;

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidPollInterval(0)))
    );
}

/// Test validation fails for a non-positive nudge.
#[test]
fn test_negative_nudge() {
    let mut config = JigConfig::default();
    config.nudge.travel = Inches(-0.01);

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidNudgeTravel(_)))
    ));
}

/// Test validation of the default job geometry.
#[test]
fn test_finger_not_wider_than_tolerance() {
    let toml_str = r#"
[job]
finger_width = 0.01
tolerance = 0.01
"#;

    let result = parse_config(toml_str);

    assert!(matches!(
        result,
        Err(Error::Geometry(GeometryError::FingerNotWiderThanTolerance { .. }))
    ));
}

/// Test that a button cannot share a line with the driver.
#[test]
fn test_button_on_driver_line() {
    let result = parse_config("[buttons]\ngo = 27\n");

    assert_eq!(result.err(), Some(Error::Config(ConfigError::DuplicatePin(27))));
}
