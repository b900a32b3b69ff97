//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::planner;

use super::{JigConfig, PulseConfig};

/// Validate a jig configuration.
///
/// Checks:
/// - Motor scale is positive
/// - Pulse edges, buffer size and poll interval are usable
/// - Nudge travel is positive
/// - No GPIO is assigned twice
/// - The default job plans without error
pub fn validate_config(config: &JigConfig) -> Result<()> {
    validate_motor(config)?;
    validate_pulse(&config.pulse)?;

    if !config.nudge.travel.is_positive() {
        return Err(Error::Config(ConfigError::InvalidNudgeTravel(
            config.nudge.travel.0,
        )));
    }

    let pins = config.gpio_numbers();
    for (i, pin) in pins.iter().enumerate() {
        if pins[i + 1..].contains(pin) {
            return Err(Error::Config(ConfigError::DuplicatePin(*pin)));
        }
    }

    planner::plan(&config.job, &config.scale())?;

    Ok(())
}

fn validate_motor(config: &JigConfig) -> Result<()> {
    if config.motor.steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            config.motor.steps_per_revolution,
        )));
    }

    let tpi = config.motor.threads_per_inch;
    if !tpi.is_finite() || tpi <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidThreadsPerInch(tpi)));
    }

    Ok(())
}

pub(crate) fn validate_pulse(pulse: &PulseConfig) -> Result<()> {
    if pulse.high_us == 0 || pulse.low_us == 0 {
        return Err(Error::Config(ConfigError::InvalidPulseTiming {
            high_us: pulse.high_us,
            low_us: pulse.low_us,
        }));
    }

    // One step needs a high and a low edge in the same transmission
    if pulse.max_edges < 2 {
        return Err(Error::Config(ConfigError::InvalidMaxEdges(pulse.max_edges)));
    }

    if pulse.poll_interval_us == 0 {
        return Err(Error::Config(ConfigError::InvalidPollInterval(
            pulse.poll_interval_us,
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Inches;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&JigConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_threads_per_inch() {
        let mut config = JigConfig::default();
        config.motor.threads_per_inch = -16.0;

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidThreadsPerInch(_)))
        ));
    }

    #[test]
    fn test_single_edge_buffer_rejected() {
        let mut config = JigConfig::default();
        config.pulse.max_edges = 1;

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidMaxEdges(1)))
        ));
    }

    #[test]
    fn test_duplicate_pin_rejected() {
        let mut config = JigConfig::default();
        config.buttons.reset = config.pins.step;

        let result = validate_config(&config);
        assert_eq!(result, Err(Error::Config(ConfigError::DuplicatePin(17))));
    }

    #[test]
    fn test_invalid_default_job_rejected() {
        let mut config = JigConfig::default();
        config.job.work_piece_width = Inches(0.0);

        assert!(matches!(validate_config(&config), Err(Error::Geometry(_))));
    }
}
