//! Step scale derived from motor configuration.

use super::motor::MotorConfig;
use super::units::{Inches, Steps};

/// Conversion between carriage travel and motor steps.
///
/// Computed once from [`MotorConfig`] and shared by the planner and the sequencer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepScale {
    /// Steps per inch of carriage travel (steps per revolution × threads per inch).
    pub steps_per_inch: f32,
}

impl StepScale {
    /// Create a scale from a raw steps per inch ratio.
    pub const fn new(steps_per_inch: f32) -> Self {
        Self { steps_per_inch }
    }

    /// Compute the scale from motor configuration.
    pub fn from_config(config: &MotorConfig) -> Self {
        Self::new(config.steps_per_inch())
    }

    /// Convert travel to steps, rounded to the nearest step.
    #[inline]
    pub fn to_steps(&self, travel: Inches) -> Option<Steps> {
        Steps::from_inches(travel, self.steps_per_inch)
    }

    /// Convert steps to travel.
    #[inline]
    pub fn to_inches(&self, steps: Steps) -> Inches {
        steps.to_inches(self.steps_per_inch)
    }
}

impl Default for StepScale {
    fn default() -> Self {
        Self::from_config(&MotorConfig::default())
    }
}
