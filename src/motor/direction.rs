//! Rotation direction and carriage position tracking.

use embedded_hal::digital::PinState;

use crate::config::units::{Inches, Steps};

/// Direction of motor rotation.
///
/// Counter-clockwise carries the work away from the origin (the cutting
/// direction); clockwise returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise, toward the origin.
    Clockwise,
    /// Counter-clockwise, away from the origin.
    CounterClockwise,
}

impl Direction {
    /// Sign of carriage travel for this direction.
    #[inline]
    pub fn travel_sign(self) -> i64 {
        match self {
            Direction::Clockwise => -1,
            Direction::CounterClockwise => 1,
        }
    }

    /// Direction line level; clockwise is high unless inverted.
    #[inline]
    pub fn pin_state(self, invert: bool) -> PinState {
        let high = match self {
            Direction::Clockwise => !invert,
            Direction::CounterClockwise => invert,
        };
        PinState::from(high)
    }

    /// Lower-case name for logs and replies.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Clockwise => "clockwise",
            Direction::CounterClockwise => "counter-clockwise",
        }
    }
}

/// Carriage position tracker.
///
/// Counts steps actually transmitted since power-on. This is diagnostic
/// only; cut progress lives in the progress store.
#[derive(Debug, Clone, Copy, Default)]
pub struct Position {
    /// Current position in steps (from origin)
    steps: i64,
    /// Steps per inch for conversions
    steps_per_inch: f32,
}

impl Position {
    /// Create a new position tracker at the origin.
    #[inline]
    pub fn new(steps_per_inch: f32) -> Self {
        Self {
            steps: 0,
            steps_per_inch,
        }
    }

    /// Get current position in steps.
    #[inline]
    pub fn steps(&self) -> i64 {
        self.steps
    }

    /// Get current position in inches.
    #[inline]
    pub fn inches(&self) -> Inches {
        Inches(self.steps as f32 / self.steps_per_inch)
    }

    /// Record a completed move.
    #[inline]
    pub fn record(&mut self, direction: Direction, steps: Steps) {
        self.steps += direction.travel_sign() * steps.0 as i64;
    }
}
