//! Unit types for physical quantities.
//!
//! Provides type-safe representations of carriage travel and motor steps to
//! prevent unit confusion at compile time.

use serde::{Deserialize, Serialize};

/// Linear carriage travel in inches.
///
/// Used for configuration and user-facing API. Internally converted to [`Steps`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f32);

impl Inches {
    /// Create a new Inches value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// True for finite values greater than zero.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

/// Magnitude of a move in motor steps.
///
/// Direction is carried separately, so a step count is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Steps(pub u32);

impl Steps {
    /// No motion.
    pub const ZERO: Self = Self(0);

    /// Create a new Steps value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// True when the move emits no pulses.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Convert to inches using a steps per inch ratio.
    #[inline]
    pub fn to_inches(self, steps_per_inch: f32) -> Inches {
        Inches(self.0 as f32 / steps_per_inch)
    }

    /// Create from inches, rounded to the nearest whole step.
    ///
    /// Returns `None` for negative, non-finite or out of range travel.
    #[inline]
    pub fn from_inches(inches: Inches, steps_per_inch: f32) -> Option<Self> {
        let raw = libm::roundf(inches.0 * steps_per_inch);
        if raw.is_finite() && raw >= 0.0 && raw < u32::MAX as f32 {
            Some(Self(raw as u32))
        } else {
            None
        }
    }
}
