//! Jig configuration - root configuration structure.

use serde::Deserialize;

use super::mechanical::StepScale;
use super::motor::{MotorConfig, PulseConfig};
use super::pins::{ButtonConfig, PinConfig};
use super::units::Inches;
use crate::planner::GeometryParameters;

/// Manual positioning from the front panel.
#[derive(Debug, Clone, Deserialize)]
pub struct NudgeConfig {
    /// Travel per nudge press.
    #[serde(default = "default_nudge_travel", rename = "travel_inches")]
    pub travel: Inches,
}

fn default_nudge_travel() -> Inches {
    Inches(1.0 / 64.0)
}

impl Default for NudgeConfig {
    fn default() -> Self {
        Self {
            travel: default_nudge_travel(),
        }
    }
}

/// Root configuration structure from TOML.
///
/// Every section is optional; omitted values fall back to the stock jig
/// (NEMA 17 on a 16 TPI screw, 500µs edges, 1/64" nudges).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JigConfig {
    /// Motor and lead screw.
    #[serde(default)]
    pub motor: MotorConfig,

    /// Step pulse timing.
    #[serde(default)]
    pub pulse: PulseConfig,

    /// Driver GPIO lines.
    #[serde(default)]
    pub pins: PinConfig,

    /// Front panel buttons.
    #[serde(default)]
    pub buttons: ButtonConfig,

    /// Nudge travel.
    #[serde(default)]
    pub nudge: NudgeConfig,

    /// Joint geometry planned when no other is supplied.
    #[serde(default)]
    pub job: GeometryParameters,
}

impl JigConfig {
    /// Step scale of the configured motor and lead screw.
    pub fn scale(&self) -> StepScale {
        StepScale::from_config(&self.motor)
    }

    /// GPIO numbers in use, outputs first.
    pub fn gpio_numbers(&self) -> [u8; 7] {
        [
            self.pins.enable,
            self.pins.direction,
            self.pins.step,
            self.buttons.go,
            self.buttons.left,
            self.buttons.right,
            self.buttons.reset,
        ]
    }
}
