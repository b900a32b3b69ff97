//! GPIO assignment for the driver and the front panel buttons.

use serde::Deserialize;

/// Driver output lines (BCM numbering).
#[derive(Debug, Clone, Deserialize)]
pub struct PinConfig {
    /// Driver enable line.
    #[serde(default = "default_enable")]
    pub enable: u8,

    /// Driver direction line.
    #[serde(default = "default_direction")]
    pub direction: u8,

    /// Driver step line.
    #[serde(default = "default_step")]
    pub step: u8,
}

fn default_enable() -> u8 {
    22
}

fn default_direction() -> u8 {
    27
}

fn default_step() -> u8 {
    17
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            enable: default_enable(),
            direction: default_direction(),
            step: default_step(),
        }
    }
}

/// Front panel buttons. Inputs are pulled up; a press reads low.
#[derive(Debug, Clone, Deserialize)]
pub struct ButtonConfig {
    /// Advance one cut.
    #[serde(default = "default_go")]
    pub go: u8,

    /// Nudge clockwise.
    #[serde(default = "default_left")]
    pub left: u8,

    /// Nudge counter-clockwise.
    #[serde(default = "default_right")]
    pub right: u8,

    /// Rewind to origin.
    #[serde(default = "default_reset")]
    pub reset: u8,

    /// A level must hold this long before it counts.
    #[serde(default = "default_debounce_us")]
    pub debounce_us: u32,
}

fn default_go() -> u8 {
    4
}

fn default_left() -> u8 {
    5
}

fn default_right() -> u8 {
    6
}

fn default_reset() -> u8 {
    3
}

fn default_debounce_us() -> u32 {
    10_000
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            go: default_go(),
            left: default_left(),
            right: default_right(),
            reset: default_reset(),
            debounce_us: default_debounce_us(),
        }
    }
}
