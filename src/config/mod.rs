//! Configuration module for boxjoint-motion.
//!
//! Provides types for loading and validating the jig configuration from
//! TOML files (with `std` feature) or pre-built values.

mod jig;
mod mechanical;
mod motor;
mod pins;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use jig::{JigConfig, NudgeConfig};
pub use mechanical::StepScale;
pub use motor::{MotorConfig, PulseConfig};
pub use pins::{ButtonConfig, PinConfig};
pub use validation::validate_config;
pub(crate) use validation::validate_pulse;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
#[cfg(feature = "std")]
pub(crate) use loader::truncated;

// Re-export unit types at config level
pub use units::{Inches, Steps};
