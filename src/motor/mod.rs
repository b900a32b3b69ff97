//! Motor module for boxjoint-motion.
//!
//! Provides the enable-gated motor controller, the chunked pulse actuator
//! and the waveform channel abstraction it transmits through.

mod actuator;
mod bitbang;
mod builder;
mod controller;
mod direction;
mod waveform;

pub use actuator::PulseActuator;
pub use bitbang::{BitBangChannel, BitBangError, DEFAULT_EDGES};
pub use builder::MotorControllerBuilder;
pub use controller::{MotorController, MotorDrive};
pub use direction::{Direction, Position};
pub use waveform::{Edge, PulseTrain, WaveId, WaveformChannel};
