//! # boxjoint-motion
//!
//! Stepper carriage motion core for a box-joint (finger-joint) cutting jig,
//! built on embedded-hal 1.0.
//!
//! ## Features
//!
//! - **Cut planning**: Joint geometry becomes an exact, ordered plan of step moves
//! - **Bounded waveforms**: Moves are chunked into fixed-period pulse trains
//!   that never exceed the waveform buffer
//! - **Resumable progress**: The plan and progress index live in a
//!   [`ProgressStore`], so a restart picks up where the jig stopped
//! - **One step per "go"**: Advance, rewind and nudge never skip or repeat a move
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use boxjoint_motion::{CutSequencer, GeometryParameters, MemoryStore, MotorController};
//!
//! let config = boxjoint_motion::load_config("jig.toml")?;
//!
//! let mut motor = MotorController::builder()
//!     .from_config(&config)
//!     .enable_pin(enable_pin)
//!     .dir_pin(dir_pin)
//!     .channel(waveform_channel)
//!     .delay(delay)
//!     .build()?;
//!
//! let mut sequencer = CutSequencer::new(MemoryStore::new(), &config);
//! sequencer.plan(&GeometryParameters::default())?;
//!
//! motor.enable()?;
//! sequencer.advance(&mut motor)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables config files, the file-backed store, the motion
//!   worker thread and `log` output
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod input;
pub mod motor;
pub mod planner;
pub mod sequencer;
#[cfg(feature = "std")]
pub mod worker;

// Re-exports for ergonomic API
pub use config::{validate_config, JigConfig};
pub use error::{Error, Result};
pub use input::{ButtonPanel, Debouncer, Trigger};
pub use motor::{Direction, MotorController, MotorDrive, PulseActuator, WaveformChannel};
pub use planner::{plan, CutPlan, GeometryParameters};
pub use sequencer::{CutSequencer, MemoryStore, Outcome, ProgressStore, SequenceState, Status};

#[cfg(feature = "std")]
pub use sequencer::FileStore;
#[cfg(feature = "std")]
pub use worker::{MotionHandle, MotionWorker};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;

// Unit types
pub use config::units::{Inches, Steps};
pub use config::StepScale;
