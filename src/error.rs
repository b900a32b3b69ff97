//! Error types for boxjoint-motion.
//!
//! Provides unified error handling across configuration, planning, motor
//! control, sequencing and progress persistence.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all boxjoint-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Joint geometry cannot be turned into a cut plan
    Geometry(GeometryError),
    /// Motor or waveform hardware error
    Motor(MotorError),
    /// Sequencer refused the requested operation
    Sequence(SequenceError),
    /// Progress store read or write failed
    Store(StoreError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Steps per revolution must be > 0
    InvalidStepsPerRevolution(u16),
    /// Threads per inch must be > 0
    InvalidThreadsPerInch(f32),
    /// Both pulse edges must be held for at least one microsecond
    InvalidPulseTiming {
        /// High time in microseconds
        high_us: u32,
        /// Low time in microseconds
        low_us: u32,
    },
    /// Waveform buffer must hold at least one high/low pair
    InvalidMaxEdges(u32),
    /// Busy-poll interval must be > 0
    InvalidPollInterval(u32),
    /// Nudge travel must be > 0
    InvalidNudgeTravel(f32),
    /// Two inputs or outputs share a GPIO number
    DuplicatePin(u8),
    /// Builder is missing a required part
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Invalid cut geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A length is zero, negative or not a number
    NonPositive {
        /// Parameter name
        parameter: &'static str,
        /// Offending value in inches
        value: f32,
    },
    /// Finger width must exceed the tolerance
    FingerNotWiderThanTolerance {
        /// Finger width in inches
        finger_width: f32,
        /// Tolerance in inches
        tolerance: f32,
    },
    /// A length rounds to zero motor steps
    BelowResolution {
        /// Parameter name
        parameter: &'static str,
    },
    /// A length does not fit in a step count
    OutOfRange {
        /// Parameter name
        parameter: &'static str,
        /// Offending value in inches
        value: f32,
    },
    /// Plan exceeds the move capacity or the step counter
    PlanTooLong {
        /// Maximum number of moves in a plan
        max_moves: usize,
    },
}

/// Motor and waveform errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// A GPIO pin could not be read or written
    PinError,
    /// A waveform primitive failed; motion may be partially applied
    ActuationFault(WaveformOp),
    /// Transmission did not complete within its time budget
    HardwareTimeout {
        /// Time spent polling, in microseconds
        waited_us: u64,
    },
}

/// Waveform primitive that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaveformOp {
    /// Clearing previous waveforms
    Clear,
    /// Loading pulse edges
    Build,
    /// Creating the wave from loaded edges
    Create,
    /// Starting one-shot transmission
    Send,
    /// Polling for completion
    Poll,
    /// Releasing the wave
    Delete,
}

/// Sequencer refusals.
#[derive(Debug, Clone, PartialEq)]
pub enum SequenceError {
    /// Motion requested while the driver is disabled
    ControllerOff,
    /// Nudge requested after the first cut of the plan
    CutInProgress {
        /// Moves already executed
        index: usize,
    },
    /// The motion worker has shut down (std only)
    #[cfg(feature = "std")]
    WorkerStopped,
}

/// Progress store errors.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Backing storage cannot be read or written
    Unavailable(heapless::String<128>),
    /// Stored document is malformed
    Corrupt(heapless::String<128>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Geometry(e) => write!(f, "Invalid geometry: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Sequence(e) => write!(f, "Sequence error: {}", e),
            Error::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidThreadsPerInch(v) => {
                write!(f, "Invalid threads per inch: {}. Must be > 0", v)
            }
            ConfigError::InvalidPulseTiming { high_us, low_us } => {
                write!(f, "Invalid pulse timing: high {}us, low {}us. Both must be > 0", high_us, low_us)
            }
            ConfigError::InvalidMaxEdges(v) => write!(f, "Invalid max edges: {}. Must be >= 2", v),
            ConfigError::InvalidPollInterval(v) => write!(f, "Invalid poll interval: {}us. Must be > 0", v),
            ConfigError::InvalidNudgeTravel(v) => write!(f, "Invalid nudge travel: {}. Must be > 0", v),
            ConfigError::DuplicatePin(pin) => write!(f, "GPIO {} is assigned more than once", pin),
            ConfigError::MissingField(name) => write!(f, "{} is required", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::NonPositive { parameter, value } => {
                write!(f, "{} must be a positive length, got {}", parameter, value)
            }
            GeometryError::FingerNotWiderThanTolerance { finger_width, tolerance } => {
                write!(f, "Finger width {} must exceed tolerance {}", finger_width, tolerance)
            }
            GeometryError::BelowResolution { parameter } => {
                write!(f, "{} is smaller than one motor step", parameter)
            }
            GeometryError::OutOfRange { parameter, value } => {
                write!(f, "{} of {} exceeds the step range", parameter, value)
            }
            GeometryError::PlanTooLong { max_moves } => {
                write!(f, "Cut plan too long (max {} moves)", max_moves)
            }
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::ActuationFault(op) => write!(f, "Waveform {} failed", op),
            MotorError::HardwareTimeout { waited_us } => {
                write!(f, "Waveform transmission still busy after {}us", waited_us)
            }
        }
    }
}

impl fmt::Display for WaveformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WaveformOp::Clear => "clear",
            WaveformOp::Build => "build",
            WaveformOp::Create => "create",
            WaveformOp::Send => "send",
            WaveformOp::Poll => "poll",
            WaveformOp::Delete => "delete",
        };
        f.write_str(name)
    }
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::ControllerOff => write!(f, "Controller is off"),
            SequenceError::CutInProgress { index } => {
                write!(f, "Cannot nudge, cut in progress at move {}", index)
            }
            #[cfg(feature = "std")]
            SequenceError::WorkerStopped => write!(f, "Motion worker has stopped"),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
            StoreError::Corrupt(msg) => write!(f, "Stored progress is corrupt: {}", msg),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<GeometryError> for Error {
    fn from(e: GeometryError) -> Self {
        Error::Geometry(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<SequenceError> for Error {
    fn from(e: SequenceError) -> Self {
        Error::Sequence(e)
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Error::Store(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for GeometryError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for SequenceError {}

#[cfg(feature = "std")]
impl std::error::Error for StoreError {}
