//! Hardware waveform channel abstraction.
//!
//! A waveform channel plays a prepared sequence of step line edges with
//! exact timing, the way a DMA pulse engine (pigpio's `wave*` calls on a
//! Raspberry Pi) does. The actuator only needs the primitives below.

use embedded_hal::digital::PinState;

/// Handle of a created waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaveId(pub u16);

/// One step line transition and how long it is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Level driven on the step line.
    pub state: PinState,
    /// Hold time in microseconds.
    pub hold_us: u32,
}

/// A pulse generator with a bounded waveform buffer.
///
/// The call order for one transmission is `clear`, `add_edges`, `create`,
/// `send_once`, `is_busy` until false, then `delete`.
pub trait WaveformChannel {
    /// Hardware error type.
    type Error: core::fmt::Debug;

    /// Drop every pending edge and created wave.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Append edges to the pending waveform. Returns the number added.
    fn add_edges<I>(&mut self, edges: I) -> Result<usize, Self::Error>
    where
        I: Iterator<Item = Edge>;

    /// Turn the pending edges into a wave.
    fn create(&mut self) -> Result<WaveId, Self::Error>;

    /// Start transmitting a wave once.
    fn send_once(&mut self, wave: WaveId) -> Result<(), Self::Error>;

    /// True while a transmission is in progress.
    fn is_busy(&mut self) -> Result<bool, Self::Error>;

    /// Release a wave.
    fn delete(&mut self, wave: WaveId) -> Result<(), Self::Error>;
}

/// Fixed-period step pulses as a lazy sequence of edges.
///
/// Yields `steps` high/low pairs, high first.
#[derive(Debug, Clone)]
pub struct PulseTrain {
    remaining_edges: u64,
    high_us: u32,
    low_us: u32,
}

impl PulseTrain {
    /// Pulses for `steps` motor steps.
    pub fn new(steps: u32, high_us: u32, low_us: u32) -> Self {
        Self {
            remaining_edges: steps as u64 * 2,
            high_us,
            low_us,
        }
    }
}

impl Iterator for PulseTrain {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        if self.remaining_edges == 0 {
            return None;
        }

        let rising = self.remaining_edges % 2 == 0;
        self.remaining_edges -= 1;

        Some(if rising {
            Edge {
                state: PinState::High,
                hold_us: self.high_us,
            }
        } else {
            Edge {
                state: PinState::Low,
                hold_us: self.low_us,
            }
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining_edges as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for PulseTrain {}
