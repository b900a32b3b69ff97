//! Software waveform channel.
//!
//! Plays the pulse train by toggling an embedded-hal `OutputPin` with a
//! `DelayNs` provider. Transmission happens inside `send_once`, so the
//! channel is never busy afterwards. Timing is only as accurate as the delay
//! provider; prefer a DMA pulse engine where one exists.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use super::waveform::{Edge, WaveId, WaveformChannel};

/// Edge capacity matching the stock 11000-edge waveform buffer.
pub const DEFAULT_EDGES: usize = 11_000;

/// Errors from [`BitBangChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitBangError<E> {
    /// The step pin rejected a write.
    Pin(E),
    /// More edges were added than the buffer holds.
    BufferFull,
    /// The wave id is not the one currently created.
    UnknownWave(WaveId),
}

/// Bit-banged step pulse generator with an `N`-edge buffer.
pub struct BitBangChannel<STEP, D, const N: usize = DEFAULT_EDGES>
where
    STEP: OutputPin,
    D: DelayNs,
{
    /// STEP pin (pulse to move one step).
    step_pin: STEP,

    /// Delay provider for edge timing.
    delay: D,

    /// Pending or created waveform.
    edges: heapless::Vec<Edge, N>,

    /// Currently created wave.
    wave: Option<WaveId>,

    next_id: u16,
}

impl<STEP, D, const N: usize> BitBangChannel<STEP, D, N>
where
    STEP: OutputPin,
    D: DelayNs,
{
    /// Create a channel driving `step_pin`.
    pub fn new(step_pin: STEP, delay: D) -> Self {
        Self {
            step_pin,
            delay,
            edges: heapless::Vec::new(),
            wave: None,
            next_id: 0,
        }
    }

    /// Edges currently loaded.
    #[inline]
    pub fn pending_edges(&self) -> usize {
        self.edges.len()
    }

    /// Give back the step pin and delay provider.
    pub fn release(self) -> (STEP, D) {
        (self.step_pin, self.delay)
    }

    fn check(&self, wave: WaveId) -> Result<(), BitBangError<STEP::Error>> {
        if self.wave == Some(wave) {
            Ok(())
        } else {
            Err(BitBangError::UnknownWave(wave))
        }
    }
}

impl<STEP, D, const N: usize> WaveformChannel for BitBangChannel<STEP, D, N>
where
    STEP: OutputPin,
    D: DelayNs,
{
    type Error = BitBangError<STEP::Error>;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.edges.clear();
        self.wave = None;
        Ok(())
    }

    fn add_edges<I>(&mut self, edges: I) -> Result<usize, Self::Error>
    where
        I: Iterator<Item = Edge>,
    {
        let mut added = 0;
        for edge in edges {
            self.edges.push(edge).map_err(|_| BitBangError::BufferFull)?;
            added += 1;
        }
        Ok(added)
    }

    fn create(&mut self) -> Result<WaveId, Self::Error> {
        let id = WaveId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.wave = Some(id);
        Ok(id)
    }

    fn send_once(&mut self, wave: WaveId) -> Result<(), Self::Error> {
        self.check(wave)?;

        for edge in self.edges.iter() {
            self.step_pin
                .set_state(edge.state)
                .map_err(BitBangError::Pin)?;
            self.delay.delay_us(edge.hold_us);
        }

        Ok(())
    }

    fn is_busy(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn delete(&mut self, wave: WaveId) -> Result<(), Self::Error> {
        self.check(wave)?;
        self.wave = None;
        self.edges.clear();
        Ok(())
    }
}
