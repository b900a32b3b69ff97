//! Pulse actuation - chunked, blocking waveform transmission.

use embedded_hal::delay::DelayNs;

use crate::config::units::Steps;
use crate::config::PulseConfig;
use crate::error::{ConfigError, Error, MotorError, Result, WaveformOp};

use super::waveform::{PulseTrain, WaveId, WaveformChannel};

/// Turns step counts into transmitted pulse trains.
///
/// A move larger than the waveform buffer is sent as several transmissions
/// of at most `max_edges / 2` steps each. Every transmission is awaited
/// before the next is built, so `actuate` returns only once the carriage
/// has stopped.
#[derive(Debug)]
pub struct PulseActuator<W, D> {
    /// Pulse generator.
    channel: W,

    /// Delay provider for busy polling.
    delay: D,

    /// Edge timing and buffer limits.
    timing: PulseConfig,

    /// Steps confirmed sent by the current or last `actuate` call.
    completed: u32,
}

impl<W, D> PulseActuator<W, D>
where
    W: WaveformChannel,
    D: DelayNs,
{
    /// Create a new actuator.
    pub fn new(channel: W, delay: D, timing: PulseConfig) -> Self {
        Self {
            channel,
            delay,
            timing,
            completed: 0,
        }
    }

    /// Emit `steps` pulses on a channel whose direction is already set.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::ActuationFault` if a waveform primitive fails,
    /// `MotorError::HardwareTimeout` if a transmission overruns its budget and
    /// `ConfigError::InvalidMaxEdges` if the buffer cannot hold one step.
    /// Chunks sent before the failure stay sent; see [`completed_steps`].
    ///
    /// [`completed_steps`]: PulseActuator::completed_steps
    pub fn actuate(&mut self, steps: Steps) -> Result<()> {
        self.completed = 0;
        let mut remaining = steps.0;

        while remaining > 0 {
            let chunk = self.timing.chunk_steps(remaining);
            if chunk == 0 {
                return Err(ConfigError::InvalidMaxEdges(self.timing.max_edges).into());
            }
            trace!("transmitting {} of {} steps", chunk, remaining);

            self.transmit(chunk)?;

            self.completed += chunk;
            remaining -= chunk;
        }

        Ok(())
    }

    /// Steps sent by the most recent `actuate` call.
    #[inline]
    pub fn completed_steps(&self) -> Steps {
        Steps(self.completed)
    }

    /// Get the pulse timing.
    #[inline]
    pub fn timing(&self) -> &PulseConfig {
        &self.timing
    }

    /// Get the waveform channel.
    #[inline]
    pub fn channel(&self) -> &W {
        &self.channel
    }

    /// Consume the actuator, returning the waveform channel.
    pub fn into_channel(self) -> W {
        self.channel
    }

    /// Drop any waveform left on the channel.
    pub fn release(&mut self) -> Result<()> {
        self.channel
            .clear()
            .map_err(|e| fault(WaveformOp::Clear, e))
    }

    fn transmit(&mut self, steps: u32) -> Result<()> {
        self.channel
            .clear()
            .map_err(|e| fault(WaveformOp::Clear, e))?;

        let train = PulseTrain::new(steps, self.timing.high_us, self.timing.low_us);
        self.channel
            .add_edges(train)
            .map_err(|e| fault(WaveformOp::Build, e))?;

        let wave = self
            .channel
            .create()
            .map_err(|e| fault(WaveformOp::Create, e))?;

        // The wave is deleted even when sending fails
        let sent = self.send_and_wait(wave, steps);
        let deleted = self
            .channel
            .delete(wave)
            .map_err(|e| fault(WaveformOp::Delete, e));

        sent.and(deleted)
    }

    fn send_and_wait(&mut self, wave: WaveId, steps: u32) -> Result<()> {
        self.channel
            .send_once(wave)
            .map_err(|e| fault(WaveformOp::Send, e))?;

        let budget_us = self.timing.wait_budget_us(steps);
        let poll_us = self.timing.poll_interval_us.max(1);
        let mut waited_us: u64 = 0;

        while self
            .channel
            .is_busy()
            .map_err(|e| fault(WaveformOp::Poll, e))?
        {
            if waited_us >= budget_us {
                error!("transmission of {} steps timed out", steps);
                return Err(MotorError::HardwareTimeout { waited_us }.into());
            }
            self.delay.delay_us(poll_us);
            waited_us += poll_us as u64;
        }

        Ok(())
    }
}

fn fault<E>(op: WaveformOp, _cause: E) -> Error {
    error!("waveform {} failed", op);
    MotorError::ActuationFault(op).into()
}
