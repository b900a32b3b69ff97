//! Builder pattern for MotorController.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, StatefulOutputPin};

use crate::config::{validate_pulse, JigConfig, PulseConfig, StepScale};
use crate::error::{ConfigError, Result};

use super::actuator::PulseActuator;
use super::controller::MotorController;
use super::direction::Position;
use super::waveform::WaveformChannel;

/// Builder for creating MotorController instances.
pub struct MotorControllerBuilder<EN, DIR, W, D>
where
    EN: StatefulOutputPin,
    DIR: OutputPin,
    W: WaveformChannel,
    D: DelayNs,
{
    enable_pin: Option<EN>,
    dir_pin: Option<DIR>,
    channel: Option<W>,
    delay: Option<D>,
    pulse: PulseConfig,
    invert_direction: bool,
    enable_active_low: bool,
    scale: StepScale,
}

impl<EN, DIR, W, D> Default for MotorControllerBuilder<EN, DIR, W, D>
where
    EN: StatefulOutputPin,
    DIR: OutputPin,
    W: WaveformChannel,
    D: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<EN, DIR, W, D> MotorControllerBuilder<EN, DIR, W, D>
where
    EN: StatefulOutputPin,
    DIR: OutputPin,
    W: WaveformChannel,
    D: DelayNs,
{
    /// Create a new builder with stock jig timing.
    pub fn new() -> Self {
        Self {
            enable_pin: None,
            dir_pin: None,
            channel: None,
            delay: None,
            pulse: PulseConfig::default(),
            invert_direction: false,
            enable_active_low: false,
            scale: StepScale::default(),
        }
    }

    /// Set the ENABLE pin.
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the waveform channel driving the STEP line.
    pub fn channel(mut self, channel: W) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set pulse timing and buffer limits.
    pub fn pulse(mut self, pulse: PulseConfig) -> Self {
        self.pulse = pulse;
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Drive the enable line low to power the driver.
    pub fn enable_active_low(mut self, active_low: bool) -> Self {
        self.enable_active_low = active_low;
        self
    }

    /// Set the step scale used for position reporting.
    pub fn scale(mut self, scale: StepScale) -> Self {
        self.scale = scale;
        self
    }

    /// Take timing, polarity and scale from a jig configuration.
    pub fn from_config(mut self, config: &JigConfig) -> Self {
        self.pulse = config.pulse.clone();
        self.invert_direction = config.motor.invert_direction;
        self.enable_active_low = config.motor.enable_active_low;
        self.scale = config.scale();
        self
    }

    /// Build the MotorController.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if a pin, the channel or the delay
    /// was not supplied, and a pulse timing error if the timing is unusable.
    pub fn build(self) -> Result<MotorController<EN, DIR, W, D>> {
        let enable_pin = self
            .enable_pin
            .ok_or(ConfigError::MissingField("enable_pin"))?;
        let dir_pin = self.dir_pin.ok_or(ConfigError::MissingField("dir_pin"))?;
        let channel = self.channel.ok_or(ConfigError::MissingField("channel"))?;
        let delay = self.delay.ok_or(ConfigError::MissingField("delay"))?;

        validate_pulse(&self.pulse)?;

        Ok(MotorController::new(
            enable_pin,
            dir_pin,
            PulseActuator::new(channel, delay, self.pulse),
            self.enable_active_low,
            self.invert_direction,
            Position::new(self.scale.steps_per_inch),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::motor::bitbang::BitBangChannel;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, Transaction};

    type Builder =
        MotorControllerBuilder<PinMock, PinMock, BitBangChannel<PinMock, NoopDelay, 8>, NoopDelay>;

    fn idle_pin() -> PinMock {
        PinMock::new(&[] as &[Transaction])
    }

    #[test]
    fn test_missing_channel() {
        let mut en = idle_pin();
        let mut dir = idle_pin();

        let result = Builder::new()
            .enable_pin(en.clone())
            .dir_pin(dir.clone())
            .delay(NoopDelay::new())
            .build();

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField("channel")))
        ));
        en.done();
        dir.done();
    }

    #[test]
    fn test_rejects_zero_pulse_width() {
        let mut en = idle_pin();
        let mut dir = idle_pin();
        let mut step = idle_pin();

        let result = Builder::new()
            .enable_pin(en.clone())
            .dir_pin(dir.clone())
            .channel(BitBangChannel::new(step.clone(), NoopDelay::new()))
            .delay(NoopDelay::new())
            .pulse(PulseConfig {
                high_us: 0,
                ..PulseConfig::default()
            })
            .build();

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidPulseTiming { high_us: 0, .. }))
        ));
        en.done();
        dir.done();
        step.done();
    }

    #[test]
    fn test_from_config() {
        let mut config = JigConfig::default();
        config.pulse.high_us = 250;
        config.motor.threads_per_inch = 20.0;
        let mut en = idle_pin();
        let mut dir = idle_pin();
        let mut step = idle_pin();

        let motor = Builder::new()
            .from_config(&config)
            .enable_pin(en.clone())
            .dir_pin(dir.clone())
            .channel(BitBangChannel::new(step.clone(), NoopDelay::new()))
            .delay(NoopDelay::new())
            .build()
            .unwrap();

        assert_eq!(motor.actuator().timing().high_us, 250);
        assert_eq!(motor.position().steps(), 0);
        assert!(motor.last_direction().is_none());
        en.done();
        dir.done();
        step.done();
    }
}
