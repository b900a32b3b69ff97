//! Motor controller.
//!
//! Owns the driver enable and direction lines and gates the pulse actuator
//! behind them. Generic over embedded-hal 1.0 pin types.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState, StatefulOutputPin};

use crate::config::units::Steps;
use crate::error::{MotorError, Result};

use super::actuator::PulseActuator;
use super::builder::MotorControllerBuilder;
use super::direction::{Direction, Position};
use super::waveform::WaveformChannel;

/// Motion primitives the cut sequencer drives.
///
/// [`MotorController`] is the hardware implementation. The enable state is
/// the only gate on motion; `move_steps` itself does not check it.
pub trait MotorDrive {
    /// Read the enable line back.
    fn is_enabled(&mut self) -> Result<bool>;

    /// Power the driver. Does nothing if already enabled.
    fn enable(&mut self) -> Result<()>;

    /// Unpower the driver. Does nothing if already disabled.
    fn disable(&mut self) -> Result<()>;

    /// Set the direction line and emit `steps` pulses, blocking until done.
    fn move_steps(&mut self, direction: Direction, steps: Steps) -> Result<()>;

    /// Steps sent by the most recent `move_steps`, including a failed one.
    fn completed_steps(&self) -> Steps;

    /// Disable the driver and drop any pending waveform.
    fn shutdown(&mut self) -> Result<()>;
}

/// Stepper driver with enable gating and direction selection.
///
/// Generic over:
/// - `EN`: driver enable pin (must implement `StatefulOutputPin`)
/// - `DIR`: direction pin (must implement `OutputPin`)
/// - `W`: waveform channel producing step pulses
/// - `D`: delay provider used while waiting on the channel
pub struct MotorController<EN, DIR, W, D>
where
    EN: StatefulOutputPin,
    DIR: OutputPin,
    W: WaveformChannel,
    D: DelayNs,
{
    /// ENABLE pin (driver powered when active).
    enable_pin: EN,

    /// DIR pin (high = CW, low = CCW, or inverted).
    dir_pin: DIR,

    /// Pulse generator behind the STEP line.
    actuator: PulseActuator<W, D>,

    /// Enable line is active low.
    enable_active_low: bool,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Last direction written to the DIR pin.
    direction: Option<Direction>,

    /// Steps transmitted since power-on.
    position: Position,
}

impl<EN, DIR, W, D> MotorController<EN, DIR, W, D>
where
    EN: StatefulOutputPin,
    DIR: OutputPin,
    W: WaveformChannel,
    D: DelayNs,
{
    /// Start building a controller.
    pub fn builder() -> MotorControllerBuilder<EN, DIR, W, D> {
        MotorControllerBuilder::new()
    }

    pub(crate) fn new(
        enable_pin: EN,
        dir_pin: DIR,
        actuator: PulseActuator<W, D>,
        enable_active_low: bool,
        invert_direction: bool,
        position: Position,
    ) -> Self {
        Self {
            enable_pin,
            dir_pin,
            actuator,
            enable_active_low,
            invert_direction,
            direction: None,
            position,
        }
    }

    /// Read the enable line back.
    pub fn is_enabled(&mut self) -> Result<bool> {
        let high = self
            .enable_pin
            .is_set_high()
            .map_err(|_| MotorError::PinError)?;
        Ok(high != self.enable_active_low)
    }

    /// Power the driver.
    pub fn enable(&mut self) -> Result<()> {
        if self.is_enabled()? {
            return Ok(());
        }
        self.set_enable_line(true)?;
        info!("motor driver enabled");
        Ok(())
    }

    /// Unpower the driver.
    pub fn disable(&mut self) -> Result<()> {
        if !self.is_enabled()? {
            return Ok(());
        }
        self.set_enable_line(false)?;
        info!("motor driver disabled");
        Ok(())
    }

    /// Move clockwise, toward the origin.
    pub fn move_clockwise(&mut self, steps: Steps) -> Result<()> {
        self.move_steps(Direction::Clockwise, steps)
    }

    /// Move counter-clockwise, away from the origin.
    pub fn move_counter_clockwise(&mut self, steps: Steps) -> Result<()> {
        self.move_steps(Direction::CounterClockwise, steps)
    }

    /// Write the direction line, then emit `steps` pulses.
    ///
    /// The direction is written on every call since the line is write-only
    /// and may have been disturbed by a restart. Steps sent before a failure
    /// are still recorded in [`position`](Self::position).
    pub fn move_steps(&mut self, direction: Direction, steps: Steps) -> Result<()> {
        self.dir_pin
            .set_state(direction.pin_state(self.invert_direction))
            .map_err(|_| MotorError::PinError)?;
        self.direction = Some(direction);

        debug!("moving {} steps {}", steps.0, direction.as_str());
        let result = self.actuator.actuate(steps);
        self.position.record(direction, self.actuator.completed_steps());
        result
    }

    /// Disable the driver and clear the waveform channel.
    ///
    /// Both are attempted; the first error is returned.
    pub fn shutdown(&mut self) -> Result<()> {
        let disabled = self.disable();
        let released = self.actuator.release();
        warn!("motor controller shut down");
        disabled.and(released)
    }

    /// Carriage position since power-on.
    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Last direction written, if any.
    #[inline]
    pub fn last_direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Get the pulse actuator.
    #[inline]
    pub fn actuator(&self) -> &PulseActuator<W, D> {
        &self.actuator
    }

    /// Give back the pins and the waveform channel.
    pub fn release(self) -> (EN, DIR, W) {
        (self.enable_pin, self.dir_pin, self.actuator.into_channel())
    }

    fn set_enable_line(&mut self, active: bool) -> Result<()> {
        let level = PinState::from(active != self.enable_active_low);
        self.enable_pin
            .set_state(level)
            .map_err(|_| MotorError::PinError.into())
    }
}

impl<EN, DIR, W, D> MotorDrive for MotorController<EN, DIR, W, D>
where
    EN: StatefulOutputPin,
    DIR: OutputPin,
    W: WaveformChannel,
    D: DelayNs,
{
    fn is_enabled(&mut self) -> Result<bool> {
        MotorController::is_enabled(self)
    }

    fn enable(&mut self) -> Result<()> {
        MotorController::enable(self)
    }

    fn disable(&mut self) -> Result<()> {
        MotorController::disable(self)
    }

    fn move_steps(&mut self, direction: Direction, steps: Steps) -> Result<()> {
        MotorController::move_steps(self, direction, steps)
    }

    fn completed_steps(&self) -> Steps {
        self.actuator.completed_steps()
    }

    fn shutdown(&mut self) -> Result<()> {
        MotorController::shutdown(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PulseConfig;
    use crate::error::{Error, WaveformOp};
    use crate::motor::waveform::{Edge, WaveId};
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    /// Counts transmitted steps; optionally refuses to create waves.
    #[derive(Default)]
    struct CountingChannel {
        pending: u32,
        sent: u32,
        cleared: u32,
        broken: bool,
    }

    impl WaveformChannel for CountingChannel {
        type Error = ();

        fn clear(&mut self) -> core::result::Result<(), ()> {
            self.cleared += 1;
            self.pending = 0;
            Ok(())
        }

        fn add_edges<I>(&mut self, edges: I) -> core::result::Result<usize, ()>
        where
            I: Iterator<Item = Edge>,
        {
            let n = edges.count();
            self.pending += n as u32;
            Ok(n)
        }

        fn create(&mut self) -> core::result::Result<WaveId, ()> {
            if self.broken {
                Err(())
            } else {
                Ok(WaveId(1))
            }
        }

        fn send_once(&mut self, _wave: WaveId) -> core::result::Result<(), ()> {
            self.sent += self.pending / 2;
            Ok(())
        }

        fn is_busy(&mut self) -> core::result::Result<bool, ()> {
            Ok(false)
        }

        fn delete(&mut self, _wave: WaveId) -> core::result::Result<(), ()> {
            Ok(())
        }
    }

    type TestController = MotorController<PinMock, PinMock, CountingChannel, NoopDelay>;

    fn controller(en: &PinMock, dir: &PinMock, channel: CountingChannel) -> TestController {
        MotorController::new(
            en.clone(),
            dir.clone(),
            PulseActuator::new(channel, NoopDelay::new(), PulseConfig::default()),
            false,
            false,
            Position::new(3200.0),
        )
    }

    #[test]
    fn test_enable_is_idempotent() {
        let en_expect = [
            Transaction::get_state(State::Low),
            Transaction::set(State::High),
            Transaction::get_state(State::High),
        ];
        let mut en = PinMock::new(&en_expect);
        let mut dir = PinMock::new(&[] as &[Transaction]);
        let mut motor = controller(&en, &dir, CountingChannel::default());

        motor.enable().unwrap();
        motor.enable().unwrap();

        en.done();
        dir.done();
    }

    #[test]
    fn test_disable_when_off_writes_nothing() {
        let en_expect = [Transaction::get_state(State::Low)];
        let mut en = PinMock::new(&en_expect);
        let mut dir = PinMock::new(&[] as &[Transaction]);
        let mut motor = controller(&en, &dir, CountingChannel::default());

        motor.disable().unwrap();

        en.done();
        dir.done();
    }

    #[test]
    fn test_active_low_enable() {
        let en_expect = [
            Transaction::get_state(State::High),
            Transaction::set(State::Low),
            Transaction::get_state(State::Low),
        ];
        let mut en = PinMock::new(&en_expect);
        let mut dir = PinMock::new(&[] as &[Transaction]);
        let mut motor = MotorController::new(
            en.clone(),
            dir.clone(),
            PulseActuator::new(
                CountingChannel::default(),
                NoopDelay::new(),
                PulseConfig::default(),
            ),
            true,
            false,
            Position::new(3200.0),
        );

        motor.enable().unwrap();
        assert!(motor.is_enabled().unwrap());

        en.done();
        dir.done();
    }

    #[test]
    fn test_moves_write_direction_every_time() {
        let dir_expect = [
            Transaction::set(State::Low),
            Transaction::set(State::Low),
            Transaction::set(State::High),
        ];
        let mut en = PinMock::new(&[] as &[Transaction]);
        let mut dir = PinMock::new(&dir_expect);
        let mut motor = controller(&en, &dir, CountingChannel::default());

        motor.move_counter_clockwise(Steps(100)).unwrap();
        motor.move_counter_clockwise(Steps(50)).unwrap();
        motor.move_clockwise(Steps(30)).unwrap();

        assert_eq!(motor.actuator().channel().sent, 180);
        assert_eq!(motor.position().steps(), 120);
        assert_eq!(motor.last_direction(), Some(Direction::Clockwise));

        en.done();
        dir.done();
    }

    #[test]
    fn test_failed_move_reports_fault() {
        let dir_expect = [Transaction::set(State::Low)];
        let mut en = PinMock::new(&[] as &[Transaction]);
        let mut dir = PinMock::new(&dir_expect);
        let channel = CountingChannel {
            broken: true,
            ..Default::default()
        };
        let mut motor = controller(&en, &dir, channel);

        let result = motor.move_counter_clockwise(Steps(10));

        assert_eq!(
            result,
            Err(Error::Motor(MotorError::ActuationFault(WaveformOp::Create)))
        );
        assert_eq!(motor.position().steps(), 0);

        en.done();
        dir.done();
    }

    #[test]
    fn test_shutdown_disables_and_clears() {
        let en_expect = [
            Transaction::get_state(State::High),
            Transaction::set(State::Low),
        ];
        let mut en = PinMock::new(&en_expect);
        let mut dir = PinMock::new(&[] as &[Transaction]);
        let mut motor = controller(&en, &dir, CountingChannel::default());

        motor.shutdown().unwrap();

        assert_eq!(motor.actuator().channel().cleared, 1);

        en.done();
        dir.done();
    }
}
