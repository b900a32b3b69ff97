//! Four-button front panel.

use embedded_hal::digital::InputPin;

use crate::config::ButtonConfig;
use crate::error::{MotorError, Result};

use super::{Debouncer, Trigger};

/// Polled front panel: go, nudge left, nudge right and reset.
///
/// Buttons are wired to ground with pull-ups, so a pressed button reads low.
pub struct ButtonPanel<P>
where
    P: InputPin,
{
    buttons: [(Trigger, P, Debouncer); 4],
}

impl<P> ButtonPanel<P>
where
    P: InputPin,
{
    /// Create a panel with a debounce window in microseconds.
    pub fn new(go: P, left: P, right: P, reset: P, debounce_us: u32) -> Self {
        let debouncer = Debouncer::new(debounce_us);
        Self {
            buttons: [
                (Trigger::Go, go, debouncer),
                (Trigger::NudgeLeft, left, debouncer),
                (Trigger::NudgeRight, right, debouncer),
                (Trigger::Reset, reset, debouncer),
            ],
        }
    }

    /// Create a panel using the configured debounce window.
    pub fn from_config(go: P, left: P, right: P, reset: P, config: &ButtonConfig) -> Self {
        Self::new(go, left, right, reset, config.debounce_us)
    }

    /// Sample every button once.
    ///
    /// Returns the triggers whose press completed its debounce window at
    /// `now_us`, in panel order.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::PinError` if a button cannot be read.
    pub fn poll(&mut self, now_us: u64) -> Result<heapless::Vec<Trigger, 4>> {
        let mut pressed = heapless::Vec::new();

        for (trigger, pin, debouncer) in self.buttons.iter_mut() {
            let low = pin.is_low().map_err(|_| MotorError::PinError)?;
            if debouncer.update(low, now_us) {
                debug!("{} button pressed", trigger.as_str());
                // capacity equals the number of buttons
                let _ = pressed.push(*trigger);
            }
        }

        Ok(pressed)
    }

    /// Give back the button pins in panel order.
    pub fn release(self) -> [P; 4] {
        self.buttons.map(|(_, pin, _)| pin)
    }
}
