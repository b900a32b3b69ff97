//! Level debouncing.

/// Emits a press once a level has been stable for the debounce window.
///
/// Fed with the raw "pressed" level and a monotonic timestamp on every poll.
/// A press shorter than the window, or bounce inside it, emits nothing.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    window_us: u32,
    stable: bool,
    candidate: bool,
    since_us: u64,
}

impl Debouncer {
    /// Create a debouncer, released, with a window in microseconds.
    pub const fn new(window_us: u32) -> Self {
        Self {
            window_us,
            stable: false,
            candidate: false,
            since_us: 0,
        }
    }

    /// Feed one sample. Returns true exactly once per debounced press.
    pub fn update(&mut self, pressed: bool, now_us: u64) -> bool {
        if pressed != self.candidate {
            self.candidate = pressed;
            self.since_us = now_us;
        }

        if self.candidate != self.stable
            && now_us.saturating_sub(self.since_us) >= u64::from(self.window_us)
        {
            self.stable = self.candidate;
            return self.stable;
        }

        false
    }

    /// Debounced level.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_after_window() {
        let mut d = Debouncer::new(10_000);

        assert!(!d.update(true, 0));
        assert!(!d.update(true, 9_999));
        assert!(d.update(true, 10_000));
        // held: no repeat
        assert!(!d.update(true, 50_000));
        assert!(d.is_pressed());
    }

    #[test]
    fn test_short_press_is_ignored() {
        let mut d = Debouncer::new(10_000);

        assert!(!d.update(true, 0));
        assert!(!d.update(false, 5_000));
        assert!(!d.update(false, 30_000));
        assert!(!d.is_pressed());
    }

    #[test]
    fn test_bounce_restarts_window() {
        let mut d = Debouncer::new(10_000);

        d.update(true, 0);
        d.update(false, 8_000);
        assert!(!d.update(true, 9_000));
        assert!(!d.update(true, 18_000));
        assert!(d.update(true, 19_000));
    }

    #[test]
    fn test_release_then_second_press() {
        let mut d = Debouncer::new(1_000);

        d.update(true, 0);
        assert!(d.update(true, 1_000));
        assert!(!d.update(false, 2_000));
        assert!(!d.update(false, 3_000));
        assert!(!d.is_pressed());
        d.update(true, 4_000);
        assert!(d.update(true, 5_000));
    }
}
