//! Sequence state and status reporting.

use core::fmt;

/// Where the jig is in its cut plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceState {
    /// No move executed yet; nudging is allowed.
    Idle,
    /// Some moves executed, some remaining.
    InProgress,
    /// Every move executed.
    Exhausted,
}

impl SequenceState {
    /// Classify a progress index against a plan length.
    pub fn from_progress(index: usize, len: usize) -> Self {
        if index == 0 {
            SequenceState::Idle
        } else if index >= len {
            SequenceState::Exhausted
        } else {
            SequenceState::InProgress
        }
    }

    /// Lower-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            SequenceState::Idle => "idle",
            SequenceState::InProgress => "in progress",
            SequenceState::Exhausted => "exhausted",
        }
    }
}

/// Snapshot reported by `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// Driver enable line is active.
    pub enabled: bool,
    /// Position in the plan.
    pub state: SequenceState,
    /// Moves already executed.
    pub index: usize,
    /// Moves in the plan.
    pub len: usize,
}

impl Status {
    /// Moves left to cut.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.len.saturating_sub(self.index)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} ({}/{})",
            if self.enabled { "on" } else { "off" },
            self.state.as_str(),
            self.index,
            self.len
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_progress() {
        assert_eq!(SequenceState::from_progress(0, 0), SequenceState::Idle);
        assert_eq!(SequenceState::from_progress(0, 11), SequenceState::Idle);
        assert_eq!(SequenceState::from_progress(3, 11), SequenceState::InProgress);
        assert_eq!(SequenceState::from_progress(11, 11), SequenceState::Exhausted);
        assert_eq!(SequenceState::from_progress(12, 11), SequenceState::Exhausted);
    }

    #[test]
    fn test_remaining_saturates() {
        let status = Status {
            enabled: false,
            state: SequenceState::Exhausted,
            index: 5,
            len: 3,
        };

        assert_eq!(status.remaining(), 0);
    }
}
