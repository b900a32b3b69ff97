//! Front panel input.
//!
//! Buttons and remote requests both end up as a [`Trigger`], dispatched by
//! the cut sequencer through one table.

mod debounce;
mod panel;

pub use debounce::Debouncer;
pub use panel::ButtonPanel;

/// A request for one sequencer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    /// Cut the next move of the plan.
    Go,
    /// Nudge clockwise, toward the origin.
    NudgeLeft,
    /// Nudge counter-clockwise, away from the origin.
    NudgeRight,
    /// Rewind to the origin and clear the plan.
    Reset,
}

impl Trigger {
    /// Every trigger, in panel order.
    pub const ALL: [Trigger; 4] = [
        Trigger::Go,
        Trigger::NudgeLeft,
        Trigger::NudgeRight,
        Trigger::Reset,
    ];

    /// Short name used in logs and remote requests.
    pub fn as_str(self) -> &'static str {
        match self {
            Trigger::Go => "go",
            Trigger::NudgeLeft => "nudge-left",
            Trigger::NudgeRight => "nudge-right",
            Trigger::Reset => "reset",
        }
    }

    /// Parse a name produced by [`as_str`](Trigger::as_str).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for trigger in Trigger::ALL {
            assert_eq!(Trigger::from_name(trigger.as_str()), Some(trigger));
        }
        assert_eq!(Trigger::from_name("spin"), None);
    }
}
