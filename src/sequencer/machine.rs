//! The cut sequencer state machine.

use core::fmt;

use crate::config::units::{Inches, Steps};
use crate::config::{JigConfig, StepScale};
use crate::error::{GeometryError, Result, SequenceError};
use crate::input::Trigger;
use crate::motor::{Direction, MotorDrive};
use crate::planner::{self, CutPlan, GeometryParameters};

use super::state::{SequenceState, Status};
use super::store::ProgressStore;

/// Result of a sequencer operation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// One planned move was cut.
    Advanced {
        /// Moves executed after this one.
        index: usize,
        /// Steps moved counter-clockwise.
        steps: Steps,
    },
    /// The plan is empty or already exhausted; nothing moved.
    NoStepsRemaining,
    /// The carriage returned to the origin and the plan was cleared.
    Rewound {
        /// Steps moved clockwise.
        steps: Steps,
    },
    /// A manual positioning move.
    Nudged {
        /// Direction moved.
        direction: Direction,
        /// Steps moved.
        steps: Steps,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Advanced { index, steps } => {
                write!(f, "moved {} steps, {} cuts done", steps.0, index)
            }
            Outcome::NoStepsRemaining => write!(f, "no steps remaining"),
            Outcome::Rewound { steps } => write!(f, "rewound {} steps", steps.0),
            Outcome::Nudged { direction, steps } => {
                write!(f, "nudged {} steps {}", steps.0, direction.as_str())
            }
        }
    }
}

/// Tracks progress through a cut plan and drives the motor one move at a time.
///
/// The sequencer holds no progress of its own: every operation reads the plan
/// and index from the store, and writes the index back only after the motor
/// finished moving. Dropping and recreating a sequencer over the same store
/// resumes where it left off.
///
/// The motor is borrowed per call, so exclusive access to the motion channel
/// is enforced by the borrow checker.
#[derive(Debug)]
pub struct CutSequencer<S> {
    store: S,
    scale: StepScale,
    nudge_travel: Inches,
}

impl<S: ProgressStore> CutSequencer<S> {
    /// Create a sequencer over `store` with the configured scale and nudge.
    pub fn new(store: S, config: &JigConfig) -> Self {
        Self::with_scale(store, config.scale(), config.nudge.travel)
    }

    /// Create a sequencer with an explicit scale and nudge travel.
    pub fn with_scale(store: S, scale: StepScale, nudge_travel: Inches) -> Self {
        Self {
            store,
            scale,
            nudge_travel,
        }
    }

    /// Plan a new job, replacing any previous plan and resetting progress.
    ///
    /// Works whether or not the driver is enabled.
    ///
    /// # Errors
    ///
    /// Returns a geometry error if the parameters cannot be planned and a
    /// store error if the plan cannot be saved.
    pub fn plan(&mut self, geometry: &GeometryParameters) -> Result<CutPlan> {
        let plan = planner::plan(geometry, &self.scale)?;

        // Index first, so a failed write never leaves it past the plan end
        self.store.set_index(0)?;
        self.store.set_plan(&plan)?;

        info!("new job of {} moves", plan.len());
        Ok(plan)
    }

    /// Cut the next move of the plan.
    ///
    /// The index is persisted only after the move completed, so a failed
    /// move is retried by the next advance.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::ControllerOff` if the driver is disabled, or
    /// the motor or store error that interrupted the move.
    pub fn advance<M: MotorDrive>(&mut self, motor: &mut M) -> Result<Outcome> {
        if !motor.is_enabled()? {
            return Err(SequenceError::ControllerOff.into());
        }

        let plan = self.store.plan()?;
        let index = self.store.index()?;

        let Some(steps) = plan.get(index) else {
            info!("no steps remaining ({} of {})", index, plan.len());
            return Ok(Outcome::NoStepsRemaining);
        };

        motor.move_steps(Direction::CounterClockwise, steps)?;
        self.store.set_index(index + 1)?;

        debug!("cut {} of {}", index + 1, plan.len());
        Ok(Outcome::Advanced {
            index: index + 1,
            steps,
        })
    }

    /// Return to the origin, clear the plan and disable the driver.
    ///
    /// The distance travelled is summed before the enable check. A second
    /// rewind finds an empty plan and moves nothing, but still requires the
    /// driver to be enabled again.
    ///
    /// If the move fails after some steps went out, the distance still to
    /// travel is stored as a one-move plan at index 1, so the next rewind
    /// finishes the return instead of repeating it.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::ControllerOff` if the driver is disabled, or
    /// the motor or store error that interrupted the rewind. The driver is
    /// disabled even when clearing the store fails.
    pub fn rewind<M: MotorDrive>(&mut self, motor: &mut M) -> Result<Outcome> {
        let plan = self.store.plan()?;
        let index = self.store.index()?;
        let steps = plan.executed_steps(index);

        if !motor.is_enabled()? {
            return Err(SequenceError::ControllerOff.into());
        }

        if let Err(e) = motor.move_steps(Direction::Clockwise, steps) {
            self.record_partial_rewind(steps, motor.completed_steps());
            return Err(e);
        }

        let cleared = self.clear_progress();
        let disabled = motor.disable();
        cleared.and(disabled)?;

        info!("rewound {} steps to origin", steps.0);
        Ok(Outcome::Rewound { steps })
    }

    /// Move the carriage by hand before the first cut.
    ///
    /// The plan and index are not touched.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::ControllerOff` if the driver is disabled,
    /// `SequenceError::CutInProgress` once a cut has been made, and
    /// `GeometryError::OutOfRange` if `travel` is negative or not a number.
    pub fn nudge<M: MotorDrive>(
        &mut self,
        motor: &mut M,
        direction: Direction,
        travel: Inches,
    ) -> Result<Outcome> {
        if !motor.is_enabled()? {
            return Err(SequenceError::ControllerOff.into());
        }

        let index = self.store.index()?;
        if index > 0 {
            return Err(SequenceError::CutInProgress { index }.into());
        }

        let steps = self.scale.to_steps(travel).ok_or(GeometryError::OutOfRange {
            parameter: "travel",
            value: travel.0,
        })?;

        motor.move_steps(direction, steps)?;

        debug!("nudged {} steps {}", steps.0, direction.as_str());
        Ok(Outcome::Nudged { direction, steps })
    }

    /// Report the enable line and plan progress.
    pub fn status<M: MotorDrive>(&mut self, motor: &mut M) -> Result<Status> {
        let enabled = motor.is_enabled()?;
        let len = self.store.plan()?.len();
        let index = self.store.index()?;

        Ok(Status {
            enabled,
            state: SequenceState::from_progress(index, len),
            index,
            len,
        })
    }

    /// Run the operation bound to `trigger`.
    ///
    /// Buttons and remote requests share this table.
    pub fn dispatch<M: MotorDrive>(&mut self, trigger: Trigger, motor: &mut M) -> Result<Outcome> {
        debug!("dispatching {}", trigger.as_str());
        match trigger {
            Trigger::Go => self.advance(motor),
            Trigger::NudgeLeft => self.nudge(motor, Direction::Clockwise, self.nudge_travel),
            Trigger::NudgeRight => {
                self.nudge(motor, Direction::CounterClockwise, self.nudge_travel)
            }
            Trigger::Reset => self.rewind(motor),
        }
    }

    /// Travel of a button nudge.
    #[inline]
    pub fn nudge_travel(&self) -> Inches {
        self.nudge_travel
    }

    /// Step scale used for planning and nudges.
    #[inline]
    pub fn scale(&self) -> StepScale {
        self.scale
    }

    /// Get the progress store.
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the progress store mutably.
    #[inline]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the sequencer, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn clear_progress(&mut self) -> Result<()> {
        // Index first, so a failed write never leaves it past the plan end
        self.store.set_index(0)?;
        self.store.set_plan(&CutPlan::new())?;
        Ok(())
    }

    fn record_partial_rewind(&mut self, steps: Steps, sent: Steps) {
        if sent.is_zero() {
            return;
        }

        let left = Steps(steps.0.saturating_sub(sent.0));
        let saved = if left.is_zero() {
            self.clear_progress()
        } else {
            // sent > 0 means index >= 1 on a non-empty plan, so index 1 is in range
            CutPlan::from_moves(&[left]).and_then(|rest| {
                self.store.set_index(1)?;
                self.store.set_plan(&rest)?;
                Ok(())
            })
        };

        match saved {
            Ok(()) => warn!("rewind stopped after {} of {} steps", sent.0, steps.0),
            Err(_) => error!("rewind stopped after {} steps, progress not saved", sent.0),
        }
    }
}
