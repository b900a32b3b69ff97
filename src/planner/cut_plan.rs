//! The ordered list of carriage moves for one job.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::config::units::Steps;
use crate::error::{GeometryError, Result};

/// Maximum number of moves in a cut plan.
pub const MAX_PLAN_MOVES: usize = 512;

/// Ordered carriage moves, in execution order.
///
/// A plan is built once by the planner and then only read. Starting a new
/// job replaces it; rewinding clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CutPlan {
    moves: Vec<Steps, MAX_PLAN_MOVES>,
}

impl CutPlan {
    /// An empty plan.
    pub const fn new() -> Self {
        Self { moves: Vec::new() }
    }

    /// Build a plan from a list of step counts.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::PlanTooLong` if the list exceeds [`MAX_PLAN_MOVES`]
    /// or its total does not fit in a `u32`.
    pub fn from_moves(moves: &[Steps]) -> Result<Self> {
        let mut plan = Self::new();
        for &steps in moves {
            plan.push(steps)?;
        }
        Ok(plan)
    }

    pub(crate) fn push(&mut self, steps: Steps) -> Result<()> {
        let too_long = GeometryError::PlanTooLong {
            max_moves: MAX_PLAN_MOVES,
        };
        if self.total_steps().checked_add(steps.0).is_none() {
            return Err(too_long.into());
        }
        self.moves.push(steps).map_err(|_| too_long)?;
        Ok(())
    }

    /// Number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// True when there is nothing to cut.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Move at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Steps> {
        self.moves.get(index).copied()
    }

    /// All moves as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Steps] {
        &self.moves
    }

    /// Iterate over the moves in order.
    pub fn iter(&self) -> impl Iterator<Item = Steps> + '_ {
        self.moves.iter().copied()
    }

    /// Sum of every move in the plan.
    pub fn total_steps(&self) -> u32 {
        sum(&self.moves)
    }

    /// Sum of the first `index` moves; an index past the end counts every move.
    pub fn executed_steps(&self, index: usize) -> Steps {
        let done = index.min(self.moves.len());
        Steps(sum(&self.moves[..done]))
    }
}

// Plans built by `push` never overflow; stored plans might.
fn sum(moves: &[Steps]) -> u32 {
    moves.iter().fold(0u32, |acc, s| acc.saturating_add(s.0))
}

impl<'a> IntoIterator for &'a CutPlan {
    type Item = Steps;
    type IntoIter = core::iter::Copied<core::slice::Iter<'a, Steps>>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn plan_of<const N: usize>(moves: [u32; N]) -> CutPlan {
        CutPlan::from_moves(&moves.map(Steps)).unwrap()
    }

    #[test]
    fn test_executed_steps() {
        let plan = plan_of([10, 20, 30]);

        assert_eq!(plan.executed_steps(0), Steps(0));
        assert_eq!(plan.executed_steps(1), Steps(10));
        assert_eq!(plan.executed_steps(3), Steps(60));
    }

    #[test]
    fn test_executed_steps_saturates_past_end() {
        let plan = plan_of([10, 20]);

        assert_eq!(plan.executed_steps(7), Steps(30));
        assert_eq!(CutPlan::new().executed_steps(3), Steps(0));
    }

    #[test]
    fn test_capacity_is_enforced() {
        let moves = [Steps(1); MAX_PLAN_MOVES + 1];

        assert_eq!(
            CutPlan::from_moves(&moves),
            Err(Error::Geometry(GeometryError::PlanTooLong {
                max_moves: MAX_PLAN_MOVES
            }))
        );
    }

    #[test]
    fn test_total_overflow_is_rejected() {
        let result = CutPlan::from_moves(&[Steps(u32::MAX), Steps(1)]);

        assert!(matches!(
            result,
            Err(Error::Geometry(GeometryError::PlanTooLong { .. }))
        ));
    }
}
