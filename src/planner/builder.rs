//! Finger cutting plan generation.

use crate::config::units::{Inches, Steps};
use crate::config::StepScale;
use crate::error::{GeometryError, Result};

use super::cut_plan::CutPlan;
use super::geometry::GeometryParameters;

/// Build the ordered move list that cuts a full set of fingers.
///
/// Every length is converted to whole motor steps up front, so the loop runs
/// on integers and the plan is exact in steps:
///
/// 1. one blade-width move to set up the first cut;
/// 2. one finger-width registration move when `offset` is set;
/// 3. until the covered width reaches the work piece width: blade-sized
///    passes that clear `finger_width + tolerance` (the pass at the current
///    position counts as the first), then a `finger_width + blade_thickness`
///    advance to the next slot.
///
/// Identical inputs always give identical plans.
///
/// # Errors
///
/// Returns a [`GeometryError`] if a length is not positive, the finger is not
/// wider than the tolerance, a length is below one motor step, or the plan
/// does not fit in a [`CutPlan`].
pub fn plan(geometry: &GeometryParameters, scale: &StepScale) -> Result<CutPlan> {
    for (parameter, value) in geometry.lengths() {
        if !value.is_positive() {
            return Err(GeometryError::NonPositive {
                parameter,
                value: value.0,
            }
            .into());
        }
    }

    if geometry.finger_width <= geometry.tolerance {
        return Err(GeometryError::FingerNotWiderThanTolerance {
            finger_width: geometry.finger_width.0,
            tolerance: geometry.tolerance.0,
        }
        .into());
    }

    let blade = resolve(scale, "blade_thickness", geometry.blade_thickness)?;
    let finger = resolve(scale, "finger_width", geometry.finger_width)?;
    let tolerance = to_steps(scale, "tolerance", geometry.tolerance)?;
    let width = resolve(scale, "work_piece_width", geometry.work_piece_width)?;

    let mut plan = CutPlan::new();

    // setup for the first cut
    plan.push(Steps(blade))?;

    if geometry.offset {
        plan.push(Steps(finger))?;
    }

    let slot = finger as u64 + tolerance as u64;
    let advance = step_count(finger as u64 + blade as u64)?;
    let mut covered: u64 = 0;

    while covered < width as u64 {
        // the blade already cleared its own width at this position
        let mut removed = blade as u64;
        while removed < slot {
            let pass = (blade as u64).min(slot - removed);
            plan.push(Steps(step_count(pass)?))?;
            removed += pass;
        }
        covered += removed;

        plan.push(Steps(advance))?;
        covered += finger as u64;
    }

    debug!(
        "planned {} moves, {} steps total",
        plan.len(),
        plan.total_steps()
    );

    Ok(plan)
}

fn to_steps(scale: &StepScale, parameter: &'static str, value: Inches) -> Result<u32> {
    scale
        .to_steps(value)
        .map(|s| s.0)
        .ok_or_else(|| {
            GeometryError::OutOfRange {
                parameter,
                value: value.0,
            }
            .into()
        })
}

/// Like `to_steps`, but zero steps would stall the cutting loop.
fn resolve(scale: &StepScale, parameter: &'static str, value: Inches) -> Result<u32> {
    match to_steps(scale, parameter, value)? {
        0 => Err(GeometryError::BelowResolution { parameter }.into()),
        steps => Ok(steps),
    }
}

fn step_count(steps: u64) -> Result<u32> {
    u32::try_from(steps).map_err(|_| {
        GeometryError::PlanTooLong {
            max_moves: super::cut_plan::MAX_PLAN_MOVES,
        }
        .into()
    })
}
