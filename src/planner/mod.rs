//! Planner module for boxjoint-motion.
//!
//! Turns joint geometry into the ordered list of carriage moves.

mod builder;
mod cut_plan;
mod geometry;

pub use builder::plan;
pub use cut_plan::{CutPlan, MAX_PLAN_MOVES};
pub use geometry::GeometryParameters;
