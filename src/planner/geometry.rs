//! Joint geometry input.

use serde::{Deserialize, Serialize};

use crate::config::units::Inches;

/// Physical parameters of a box joint, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryParameters {
    /// Saw kerf removed by a single pass.
    #[serde(default = "default_blade_thickness")]
    pub blade_thickness: Inches,

    /// Width of each finger and of each slot.
    #[serde(default = "default_finger_width")]
    pub finger_width: Inches,

    /// Extra slot width so mating fingers slide in.
    #[serde(default = "default_tolerance")]
    pub tolerance: Inches,

    /// Start with a finger-wide registration move (the mating board).
    #[serde(default = "default_offset")]
    pub offset: bool,

    /// Width of the board across the joint.
    #[serde(default = "default_work_piece_width")]
    pub work_piece_width: Inches,
}

fn default_blade_thickness() -> Inches {
    Inches(0.101)
}

fn default_finger_width() -> Inches {
    Inches(0.25)
}

fn default_tolerance() -> Inches {
    Inches(0.005)
}

fn default_offset() -> bool {
    true
}

fn default_work_piece_width() -> Inches {
    Inches(1.5)
}

impl Default for GeometryParameters {
    fn default() -> Self {
        Self {
            blade_thickness: default_blade_thickness(),
            finger_width: default_finger_width(),
            tolerance: default_tolerance(),
            offset: default_offset(),
            work_piece_width: default_work_piece_width(),
        }
    }
}

impl GeometryParameters {
    /// Create geometry from raw inch values.
    pub const fn new(
        blade_thickness: f32,
        finger_width: f32,
        tolerance: f32,
        offset: bool,
        work_piece_width: f32,
    ) -> Self {
        Self {
            blade_thickness: Inches(blade_thickness),
            finger_width: Inches(finger_width),
            tolerance: Inches(tolerance),
            offset,
            work_piece_width: Inches(work_piece_width),
        }
    }

    /// Length parameters paired with their names, in declaration order.
    pub(crate) fn lengths(&self) -> [(&'static str, Inches); 4] {
        [
            ("blade_thickness", self.blade_thickness),
            ("finger_width", self.finger_width),
            ("tolerance", self.tolerance),
            ("work_piece_width", self.work_piece_width),
        ]
    }
}
