use serde::{Deserialize, Serialize};

use crate::entities::Machine;

/// Cost added for every machine which is not fully contained in the floor.
/// Orders of magnitude above any realistic flow distance.
pub const DEFAULT_BOUNDARY_PENALTY: f64 = 1e4;

/// The rectangle `[0, length] x [0, width]` all machines should be placed in
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    /// Extent along the x-axis (m)
    pub length: f64,
    /// Extent along the y-axis (m)
    pub width: f64,
}

impl Floor {
    pub fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    /// Returns true if there is at least one position on the floor the machine fits in.
    /// A NaN dimension never fits.
    pub fn fits(&self, machine: &Machine) -> bool {
        machine.width <= self.length && machine.height <= self.width
    }
}

/// All constants governing the evaluation of a layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub floor: Floor,
    /// Required clearance added to the half-extents of every pair of machines (m)
    pub min_clearance: f64,
    /// Processing time spent in each machine (min)
    pub process_time_per_machine: f64,
    /// Transport time per meter of flow distance (min/m)
    pub time_per_meter: f64,
    /// Penalty per machine not fully contained in the floor
    #[serde(default = "default_boundary_penalty")]
    pub boundary_penalty: f64,
}

fn default_boundary_penalty() -> f64 {
    DEFAULT_BOUNDARY_PENALTY
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            floor: Floor::new(50.0, 30.0),
            min_clearance: 2.0,
            process_time_per_machine: 5.0,
            time_per_meter: 1.0,
            boundary_penalty: DEFAULT_BOUNDARY_PENALTY,
        }
    }
}
