use serde::{Deserialize, Serialize};

/// The JSON representation of a layout problem instance
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtInstance {
    /// The name of the instance
    pub name: String,
    pub floor: ExtFloor,
    /// Required clearance between machines (m)
    pub min_clearance: f64,
    /// Processing time per machine (min)
    pub process_time_per_machine: f64,
    /// Transport time per meter (min/m)
    pub time_per_meter: f64,
    /// Penalty per machine outside the floor, defaults to 1e4
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub boundary_penalty: Option<f64>,
    /// Machines in the order material flows through them
    pub machines: Vec<ExtMachine>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct ExtFloor {
    pub length: f64,
    pub width: f64,
}

/// The JSON representation of a machine, `(x, y)` is its lower-left corner
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtMachine {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The JSON representation of an optimized layout
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSolution {
    /// Machines at their optimized positions, in flow order
    pub layout: Vec<ExtMachine>,
    /// Total flow distance (m)
    pub flow_distance: f64,
    /// Total process time (min)
    pub total_time: f64,
    /// Penalized cost the optimizer minimized
    pub cost: f64,
    /// Whether the layout respects all clearances and the floor
    pub feasible: bool,
}
