use itertools::Itertools;

use crate::entities::{LayoutConfig, Machine};
use crate::geometry::Point;

/// An ordered set of machines.
/// The order of `machines` is the material-flow sequence: machine `i` feeds machine `i + 1`.
/// A layout is a snapshot, it is never modified once constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    machines: Vec<Machine>,
}

/// Transport of material between two consecutive machines in the flow
#[derive(Clone, Debug, PartialEq)]
pub struct FlowLeg {
    /// Index of the upstream machine
    pub from: usize,
    /// Index of the downstream machine
    pub to: usize,
    pub start: Point,
    pub end: Point,
    pub distance: f64,
}

impl Layout {
    pub fn new(machines: Vec<Machine>) -> Self {
        debug_assert!(
            machines.iter().map(|m| &m.name).all_unique(),
            "machine names should be unique"
        );
        Self { machines }
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn machine(&self, name: &str) -> Option<&Machine> {
        self.machines.iter().find(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// The legs between connection points of consecutive machines, in flow order.
    /// The last machine's connection point starts no leg.
    pub fn flow_legs(&self) -> Vec<FlowLeg> {
        self.machines
            .iter()
            .enumerate()
            .tuple_windows()
            .map(|((i, a), (j, b))| {
                let (start, end) = (a.connection_point(), b.connection_point());
                FlowLeg {
                    from: i,
                    to: j,
                    start,
                    end,
                    distance: start.distance(&end),
                }
            })
            .collect()
    }

    /// Total distance material travels along the flow sequence (m)
    pub fn flow_distance(&self) -> f64 {
        self.machines
            .iter()
            .map(Machine::connection_point)
            .tuple_windows()
            .map(|(a, b)| a.distance(&b))
            .sum()
    }

    /// Total process time (min): processing in every machine plus transport along the flow
    pub fn flow_time(&self, config: &LayoutConfig) -> f64 {
        config.process_time_per_machine * self.len() as f64
            + config.time_per_meter * self.flow_distance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn two_machines(m2_x: f64) -> Layout {
        Layout::new(vec![
            Machine::new("M1", 5.0, 5.0, 10.0, 3.0),
            Machine::new("M2", m2_x, 5.0, 10.0, 3.0),
        ])
    }

    #[test_case(20.0, 15.0, 25.0; "reference placement")]
    #[test_case(16.0, 11.0, 21.0; "second machine moved closer")]
    fn flow_distance_and_time(m2_x: f64, distance: f64, time: f64) {
        let layout = two_machines(m2_x);
        let config = LayoutConfig::default();
        assert_eq!(layout.flow_distance(), distance);
        assert_eq!(layout.flow_time(&config), time);
    }

    #[test_case(vec![]; "empty")]
    #[test_case(vec![Machine::new("M1", 5.0, 5.0, 10.0, 3.0)]; "singleton")]
    fn degenerate_flow(machines: Vec<Machine>) {
        let config = LayoutConfig::default();
        let layout = Layout::new(machines);
        assert_eq!(layout.flow_distance(), 0.0);
        assert!(layout.flow_legs().is_empty());
        assert_eq!(
            layout.flow_time(&config),
            config.process_time_per_machine * layout.len() as f64
        );
    }

    #[test]
    fn legs_follow_flow_order() {
        let layout = Layout::new(vec![
            Machine::new("M1", 5.0, 5.0, 10.0, 3.0),
            Machine::new("M2", 20.0, 5.0, 10.0, 3.0),
            Machine::new("M3", 35.0, 5.0, 10.0, 3.0),
            Machine::new("M4", 5.0, 15.0, 10.0, 3.0),
        ]);
        let legs = layout.flow_legs();
        assert_eq!(legs.len(), 3);
        assert_eq!((legs[2].from, legs[2].to), (2, 3));
        assert_eq!(legs[2].start, Point(45.0, 6.5));
        assert_eq!(legs[2].end, Point(15.0, 16.5));
        let sum: f64 = legs.iter().map(|l| l.distance).sum();
        assert_eq!(sum, layout.flow_distance());
        assert_eq!(layout.machine("M3").map(|m| m.x), Some(35.0));
        assert!(layout.machine("M5").is_none());
    }
}
