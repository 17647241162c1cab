use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::entities::{Floor, Layout, LayoutConfig, Machine};

/// Clearance violation between two machines.
///
/// Both machines are inflated to their half-extents plus `min_clearance` and compared
/// along each axis separately (a bounding-box proximity test on the corners, not a true
/// rectangle intersection). The pair violates the clearance only if it is too close on
/// *both* axes, the penalty then grows with the depth of the intrusion.
/// Exactly reaching the required clearance on either axis is not a violation.
pub fn overlap_penalty(a: &Machine, b: &Machine, min_clearance: f64) -> f64 {
    let dist_x = (a.x - b.x).abs();
    let dist_y = (a.y - b.y).abs();
    let overlap_x = (a.width + b.width) / 2.0 + min_clearance;
    let overlap_y = (a.height + b.height) / 2.0 + min_clearance;

    if dist_x < overlap_x && dist_y < overlap_y {
        (overlap_x - dist_x) * (overlap_y - dist_y)
    } else {
        0.0
    }
}

/// Returns true if the machine is not fully contained in the floor
pub fn out_of_bounds(machine: &Machine, floor: &Floor) -> bool {
    machine.x < 0.0
        || machine.y < 0.0
        || machine.x + machine.width > floor.length
        || machine.y + machine.height > floor.width
}

/// Breakdown of the penalized cost of a layout
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LayoutCost {
    pub flow_distance: f64,
    pub overlap_penalty: f64,
    pub boundary_penalty: f64,
    /// Number of machine pairs violating the clearance
    pub n_overlaps: usize,
    /// Number of machines not fully on the floor
    pub n_out_of_bounds: usize,
}

impl LayoutCost {
    pub fn evaluate(layout: &Layout, config: &LayoutConfig) -> Self {
        let mut cost = LayoutCost {
            flow_distance: layout.flow_distance(),
            ..LayoutCost::default()
        };

        for (a, b) in layout.machines().iter().tuple_combinations() {
            let penalty = overlap_penalty(a, b, config.min_clearance);
            if penalty > 0.0 {
                cost.overlap_penalty += penalty;
                cost.n_overlaps += 1;
            }
        }

        cost.n_out_of_bounds = layout
            .machines()
            .iter()
            .filter(|m| out_of_bounds(m, &config.floor))
            .count();
        cost.boundary_penalty = cost.n_out_of_bounds as f64 * config.boundary_penalty;

        cost
    }

    pub fn total(&self) -> f64 {
        self.flow_distance + self.overlap_penalty + self.boundary_penalty
    }

    /// No clearance and no boundary violations
    pub fn is_feasible(&self) -> bool {
        self.n_overlaps == 0 && self.n_out_of_bounds == 0
    }
}

impl Display for LayoutCost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.3} (flow: {:.3}, overlap: {:.3} [{}], boundary: {:.1} [{}])",
            self.total(),
            self.flow_distance,
            self.overlap_penalty,
            self.n_overlaps,
            self.boundary_penalty,
            self.n_out_of_bounds
        )
    }
}

/// Penalized cost of a layout: flow distance + overlap penalty + boundary penalty
pub fn cost(layout: &Layout, config: &LayoutConfig) -> f64 {
    LayoutCost::evaluate(layout, config).total()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn config() -> LayoutConfig {
        LayoutConfig::default()
    }

    #[test]
    fn exact_clearance_is_not_penalized() {
        // overlap_x = (10 + 10) / 2 + 2 = 12
        let a = Machine::new("A", 5.0, 5.0, 10.0, 3.0);
        let b = Machine::new("B", 17.0, 5.0, 10.0, 3.0);
        assert_eq!(overlap_penalty(&a, &b, 2.0), 0.0);

        let closer = Machine::new("B", 16.99, 5.0, 10.0, 3.0);
        assert!(overlap_penalty(&a, &closer, 2.0) > 0.0);
    }

    #[test]
    fn exact_vertical_clearance_is_not_penalized() {
        // overlap_y = (3 + 3) / 2 + 2 = 5
        let a = Machine::new("A", 5.0, 5.0, 10.0, 3.0);
        let b = Machine::new("B", 5.0, 10.0, 10.0, 3.0);
        assert_eq!(overlap_penalty(&a, &b, 2.0), 0.0);
        let closer = Machine::new("B", 5.0, 9.99, 10.0, 3.0);
        assert!(overlap_penalty(&a, &closer, 2.0) > 0.0);
    }

    #[test]
    fn penalty_is_bounded_by_footprints() {
        let a = Machine::new("A", 5.0, 5.0, 10.0, 3.0);
        let b = Machine::new("B", 5.0, 5.0, 10.0, 3.0);
        // fully stacked: (12 - 0) * (5 - 0)
        assert_eq!(overlap_penalty(&a, &b, 2.0), 60.0);
        assert_eq!(overlap_penalty(&b, &a, 2.0), 60.0);
    }

    #[test]
    fn diagonal_offset_uses_axis_test() {
        // rectangles do not intersect, but are within clearance on both axes
        let a = Machine::new("A", 0.0, 0.0, 10.0, 3.0);
        let b = Machine::new("B", 11.0, 4.0, 10.0, 3.0);
        assert_eq!(overlap_penalty(&a, &b, 2.0), (12.0 - 11.0) * (5.0 - 4.0));
    }

    #[test_case(40.0, 5.0, false; "touching right edge")]
    #[test_case(40.5, 5.0, true; "beyond right edge")]
    #[test_case(-0.5, 5.0, true; "beyond left edge")]
    #[test_case(5.0, 27.0, false; "touching top edge")]
    #[test_case(5.0, 27.5, true; "beyond top edge")]
    #[test_case(5.0, -1.0, true; "beyond bottom edge")]
    fn boundary_test(x: f64, y: f64, expected: bool) {
        let m = Machine::new("M", x, y, 10.0, 3.0);
        assert_eq!(out_of_bounds(&m, &config().floor), expected);
    }

    #[test]
    fn single_boundary_unit_per_machine() {
        let eps = 0.25;
        let layout = Layout::new(vec![Machine::new("M", 50.0 - 10.0 + eps, 5.0, 10.0, 3.0)]);
        let c = LayoutCost::evaluate(&layout, &config());
        assert_eq!(c.n_out_of_bounds, 1);
        assert_eq!(c.boundary_penalty, config().boundary_penalty);

        let back = Layout::new(vec![Machine::new("M", 50.0 - 10.0, 5.0, 10.0, 3.0)]);
        let c = LayoutCost::evaluate(&back, &config());
        assert_eq!(c.boundary_penalty, 0.0);
        assert!(c.is_feasible());
    }

    #[test]
    fn reference_layout_is_feasible() {
        let layout = Layout::new(vec![
            Machine::new("M1", 5.0, 5.0, 10.0, 3.0),
            Machine::new("M2", 20.0, 5.0, 10.0, 3.0),
        ]);
        let c = LayoutCost::evaluate(&layout, &config());
        assert!(c.is_feasible(), "{c}");
        assert_eq!(c.total(), layout.flow_distance());
        assert_eq!(cost(&layout, &config()), c.total());
    }

    #[test]
    fn closer_neighbour_is_within_clearance() {
        // corners 11 m apart, 10 + 2 m required on the x-axis
        let layout = Layout::new(vec![
            Machine::new("M1", 5.0, 5.0, 10.0, 3.0),
            Machine::new("M2", 16.0, 5.0, 10.0, 3.0),
        ]);
        let c = LayoutCost::evaluate(&layout, &config());
        assert!(!c.is_feasible());
        assert_eq!(c.n_overlaps, 1);
        assert_eq!(c.overlap_penalty, (12.0 - 11.0) * (5.0 - 0.0));
        assert_eq!(c.flow_distance, 11.0);
        assert_eq!(cost(&layout, &config()), 16.0);
    }

    #[test]
    fn penalties_accumulate() {
        let layout = Layout::new(vec![
            Machine::new("M1", 5.0, 5.0, 10.0, 3.0),
            Machine::new("M2", 5.0, 5.0, 10.0, 3.0),
            Machine::new("M3", 45.0, 5.0, 10.0, 3.0),
            Machine::new("M4", 5.0, 29.0, 10.0, 3.0),
        ]);
        let c = LayoutCost::evaluate(&layout, &config());
        assert_eq!(c.n_out_of_bounds, 2);
        assert_eq!(c.boundary_penalty, 2.0 * config().boundary_penalty);
        assert_eq!(c.n_overlaps, 1);
        assert_eq!(c.overlap_penalty, 60.0);
        assert!(!c.is_feasible());
        assert_eq!(
            c.total(),
            layout.flow_distance() + 60.0 + 2.0 * config().boundary_penalty
        );
    }

    #[test]
    fn empty_layout_costs_nothing() {
        let c = LayoutCost::evaluate(&Layout::new(vec![]), &config());
        assert_eq!(c.total(), 0.0);
        assert!(c.is_feasible());
    }

    #[test]
    fn nan_propagates() {
        let layout = Layout::new(vec![
            Machine::new("M1", f64::NAN, 5.0, 10.0, 3.0),
            Machine::new("M2", 20.0, 5.0, 10.0, 3.0),
        ]);
        assert!(cost(&layout, &config()).is_nan());
    }
}
