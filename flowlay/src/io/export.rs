use crate::cost::LayoutCost;
use crate::entities::{Layout, LayoutConfig, Machine};
use crate::io::ext_repr::{ExtMachine, ExtSolution};

pub fn export(layout: &Layout, config: &LayoutConfig) -> ExtSolution {
    let cost = LayoutCost::evaluate(layout, config);
    ExtSolution {
        layout: layout.machines().iter().map(export_machine).collect(),
        flow_distance: cost.flow_distance,
        total_time: layout.flow_time(config),
        cost: cost.total(),
        feasible: cost.is_feasible(),
    }
}

pub fn export_machine(machine: &Machine) -> ExtMachine {
    ExtMachine {
        name: machine.name.clone(),
        x: machine.x,
        y: machine.y,
        width: machine.width,
        height: machine.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_metrics() {
        let layout = Layout::new(vec![
            Machine::new("M1", 5.0, 5.0, 10.0, 3.0),
            Machine::new("M2", 20.0, 5.0, 10.0, 3.0),
        ]);
        let solution = export(&layout, &LayoutConfig::default());
        assert_eq!(solution.flow_distance, 15.0);
        assert_eq!(solution.total_time, 25.0);
        assert_eq!(solution.cost, 15.0);
        assert!(solution.feasible);
        assert_eq!(solution.layout[1].name, "M2");
    }
}
