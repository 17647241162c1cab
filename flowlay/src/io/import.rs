use anyhow::{Result, bail, ensure};
use itertools::Itertools;
use log::info;

use crate::entities::{DEFAULT_BOUNDARY_PENALTY, Floor, Layout, LayoutConfig, Machine};
use crate::io::ext_repr::{ExtInstance, ExtMachine};

/// Converts an external instance into a layout and the configuration to evaluate it with.
/// Rejects non-positive dimensions, a negative clearance and duplicate machine names.
pub fn import(ext_instance: &ExtInstance) -> Result<(Layout, LayoutConfig)> {
    let floor = Floor::new(ext_instance.floor.length, ext_instance.floor.width);
    ensure!(
        floor.length > 0.0 && floor.width > 0.0,
        "floor dimensions should be positive, got {} x {}",
        floor.length,
        floor.width
    );
    ensure!(
        ext_instance.min_clearance >= 0.0,
        "minimum clearance should not be negative, got {}",
        ext_instance.min_clearance
    );

    let config = LayoutConfig {
        floor,
        min_clearance: ext_instance.min_clearance,
        process_time_per_machine: ext_instance.process_time_per_machine,
        time_per_meter: ext_instance.time_per_meter,
        boundary_penalty: ext_instance
            .boundary_penalty
            .unwrap_or(DEFAULT_BOUNDARY_PENALTY),
    };

    let machines = ext_instance
        .machines
        .iter()
        .map(import_machine)
        .collect::<Result<Vec<Machine>>>()?;

    if let Some(name) = machines.iter().map(|m| &m.name).duplicates().next() {
        bail!("duplicate machine name: {name}");
    }

    info!(
        "[IMPORT] instance '{}': {} machines on a {} x {} floor",
        ext_instance.name,
        machines.len(),
        floor.length,
        floor.width
    );

    Ok((Layout::new(machines), config))
}

pub fn import_machine(ext_machine: &ExtMachine) -> Result<Machine> {
    ensure!(
        ext_machine.width > 0.0 && ext_machine.height > 0.0,
        "machine '{}' should have a positive size, got {} x {}",
        ext_machine.name,
        ext_machine.width,
        ext_machine.height
    );
    Ok(Machine::new(
        ext_machine.name.clone(),
        ext_machine.x,
        ext_machine.y,
        ext_machine.width,
        ext_machine.height,
    ))
}
