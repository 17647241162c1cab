use std::fmt::{Display, Formatter};

use anyhow::{Result, ensure};
use log::debug;

use crate::cost;
use crate::entities::{Floor, Layout, LayoutConfig, Machine};

/// Closed interval `[low, high]` restricting a single parameter
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bound {
    pub low: f64,
    pub high: f64,
}

impl Bound {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.low && v <= self.high
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// An inverted (or NaN) interval contains no values
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn is_empty(&self) -> bool {
        !(self.low <= self.high)
    }

    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.low, self.high)
    }
}

impl Display for Bound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.3}, {:.3}]", self.low, self.high)
    }
}

/// Per-parameter bounds for the machines of `layout`: `[0, length - width]` for each `x`,
/// `[0, floor width - height]` for each `y`.
/// Machines larger than the floor produce inverted bounds.
pub fn compute_bounds(layout: &Layout, floor: &Floor) -> Vec<Bound> {
    layout
        .machines()
        .iter()
        .flat_map(|m| {
            [
                Bound::new(0.0, floor.length - m.width),
                Bound::new(0.0, floor.width - m.height),
            ]
        })
        .collect()
}

/// Bridges a layout and the flat parameter vector an optimizer works on.
///
/// The vector holds two entries per machine, `x` followed by `y`, in flow order.
/// Names and sizes are fixed by the base layout, the optimizer only controls positions.
#[derive(Clone, Debug)]
pub struct ParamCodec {
    base: Layout,
    config: LayoutConfig,
    bounds: Vec<Bound>,
}

impl ParamCodec {
    /// Fails if a machine does not fit on the floor, since its bounds would be empty.
    pub fn new(base: Layout, config: LayoutConfig) -> Result<Self> {
        let bounds = compute_bounds(&base, &config.floor);
        for (machine, xy) in base.machines().iter().zip(bounds.chunks_exact(2)) {
            ensure!(
                config.floor.fits(machine) && !xy[0].is_empty() && !xy[1].is_empty(),
                "machine does not fit on floor: {} (floor: {} x {})",
                machine,
                config.floor.length,
                config.floor.width
            );
        }
        debug!(
            "[CODEC] {} parameters, bounds: [{}]",
            bounds.len(),
            bounds.iter().map(|b| b.to_string()).collect::<Vec<_>>().join(", ")
        );

        Ok(Self {
            base,
            config,
            bounds,
        })
    }

    pub fn base(&self) -> &Layout {
        &self.base
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn bounds(&self) -> &[Bound] {
        &self.bounds
    }

    pub fn n_params(&self) -> usize {
        self.bounds.len()
    }

    /// Flattens the positions of `layout` into a parameter vector
    pub fn encode(&self, layout: &Layout) -> Vec<f64> {
        debug_assert!(layout.len() == self.base.len());
        layout.machines().iter().flat_map(|m| [m.x, m.y]).collect()
    }

    /// Builds a new layout positioned according to `params`, with the base layout's names and sizes
    pub fn decode(&self, params: &[f64]) -> Layout {
        assert_eq!(
            params.len(),
            self.n_params(),
            "parameter vector does not match the number of machines"
        );
        let machines = self
            .base
            .machines()
            .iter()
            .zip(params.chunks_exact(2))
            .map(|(m, xy)| m.with_position(xy[0], xy[1]))
            .collect::<Vec<Machine>>();
        Layout::new(machines)
    }

    /// The function to minimize: the penalized cost of the decoded layout
    pub fn objective(&self, params: &[f64]) -> f64 {
        cost::cost(&self.decode(params), &self.config)
    }
}
