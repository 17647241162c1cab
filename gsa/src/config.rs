use flowlay::io::svg::SvgDrawOptions;
use serde::{Deserialize, Serialize};

/// Configuration of the generalized simulated annealing optimizer
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GsaConfig {
    /// Seed for the PRNG. If undefined, the algorithm will run in non-deterministic mode using entropy
    pub prng_seed: Option<u64>,
    /// Maximum number of global search iterations (strategy chains)
    pub max_iter: usize,
    /// Budget of objective evaluations, the search stops once it is exhausted
    pub max_evals: usize,
    /// Starting temperature, higher values make the search accept worse states more easily
    pub initial_temp: f64,
    /// The search re-anneals from a random state once the temperature drops below `initial_temp * restart_temp_ratio`
    pub restart_temp_ratio: f64,
    /// Shape parameter of the visiting distribution, in (1, 3). Higher values give a heavier tail.
    pub visit: f64,
    /// Shape parameter of the acceptance probability, in (-1e4, -5]. Lower values make acceptance stricter.
    pub accept: f64,
    /// Refine promising states with a local search
    pub local_search: bool,
    /// Budget of local search samples per parameter, for every local search
    pub ls_samples_per_param: usize,
    /// Number of independent annealing runs, executed in parallel
    pub n_runs: usize,
    /// Start the (first) annealing run from the initial layout instead of a random state
    pub start_from_initial: bool,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}

impl Default for GsaConfig {
    fn default() -> Self {
        Self {
            prng_seed: Some(0),
            max_iter: 1000,
            max_evals: 10_000_000,
            initial_temp: 5230.0,
            restart_temp_ratio: 2e-5,
            visit: 2.62,
            accept: -5.0,
            local_search: true,
            ls_samples_per_param: 50,
            n_runs: 1,
            start_from_initial: false,
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}
