use flowlay::codec::Bound;
use log::info;
use ordered_float::OrderedFloat;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::GsaConfig;
use crate::opt::dual_annealing::DualAnnealing;
use crate::opt::{Minimizer, Minimum};

/// Runs several independent [DualAnnealing] searches in parallel and keeps the best result.
pub struct MultiStart {
    pub config: GsaConfig,
    /// One seed per run, drawn up front so the result does not depend on thread scheduling
    pub seeds: Vec<u64>,
    pub x0: Option<Vec<f64>>,
}

impl MultiStart {
    pub fn new(config: GsaConfig, rng: &mut impl Rng) -> Self {
        assert!(config.n_runs > 0, "at least one annealing run is required");
        let seeds = (0..config.n_runs).map(|_| rng.random()).collect();
        Self {
            config,
            seeds,
            x0: None,
        }
    }

    /// The first run starts from `x0`, the others from random states
    pub fn with_x0(mut self, x0: Vec<f64>) -> Self {
        self.x0 = Some(x0);
        self
    }
}

impl Minimizer for MultiStart {
    fn minimize<F>(&mut self, objective: F, bounds: &[Bound]) -> Minimum
    where
        F: Fn(&[f64]) -> f64 + Sync,
    {
        let config = self.config;
        let x0 = self.x0.as_ref();
        let minima = self
            .seeds
            .par_iter()
            .enumerate()
            .map(|(i, seed)| {
                let mut da = DualAnnealing::new(config, SmallRng::seed_from_u64(*seed));
                if let (0, Some(x0)) = (i, x0) {
                    da = da.with_x0(x0.clone());
                }
                da.minimize(&objective, bounds)
            })
            .collect::<Vec<Minimum>>();

        let n_evals = minima.iter().map(|m| m.n_evals).sum();
        let n_iters = minima.iter().map(|m| m.n_iters).sum();
        let n_restarts = minima.iter().map(|m| m.n_restarts).sum();

        info!(
            "[GSA] {} runs finished, best objective values: [{}]",
            minima.len(),
            minima
                .iter()
                .map(|m| format!("{:.3}", m.fun))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let best = minima
            .into_iter()
            .min_by_key(|m| OrderedFloat(m.fun))
            .expect("at least one run");

        Minimum {
            n_evals,
            n_iters,
            n_restarts,
            ..best
        }
    }
}
