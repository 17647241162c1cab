use flowlay::codec::{Bound, ParamCodec};
use flowlay::entities::Layout;
use flowlay::util::assertions;
use rand::Rng;

use crate::config::GsaConfig;
use crate::opt::multi_start::MultiStart;

pub mod dual_annealing;
pub mod multi_start;

/// A derivative-free global minimizer over a box-bounded continuous domain.
pub trait Minimizer {
    /// Searches for a vector within `bounds` which minimizes `objective`.
    /// The objective may be evaluated concurrently, it should have no shared mutable state.
    fn minimize<F>(&mut self, objective: F, bounds: &[Bound]) -> Minimum
    where
        F: Fn(&[f64]) -> f64 + Sync;
}

/// Best vector found by a [Minimizer] and some statistics about the search
#[derive(Clone, Debug, PartialEq)]
pub struct Minimum {
    /// Best found vector, within the bounds
    pub x: Vec<f64>,
    /// Objective value of `x`
    pub fun: f64,
    pub n_evals: usize,
    pub n_iters: usize,
    pub n_restarts: usize,
}

/// Optimizes the positions of the codec's base layout, returns the decoded best layout.
pub fn optimize_layout(
    codec: &ParamCodec,
    config: GsaConfig,
    rng: &mut impl Rng,
) -> (Layout, Minimum) {
    let mut minimizer = MultiStart::new(config, rng);
    if config.start_from_initial {
        minimizer = minimizer.with_x0(codec.encode(codec.base()));
    }
    let minimum = minimizer.minimize(|x| codec.objective(x), codec.bounds());
    let layout = codec.decode(&minimum.x);

    debug_assert!(assertions::sizes_match(codec.base(), &layout));
    debug_assert!(assertions::layout_within_floor(
        &layout,
        &codec.config().floor
    ));

    (layout, minimum)
}
