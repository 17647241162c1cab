use std::ops::ControlFlow;

use flowlay::codec::Bound;
use flowlay::util::assertions;
use log::{debug, info, warn};
use rand::Rng;
use rand::rngs::SmallRng;
use thousands::Separable;

use crate::config::GsaConfig;
use crate::opt::{Minimizer, Minimum};
use crate::samplers::ls_sampler::LSSampler;
use crate::samplers::uniform_sampler::UniformSampler;
use crate::samplers::visiting_distr::VisitingDistr;

/// Maximum number of attempts to find a random starting state with a finite objective value
const MAX_REINIT_COUNT: usize = 1000;

/// Number of strategy chains without improvement before the first forced local search
const NOT_IMPROVED_MAX_IDX: usize = 1000;

/// Generalized simulated annealing combined with a local search ("dual annealing").
///
/// Every iteration runs a strategy chain of `2 * dim` proposals from a Tsallis visiting distribution,
/// accepted with a generalized Metropolis criterion, followed by a local search around promising states.
/// The temperature follows `T(t) = T0 * (2^(qv-1) - 1) / ((1 + t)^(qv-1) - 1)`,
/// when it becomes too low the search re-anneals from a new random state.
pub struct DualAnnealing {
    pub config: GsaConfig,
    /// SmallRng is a fast, non-cryptographic PRNG <https://rust-random.github.io/book/guide-rngs.html>
    pub rng: SmallRng,
    /// Optional starting vector, used for the first annealing
    pub x0: Option<Vec<f64>>,
}

impl DualAnnealing {
    pub fn new(config: GsaConfig, rng: SmallRng) -> Self {
        assert!(config.initial_temp > 0.0, "initial temperature should be positive");
        assert!(
            config.restart_temp_ratio > 0.0 && config.restart_temp_ratio < 1.0,
            "restart temperature ratio should be in (0, 1)"
        );
        assert!(
            config.visit > 1.0 && config.visit < 3.0,
            "visiting parameter should be in (1, 3)"
        );
        assert!(
            config.accept > -1e4 && config.accept <= -5.0,
            "acceptance parameter should be in (-1e4, -5]"
        );
        Self {
            config,
            rng,
            x0: None,
        }
    }

    pub fn with_x0(mut self, x0: Vec<f64>) -> Self {
        self.x0 = Some(x0);
        self
    }
}

impl Minimizer for DualAnnealing {
    fn minimize<F>(&mut self, objective: F, bounds: &[Bound]) -> Minimum
    where
        F: Fn(&[f64]) -> f64 + Sync,
    {
        let start = std::time::Instant::now();
        let dim = bounds.len();
        if let Some(x0) = &self.x0 {
            assert_eq!(x0.len(), dim, "starting vector does not match the bounds");
        }
        if dim == 0 {
            return Minimum {
                x: vec![],
                fun: objective(&[]),
                n_evals: 1,
                n_iters: 0,
                n_restarts: 0,
            };
        }

        let config = self.config;
        let x0: Option<Vec<f64>> = self
            .x0
            .as_ref()
            .map(|x0| x0.iter().zip(bounds).map(|(v, b)| b.clamp(*v)).collect());
        let mut state = AnnealingState::new(&objective, bounds, &config, &mut self.rng);
        state.reset(x0);

        let qv = config.visit;
        let t1 = (2f64).powf(qv - 1.0) - 1.0;
        let temperature_restart = config.initial_temp * config.restart_temp_ratio;
        let mut n_iters = 0;
        let mut n_restarts = 0;

        'annealing: loop {
            for i in 0..config.max_iter {
                if n_iters >= config.max_iter {
                    break 'annealing;
                }
                let s = i as f64 + 2.0;
                let t2 = s.powf(qv - 1.0) - 1.0;
                let temperature = config.initial_temp * t1 / t2;

                if temperature < temperature_restart {
                    // re-anneal from a random state
                    debug!("[GSA] temperature {temperature:.3e} too low, re-annealing");
                    state.reset(None);
                    n_restarts += 1;
                    break;
                }
                if state.strategy_chain(i, temperature).is_break() {
                    break 'annealing;
                }
                if config.local_search && state.local_search_step().is_break() {
                    break 'annealing;
                }
                n_iters += 1;
            }
            if config.max_iter == 0 {
                break;
            }
        }

        debug_assert!(assertions::vector_within_bounds(&state.best_x, bounds));

        info!(
            "[GSA] optimization finished in {:.3}ms ({} evaluations, {} iterations, {} restarts), best: {:.3}",
            start.elapsed().as_secs_f64() * 1000.0,
            state.n_evals.separate_with_commas(),
            n_iters,
            n_restarts,
            state.best_e
        );

        Minimum {
            x: state.best_x,
            fun: state.best_e,
            n_evals: state.n_evals,
            n_iters,
            n_restarts,
        }
    }
}

/// Mutable state of a single annealing run: the energy state and the strategy chain bookkeeping
struct AnnealingState<'a, F> {
    objective: &'a F,
    bounds: &'a [Bound],
    config: &'a GsaConfig,
    rng: &'a mut SmallRng,
    visiting: VisitingDistr,
    n_evals: usize,
    current_e: f64,
    current_x: Vec<f64>,
    best_e: f64,
    best_x: Vec<f64>,
    /// best location of the strategy chain, refined when the search stagnates
    emin: f64,
    xmin: Vec<f64>,
    temperature_step: f64,
    improved: bool,
    not_improved_idx: usize,
    not_improved_max_idx: usize,
}

impl<'a, F> AnnealingState<'a, F>
where
    F: Fn(&[f64]) -> f64,
{
    fn new(
        objective: &'a F,
        bounds: &'a [Bound],
        config: &'a GsaConfig,
        rng: &'a mut SmallRng,
    ) -> Self {
        Self {
            objective,
            bounds,
            config,
            rng,
            visiting: VisitingDistr::new(config.visit),
            n_evals: 0,
            current_e: f64::INFINITY,
            current_x: vec![],
            best_e: f64::INFINITY,
            best_x: vec![],
            emin: f64::INFINITY,
            xmin: vec![],
            temperature_step: 0.0,
            improved: false,
            not_improved_idx: 0,
            not_improved_max_idx: NOT_IMPROVED_MAX_IDX,
        }
    }

    fn evaluate(&mut self, x: &[f64]) -> f64 {
        self.n_evals += 1;
        (self.objective)(x)
    }

    fn budget_exhausted(&self) -> ControlFlow<()> {
        match self.n_evals >= self.config.max_evals {
            true => ControlFlow::Break(()),
            false => ControlFlow::Continue(()),
        }
    }

    /// Moves the current state to `x0` or, if absent, to a random state with a finite energy
    fn reset(&mut self, x0: Option<Vec<f64>>) {
        let mut x0 = x0;
        for attempt in 0..MAX_REINIT_COUNT {
            let x = match x0.take() {
                Some(x0) => x0,
                None => UniformSampler::new(self.bounds).sample(&mut *self.rng),
            };
            let e = self.evaluate(&x);
            self.current_e = e;
            self.current_x = x;
            if e.is_finite() {
                break;
            }
            if attempt + 1 == MAX_REINIT_COUNT {
                warn!("[GSA] no state with a finite objective value found after {MAX_REINIT_COUNT} attempts");
            }
        }
        if self.best_x.is_empty() || self.best_e.is_nan() {
            self.best_e = self.current_e;
            self.best_x = self.current_x.clone();
        }
        if self.xmin.is_empty() {
            self.emin = self.current_e;
            self.xmin = self.current_x.clone();
        }
    }

    fn update_current(&mut self, e: f64, x: Vec<f64>) {
        self.current_e = e;
        self.current_x = x;
    }

    fn update_best(&mut self, e: f64, x: Vec<f64>) {
        self.best_e = e;
        self.best_x = x;
    }

    /// Runs `2 * dim` proposals at the given temperature
    fn strategy_chain(&mut self, step: usize, temperature: f64) -> ControlFlow<()> {
        let dim = self.bounds.len();
        self.temperature_step = temperature / (step as f64 + 1.0);
        self.not_improved_idx += 1;
        self.improved = step == 0;

        for j in 0..dim * 2 {
            let x_visit = self.visiting.visit(
                &self.current_x,
                j,
                temperature,
                self.bounds,
                &mut *self.rng,
            );
            let e = self.evaluate(&x_visit);
            if e < self.current_e {
                self.update_current(e, x_visit);
                if e < self.best_e {
                    debug!("[GSA: {step}/{j}] better: {e:.3}");
                    self.update_best(e, self.current_x.clone());
                    self.improved = true;
                    self.not_improved_idx = 0;
                }
            } else {
                self.accept_reject(j, e, x_visit);
            }
            self.budget_exhausted()?;
        }
        ControlFlow::Continue(())
    }

    /// Generalized Metropolis criterion for a proposal which does not improve the current state
    fn accept_reject(&mut self, j: usize, e: f64, x_visit: Vec<f64>) {
        let accept = self.config.accept;
        let r: f64 = self.rng.random();
        let pqv_temp = 1.0 - ((1.0 - accept) * (e - self.current_e) / self.temperature_step);
        let pqv = match pqv_temp <= 0.0 {
            true => 0.0,
            false => (pqv_temp.ln() / (1.0 - accept)).exp(),
        };
        if r <= pqv {
            self.update_current(e, x_visit);
            self.xmin = self.current_x.clone();
        }

        // no improvement for a long time, track the best location of the chain
        if self.not_improved_idx >= self.not_improved_max_idx
            && (j == 0 || self.current_e < self.emin)
        {
            self.emin = self.current_e;
            self.xmin = self.current_x.clone();
        }
    }

    /// Local search on the best state after an improvement, or on the chain's best location after stagnation
    fn local_search_step(&mut self) -> ControlFlow<()> {
        if self.improved {
            let (e, x) = self.local_search(self.best_x.clone(), self.best_e);
            if e < self.best_e {
                debug!("[GSA] local search improved best: {e:.3}");
                self.not_improved_idx = 0;
                self.update_best(e, x.clone());
                self.update_current(e, x);
            }
            self.budget_exhausted()?;
        }

        if self.not_improved_idx >= self.not_improved_max_idx {
            let (e, x) = self.local_search(self.xmin.clone(), self.emin);
            self.emin = e;
            self.xmin = x.clone();
            self.not_improved_idx = 0;
            self.not_improved_max_idx = self.bounds.len();
            if e < self.best_e {
                self.update_best(e, x.clone());
                self.update_current(e, x);
            }
            self.budget_exhausted()?;
        }
        ControlFlow::Continue(())
    }

    /// Samples around `x` with a shrinking normal distribution, moving towards every improvement
    fn local_search(&mut self, x: Vec<f64>, e: f64) -> (f64, Vec<f64>) {
        let budget = self.config.ls_samples_per_param * self.bounds.len();
        let bounds = self.bounds;
        let mut sampler = LSSampler::from_defaults(&x, bounds);
        let (mut best_e, mut best_x) = (e, x);

        for i in 0..budget {
            let sample = sampler.sample(&mut *self.rng);
            let e = self.evaluate(&sample);
            if e < best_e {
                sampler.shift_mean(&sample);
                (best_e, best_x) = (e, sample);
            }
            if self.n_evals >= self.config.max_evals {
                break;
            }
            sampler.decay_stddev(i as f64 / budget as f64);
        }
        (best_e, best_x)
    }
}
