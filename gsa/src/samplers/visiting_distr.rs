use std::f64::consts::PI;

use flowlay::codec::Bound;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Visits beyond this magnitude are replaced by a uniform draw within it
pub const TAIL_LIMIT: f64 = 1e8;

/// Visited coordinates this close to their lower bound are nudged inwards
pub const MIN_VISIT_BOUND: f64 = 1e-10;

/// Distorted Cauchy-Lorentz (Tsallis) visiting distribution of generalized simulated annealing.
///
/// The spread of the distribution is controlled by the temperature: at high temperatures it produces
/// long jumps through the search space, at low temperatures it concentrates around the current state.
/// `qv` shapes the tail, values in (1, 3) are valid.
#[derive(Clone, Debug)]
pub struct VisitingDistr {
    qv: f64,
    factor4_p: f64,
    factor6: f64,
}

impl VisitingDistr {
    pub fn new(qv: f64) -> Self {
        assert!(qv > 1.0 && qv < 3.0, "visiting parameter should be in (1, 3)");
        let factor2 = ((4.0 - qv) * (qv - 1.0).ln()).exp();
        let factor3 = ((2.0 - qv) * 2f64.ln() / (qv - 1.0)).exp();
        let factor4_p = PI.sqrt() * factor2 / (factor3 * (3.0 - qv));
        let factor5 = 1.0 / (qv - 1.0) - 0.5;
        let d1 = 2.0 - factor5;
        let factor6 = PI * (1.0 - factor5) / (PI * (1.0 - factor5)).sin() / ln_gamma(d1).exp();

        Self {
            qv,
            factor4_p,
            factor6,
        }
    }

    /// Draws a single step length at the given temperature
    pub fn sample_step(&self, temperature: f64, rng: &mut impl Rng) -> f64 {
        let qv = self.qv;
        let x: f64 = StandardNormal.sample(rng);
        let y: f64 = StandardNormal.sample(rng);

        let factor1 = (temperature.ln() / (qv - 1.0)).exp();
        let factor4 = self.factor4_p * factor1;
        let sigma_x = (-(qv - 1.0) * (self.factor6 / factor4).ln() / (3.0 - qv)).exp();
        let den = ((qv - 1.0) * y.abs().ln() / (3.0 - qv)).exp();

        x * sigma_x / den
    }

    /// Step length with the tail cut off at [TAIL_LIMIT]
    fn bounded_step(&self, temperature: f64, rng: &mut impl Rng) -> f64 {
        let step = self.sample_step(temperature, rng);
        if step > TAIL_LIMIT {
            TAIL_LIMIT * rng.random::<f64>()
        } else if step < -TAIL_LIMIT {
            -TAIL_LIMIT * rng.random::<f64>()
        } else {
            step
        }
    }

    /// Proposes a new state from `x`.
    ///
    /// For `step < x.len()` every coordinate is moved, for the following steps only coordinate
    /// `step - x.len()` is. Coordinates which leave their bounds are wrapped around to the other side.
    pub fn visit(
        &self,
        x: &[f64],
        step: usize,
        temperature: f64,
        bounds: &[Bound],
        rng: &mut impl Rng,
    ) -> Vec<f64> {
        let dim = x.len();
        let mut visit = x.to_vec();
        if step < dim {
            for (v, b) in visit.iter_mut().zip(bounds) {
                *v = wrap(*v + self.bounded_step(temperature, rng), b);
            }
        } else {
            let idx = step - dim;
            visit[idx] = wrap(x[idx] + self.bounded_step(temperature, rng), &bounds[idx]);
        }
        visit
    }
}

/// Folds `v` back into `bound`, as if the interval was periodic
pub fn wrap(v: f64, bound: &Bound) -> f64 {
    let range = bound.range();
    if range <= 0.0 {
        return bound.low;
    }
    let a = v - bound.low;
    let b = a % range + range;
    let mut wrapped = b % range + bound.low;
    if (wrapped - bound.low).abs() < MIN_VISIT_BOUND {
        wrapped += MIN_VISIT_BOUND;
    }
    bound.clamp(wrapped)
}

/// Natural logarithm of the gamma function for positive arguments (Lanczos approximation, g = 7)
pub fn ln_gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        // reflection formula
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let t = x + G + 0.5;
    let series = COEFFS
        .iter()
        .enumerate()
        .skip(1)
        .fold(COEFFS[0], |acc, (i, c)| acc + c / (x + i as f64));
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + series.ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use test_case::test_case;

    #[test_case(1.0, 0.0; "gamma(1) = 1")]
    #[test_case(2.0, 0.0; "gamma(2) = 1")]
    #[test_case(5.0, 24f64.ln(); "gamma(5) = 24")]
    #[test_case(0.5, 0.572_364_942_924_700_1; "gamma(0.5) = sqrt(pi)")]
    fn ln_gamma_known_values(x: f64, expected: f64) {
        assert!((ln_gamma(x) - expected).abs() < 1e-10, "{}", ln_gamma(x));
    }

    #[test_case(45.0, 5.0; "above")]
    #[test_case(-3.0, 37.0; "below")]
    #[test_case(12.5, 12.5; "inside")]
    fn wrapping(v: f64, expected: f64) {
        let b = Bound::new(0.0, 40.0);
        assert!((wrap(v, &b) - expected).abs() < 1e-9);
    }

    #[test]
    fn wrapping_degenerate_bound() {
        assert_eq!(wrap(12.0, &Bound::new(3.0, 3.0)), 3.0);
    }

    #[test]
    fn visits_stay_within_bounds() {
        let distr = VisitingDistr::new(2.62);
        let bounds = vec![Bound::new(0.0, 40.0), Bound::new(0.0, 27.0)];
        let mut rng = SmallRng::seed_from_u64(0);
        let x = vec![5.0, 5.0];
        for temperature in [5230.0, 10.0, 0.1] {
            for step in 0..4 {
                let v = distr.visit(&x, step, temperature, &bounds, &mut rng);
                assert!(v.iter().zip(&bounds).all(|(v, b)| b.contains(*v)));
                if step >= 2 {
                    // a single coordinate is moved
                    assert_eq!(v[3 - step], x[3 - step]);
                }
            }
        }
    }

    #[test]
    fn cooler_visits_are_shorter() {
        let distr = VisitingDistr::new(2.62);
        let mut rng = SmallRng::seed_from_u64(7);
        let median = |t: f64, rng: &mut SmallRng| {
            let mut steps = (0..2001)
                .map(|_| distr.sample_step(t, rng).abs())
                .collect::<Vec<_>>();
            steps.sort_by(f64::total_cmp);
            steps[1000]
        };
        assert!(median(0.01, &mut rng) < median(100.0, &mut rng));
    }
}
