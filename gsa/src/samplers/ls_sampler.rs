use flowlay::codec::Bound;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// The stddev starts at 5% and ends at 0.1% of each parameter's range.
pub const SD_FRAC: (f64, f64) = (0.05, 0.001);

///Creates parameter vector samples around a reference vector for local search.
///Every parameter is drawn from a normal distribution with a decaying standard deviation
///and clamped to its bounds.
///Each time an improvement is found, the mean of the distributions is shifted to the new best vector.
pub struct LSSampler<'a> {
    bounds: &'a [Bound],
    mean: Vec<f64>,
    sd_frac: f64,
    sd_frac_range: (f64, f64),
    pub n_samples: usize,
}

impl<'a> LSSampler<'a> {
    pub fn new(reference: &[f64], bounds: &'a [Bound], sd_frac_range: (f64, f64)) -> Self {
        assert_eq!(reference.len(), bounds.len());
        Self {
            bounds,
            mean: reference.to_vec(),
            sd_frac: sd_frac_range.0,
            sd_frac_range,
            n_samples: 0,
        }
    }

    /// Creates a new sampler with the default standard deviation range: [SD_FRAC].
    pub fn from_defaults(reference: &[f64], bounds: &'a [Bound]) -> Self {
        Self::new(reference, bounds, SD_FRAC)
    }

    /// Shifts the mean of the normal distributions to the given reference vector.
    pub fn shift_mean(&mut self, reference: &[f64]) {
        self.mean.copy_from_slice(reference);
    }

    pub fn stddev_frac(&self) -> f64 {
        self.sd_frac
    }

    /// Adjusts the standard deviation according to the fraction of samples that have passed,
    /// following an exponential decay curve.
    /// `progress_pct` is a value in [0, 1].
    ///
    /// f(0) = init;
    /// f(1) = end;
    /// f(x) = init * (end/init)^x;
    pub fn decay_stddev(&mut self, progress_pct: f64) {
        let (init, end) = self.sd_frac_range;
        self.sd_frac = init * (end / init).powf(progress_pct);
    }

    pub fn sample(&mut self, rng: &mut impl Rng) -> Vec<f64> {
        self.n_samples += 1;
        self.mean
            .iter()
            .zip(self.bounds)
            .map(|(m, b)| {
                let z: f64 = StandardNormal.sample(&mut *rng);
                b.clamp(m + z * self.sd_frac * b.range())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn samples_stay_within_bounds() {
        let bounds = [Bound::new(0.0, 40.0), Bound::new(0.0, 27.0)];
        let mut sampler = LSSampler::new(&[0.0, 27.0], &bounds, (2.0, 1.0));
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..500 {
            let x = sampler.sample(&mut rng);
            assert!(bounds[0].contains(x[0]) && bounds[1].contains(x[1]));
        }
        assert_eq!(sampler.n_samples, 500);
    }

    #[test]
    fn stddev_decays_exponentially() {
        let bounds = [Bound::new(0.0, 10.0)];
        let mut sampler = LSSampler::from_defaults(&[5.0], &bounds);
        sampler.decay_stddev(0.0);
        assert!((sampler.stddev_frac() - SD_FRAC.0).abs() < 1e-12);
        sampler.decay_stddev(1.0);
        assert!((sampler.stddev_frac() - SD_FRAC.1).abs() < 1e-12);
    }
}
