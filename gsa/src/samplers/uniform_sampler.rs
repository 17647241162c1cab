use flowlay::codec::Bound;
use rand::Rng;

/// Samples parameter vectors uniformly within a set of bounds.
pub struct UniformSampler<'a> {
    pub bounds: &'a [Bound],
}

impl<'a> UniformSampler<'a> {
    pub fn new(bounds: &'a [Bound]) -> Self {
        Self { bounds }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> Vec<f64> {
        self.bounds
            .iter()
            .map(|b| b.low + rng.random::<f64>() * b.range())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn samples_within_bounds() {
        let bounds = [Bound::new(0.0, 40.0), Bound::new(0.0, 27.0), Bound::new(3.0, 3.0)];
        let sampler = UniformSampler::new(&bounds);
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..1000 {
            let x = sampler.sample(&mut rng);
            assert!(x.iter().zip(&bounds).all(|(v, b)| b.contains(*v)));
            assert_eq!(x[2], 3.0);
        }
    }
}
