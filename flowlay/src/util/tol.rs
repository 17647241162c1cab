//! Tolerant float comparisons for positions produced by the optimizer.

use float_cmp::approx_eq;

/// Absolute tolerance, in meters
pub const EPSILON: f64 = 1e-9;

/// `a` and `b` are equal within [EPSILON] (or 4 ulps)
pub fn eq(a: f64, b: f64) -> bool {
    approx_eq!(f64, a, b, epsilon = EPSILON, ulps = 4)
}

/// `a <= b`, treating nearly equal values as equal
pub fn le(a: f64, b: f64) -> bool {
    a <= b || eq(a, b)
}

pub fn ge(a: f64, b: f64) -> bool {
    le(b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_edges_are_inside() {
        assert!(eq(0.1 + 0.2, 0.3));
        assert!(le(50.0 + 1e-12, 50.0));
        assert!(ge(-1e-12, 0.0));
        assert!(!le(50.1, 50.0));
    }
}
