use std::fmt::{Display, Formatter};

/// Geometric primitive representing a point
#[derive(Debug, Clone, PartialEq, Copy)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub fn distance(&self, other: &Point) -> f64 {
        self.sq_distance(other).sqrt()
    }

    pub fn sq_distance(&self, other: &Point) -> f64 {
        (self.0 - other.0).powi(2) + (self.1 - other.1).powi(2)
    }

    /// Point halfway between `self` and `other`
    pub fn midpoint(&self, other: &Point) -> Point {
        Point((self.0 + other.0) / 2.0, (self.1 + other.1) / 2.0)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Point(0.0, 0.0), Point(3.0, 4.0), 5.0; "pythagorean")]
    #[test_case(Point(15.0, 6.5), Point(30.0, 6.5), 15.0; "horizontal")]
    #[test_case(Point(-2.0, 1.0), Point(-2.0, -7.0), 8.0; "vertical")]
    #[test_case(Point(1.5, 1.5), Point(1.5, 1.5), 0.0; "coincident")]
    fn distance_is_symmetric_and_non_negative(a: Point, b: Point, expected: f64) {
        assert_eq!(a.distance(&b), expected);
        assert_eq!(b.distance(&a), expected);
        assert!(a.distance(&b) >= 0.0);
    }

    #[test]
    fn midpoint_lies_between() {
        let m = Point(0.0, 2.0).midpoint(&Point(4.0, 6.0));
        assert_eq!(m, Point(2.0, 4.0));
    }
}
