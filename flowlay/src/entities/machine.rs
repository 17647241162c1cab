use std::fmt::{Display, Formatter};

use crate::geometry::Point;

/// A rectangular machine placed on the floor.
/// `(x, y)` is its lower-left corner, `width` extends along the floor's length (x-axis)
/// and `height` along the floor's width (y-axis). All values are in meters.
#[derive(Clone, Debug, PartialEq)]
pub struct Machine {
    /// Unique identifier of the machine within a layout
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Machine {
    pub fn new(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Point where material leaves the machine: middle of its right edge.
    /// Flow distances are measured between the connection points of consecutive machines.
    pub fn connection_point(&self) -> Point {
        Point(self.x + self.width, self.y + self.height / 2.0)
    }

    pub fn center(&self) -> Point {
        Point(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns a copy of the machine moved to `(x, y)`, the size is left untouched
    pub fn with_position(&self, x: f64, y: f64) -> Machine {
        Machine {
            name: self.name.clone(),
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

impl Display for Machine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [x: {:.3}, y: {:.3}, w: {:.3}, h: {:.3}]",
            self.name, self.x, self.y, self.width, self.height
        )
    }
}
