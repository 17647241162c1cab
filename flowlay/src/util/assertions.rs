//! Consistency checks, meant to be used in `debug_assert!` and tests.

use crate::codec::Bound;
use crate::entities::{Floor, Layout};
use crate::util::tol;

/// All machines are (up to floating point tolerance) contained in the floor
pub fn layout_within_floor(layout: &Layout, floor: &Floor) -> bool {
    layout.machines().iter().all(|m| {
        tol::ge(m.x, 0.0)
            && tol::ge(m.y, 0.0)
            && tol::le(m.x + m.width, floor.length)
            && tol::le(m.y + m.height, floor.width)
    })
}

/// Both layouts contain the same machines, in the same order and with the same sizes
pub fn sizes_match(a: &Layout, b: &Layout) -> bool {
    a.len() == b.len()
        && a
            .machines()
            .iter()
            .zip(b.machines())
            .all(|(ma, mb)| ma.name == mb.name && ma.width == mb.width && ma.height == mb.height)
}

pub fn vector_within_bounds(params: &[f64], bounds: &[Bound]) -> bool {
    params.len() == bounds.len() && params.iter().zip(bounds).all(|(v, b)| b.contains(*v))
}
