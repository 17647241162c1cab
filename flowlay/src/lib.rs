//! Core model of a material-flow facility layout.
//!
//! A [`Layout`](entities::Layout) is an ordered set of rectangular machines on a floor.
//! The order of the machines is the order in which material flows through them.
//! This crate derives flow metrics from a layout, reduces it to a penalized scalar cost
//! and exposes it as a flat real-valued objective (with per-parameter bounds) for any
//! derivative-free global optimizer.

/// Geometric primitives
pub mod geometry;

/// Entities to model a facility layout problem
pub mod entities;

/// Penalized cost function of a layout
pub mod cost;

/// Conversion between layouts and flat parameter vectors
pub mod codec;

/// Importing layout instances and exporting solutions
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
