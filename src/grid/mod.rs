//! Spatial discretization: ordered axes and the rectilinear grids built on them.

pub mod axis;
pub mod rectilinear;

pub use axis::Axis;
pub use rectilinear::{NewTickBetweenEachPair, RectilinearGrid1, RefinementPolicy};
