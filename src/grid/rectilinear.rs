//! One-dimensional rectilinear grid and pluggable refinement policies.

use crate::grid::Axis;

/// Strategy producing a denser axis from an existing one.
pub trait RefinementPolicy {
    /// Returns the refined axis. Implementations must keep every input tick.
    fn refine(&self, axis: &Axis) -> Axis;
}

/// Inserts the midpoint between each pair of adjacent ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewTickBetweenEachPair;

impl RefinementPolicy for NewTickBetweenEachPair {
    #[inline]
    fn refine(&self, axis: &Axis) -> Axis {
        axis.refine()
    }
}

/// Rectilinear grid over a single spatial dimension.
///
/// # Examples
/// ```
/// use quantpde::axis;
/// use quantpde::grid::{NewTickBetweenEachPair, RectilinearGrid1};
///
/// let mut grid = RectilinearGrid1::new(axis![0.0, 50.0, 100.0]);
/// grid.refine(&NewTickBetweenEachPair);
/// assert_eq!(grid.size(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RectilinearGrid1 {
    axis: Axis,
}

impl RectilinearGrid1 {
    pub fn new(axis: Axis) -> Self {
        Self { axis }
    }

    /// Axis spanning the grid.
    #[inline]
    pub fn axis(&self) -> &Axis {
        &self.axis
    }

    /// Number of grid nodes.
    #[inline]
    pub fn size(&self) -> usize {
        self.axis.size()
    }

    /// Replaces the axis with its refinement under `policy`.
    pub fn refine<P: RefinementPolicy + ?Sized>(&mut self, policy: &P) {
        self.axis = policy.refine(&self.axis);
    }

    /// Consumes the grid and returns it refined `times` times.
    pub fn refined<P: RefinementPolicy + ?Sized>(mut self, policy: &P, times: u32) -> Self {
        for _ in 0..times {
            self.refine(policy);
        }
        self
    }

    pub fn into_axis(self) -> Axis {
        self.axis
    }
}

impl From<Axis> for RectilinearGrid1 {
    fn from(axis: Axis) -> Self {
        Self::new(axis)
    }
}
