//! Ordered coordinate partitions of one spatial dimension.
//!
//! An [`Axis`] is the set of ticks `x_1 < x_2 < ... < x_n` partitioning the
//! interval `[x_1, x_n]`. Grids, stencils and interpolation tables are all
//! assembled by walking axis ticks, so the ordering invariant is the contract
//! every downstream numerical routine relies on.
//!
//! Validation trade-off: the list constructors check strict monotonicity only
//! when [`Axis::VALIDATES_ON_CONSTRUCTION`] is set, i.e. in builds with
//! `debug_assertions` (tests, dev profile) or with the `checked-axis` feature.
//! Optimized builds trust literal grid definitions and skip the walk; a
//! non-increasing list then yields an axis that silently corrupts stencils
//! downstream instead of failing. Use [`Axis::try_new`] for untrusted input.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::core::PricingError;

/// Builds an [`Axis`] from a literal list of ticks.
///
/// Integer and float literals are both accepted.
///
/// # Examples
/// ```
/// use quantpde::axis;
///
/// let axis = axis![0, 10, 20.5];
/// assert_eq!(axis.ticks(), &[0.0, 10.0, 20.5]);
/// ```
#[macro_export]
macro_rules! axis {
    ($($tick:expr),+ $(,)?) => {
        $crate::grid::Axis::new(vec![$(f64::from($tick)),+])
    };
}

/// Strictly increasing, non-empty sequence of ticks with exclusive ownership
/// of a fixed-length buffer.
///
/// The length never changes after construction; only element-wise edits
/// through [`IndexMut`] are possible. Cloning deep-copies the buffer.
///
/// # Examples
/// ```
/// use quantpde::grid::Axis;
///
/// let axis = Axis::new(vec![0.0, 10.0, 20.0]);
/// let refined = axis.refine();
/// assert_eq!(refined.ticks(), &[0.0, 5.0, 10.0, 15.0, 20.0]);
/// assert_eq!(refined.to_string(), "(0 5 10 15 20)");
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Axis {
    ticks: Box<[f64]>,
}

fn first_out_of_order(ticks: &[f64]) -> Option<usize> {
    ticks
        .windows(2)
        .position(|w| w[0].partial_cmp(&w[1]) != Some(Ordering::Less))
}

impl Axis {
    /// Whether list constructors check the ordering invariant in this build.
    pub const VALIDATES_ON_CONSTRUCTION: bool =
        cfg!(any(debug_assertions, feature = "checked-axis"));

    /// Largest interval count [`Self::range`] will allocate for.
    pub const MAX_RANGE_INTERVALS: usize = 1 << 28;

    /// Creates an axis from an explicit ordered list of ticks.
    ///
    /// # Panics
    /// When [`Self::VALIDATES_ON_CONSTRUCTION`] is set, panics if `ticks` is
    /// empty or not strictly increasing. Otherwise the list is trusted.
    pub fn new(ticks: impl Into<Vec<f64>>) -> Self {
        let ticks = ticks.into();
        if Self::VALIDATES_ON_CONSTRUCTION {
            assert!(!ticks.is_empty(), "axis requires at least one tick");
            if let Some(i) = first_out_of_order(&ticks) {
                panic!(
                    "axis ticks must be strictly increasing: ticks[{i}] = {} is not below ticks[{}] = {}",
                    ticks[i],
                    i + 1,
                    ticks[i + 1]
                );
            }
        }
        Self {
            ticks: ticks.into_boxed_slice(),
        }
    }

    /// Creates an axis by bulk-copying a numeric buffer.
    ///
    /// The buffer is assumed to have been validated by its producer; no
    /// ordering check is made in any build. An empty buffer is a contract
    /// violation caught only by a debug assertion.
    pub fn from_slice(ticks: &[f64]) -> Self {
        debug_assert!(!ticks.is_empty(), "axis requires at least one tick");
        Self {
            ticks: ticks.into(),
        }
    }

    /// Creates an axis after checking that `ticks` is non-empty, finite and
    /// strictly increasing, regardless of build mode.
    pub fn try_new(ticks: impl Into<Vec<f64>>) -> Result<Self, PricingError> {
        let ticks = ticks.into();
        if ticks.is_empty() {
            return Err(PricingError::InvalidInput(
                "axis requires at least one tick".to_string(),
            ));
        }
        if ticks.iter().any(|t| !t.is_finite()) {
            return Err(PricingError::InvalidInput(
                "axis ticks must be finite".to_string(),
            ));
        }
        if let Some(i) = first_out_of_order(&ticks) {
            return Err(PricingError::InvalidInput(format!(
                "axis ticks must be strictly increasing (violated at index {i})"
            )));
        }
        Ok(Self {
            ticks: ticks.into_boxed_slice(),
        })
    }

    /// Evenly spaced ticks `start, start + step, ...` up to and including
    /// `end` when it lies on the lattice.
    ///
    /// Each tick is computed as `start + i * step` so no rounding error
    /// accumulates along the axis.
    ///
    /// # Examples
    /// ```
    /// use quantpde::grid::Axis;
    ///
    /// let axis = Axis::range(0.0, 10.0, 200.0).unwrap();
    /// assert_eq!(axis.size(), 21);
    /// assert_eq!(axis.upper(), 200.0);
    /// ```
    pub fn range(start: f64, step: f64, end: f64) -> Result<Self, PricingError> {
        if !start.is_finite() || !step.is_finite() || !end.is_finite() {
            return Err(PricingError::InvalidInput(
                "axis range bounds and step must be finite".to_string(),
            ));
        }
        if step <= 0.0 {
            return Err(PricingError::InvalidInput(
                "axis range step must be > 0".to_string(),
            ));
        }
        if end < start {
            return Err(PricingError::InvalidInput(
                "axis range end must be >= start".to_string(),
            ));
        }

        let span = (end - start) / step;
        // Absorb representation error so that `end` itself is included.
        let span = (span + 1.0e-9 * span.max(1.0)).floor();
        if span > Self::MAX_RANGE_INTERVALS as f64 {
            return Err(PricingError::InvalidInput(format!(
                "axis range would need {span:e} intervals (limit {})",
                Self::MAX_RANGE_INTERVALS
            )));
        }
        let intervals = span as usize;
        let ticks: Vec<f64> = (0..=intervals)
            .map(|i| start + i as f64 * step)
            .collect();
        Self::try_new(ticks)
    }

    /// Adopts a buffer filled by the refinement algorithm. Not public: the
    /// buffer is trusted to be ordered.
    fn from_refinement(ticks: Vec<f64>) -> Self {
        Self {
            ticks: ticks.into_boxed_slice(),
        }
    }

    /// Returns a new axis with the arithmetic midpoint inserted between every
    /// adjacent pair of ticks.
    ///
    /// An axis of `n` ticks becomes one of `2n - 1` ticks; the original tick
    /// `i` lands at index `2i` with its value copied, not recomputed. A
    /// single-tick axis refines to itself.
    ///
    /// Ordering holds in exact arithmetic. Two ticks that are adjacent
    /// floating-point numbers have no representable value between them, so
    /// refining such an axis yields a repeated tick.
    pub fn refine(&self) -> Self {
        let mut refined = Vec::with_capacity((2 * self.ticks.len()).saturating_sub(1));
        refined.extend(self.ticks.first().copied());
        refined.extend(
            self.ticks
                .windows(2)
                .flat_map(|w| [(w[0] + w[1]) / 2.0, w[1]]),
        );
        debug_assert_eq!(refined.len(), (2 * self.ticks.len()).saturating_sub(1));
        Self::from_refinement(refined)
    }

    /// Applies [`Self::refine`] `times` times, giving `2^times * (n - 1) + 1`
    /// ticks.
    pub fn refine_times(&self, times: u32) -> Self {
        (0..times).fold(self.clone(), |axis, _| axis.refine())
    }

    /// Total number of ticks.
    #[inline]
    pub fn size(&self) -> usize {
        self.ticks.len()
    }

    /// Read-only view of the contiguous tick buffer.
    #[inline]
    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.ticks.iter()
    }

    /// Tick at `i`, or `None` past the end.
    #[inline]
    pub fn get(&self, i: usize) -> Option<f64> {
        self.ticks.get(i).copied()
    }

    /// Left end of the partitioned interval.
    ///
    /// # Panics
    /// On an empty axis, which only an unchecked release-build
    /// [`Self::from_slice`] can produce.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.ticks[0]
    }

    /// Right end of the partitioned interval.
    ///
    /// # Panics
    /// On an empty axis, as for [`Self::lower`].
    #[inline]
    pub fn upper(&self) -> f64 {
        self.ticks[self.ticks.len() - 1]
    }

    /// Re-checks the ordering invariant, e.g. after in-place edits or on an
    /// axis built with [`Self::from_slice`].
    pub fn is_strictly_increasing(&self) -> bool {
        !self.ticks.is_empty() && first_out_of_order(&self.ticks).is_none()
    }
}

impl Index<usize> for Axis {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.ticks[i]
    }
}

impl IndexMut<usize> for Axis {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.ticks[i]
    }
}

impl AsRef<[f64]> for Axis {
    fn as_ref(&self) -> &[f64] {
        &self.ticks
    }
}

impl<'a> IntoIterator for &'a Axis {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.ticks.iter()
    }
}

impl FromIterator<f64> for Axis {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

impl From<&[f64]> for Axis {
    fn from(ticks: &[f64]) -> Self {
        Self::from_slice(ticks)
    }
}

impl TryFrom<Vec<f64>> for Axis {
    type Error = PricingError;

    fn try_from(ticks: Vec<f64>) -> Result<Self, Self::Error> {
        Self::try_new(ticks)
    }
}

impl From<Axis> for Vec<f64> {
    fn from(axis: Axis) -> Self {
        axis.ticks.into_vec()
    }
}

/// Renders `(t0 t1 ... tn)`; a requested precision applies to every tick.
impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, tick) in self.ticks.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match f.precision() {
                Some(p) => write!(f, "{tick:.p$}")?,
                None => write!(f, "{tick}")?,
            }
        }
        f.write_str(")")
    }
}
