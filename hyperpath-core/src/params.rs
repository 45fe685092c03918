//! Validated query parameters.
//!
//! Every traversal and metric takes its minimum-intersection threshold `s`
//! per call. The types here turn raw caller input into values that cannot
//! describe an invalid query, so the algorithms never re-check them.

use std::num::NonZeroUsize;

use crate::error::{HyperpathError, Result};

/// Default number of paths requested by the CLI and examples.
pub const DEFAULT_K: usize = 3;

/// Minimum number of shared entities for two hyperedges to be adjacent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Intersection(NonZeroUsize);

impl Intersection {
    /// The loosest threshold: any shared entity connects two hyperedges.
    pub const ONE: Self = Self(NonZeroUsize::MIN);

    /// Validates `s`.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvalidParameter`] when `s` is zero.
    pub fn new(s: usize) -> Result<Self> {
        NonZeroUsize::new(s)
            .map(Self)
            .ok_or(HyperpathError::InvalidParameter {
                parameter: "s",
                value: s,
                expected: "s >= 1",
            })
    }

    /// Returns the raw threshold.
    #[must_use]
    #[rustfmt::skip]
    pub const fn get(self) -> usize { self.0.get() }
}

impl Default for Intersection {
    fn default() -> Self {
        Self::ONE
    }
}

/// Threshold and depth bound shared by every traversal.
///
/// # Examples
/// ```
/// use hyperpath_core::TraversalParams;
///
/// let params = TraversalParams::new(2, Some(4))?;
/// assert_eq!(params.s(), 2);
/// assert_eq!(params.max_depth(), Some(4));
/// assert!(TraversalParams::new(0, None).is_err());
/// # Ok::<(), hyperpath_core::HyperpathError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraversalParams {
    s: Intersection,
    max_depth: Option<usize>,
}

impl TraversalParams {
    /// Creates traversal parameters. `max_depth = None` leaves the search
    /// unbounded; `Some(0)` only ever visits the start hyperedge.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvalidParameter`] when `s` is zero.
    pub fn new(s: usize, max_depth: Option<usize>) -> Result<Self> {
        Ok(Self {
            s: Intersection::new(s)?,
            max_depth,
        })
    }

    /// Unbounded traversal at threshold `s`.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvalidParameter`] when `s` is zero.
    pub fn unbounded(s: usize) -> Result<Self> {
        Self::new(s, None)
    }

    /// Returns the minimum intersection size.
    #[must_use]
    #[rustfmt::skip]
    pub const fn s(&self) -> usize { self.s.get() }

    /// Returns the depth bound, if any.
    #[must_use]
    #[rustfmt::skip]
    pub const fn max_depth(&self) -> Option<usize> { self.max_depth }

    pub(crate) const fn threshold(&self) -> Intersection {
        self.s
    }

    /// Same threshold, depth bound reduced by `consumed` hops.
    pub(crate) fn shortened(self, consumed: usize) -> Self {
        Self {
            s: self.s,
            max_depth: self
                .max_depth
                .map(|depth| depth.saturating_sub(consumed)),
        }
    }
}

/// Parameters for a K-shortest path query.
///
/// # Examples
/// ```
/// use hyperpath_core::PathParams;
///
/// let params = PathParams::new(3, 1, Some(10))?;
/// assert_eq!(params.k(), 3);
/// assert_eq!(params.traversal().s(), 1);
/// assert!(PathParams::new(0, 1, None).is_err());
/// # Ok::<(), hyperpath_core::HyperpathError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathParams {
    traversal: TraversalParams,
    k: NonZeroUsize,
}

impl PathParams {
    /// Creates K-shortest path parameters.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvalidParameter`] when `k` or `s` is zero.
    pub fn new(k: usize, s: usize, max_depth: Option<usize>) -> Result<Self> {
        let k = NonZeroUsize::new(k).ok_or(HyperpathError::InvalidParameter {
            parameter: "k",
            value: k,
            expected: "k >= 1",
        })?;
        Ok(Self {
            traversal: TraversalParams::new(s, max_depth)?,
            k,
        })
    }

    /// Returns the number of paths requested.
    #[must_use]
    #[rustfmt::skip]
    pub const fn k(&self) -> usize { self.k.get() }

    /// Returns the traversal parameters shared by every sub-search.
    #[must_use]
    #[rustfmt::skip]
    pub const fn traversal(&self) -> TraversalParams { self.traversal }
}
