//! Power-law fit of the entity degree distribution.

use crate::hypergraph::Hypergraph;

const EPSILON: f64 = 1e-10;

/// Least-squares fit of `log10(frequency)` against `log10(degree)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerLawFit {
    /// Absolute value of the fitted slope.
    pub exponent: f64,
    /// Coefficient of determination of the fit.
    pub r_squared: f64,
}

impl Hypergraph {
    /// Fits a power law to [`Self::degree_distribution`].
    ///
    /// Returns `None` when fewer than two distinct degrees are present.
    /// Near-zero variances are guarded with a small epsilon instead of
    /// failing.
    ///
    /// # Examples
    /// ```
    /// use hyperpath_core::{Hyperedge, Hypergraph};
    ///
    /// let graph = Hypergraph::from_hyperedges([
    ///     Hyperedge::from_entities("h0", ["hub", "a"]),
    ///     Hyperedge::from_entities("h1", ["hub", "b"]),
    /// ])?;
    /// let fit = graph.power_law_fit().expect("two degree classes");
    /// assert!(fit.exponent > 0.0);
    /// assert!(Hypergraph::new().power_law_fit().is_none());
    /// # Ok::<(), hyperpath_core::HyperpathError>(())
    /// ```
    #[must_use]
    pub fn power_law_fit(&self) -> Option<PowerLawFit> {
        let points: Vec<(f64, f64)> = self
            .degree_distribution()
            .into_iter()
            .filter(|&(degree, count)| degree > 0 && count > 0)
            .map(|(degree, count)| ((degree as f64).log10(), (count as f64).log10()))
            .collect();
        fit(&points)
    }
}

fn fit(points: &[(f64, f64)]) -> Option<PowerLawFit> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let (sum_x, sum_y, sum_xy, sum_xx) = points.iter().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sxx), &(x, y)| (sx + x, sy + y, sxy + x * y, sxx + x * x),
    );
    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x + EPSILON);
    let intercept = (sum_y - slope * sum_x) / n;

    let mean_y = sum_y / n;
    let (ss_tot, ss_res) = points.iter().fold((0.0, 0.0), |(tot, res), &(x, y)| {
        let predicted = slope * x + intercept;
        (tot + (y - mean_y).powi(2), res + (y - predicted).powi(2))
    });
    Some(PowerLawFit {
        exponent: slope.abs(),
        r_squared: 1.0 - ss_res / (ss_tot + EPSILON),
    })
}
