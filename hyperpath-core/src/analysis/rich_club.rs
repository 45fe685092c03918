//! Rich-club coefficients.

use std::collections::{BTreeMap, HashMap};

use crate::hypergraph::Hypergraph;

/// Degree thresholds reported when the caller does not choose any.
pub const DEFAULT_RICH_CLUB_THRESHOLDS: [usize; 4] = [10, 20, 50, 100];

impl Hypergraph {
    /// Rich-club coefficient for each threshold `t`.
    ///
    /// The rich set holds the entities of degree at least `t`. The
    /// coefficient is the number of rich pairs co-occurring per hyperedge,
    /// summed over hyperedges, divided by the number of possible rich pairs.
    /// Thresholds with fewer than two rich entities are omitted.
    ///
    /// # Examples
    /// ```
    /// use hyperpath_core::{Hyperedge, Hypergraph};
    ///
    /// let graph = Hypergraph::from_hyperedges([
    ///     Hyperedge::from_entities("h0", ["a", "b", "c"]),
    ///     Hyperedge::from_entities("h1", ["b", "c", "d"]),
    /// ])?;
    /// let coefficients = graph.rich_club(&[2, 3]);
    /// assert_eq!(coefficients.get(&2), Some(&2.0));
    /// assert!(!coefficients.contains_key(&3));
    /// # Ok::<(), hyperpath_core::HyperpathError>(())
    /// ```
    #[must_use]
    pub fn rich_club(&self, thresholds: &[usize]) -> BTreeMap<usize, f64> {
        let mut coefficients = BTreeMap::new();
        for &threshold in thresholds {
            let rich: Vec<&[usize]> = self
                .index()
                .iter()
                .map(|(_, positions)| positions)
                .filter(|positions| positions.len() >= threshold)
                .collect();
            if rich.len() < 2 {
                continue;
            }

            let mut members_per_hyperedge: HashMap<usize, usize> = HashMap::new();
            for &position in rich.iter().copied().flatten() {
                *members_per_hyperedge.entry(position).or_insert(0) += 1;
            }
            let linked: usize = members_per_hyperedge
                .values()
                .map(|&members| members * members.saturating_sub(1) / 2)
                .sum();
            let possible = rich.len() * (rich.len() - 1) / 2;
            coefficients.insert(threshold, linked as f64 / possible as f64);
        }
        coefficients
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::rstest;

    use crate::test_utils::chain_graph;

    #[rstest]
    #[case::degree_three(3, Some(2.0))]
    #[case::degree_two(2, Some(8.0 / 6.0))]
    #[case::too_strict(4, None)]
    fn chain_rich_club(#[case] threshold: usize, #[case] expected: Option<f64>) {
        let coefficients = chain_graph().rich_club(&[threshold]);
        match expected {
            Some(value) => {
                let actual = coefficients.get(&threshold).copied().expect("threshold kept");
                assert!((actual - value).abs() < 1e-12, "{actual} != {value}");
            }
            None => assert_eq!(coefficients, BTreeMap::new()),
        }
    }
}
