//! s-connected component analysis.

use std::collections::BTreeSet;

use crate::{
    error::Result,
    hypergraph::Hypergraph,
    params::{Intersection, TraversalParams},
    traversal::{Restrictions, breadth_first},
};

/// Headline numbers of a component decomposition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentSummary {
    /// Threshold the decomposition was computed under.
    pub s: usize,
    /// Number of components.
    pub component_count: usize,
    /// Size of the largest component, zero for an empty store.
    pub largest_component_size: usize,
    /// Sizes of the largest components, descending.
    pub top_sizes: Vec<usize>,
}

impl Hypergraph {
    /// Partitions the store into maximal s-connected sets of positions.
    ///
    /// Components are ordered by descending size; equally sized components
    /// keep the order of their smallest member.
    ///
    /// # Errors
    /// Returns [`crate::HyperpathError::InvalidParameter`] when `s` is zero.
    ///
    /// # Examples
    /// ```
    /// use hyperpath_core::{Hyperedge, Hypergraph};
    ///
    /// let graph = Hypergraph::from_hyperedges([
    ///     Hyperedge::from_entities("h0", ["a", "b"]),
    ///     Hyperedge::from_entities("h1", ["x", "y"]),
    ///     Hyperedge::from_entities("h2", ["b", "c"]),
    /// ])?;
    /// let components = graph.connected_components(1)?;
    /// assert_eq!(components.len(), 2);
    /// assert_eq!(components[0].iter().copied().collect::<Vec<_>>(), [0, 2]);
    /// # Ok::<(), hyperpath_core::HyperpathError>(())
    /// ```
    pub fn connected_components(&self, s: usize) -> Result<Vec<BTreeSet<usize>>> {
        let params = TraversalParams::unbounded(s)?;
        let mut claimed = vec![false; self.len()];
        let mut components = Vec::new();
        for start in 0..self.len() {
            if claimed.get(start).copied().unwrap_or(true) {
                continue;
            }
            let component = breadth_first(self, start, None, params, &Restrictions::default()).reached;
            for &member in &component {
                if let Some(slot) = claimed.get_mut(member) {
                    *slot = true;
                }
            }
            components.push(component);
        }
        // Stable sort keeps discovery order, which is smallest-member order.
        components.sort_by(|left, right| right.len().cmp(&left.len()));
        Ok(components)
    }

    /// Summarises [`Self::connected_components`], listing at most `top`
    /// component sizes.
    ///
    /// # Errors
    /// Returns [`crate::HyperpathError::InvalidParameter`] when `s` is zero.
    pub fn component_summary(&self, s: usize, top: usize) -> Result<ComponentSummary> {
        let components = self.connected_components(s)?;
        Ok(ComponentSummary {
            s,
            component_count: components.len(),
            largest_component_size: components.first().map_or(0, BTreeSet::len),
            top_sizes: components.iter().take(top).map(BTreeSet::len).collect(),
        })
    }

    /// Positions of hyperedges that share no entity with any other hyperedge.
    #[must_use]
    pub fn isolated_hyperedges(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&position| self.adjacent(position, Intersection::ONE).next().is_none())
            .collect()
    }
}
