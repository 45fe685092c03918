//! Property-based tests for adjacency, traversal, and component analysis.
//!
//! Generated hypergraphs are checked against brute-force oracles that compare
//! hyperedges pairwise, independent of the entity index.

mod oracle;
mod paths;
mod strategies;
mod structural;
mod types;
