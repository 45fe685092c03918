use hyperpath_core::{Hyperedge, Hyperpath, HyperpathBuilder};

/// A four-link chain plus one unrelated triple:
/// `h0 = {a, b, c}`, `h1 = {b, c, d}`, `h2 = {c, d, e}`, `h3 = {d, e, f}`,
/// `h4 = {x, y, z}`.
#[must_use]
pub fn chain_engine() -> Hyperpath {
    HyperpathBuilder::new()
        .with_hyperedges([
            Hyperedge::from_entities("h0", ["a", "b", "c"]),
            Hyperedge::from_entities("h1", ["b", "c", "d"]),
            Hyperedge::from_entities("h2", ["c", "d", "e"]),
            Hyperedge::from_entities("h3", ["d", "e", "f"]),
            Hyperedge::from_entities("h4", ["x", "y", "z"]),
        ])
        .build()
        .expect("chain fixture is valid")
}
