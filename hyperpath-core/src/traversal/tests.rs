use rstest::rstest;

use super::*;
use crate::{
    error::HyperpathError,
    params::PathParams,
    test_utils::{chain_graph, with_isolated},
};

fn traversal(s: usize, max_depth: Option<usize>) -> TraversalParams {
    TraversalParams::new(s, max_depth).expect("test parameters are valid")
}

fn positions(paths: &[HyperPath]) -> Vec<Vec<usize>> {
    paths.iter().map(|path| path.positions().to_vec()).collect()
}

#[rstest]
#[case::strict_chain(2, None, Some(vec![0, 1, 2, 3]))]
#[case::loose_chain(1, None, Some(vec![0, 1, 3]))]
#[case::depth_too_short(2, Some(2), None)]
#[case::depth_exact(2, Some(3), Some(vec![0, 1, 2, 3]))]
#[case::threshold_too_high(3, None, None)]
fn shortest_path_across_chain(
    #[case] s: usize,
    #[case] max_depth: Option<usize>,
    #[case] expected: Option<Vec<usize>>,
) {
    let graph = chain_graph();
    let path = graph
        .shortest_path(0, 3, traversal(s, max_depth))
        .expect("positions are known");
    assert_eq!(path.map(|path| path.positions().to_vec()), expected);
}

#[test]
fn start_equal_to_target_is_a_single_hyperedge_path() {
    let graph = chain_graph();
    let path = graph
        .shortest_path(2, 2, traversal(1, Some(0)))
        .expect("positions are known")
        .expect("start reaches itself");
    assert_eq!(path.positions(), [2]);
    assert_eq!(path.hops(), 0);
}

#[test]
fn disconnected_hyperedge_is_unreachable() {
    let graph = with_isolated(chain_graph());
    let path = graph
        .shortest_path(0, 4, traversal(1, None))
        .expect("positions are known");
    assert!(path.is_none());
    let paths = graph
        .k_shortest_paths(0, 4, PathParams::new(3, 1, None).expect("valid"))
        .expect("positions are known");
    assert!(paths.is_empty());
}

#[rstest]
#[case::unbounded(None, vec![0, 1, 2, 3])]
#[case::one_hop(Some(1), vec![0, 1])]
#[case::no_hops(Some(0), vec![0])]
fn reachable_set_honours_depth(#[case] max_depth: Option<usize>, #[case] expected: Vec<usize>) {
    let graph = with_isolated(chain_graph());
    let reached = graph
        .reachable_set(0, traversal(2, max_depth))
        .expect("start is known");
    assert_eq!(reached.into_iter().collect::<Vec<_>>(), expected);
}

#[test]
fn unknown_positions_are_rejected() {
    let graph = chain_graph();
    let err = graph
        .shortest_path(0, 17, traversal(1, None))
        .expect_err("target is unknown");
    assert_eq!(err, HyperpathError::UnknownPosition { position: 17, len: 4 });
    let err = graph
        .reachable_set(8, traversal(1, None))
        .expect_err("start is unknown");
    assert!(matches!(err, HyperpathError::UnknownPosition { position: 8, .. }));
}

#[test]
fn k_shortest_enumerates_every_loopless_path() {
    let graph = chain_graph();
    let paths = graph
        .k_shortest_paths(0, 3, PathParams::new(10, 1, None).expect("valid"))
        .expect("positions are known");
    assert_eq!(
        positions(&paths),
        vec![vec![0, 1, 3], vec![0, 2, 3], vec![0, 1, 2, 3], vec![0, 2, 1, 3]]
    );
    assert!(paths.iter().all(|path| path.is_valid_in(&graph)));
}

#[rstest]
#[case::single(1, vec![vec![0, 1, 3]])]
#[case::pair(2, vec![vec![0, 1, 3], vec![0, 2, 3]])]
#[case::three(3, vec![vec![0, 1, 3], vec![0, 2, 3], vec![0, 1, 2, 3]])]
fn k_shortest_truncates_to_k(#[case] k: usize, #[case] expected: Vec<Vec<usize>>) {
    let graph = chain_graph();
    let paths = graph
        .k_shortest_paths(0, 3, PathParams::new(k, 1, None).expect("valid"))
        .expect("positions are known");
    assert_eq!(positions(&paths), expected);
}

#[test]
fn k_shortest_respects_threshold() {
    let graph = chain_graph();
    let paths = graph
        .k_shortest_paths(0, 3, PathParams::new(3, 2, None).expect("valid"))
        .expect("positions are known");
    assert_eq!(positions(&paths), vec![vec![0, 1, 2, 3]]);
    assert!(paths.iter().all(|path| path.s() == 2));
}

#[test]
fn k_shortest_respects_depth_bound() {
    let graph = chain_graph();
    let paths = graph
        .k_shortest_paths(0, 3, PathParams::new(10, 1, Some(2)).expect("valid"))
        .expect("positions are known");
    assert_eq!(positions(&paths), vec![vec![0, 1, 3], vec![0, 2, 3]]);
}

#[test]
fn entity_paths_connect_hyperedges_by_their_entities() {
    let graph = chain_graph();
    let paths = graph
        .entity_paths("a", "f", PathParams::new(2, 2, None).expect("valid"))
        .expect("search succeeds");
    assert_eq!(positions(&paths), vec![vec![0, 1, 2, 3]]);

    let shared = graph
        .entity_paths("c", "c", PathParams::new(2, 1, None).expect("valid"))
        .expect("search succeeds");
    assert_eq!(positions(&shared), vec![vec![0], vec![1]]);

    let unknown = graph
        .entity_paths("a", "missing", PathParams::new(2, 1, None).expect("valid"))
        .expect("search succeeds");
    assert!(unknown.is_empty());
}

#[test]
fn restricted_search_skips_excluded_transitions() {
    let graph = chain_graph();
    let mut restrictions = Restrictions::default();
    restrictions.exclude_transition(0, 1);
    let frontier = breadth_first(&graph, 0, Some(3), traversal(1, None), &restrictions);
    assert_eq!(frontier.found, Some(vec![0, 2, 3]));

    restrictions.exclude_position(2);
    let frontier = breadth_first(&graph, 0, Some(3), traversal(1, None), &restrictions);
    assert_eq!(frontier.found, None);
}

#[test]
fn paths_order_by_length_then_positions() {
    let short = HyperPath::new_unchecked(vec![5, 9], 1);
    let long = HyperPath::new_unchecked(vec![0, 1, 2], 1);
    let long_later = HyperPath::new_unchecked(vec![0, 2, 1], 1);
    let mut paths = vec![long_later.clone(), long.clone(), short.clone()];
    paths.sort();
    assert_eq!(paths, vec![short, long, long_later]);
}
