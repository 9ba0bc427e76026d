//! Properties of skeleton inference and orientation under a deterministic
//! pseudo-random oracle.

use proptest::prelude::*;

use tangle_core::graph::PagGraph;
use tangle_core::io::{read_skeleton_format, write_skeleton_format};
use tangle_core::sepsets::SepSetRegistry;
use tangle_inference::orientation::{apply_rule1, apply_rule2, apply_rule3};
use tangle_inference::{ColliderMode, PcConfig, PcEngine, SearchStrategy, StarOptions};
use test_fixtures::{complete_graph, SyntheticOracle};

fn skeleton_config(search: SearchStrategy) -> PcConfig {
    PcConfig {
        max_cond_set_size: 3,
        search,
        ..PcConfig::default()
    }
}

fn run_skeleton(
    n: usize,
    seed: u64,
    alpha: f64,
    search: SearchStrategy,
) -> (PagGraph, SepSetRegistry) {
    let mut graph = complete_graph(n);
    let mut oracle = SyntheticOracle::new(seed, alpha);
    let engine = PcEngine::new(skeleton_config(search));
    let sep_sets = engine.run_skeleton(&mut graph, &mut oracle).unwrap();
    (graph, sep_sets)
}

proptest! {
    // =========================================================================
    // Stability: identical reruns produce identical skeletons and evidence
    // =========================================================================
    #[test]
    fn stable_runs_are_reproducible(
        n in 4usize..7,
        seed in any::<u64>(),
        alpha in 0.05f64..0.5,
    ) {
        let (first_graph, first_sets) =
            run_skeleton(n, seed, alpha, SearchStrategy::Exhaustive);
        let (second_graph, second_sets) =
            run_skeleton(n, seed, alpha, SearchStrategy::Exhaustive);
        prop_assert_eq!(first_graph.list_all_links(), second_graph.list_all_links());
        prop_assert_eq!(first_sets, second_sets);
    }

    #[test]
    fn star_ranking_is_reproducible(
        n in 4usize..7,
        seed in any::<u64>(),
        alpha in 0.05f64..0.5,
    ) {
        let search = SearchStrategy::Star(StarOptions::default());
        let (first_graph, first_sets) = run_skeleton(n, seed, alpha, search);
        let (second_graph, second_sets) = run_skeleton(n, seed, alpha, search);
        prop_assert_eq!(first_graph.list_all_links(), second_graph.list_all_links());
        prop_assert_eq!(first_sets, second_sets);
    }

    // =========================================================================
    // Separating sets exist exactly for removed pairs
    // =========================================================================
    #[test]
    fn evidence_matches_removals(
        n in 4usize..7,
        seed in any::<u64>(),
        alpha in 0.05f64..0.5,
    ) {
        let (graph, sep_sets) = run_skeleton(n, seed, alpha, SearchStrategy::Exhaustive);
        for x in 0..n {
            for y in (x + 1)..n {
                if graph.has_link(x, y) {
                    prop_assert!(sep_sets.get(x, y).is_empty());
                    prop_assert!(sep_sets.get(y, x).is_empty());
                } else {
                    prop_assert!(!sep_sets.get(x, y).is_empty());
                    prop_assert!(!sep_sets.get(y, x).is_empty());
                }
            }
        }
    }

    // =========================================================================
    // Fixpoint idempotence of the orientation loop
    // =========================================================================
    #[test]
    fn orientation_fixpoint_is_idempotent(
        n in 4usize..7,
        seed in any::<u64>(),
        alpha in 0.05f64..0.5,
    ) {
        let mut graph = complete_graph(n);
        let mut oracle = SyntheticOracle::new(seed, alpha);
        let engine = PcEngine::new(skeleton_config(SearchStrategy::Exhaustive));
        engine.run(&mut graph, &mut oracle).unwrap();

        prop_assert!(!apply_rule1(&mut graph).unwrap());
        prop_assert!(!apply_rule2(&mut graph).unwrap());
        prop_assert!(!apply_rule3(&mut graph).unwrap());
    }

    // =========================================================================
    // Collider symmetry in conservative mode
    // =========================================================================
    #[test]
    fn conservative_colliders_get_both_arrowheads(
        n in 4usize..7,
        seed in any::<u64>(),
        alpha in 0.05f64..0.5,
    ) {
        let mut graph = complete_graph(n);
        let mut oracle = SyntheticOracle::new(seed, alpha);
        let engine = PcEngine::new(PcConfig {
            collider_mode: ColliderMode::Conservative,
            ..skeleton_config(SearchStrategy::Exhaustive)
        });
        let sep_sets = engine.run(&mut graph, &mut oracle).unwrap();

        for triple in graph.list_unshielded_triples() {
            let relevant = sep_sets.get(triple.left, triple.right);
            let blocked = relevant.iter().any(|set| set.contains(&triple.mid));
            if !relevant.is_empty() && !blocked {
                prop_assert!(graph.has_arrow(triple.left, triple.mid));
                prop_assert!(graph.has_arrow(triple.right, triple.mid));
            }
        }
    }

    // =========================================================================
    // Skeleton round-trip through the text format
    // =========================================================================
    #[test]
    fn skeleton_round_trips_through_text(
        n in 4usize..7,
        seed in any::<u64>(),
        alpha in 0.05f64..0.5,
    ) {
        let (graph, sep_sets) = run_skeleton(n, seed, alpha, SearchStrategy::Exhaustive);
        let mut buffer = Vec::new();
        write_skeleton_format(&graph, &sep_sets, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let (reloaded, reloaded_sets) = read_skeleton_format(&text).unwrap();

        prop_assert_eq!(reloaded.list_all_links(), graph.list_all_links());
        for x in 0..n {
            for y in 0..n {
                if x != y && !graph.has_link(x, y) {
                    prop_assert_eq!(reloaded_sets.get(x, y), sep_sets.get(x, y));
                }
            }
        }
    }
}
