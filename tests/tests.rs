use std::collections::HashSet;

use mcis::config::{Config, Driver};
use mcis::graph::Graph;
use mcis::search::{self, AbortFlag, VtxPair};

fn graph(input: &str) -> Graph {
    input.parse().unwrap()
}

fn solve(g0: &Graph, g1: &Graph, config: &Config) -> (u64, u64, Vec<Vec<VtxPair>>) {
    let abort = AbortFlag::new();
    let mut emitted = Vec::new();
    let stats = search::run(g0, g1, config, &abort, |mapping| emitted.push(mapping.to_vec()));
    (stats.solutions, stats.nodes, emitted)
}

fn as_set(mapping: &[VtxPair]) -> HashSet<(usize, usize)> {
    mapping.iter().map(|p| (p.v, p.w)).collect()
}

/// P6: no (v, w) outside the mapping could be added while preserving label
/// and edge agreement with every pair already in it.
fn assert_maximal(g0: &Graph, g1: &Graph, mapping: &[VtxPair]) {
    let mapped_v: HashSet<usize> = mapping.iter().map(|p| p.v).collect();
    let mapped_w: HashSet<usize> = mapping.iter().map(|p| p.w).collect();

    for v in 0..g0.node_count() {
        if mapped_v.contains(&v) {
            continue;
        }
        for w in 0..g1.node_count() {
            if mapped_w.contains(&w) || g0.label(v) != g1.label(w) {
                continue;
            }
            let extendable = mapping
                .iter()
                .all(|p| g0.adjacent(v, p.v) == g1.adjacent(w, p.w));
            assert!(
                !extendable,
                "mapping {mapping:?} is not maximal: ({v}, {w}) could be added"
            );
        }
    }
}

#[test]
fn s1_two_disjoint_edges() {
    let g0 = graph("2 1\n0 0\n0 1\n");
    let g1 = graph("2 1\n0 0\n0 1\n");

    let (solutions, _, emitted) = solve(&g0, &g1, &Config::default());

    assert_eq!(solutions, 2);
    let sets: HashSet<_> = emitted.iter().map(|m| as_set(m)).collect();
    assert!(sets.contains(&HashSet::from([(0, 0), (1, 1)])));
    assert!(sets.contains(&HashSet::from([(0, 1), (1, 0)])));
}

#[test]
fn s2_self_loop_distinguishes() {
    let g0 = graph("1 1\n0\n0 0\n");
    let g1 = graph("1 0\n0\n");

    let (solutions, _, _) = solve(&g0, &g1, &Config::default());
    assert_eq!(solutions, 0);
}

#[test]
fn s3_triangle_vs_path_has_six_maximals() {
    let g0 = graph("3 3\n0 0 0\n0 1\n1 2\n0 2\n");
    let g1 = graph("3 2\n0 0 0\n0 1\n1 2\n");

    let unconnected = solve(&g0, &g1, &Config::default());
    assert_eq!(unconnected.0, 6);
    for mapping in &unconnected.2 {
        assert_eq!(mapping.len(), 2);
        assert_maximal(&g0, &g1, mapping);
    }

    let connected = solve(&g0, &g1, &Config::from(Driver::Explicit).also_connected());
    assert_eq!(connected.0, 6);
}

#[test]
fn s4_empty_label_intersection() {
    let g0 = graph("2 0\n1 2\n");
    let g1 = graph("2 0\n3 4\n");

    let (solutions, _, _) = solve(&g0, &g1, &Config::default());
    assert_eq!(solutions, 0);

    let (solutions, _, _) = solve(&g0, &g1, &Config::default().also_connected());
    assert_eq!(solutions, 0);
}

#[test]
fn s5_two_components_connected_flag_limits_to_size_two() {
    let g0 = graph("4 2\n0 0 0 0\n0 1\n2 3\n");
    let g1 = graph("4 2\n0 0 0 0\n0 1\n2 3\n");

    let unconnected = solve(&g0, &g1, &Config::default());
    assert!(unconnected.2.iter().any(|m| m.len() == 4));

    let connected = solve(&g0, &g1, &Config::default().also_connected());
    assert!(connected.2.iter().all(|m| m.len() == 2));
    assert!(!connected.2.is_empty());
}

#[test]
fn s6_abort_flag_stops_enumeration_early() {
    let g0 = graph("4 2\n0 0 0 0\n0 1\n2 3\n");
    let g1 = graph("4 2\n0 0 0 0\n0 1\n2 3\n");

    let abort = AbortFlag::new();
    let mut seen = 0usize;
    let stats = search::run(&g0, &g1, &Config::default(), &abort, |_| {
        seen += 1;
        abort.set();
    });

    assert_eq!(seen, 1);
    assert_eq!(stats.solutions, 1);
}

#[test]
fn p1_p2_p3_every_emitted_mapping_is_injective_and_agrees_on_labels_and_edges() {
    let g0 = graph("3 3\n0 0 0\n0 1\n1 2\n0 2\n");
    let g1 = graph("3 2\n0 0 0\n0 1\n1 2\n");

    let (_, _, emitted) = solve(&g0, &g1, &Config::default());

    for mapping in &emitted {
        let vs: HashSet<_> = mapping.iter().map(|p| p.v).collect();
        let ws: HashSet<_> = mapping.iter().map(|p| p.w).collect();
        assert_eq!(vs.len(), mapping.len(), "v-side must be injective");
        assert_eq!(ws.len(), mapping.len(), "w-side must be injective");

        for pair in mapping {
            assert_eq!(g0.label(pair.v) & !mcis::graph::SELF_LOOP_BIT, g1.label(pair.w) & !mcis::graph::SELF_LOOP_BIT);
        }
        for a in mapping {
            for b in mapping {
                if a.v != b.v {
                    assert_eq!(g0.adjacent(a.v, b.v), g1.adjacent(a.w, b.w));
                }
            }
        }
    }
}

#[test]
fn p8_no_duplicate_mappings_are_emitted() {
    let g0 = graph("3 3\n0 0 0\n0 1\n1 2\n0 2\n");
    let g1 = graph("3 2\n0 0 0\n0 1\n1 2\n");

    let (_, _, emitted) = solve(&g0, &g1, &Config::default());
    let sets: HashSet<_> = emitted.iter().map(|m| {
        let mut v: Vec<_> = as_set(m).into_iter().collect();
        v.sort_unstable();
        v
    }).collect();

    assert_eq!(sets.len(), emitted.len());
}

#[test]
fn p9_determinism_across_repeated_runs() {
    let g0 = graph("4 2\n0 0 0 0\n0 1\n2 3\n");
    let g1 = graph("4 2\n0 0 0 0\n0 1\n2 3\n");

    let first = solve(&g0, &g1, &Config::default());
    let second = solve(&g0, &g1, &Config::default());

    assert_eq!(first.0, second.0);
    assert_eq!(first.2, second.2);
}

#[test]
fn p10_explicit_and_implicit_drivers_agree_on_connected_solution_multiset() {
    let g0 = graph("3 3\n0 0 0\n0 1\n1 2\n0 2\n");
    let g1 = graph("3 2\n0 0 0\n0 1\n1 2\n");

    let explicit = solve(&g0, &g1, &Config::default().also_connected());
    let implicit = solve(
        &g0,
        &g1,
        &Config::new(Driver::Implicit, true, false, false, 0),
    );

    assert_eq!(explicit.0, implicit.0);

    let mut explicit_sets: Vec<_> = explicit.2.iter().map(|m| as_set(m)).collect();
    let mut implicit_sets: Vec<_> = implicit.2.iter().map(|m| as_set(m)).collect();
    let key = |s: &HashSet<(usize, usize)>| {
        let mut v: Vec<_> = s.iter().copied().collect();
        v.sort_unstable();
        v
    };
    explicit_sets.sort_by_key(|s| key(s));
    implicit_sets.sort_by_key(|s| key(s));
    assert_eq!(explicit_sets, implicit_sets);
}

/// Regression for a label class with two members (2, 3; not adjacent to
/// each other) that both hang off a single already-mapped frontier vertex
/// (1). Committing through vertex 2 must not make the implicit driver lose
/// track of vertex 3: it is still adjacent to the mapped vertex 1, so the
/// size-4 mapping is reachable and both drivers must agree it's the only
/// maximal one.
#[test]
fn p10_implicit_keeps_a_sibling_label_class_member_after_committing_its_twin() {
    let g0 = graph("4 3\n0 1 2 2\n0 1\n1 2\n1 3\n");
    let g1 = graph("4 3\n0 1 2 2\n0 1\n1 2\n1 3\n");

    let explicit = solve(&g0, &g1, &Config::default().also_connected());
    let implicit = solve(
        &g0,
        &g1,
        &Config::new(Driver::Implicit, true, false, false, 0),
    );

    assert_eq!(explicit.0, implicit.0);
    assert!(explicit.2.iter().all(|m| m.len() == 4));
    assert!(implicit.2.iter().all(|m| m.len() == 4));

    let mut explicit_sets: Vec<_> = explicit.2.iter().map(|m| as_set(m)).collect();
    let mut implicit_sets: Vec<_> = implicit.2.iter().map(|m| as_set(m)).collect();
    let key = |s: &HashSet<(usize, usize)>| {
        let mut v: Vec<_> = s.iter().copied().collect();
        v.sort_unstable();
        v
    };
    explicit_sets.sort_by_key(|s| key(s));
    implicit_sets.sort_by_key(|s| key(s));
    assert_eq!(explicit_sets, implicit_sets);
}

trait ConfigExt {
    fn also_connected(self) -> Config;
}

impl ConfigExt for Config {
    fn also_connected(self) -> Config {
        Config { connected: true, ..self }
    }
}
