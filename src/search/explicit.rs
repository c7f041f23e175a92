//! The base search driver: one bidomain per live label class, an explicit
//! `is_adjacent` flag gating connected search below the root, and a single
//! shared suppression set `X` threaded through the whole recursion.

use crate::bidomain::{self, Bidomain};
use crate::graph::Graph;

use super::{AbortFlag, SearchStats, VtxPair};

pub(crate) fn search<F>(
    g0: &Graph,
    g1: &Graph,
    connected: bool,
    abort: &AbortFlag,
    on_solution: &mut F,
) -> SearchStats
where
    F: FnMut(&[VtxPair]),
{
    let (mut left, mut right, mut domains) = bidomain::initial_bidomains(g0, g1);
    let mut x = vec![false; g0.node_count()];
    let mut mapping = Vec::new();
    let mut stats = SearchStats::default();

    solve(
        g0,
        g1,
        connected,
        abort,
        on_solution,
        &mut stats,
        &mut mapping,
        &mut domains,
        &mut left,
        &mut right,
        &mut x,
    );

    stats
}

#[allow(clippy::too_many_arguments)]
fn solve<F>(
    g0: &Graph,
    g1: &Graph,
    connected: bool,
    abort: &AbortFlag,
    on_solution: &mut F,
    stats: &mut SearchStats,
    mapping: &mut Vec<VtxPair>,
    domains: &mut Vec<Bidomain>,
    left: &mut [usize],
    right: &mut [usize],
    x: &mut [bool],
) where
    F: FnMut(&[VtxPair]),
{
    if abort.is_set() {
        return;
    }
    stats.nodes += 1;

    let idx = match bidomain::select(domains, mapping.len(), connected) {
        Some(idx) => idx,
        None => {
            if bidomain::is_maximal(domains, connected) {
                stats.solutions += 1;
                on_solution(mapping);
            }
            return;
        }
    };

    let v = bidomain::select_left_vertex(&mut domains[idx], left, x);

    let mut prev_w = None;
    while let Some(w_idx) = bidomain::next_right_candidate(&domains[idx], right, prev_w) {
        let w = right[w_idx];
        let last = domains[idx].r_end - 1;
        right.swap(w_idx, last);
        domains[idx].r_end -= 1;

        let mut refined = bidomain::filter_domains(domains, left, right, v, w, g0, g1, x);

        mapping.push(VtxPair { v, w });
        solve(
            g0,
            g1,
            connected,
            abort,
            on_solution,
            stats,
            mapping,
            &mut refined,
            left,
            right,
            x,
        );
        mapping.pop();

        domains[idx].r_end += 1;
        prev_w = Some(w);
    }

    domains[idx].l_end += 1;

    x[v] = true;
    domains[idx].x_count += 1;
    solve(
        g0, g1, connected, abort, on_solution, stats, mapping, domains, left, right, x,
    );
    x[v] = false;
    domains[idx].x_count -= 1;
}
