//! The connectivity-forced driver: only ever carries bidomains adjacent to
//! the pair mapped one level up. At each step the carried-over bidomains are
//! refined by adjacency to the newly mapped pair (the same
//! [`bidomain::filter_domains`] operation the explicit driver uses), and any
//! vertices not already accounted for in those refined bidomains are folded
//! in as additional bidomains discovered by walking G0/G1 neighbour lists.
//!
//! Grounded on the "using-sets" variant of the source algorithm, which
//! tracks two per-side boolean vectors (`D_G`/`D_H` here) of vertices not
//! currently mapped and not currently claimed by any live bidomain, and
//! calls `filter_domains(domains, ...)` followed by
//! `add_adjacent_label_classes(new_domains, ...)` on every recursive step,
//! clearing `D_G`/`D_H` for every vertex it folds in and restoring them once
//! that branch is done being explored.

use std::collections::BTreeMap;

use crate::bidomain::{self, Bidomain};
use crate::graph::Graph;

use super::{AbortFlag, SearchStats, VtxPair};

pub(crate) fn search<F>(g0: &Graph, g1: &Graph, abort: &AbortFlag, on_solution: &mut F) -> SearchStats
where
    F: FnMut(&[VtxPair]),
{
    let (mut left, mut right, mut domains) = bidomain::initial_bidomains(g0, g1);
    let mut x = vec![false; g0.node_count()];
    let mut d_g = vec![true; g0.node_count()];
    let mut d_h = vec![true; g1.node_count()];
    let mut mapping = Vec::new();
    let mut stats = SearchStats::default();

    solve(
        g0,
        g1,
        abort,
        on_solution,
        &mut stats,
        &mut mapping,
        &mut domains,
        &mut left,
        &mut right,
        &mut x,
        &mut d_g,
        &mut d_h,
        0,
    );

    stats
}

/// Builds fresh label-partitioned bidomains from the vertices adjacent to
/// `v` (in G0) and `w` (in G1) that no live bidomain has already claimed.
///
/// Every visited neighbour still marked available in `d_g`/`d_h` is claimed
/// (flipped false) immediately, whether or not its label class turns out to
/// have a matching counterpart on the other side — mirroring the source's
/// unconditional `D_G[u] = false` inside the collection loop. The caller
/// restores exactly the vertices named in the two touched-vertex lists once
/// this branch of the search is done, regardless of which labels survived
/// into `domains`.
fn add_adjacent_label_classes(
    v: usize,
    w: usize,
    g0: &Graph,
    g1: &Graph,
    d_g: &mut [bool],
    d_h: &mut [bool],
) -> (Vec<usize>, Vec<usize>, Vec<Bidomain>, Vec<usize>, Vec<usize>) {
    let mut by_label: BTreeMap<u32, (Vec<usize>, Vec<usize>)> = BTreeMap::new();
    let mut touched_left = Vec::new();
    let mut touched_right = Vec::new();

    for &u in g0.neighbors(v) {
        if d_g[u] {
            d_g[u] = false;
            touched_left.push(u);
            by_label.entry(g0.label(u)).or_default().0.push(u);
        }
    }
    for &u in g1.neighbors(w) {
        if d_h[u] {
            d_h[u] = false;
            touched_right.push(u);
            by_label.entry(g1.label(u)).or_default().1.push(u);
        }
    }

    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut domains = Vec::new();

    for (_, (mut ls, mut rs)) in by_label {
        if ls.is_empty() || rs.is_empty() {
            continue;
        }
        ls.sort_unstable();
        rs.sort_unstable();

        let l_start = left.len();
        left.extend(ls);
        let l_end = left.len();

        let r_start = right.len();
        right.extend(rs);
        let r_end = right.len();

        domains.push(Bidomain {
            l_start,
            l_end,
            r_start,
            r_end,
            is_adjacent: true,
            x_count: 0,
        });
    }

    (left, right, domains, touched_left, touched_right)
}

/// Copies `refined`'s member vertices into a fresh buffer pair, then appends
/// the freshly discovered `add_left`/`add_right` vertices after them,
/// producing one combined buffer and domain list for the child frame.
fn merge_domains(
    refined: &[Bidomain],
    left: &[usize],
    right: &[usize],
    add_left: Vec<usize>,
    add_right: Vec<usize>,
    add_domains: Vec<Bidomain>,
) -> (Vec<usize>, Vec<usize>, Vec<Bidomain>) {
    let mut n_left = Vec::new();
    let mut n_right = Vec::new();
    let mut domains = Vec::with_capacity(refined.len() + add_domains.len());

    for bd in refined {
        let l_start = n_left.len();
        n_left.extend_from_slice(&left[bd.l_start..bd.l_end]);
        let l_end = n_left.len();

        let r_start = n_right.len();
        n_right.extend_from_slice(&right[bd.r_start..bd.r_end]);
        let r_end = n_right.len();

        domains.push(Bidomain {
            l_start,
            l_end,
            r_start,
            r_end,
            is_adjacent: bd.is_adjacent,
            x_count: bd.x_count,
        });
    }

    let l_offset = n_left.len();
    let r_offset = n_right.len();
    n_left.extend(add_left);
    n_right.extend(add_right);
    for bd in add_domains {
        domains.push(Bidomain {
            l_start: bd.l_start + l_offset,
            l_end: bd.l_end + l_offset,
            r_start: bd.r_start + r_offset,
            r_end: bd.r_end + r_offset,
            is_adjacent: bd.is_adjacent,
            x_count: bd.x_count,
        });
    }

    (n_left, n_right, domains)
}

#[allow(clippy::too_many_arguments)]
fn solve<F>(
    g0: &Graph,
    g1: &Graph,
    abort: &AbortFlag,
    on_solution: &mut F,
    stats: &mut SearchStats,
    mapping: &mut Vec<VtxPair>,
    domains: &mut Vec<Bidomain>,
    left: &mut [usize],
    right: &mut [usize],
    x: &mut [bool],
    d_g: &mut [bool],
    d_h: &mut [bool],
    depth: usize,
) where
    F: FnMut(&[VtxPair]),
{
    if abort.is_set() {
        return;
    }
    stats.nodes += 1;

    let idx = match bidomain::select(domains, depth, true) {
        Some(idx) => idx,
        None => {
            if bidomain::is_maximal(domains, true) {
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

        let refined = bidomain::filter_domains(domains, left, right, v, w, g0, g1, x);

        d_g[v] = false;
        d_h[w] = false;
        for bd in &refined {
            for &u in &left[bd.l_start..bd.l_end] {
                d_g[u] = false;
            }
            for &u in &right[bd.r_start..bd.r_end] {
                d_h[u] = false;
            }
        }

        let (add_left, add_right, add_domains, touched_left, touched_right) =
            add_adjacent_label_classes(v, w, g0, g1, d_g, d_h);

        let (mut n_left, mut n_right, mut new_domains) =
            merge_domains(&refined, left, right, add_left, add_right, add_domains);

        mapping.push(VtxPair { v, w });
        solve(
            g0,
            g1,
            abort,
            on_solution,
            stats,
            mapping,
            &mut new_domains,
            &mut n_left,
            &mut n_right,
            x,
            d_g,
            d_h,
            depth + 1,
        );
        mapping.pop();

        for bd in &refined {
            for &u in &left[bd.l_start..bd.l_end] {
                d_g[u] = true;
            }
            for &u in &right[bd.r_start..bd.r_end] {
                d_h[u] = true;
            }
        }
        for u in touched_left {
            d_g[u] = true;
        }
        for u in touched_right {
            d_h[u] = true;
        }
        d_g[v] = true;
        d_h[w] = true;

        domains[idx].r_end += 1;
        prev_w = Some(w);
    }

    domains[idx].l_end += 1;

    x[v] = true;
    domains[idx].x_count += 1;
    solve(
        g0, g1, abort, on_solution, stats, mapping, domains, left, right, x, d_g, d_h, depth,
    );
    x[v] = false;
    domains[idx].x_count -= 1;
}
