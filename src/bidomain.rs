use std::collections::BTreeSet;

use crate::graph::Graph;

/// A contiguous slice of the left buffer paired with a contiguous slice of
/// the right buffer: every left vertex in `l_start..l_end` carries the same
/// label as every right vertex in `r_start..r_end`.
///
/// Buffers are never reallocated during search; a bidomain only ever shrinks
/// its bounds in place, and is restored by its owning recursion frame before
/// that frame returns.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bidomain {
    pub l_start: usize,
    pub l_end: usize,
    pub r_start: usize,
    pub r_end: usize,
    /// Whether this bidomain's candidates are adjacent (in G0/G1 respectively)
    /// to the vertex pair mapped one level up. Always `true` once produced by
    /// the "adjacent" half of `filter_domains`.
    pub is_adjacent: bool,
    /// Count of left vertices in `l_start..l_end` that are currently
    /// suppressed (`X[v] == true`).
    pub x_count: usize,
}

impl Bidomain {
    fn left_len(&self) -> usize {
        self.l_end - self.l_start
    }
}

/// Builds the initial left/right index buffers and bidomain list: one
/// bidomain per label shared by both graphs, in ascending label order.
pub(crate) fn initial_bidomains(g0: &Graph, g1: &Graph) -> (Vec<usize>, Vec<usize>, Vec<Bidomain>) {
    let labels0 = g0.labels();
    let labels1 = g1.labels();
    let shared: BTreeSet<u32> = labels0.intersection(&labels1).copied().collect();

    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut domains = Vec::with_capacity(shared.len());

    for label in shared {
        let l_start = left.len();
        left.extend(g0.vertices_with_label(label));
        let l_end = left.len();

        let r_start = right.len();
        right.extend(g1.vertices_with_label(label));
        let r_end = right.len();

        domains.push(Bidomain {
            l_start,
            l_end,
            r_start,
            r_end,
            is_adjacent: false,
            x_count: 0,
        });
    }

    (left, right, domains)
}

/// Finds the first bidomain with an unsuppressed candidate, skipping
/// non-adjacent bidomains once the connected search has descended past the
/// root (`depth > 0`).
pub(crate) fn select(domains: &[Bidomain], depth: usize, connected: bool) -> Option<usize> {
    domains.iter().position(|bd| {
        if bd.left_len() == bd.x_count {
            return false;
        }
        if connected && depth > 0 && !bd.is_adjacent {
            return false;
        }
        true
    })
}

/// Picks the first unsuppressed left vertex of `bd`, swaps it to the back of
/// the bidomain's left range and shrinks `l_end` past it.
pub(crate) fn select_left_vertex(bd: &mut Bidomain, left: &mut [usize], x: &[bool]) -> usize {
    let mut i = bd.l_start;
    while x[left[i]] {
        i += 1;
    }
    let last = bd.l_end - 1;
    left.swap(i, last);
    bd.l_end -= 1;
    left[last]
}

/// Finds the index (within `bd`'s right range) of the smallest right-buffer
/// value strictly greater than `after`, or `None` if there is none.
pub(crate) fn next_right_candidate(bd: &Bidomain, right: &[usize], after: Option<usize>) -> Option<usize> {
    let mut best: Option<usize> = None;
    for i in bd.r_start..bd.r_end {
        let val = right[i];
        if let Some(a) = after {
            if val <= a {
                continue;
            }
        }
        if best.map_or(true, |b| right[b] > val) {
            best = Some(i);
        }
    }
    best
}

/// Two-pointer (Hoare-style) in-place partition of `buf[start..end]`: moves
/// elements satisfying `pred` to the front, returns the split point.
fn partition(buf: &mut [usize], start: usize, end: usize, pred: impl Fn(usize) -> bool) -> usize {
    let mut i = start;
    let mut j = end;
    while i < j {
        if pred(buf[i]) {
            i += 1;
        } else {
            j -= 1;
            buf.swap(i, j);
        }
    }
    i
}

fn count_suppressed(buf: &[usize], start: usize, end: usize, x: &[bool]) -> usize {
    buf[start..end].iter().filter(|&&v| x[v]).count()
}

/// Refines `domains` against the newly mapped pair `(v, w)`: every bidomain
/// is split into an adjacent half and a non-adjacent half (with respect to
/// `v` in G0 and `w` in G1), each retained only if both its left and right
/// range are non-empty.
pub(crate) fn filter_domains(
    domains: &[Bidomain],
    left: &mut [usize],
    right: &mut [usize],
    v: usize,
    w: usize,
    g0: &Graph,
    g1: &Graph,
    x: &[bool],
) -> Vec<Bidomain> {
    let mut refined = Vec::with_capacity(domains.len() * 2);

    for bd in domains {
        let l_split = partition(left, bd.l_start, bd.l_end, |u| g0.adjacent(v, u));
        let r_split = partition(right, bd.r_start, bd.r_end, |u| g1.adjacent(w, u));

        if l_split < bd.l_end && r_split < bd.r_end {
            refined.push(Bidomain {
                l_start: l_split,
                l_end: bd.l_end,
                r_start: r_split,
                r_end: bd.r_end,
                is_adjacent: bd.is_adjacent,
                x_count: count_suppressed(left, l_split, bd.l_end, x),
            });
        }

        if bd.l_start < l_split && bd.r_start < r_split {
            refined.push(Bidomain {
                l_start: bd.l_start,
                l_end: l_split,
                r_start: bd.r_start,
                r_end: r_split,
                is_adjacent: true,
                x_count: count_suppressed(left, bd.l_start, l_split, x),
            });
        }
    }

    refined
}

/// Leaf-reachability maximality check.
///
/// Unconnected search requires the bidomain list to be entirely empty (the
/// stricter of two plausible rules; kept because it matches the algorithm
/// this was grounded on, see DESIGN.md). Connected search instead asks
/// whether any remaining adjacent bidomain still has a suppressed-but-tried
/// candidate, which would mean the current mapping is a strict prefix of one
/// that will be emitted separately.
pub(crate) fn is_maximal(domains: &[Bidomain], connected: bool) -> bool {
    if connected {
        !domains.iter().any(|bd| bd.is_adjacent && bd.x_count > 0)
    } else {
        domains.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bd(l_start: usize, l_end: usize, r_start: usize, r_end: usize) -> Bidomain {
        Bidomain {
            l_start,
            l_end,
            r_start,
            r_end,
            is_adjacent: false,
            x_count: 0,
        }
    }

    #[test]
    fn select_skips_fully_suppressed_bidomains() {
        let domains = vec![
            Bidomain {
                x_count: 2,
                ..bd(0, 2, 0, 2)
            },
            bd(2, 4, 2, 4),
        ];
        assert_eq!(select(&domains, 0, false), Some(1));
    }

    #[test]
    fn select_skips_non_adjacent_below_root_when_connected() {
        let domains = vec![bd(0, 2, 0, 2), Bidomain { is_adjacent: true, ..bd(2, 4, 2, 4) }];
        assert_eq!(select(&domains, 1, true), Some(1));
        assert_eq!(select(&domains, 0, true), Some(0));
    }

    #[test]
    fn left_vertex_selection_skips_suppressed() {
        let mut left = vec![4, 1, 7];
        let x = vec![false, true, false, false, false, false, false, false];
        let mut bd = bd(0, 3, 0, 0);
        let v = select_left_vertex(&mut bd, &mut left, &x);
        assert_eq!(v, 1);
        assert_eq!(bd.l_end, 2);
    }

    #[test]
    fn right_candidates_are_strictly_ascending() {
        let right = vec![5, 1, 3];
        let bidomain = bd(0, 0, 0, 3);
        let first = next_right_candidate(&bidomain, &right, None).unwrap();
        assert_eq!(right[first], 1);
        let second = next_right_candidate(&bidomain, &right, Some(1)).unwrap();
        assert_eq!(right[second], 3);
        let third = next_right_candidate(&bidomain, &right, Some(3)).unwrap();
        assert_eq!(right[third], 5);
        assert!(next_right_candidate(&bidomain, &right, Some(5)).is_none());
    }

    #[test]
    fn partition_splits_in_place() {
        let mut buf = vec![0, 1, 2, 3, 4];
        let split = partition(&mut buf, 0, 5, |v| v % 2 == 0);
        assert_eq!(split, 3);
        assert!(buf[..split].iter().all(|v| v % 2 == 0));
        assert!(buf[split..].iter().all(|v| v % 2 != 0));
    }
}
