pub mod explicit;
pub mod implicit;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::{Config, Driver};
use crate::graph::Graph;

/// One entry of a partial common-subgraph mapping: `v` in G0 paired with `w`
/// in G1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VtxPair {
    pub v: usize,
    pub w: usize,
}

/// Per-run counters, owned by the caller and threaded through the recursion
/// by mutable reference. Stands in for the source's file-scope `nodes` and
/// `solution_count` globals — idiomatic Rust has no casual equivalent, and
/// this crate's other owned-state conventions don't reach for one either.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchStats {
    pub nodes: u64,
    pub solutions: u64,
}

/// A shared switch the search checks at the top of every recursive call.
///
/// Cloning an `AbortFlag` shares the same underlying flag; a companion
/// timeout thread (see [`crate::timeout`]) holds one clone and sets it from
/// outside the search.
#[derive(Clone)]
pub struct AbortFlag(Arc<AtomicBool>);

impl AbortFlag {
    pub fn new() -> Self {
        AbortFlag(Arc::new(AtomicBool::new(false)))
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl Default for AbortFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the driver selected by `config.driver` to exhaustion (or until
/// `abort` is set), calling `on_solution` once per emitted maximal mapping.
pub fn run<F>(g0: &Graph, g1: &Graph, config: &Config, abort: &AbortFlag, mut on_solution: F) -> SearchStats
where
    F: FnMut(&[VtxPair]),
{
    match config.driver {
        Driver::Explicit => explicit::search(g0, g1, config.connected, abort, &mut on_solution),
        Driver::Implicit => implicit::search(g0, g1, abort, &mut on_solution),
    }
}
