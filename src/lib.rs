/*!
## mcis

Enumerates all maximal common induced subgraphs (MCIS) between two finite
vertex-labelled undirected graphs, optionally restricted to subgraphs that
are connected on the G0 side of the mapping.

The search is a branch-and-bound enumeration over a partition of candidate
vertex pairs into *bidomains*, with a suppression set that keeps every
maximal mapping from being emitted more than once. Two driver flavours are
available (see [`search::explicit`] and [`search::implicit`]); both agree on
the set of maximals they emit for connected problems.

This is a library crate; the `mcis` binary wraps it with argument parsing,
a wall-clock timeout, and the command-line report.

### License

MIT
*/
#![allow(dead_code)]
mod bidomain;
pub mod config;
pub mod error;
pub mod graph;
pub mod search;

pub use config::Config;
pub use error::Error;
pub use graph::Graph;
pub use search::{run, AbortFlag, SearchStats, VtxPair};
