use atoi::FromRadix10;
use linereader::LineReader;
use std::{
    collections::BTreeSet, convert::TryFrom, fmt::Display, fs::File, io::Read, path::Path,
    str::FromStr, time::Instant,
};

use crate::error::Error;

/// Bit reserved in a vertex label to record a self-loop on that vertex.
///
/// A self-loop is not an edge: reading `(v, v)` from the input sets this bit
/// on `label[v]` instead of recording an adjacency.
pub const SELF_LOOP_BIT: u32 = 1 << 31;

const MAX_RAW_LABEL: u64 = (SELF_LOOP_BIT - 1) as u64;

/// An immutable, vertex-labelled undirected graph.
///
/// Adjacency is stored twice: as a dense matrix for O(1) membership tests
/// (used to partition bidomains) and as sorted per-vertex neighbour lists
/// (used by the connected/implicit search driver, which walks neighbours
/// directly instead of re-scanning the matrix).
pub struct Graph {
    n: usize,
    edge_count: usize,
    labels: Box<[u32]>,
    adjacency: Box<[Box<[bool]>]>,
    neighbors: Box<[Box<[usize]>]>,
}

impl Graph {
    pub fn node_count(&self) -> usize {
        self.n
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// The raw label word, including the self-loop bit if set.
    pub fn label(&self, v: usize) -> u32 {
        self.labels[v]
    }

    pub fn has_self_loop(&self, v: usize) -> bool {
        self.labels[v] & SELF_LOOP_BIT != 0
    }

    pub fn degree(&self, v: usize) -> usize {
        self.neighbors[v].len()
    }

    pub fn adjacent(&self, v: usize, w: usize) -> bool {
        self.adjacency[v][w]
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.neighbors[v]
    }

    /// Distinct label values present in this graph, in ascending order.
    pub fn labels(&self) -> BTreeSet<u32> {
        self.labels.iter().copied().collect()
    }

    /// Vertices carrying the given label, in ascending vertex order.
    pub fn vertices_with_label(&self, label: u32) -> impl Iterator<Item = usize> + '_ {
        (0..self.n).filter(move |&v| self.labels[v] == label)
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "|V|: {}, |E|: {}, |Σ|: {}",
            self.n,
            self.edge_count,
            self.labels().len()
        )
    }
}

impl FromStr for Graph {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Error> {
        let reader = LineReader::new(input.as_bytes());
        let parsed = ParseGraph::try_from(reader)?;
        Ok(Graph::from(parsed))
    }
}

struct ParseGraph {
    n: usize,
    edge_count: usize,
    labels: Vec<u32>,
    edges: Vec<(usize, usize)>,
}

/// Advances `batch`/`lines` past ASCII whitespace, refilling from `lines`
/// when the current batch is exhausted, then scans one decimal integer.
///
/// Treats any run of whitespace (including newlines) as a single separator,
/// matching the source format's `fscanf("%u")` semantics, rather than the
/// fixed-width tag skipping a tagged `t`/`v`/`e` grammar would use.
fn read_uint<R: Read>(
    batch: &mut &[u8],
    lines: &mut LineReader<R>,
    line_no: &mut usize,
) -> Result<usize, Error> {
    loop {
        while let Some(&c) = batch.first() {
            if !c.is_ascii_whitespace() {
                break;
            }
            if c == b'\n' {
                *line_no += 1;
            }
            *batch = &batch[1..];
        }
        if !batch.is_empty() {
            break;
        }
        *batch = match lines.next_batch() {
            Some(next) => next?,
            None => return Err(Error::parse(*line_no, "unexpected end of input")),
        };
    }

    let (value, used): (u64, usize) = FromRadix10::from_radix_10(*batch);
    if used == 0 {
        return Err(Error::parse(*line_no, "expected an integer"));
    }
    *batch = &batch[used..];
    Ok(value as usize)
}

impl<R> TryFrom<LineReader<R>> for ParseGraph
where
    R: Read,
{
    type Error = Error;

    fn try_from(mut lines: LineReader<R>) -> Result<Self, Error> {
        let mut line_no = 1usize;
        let mut batch: &[u8] = match lines.next_batch() {
            Some(batch) => batch?,
            None => return Err(Error::parse(line_no, "empty graph file")),
        };

        let n = read_uint(&mut batch, &mut lines, &mut line_no)?;
        let m = read_uint(&mut batch, &mut lines, &mut line_no)?;

        let mut labels = Vec::with_capacity(n);
        for i in 0..n {
            let raw = read_uint(&mut batch, &mut lines, &mut line_no)? as u64;
            if raw > MAX_RAW_LABEL {
                return Err(Error::parse(
                    line_no,
                    format!("label {raw} on vertex {i} does not fit in 31 bits"),
                ));
            }
            labels.push(raw as u32);
        }

        let mut edges = Vec::with_capacity(m);
        for _ in 0..m {
            let v = read_uint(&mut batch, &mut lines, &mut line_no)?;
            let w = read_uint(&mut batch, &mut lines, &mut line_no)?;
            if v >= n || w >= n {
                return Err(Error::parse(
                    line_no,
                    format!("edge ({v}, {w}) references a vertex outside 0..{n}"),
                ));
            }
            edges.push((v, w));
        }

        Ok(Self {
            n,
            edge_count: m,
            labels,
            edges,
        })
    }
}

impl From<ParseGraph> for Graph {
    fn from(parsed: ParseGraph) -> Self {
        let ParseGraph {
            n,
            edge_count,
            mut labels,
            edges,
        } = parsed;

        let mut adjacency = vec![vec![false; n].into_boxed_slice(); n];
        let mut neighbor_sets: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (v, w) in edges {
            if v == w {
                labels[v] |= SELF_LOOP_BIT;
                continue;
            }
            if !adjacency[v][w] {
                adjacency[v][w] = true;
                adjacency[w][v] = true;
                neighbor_sets[v].push(w);
                neighbor_sets[w].push(v);
            }
        }

        let neighbors = neighbor_sets
            .into_iter()
            .map(|mut ns| {
                ns.sort_unstable();
                ns.into_boxed_slice()
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            n,
            edge_count,
            labels: labels.into_boxed_slice(),
            adjacency: adjacency.into_boxed_slice(),
            neighbors,
        }
    }
}

/// Reads and parses a graph from `path`, logging the time spent in each phase.
pub fn parse(path: &Path) -> Result<Graph, Error> {
    log::debug!("reading graph from {path:?}");
    let start = Instant::now();
    let file = File::open(path)?;
    log::debug!("opened input in {:?}", start.elapsed());

    let start = Instant::now();
    let parsed = ParseGraph::try_from(LineReader::new(file))?;
    log::debug!("parsed graph in {:?}", start.elapsed());

    let start = Instant::now();
    let graph = Graph::from(parsed);
    log::debug!("built graph in {:?}", start.elapsed());

    Ok(graph)
}
