//! Network loading: edge-list parsing, component extraction, simplification.
//!
//! [`Network`] is the analysed graph: the largest weakly-connected component
//! of an edge-list file, with self-loops and parallel edges removed and its
//! vertices renumbered densely in ascending original-id order. Every vertex
//! keeps its original identifier as the petgraph node weight so ground truth
//! and diagnostics can refer to the ids used in the input file.
//!
//! # Edge-list format
//!
//! One undirected edge per line: two whitespace-separated non-negative
//! integers. Blank lines are skipped. Ids are sparse: only ids that occur
//! in some edge are vertices of the raw graph, however large they are.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use petgraph::graph::UnGraph;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;

use crate::error::{CoreError, LoadError};
use crate::id::NodeId;
use crate::neighborhood::Neighborhoods;

/// Components smaller than this are never selected.
const MIN_COMPONENT_SIZE: usize = 2;

/// The simplified largest component of an input graph.
#[derive(Debug, Clone)]
pub struct Network {
    /// Node weight = original edge-list id.
    graph: UnGraph<u32, ()>,
    /// Original id -> dense id.
    index_of: HashMap<u32, NodeId>,
    /// Distinct ids in the raw edge list.
    raw_vertex_count: usize,
}

impl Network {
    /// Reads and reduces the edge list at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
        let edges = parse_edge_list(BufReader::new(file), path)?;
        let network = Network::from_edges(&edges).ok_or_else(|| LoadError::EmptyGraph {
            path: path.to_path_buf(),
        })?;
        tracing::info!(
            path = %path.display(),
            edges_read = edges.len(),
            raw_vertices = network.raw_vertex_count,
            nodes = network.node_count(),
            simple_edges = network.edge_count(),
            "selected largest connected component"
        );
        Ok(network)
    }

    /// Builds the network from raw edges over original ids.
    ///
    /// Returns `None` when no component has at least two vertices, which
    /// happens for an empty edge list or one made only of self-loops.
    pub fn from_edges(edges: &[(u32, u32)]) -> Option<Self> {
        let mut raw = UnGraphMap::<u32, ()>::with_capacity(0, edges.len());
        for &(a, b) in edges {
            raw.add_edge(a, b, ());
        }
        let vertex_count = raw.node_count();

        let mut members = largest_component(&raw)?;
        members.sort_unstable();

        let index_of: HashMap<u32, NodeId> = members
            .iter()
            .enumerate()
            .map(|(dense, &original)| (original, NodeId(dense as u32)))
            .collect();

        // Simplify: canonical (low, high) pairs, loops dropped.
        let simple: BTreeSet<(NodeId, NodeId)> = edges
            .iter()
            .filter(|(a, b)| a != b)
            .filter_map(|&(a, b)| {
                let (x, y) = (*index_of.get(&a)?, *index_of.get(&b)?);
                Some((x.min(y), x.max(y)))
            })
            .collect();

        let mut graph = UnGraph::<u32, ()>::with_capacity(members.len(), simple.len());
        for &original in &members {
            graph.add_node(original);
        }
        for (a, b) in simple {
            graph.add_edge(a.into(), b.into(), ());
        }

        Some(Network {
            graph,
            index_of,
            raw_vertex_count: vertex_count,
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of distinct ids in the input, before the component was
    /// extracted.
    pub fn raw_vertex_count(&self) -> usize {
        self.raw_vertex_count
    }

    /// The edge-list id of a dense node id.
    pub fn original_id(&self, node: NodeId) -> Option<u32> {
        self.graph.node_weight(node.into()).copied()
    }

    /// The dense id of an edge-list id, if that vertex is in the component.
    pub fn node_for_original(&self, original: u32) -> Option<NodeId> {
        self.index_of.get(&original).copied()
    }

    /// Materializes the neighborhood of every node at `distance` hops.
    pub fn neighborhoods(&self, distance: u32) -> Result<Neighborhoods, CoreError> {
        Neighborhoods::from_graph(&self.graph, distance)
    }
}

/// Parses an edge list into raw `(a, b)` pairs of original ids.
///
/// `source` is only used to label errors.
pub fn parse_edge_list<R: BufRead>(reader: R, source: &Path) -> Result<Vec<(u32, u32)>, LoadError> {
    let mut edges = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line_no = number + 1;
        let line = line.map_err(|e| LoadError::io(source, e))?;
        let mut tokens = line.split_whitespace();
        let (a, b) = match (tokens.next(), tokens.next(), tokens.next()) {
            (None, _, _) => continue,
            (Some(a), Some(b), None) => (a, b),
            (Some(_), None, _) => {
                return Err(LoadError::parse(source, line_no, "expected two node ids, found one"))
            }
            (Some(_), Some(_), Some(extra)) => {
                return Err(LoadError::parse(
                    source,
                    line_no,
                    format!("expected two node ids, found extra token '{}'", extra),
                ))
            }
        };
        edges.push((parse_node_id(a, source, line_no)?, parse_node_id(b, source, line_no)?));
    }
    Ok(edges)
}

fn parse_node_id(token: &str, source: &Path, line_no: usize) -> Result<u32, LoadError> {
    token.parse::<u32>().map_err(|_| {
        LoadError::parse(
            source,
            line_no,
            format!("invalid node id '{}': expected a non-negative integer", token),
        )
    })
}

/// Original ids of the largest component with at least
/// [`MIN_COMPONENT_SIZE`] vertices. Ties go to the component found first,
/// i.e. the one containing the smallest vertex id.
fn largest_component(raw: &UnGraphMap<u32, ()>) -> Option<Vec<u32>> {
    let mut starts: Vec<u32> = raw.nodes().collect();
    starts.sort_unstable();
    let mut visited: HashSet<u32> = HashSet::with_capacity(starts.len());
    let mut best: Option<Vec<u32>> = None;

    for start in starts {
        if visited.contains(&start) {
            continue;
        }
        let mut component = Vec::new();
        let mut bfs = Bfs::new(raw, start);
        while let Some(node) = bfs.next(raw) {
            visited.insert(node);
            component.push(node);
        }
        let larger = best.as_ref().map_or(true, |b| component.len() > b.len());
        if component.len() >= MIN_COMPONENT_SIZE && larger {
            best = Some(component);
        }
    }
    best
}
