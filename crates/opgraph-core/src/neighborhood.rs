//! Fixed-radius neighborhoods.
//!
//! [`NeighborhoodProvider`] is the read-only view the detection engine needs
//! from a graph: node count, degree and the neighbor list of every node.
//! [`Neighborhoods`] is the materialized implementation, computed once from
//! a petgraph graph (or from explicit adjacency lists in tests) and borrowed
//! for the whole run.
//!
//! A neighborhood at distance `d` holds the nodes at exactly `d` hops from
//! the center, never the center itself. For `d = 1` that is the simple
//! adjacency list in ascending index order; for larger distances the order
//! is breadth-first discovery order over ascending adjacency lists.

use std::collections::VecDeque;

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

use crate::error::CoreError;
use crate::id::NodeId;

/// Read-only graph queries used by the detection engine.
///
/// All methods take node ids in `0..node_count()`; ids outside that range
/// are a caller error and may panic.
pub trait NeighborhoodProvider {
    /// Number of nodes in the graph.
    fn node_count(&self) -> usize;

    /// Number of distinct adjacent nodes, self-loops excluded.
    fn degree(&self, node: NodeId) -> usize;

    /// Nodes in the neighborhood of `node`, excluding `node` itself.
    fn neighbors(&self, node: NodeId) -> &[NodeId];

    /// Cardinality of the neighborhood of `node`.
    fn neighborhood_size(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// Checks that `node` is a valid index for this provider.
    fn check_node(&self, node: NodeId) -> Result<(), CoreError> {
        if node.index() < self.node_count() {
            Ok(())
        } else {
            Err(CoreError::NodeNotFound {
                id: node,
                node_count: self.node_count(),
            })
        }
    }
}

/// Materialized neighborhoods of every node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighborhoods {
    lists: Vec<Vec<NodeId>>,
    degrees: Vec<usize>,
    distance: u32,
}

impl Neighborhoods {
    /// Builds distance-1 neighborhoods from explicit adjacency lists.
    ///
    /// Each list is sorted, deduplicated and stripped of the node itself, so
    /// the result describes a simple graph. The lists are not required to be
    /// symmetric; the caller decides what graph they describe.
    pub fn from_adjacency(adjacency: Vec<Vec<u32>>) -> Result<Self, CoreError> {
        let node_count = adjacency.len();
        let mut lists = Vec::with_capacity(node_count);
        for (center, raw) in adjacency.into_iter().enumerate() {
            let mut list: Vec<NodeId> = raw
                .into_iter()
                .filter(|&n| n as usize != center)
                .map(NodeId)
                .collect();
            if let Some(&bad) = list.iter().find(|n| n.index() >= node_count) {
                return Err(CoreError::NodeNotFound {
                    id: bad,
                    node_count,
                });
            }
            list.sort_unstable();
            list.dedup();
            lists.push(list);
        }
        let degrees = lists.iter().map(Vec::len).collect();
        Ok(Neighborhoods {
            lists,
            degrees,
            distance: 1,
        })
    }

    /// Computes the neighborhoods at exactly `distance` hops for every node
    /// of `graph`.
    ///
    /// Self-loops and parallel edges in `graph` are ignored.
    pub fn from_graph<N, E>(graph: &UnGraph<N, E>, distance: u32) -> Result<Self, CoreError> {
        if distance == 0 {
            return Err(CoreError::InvalidDistance { distance });
        }

        let mut adjacency: Vec<Vec<NodeId>> = vec![Vec::new(); graph.node_count()];
        for edge in graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            if a != b {
                adjacency[a].push(NodeId(b as u32));
                adjacency[b].push(NodeId(a as u32));
            }
        }
        for list in &mut adjacency {
            list.sort_unstable();
            list.dedup();
        }
        let degrees: Vec<usize> = adjacency.iter().map(Vec::len).collect();

        let lists = if distance == 1 {
            adjacency
        } else {
            (0..adjacency.len())
                .map(|center| ring_at(&adjacency, NodeId(center as u32), distance))
                .collect()
        };

        Ok(Neighborhoods {
            lists,
            degrees,
            distance,
        })
    }

    /// The hop distance these neighborhoods were computed for.
    pub fn distance(&self) -> u32 {
        self.distance
    }
}

/// Nodes at exactly `distance` hops from `center`, in BFS discovery order.
fn ring_at(adjacency: &[Vec<NodeId>], center: NodeId, distance: u32) -> Vec<NodeId> {
    let mut depth: Vec<Option<u32>> = vec![None; adjacency.len()];
    let mut queue = VecDeque::new();
    let mut ring = Vec::new();

    depth[center.index()] = Some(0);
    queue.push_back(center);

    while let Some(node) = queue.pop_front() {
        let d = depth[node.index()].unwrap_or(0);
        if d == distance {
            ring.push(node);
            continue;
        }
        for &next in &adjacency[node.index()] {
            if depth[next.index()].is_none() {
                depth[next.index()] = Some(d + 1);
                queue.push_back(next);
            }
        }
    }
    ring
}

impl NeighborhoodProvider for Neighborhoods {
    fn node_count(&self) -> usize {
        self.lists.len()
    }

    fn degree(&self, node: NodeId) -> usize {
        self.degrees[node.index()]
    }

    fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.lists[node.index()]
    }
}
