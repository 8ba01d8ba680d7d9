// src/dag/graph.rs

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use petgraph::Direction;
use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, Reversed};

use crate::dag::traverse::Traversal;
use crate::errors::{CrondagError, Result};

/// Anything usable as a DAG node identifier: cloneable, hashable, printable.
///
/// Task ids are `String`s in practice, but the graph itself does not care.
pub trait NodeId: Clone + Eq + Hash + fmt::Display {}

impl<T: Clone + Eq + Hash + fmt::Display> NodeId for T {}

/// Directed acyclic graph over opaque node ids.
///
/// Edge direction follows the "downstream" convention: edge A -> B means B
/// depends on A, i.e. A must complete before B. Acyclicity is enforced at
/// insertion time — [`Dag::add_edge`] runs a reachability query *before*
/// mutating the graph, so the structure can never hold a cycle.
#[derive(Debug, Clone)]
pub struct Dag<N: NodeId> {
    graph: DiGraph<N, ()>,
    index: HashMap<N, NodeIndex>,
}

impl<N: NodeId> Default for Dag<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeId> Dag<N> {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Register a node with no edges.
    pub fn add_node(&mut self, node: N) -> Result<()> {
        if self.index.contains_key(&node) {
            return Err(CrondagError::DuplicateNode(node.to_string()));
        }
        let ix = self.graph.add_node(node.clone());
        self.index.insert(node, ix);
        Ok(())
    }

    /// Record that `dependent` depends on `prereq`.
    ///
    /// Fails with [`CrondagError::UnknownNode`] if either id is unregistered,
    /// and with [`CrondagError::CyclicDependence`] if `prereq` is already
    /// reachable downstream from `dependent` (which includes the self-edge
    /// case). The graph is left untouched on failure.
    pub fn add_edge(&mut self, prereq: N, dependent: N) -> Result<()> {
        let from = self.lookup(&prereq)?;
        let to = self.lookup(&dependent)?;

        if has_path_connecting(&self.graph, to, from, None) {
            return Err(CrondagError::CyclicDependence {
                prereq: prereq.to_string(),
                dependent: dependent.to_string(),
            });
        }

        // update_edge keeps duplicate declarations idempotent.
        self.graph.update_edge(from, to, ());
        Ok(())
    }

    /// All ids transitively reachable from `node` by following downstream
    /// edges: the tasks that, directly or indirectly, depend on it.
    pub fn downstream(&self, node: &N) -> Result<HashSet<N>> {
        let start = self.lookup(node)?;
        let mut reached = HashSet::new();
        let mut bfs = Bfs::new(&self.graph, start);
        while let Some(ix) = bfs.next(&self.graph) {
            if ix != start {
                reached.insert(self.graph[ix].clone());
            }
        }
        Ok(reached)
    }

    /// All ids from which `node` is reachable: its transitive prerequisites.
    ///
    /// Mirrors [`Dag::downstream`] with edges followed backward; petgraph
    /// keeps per-node incoming edge lists, so this walks a maintained reverse
    /// index rather than rebuilding the graph.
    pub fn upstream(&self, node: &N) -> Result<HashSet<N>> {
        let start = self.lookup(node)?;
        let reversed = Reversed(&self.graph);
        let mut reached = HashSet::new();
        let mut bfs = Bfs::new(reversed, start);
        while let Some(ix) = bfs.next(reversed) {
            if ix != start {
                reached.insert(self.graph[ix].clone());
            }
        }
        Ok(reached)
    }

    /// Ids with no incoming edges: entry points with no declared prerequisite.
    pub fn independent_nodes(&self) -> HashSet<N> {
        self.graph
            .externals(Direction::Incoming)
            .map(|ix| self.graph[ix].clone())
            .collect()
    }

    /// All registered ids, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.graph.node_weights()
    }

    /// Lazy traversal of all registered ids in prerequisite-first
    /// topological order. See [`Traversal`].
    pub fn traverse(&self) -> Traversal<'_, N> {
        Traversal::new(&self.graph)
    }

    fn lookup(&self, node: &N) -> Result<NodeIndex> {
        self.index
            .get(node)
            .copied()
            .ok_or_else(|| CrondagError::UnknownNode(node.to_string()))
    }
}
