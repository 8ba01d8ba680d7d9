// src/dag/traverse.rs

//! Lazy topological traversal over a [`Dag`](crate::dag::Dag).

use std::collections::VecDeque;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::dag::graph::NodeId;

/// Iterator yielding every registered id exactly once, prerequisites always
/// before dependents.
///
/// Implemented as Kahn's algorithm over an explicit ready work-list: nodes
/// with in-degree zero are seeded up front, and finishing a node decrements
/// the in-degree of its direct dependents, releasing them once all their
/// prerequisites have been yielded. No recursion, so graph depth is not
/// bounded by the call stack.
///
/// Order is deterministic: ties are broken by node insertion order.
pub struct Traversal<'a, N: NodeId> {
    graph: &'a DiGraph<N, ()>,
    indegree: Vec<usize>,
    ready: VecDeque<NodeIndex>,
}

impl<'a, N: NodeId> Traversal<'a, N> {
    pub(crate) fn new(graph: &'a DiGraph<N, ()>) -> Self {
        let mut indegree = vec![0usize; graph.node_count()];
        for ix in graph.node_indices() {
            indegree[ix.index()] = graph
                .neighbors_directed(ix, Direction::Incoming)
                .count();
        }

        let ready = graph
            .node_indices()
            .filter(|ix| indegree[ix.index()] == 0)
            .collect();

        Self {
            graph,
            indegree,
            ready,
        }
    }
}

impl<N: NodeId> Iterator for Traversal<'_, N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let ix = self.ready.pop_front()?;

        for dep in self.graph.neighbors_directed(ix, Direction::Outgoing) {
            let d = &mut self.indegree[dep.index()];
            *d -= 1;
            if *d == 0 {
                self.ready.push_back(dep);
            }
        }

        Some(self.graph[ix].clone())
    }
}
