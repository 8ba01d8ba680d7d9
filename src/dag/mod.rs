// src/dag/mod.rs

pub mod graph;
pub mod traverse;

pub use graph::{Dag, NodeId};
pub use traverse::Traversal;
