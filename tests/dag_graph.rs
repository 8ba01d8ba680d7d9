// tests/dag_graph.rs

mod common;
use crate::common::init_tracing;

use std::collections::HashSet;

use crondag::dag::Dag;
use crondag::errors::CrondagError;

fn set<'a>(items: &[&'a str]) -> HashSet<&'a str> {
    items.iter().copied().collect()
}

#[test]
fn add_edge_not_existent() {
    init_tracing();
    let mut dag: Dag<&str> = Dag::new();

    let err = dag.add_edge("foo", "bar").unwrap_err();
    assert!(matches!(err, CrondagError::UnknownNode(ref n) if n == "foo"));

    dag.add_node("foo").unwrap();
    let err = dag.add_edge("foo", "bar").unwrap_err();
    assert!(matches!(err, CrondagError::UnknownNode(ref n) if n == "bar"));
}

#[test]
fn add_node_twice_is_rejected() {
    let mut dag: Dag<&str> = Dag::new();
    dag.add_node("foo").unwrap();

    let err = dag.add_node("foo").unwrap_err();
    assert!(matches!(err, CrondagError::DuplicateNode(ref n) if n == "foo"));
}

#[test]
fn two_node_cycle_is_rejected() {
    let mut dag: Dag<&str> = Dag::new();
    dag.add_node("a").unwrap();
    dag.add_node("b").unwrap();

    dag.add_edge("a", "b").unwrap();
    let err = dag.add_edge("b", "a").unwrap_err();
    assert!(matches!(err, CrondagError::CyclicDependence { .. }));
}

#[test]
fn self_edge_is_rejected() {
    let mut dag: Dag<&str> = Dag::new();
    dag.add_node("a").unwrap();

    let err = dag.add_edge("a", "a").unwrap_err();
    assert!(matches!(err, CrondagError::CyclicDependence { .. }));
}

#[test]
fn transitive_cycle_is_rejected() {
    let mut dag: Dag<&str> = Dag::new();
    for n in ["a", "b", "c"] {
        dag.add_node(n).unwrap();
    }
    dag.add_edge("a", "b").unwrap();
    dag.add_edge("b", "c").unwrap();

    let err = dag.add_edge("c", "a").unwrap_err();
    assert!(matches!(err, CrondagError::CyclicDependence { .. }));
}

#[test]
fn independent_and_downstream() {
    // B and C depend on A; D stands alone.
    let mut dag: Dag<&str> = Dag::new();
    for n in ["A", "B", "C", "D"] {
        dag.add_node(n).unwrap();
    }
    dag.add_edge("A", "B").unwrap();
    dag.add_edge("A", "C").unwrap();

    assert_eq!(dag.independent_nodes(), set(&["A", "D"]));
    assert_eq!(dag.downstream(&"A").unwrap(), set(&["B", "C"]));
    assert!(dag.downstream(&"D").unwrap().is_empty());
}

#[test]
fn upstream_mirrors_downstream() {
    let mut dag: Dag<&str> = Dag::new();
    for n in ["A", "B", "C"] {
        dag.add_node(n).unwrap();
    }
    dag.add_edge("A", "B").unwrap();
    dag.add_edge("B", "C").unwrap();

    assert_eq!(dag.downstream(&"A").unwrap(), set(&["B", "C"]));
    assert_eq!(dag.upstream(&"C").unwrap(), set(&["A", "B"]));
    assert!(dag.upstream(&"A").unwrap().is_empty());
}

#[test]
fn queries_on_unknown_nodes_fail() {
    let dag: Dag<&str> = Dag::new();
    assert!(matches!(
        dag.downstream(&"nope").unwrap_err(),
        CrondagError::UnknownNode(_)
    ));
    assert!(matches!(
        dag.upstream(&"nope").unwrap_err(),
        CrondagError::UnknownNode(_)
    ));
}

#[test]
fn traverse_chain_in_prerequisite_order() {
    let mut dag: Dag<&str> = Dag::new();
    for n in ["A", "B", "C"] {
        dag.add_node(n).unwrap();
    }
    dag.add_edge("A", "B").unwrap();
    dag.add_edge("B", "C").unwrap();

    let order: Vec<&str> = dag.traverse().collect();
    assert_eq!(order, vec!["A", "B", "C"]);
}

#[test]
fn traverse_diamond_yields_each_node_once() {
    // A -> {B, C} -> D
    let mut dag: Dag<&str> = Dag::new();
    for n in ["A", "B", "C", "D"] {
        dag.add_node(n).unwrap();
    }
    dag.add_edge("A", "B").unwrap();
    dag.add_edge("A", "C").unwrap();
    dag.add_edge("B", "D").unwrap();
    dag.add_edge("C", "D").unwrap();

    let order: Vec<&str> = dag.traverse().collect();
    assert_eq!(order.len(), 4);
    assert_eq!(order.first(), Some(&"A"));
    assert_eq!(order.last(), Some(&"D"));
    assert_eq!(order.iter().copied().collect::<HashSet<_>>(), set(&["A", "B", "C", "D"]));
}

#[test]
fn duplicate_edge_declarations_are_idempotent() {
    let mut dag: Dag<&str> = Dag::new();
    dag.add_node("a").unwrap();
    dag.add_node("b").unwrap();

    dag.add_edge("a", "b").unwrap();
    dag.add_edge("a", "b").unwrap();

    assert_eq!(dag.downstream(&"a").unwrap(), set(&["b"]));
    assert_eq!(dag.traverse().count(), 2);
}
