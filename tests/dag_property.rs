// tests/dag_property.rs

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use crondag::dag::Dag;
use crondag::errors::CrondagError;

// Strategy to generate a valid DAG as (node_count, edges).
// We ensure acyclicity by only allowing node N to depend on nodes 0..N-1.
fn layered_dag(max_nodes: usize) -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2..=max_nodes).prop_flat_map(|n| {
        let deps = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..n),
            n,
        );

        deps.prop_map(move |raw| {
            let mut edges = Vec::new();
            for (i, potential) in raw.into_iter().enumerate() {
                // Sanitize dependencies: only allow deps < i.
                let mut valid = HashSet::new();
                for d in potential {
                    if i > 0 {
                        valid.insert(d % i);
                    }
                }
                for d in valid {
                    edges.push((d, i)); // d -> i: node i depends on node d
                }
            }
            (n, edges)
        })
    })
}

fn build(n: usize, edges: &[(usize, usize)]) -> Dag<usize> {
    let mut dag: Dag<usize> = Dag::new();
    for i in 0..n {
        dag.add_node(i).unwrap();
    }
    for (from, to) in edges {
        dag.add_edge(*from, *to).unwrap();
    }
    dag
}

proptest! {
    #[test]
    fn traverse_yields_each_node_once_prereqs_first((n, edges) in layered_dag(12)) {
        let dag = build(n, &edges);

        let order: Vec<usize> = dag.traverse().collect();
        prop_assert_eq!(order.len(), n, "every node must be yielded exactly once");

        let pos: HashMap<usize, usize> =
            order.iter().enumerate().map(|(p, id)| (*id, p)).collect();
        for (from, to) in &edges {
            prop_assert!(
                pos[from] < pos[to],
                "prerequisite {} must precede dependent {}",
                from,
                to
            );
        }
    }

    #[test]
    fn back_edge_is_always_rejected((n, edges) in layered_dag(12)) {
        prop_assume!(!edges.is_empty());
        let mut dag = build(n, &edges);

        for (from, to) in &edges {
            let err = dag.add_edge(*to, *from).unwrap_err();
            let is_cycle = matches!(err, CrondagError::CyclicDependence { .. });
            prop_assert!(is_cycle);
        }
    }

    #[test]
    fn upstream_is_the_mirror_of_downstream((n, edges) in layered_dag(10)) {
        let dag = build(n, &edges);

        for a in 0..n {
            for b in dag.downstream(&a).unwrap() {
                prop_assert!(dag.upstream(&b).unwrap().contains(&a));
            }
        }
    }
}
