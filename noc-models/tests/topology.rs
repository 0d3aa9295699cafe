// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

use std::collections::HashSet;

use noc_models::topology::{Node, Topology, add_shortcuts, build_mesh, num_mesh_edges};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

fn eligible_pairs(topology: &Topology) -> usize {
    let nodes: Vec<Node> = topology.nodes().collect();
    let mut count = 0;
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            if a.manhattan_distance(b) > 1 && !topology.has_edge(*a, *b) {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn mesh_node_and_edge_counts() {
    for rows in 1..6 {
        for cols in 1..6 {
            let mesh = build_mesh(rows, cols).unwrap();
            assert_eq!(mesh.num_nodes(), rows * cols);
            assert_eq!(mesh.num_edges(), rows * (cols - 1) + cols * (rows - 1));
            assert_eq!(mesh.num_edges(), num_mesh_edges(rows, cols));
            assert_eq!(mesh.edges().count(), mesh.num_edges());

            for (a, b) in mesh.edges() {
                assert_eq!(a.manhattan_distance(&b), 1);
            }
        }
    }
}

#[test]
fn shortcuts_added_exactly() {
    let mesh = build_mesh(6, 6).unwrap();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let small_world = add_shortcuts(&mesh, 9, &mut rng);

    assert_eq!(small_world.num_edges(), mesh.num_edges() + 9);
    assert_eq!(small_world.shortcut_edges().count(), 9);

    for (a, b) in mesh.edges() {
        assert!(small_world.has_edge(a, b));
    }
    for (a, b) in small_world.shortcut_edges() {
        assert!(a.manhattan_distance(&b) > 1);
        assert!(!mesh.has_edge(a, b));
    }
}

#[test]
fn input_not_modified() {
    let mesh = build_mesh(4, 4).unwrap();
    let before = mesh.clone();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
    let _ = add_shortcuts(&mesh, 4, &mut rng);

    assert_eq!(mesh, before);
    assert_eq!(mesh.num_edges(), 24);
}

#[test]
fn no_duplicate_edges() {
    let mesh = build_mesh(4, 5).unwrap();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
    let small_world = add_shortcuts(&mesh, 30, &mut rng);

    let edges: Vec<(Node, Node)> = small_world.edges().collect();
    let unique: HashSet<(Node, Node)> = edges.iter().copied().collect();
    assert_eq!(edges.len(), unique.len());
    assert_eq!(edges.len(), small_world.num_edges());
}

#[test]
fn saturation_stops_early() {
    // A 3x3 mesh has 36 pairs, 12 of them adjacent.
    let mesh = build_mesh(3, 3).unwrap();
    assert_eq!(eligible_pairs(&mesh), 24);

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
    let saturated = add_shortcuts(&mesh, 1000, &mut rng);
    assert_eq!(saturated.num_edges(), 36);
    assert_eq!(eligible_pairs(&saturated), 0);

    // Nothing left to add
    let again = add_shortcuts(&saturated, 1, &mut rng);
    assert_eq!(again, saturated);
}

#[test]
fn all_eligible_pairs_taken_when_requested() {
    let mesh = build_mesh(2, 4).unwrap();
    let eligible = eligible_pairs(&mesh);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(8);
    let small_world = add_shortcuts(&mesh, eligible, &mut rng);
    assert_eq!(small_world.num_edges(), mesh.num_edges() + eligible);
}

#[test]
fn tiny_meshes_cannot_take_shortcuts() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
    for (rows, cols) in [(1, 1), (1, 2), (2, 1)] {
        let mesh = build_mesh(rows, cols).unwrap();
        assert_eq!(add_shortcuts(&mesh, 3, &mut rng), mesh);
    }
}

#[test]
fn seed_reproduces_topology() {
    let mesh = build_mesh(8, 8).unwrap();
    let first = add_shortcuts(&mesh, 16, &mut Xoshiro256PlusPlus::seed_from_u64(99));
    let second = add_shortcuts(&mesh, 16, &mut Xoshiro256PlusPlus::seed_from_u64(99));
    assert_eq!(first, second);
}
