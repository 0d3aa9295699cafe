// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

use noc_models::presets::{TABLE_HEIGHT, TABLE_SHORTCUTS, TABLE_WIDTH, table_shortcut_map};
use noc_models::routing::dimension_order::{Port, ShortcutMap};
use noc_models::routing_table::synthesize;

#[test]
fn two_by_two_corners() {
    let table = synthesize(2, 2, &ShortcutMap::default()).unwrap();
    // Router 0 is (0, 0) and router 3 is (1, 1): X is resolved first
    assert_eq!(table.port(0, 3), Port::East);
    assert_eq!(table.port(3, 0), Port::West);
}

#[test]
fn preset_table_shape() {
    let table = synthesize(TABLE_WIDTH, TABLE_HEIGHT, &table_shortcut_map()).unwrap();
    let num_nodes = TABLE_WIDTH * TABLE_HEIGHT;
    assert_eq!(table.num_nodes(), num_nodes);

    let text = table.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), num_nodes);
    for (source, line) in lines.iter().enumerate() {
        let ids: Vec<usize> = line.split(' ').map(|id| id.parse().unwrap()).collect();
        assert_eq!(ids.len(), num_nodes);
        assert_eq!(ids[source], Port::Local.id());
    }
}

#[test]
fn preset_shortcuts_always_win() {
    let table = synthesize(TABLE_WIDTH, TABLE_HEIGHT, &table_shortcut_map()).unwrap();
    for (i, &(a, b)) in TABLE_SHORTCUTS.iter().enumerate() {
        assert_eq!(table.port(a, b).id(), 5 + i);
        assert_eq!(table.port(b, a).id(), 5 + i);
    }

    let ids = table.to_ids();
    assert_eq!(ids[0][31], 5);
    assert_eq!(ids[24][7], 6);
    assert_eq!(ids[12][20], 7);
    assert_eq!(ids[28][4], 8);
}

#[test]
fn preset_non_shortcut_cells() {
    let table = synthesize(TABLE_WIDTH, TABLE_HEIGHT, &table_shortcut_map()).unwrap();
    // Router 0 to router 9 (1, 1) goes east, router 9 to router 1 (1, 0) goes north
    assert_eq!(table.port(0, 9), Port::East);
    assert_eq!(table.port(9, 1), Port::North);
    assert_eq!(table.port(31, 30), Port::West);
    assert_eq!(table.port(4, 12), Port::South);

    let shortcut_cells = table
        .rows()
        .flatten()
        .filter(|port| port.is_shortcut())
        .count();
    assert_eq!(shortcut_cells, 2 * TABLE_SHORTCUTS.len());
}

#[test]
fn invalid_configuration_rejected() {
    assert!(synthesize(0, 4, &ShortcutMap::default()).is_err());
    assert!(synthesize(4, 0, &ShortcutMap::default()).is_err());
    // Router 31 does not exist in a 4x4 mesh
    assert!(synthesize(4, 4, &table_shortcut_map()).is_err());
}

#[test]
fn deterministic() {
    let first = synthesize(TABLE_WIDTH, TABLE_HEIGHT, &table_shortcut_map()).unwrap();
    let second = synthesize(TABLE_WIDTH, TABLE_HEIGHT, &table_shortcut_map()).unwrap();
    assert_eq!(first, second);
}
