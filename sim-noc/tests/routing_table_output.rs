// Copyright (c) 2025 Graphcore Ltd. All rights reserved.

use std::process::{Command, Output};

fn run_routing_table(args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_noc-routing-table"))
        .args(args)
        .env_remove("NOC_LOG_LEVEL")
        .env_remove("NOC_WIDTH")
        .env_remove("NOC_HEIGHT")
        .env_remove("NOC_SHORTCUTS")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "noc-routing-table failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn parse_table(stdout: &[u8]) -> Vec<Vec<usize>> {
    String::from_utf8(stdout.to_vec())
        .unwrap()
        .lines()
        .map(|line| {
            line.split(' ')
                .map(|id| id.parse::<usize>().unwrap_or_else(|_| panic!("bad port id in {line:?}")))
                .collect()
        })
        .collect()
}

#[test]
fn logging_leaves_table_on_stdout() {
    let output = run_routing_table(&[
        "--log-level",
        "info",
        "--width",
        "2",
        "--height",
        "2",
        "--shortcuts",
        "0-3",
    ]);

    let table = parse_table(&output.stdout);
    assert_eq!(table.len(), 4);
    for (source, row) in table.iter().enumerate() {
        assert_eq!(row.len(), 4);
        assert_eq!(row[source], 4);
    }
    assert_eq!(table[0][3], 5);
    assert_eq!(table[3][0], 5);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Shortcut 0 <-> 3 on port 5"));
}

#[test]
fn default_table_is_square() {
    let output = run_routing_table(&["--log-level", "debug"]);

    let table = parse_table(&output.stdout);
    assert_eq!(table.len(), 32);
    assert!(table.iter().all(|row| row.len() == 32));
    assert_eq!(table[0][31], 5);
    assert_eq!(table[24][7], 6);
}
