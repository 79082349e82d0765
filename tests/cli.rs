// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end CLI coverage: spec §8's scenario table, driven through the
//! actual built binary via stdin/argv rather than against the library.

use std::io::Write;
use std::process::{Command, Stdio};

fn run(args: &[&str], stdin_text: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_rgcidr"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn rgcidr");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin_text.as_bytes())
        .unwrap();

    let output = child.wait_with_output().expect("wait for rgcidr");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn plain_match_exits_zero_and_prints_matching_lines() {
    let (code, stdout, _) = run(
        &["192.168.0.0/16"],
        "192.168.1.1\n10.0.0.1\n172.16.0.1\n",
    );
    assert_eq!(code, 0);
    assert_eq!(stdout, "192.168.1.1\n");
}

#[test]
fn no_match_exits_one_with_no_output() {
    let (code, stdout, _) = run(&["10.0.0.0/8"], "192.168.1.1\n172.16.0.1\n");
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
}

#[test]
fn count_mode_prints_total_only() {
    let (code, stdout, _) = run(
        &["-c", "192.168.0.0/16"],
        "192.168.1.1\n10.0.0.1\n192.168.2.2\n",
    );
    assert_eq!(code, 0);
    assert_eq!(stdout, "2\n");
}

#[test]
fn invert_flag_prints_non_matching_lines() {
    let (code, stdout, _) = run(
        &["-v", "192.168.0.0/16"],
        "192.168.1.1\n10.0.0.1\n172.16.0.1\n",
    );
    assert_eq!(code, 0);
    assert_eq!(stdout, "10.0.0.1\n172.16.0.1\n");
}

#[test]
fn bundled_short_flags_are_accepted() {
    let (code, stdout, _) = run(
        &["-cv", "192.168.0.0/16"],
        "192.168.1.1\n10.0.0.1\n172.16.0.1\n",
    );
    assert_eq!(code, 0);
    assert_eq!(stdout, "2\n");
}

#[test]
fn strict_mode_rejects_misaligned_cidr() {
    let (code, stdout, stderr) = run(&["-s", "192.168.1.0/16"], "192.168.1.1\n");
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(!stderr.is_empty());
}

#[test]
fn missing_pattern_is_a_usage_error() {
    let (code, _, stderr) = run(&[], "");
    assert_eq!(code, 2);
    assert!(!stderr.is_empty());
}

#[test]
fn pattern_file_is_loaded_and_comments_skipped() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("rgcidr-test-patterns-{}.txt", std::process::id()));
    std::fs::write(&path, "# a comment\n\n192.168.0.0/16\n").unwrap();

    let (code, stdout, _) = run(
        &["-f", path.to_str().unwrap()],
        "192.168.1.1\n10.0.0.1\n",
    );

    std::fs::remove_file(&path).ok();
    assert_eq!(code, 0);
    assert_eq!(stdout, "192.168.1.1\n");
}

#[test]
fn exact_flag_only_matches_addresses_at_line_start() {
    let (code, stdout, _) = run(
        &["-x", "192.168.1.1"],
        "hello 192.168.1.1\n192.168.1.1 hi\n",
    );
    assert_eq!(code, 0);
    assert_eq!(stdout, "192.168.1.1 hi\n");
}

#[test]
fn ipv6_cidr_matches_embedded_and_plain_forms() {
    let (code, stdout, _) = run(
        &["2001:db8::/32"],
        "2001:db8::1\nfe80::1\n192.168.1.1\n",
    );
    assert_eq!(code, 0);
    assert_eq!(stdout, "2001:db8::1\n");
}
