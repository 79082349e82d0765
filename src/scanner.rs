// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component D: find candidate IP substrings in free-form text using
//! cheap O(1)-lookahead hints, then hand each candidate to the strict
//! parser (spec §4.D).

use crate::address::{parse_ipv4, parse_ipv6, Family};
use crate::index::PatternIndex;

#[inline]
fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline]
fn is_v4_field_char(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.' || b.is_ascii_alphabetic()
}

#[inline]
fn is_v6_field_char(b: u8) -> bool {
    is_hex_digit(b) || b == b':' || b == b'.'
}

#[inline]
fn ipv4_hint(line: &[u8], p: usize) -> bool {
    if p >= line.len() || !line[p].is_ascii_digit() {
        return false;
    }
    let end = (p + 4).min(line.len());
    line[p + 1..end].contains(&b'.')
}

#[inline]
fn ipv6_hint(line: &[u8], p: usize) -> bool {
    if p >= line.len() {
        return false;
    }
    if line[p] == b':' && p + 1 < line.len() && line[p + 1] == b':' {
        return true;
    }
    if !is_hex_digit(line[p]) {
        return false;
    }
    let end = (p + 5).min(line.len());
    line[p + 1..end].contains(&b':')
}

#[inline]
fn extend(line: &[u8], start: usize, field: fn(u8) -> bool) -> usize {
    let mut j = start;
    while j < line.len() && field(line[j]) {
        j += 1;
    }
    j
}

/// Iterator over every successfully parsed candidate address in a line, in
/// left-to-right order. Per spec §9, the two scan modes are just two ways
/// of consuming this one iterator: early-exit stops at the first hit,
/// full-scan drains it.
pub struct Candidates<'a> {
    line: &'a [u8],
    pos: usize,
}

impl<'a> Candidates<'a> {
    pub fn new(line: &'a [u8]) -> Self {
        Candidates { line, pos: 0 }
    }
}

impl<'a> Iterator for Candidates<'a> {
    type Item = (Family, u128);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.line.len() {
            let p = self.pos;

            if ipv4_hint(self.line, p) {
                let j = extend(self.line, p, is_v4_field_char);
                self.pos = j;
                if let Some(v) = try_parse(&self.line[p..j], parse_ipv4) {
                    return Some((Family::V4, v as u128));
                }
                continue;
            }

            if ipv6_hint(self.line, p) {
                let j = extend(self.line, p, is_v6_field_char);
                self.pos = j;
                // Boundary rule: a trailing alphabetic, non-hex character
                // means extraneous text broke the run; reject outright.
                let boundary_broken =
                    j < self.line.len() && self.line[j].is_ascii_alphabetic() && !is_hex_digit(self.line[j]);
                if !boundary_broken {
                    if let Some(v) = try_parse(&self.line[p..j], parse_ipv6) {
                        return Some((Family::V6, v));
                    }
                }
                continue;
            }

            self.pos = p + 1;
        }
        None
    }
}

fn try_parse<T>(slice: &[u8], parser: fn(&str) -> Result<T, crate::error::RgcidrError>) -> Option<T> {
    std::str::from_utf8(slice).ok().and_then(|s| parser(s).ok())
}

/// Per-line scan state. Owns the scratch buffer used in full-scan mode so
/// its capacity is reused across lines instead of reallocated (spec §5).
#[derive(Default)]
pub struct Scanner {
    found: Vec<(Family, u128)>,
}

impl Scanner {
    pub fn new() -> Self {
        Scanner { found: Vec::new() }
    }

    /// Mode 1 (spec §4.D): true iff some candidate both parses and is a
    /// member of `index`. Stops at the first such candidate.
    pub fn matches_early_exit(&self, line: &[u8], index: &PatternIndex) -> bool {
        Candidates::new(line).any(|(fam, val)| index.contains(fam, val))
    }

    /// Mode 2 (spec §4.D): collect every parsed address, then report
    /// whether any were found and whether any are in `index`.
    pub fn scan_full(&mut self, line: &[u8], index: &PatternIndex) -> (bool, bool) {
        self.found.clear();
        self.found.extend(Candidates::new(line));
        let has_any_ip = !self.found.is_empty();
        let has_matching_ip = self.found.iter().any(|&(fam, val)| index.contains(fam, val));
        (has_any_ip, has_matching_ip)
    }

    /// Exact-at-start mode (spec §4.D): skip leading spaces/tabs, then try
    /// exactly one candidate at that position. IPv4 is attempted first
    /// (when the first character is a digit); IPv6 is attempted when the
    /// first character is `:` or any hex digit — a decimal digit is hex
    /// too, so a leading digit falls through to an IPv6 attempt if the
    /// IPv4 parse fails. No further positions are considered.
    pub fn scan_exact_start(&self, line: &[u8], index: &PatternIndex) -> (bool, bool) {
        let mut p = 0;
        while p < line.len() && (line[p] == b' ' || line[p] == b'\t') {
            p += 1;
        }
        if p >= line.len() {
            return (false, false);
        }
        let first = line[p];

        if first.is_ascii_digit() {
            let j = extend(line, p, is_v4_field_char);
            if let Some(v) = try_parse(&line[p..j], parse_ipv4) {
                return (true, index.contains(Family::V4, v as u128));
            }
        }

        if first == b':' || is_hex_digit(first) {
            let j = extend(line, p, is_v6_field_char);
            if let Some(v) = try_parse(&line[p..j], parse_ipv6) {
                return (true, index.contains(Family::V6, v));
            }
        }

        (false, false)
    }
}
