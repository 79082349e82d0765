// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component B: compile a pattern token (single address / CIDR / range,
//! IPv4 or IPv6) into a normalized [`Interval`], and tokenize a batch
//! pattern string (spec §4.B, §6).

use crate::address::{parse_ipv4, parse_ipv6, Family, IPV4_BITS, IPV6_BITS};
use crate::error::RgcidrError;
use crate::index::Interval;

/// One compiled pattern, still tagged by its surface form. The hot path
/// (the [`PatternIndex`](crate::index::PatternIndex)) only ever sees the
/// lowered `(Family, Interval)` pair; the tag exists solely so the
/// compiler can report what it parsed.
#[derive(Clone, Copy, Debug)]
pub enum Pattern {
    SingleV4(u32),
    CidrV4 { addr: u32, prefix: u8 },
    RangeV4 { start: u32, end: u32 },
    SingleV6(u128),
    CidrV6 { addr: u128, prefix: u8 },
}

impl Pattern {
    /// Lower to the family and inclusive interval this pattern covers.
    pub fn lower(self) -> (Family, Interval) {
        match self {
            Pattern::SingleV4(a) => (Family::V4, Interval::new(a as u128, a as u128)),
            Pattern::CidrV4 { addr, prefix } => {
                let (min, max) = cidr_bounds(addr as u128, prefix, IPV4_BITS);
                (Family::V4, Interval::new(min, max))
            }
            Pattern::RangeV4 { start, end } => {
                (Family::V4, Interval::new(start as u128, end as u128))
            }
            Pattern::SingleV6(a) => (Family::V6, Interval::new(a, a)),
            Pattern::CidrV6 { addr, prefix } => {
                let (min, max) = cidr_bounds(addr, prefix, IPV6_BITS);
                (Family::V6, Interval::new(min, max))
            }
        }
    }
}

/// Compile one pattern token per the dispatch rule in spec §4.B:
/// a `:` routes to the IPv6 branch (CIDR or single), otherwise IPv4
/// (CIDR, range, or single).
pub fn compile_token(tok: &str, strict: bool) -> Result<Pattern, RgcidrError> {
    if tok.contains(':') {
        if tok.contains('/') {
            compile_cidr_v6(tok, strict)
        } else {
            parse_ipv6(tok).map(Pattern::SingleV6)
        }
    } else if tok.contains('/') {
        compile_cidr_v4(tok, strict)
    } else if tok.contains('-') {
        compile_range_v4(tok)
    } else {
        parse_ipv4(tok).map(Pattern::SingleV4)
    }
}

/// Tokenize a batch pattern string on runs of space/tab/CR/LF/comma and
/// compile each token independently (spec §4.B, §6). An empty batch (no
/// tokens survive tokenization) is `EmptyBatch`.
pub fn compile_batch(batch: &str, strict: bool) -> Result<Vec<Pattern>, RgcidrError> {
    let tokens: Vec<&str> = batch
        .split(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n' | ','))
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err(RgcidrError::EmptyBatch);
    }
    tokens.iter().map(|t| compile_token(t, strict)).collect()
}

fn compile_cidr_v4(tok: &str, strict: bool) -> Result<Pattern, RgcidrError> {
    let (addr_str, prefix) = split_cidr(tok)?;
    let addr = parse_ipv4(addr_str)?;
    let prefix = parse_prefix(prefix, IPV4_BITS, tok)?;
    check_alignment(addr as u128, prefix, IPV4_BITS, strict, tok)?;
    Ok(Pattern::CidrV4 { addr, prefix })
}

fn compile_cidr_v6(tok: &str, strict: bool) -> Result<Pattern, RgcidrError> {
    let (addr_str, prefix) = split_cidr(tok)?;
    let addr = parse_ipv6(addr_str)?;
    let prefix = parse_prefix(prefix, IPV6_BITS, tok)?;
    check_alignment(addr, prefix, IPV6_BITS, strict, tok)?;
    Ok(Pattern::CidrV6 { addr, prefix })
}

fn compile_range_v4(tok: &str) -> Result<Pattern, RgcidrError> {
    let dash = tok
        .find('-')
        .ok_or_else(|| RgcidrError::InvalidFormat(tok.to_string()))?;
    let (left, right) = (tok[..dash].trim(), tok[dash + 1..].trim());
    let start = parse_ipv4(left)?;
    let end = parse_ipv4(right)?;
    if start > end {
        return Err(RgcidrError::InvalidRange(tok.to_string()));
    }
    Ok(Pattern::RangeV4 { start, end })
}

fn split_cidr(tok: &str) -> Result<(&str, &str), RgcidrError> {
    let parts: Vec<&str> = tok.splitn(2, '/').collect();
    match parts.as_slice() {
        [addr, prefix] => Ok((addr.trim(), prefix.trim())),
        _ => Err(RgcidrError::InvalidFormat(tok.to_string())),
    }
}

fn parse_prefix(s: &str, bits: u8, tok: &str) -> Result<u8, RgcidrError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RgcidrError::InvalidMask(tok.to_string()));
    }
    match s.parse::<u32>() {
        Ok(v) if v <= bits as u32 => Ok(v as u8),
        _ => Err(RgcidrError::InvalidMask(tok.to_string())),
    }
}

fn check_alignment(
    addr: u128,
    prefix: u8,
    bits: u8,
    strict: bool,
    tok: &str,
) -> Result<(), RgcidrError> {
    if !strict {
        return Ok(());
    }
    let net = addr & network_mask(bits, prefix);
    if net != addr {
        return Err(RgcidrError::MisalignedCidr(tok.to_string()));
    }
    Ok(())
}

/// `[min, max]` of the CIDR block `addr/prefix`: `min = addr & mask(prefix)`,
/// `max = addr | ~mask(prefix)` (spec §3).
fn cidr_bounds(addr: u128, prefix: u8, bits: u8) -> (u128, u128) {
    let min = addr & network_mask(bits, prefix);
    let max = min | host_mask(bits, prefix);
    (min, max)
}

/// `bits`-wide mask with the high `prefix` bits set, rest zero.
fn network_mask(bits: u8, prefix: u8) -> u128 {
    if prefix == 0 {
        return 0;
    }
    let all = max_value(bits);
    if prefix >= bits {
        return all;
    }
    let host = bits - prefix;
    all ^ ((1u128 << host) - 1)
}

/// `bits`-wide mask with the low `bits - prefix` bits set, rest zero — the
/// complement of [`network_mask`] within the `bits`-wide field.
fn host_mask(bits: u8, prefix: u8) -> u128 {
    let host = bits.saturating_sub(prefix);
    if host == 0 {
        0
    } else if host >= 128 {
        u128::MAX
    } else {
        (1u128 << host) - 1
    }
}

fn max_value(bits: u8) -> u128 {
    if bits >= 128 {
        u128::MAX
    } else {
        (1u128 << bits) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::parse_ipv4;

    #[test]
    fn single_ipv4() {
        match compile_token("192.168.1.1", false).unwrap() {
            Pattern::SingleV4(a) => assert_eq!(a, parse_ipv4("192.168.1.1").unwrap()),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn cidr_v4_normalizes_non_strict() {
        let pattern = compile_token("192.168.1.0/16", false).unwrap();
        match pattern {
            Pattern::CidrV4 { prefix, .. } => assert_eq!(prefix, 16),
            other => panic!("wrong variant: {other:?}"),
        }
        let (_, iv) = pattern.lower();
        assert_eq!(iv.min, parse_ipv4("192.168.0.0").unwrap() as u128);
        assert_eq!(iv.max, parse_ipv4("192.168.255.255").unwrap() as u128);
    }

    #[test]
    fn cidr_v4_strict_rejects_misaligned() {
        match compile_token("192.168.1.0/16", true) {
            Err(RgcidrError::MisalignedCidr(_)) => {}
            other => panic!("expected MisalignedCidr, got {other:?}"),
        }
    }

    #[test]
    fn cidr_v4_strict_accepts_aligned() {
        assert!(compile_token("192.168.0.0/16", true).is_ok());
    }

    #[test]
    fn cidr_slash_zero_strict_requires_all_zero_address() {
        assert!(compile_token("0.0.0.0/0", true).is_ok());
        assert!(compile_token("1.0.0.0/0", true).is_err());
    }

    #[test]
    fn range_v4_allows_surrounding_whitespace() {
        match compile_token("10.0.0.1 - 10.0.0.5", false).unwrap() {
            Pattern::RangeV4 { start, end } => {
                assert_eq!(start, parse_ipv4("10.0.0.1").unwrap());
                assert_eq!(end, parse_ipv4("10.0.0.5").unwrap());
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn range_v4_rejects_inverted_order() {
        match compile_token("10.0.0.5-10.0.0.1", false) {
            Err(RgcidrError::InvalidRange(_)) => {}
            other => panic!("expected InvalidRange, got {other:?}"),
        }
    }

    #[test]
    fn single_ipv6() {
        assert!(matches!(
            compile_token("2001:db8::1", false),
            Ok(Pattern::SingleV6(_))
        ));
    }

    #[test]
    fn cidr_v6() {
        match compile_token("2001:db8::/32", false).unwrap() {
            Pattern::CidrV6 { prefix, .. } => assert_eq!(prefix, 32),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn mask_out_of_range_is_invalid_mask() {
        assert!(matches!(
            compile_token("10.0.0.0/33", false),
            Err(RgcidrError::InvalidMask(_))
        ));
        assert!(matches!(
            compile_token("::/129", false),
            Err(RgcidrError::InvalidMask(_))
        ));
    }

    #[test]
    fn batch_tokenizes_mixed_separators() {
        let patterns = compile_batch("10.0.0.1, 10.0.0.2\t10.0.0.3\n10.0.0.4", false).unwrap();
        assert_eq!(patterns.len(), 4);
    }

    #[test]
    fn batch_collapses_runs_and_drops_empties() {
        let patterns = compile_batch("  10.0.0.1 ,, , 10.0.0.2  ", false).unwrap();
        assert_eq!(patterns.len(), 2);
    }

    #[test]
    fn empty_batch_is_an_error() {
        assert!(matches!(
            compile_batch("   ,\t\n", false),
            Err(RgcidrError::EmptyBatch)
        ));
    }

    #[test]
    fn adjacent_cidrs_fuse_in_the_index() {
        use crate::index::PatternIndex;
        let patterns = compile_batch("10.0.0.0/25,10.0.0.128/25", false).unwrap();
        let mut v4 = Vec::new();
        for p in patterns {
            let (_, iv) = p.lower();
            v4.push(iv);
        }
        let idx = PatternIndex::build(v4, vec![]);
        assert_eq!(idx.v4_set().len(), 1);
        let s = idx.v4_set().as_slice()[0];
        assert_eq!(s.min, parse_ipv4("10.0.0.0").unwrap() as u128);
        assert_eq!(s.max, parse_ipv4("10.0.0.255").unwrap() as u128);
    }
}
