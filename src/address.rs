// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component A: strict parsing of IPv4/IPv6 literals into fixed-width
//! unsigned integers (network byte order). See spec §4.A.

use crate::error::RgcidrError;

pub const IPV4_BITS: u8 = 32;
pub const IPV6_BITS: u8 = 128;

/// Address family. Carried alongside the integer value everywhere a value
/// alone would be ambiguous (e.g. inside a [`crate::index::IntervalIndex`]).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    #[inline]
    pub fn bits(self) -> u8 {
        match self {
            Family::V4 => IPV4_BITS,
            Family::V6 => IPV6_BITS,
        }
    }
}

/// Parse exactly four dot-separated decimal octets into a 32-bit integer
/// in network byte order: `(o0<<24)|(o1<<16)|(o2<<8)|o3`.
///
/// Leading zeros are tolerated (`010` parses as `10`); the grammar does not
/// demand a canonical form. Anything else is a parse failure.
pub fn parse_ipv4(s: &str) -> Result<u32, RgcidrError> {
    let mut octets = [0u8; 4];
    let mut count = 0usize;
    for part in s.split('.') {
        if count == 4 {
            return Err(RgcidrError::InvalidFormat(s.to_string()));
        }
        octets[count] = parse_octet(part, s)?;
        count += 1;
    }
    if count != 4 {
        return Err(RgcidrError::InvalidFormat(s.to_string()));
    }
    Ok(u32::from_be_bytes(octets))
}

fn parse_octet(part: &str, whole: &str) -> Result<u8, RgcidrError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RgcidrError::InvalidFormat(whole.to_string()));
    }
    match part.parse::<u32>() {
        Ok(v) if v <= 255 => Ok(v as u8),
        Ok(v) => Err(RgcidrError::InvalidOctet(v.to_string())),
        // overflowed u32: unambiguously a too-large numeric value, not a
        // structural problem, so it's still InvalidOctet rather than
        // InvalidFormat.
        Err(_) => Err(RgcidrError::InvalidOctet(part.to_string())),
    }
}

/// Parse an RFC 4291 IPv6 literal, including the `::` compression form and
/// an embedded-IPv4 tail, into a 128-bit integer. See spec §4.A rules 1-7.
pub fn parse_ipv6(s: &str) -> Result<u128, RgcidrError> {
    if s.contains(":::") {
        return Err(RgcidrError::InvalidFormat(s.to_string()));
    }

    let halves: Vec<&str> = s.split("::").collect();
    match halves.len() {
        1 => parse_ipv6_no_compression(s),
        2 => parse_ipv6_compressed(s, halves[0], halves[1]),
        _ => Err(RgcidrError::InvalidFormat(s.to_string())),
    }
}

fn parse_ipv6_no_compression(s: &str) -> Result<u128, RgcidrError> {
    if s.starts_with(':') || s.ends_with(':') {
        return Err(RgcidrError::InvalidFormat(s.to_string()));
    }

    let mut groups: Vec<&str> = s.split(':').collect();
    let ipv4 = take_embedded_ipv4(&mut groups, s)?;
    let ipv4_groups = if ipv4.is_some() { 2 } else { 0 };

    if groups.len() + ipv4_groups != 8 {
        return Err(RgcidrError::InvalidFormat(s.to_string()));
    }

    let mut values: Vec<u16> = Vec::with_capacity(8);
    for g in &groups {
        values.push(parse_hex_group(g, s)?);
    }
    push_ipv4_groups(&mut values, ipv4);

    Ok(combine_groups(&values))
}

fn parse_ipv6_compressed(s: &str, left: &str, right: &str) -> Result<u128, RgcidrError> {
    if left.starts_with(':') || right.ends_with(':') {
        return Err(RgcidrError::InvalidFormat(s.to_string()));
    }

    let left_groups: Vec<&str> = if left.is_empty() {
        Vec::new()
    } else {
        left.split(':').collect()
    };
    let mut right_groups: Vec<&str> = if right.is_empty() {
        Vec::new()
    } else {
        right.split(':').collect()
    };

    if left_groups.iter().any(|g| g.is_empty()) || right_groups.iter().any(|g| g.is_empty()) {
        return Err(RgcidrError::InvalidFormat(s.to_string()));
    }

    let ipv4 = take_embedded_ipv4(&mut right_groups, s)?;
    let ipv4_groups = if ipv4.is_some() { 2 } else { 0 };

    let explicit = left_groups.len() + right_groups.len() + ipv4_groups;
    if explicit > 8 {
        return Err(RgcidrError::InvalidFormat(s.to_string()));
    }
    let zero_fill = 8 - explicit;

    let mut values: Vec<u16> = Vec::with_capacity(8);
    for g in &left_groups {
        values.push(parse_hex_group(g, s)?);
    }
    values.extend(std::iter::repeat(0u16).take(zero_fill));
    for g in &right_groups {
        values.push(parse_hex_group(g, s)?);
    }
    push_ipv4_groups(&mut values, ipv4);

    Ok(combine_groups(&values))
}

/// If the last element of `groups` looks like an embedded IPv4 tail (has a
/// `.` and is the final segment), parse and remove it, returning its value.
fn take_embedded_ipv4(
    groups: &mut Vec<&str>,
    whole: &str,
) -> Result<Option<u32>, RgcidrError> {
    match groups.last() {
        Some(last) if last.contains('.') => {
            let v4 = parse_ipv4(last).map_err(|_| RgcidrError::InvalidFormat(whole.to_string()))?;
            groups.pop();
            Ok(Some(v4))
        }
        _ => Ok(None),
    }
}

fn push_ipv4_groups(values: &mut Vec<u16>, ipv4: Option<u32>) {
    if let Some(v4) = ipv4 {
        values.push((v4 >> 16) as u16);
        values.push((v4 & 0xFFFF) as u16);
    }
}

/// Parse a hex group of 1-4 significant digits. Groups longer than four
/// digits are accepted only when every extra leading digit is `0`.
fn parse_hex_group(g: &str, whole: &str) -> Result<u16, RgcidrError> {
    if g.is_empty() || g.len() > 32 || !g.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(RgcidrError::InvalidFormat(whole.to_string()));
    }
    if g.len() > 4 {
        let extra = g.len() - 4;
        if g.as_bytes()[..extra].iter().any(|&b| b != b'0') {
            return Err(RgcidrError::InvalidFormat(whole.to_string()));
        }
        u16::from_str_radix(&g[extra..], 16)
            .map_err(|_| RgcidrError::InvalidFormat(whole.to_string()))
    } else {
        u16::from_str_radix(g, 16).map_err(|_| RgcidrError::InvalidFormat(whole.to_string()))
    }
}

#[inline]
fn combine_groups(groups: &[u16]) -> u128 {
    debug_assert_eq!(groups.len(), 8);
    groups.iter().fold(0u128, |acc, &g| (acc << 16) | g as u128)
}

/// If `addr` carries an embedded IPv4 address in its low 32 bits under one
/// of the two recognized forms (`::ffff:a.b.c.d` or `::a.b.c.d` with the
/// upper 96 bits zero and the low 32 bits non-zero), return it. See spec §3.
#[inline]
pub fn embedded_ipv4(addr: u128) -> Option<u32> {
    let low32 = (addr & 0xFFFF_FFFF) as u32;
    let high = addr >> 32;
    if high == 0xffff {
        Some(low32)
    } else if high == 0 && low32 != 0 {
        Some(low32)
    } else {
        None
    }
}
