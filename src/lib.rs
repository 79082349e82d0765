// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `rgcidr` matching engine: parse IPv4/IPv6 literals and CIDR/range
//! patterns, compile them into a merged interval index, scan free-form
//! text for candidate addresses, and decide per-line emit/suppress.
//!
//! This crate is the engine only — argument parsing, file/stdin reading,
//! and process exit handling live in the `rgcidr` binary (`src/main.rs`,
//! `src/cli.rs`), which depends on it like any other consumer would.

pub mod address;
pub mod error;
pub mod index;
pub mod pattern;
pub mod policy;
pub mod scanner;
mod strings;

pub use address::Family;
pub use error::{RgcidrError, Result};
pub use index::{Interval, PatternIndex};
pub use pattern::{compile_batch, compile_token, Pattern};
pub use policy::{decide_emit, ExitStatus, Flags, Policy, SizeClass};
pub use scanner::Scanner;

/// Compile a batch pattern string into a ready-to-query [`PatternIndex`].
/// Thin convenience wrapper over [`compile_batch`] + [`Pattern::lower`] for
/// the common case where callers don't need the intermediate `Pattern`
/// list (spec §4.B → §4.C data flow).
pub fn build_index(batch: &str, strict: bool) -> Result<PatternIndex> {
    let patterns = compile_batch(batch, strict)?;
    let mut v4 = Vec::new();
    let mut v6 = Vec::new();
    for p in patterns {
        let (family, interval) = p.lower();
        match family {
            Family::V4 => v4.push(interval),
            Family::V6 => v6.push(interval),
        }
    }
    Ok(PatternIndex::build(v4, v6))
}
