// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component E: combine a line's scan result with the operating flags to
//! decide emit/suppress, and own the output buffer and match counters
//! (spec §4.E, §5).

use crate::error::RgcidrError;
use std::io::Write;

/// The operating flags named in spec §4.E/§6. `strict` only affects
/// pattern compilation (§4.B) but lives here too so the CLI has one place
/// to assemble the whole flag set.
#[derive(Clone, Copy, Debug, Default)]
pub struct Flags {
    pub count: bool,
    pub invert: bool,
    pub include_non_ip: bool,
    pub exact: bool,
    pub strict: bool,
}

/// Whether the process should exit `0` (some line was emitted) or `1`
/// (none was). Fatal errors are a separate `RgcidrError` path, exit `2`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExitStatus {
    Matched,
    NoMatch,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Matched => 0,
            ExitStatus::NoMatch => 1,
        }
    }
}

/// Which buffer size class to use (spec §5): tiny inputs and count mode
/// get a small buffer, everything else gets a larger one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SizeClass {
    Small,
    Large,
}

impl SizeClass {
    const SMALL_CAPACITY: usize = 1024;
    const LARGE_CAPACITY: usize = 64 * 1024;

    fn capacity(self) -> usize {
        match self {
            SizeClass::Small => Self::SMALL_CAPACITY,
            SizeClass::Large => Self::LARGE_CAPACITY,
        }
    }

    /// Count mode never writes line output, so it always gets the small
    /// class regardless of input size.
    pub fn for_run(count_mode: bool, input_is_tiny: bool) -> Self {
        if count_mode || input_is_tiny {
            SizeClass::Small
        } else {
            SizeClass::Large
        }
    }
}

/// The emit decision from spec §4.E, as plain logic independent of I/O so
/// it can be unit tested directly against the scenario table in spec §8.
///
/// `has_any_ip` / `has_matching_ip` are the scanner's `A` / `M`; `invert`
/// and `include_non_ip` are `v` and `i`.
pub fn decide_emit(has_any_ip: bool, has_matching_ip: bool, invert: bool, include_non_ip: bool) -> bool {
    if include_non_ip && !has_any_ip {
        return true;
    }
    if has_any_ip {
        let should_invert = invert || include_non_ip;
        if should_invert {
            !has_matching_ip
        } else {
            has_matching_ip
        }
    } else {
        invert
    }
}

/// Owns the append-only output buffer and the line/match counters for one
/// run. Not `Clone`: there is exactly one policy engine per invocation.
pub struct Policy<W: Write> {
    flags: Flags,
    match_count: u64,
    emitted_any: bool,
    buffer: Vec<u8>,
    flush_threshold: usize,
    writer: W,
}

impl<W: Write> Policy<W> {
    pub fn new(writer: W, flags: Flags, size_class: SizeClass) -> Self {
        let capacity = size_class.capacity();
        Policy {
            flags,
            match_count: 0,
            emitted_any: false,
            buffer: Vec::with_capacity(capacity),
            flush_threshold: capacity / 2,
            writer,
        }
    }

    /// Feed one scanned line's result through the emit decision. `line`
    /// must not include its trailing newline; this appends one.
    pub fn on_line(&mut self, line: &[u8], has_any_ip: bool, has_matching_ip: bool) -> Result<(), RgcidrError> {
        let emit = decide_emit(
            has_any_ip,
            has_matching_ip,
            self.flags.invert,
            self.flags.include_non_ip,
        );
        if !emit {
            return Ok(());
        }
        self.emitted_any = true;

        if self.flags.count {
            self.match_count += 1;
            return Ok(());
        }

        self.buffer.extend_from_slice(line);
        self.buffer.push(b'\n');
        if self.buffer.len() >= self.flush_threshold {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RgcidrError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        self.writer
            .write_all(&self.buffer)
            .map_err(RgcidrError::OutputIo)?;
        self.buffer.clear();
        Ok(())
    }

    /// Flush remaining output (or write the final count), then report the
    /// exit status for this run (spec §6 "Exit codes").
    pub fn finish(mut self) -> Result<ExitStatus, RgcidrError> {
        if self.flags.count {
            writeln!(self.writer, "{}", self.match_count).map_err(RgcidrError::OutputIo)?;
        } else {
            self.flush()?;
        }
        self.writer.flush().map_err(RgcidrError::OutputIo)?;
        Ok(if self.emitted_any {
            ExitStatus::Matched
        } else {
            ExitStatus::NoMatch
        })
    }
}
