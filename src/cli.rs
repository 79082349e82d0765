// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argument parsing and the "external collaborator" pieces spec.md
//! explicitly keeps out of the core engine: naming the flags, loading a
//! pattern file, and resolving the `PATTERN | -f PATTERNFILE` +
//! optional `FILE` positional shape (spec §6).

use clap::Parser;
use rgcidr::{Flags, RgcidrError};
use std::fs;
use tracing::debug;

/// `rgcidr [options] PATTERN [FILE]` or `rgcidr [options] -f PATTERNFILE [FILE]`.
#[derive(Parser, Debug)]
#[command(
    name = "rgcidr",
    version,
    about = "Filter lines containing IP addresses matching CIDR, range, or single-address patterns"
)]
pub struct Cli {
    /// Suppress line output; print the match count instead.
    #[arg(short = 'c', long = "count")]
    pub count: bool,

    /// Invert: a line matches iff it has an IP and no IP in the pattern set, or has no IP at all.
    #[arg(short = 'v', long = "invert")]
    pub invert: bool,

    /// Require strict CIDR alignment (reject a CIDR whose address isn't the network address).
    #[arg(short = 's', long = "strict")]
    pub strict: bool,

    /// Include lines with no IP address; lines that do have one get inverted semantics.
    #[arg(short = 'i', long = "include-non-ip")]
    pub include_non_ip: bool,

    /// Only consider the IP address (if any) at the very start of the line.
    #[arg(short = 'x', long = "exact")]
    pub exact: bool,

    /// Read patterns from PATTERNFILE (one per line; blanks and `#` comments are skipped).
    #[arg(short = 'f', long = "file", value_name = "PATTERNFILE")]
    pub pattern_file: Option<String>,

    /// Raise log verbosity to debug. Ambient diagnostics only; does not affect matching.
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// PATTERN, or (when `-f` is given) the input FILE.
    #[arg(value_name = "PATTERN_OR_FILE")]
    pattern_or_file: Option<String>,

    /// Input FILE, read only when `-f` is also given.
    #[arg(value_name = "FILE")]
    file_when_dash_f: Option<String>,
}

/// Where the pattern batch text comes from.
pub enum PatternSource {
    Inline(String),
    File(String),
}

/// The fully resolved invocation: flags plus where patterns and input
/// come from.
pub struct ResolvedArgs {
    pub flags: Flags,
    pub pattern_source: PatternSource,
    /// `None` means read from standard input.
    pub input_path: Option<String>,
    pub debug: bool,
}

impl Cli {
    /// Disambiguate the two positional slots per spec §6: with `-f`, the
    /// single positional (if present) is the input FILE; without it, the
    /// first positional is PATTERN and the second is FILE.
    pub fn resolve(self) -> Result<ResolvedArgs, RgcidrError> {
        let flags = Flags {
            count: self.count,
            invert: self.invert,
            include_non_ip: self.include_non_ip,
            exact: self.exact,
            strict: self.strict,
        };

        let (pattern_source, input_path) = match self.pattern_file {
            Some(path) => {
                if self.file_when_dash_f.is_some() {
                    return Err(RgcidrError::InvalidFormat(
                        "too many positional arguments with -f".to_string(),
                    ));
                }
                (PatternSource::File(path), self.pattern_or_file)
            }
            None => match self.pattern_or_file {
                Some(pattern) => (PatternSource::Inline(pattern), self.file_when_dash_f),
                None => {
                    return Err(RgcidrError::InvalidFormat(
                        "missing PATTERN (or -f PATTERNFILE)".to_string(),
                    ))
                }
            },
        };

        Ok(ResolvedArgs {
            flags,
            pattern_source,
            input_path,
            debug: self.debug,
        })
    }
}

/// Turn a [`PatternSource`] into the batch string `rgcidr::build_index`
/// expects, reading and filtering a pattern file if necessary.
pub fn load_pattern_batch(source: &PatternSource) -> Result<String, RgcidrError> {
    match source {
        PatternSource::Inline(s) => Ok(s.clone()),
        PatternSource::File(path) => {
            let text = fs::read_to_string(path).map_err(|source| RgcidrError::PatternFileIo {
                path: path.clone(),
                source,
            })?;
            let mut kept = Vec::new();
            for line in text.lines() {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }
                kept.push(trimmed);
            }
            if kept.is_empty() {
                return Err(RgcidrError::PatternFileEmpty { path: path.clone() });
            }
            debug!(path, patterns = kept.len(), "loaded pattern file");
            Ok(kept.join("\n"))
        }
    }
}
