// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::strings::*;
use std::{error, fmt, io};

/// Every fatal condition the engine or its CLI shell can raise.
///
/// Per-candidate scanner parse failures (spec §4.D) are *not* represented
/// here: they are silently skipped inline and never surface as an error.
#[derive(Debug)]
pub enum RgcidrError {
    /// Malformed address literal: wrong grouping, stray separators, etc.
    InvalidFormat(String),
    /// A numeric field parsed but was out of range for its family (e.g. an
    /// IPv4 octet >= 256).
    InvalidOctet(String),
    /// CIDR mask bits outside `0..=32` (v4) or `0..=128` (v6).
    InvalidMask(String),
    /// Range `A-B` with `A > B`.
    InvalidRange(String),
    /// Strict-align mode (`-s`): supplied CIDR address != network address.
    MisalignedCidr(String),
    /// `-f`/batch pattern string had zero tokens after tokenizing.
    EmptyBatch,
    /// Failed to open or read a pattern file.
    PatternFileIo { path: String, source: io::Error },
    /// Pattern file had no non-comment, non-blank lines.
    PatternFileEmpty { path: String },
    /// Failed to read input (stdin or a named file).
    InputIo(io::Error),
    /// Failed to write to stdout.
    OutputIo(io::Error),
}

impl fmt::Display for RgcidrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RgcidrError::InvalidFormat(s) => write!(f, "{ERR_INVALID_FORMAT}: '{s}'"),
            RgcidrError::InvalidOctet(s) => write!(f, "{ERR_INVALID_OCTET}: '{s}'"),
            RgcidrError::InvalidMask(s) => write!(f, "{ERR_INVALID_MASK}: '{s}'"),
            RgcidrError::InvalidRange(s) => write!(f, "{ERR_INVALID_RANGE}: '{s}'"),
            RgcidrError::MisalignedCidr(s) => write!(f, "{ERR_MISALIGNED_CIDR}: '{s}'"),
            RgcidrError::EmptyBatch => write!(f, "{ERR_EMPTY_BATCH}"),
            RgcidrError::PatternFileIo { path, source } => {
                write!(f, "{ERR_PATTERN_FILE_IO} '{path}': {source}")
            }
            RgcidrError::PatternFileEmpty { path } => {
                write!(f, "{ERR_PATTERN_FILE_EMPTY}: '{path}'")
            }
            RgcidrError::InputIo(source) => write!(f, "{ERR_INPUT_IO}: {source}"),
            RgcidrError::OutputIo(source) => write!(f, "{ERR_OUTPUT_IO}: {source}"),
        }
    }
}

impl error::Error for RgcidrError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            RgcidrError::PatternFileIo { source, .. } => Some(source),
            RgcidrError::InputIo(source) | RgcidrError::OutputIo(source) => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RgcidrError>;
