// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message text for [`crate::error::RgcidrError`], kept separate from the
//! error enum itself so the wording can be tuned without touching logic.

pub(crate) static ERR_INVALID_FORMAT: &str = "invalid address format";
pub(crate) static ERR_INVALID_OCTET: &str = "IPv4 octet out of range (0-255)";
pub(crate) static ERR_INVALID_MASK: &str = "CIDR mask out of range for address family";
pub(crate) static ERR_INVALID_RANGE: &str = "range start is greater than range end";
pub(crate) static ERR_MISALIGNED_CIDR: &str =
    "CIDR address is not aligned to its mask (strict mode)";
pub(crate) static ERR_EMPTY_BATCH: &str = "pattern batch contained no tokens";
pub(crate) static ERR_PATTERN_FILE_IO: &str = "failed to read pattern file";
pub(crate) static ERR_PATTERN_FILE_EMPTY: &str =
    "pattern file contained no patterns after comments/blanks were skipped";
pub(crate) static ERR_INPUT_IO: &str = "failed to read input";
pub(crate) static ERR_OUTPUT_IO: &str = "failed to write output";
