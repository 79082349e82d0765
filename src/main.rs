// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thin binary shell: parse arguments, bootstrap logging, stream input
//! line by line through the engine, and map the result to a process exit
//! code (spec §6).

mod cli;

use clap::Parser;
use cli::Cli;
use rgcidr::{build_index, Policy, RgcidrError, Scanner, SizeClass};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Open the input source: a named file, or standard input when none is
/// given. Boxed so both branches share one call site below.
fn open_input(path: Option<&str>) -> Result<Box<dyn BufRead>, RgcidrError> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(RgcidrError::InputIo)?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Rough size hint for [`SizeClass::for_run`]: a small named file gets the
/// small buffer, everything else (including stdin) gets the large one.
fn input_is_tiny(path: Option<&str>) -> bool {
    path.and_then(|p| std::fs::metadata(p).ok())
        .map(|m| m.len() < 4096)
        .unwrap_or(false)
}

fn run() -> Result<rgcidr::ExitStatus, RgcidrError> {
    let args = Cli::parse().resolve()?;
    init_logging(args.debug);

    let batch = cli::load_pattern_batch(&args.pattern_source)?;
    let index = build_index(&batch, args.flags.strict)?;

    let reader = open_input(args.input_path.as_deref())?;
    let size_class = SizeClass::for_run(args.flags.count, input_is_tiny(args.input_path.as_deref()));
    let stdout = io::stdout();
    let mut policy = Policy::new(stdout.lock(), args.flags, size_class);
    let mut scanner = Scanner::new();

    for line in reader.lines() {
        let line = line.map_err(RgcidrError::InputIo)?;
        let bytes = line.as_bytes();
        let (has_any, has_matching) = if args.flags.exact {
            scanner.scan_exact_start(bytes, &index)
        } else if args.flags.invert || args.flags.include_non_ip {
            scanner.scan_full(bytes, &index)
        } else {
            let matched = scanner.matches_early_exit(bytes, &index);
            (matched, matched)
        };
        policy.on_line(bytes, has_any, has_matching)?;
    }

    policy.finish()
}

fn main() -> ExitCode {
    match run() {
        Ok(status) => ExitCode::from(status.code() as u8),
        Err(err) => {
            error!(%err, "rgcidr failed");
            let _ = writeln!(io::stderr(), "rgcidr: {err}");
            ExitCode::from(2)
        }
    }
}
