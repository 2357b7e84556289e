// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Build and upload tool for Apollo3 boards.
//!
//! Usage:
//!   apollo3-upload --framework-dir ~/fw build firmware.elf
//!   apollo3-upload --framework-dir ~/fw --protocol asb upload firmware.elf
//!   apollo3-upload --framework-dir ~/fw --port /dev/ttyUSB0 show
//!   apollo3-upload ports

mod cli;
mod commands;
mod ports;
mod progress;
mod runner;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

/// Log level for the `-v` count.
fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // RUST_LOG, when set, overrides the -v level
    env_logger::Builder::new()
        .filter_level(log_level(args.verbose))
        .parse_default_env()
        .init();

    cli::run(args)
}
