// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command implementations for build and upload operations.

use std::path::Path;

use anyhow::{bail, Context, Result};

use apollo3_common::port::select_port;
use apollo3_common::{
    pipeline, BuildConfig, PortCandidate, PortHint, PortProbe, UploadCommand, UploadVars,
};

use crate::ports::SerialPortProbe;
use crate::progress::TerminalProgress;
use crate::runner::SystemRunner;

/// Convert the linked image into the flashable binary.
pub fn build(config: &BuildConfig, elf: &Path) -> Result<()> {
    if !elf.is_file() {
        bail!("Firmware image not found: {}", elf.display());
    }

    let mut runner = SystemRunner::new();
    let mut progress = TerminalProgress::new();

    let bin = pipeline::build(config, &mut runner, &mut progress, elf)
        .with_context(|| format!("Failed to build {}", config.firmware_bin().display()))?;

    let size = std::fs::metadata(&bin)
        .with_context(|| format!("Failed to read {}", bin.display()))?
        .len();
    println!("Built {} ({} bytes)", bin.display(), size);
    Ok(())
}

/// Build and upload. Always runs port discovery and the uploader again.
pub fn upload(config: &BuildConfig, elf: &Path) -> Result<()> {
    if !elf.is_file() {
        bail!("Firmware image not found: {}", elf.display());
    }

    println!("Protocol: {} ({})", config.protocol(), config.selector());
    println!("Host:     {}", config.host());
    println!();

    let mut probe = SerialPortProbe;
    let mut runner = SystemRunner::new();
    let mut progress = TerminalProgress::new();

    let report = pipeline::upload(config, &mut probe, &mut runner, &mut progress, elf)
        .context("Upload failed")?;

    println!();
    println!("Firmware uploaded successfully via {}!", report.port);
    Ok(())
}

/// Print the toolchain and the resolved uploader command.
pub fn show(config: &BuildConfig, file: Option<&Path>) -> Result<()> {
    let toolchain = config.toolchain();
    println!("Toolchain:");
    println!("  CC:        {}", toolchain.cc);
    println!("  CXX:       {}", toolchain.cxx);
    println!("  AS:        {}", toolchain.as_);
    println!("  AR:        {} {}", toolchain.ar, toolchain.ar_flags.join(" "));
    println!("  LINK:      {}", toolchain.link);
    println!("  OBJCOPY:   {}", toolchain.objcopy);
    println!("  SIZE:      {}", toolchain.size);
    println!("  CXXFLAGS:  {}", toolchain.cxx_flags.join(" "));
    println!("  DEFINES:   {}", toolchain.define_flags().join(" "));
    println!();

    let uploader = config.uploader()?;
    let source = file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.firmware_bin());
    let port = match config.port() {
        PortHint::Explicit(port) => Some(port.clone()),
        PortHint::Auto => autodetected_port(&SerialPortProbe.candidates().unwrap_or_default()),
    };

    println!("Uploader ({}):", uploader.family());
    match &port {
        Some(port) => {
            let command = UploadCommand::new(
                &uploader,
                &UploadVars {
                    source: &source,
                    port,
                    tmp_dir: config.tmp_dir(),
                },
            );
            println!("  {}", command);
            if config.port() == &PortHint::Auto {
                println!("  (port autodetected now; upload probes again)");
            }
        }
        None => {
            println!("  {}", uploader.program().display());
            println!("  (no serial port found; the port is autodetected at upload)");
        }
    }
    if let Err(e) = uploader.ensure_present() {
        println!("  warning: {}", e);
    }
    Ok(())
}

/// Port the autodetector would pick from `candidates`.
fn autodetected_port(candidates: &[PortCandidate]) -> Option<String> {
    select_port(candidates).map(|p| p.name.clone())
}

/// List serial ports, best autodetection candidate first.
pub fn ports() -> Result<()> {
    let mut candidates = SerialPortProbe.candidates()?;
    if candidates.is_empty() {
        println!("No serial ports found.");
        return Ok(());
    }

    let selected = autodetected_port(&candidates);
    candidates.sort_by(|a, b| a.name.cmp(&b.name));

    println!("Serial ports:");
    for candidate in &candidates {
        let marker = if Some(&candidate.name) == selected.as_ref() {
            "*"
        } else {
            " "
        };
        println!(" {} {}", marker, candidate);
    }
    Ok(())
}
