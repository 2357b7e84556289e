// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! The `build` and `upload` actions.
//!
//! `build` produces the flashable binary. `upload` depends on it and is
//! never cached: every call converts, probes for a port and runs the
//! uploader again.

use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::convert::convert;
use crate::error::Result;
use crate::port::PortProbe;
use crate::process::ProcessRunner;
use crate::progress::Progress;
use crate::upload::{UploadExecutor, UploadReport};

/// Default action: turn the linked image into `<build_dir>/firmware.bin`.
pub fn build(
    config: &BuildConfig,
    runner: &mut dyn ProcessRunner,
    progress: &mut dyn Progress,
    elf: &Path,
) -> Result<PathBuf> {
    convert(config, runner, progress, elf)
}

/// Build, then flash the result.
///
/// The uploader is resolved and checked on disk first, so configuration
/// errors abort before any process is spawned.
pub fn upload(
    config: &BuildConfig,
    probe: &mut dyn PortProbe,
    runner: &mut dyn ProcessRunner,
    progress: &mut dyn Progress,
    elf: &Path,
) -> Result<UploadReport> {
    let uploader = config.uploader()?;
    uploader.ensure_present()?;
    log::debug!(
        "Using {} uploader at {}",
        uploader.family(),
        uploader.program().display()
    );

    let bin = build(config, runner, progress, elf)?;

    UploadExecutor::new(probe, runner, progress)
        .port_wait(config.port_wait())
        .upload_timeout(config.upload_timeout())
        .execute(&uploader, &bin, config.tmp_dir(), config.port())
}
