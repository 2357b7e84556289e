// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! ELF to raw binary conversion.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::error::Result;
use crate::process::{Invocation, ProcessRunner};
use crate::progress::{Progress, ProgressEvent};
use crate::toolchain::Toolchain;

/// `<objcopy> -O binary <elf> <bin>`
pub fn objcopy_invocation(toolchain: &Toolchain, elf: &Path, bin: &Path) -> Invocation {
    Invocation::new(
        &toolchain.objcopy,
        vec![
            "-O".to_string(),
            "binary".to_string(),
            elf.display().to_string(),
            bin.display().to_string(),
        ],
    )
}

/// Convert `elf` into `<build_dir>/firmware.bin`.
///
/// Creates the build directory if needed. A non-zero objcopy exit is
/// returned as `ExternalTool` and the output file must not be used.
pub fn convert(
    config: &BuildConfig,
    runner: &mut dyn ProcessRunner,
    progress: &mut dyn Progress,
    elf: &Path,
) -> Result<PathBuf> {
    let bin = config.firmware_bin();
    fs::create_dir_all(config.build_dir())?;

    progress.event(ProgressEvent::Converting {
        elf: elf.to_path_buf(),
        bin: bin.clone(),
    });

    let invocation = objcopy_invocation(config.toolchain(), elf, &bin);
    log::debug!("Running {}", invocation);

    runner
        .run(&invocation, &mut |line: &str| {
            progress.event(ProgressEvent::ToolOutput(line.to_string()))
        })?
        .check(&invocation)?;

    progress.event(ProgressEvent::Finished {
        tool: invocation.tool_name(),
    });
    Ok(bin)
}
