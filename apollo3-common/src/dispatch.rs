// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Upload protocol dispatch: selector in, complete uploader command out.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::platform::HostTag;
use crate::protocol::{UploadProtocol, UploadVars, Uploader};

/// A fully formed uploader command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadCommand {
    program: PathBuf,
    args: Vec<String>,
}

impl UploadCommand {
    /// Render `uploader`'s template with `vars`.
    pub fn new(uploader: &Uploader, vars: &UploadVars<'_>) -> Self {
        Self {
            program: uploader.program().to_path_buf(),
            args: uploader.args(vars),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn into_parts(self) -> (PathBuf, Vec<String>) {
        (self.program, self.args)
    }
}

impl fmt::Display for UploadCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Resolve the uploader and its arguments for `selector`.
///
/// The asb scratch directory is the directory holding `source`. Fails with
/// `UnknownProtocol` when the selector matches no family; nothing is
/// spawned here.
pub fn dispatch(
    selector: &str,
    host: &HostTag,
    framework_root: &Path,
    serial_port: &str,
    source: &Path,
) -> Result<UploadCommand> {
    let protocol = UploadProtocol::parse(selector);
    let uploader = Uploader::locate(&protocol, host, framework_root)?;
    // A bare file name has an empty parent
    let tmp_dir = source
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let vars = UploadVars {
        source,
        port: serial_port,
        tmp_dir,
    };
    log::debug!("Dispatched '{}' to {}", selector, uploader.program().display());
    Ok(UploadCommand::new(&uploader, &vars))
}
