// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Error types for the build and upload pipeline.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring, building or uploading.
#[derive(Debug, Error)]
pub enum Error {
    /// Protocol selector matched no known uploader family
    #[error("Unknown upload protocol '{selector}' (expected a selector starting with 'asb' or 'svl')")]
    UnknownProtocol { selector: String },

    /// Framework package directory is missing
    #[error("Framework directory not found: {}", .path.display())]
    FrameworkNotFound { path: PathBuf },

    /// No uploader binary at the resolved location
    #[error("Uploader not found: {}", .path.display())]
    UploaderNotFound { path: PathBuf },

    /// Uploader exists but cannot be executed
    #[error("Uploader is not executable: {}", .path.display())]
    UploaderNotExecutable { path: PathBuf },

    /// External tool exited unsuccessfully
    #[error("{tool} failed with exit code {}{}", .code.map_or_else(|| "none".to_string(), |c| c.to_string()), format_output(.output))]
    ExternalTool {
        tool: String,
        code: Option<i32>,
        output: String,
    },

    /// External tool did not finish in time and was killed
    #[error("{tool} timed out after {after:?}")]
    ToolTimeout { tool: String, after: Duration },

    /// External tool could not be started at all
    #[error("Failed to start {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// Autodetection found no serial port
    #[error("No upload port found (waited {waited:?})")]
    PortNotFound { waited: Duration },

    /// Port enumeration itself failed
    #[error("Failed to list serial ports: {0}")]
    PortProbe(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_output(output: &str) -> String {
    let trimmed = output.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{}", trimmed)
    }
}

/// Broad error classes used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad selector, missing framework or uploader. Raised before any process is spawned.
    Configuration,
    /// A compiler, converter or uploader run failed.
    ExternalTool,
    /// No serial port to upload to.
    PortNotFound,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownProtocol { .. }
            | Error::FrameworkNotFound { .. }
            | Error::UploaderNotFound { .. }
            | Error::UploaderNotExecutable { .. } => ErrorKind::Configuration,
            Error::ExternalTool { .. } | Error::ToolTimeout { .. } | Error::Spawn { .. } => {
                ErrorKind::ExternalTool
            }
            Error::PortNotFound { .. } | Error::PortProbe(_) => ErrorKind::PortNotFound,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}
