// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Upload protocol selection and uploader argument templates.
//!
//! Two uploader families exist:
//! - `asb`: Ambiq Secure Bootloader, talks to the ROM bootloader at 115200 baud
//! - `svl`: SparkFun Variable Loader, a resident bootloader at 921600 baud
//!
//! A selector belongs to a family when it starts with the family name, so
//! `asb2` or `svl-fast` are accepted as `asb` and `svl`.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::platform::HostTag;

// --- ASB constants ---

pub const ASB_LOAD_ADDRESS_BLOB: &str = "0x20000";
pub const ASB_MAGIC_NUM: &str = "0xCB";
pub const ASB_IMAGE_VERSION: &str = "0x0";
pub const ASB_LOAD_ADDRESS_WIRED: &str = "0xC000";
pub const ASB_IMAGE_TYPE: &str = "6";
pub const ASB_OPTIONS: &str = "0x1";
pub const ASB_BAUD: u32 = 115_200;
pub const ASB_RETRIES: &str = "2";

// --- SVL constants ---

pub const SVL_BAUD: u32 = 921_600;

/// An uploader family with a binary and a fixed argument template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    Asb,
    Svl,
}

impl Family {
    /// Families in match priority order.
    pub const ALL: [Family; 2] = [Family::Asb, Family::Svl];

    /// Name used as selector prefix, directory name and binary name.
    pub fn name(self) -> &'static str {
        match self {
            Family::Asb => "asb",
            Family::Svl => "svl",
        }
    }

    pub fn baud_rate(self) -> u32 {
        match self {
            Family::Asb => ASB_BAUD,
            Family::Svl => SVL_BAUD,
        }
    }

    /// Argument vector for one invocation. Order matters to the uploaders.
    pub fn args(self, vars: &UploadVars<'_>) -> Vec<String> {
        let source = vars.source.display().to_string();
        let baud = self.baud_rate().to_string();
        match self {
            Family::Asb => vec![
                "--bin".into(),
                source,
                "--load-address-blob".into(),
                ASB_LOAD_ADDRESS_BLOB.into(),
                "--magic-num".into(),
                ASB_MAGIC_NUM.into(),
                "-o".into(),
                vars.tmp_dir.display().to_string(),
                "--version".into(),
                ASB_IMAGE_VERSION.into(),
                "--load-address-wired".into(),
                ASB_LOAD_ADDRESS_WIRED.into(),
                "-i".into(),
                ASB_IMAGE_TYPE.into(),
                "--options".into(),
                ASB_OPTIONS.into(),
                "-b".into(),
                baud,
                "-port".into(),
                vars.port.to_string(),
                "-r".into(),
                ASB_RETRIES.into(),
                "-v".into(),
            ],
            Family::Svl => vec![
                vars.port.to_string(),
                "-f".into(),
                source,
                "-b".into(),
                baud,
                "-v".into(),
            ],
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Upload protocol parsed from a raw selector string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadProtocol {
    Asb,
    Svl,
    Unknown(String),
}

impl UploadProtocol {
    /// Parse a selector by prefix; the first matching family wins.
    pub fn parse(selector: &str) -> Self {
        match Family::ALL
            .into_iter()
            .find(|family| selector.starts_with(family.name()))
        {
            Some(Family::Asb) => UploadProtocol::Asb,
            Some(Family::Svl) => UploadProtocol::Svl,
            None => UploadProtocol::Unknown(selector.to_string()),
        }
    }

    /// The uploader family, or `UnknownProtocol` for an unrecognized selector.
    pub fn family(&self) -> Result<Family> {
        match self {
            UploadProtocol::Asb => Ok(Family::Asb),
            UploadProtocol::Svl => Ok(Family::Svl),
            UploadProtocol::Unknown(selector) => Err(Error::UnknownProtocol {
                selector: selector.clone(),
            }),
        }
    }
}

impl From<&str> for UploadProtocol {
    fn from(selector: &str) -> Self {
        Self::parse(selector)
    }
}

impl fmt::Display for UploadProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadProtocol::Asb => f.write_str("asb"),
            UploadProtocol::Svl => f.write_str("svl"),
            UploadProtocol::Unknown(selector) => write!(f, "unknown ({selector})"),
        }
    }
}

/// Values substituted into an argument template.
#[derive(Clone, Copy, Debug)]
pub struct UploadVars<'a> {
    /// Flashable binary to upload
    pub source: &'a Path,
    /// Serial port the board is attached to
    pub port: &'a str,
    /// Scratch directory for the asb output blob
    pub tmp_dir: &'a Path,
}

/// A located uploader binary together with its family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Uploader {
    family: Family,
    program: PathBuf,
}

impl Uploader {
    /// Compose the uploader location for `protocol` on `host`.
    ///
    /// Pure path composition:
    /// `<framework_root>/tools/uploaders/<family>/dist/<host>/<family>[.exe]`.
    pub fn locate(protocol: &UploadProtocol, host: &HostTag, framework_root: &Path) -> Result<Self> {
        let family = protocol.family()?;
        let program = framework_root
            .join("tools")
            .join("uploaders")
            .join(family.name())
            .join("dist")
            .join(host.as_str())
            .join(format!("{}{}", family.name(), host.exe_suffix()));
        Ok(Self { family, program })
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self, vars: &UploadVars<'_>) -> Vec<String> {
        self.family.args(vars)
    }

    /// Check that the uploader exists and can be executed.
    pub fn ensure_present(&self) -> Result<()> {
        let meta = match std::fs::metadata(&self.program) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::UploaderNotFound {
                    path: self.program.clone(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        if !meta.is_file() || !is_executable(&meta) {
            return Err(Error::UploaderNotExecutable {
                path: self.program.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(unix)]
fn is_executable(meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &std::fs::Metadata) -> bool {
    true
}
