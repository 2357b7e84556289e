// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Host platform tag used to select the prebuilt uploader variant.
//!
//! Uploader packages ship one binary per host under
//! `dist/<tag>/`, where the tag is the lower-cased system name with the
//! macOS family renamed to `macosx`.

use std::fmt;

/// Canonical tag for the macOS family.
pub const MACOSX: &str = "macosx";

/// Tag for Windows hosts; uploaders carry an `.exe` suffix there.
pub const WINDOWS: &str = "windows";

/// Canonical host OS identifier, e.g. `linux`, `macosx`, `windows`.
///
/// Unrecognized names are kept as-is (lower-cased); they only fail later
/// when the uploader path does not exist.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HostTag(String);

impl HostTag {
    /// Map a system name (`Darwin`, `Linux`, `Windows`, ...) to its tag.
    pub fn from_system_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        match lower.as_str() {
            // `macos` is what the Rust standard library reports
            "darwin" | "macos" => Self(MACOSX.to_string()),
            _ => Self(lower),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_windows(&self) -> bool {
        self.0 == WINDOWS
    }

    /// Suffix appended to executables on this host.
    pub fn exe_suffix(&self) -> &'static str {
        if self.is_windows() {
            ".exe"
        } else {
            ""
        }
    }
}

impl fmt::Display for HostTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the tag of the running host.
pub fn resolve_host_tag() -> HostTag {
    HostTag::from_system_name(std::env::consts::OS)
}
