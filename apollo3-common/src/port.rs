// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Upload port hints and the autodetection policy.

use std::fmt;

use crate::error::Result;

/// Where to upload: an explicit port or "find one".
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum PortHint {
    #[default]
    Auto,
    Explicit(String),
}

impl PortHint {
    /// Empty strings and `auto` (any case) mean autodetect.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => PortHint::Auto,
            Some(v) if v.eq_ignore_ascii_case("auto") => PortHint::Auto,
            Some(v) => PortHint::Explicit(v.to_string()),
        }
    }
}

/// Kind of serial port as reported by the OS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PortKind {
    Usb { vid: u16, pid: u16 },
    Bluetooth,
    Pci,
    Unknown,
}

/// A serial port the autodetector may pick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortCandidate {
    pub name: String,
    pub kind: PortKind,
}

impl PortCandidate {
    pub fn new(name: impl Into<String>, kind: PortKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    fn rank(&self) -> u8 {
        match self.kind {
            PortKind::Usb { .. } => 0,
            PortKind::Unknown | PortKind::Pci => 1,
            PortKind::Bluetooth => 2,
        }
    }
}

impl fmt::Display for PortCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PortKind::Usb { vid, pid } => write!(f, "{} (USB {:04x}:{:04x})", self.name, vid, pid),
            PortKind::Bluetooth => write!(f, "{} (Bluetooth)", self.name),
            PortKind::Pci => write!(f, "{} (PCI)", self.name),
            PortKind::Unknown => write!(f, "{}", self.name),
        }
    }
}

/// Source of serial port candidates.
pub trait PortProbe {
    fn candidates(&mut self) -> Result<Vec<PortCandidate>>;
}

/// Pick the best port: USB first, then anything else, Bluetooth last.
/// Ties are broken by name.
pub fn select_port(candidates: &[PortCandidate]) -> Option<&PortCandidate> {
    candidates
        .iter()
        .min_by(|a, b| a.rank().cmp(&b.rank()).then_with(|| a.name.cmp(&b.name)))
}
