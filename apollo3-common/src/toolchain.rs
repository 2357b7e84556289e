// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Static arm-none-eabi toolchain description for the Apollo3 target.

/// GNU tool prefix for the Cortex-M4F target.
pub const TOOL_PREFIX: &str = "arm-none-eabi-";

/// Preprocessor symbols identifying the part and the board package.
pub const CPP_DEFINES: [&str; 4] = [
    "PART_apollo3",
    "AM_PACKAGE_BGA",
    "AM_PART_APOLLO3",
    "ARDUINO_ARCH_APOLLO3",
];

/// C++ dialect passed to the C++ compiler.
pub const CXX_DIALECT: &str = "-std=gnu++11";

/// Tool names and flags for compiling, linking and post-processing firmware.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolchain {
    pub ar: String,
    pub as_: String,
    pub cc: String,
    pub cxx: String,
    pub gdb: String,
    pub objcopy: String,
    pub ranlib: String,
    pub size: String,
    /// The C compiler drives the link.
    pub link: String,

    pub ar_flags: Vec<String>,
    pub as_flags: Vec<String>,
    pub cc_flags: Vec<String>,
    pub cxx_flags: Vec<String>,
    pub link_flags: Vec<String>,
    pub cpp_defines: Vec<String>,
    pub libs: Vec<String>,
}

impl Toolchain {
    /// The toolchain used by the Apollo3 board package.
    pub fn apollo3() -> Self {
        Self::with_prefix(TOOL_PREFIX)
    }

    /// Same layout with a different tool prefix (e.g. an absolute toolchain path).
    pub fn with_prefix(prefix: &str) -> Self {
        let tool = |name: &str| format!("{prefix}{name}");
        Self {
            ar: tool("ar"),
            as_: tool("as"),
            cc: tool("gcc"),
            cxx: tool("g++"),
            gdb: tool("gdb"),
            objcopy: tool("objcopy"),
            ranlib: tool("ranlib"),
            size: tool("size"),
            link: tool("gcc"),
            ar_flags: vec!["rc".to_string()],
            as_flags: Vec::new(),
            cc_flags: Vec::new(),
            cxx_flags: vec![CXX_DIALECT.to_string()],
            link_flags: Vec::new(),
            cpp_defines: CPP_DEFINES.iter().map(|d| d.to_string()).collect(),
            libs: Vec::new(),
        }
    }

    /// `-D` flags for the preprocessor symbols.
    pub fn define_flags(&self) -> Vec<String> {
        self.cpp_defines.iter().map(|d| format!("-D{d}")).collect()
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::apollo3()
    }
}
