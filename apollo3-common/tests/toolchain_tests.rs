// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for the toolchain record.

use apollo3_common::toolchain::{Toolchain, CPP_DEFINES};

#[test]
fn test_tool_names_use_arm_none_eabi_prefix() {
    let tc = Toolchain::apollo3();
    assert_eq!(tc.ar, "arm-none-eabi-ar");
    assert_eq!(tc.as_, "arm-none-eabi-as");
    assert_eq!(tc.cc, "arm-none-eabi-gcc");
    assert_eq!(tc.cxx, "arm-none-eabi-g++");
    assert_eq!(tc.gdb, "arm-none-eabi-gdb");
    assert_eq!(tc.objcopy, "arm-none-eabi-objcopy");
    assert_eq!(tc.ranlib, "arm-none-eabi-ranlib");
    assert_eq!(tc.size, "arm-none-eabi-size");
    assert_eq!(tc.link, tc.cc);
}

#[test]
fn test_flags() {
    let tc = Toolchain::default();
    assert_eq!(tc.ar_flags, vec!["rc"]);
    assert_eq!(tc.cxx_flags, vec!["-std=gnu++11"]);
    assert!(tc.as_flags.is_empty());
    assert!(tc.cc_flags.is_empty());
    assert!(tc.link_flags.is_empty());
    assert!(tc.libs.is_empty());
}

#[test]
fn test_defines_identify_part_and_package() {
    let tc = Toolchain::apollo3();
    assert_eq!(
        tc.cpp_defines,
        vec![
            "PART_apollo3",
            "AM_PACKAGE_BGA",
            "AM_PART_APOLLO3",
            "ARDUINO_ARCH_APOLLO3"
        ]
    );
    assert_eq!(tc.define_flags()[0], "-DPART_apollo3");
    assert_eq!(tc.define_flags().len(), CPP_DEFINES.len());
}

#[test]
fn test_custom_prefix() {
    let tc = Toolchain::with_prefix("/opt/gcc/bin/arm-none-eabi-");
    assert_eq!(tc.objcopy, "/opt/gcc/bin/arm-none-eabi-objcopy");
}
