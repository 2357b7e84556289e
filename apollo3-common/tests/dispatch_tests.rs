// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Tests for protocol parsing, uploader location and command construction.

use std::path::{Path, PathBuf};

use apollo3_common::protocol::Family;
use apollo3_common::{dispatch, Error, ErrorKind, HostTag, UploadProtocol, UploadVars, Uploader};

fn host(name: &str) -> HostTag {
    HostTag::from_system_name(name)
}

// =============================================================================
// Protocol parsing
// =============================================================================

#[test]
fn test_asb_prefix_selects_asb() {
    for selector in ["asb", "asb2", "asb-custom"] {
        assert_eq!(UploadProtocol::parse(selector), UploadProtocol::Asb);
    }
}

#[test]
fn test_svl_prefix_selects_svl() {
    for selector in ["svl", "svl2", "svl-fast"] {
        assert_eq!(UploadProtocol::parse(selector), UploadProtocol::Svl);
    }
}

#[test]
fn test_unknown_selector_is_kept() {
    assert_eq!(
        UploadProtocol::parse("unknown-protocol"),
        UploadProtocol::Unknown("unknown-protocol".to_string())
    );
    // Prefix match is case-sensitive and anchored at the start
    assert!(matches!(UploadProtocol::parse("ASB"), UploadProtocol::Unknown(_)));
    assert!(matches!(UploadProtocol::parse("my-svl"), UploadProtocol::Unknown(_)));
    assert!(matches!(UploadProtocol::parse(""), UploadProtocol::Unknown(_)));
}

#[test]
fn test_unknown_protocol_has_no_family() {
    let err = UploadProtocol::parse("jlink").family().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("jlink"));
}

// =============================================================================
// Uploader location
// =============================================================================

#[test]
fn test_uploader_path_layout() {
    let up = Uploader::locate(&UploadProtocol::Svl, &host("Linux"), Path::new("/fw")).unwrap();
    assert_eq!(up.program(), Path::new("/fw/tools/uploaders/svl/dist/linux/svl"));
    assert_eq!(up.family(), Family::Svl);
}

#[test]
fn test_uploader_path_has_exe_suffix_on_windows_only() {
    let root = Path::new("/fw");
    let win = Uploader::locate(&UploadProtocol::Asb, &host("Windows"), root).unwrap();
    assert_eq!(
        win.program(),
        Path::new("/fw/tools/uploaders/asb/dist/windows/asb.exe")
    );

    for name in ["Linux", "Darwin", "FreeBSD"] {
        let up = Uploader::locate(&UploadProtocol::Asb, &host(name), root).unwrap();
        assert!(up.program().extension().is_none(), "{name}");
    }
}

#[test]
fn test_locate_rejects_unknown_protocol() {
    let err = Uploader::locate(
        &UploadProtocol::Unknown("xmodem".to_string()),
        &host("Linux"),
        Path::new("/fw"),
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnknownProtocol { ref selector } if selector == "xmodem"));
}

// =============================================================================
// dispatch
// =============================================================================

#[test]
fn test_dispatch_asb_end_to_end() {
    let cmd = dispatch(
        "asb",
        &host("Darwin"),
        Path::new("/fw"),
        "/dev/ttyUSB0",
        Path::new("/build/firmware.bin"),
    )
    .unwrap();

    assert_eq!(cmd.program(), Path::new("/fw/tools/uploaders/asb/dist/macosx/asb"));
    assert_eq!(
        cmd.args(),
        [
            "--bin",
            "/build/firmware.bin",
            "--load-address-blob",
            "0x20000",
            "--magic-num",
            "0xCB",
            "-o",
            "/build",
            "--version",
            "0x0",
            "--load-address-wired",
            "0xC000",
            "-i",
            "6",
            "--options",
            "0x1",
            "-b",
            "115200",
            "-port",
            "/dev/ttyUSB0",
            "-r",
            "2",
            "-v",
        ]
    );
}

#[test]
fn test_dispatch_asb_variants_share_template() {
    let base = dispatch(
        "asb",
        &host("Linux"),
        Path::new("/fw"),
        "COM4",
        Path::new("/out/fw.bin"),
    )
    .unwrap();
    for selector in ["asb2", "asb-custom"] {
        let cmd = dispatch(
            selector,
            &host("Linux"),
            Path::new("/fw"),
            "COM4",
            Path::new("/out/fw.bin"),
        )
        .unwrap();
        assert_eq!(cmd, base, "{selector}");
    }
}

#[test]
fn test_dispatch_svl_positions() {
    let cmd = dispatch(
        "svl",
        &host("Windows"),
        Path::new("C:/fw"),
        "COM3",
        Path::new("C:/build/firmware.bin"),
    )
    .unwrap();

    assert!(cmd.program().ends_with("tools/uploaders/svl/dist/windows/svl.exe"));
    assert_eq!(cmd.args().len(), 6);
    assert_eq!(cmd.args()[0], "COM3");
    assert_eq!(cmd.args()[1], "-f");
    assert_eq!(cmd.args()[2], "C:/build/firmware.bin");
    assert_eq!(&cmd.args()[3..], ["-b", "921600", "-v"]);
}

#[test]
fn test_dispatch_unknown_is_configuration_error() {
    let err = dispatch(
        "unknown-protocol",
        &host("Linux"),
        Path::new("/fw"),
        "/dev/ttyUSB0",
        Path::new("/build/firmware.bin"),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("unknown-protocol"));
}

#[test]
fn test_dispatch_is_idempotent() {
    let run = || {
        dispatch(
            "svl",
            &host("Linux"),
            Path::new("/fw"),
            "/dev/ttyACM0",
            Path::new("/b/firmware.bin"),
        )
        .unwrap()
    };
    assert_eq!(run(), run());
    assert_eq!(run().to_string(), run().to_string());
}

#[test]
fn test_dispatch_bare_file_name_uses_current_dir() {
    let cmd = dispatch(
        "asb",
        &host("Linux"),
        Path::new("/fw"),
        "/dev/ttyUSB0",
        Path::new("firmware.bin"),
    )
    .unwrap();
    let o = cmd.args().iter().position(|a| a == "-o").unwrap();
    assert_eq!(cmd.args()[o + 1], ".");
    assert_eq!(cmd.args()[1], "firmware.bin");
}

#[test]
fn test_upload_vars_tmp_dir_is_used_by_asb() {
    let up = Uploader::locate(&UploadProtocol::Asb, &host("Linux"), Path::new("/fw")).unwrap();
    let tmp = PathBuf::from("/tmp/asb");
    let args = up.args(&UploadVars {
        source: Path::new("/b/firmware.bin"),
        port: "/dev/ttyUSB1",
        tmp_dir: &tmp,
    });
    let o = args.iter().position(|a| a == "-o").unwrap();
    assert_eq!(args[o + 1], "/tmp/asb");
}

#[test]
fn test_command_display_joins_tokens() {
    let cmd = dispatch(
        "svl",
        &host("Linux"),
        Path::new("/fw"),
        "/dev/ttyUSB0",
        Path::new("/b/firmware.bin"),
    )
    .unwrap();
    assert_eq!(
        cmd.to_string(),
        "/fw/tools/uploaders/svl/dist/linux/svl /dev/ttyUSB0 -f /b/firmware.bin -b 921600 -v"
    );
}
