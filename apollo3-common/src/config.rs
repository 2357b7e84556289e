// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Immutable pipeline configuration.
//!
//! A [`BuildConfig`] is assembled once through [`BuildConfigBuilder`] and then
//! passed by reference to every stage; no stage mutates it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::platform::{resolve_host_tag, HostTag};
use crate::port::PortHint;
use crate::protocol::{UploadProtocol, Uploader};
use crate::toolchain::Toolchain;

/// Default build output directory.
pub const DEFAULT_BUILD_DIR: &str = ".build";

/// Default upload protocol selector.
pub const DEFAULT_PROTOCOL: &str = "svl";

/// Base name of the flashable binary.
pub const FIRMWARE_NAME: &str = "firmware";

/// Suffix of the flashable binary.
pub const BIN_SUFFIX: &str = ".bin";

/// How long to keep probing for a serial port.
pub const DEFAULT_PORT_WAIT: Duration = Duration::from_secs(5);

/// How long an uploader may run before it is killed.
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Clone, Debug)]
pub struct BuildConfig {
    framework_root: PathBuf,
    build_dir: PathBuf,
    tmp_dir: PathBuf,
    host: HostTag,
    toolchain: Toolchain,
    selector: String,
    protocol: UploadProtocol,
    port: PortHint,
    port_wait: Duration,
    upload_timeout: Option<Duration>,
}

impl BuildConfig {
    pub fn builder(framework_root: impl Into<PathBuf>) -> BuildConfigBuilder {
        BuildConfigBuilder::new(framework_root)
    }

    pub fn framework_root(&self) -> &Path {
        &self.framework_root
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Scratch directory handed to the asb uploader.
    pub fn tmp_dir(&self) -> &Path {
        &self.tmp_dir
    }

    pub fn host(&self) -> &HostTag {
        &self.host
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// The selector as given by the user.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn protocol(&self) -> &UploadProtocol {
        &self.protocol
    }

    pub fn port(&self) -> &PortHint {
        &self.port
    }

    pub fn port_wait(&self) -> Duration {
        self.port_wait
    }

    pub fn upload_timeout(&self) -> Option<Duration> {
        self.upload_timeout
    }

    /// `<build_dir>/firmware.bin`
    pub fn firmware_bin(&self) -> PathBuf {
        self.build_dir.join(format!("{}{}", FIRMWARE_NAME, BIN_SUFFIX))
    }

    /// Locate the uploader for the configured protocol (no existence check).
    pub fn uploader(&self) -> Result<Uploader> {
        Uploader::locate(&self.protocol, &self.host, &self.framework_root)
    }
}

/// Builder for [`BuildConfig`].
#[derive(Clone, Debug)]
pub struct BuildConfigBuilder {
    framework_root: PathBuf,
    build_dir: PathBuf,
    tmp_dir: Option<PathBuf>,
    host: Option<HostTag>,
    toolchain: Toolchain,
    selector: String,
    port: PortHint,
    port_wait: Duration,
    upload_timeout: Option<Duration>,
}

impl BuildConfigBuilder {
    pub fn new(framework_root: impl Into<PathBuf>) -> Self {
        Self {
            framework_root: framework_root.into(),
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            tmp_dir: None,
            host: None,
            toolchain: Toolchain::apollo3(),
            selector: DEFAULT_PROTOCOL.to_string(),
            port: PortHint::Auto,
            port_wait: DEFAULT_PORT_WAIT,
            upload_timeout: Some(DEFAULT_UPLOAD_TIMEOUT),
        }
    }

    pub fn build_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.build_dir = dir.into();
        self
    }

    /// Defaults to the build directory.
    pub fn tmp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tmp_dir = Some(dir.into());
        self
    }

    /// Defaults to the running host.
    pub fn host(mut self, host: HostTag) -> Self {
        self.host = Some(host);
        self
    }

    pub fn toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    pub fn protocol(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    pub fn port(mut self, port: PortHint) -> Self {
        self.port = port;
        self
    }

    pub fn port_wait(mut self, wait: Duration) -> Self {
        self.port_wait = wait;
        self
    }

    /// `None` waits forever.
    pub fn upload_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// Fails with `FrameworkNotFound` if the framework root is not a
    /// directory. An unknown protocol selector is accepted here and only
    /// rejected when an upload is attempted.
    pub fn build(self) -> Result<BuildConfig> {
        if !self.framework_root.is_dir() {
            return Err(Error::FrameworkNotFound {
                path: self.framework_root,
            });
        }

        let protocol = UploadProtocol::parse(&self.selector);
        if let UploadProtocol::Unknown(selector) = &protocol {
            log::warn!("Upload protocol '{}' is not supported", selector);
        }

        let tmp_dir = self.tmp_dir.unwrap_or_else(|| self.build_dir.clone());

        Ok(BuildConfig {
            framework_root: self.framework_root,
            build_dir: self.build_dir,
            tmp_dir,
            host: self.host.unwrap_or_else(resolve_host_tag),
            toolchain: self.toolchain,
            selector: self.selector,
            protocol,
            port: self.port,
            port_wait: self.port_wait,
            upload_timeout: self.upload_timeout,
        })
    }
}
