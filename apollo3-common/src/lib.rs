// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Common types and logic for building and uploading Apollo3 firmware.
//!
//! The crate is split along the stages of the pipeline:
//! - [`platform`]: host OS tag used to pick the uploader binary variant
//! - [`toolchain`]: static arm-none-eabi tool names, flags and defines
//! - [`config`]: immutable pipeline configuration and its builder
//! - [`protocol`] / [`dispatch`]: uploader selection and command construction
//! - [`convert`]: ELF to raw binary conversion
//! - [`upload`]: port discovery followed by the uploader invocation
//! - [`pipeline`]: the `build` and `upload` actions
//!
//! Serial ports and child processes are reached only through the
//! [`port::PortProbe`] and [`process::ProcessRunner`] traits, so all of the
//! above can run without hardware.

pub mod config;
pub mod convert;
pub mod dispatch;
pub mod error;
pub mod pipeline;
pub mod platform;
pub mod port;
pub mod process;
pub mod progress;
pub mod protocol;
pub mod toolchain;
pub mod upload;

// Re-export commonly used types
pub use config::{BuildConfig, BuildConfigBuilder};
pub use dispatch::{dispatch, UploadCommand};
pub use error::{Error, ErrorKind, Result};
pub use platform::{resolve_host_tag, HostTag};
pub use port::{PortCandidate, PortHint, PortKind, PortProbe};
pub use process::{Invocation, ProcessRunner, ToolOutput};
pub use progress::{NullProgress, Progress, ProgressEvent};
pub use protocol::{UploadProtocol, UploadVars, Uploader};
pub use toolchain::Toolchain;
