// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use apollo3_common::config::{DEFAULT_BUILD_DIR, DEFAULT_PROTOCOL};
use apollo3_common::{BuildConfig, HostTag, PortHint};

use crate::commands;

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "apollo3-upload")]
#[command(version, about = "Build and upload tool for Apollo3 boards")]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Apollo3 framework package directory (contains tools/uploaders)
    #[arg(long, env = "APOLLO3_FRAMEWORK_DIR", global = true)]
    pub framework_dir: Option<PathBuf>,

    /// Build output directory
    #[arg(long, env = "BUILD_DIR", default_value = DEFAULT_BUILD_DIR, global = true)]
    pub build_dir: PathBuf,

    /// Upload protocol (any selector starting with "asb" or "svl")
    #[arg(long, env = "UPLOAD_PROTOCOL", default_value = DEFAULT_PROTOCOL, global = true)]
    pub protocol: String,

    /// Serial port (e.g., /dev/ttyUSB0); omit or "auto" to autodetect
    #[arg(short, long, env = "UPLOAD_PORT", global = true)]
    pub port: Option<String>,

    /// Override the host platform tag (linux, macosx, windows)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Scratch directory for the asb uploader (defaults to the build directory)
    #[arg(long, global = true)]
    pub tmp_dir: Option<PathBuf>,

    /// Seconds to wait for a serial port to appear
    #[arg(long, default_value = "5", global = true)]
    pub port_wait: u64,

    /// Seconds before the uploader is killed (0 = no limit)
    #[arg(long, default_value = "120", global = true)]
    pub upload_timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Convert a linked firmware image into the flashable binary
    Build {
        /// Linked firmware image
        #[arg(value_name = "ELF")]
        elf: PathBuf,
    },

    /// Build, then upload the binary to the board
    Upload {
        /// Linked firmware image
        #[arg(value_name = "ELF")]
        elf: PathBuf,
    },

    /// Print the toolchain and the uploader command without running anything
    Show {
        /// Binary to show the command for (defaults to the build output)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// List serial ports in the order autodetection would consider them
    Ports,
}

impl Cli {
    /// Assemble the pipeline configuration from the parsed flags.
    pub fn config(&self) -> Result<BuildConfig> {
        let framework_dir = self
            .framework_dir
            .clone()
            .context("No framework directory given (use --framework-dir or APOLLO3_FRAMEWORK_DIR)")?;

        let mut builder = BuildConfig::builder(framework_dir)
            .build_dir(&self.build_dir)
            .protocol(self.protocol.as_str())
            .port(PortHint::parse(self.port.as_deref()))
            .port_wait(Duration::from_secs(self.port_wait))
            .upload_timeout(match self.upload_timeout {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            });

        if let Some(host) = &self.host {
            builder = builder.host(HostTag::from_system_name(host));
        }
        if let Some(tmp_dir) = &self.tmp_dir {
            builder = builder.tmp_dir(tmp_dir);
        }

        Ok(builder.build()?)
    }
}

/// Execute the parsed CLI command.
pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Ports => commands::ports(),
        Commands::Build { elf } => commands::build(&cli.config()?, elf),
        Commands::Upload { elf } => commands::upload(&cli.config()?, elf),
        Commands::Show { file } => commands::show(&cli.config()?, file.as_deref()),
    }
}
