// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! External process abstraction.
//!
//! The pipeline never spawns processes directly. It hands an [`Invocation`]
//! to a [`ProcessRunner`], which lets tests substitute a fake.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// One external tool run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Kill the process if it runs longer than this.
    pub timeout: Option<Duration>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Short name for messages (file name of the program).
    pub fn tool_name(&self) -> String {
        tool_name(&self.program)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

fn tool_name(program: &Path) -> String {
    program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string())
}

/// Result of a finished process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code; `None` when killed by a signal.
    pub code: Option<i32>,
    /// Combined stdout/stderr.
    pub output: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a non-zero exit into `Error::ExternalTool`.
    pub fn check(self, invocation: &Invocation) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(Error::ExternalTool {
                tool: invocation.tool_name(),
                code: self.code,
                output: self.output,
            })
        }
    }
}

/// Runs external tools to completion.
pub trait ProcessRunner {
    /// Run `invocation`, calling `on_line` for each line of output as it
    /// arrives. Blocks until the process exits or its timeout elapses.
    fn run(&mut self, invocation: &Invocation, on_line: &mut dyn FnMut(&str)) -> Result<ToolOutput>;
}
