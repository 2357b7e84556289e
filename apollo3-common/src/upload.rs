// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Upload executor: port discovery, then the uploader run.
//!
//! Both stages run on every call. Nothing is cached between uploads, so
//! uploading the same binary twice probes and flashes twice.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{DEFAULT_PORT_WAIT, DEFAULT_UPLOAD_TIMEOUT};
use crate::dispatch::UploadCommand;
use crate::error::{Error, Result};
use crate::port::{select_port, PortHint, PortProbe};
use crate::process::{Invocation, ProcessRunner, ToolOutput};
use crate::progress::{Progress, ProgressEvent};
use crate::protocol::{UploadVars, Uploader};

/// Delay between two port probes while waiting for a board.
pub const PORT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// What a successful upload did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadReport {
    pub port: String,
    pub command: UploadCommand,
    pub output: ToolOutput,
}

/// Runs the two upload stages against injected port and process backends.
pub struct UploadExecutor<'a> {
    probe: &'a mut dyn PortProbe,
    runner: &'a mut dyn ProcessRunner,
    progress: &'a mut dyn Progress,
    port_wait: Duration,
    upload_timeout: Option<Duration>,
}

impl<'a> UploadExecutor<'a> {
    pub fn new(
        probe: &'a mut dyn PortProbe,
        runner: &'a mut dyn ProcessRunner,
        progress: &'a mut dyn Progress,
    ) -> Self {
        Self {
            probe,
            runner,
            progress,
            port_wait: DEFAULT_PORT_WAIT,
            upload_timeout: Some(DEFAULT_UPLOAD_TIMEOUT),
        }
    }

    /// How long discovery keeps probing. Zero probes exactly once.
    pub fn port_wait(mut self, wait: Duration) -> Self {
        self.port_wait = wait;
        self
    }

    pub fn upload_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// Stage 1: settle on a serial port.
    pub fn discover_port(&mut self, hint: &PortHint) -> Result<String> {
        self.progress.event(ProgressEvent::FindingPort);

        let port = match hint {
            PortHint::Explicit(port) => port.clone(),
            PortHint::Auto => self.probe_until_found()?,
        };

        log::info!("Upload port: {}", port);
        self.progress.event(ProgressEvent::PortSelected(port.clone()));
        Ok(port)
    }

    fn probe_until_found(&mut self) -> Result<String> {
        let start = Instant::now();
        loop {
            let candidates = self.probe.candidates()?;
            log::debug!("Probed {} serial port(s)", candidates.len());
            if let Some(port) = select_port(&candidates) {
                return Ok(port.name.clone());
            }

            let waited = start.elapsed();
            if waited >= self.port_wait {
                return Err(Error::PortNotFound { waited });
            }
            thread::sleep(PORT_POLL_INTERVAL.min(self.port_wait - waited));
        }
    }

    /// Stage 2: run the uploader and wait for it.
    pub fn invoke(&mut self, command: &UploadCommand, source: &Path) -> Result<ToolOutput> {
        self.progress.event(ProgressEvent::Uploading {
            source: source.to_path_buf(),
            command: command.to_string(),
        });

        let invocation = Invocation::new(command.program(), command.args().to_vec())
            .with_timeout(self.upload_timeout);
        log::debug!("Running {}", invocation);

        let progress = &mut *self.progress;
        let output = self
            .runner
            .run(&invocation, &mut |line: &str| {
                progress.event(ProgressEvent::ToolOutput(line.to_string()))
            })?
            .check(&invocation)?;

        self.progress.event(ProgressEvent::Finished {
            tool: invocation.tool_name(),
        });
        Ok(output)
    }

    /// Discover the port, render the command for it and run the uploader.
    pub fn execute(
        &mut self,
        uploader: &Uploader,
        source: &Path,
        tmp_dir: &Path,
        hint: &PortHint,
    ) -> Result<UploadReport> {
        let port = self.discover_port(hint)?;
        let command = UploadCommand::new(
            uploader,
            &UploadVars {
                source,
                port: &port,
                tmp_dir,
            },
        );
        let output = self.invoke(&command, source)?;
        Ok(UploadReport {
            port,
            command,
            output,
        })
    }
}
