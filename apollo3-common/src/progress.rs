// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Progress events emitted by the pipeline stages.

use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Converting the linked image into a flashable binary.
    Converting { elf: PathBuf, bin: PathBuf },
    /// Port discovery started.
    FindingPort,
    /// Port discovery finished.
    PortSelected(String),
    /// Uploader invocation started.
    Uploading { source: PathBuf, command: String },
    /// A line printed by an external tool.
    ToolOutput(String),
    /// An external tool finished successfully.
    Finished { tool: String },
}

/// Receiver of progress events.
pub trait Progress {
    fn event(&mut self, event: ProgressEvent);
}

/// Discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullProgress;

impl Progress for NullProgress {
    fn event(&mut self, _event: ProgressEvent) {}
}

/// Records events in order.
impl Progress for Vec<ProgressEvent> {
    fn event(&mut self, event: ProgressEvent) {
        self.push(event);
    }
}
