// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Terminal progress reporting.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use apollo3_common::{Progress, ProgressEvent};

/// Spinner per stage; tool output is printed above it.
#[derive(Default)]
pub struct TerminalProgress {
    spinner: Option<ProgressBar>,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self { spinner: None }
    }

    fn start(&mut self, message: String) {
        self.stop();
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(pb);
    }

    fn stop(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

impl Progress for TerminalProgress {
    fn event(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::Converting { elf, bin } => {
                self.start(format!("Converting {} -> {}", elf.display(), bin.display()));
            }
            ProgressEvent::FindingPort => self.start("Finding Upload Port...".to_string()),
            ProgressEvent::PortSelected(port) => {
                self.stop();
                println!("Upload port: {}", port);
            }
            ProgressEvent::Uploading { source, command } => {
                log::debug!("{}", command);
                self.start(format!("Uploading {}", source.display()));
            }
            ProgressEvent::ToolOutput(line) => match &self.spinner {
                Some(pb) => pb.println(&line),
                None => println!("{}", line),
            },
            ProgressEvent::Finished { tool } => {
                self.stop();
                log::info!("{} finished", tool);
            }
        }
    }
}

impl Drop for TerminalProgress {
    fn drop(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.abandon();
        }
    }
}
