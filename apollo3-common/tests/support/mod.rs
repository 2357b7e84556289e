// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Fake port and process backends shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use apollo3_common::{Invocation, PortCandidate, PortProbe, ProcessRunner, Result, ToolOutput};

/// Records every invocation and answers with scripted exit codes.
#[derive(Default)]
pub struct FakeRunner {
    pub calls: Vec<Invocation>,
    /// Exit codes handed out in order; 0 once exhausted.
    pub codes: VecDeque<i32>,
    /// Lines "printed" by every run.
    pub lines: Vec<String>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_codes(codes: &[i32]) -> Self {
        Self {
            codes: codes.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn with_lines(mut self, lines: &[&str]) -> Self {
        self.lines = lines.iter().map(|l| l.to_string()).collect();
        self
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&mut self, invocation: &Invocation, on_line: &mut dyn FnMut(&str)) -> Result<ToolOutput> {
        self.calls.push(invocation.clone());
        let mut output = String::new();
        for line in &self.lines {
            on_line(line);
            output.push_str(line);
            output.push('\n');
        }
        Ok(ToolOutput {
            code: Some(self.codes.pop_front().unwrap_or(0)),
            output,
        })
    }
}

/// Returns scripted port lists, one per probe; empty once exhausted.
#[derive(Default)]
pub struct FakeProbe {
    pub rounds: VecDeque<Vec<PortCandidate>>,
    pub probes: usize,
}

impl FakeProbe {
    pub fn new(rounds: Vec<Vec<PortCandidate>>) -> Self {
        Self {
            rounds: rounds.into(),
            probes: 0,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl PortProbe for FakeProbe {
    fn candidates(&mut self) -> Result<Vec<PortCandidate>> {
        self.probes += 1;
        Ok(self.rounds.pop_front().unwrap_or_default())
    }
}
