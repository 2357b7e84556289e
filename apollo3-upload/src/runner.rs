// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Process runner backed by `std::process`, with a bounded wait.

use std::io::{BufRead, BufReader, Read};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use apollo3_common::{Error, Invocation, ProcessRunner, ToolOutput};

/// Interval at which the runner checks the deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Spawns real processes and streams their output line by line.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(
        &mut self,
        invocation: &Invocation,
        on_line: &mut dyn FnMut(&str),
    ) -> apollo3_common::Result<ToolOutput> {
        let tool = invocation.tool_name();
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::Spawn {
                tool: tool.clone(),
                source,
            })?;

        let (tx, rx) = mpsc::channel();
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(forward_lines(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(forward_lines(stderr, tx.clone()));
        }
        drop(tx);

        let deadline = invocation.timeout.map(|t| Instant::now() + t);
        let mut output = String::new();

        // Drain output until both pipes close
        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(line) => {
                    on_line(&line);
                    output.push_str(&line);
                    output.push('\n');
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            if expired(deadline) {
                return Err(kill(&mut child, &tool, invocation.timeout));
            }
        }

        for reader in readers {
            let _ = reader.join();
        }

        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if expired(deadline) {
                return Err(kill(&mut child, &tool, invocation.timeout));
            }
            thread::sleep(POLL_INTERVAL);
        };

        log::debug!("{} exited with {}", tool, status);
        Ok(ToolOutput {
            code: status.code(),
            output,
        })
    }
}

fn forward_lines<R: Read + Send + 'static>(pipe: R, tx: Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut reader = BufReader::new(pipe);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    let line = line.trim_end_matches(['\r', '\n']).to_string();
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

fn expired(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|d| Instant::now() >= d)
}

fn kill(child: &mut Child, tool: &str, timeout: Option<Duration>) -> Error {
    log::warn!("Killing {} after timeout", tool);
    let _ = child.kill();
    let _ = child.wait();
    Error::ToolTimeout {
        tool: tool.to_string(),
        after: timeout.unwrap_or_default(),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Invocation {
        Invocation::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[test]
    fn test_streams_lines_and_reports_exit_code() {
        let mut lines = Vec::new();
        let out = SystemRunner::new()
            .run(&sh("echo one; echo two; exit 3"), &mut |l: &str| {
                lines.push(l.to_string())
            })
            .unwrap();

        assert_eq!(out.code, Some(3));
        assert_eq!(lines, vec!["one", "two"]);
        assert!(out.output.contains("one\ntwo"));
        assert!(!out.success());
    }

    #[test]
    fn test_captures_stderr() {
        let out = SystemRunner::new()
            .run(&sh("echo oops >&2"), &mut |_: &str| {})
            .unwrap();
        assert!(out.success());
        assert_eq!(out.output.trim(), "oops");
    }

    #[test]
    fn test_timeout_kills_process() {
        let inv = sh("sleep 5").with_timeout(Some(Duration::from_millis(200)));
        let start = Instant::now();
        let err = SystemRunner::new().run(&inv, &mut |_: &str| {}).unwrap_err();

        assert!(matches!(err, Error::ToolTimeout { .. }));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_missing_program_is_a_spawn_error() {
        let inv = Invocation::new("/nonexistent/uploader", Vec::new());
        let err = SystemRunner::new().run(&inv, &mut |_: &str| {}).unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }
}
