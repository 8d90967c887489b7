//! Subprocess execution
//!
//! Toolchain probes and install commands are spawned through
//! [`CommandRunner`], so the builder can be driven by [`ScriptedRunner`]
//! without any Node.js installation.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::process::Command;
use std::sync::Mutex;

use crate::core::events::EventLog;

/// Captured result of a finished subprocess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` when the process was killed by a signal
    pub status: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Runs a program to completion and captures its output
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, optionally in `dir`
    ///
    /// Spawn failures are returned as `Err`; a process that ran but exited
    /// unsuccessfully is `Ok` with `success == false`.
    fn run(&self, program: &str, args: &[&str], dir: Option<&Path>) -> io::Result<CommandOutput>;
}

/// Render a command line for logs and error messages
pub fn render_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// [`CommandRunner`] that spawns real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], dir: Option<&Path>) -> io::Result<CommandOutput> {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = dir {
            command.current_dir(dir);
        }

        let output = command.output()?;
        Ok(CommandOutput {
            status: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// [`CommandRunner`] that answers from a fixed script
///
/// Responses are keyed by the rendered command line (`"npm -v"`). Anything
/// not scripted fails to spawn with `NotFound`, like a missing binary.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Mutex<HashMap<String, CommandOutput>>,
    calls: Mutex<Vec<String>>,
    events: Option<EventLog>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every invocation into `events`
    pub fn with_events(mut self, events: EventLog) -> Self {
        self.events = Some(events);
        self
    }

    /// Script a successful run printing `stdout`
    pub fn respond(self, command_line: &str, stdout: &str) -> Self {
        self.respond_with(command_line, CommandOutput::ok(stdout))
    }

    /// Script a run exiting with `status`
    pub fn fail(self, command_line: &str, status: i32, stderr: &str) -> Self {
        self.respond_with(command_line, CommandOutput::failed(status, stderr))
    }

    pub fn respond_with(self, command_line: &str, output: CommandOutput) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(command_line.to_string(), output);
        self
    }

    /// Every command line run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&str], dir: Option<&Path>) -> io::Result<CommandOutput> {
        let command_line = render_command(program, args);
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(command_line.clone());
        if let Some(events) = &self.events {
            match dir {
                Some(dir) => events.record(format!("run {} in {}", command_line, dir.display())),
                None => events.record(format!("run {}", command_line)),
            }
        }

        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&command_line)
            .cloned()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{}: command not found", program),
                )
            })
    }
}
