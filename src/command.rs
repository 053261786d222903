// -*- indent-tabs-mode: nil; tab-width: 2; -*-
// vim: set ts=&2 sw=2 et ai :

//! Execution of external commands with an explicit argument vector.

use std::process::Command;

use crate::log;
use crate::error::{Error, Result};

/// A program and its arguments. Never passed through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpCommand {
  program: String,
  args: Vec<String>,
}

impl IpCommand {
  pub fn new<S: Into<String>>(program: S) -> Self {
    IpCommand { program: program.into(), args: Vec::new() }
  }

  pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  pub fn get_args(&self) -> &[String] {
    &self.args
  }
}

impl std::fmt::Display for IpCommand {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
  /// Exit code, `None` if the process was killed by a signal.
  pub code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl CommandOutput {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }

  /// Turn an unsuccessful exit into `Error::CommandFailed`.
  pub fn check(self, command: &IpCommand) -> Result<Self> {
    if self.success() {
      return Ok(self);
    }

    let status = match self.code {
      Some(code) => code.to_string(),
      None => "signal".to_string(),
    };
    Err(Error::CommandFailed {
      command: command.to_string(),
      status,
      stderr: self.stderr.trim().to_string(),
    })
  }
}

/// Something that can run an `IpCommand` to completion.
pub trait CommandRunner {
  fn run(&mut self, command: &IpCommand) -> Result<CommandOutput>;

  /// Run and fail on a non-zero exit status.
  fn run_checked(&mut self, command: &IpCommand) -> Result<CommandOutput> {
    self.run(command)?.check(command)
  }
}

/// Runs commands on the host, blocking until each one exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&mut self, command: &IpCommand) -> Result<CommandOutput> {
    log::debug!("running {}", command);
    let output = Command::new(command.program())
      .args(command.get_args())
      .output()
      .map_err(|e| Error::Spawn { command: command.to_string(), source: e })?;

    let output = CommandOutput {
      code: output.status.code(),
      stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
      stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    log::trace!("{} exited with {:?}", command, output.code);
    Ok(output)
  }
}
