//! Blocking process execution for toolchain phases.
//!
//! The orchestrator talks to the native toolchain only through
//! [`CommandRunner`], so tests can swap in a recorder instead of spawning
//! real processes.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::process::Command;

use tracing::debug;

/// One external command: a program and its arguments.
///
/// The command inherits the process working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<OsString>,
}

impl Invocation {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg.to_string_lossy())?;
    }
    Ok(())
  }
}

/// Exit status and combined output of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
  /// Exit code, or `None` if the process was terminated by a signal.
  pub code: Option<i32>,
  /// Captured stdout followed by captured stderr.
  pub output: String,
}

impl CommandOutput {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

/// Runs a command to completion.
///
/// `Err` means the command could not be started or awaited; a command that
/// ran and failed is an `Ok` with a non-zero code.
pub trait CommandRunner {
  fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
  fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
    (**self).run(invocation)
  }
}

/// Spawns real processes and blocks until they exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
    debug!(cmd = %invocation, "spawning process");

    let output = Command::new(&invocation.program).args(&invocation.args).output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !stdout.is_empty() {
      debug!(stdout = %stdout, "command stdout");
    }
    if !stderr.is_empty() {
      debug!(stderr = %stderr, "command stderr");
    }

    Ok(CommandOutput {
      code: output.status.code(),
      output: format!("{}{}", stdout, stderr),
    })
  }
}
