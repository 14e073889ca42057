//! Test utilities for extbuild-lib.
//!
//! Cross-platform shell helpers plus a fake toolchain that records every
//! invocation instead of spawning processes.

use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use crate::build::runner::{CommandOutput, CommandRunner, Invocation};

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// A toolchain call as the fake observed it.
#[derive(Debug, Clone)]
pub struct Recorded {
  pub invocation: Invocation,
  /// Working directory in effect when the call was made.
  pub cwd: PathBuf,
  /// Number of entries in `cwd` at call time.
  pub cwd_entries: usize,
}

impl Recorded {
  pub fn is_build(&self) -> bool {
    self.invocation.args.first().is_some_and(|a| a == "--build")
  }

  pub fn args(&self) -> Vec<String> {
    self
      .invocation
      .args
      .iter()
      .map(|a| a.to_string_lossy().into_owned())
      .collect()
  }
}

/// Fake toolchain.
///
/// A call whose first argument is `--build` is the build phase, anything
/// else is configure. The build phase writes every `producing` path
/// (relative to the working directory, `{module}` replaced by the last
/// dotted component of the target) with deterministic content.
#[derive(Default)]
pub struct RecordingRunner {
  calls: RefCell<Vec<Recorded>>,
  produce: Vec<String>,
  configure_failures: HashSet<String>,
  build_failure: Option<i32>,
}

impl RecordingRunner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn producing(mut self, template: &str) -> Self {
    self.produce.push(template.to_string());
    self
  }

  /// Fail configure when run inside the build tree named `extension`.
  pub fn failing_configure_in(mut self, extension: &str) -> Self {
    self.configure_failures.insert(extension.to_string());
    self
  }

  pub fn failing_build(mut self, code: i32) -> Self {
    self.build_failure = Some(code);
    self
  }

  pub fn calls(&self) -> Vec<Recorded> {
    self.calls.borrow().clone()
  }

  pub fn configure_calls(&self) -> Vec<Recorded> {
    self.calls().into_iter().filter(|c| !c.is_build()).collect()
  }

  pub fn build_calls(&self) -> Vec<Recorded> {
    self.calls().into_iter().filter(|c| c.is_build()).collect()
  }

  fn produce_artifacts(&self, cwd: &Path, target: &str) -> io::Result<()> {
    let module = target.rsplit('.').next().unwrap_or(target);
    for template in &self.produce {
      let path = cwd.join(template.replace("{module}", module));
      if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
      }
      std::fs::write(&path, format!("artifact:{}", target))?;
    }
    Ok(())
  }
}

impl CommandRunner for RecordingRunner {
  fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
    let cwd = std::env::current_dir()?;
    let cwd_entries = std::fs::read_dir(&cwd)?.count();
    let recorded = Recorded {
      invocation: invocation.clone(),
      cwd: cwd.clone(),
      cwd_entries,
    };
    let is_build = recorded.is_build();
    self.calls.borrow_mut().push(recorded);

    if is_build {
      if let Some(code) = self.build_failure {
        return Ok(CommandOutput {
          code: Some(code),
          output: "error: compilation terminated\n".to_string(),
        });
      }
      let target = invocation
        .args
        .get(3)
        .map(|t| t.to_string_lossy().into_owned())
        .unwrap_or_default();
      self.produce_artifacts(&cwd, &target)?;
    } else {
      let dir_name = cwd.file_name().map(|n| n.to_string_lossy().into_owned());
      if dir_name.is_some_and(|n| self.configure_failures.contains(&n)) {
        return Ok(CommandOutput {
          code: Some(1),
          output: "CMake Error: could not find compiler\n".to_string(),
        });
      }
    }

    Ok(CommandOutput {
      code: Some(0),
      output: String::new(),
    })
  }
}
