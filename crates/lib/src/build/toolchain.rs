//! Argument construction for the two toolchain phases.

use std::ffi::OsString;
use std::path::Path;

use crate::build::runner::Invocation;
use crate::build::types::Configuration;
use crate::consts::INTERPRETER_VAR;
use crate::platform::arch::Arch;

/// Configure the project at `source_root` into the current directory.
pub fn configure(
  program: &str,
  source_root: &Path,
  configuration: Configuration,
  interpreter: &Path,
  arch: Arch,
) -> Invocation {
  let mut interpreter_def = OsString::from(format!("-D{}=", INTERPRETER_VAR));
  interpreter_def.push(interpreter);

  Invocation::new(program)
    .arg(source_root.as_os_str())
    .arg(format!("-DCMAKE_BUILD_TYPE={}", configuration))
    .arg(interpreter_def)
    .args(["-A", arch.as_str()])
}

/// Build the single `target` from the configured tree in the current directory.
pub fn build(program: &str, target: &str, configuration: Configuration, jobs: u32) -> Invocation {
  Invocation::new(program).args([
    "--build".to_string(),
    ".".to_string(),
    "--target".to_string(),
    target.to_string(),
    "--config".to_string(),
    configuration.to_string(),
    "-j".to_string(),
    jobs.to_string(),
  ])
}
