//! Types for extension builds.
//!
//! This module defines the build configuration, the options and flags the
//! frontend passes in, the per-extension report, and the error taxonomy.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::consts::DEFAULT_JOBS;
use crate::platform::arch::Arch;
use crate::platform::{module_suffix, paths};

/// Build type handed to both toolchain phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Configuration {
  Debug,
  Release,
}

impl Configuration {
  pub fn from_debug(debug: bool) -> Self {
    if debug { Self::Debug } else { Self::Release }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Debug => "Debug",
      Self::Release => "Release",
    }
  }
}

impl fmt::Display for Configuration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Per-invocation switches passed through from the packaging frontend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildFlags {
  /// Build the Debug configuration instead of Release.
  pub debug: bool,
  /// Configure only: skip compilation and artifact staging.
  pub dry_run: bool,
}

/// Resolved settings shared by every extension in a run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
  /// Root of the per-extension scratch trees.
  pub temp_root: PathBuf,
  /// Root the packaging step reads staged artifacts from.
  pub lib_root: PathBuf,
  /// Stage into the source root instead of `lib_root`.
  pub inplace: bool,
  /// Native-module filename suffix, including the leading dot.
  pub ext_suffix: String,
  /// Toolchain program for both phases.
  pub toolchain: String,
  /// Parallelism hint for the build phase.
  pub jobs: u32,
  /// Interpreter the module links against; defaults to the current executable.
  pub interpreter: Option<PathBuf>,
  /// Architecture passed to configure.
  pub arch: Arch,
}

impl Default for BuildOptions {
  fn default() -> Self {
    let base = paths::build_base();
    Self {
      temp_root: paths::temp_root(&base),
      lib_root: paths::lib_root(&base),
      inplace: false,
      ext_suffix: module_suffix().to_string(),
      toolchain: paths::toolchain(),
      jobs: DEFAULT_JOBS,
      interpreter: None,
      arch: Arch::host(),
    }
  }
}

/// Outcome of building a single extension.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
  pub extension: String,
  pub configuration: Configuration,
  pub architecture: Arch,
  pub output_path: PathBuf,
  /// Staged artifact, or `None` for a dry run.
  pub staged: Option<PathBuf>,
  pub dry_run: bool,
  #[serde(serialize_with = "serialize_millis")]
  pub elapsed: Duration,
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

/// Errors that can occur while building an extension.
#[derive(Debug, Error)]
pub enum BuildError {
  /// `run` was called without any extensions.
  #[error("no extensions to build")]
  NoExtensions,

  /// The configure phase exited unsuccessfully.
  #[error("configure failed for `{extension}` (exit code {code:?})\n{output}")]
  ConfigureFailed {
    extension: String,
    code: Option<i32>,
    output: String,
  },

  /// The build phase exited unsuccessfully.
  #[error("build failed for `{extension}` (exit code {code:?})\n{output}")]
  CompileFailed {
    extension: String,
    code: Option<i32>,
    output: String,
  },

  /// The toolchain could not be started at all.
  #[error("failed to launch `{program}`: {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },

  /// Directory preparation, working-directory changes, or artifact copy failed.
  #[error("failed to {op} {}: {source}", path.display())]
  Filesystem {
    op: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The build succeeded but produced no file with the artifact's name.
  #[error("no `{filename}` produced for `{extension}` under {}", search_root.display())]
  ArtifactNotFound {
    extension: String,
    filename: String,
    search_root: PathBuf,
  },

  /// More than one file with the artifact's name exists in the build tree.
  #[error("ambiguous artifact `{filename}` for `{extension}`: {}", display_paths(candidates))]
  AmbiguousArtifact {
    extension: String,
    filename: String,
    candidates: Vec<PathBuf>,
  },

  /// The current executable could not be resolved for the configure step.
  #[error("failed to resolve the interpreter executable: {0}")]
  Interpreter(#[source] io::Error),
}

impl BuildError {
  pub(crate) fn fs(op: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
    let path = path.into();
    move |source| Self::Filesystem { op, path, source }
  }
}

fn display_paths(paths: &[PathBuf]) -> String {
  paths
    .iter()
    .map(|p| p.display().to_string())
    .collect::<Vec<_>>()
    .join(", ")
}
