//! Per-extension build orchestration.
//!
//! A build moves through these states, restoring the working directory
//! before any terminal state is reported:
//!
//! ```text
//! Start -> TempPrepared -> OutputPrepared -> Configuring -> Configured
//!   -> (dry run: Done) -> Building -> Built -> ArtifactCopy -> Done
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::build::artifact;
use crate::build::cwd::WorkingDir;
use crate::build::runner::{CommandOutput, CommandRunner, Invocation};
use crate::build::toolchain;
use crate::build::types::{BuildError, BuildFlags, BuildOptions, BuildReport, Configuration};
use crate::extension::ExtensionDescriptor;
use crate::platform::arch::Arch;

/// Everything one `build` call needs to know, resolved up front.
#[derive(Debug, Clone)]
pub struct BuildContext {
  pub original_dir: PathBuf,
  pub build_temp: PathBuf,
  pub output_path: PathBuf,
  pub output_dir: PathBuf,
  pub output_filename: String,
  pub configuration: Configuration,
  pub architecture: Arch,
  pub dry_run: bool,
}

impl BuildContext {
  fn resolve(
    options: &BuildOptions,
    extension: &ExtensionDescriptor,
    flags: BuildFlags,
    original_dir: &Path,
  ) -> Result<Self, BuildError> {
    let build_temp = absolute(&options.temp_root.join(extension.name()))?;

    let lib_root = if options.inplace {
      original_dir.to_path_buf()
    } else {
      absolute(&options.lib_root)?
    };
    let output_path = extension.output_path(&lib_root, &options.ext_suffix);
    let output_dir = output_path.parent().map(Path::to_path_buf).unwrap_or(lib_root);

    Ok(Self {
      original_dir: original_dir.to_path_buf(),
      build_temp,
      output_path,
      output_dir,
      output_filename: extension.artifact_filename(&options.ext_suffix),
      configuration: Configuration::from_debug(flags.debug),
      architecture: options.arch,
      dry_run: flags.dry_run,
    })
  }
}

fn absolute(path: &Path) -> Result<PathBuf, BuildError> {
  std::path::absolute(path)
    .map(|p| dunce::simplified(&p).to_path_buf())
    .map_err(BuildError::fs("resolve", path))
}

/// Compiles extensions with the external toolchain and stages their artifacts.
pub struct Orchestrator<R> {
  runner: R,
  options: BuildOptions,
}

impl<R: CommandRunner> Orchestrator<R> {
  pub fn new(runner: R, options: BuildOptions) -> Self {
    Self { runner, options }
  }

  pub fn options(&self) -> &BuildOptions {
    &self.options
  }

  pub fn runner(&self) -> &R {
    &self.runner
  }

  /// Build every extension in order, stopping at the first failure.
  pub fn run(&self, extensions: &[ExtensionDescriptor], flags: BuildFlags) -> Result<Vec<BuildReport>, BuildError> {
    if extensions.is_empty() {
      return Err(BuildError::NoExtensions);
    }

    let mut reports = Vec::with_capacity(extensions.len());
    for extension in extensions {
      reports.push(self.build(extension, flags)?);
    }
    Ok(reports)
  }

  /// Build a single extension.
  ///
  /// The process working directory is the same on return as on entry,
  /// whether the build succeeded or failed.
  pub fn build(&self, extension: &ExtensionDescriptor, flags: BuildFlags) -> Result<BuildReport, BuildError> {
    let started = Instant::now();
    let mut cwd = WorkingDir::capture().map_err(BuildError::fs("read working directory", "."))?;
    let ctx = BuildContext::resolve(&self.options, extension, flags, cwd.original())?;

    info!(
      extension = %extension.name(),
      configuration = %ctx.configuration,
      arch = %ctx.architecture,
      dry_run = ctx.dry_run,
      "building extension"
    );

    prepare_temp(&ctx.build_temp)?;
    prepare_output(&ctx)?;

    cwd
      .enter(&ctx.build_temp)
      .map_err(BuildError::fs("enter", &ctx.build_temp))?;

    let interpreter = match &self.options.interpreter {
      Some(path) => path.clone(),
      None => std::env::current_exe().map_err(BuildError::Interpreter)?,
    };
    let configure = toolchain::configure(
      &self.options.toolchain,
      &ctx.original_dir,
      ctx.configuration,
      &interpreter,
      ctx.architecture,
    );
    let result = self.invoke(&configure)?;
    if !result.success() {
      return Err(BuildError::ConfigureFailed {
        extension: extension.name().to_string(),
        code: result.code,
        output: result.output,
      });
    }

    let staged = if ctx.dry_run {
      debug!(extension = %extension.name(), "dry run, skipping build");
      None
    } else {
      let build = toolchain::build(
        &self.options.toolchain,
        extension.name(),
        ctx.configuration,
        self.options.jobs,
      );
      let result = self.invoke(&build)?;
      if !result.success() {
        return Err(BuildError::CompileFailed {
          extension: extension.name().to_string(),
          code: result.code,
          output: result.output,
        });
      }

      Some(stage_artifact(extension, &ctx)?)
    };

    cwd
      .restore()
      .map_err(BuildError::fs("restore working directory", &ctx.original_dir))?;

    Ok(BuildReport {
      extension: extension.name().to_string(),
      configuration: ctx.configuration,
      architecture: ctx.architecture,
      output_path: ctx.output_path,
      staged,
      dry_run: ctx.dry_run,
      elapsed: started.elapsed(),
    })
  }

  fn invoke(&self, invocation: &Invocation) -> Result<CommandOutput, BuildError> {
    self.runner.run(invocation).map_err(|source| BuildError::Spawn {
      program: invocation.program.clone(),
      source,
    })
  }
}

/// Wipe and recreate the extension's scratch tree.
fn prepare_temp(build_temp: &Path) -> Result<(), BuildError> {
  match fs::remove_dir_all(build_temp) {
    Ok(()) => debug!(dir = ?build_temp, "removed previous build tree"),
    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
    Err(e) => return Err(BuildError::fs("remove", build_temp)(e)),
  }
  fs::create_dir_all(build_temp).map_err(BuildError::fs("create", build_temp))
}

/// Ensure the output directory exists and drop any stale artifact.
///
/// A dry run never touches the artifact itself.
fn prepare_output(ctx: &BuildContext) -> Result<(), BuildError> {
  if !ctx.dry_run {
    match fs::remove_file(&ctx.output_path) {
      Ok(()) => debug!(path = ?ctx.output_path, "removed stale artifact"),
      Err(e) if e.kind() == io::ErrorKind::NotFound => {}
      Err(e) => return Err(BuildError::fs("remove", &ctx.output_path)(e)),
    }
  }
  fs::create_dir_all(&ctx.output_dir).map_err(BuildError::fs("create", &ctx.output_dir))
}

fn stage_artifact(extension: &ExtensionDescriptor, ctx: &BuildContext) -> Result<PathBuf, BuildError> {
  let mut candidates = artifact::find_artifacts(&ctx.build_temp, &ctx.output_filename)
    .map_err(BuildError::fs("search", &ctx.build_temp))?;

  match candidates.len() {
    0 => Err(BuildError::ArtifactNotFound {
      extension: extension.name().to_string(),
      filename: ctx.output_filename.clone(),
      search_root: ctx.build_temp.clone(),
    }),
    1 => {
      let source = candidates.remove(0);
      artifact::stage(&source, &ctx.output_dir).map_err(BuildError::fs("copy", source))
    }
    _ => Err(BuildError::AmbiguousArtifact {
      extension: extension.name().to_string(),
      filename: ctx.output_filename.clone(),
      candidates,
    }),
  }
}
