//! Implementation of the `extbuild build` command.
//!
//! Stands in for the packaging frontend: turns command-line names into
//! extension descriptors, resolves build options, and hands the batch to
//! the orchestrator.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use extbuild_lib::build::{BuildFlags, BuildOptions, BuildReport, Orchestrator, SystemRunner};
use extbuild_lib::consts::DEFAULT_JOBS;
use extbuild_lib::extension::{ExtensionDescriptor, collect_sources};
use extbuild_lib::platform::paths;

use crate::output::{OutputFormat, format_duration, print_info, print_json, print_stat, print_success, symbols};

#[derive(Debug, Args)]
pub struct BuildArgs {
  /// Dotted extension names, built in the order given
  #[arg(required = true)]
  names: Vec<String>,

  /// Build the Debug configuration
  #[arg(long)]
  debug: bool,

  /// Configure only; skip compilation and artifact staging
  #[arg(long)]
  dry_run: bool,

  /// Stage artifacts into the source tree instead of the lib directory
  #[arg(long)]
  inplace: bool,

  /// Base directory for temp and lib directories
  #[arg(long)]
  build_base: Option<PathBuf>,

  /// Root of the per-extension scratch build trees
  #[arg(long)]
  build_temp: Option<PathBuf>,

  /// Directory the packaging step reads artifacts from
  #[arg(long)]
  build_lib: Option<PathBuf>,

  /// Native-module filename suffix (e.g. ".so")
  #[arg(long)]
  ext_suffix: Option<String>,

  /// Toolchain program used for configure and build
  #[arg(long)]
  cmake: Option<String>,

  /// Parallel jobs for the build phase
  #[arg(short, long, default_value_t = DEFAULT_JOBS)]
  jobs: u32,

  /// Interpreter executable the module links against (default: this executable)
  #[arg(long)]
  interpreter: Option<PathBuf>,

  /// Output format
  #[arg(long, value_enum, default_value_t)]
  format: OutputFormat,
}

impl BuildArgs {
  fn options(&self) -> BuildOptions {
    let defaults = BuildOptions::default();
    let base = self.build_base.clone().unwrap_or_else(paths::build_base);

    BuildOptions {
      temp_root: self.build_temp.clone().unwrap_or_else(|| paths::temp_root(&base)),
      lib_root: self.build_lib.clone().unwrap_or_else(|| paths::lib_root(&base)),
      inplace: self.inplace,
      ext_suffix: self.ext_suffix.clone().unwrap_or(defaults.ext_suffix),
      toolchain: self.cmake.clone().unwrap_or(defaults.toolchain),
      jobs: self.jobs,
      interpreter: self.interpreter.clone(),
      arch: defaults.arch,
    }
  }

  fn flags(&self) -> BuildFlags {
    BuildFlags {
      debug: self.debug,
      dry_run: self.dry_run,
    }
  }
}

/// Execute the build command.
///
/// Builds every named extension in order and stops at the first failure.
/// Prints one line per extension and a summary, or the reports as JSON.
pub fn cmd_build(args: BuildArgs) -> Result<()> {
  let root = std::env::current_dir().context("Failed to read current directory")?;
  let sources = collect_sources(&root).context("Failed to enumerate sources")?;

  let extensions = args
    .names
    .iter()
    .map(|name| ExtensionDescriptor::new(name.as_str()).map(|ext| ext.with_sources(sources.clone())))
    .collect::<Result<Vec<_>, _>>()
    .context("Invalid extension name")?;

  let options = args.options();
  debug!(?options, sources = sources.len(), "resolved build options");

  let orchestrator = Orchestrator::new(SystemRunner, options);
  let reports = orchestrator.run(&extensions, args.flags()).context("Build failed")?;

  if args.format.is_json() {
    return print_json(&reports);
  }

  for report in &reports {
    print_report(report);
  }

  let total: Duration = reports.iter().map(|r| r.elapsed).sum();
  println!();
  if args.dry_run {
    print_success(&format!("Configured {} extension(s) (dry run)", reports.len()));
  } else {
    print_success(&format!("Built {} extension(s)", reports.len()));
  }
  print_stat("Time", &format_duration(total));

  Ok(())
}

fn print_report(report: &BuildReport) {
  match &report.staged {
    Some(path) => print_info(&format!(
      "{} [{} {}] {} {}",
      report.extension,
      report.configuration,
      report.architecture,
      symbols::ARROW,
      path.display()
    )),
    None => print_info(&format!(
      "{} [{} {}] configured",
      report.extension, report.configuration, report.architecture
    )),
  }
}
