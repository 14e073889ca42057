use std::path::{Path, PathBuf};

use crate::consts::{DEFAULT_TOOLCHAIN, ENV_BUILD_BASE, ENV_BUILD_LIB, ENV_BUILD_TEMP, ENV_TOOLCHAIN};
use crate::platform::arch::Arch;
use crate::platform::platform_tag;

/// Returns the directory under which temp and lib roots live by default
pub fn build_base() -> PathBuf {
  std::env::var(ENV_BUILD_BASE)
    .map(PathBuf::from)
    .unwrap_or_else(|_| PathBuf::from("build"))
}

/// Returns the root holding one scratch build tree per extension
pub fn temp_root(base: &Path) -> PathBuf {
  if let Ok(path) = std::env::var(ENV_BUILD_TEMP) {
    return PathBuf::from(path);
  }

  base.join(format!("temp.{}", host_tag()))
}

/// Returns the root the packaging step reads staged artifacts from
pub fn lib_root(base: &Path) -> PathBuf {
  if let Ok(path) = std::env::var(ENV_BUILD_LIB) {
    return PathBuf::from(path);
  }

  base.join(format!("lib.{}", host_tag()))
}

/// Returns the toolchain program used for configure and build
pub fn toolchain() -> String {
  std::env::var(ENV_TOOLCHAIN).unwrap_or_else(|_| DEFAULT_TOOLCHAIN.to_string())
}

fn host_tag() -> String {
  platform_tag().unwrap_or_else(|| format!("{}-{}", std::env::consts::OS, Arch::host()))
}
