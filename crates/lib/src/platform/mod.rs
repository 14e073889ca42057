pub mod arch;
pub mod os;
pub mod paths;

use arch::Arch;
use os::Os;
use std::fmt;

/// Host identifier combining OS and build architecture (e.g., "linux-x64")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub os: Os,
  pub arch: Arch,
}

impl Platform {
  pub fn new(os: Os, arch: Arch) -> Self {
    Self { os, arch }
  }

  /// Detect the current platform at runtime
  ///
  /// Returns `None` if the OS is not supported
  pub fn current() -> Option<Self> {
    Some(Self {
      os: Os::current()?,
      arch: Arch::host(),
    })
  }

  /// Returns the platform tag used in build directory names
  pub fn tag(&self) -> String {
    format!("{}-{}", self.os, self.arch)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.tag())
  }
}

/// Returns the platform tag for the current system (e.g., "linux-x64")
///
/// Returns `None` if the current platform is not supported
pub fn platform_tag() -> Option<String> {
  Platform::current().map(|p| p.tag())
}

/// Native-module suffix for the current system, falling back to `.so`
pub fn module_suffix() -> &'static str {
  Os::current().map(|os| os.module_suffix()).unwrap_or(".so")
}
