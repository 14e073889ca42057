use std::fmt;

use serde::Serialize;

/// Target architecture handed to the toolchain's configure step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
  X86,
  X64,
}

impl Arch {
  /// Detect the host architecture from the native pointer width
  pub fn host() -> Self {
    if cfg!(target_pointer_width = "64") {
      Self::X64
    } else {
      Self::X86
    }
  }

  /// 64-bit pointers select `x64`; anything narrower selects `x86`
  pub fn from_pointer_width(bits: u32) -> Self {
    if bits >= 64 { Self::X64 } else { Self::X86 }
  }

  /// Returns the identifier the toolchain expects for this architecture
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86 => "x86",
      Self::X64 => "x64",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
