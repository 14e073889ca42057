//! Scoped ownership of the process working directory.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Remembers the working directory in effect when captured and puts it back
/// when restored or dropped, whichever comes first.
pub struct WorkingDir {
  original: PathBuf,
  moved: bool,
}

impl WorkingDir {
  pub fn capture() -> io::Result<Self> {
    Ok(Self {
      original: std::env::current_dir()?,
      moved: false,
    })
  }

  /// The directory that will be restored.
  pub fn original(&self) -> &Path {
    &self.original
  }

  /// Change the process working directory to `dir`.
  pub fn enter(&mut self, dir: &Path) -> io::Result<()> {
    debug!(dir = ?dir, "entering directory");
    std::env::set_current_dir(dir)?;
    self.moved = true;
    Ok(())
  }

  /// Restore the original directory, reporting failure to the caller.
  pub fn restore(mut self) -> io::Result<()> {
    self.restore_inner()
  }

  fn restore_inner(&mut self) -> io::Result<()> {
    if !self.moved {
      return Ok(());
    }
    std::env::set_current_dir(&self.original)?;
    self.moved = false;
    debug!(dir = ?self.original, "restored working directory");
    Ok(())
  }
}

impl Drop for WorkingDir {
  fn drop(&mut self) {
    if let Err(e) = self.restore_inner() {
      warn!(dir = ?self.original, error = %e, "failed to restore working directory");
    }
  }
}
