//! Artifact discovery and staging.
//!
//! The toolchain decides where inside the build tree the compiled module
//! lands; the filename is the only thing we can rely on.

use std::io;
use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;

/// Every file below `root` named exactly `filename`, in sorted traversal order.
///
/// Symlinks count when they resolve to a file.
pub fn find_artifacts(root: &Path, filename: &str) -> io::Result<Vec<PathBuf>> {
  let mut matches = Vec::new();

  for entry in WalkDir::new(root).sort_by_file_name() {
    let entry = entry.map_err(io::Error::other)?;
    if entry.file_name() == filename && entry.path().is_file() {
      matches.push(entry.into_path());
    }
  }

  Ok(matches)
}

/// Copy `artifact` into `output_dir`, overwriting any existing file.
///
/// Returns the destination path.
pub fn stage(artifact: &Path, output_dir: &Path) -> io::Result<PathBuf> {
  let filename = artifact
    .file_name()
    .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "artifact path has no filename"))?;
  let destination = output_dir.join(filename);

  info!(
    source = %artifact.display(),
    destination = %destination.display(),
    "copying artifact"
  );
  std::fs::copy(artifact, &destination)?;

  Ok(destination)
}
