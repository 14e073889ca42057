//! Extension descriptors.
//!
//! An `ExtensionDescriptor` names one native module the packaging step
//! expects to find. Its dotted name determines both the toolchain target
//! and where the compiled artifact is staged.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// Directories whose contents make up an extension's logical sources.
const SOURCE_DIRS: &[&str] = &["include", "src", "external"];

/// Top-level file describing the native project to the toolchain.
const PROJECT_FILE: &str = "CMakeLists.txt";

#[derive(Debug, Error)]
pub enum ExtensionError {
  #[error("invalid extension name `{name}`: {reason}")]
  InvalidName { name: String, reason: &'static str },
}

/// One native module to compile and stage for packaging.
///
/// `sources` is informational: it feeds packaging manifests and is never
/// read by the build step, which hands the whole source root to the toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDescriptor {
  name: String,
  sources: Vec<PathBuf>,
}

impl ExtensionDescriptor {
  /// Create a descriptor for the dotted module `name` (e.g. `pkg.geo`).
  pub fn new(name: impl Into<String>) -> Result<Self, ExtensionError> {
    let name = name.into();
    validate_name(&name)?;
    Ok(Self {
      name,
      sources: Vec::new(),
    })
  }

  /// Attach the logical source list.
  pub fn with_sources(mut self, sources: Vec<PathBuf>) -> Self {
    self.sources = sources;
    self
  }

  /// The full dotted name, also used as the toolchain target.
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn sources(&self) -> &[PathBuf] {
    &self.sources
  }

  /// The last dotted component, i.e. the module's own name.
  pub fn module_name(&self) -> &str {
    self.name.rsplit('.').next().unwrap_or(&self.name)
  }

  /// Filename of the compiled artifact, e.g. `geo.so`.
  pub fn artifact_filename(&self, suffix: &str) -> String {
    format!("{}{}", self.module_name(), suffix)
  }

  /// Where the packaging step reads the artifact from.
  ///
  /// Package components become directories below `lib_root`:
  /// `pkg.sub.geo` stages to `lib_root/pkg/sub/geo<suffix>`.
  pub fn output_path(&self, lib_root: &Path, suffix: &str) -> PathBuf {
    let mut path = lib_root.to_path_buf();
    let mut components: Vec<&str> = self.name.split('.').collect();
    components.pop();
    for package in components {
      path.push(package);
    }
    path.join(self.artifact_filename(suffix))
  }
}

fn validate_name(name: &str) -> Result<(), ExtensionError> {
  let invalid = |reason| ExtensionError::InvalidName {
    name: name.to_string(),
    reason,
  };

  if name.is_empty() {
    return Err(invalid("name is empty"));
  }

  for component in name.split('.') {
    if component.is_empty() {
      return Err(invalid("empty dotted component"));
    }
    if component.contains(['/', '\\', '\0']) {
      return Err(invalid("component contains a path separator or NUL"));
    }
  }

  Ok(())
}

/// Enumerate the logical sources of the native project rooted at `root`.
///
/// Every file under `include/`, `src/` and `external/` plus the top-level
/// project file, relative to `root` and sorted. Missing directories are skipped.
pub fn collect_sources(root: &Path) -> io::Result<Vec<PathBuf>> {
  let mut sources = Vec::new();

  for dir in SOURCE_DIRS {
    let dir = root.join(dir);
    if !dir.is_dir() {
      continue;
    }
    for entry in WalkDir::new(&dir) {
      let entry = entry.map_err(io::Error::other)?;
      if entry.file_type().is_file()
        && let Ok(relative) = entry.path().strip_prefix(root)
      {
        sources.push(relative.to_path_buf());
      }
    }
  }

  if root.join(PROJECT_FILE).is_file() {
    sources.push(PathBuf::from(PROJECT_FILE));
  }

  sources.sort();
  Ok(sources)
}
