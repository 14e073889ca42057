//! Implementation of the `extbuild sources` command.

use std::path::Path;

use anyhow::{Context, Result};

use extbuild_lib::extension::collect_sources;

/// Print the logical sources a packaging manifest would list, one per line.
pub fn cmd_sources(root: Option<&Path>) -> Result<()> {
  let root = match root {
    Some(root) => root.to_path_buf(),
    None => std::env::current_dir().context("Failed to read current directory")?,
  };

  let sources =
    collect_sources(&root).with_context(|| format!("Failed to enumerate sources under {}", root.display()))?;

  for source in sources {
    println!("{}", source.display());
  }

  Ok(())
}
