//! Out-of-tree extension builds.
//!
//! An extension is built in its own scratch tree by a two-phase external
//! toolchain (configure, then build one target), and the artifact it
//! produces is staged where the packaging step expects it.

pub mod artifact;
pub mod cwd;
pub mod orchestrator;
pub mod runner;
pub mod toolchain;
pub mod types;

pub use orchestrator::{BuildContext, Orchestrator};
pub use runner::{CommandOutput, CommandRunner, Invocation, SystemRunner};
pub use types::{BuildError, BuildFlags, BuildOptions, BuildReport, Configuration};
