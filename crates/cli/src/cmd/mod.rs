mod build;
mod info;
mod sources;

pub use build::{BuildArgs, cmd_build};
pub use info::cmd_info;
pub use sources::cmd_sources;
