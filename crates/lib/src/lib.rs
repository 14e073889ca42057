//! extbuild-lib: out-of-tree builds of native extension modules
//!
//! This crate provides the pieces the `extbuild` frontend drives:
//! - `ExtensionDescriptor`: one native module to compile and stage
//! - `Orchestrator`: prepares directories, runs the two-phase toolchain, stages the artifact
//! - `CommandRunner`: the blocking process capability the orchestrator invokes
//! - `platform`: host architecture and native-module naming conventions

pub mod build;
pub mod consts;
pub mod extension;
pub mod platform;
pub mod util;
