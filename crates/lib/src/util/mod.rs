//! Shared utilities.
//!
//! Test helpers for running commands and faking the toolchain.

#[cfg(test)]
pub mod testutil;
