//! Testing infrastructure for accesslog integration tests.
//!
//! - `TestWorld`: isolated temp directory, config and env for CLI runs
//! - `fixtures`: sample logs and batch files written in the on-disk format

pub mod fixtures;
pub mod world;

pub use world::{CliResult, TestWorld};
