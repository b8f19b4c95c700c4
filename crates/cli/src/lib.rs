//! `decaes-cli` library crate.
//!
//! Holds argument parsing and the run entry point so they can be tested
//! without spawning the binary. The binary entrypoint lives in `main.rs`.

pub mod cli;

pub use cli::{run, Cli};
