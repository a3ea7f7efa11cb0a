//! CLI command implementations.
//!
//! Each command returns a JSON value that `main` prints to stdout.

pub mod build;
pub mod lookup;
pub mod resolve;
