//! Subcommand implementations.

pub mod demo;
pub mod emit;
