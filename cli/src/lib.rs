//! Command-line front end for fish-feeder.
//!
//! This crate turns a release checksum manifest into a GoFish food file. It
//! is used by the `fish-feeder` binary and can be driven programmatically
//! through [`run::run_with`] for testing.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Layered file, environment, and flag configuration
//! - [`error`] - Error types for each pipeline stage
//! - [`fetch`] - Manifest retrieval into a temporary file
//! - [`render`] - Lua food file rendering
//! - [`run`] - The generation pipeline

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod render;
pub mod run;
