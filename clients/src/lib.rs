//! Support code for the `znato` command-line client.
//!
//! The binary in `src/bin/znato.rs` wires these together: [`config`] reads
//! `znato.toml`, [`logging`] installs the `tracing` subscriber, and [`render`]
//! turns detection reports and inventories into tables or JSON.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod config;
pub mod logging;
pub mod render;

pub use config::{ConfigError, OutputFormat, Settings};
