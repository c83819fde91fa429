//! # finbuddy-cli
//!
//! Wires configuration, providers and the orchestrator into the `finbuddy` binary.
//!
//! - [`cli`]: argument parsing
//! - [`config`]: env-based configuration (`BaseConfig` + `AppConfig`)
//! - [`assembly`]: builds providers and the [`orchestrator::Orchestrator`]
//! - [`runner`]: command handlers (chat REPL, ask, build-index, emi, rates)

pub mod assembly;
pub mod cli;
pub mod config;
pub mod runner;

pub use cli::{Cli, Commands};
pub use config::{AppConfig, BaseConfig};
