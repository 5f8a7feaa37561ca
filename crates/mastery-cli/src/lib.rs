//! File-driven front end over the mastery engine crates.

pub mod commands;
pub mod config;

pub use config::{load_config, EngineConfig};
