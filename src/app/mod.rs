//! Application layer: CLI and configuration file handling

pub mod cli;
pub mod config;
