//! Storage layer
//!
//! Loads the optional TOML job file. Credentials are never persisted; the
//! job file is only ever read.

pub mod config;
