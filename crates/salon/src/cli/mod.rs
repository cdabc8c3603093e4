//! Command implementations for the `salon` binary.

pub mod config;
pub mod generate;
pub mod interactive;
pub mod presenter;
pub mod styles;
pub mod token;
