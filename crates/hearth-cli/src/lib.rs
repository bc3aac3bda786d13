//! Household calendar CLI library.
//!
//! This crate provides the terminal front end for the calendar engine.

mod cli;
pub mod commands;
mod config;
pub mod events;
pub mod render;

pub use cli::{Cli, Commands, TimelineKind};
pub use config::Config;
