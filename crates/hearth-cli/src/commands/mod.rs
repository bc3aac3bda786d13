//! CLI subcommand implementations.

pub mod click;
pub mod handler;
pub mod month;
pub mod navigate;
pub mod timeline;
pub mod util;
pub mod watch;
