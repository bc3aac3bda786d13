//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Household calendar in the terminal.
///
/// Lays out month grids and hourly timelines from an events file.
#[derive(Debug, Parser)]
#[command(name = "hearth", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Events file (JSON array or JSON Lines); overrides the configured path.
    #[arg(short, long, global = true)]
    pub events: Option<PathBuf>,

    /// Treat this date as today (YYYY-MM-DD).
    #[arg(long, global = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Timeline presentations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimelineKind {
    Week,
    Day,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the month grid.
    Month {
        /// Any date in the month to show (default: today).
        #[arg(long)]
        date: Option<String>,

        /// Output the laid-out grid as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the Monday-first week timeline.
    Week {
        /// Any date in the week to show (default: today).
        #[arg(long)]
        date: Option<String>,

        /// Output the laid-out grid as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show a single-day timeline.
    Day {
        /// The day to show (default: today).
        #[arg(long)]
        date: Option<String>,

        /// Output the laid-out grid as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Replay key presses on the month grid and print where focus goes.
    Navigate {
        /// Comma-separated keys: left, right, up, down, home, end, enter, space.
        #[arg(long, value_delimiter = ',', required = true)]
        keys: Vec<String>,

        /// Any date in the month to navigate (default: today).
        #[arg(long)]
        date: Option<String>,
    },

    /// Hit-test a click on a timeline and print the callback it fires.
    Click {
        #[arg(long, value_enum, default_value_t = TimelineKind::Week)]
        view: TimelineKind,

        /// Day column, 0 = Monday (ignored by the day view).
        #[arg(long, default_value_t = 0)]
        column: usize,

        /// Vertical offset on the track, in layout units.
        #[arg(long, required_unless_present = "at", conflicts_with = "at")]
        y: Option<f32>,

        /// Clock time to click at (HH:MM), converted to an offset.
        #[arg(long)]
        at: Option<String>,

        /// Any date in the displayed week, or the displayed day (default: today).
        #[arg(long)]
        date: Option<String>,
    },

    /// Keep the current-time marker up to date until interrupted.
    Watch {
        #[arg(long, value_enum, default_value_t = TimelineKind::Day)]
        view: TimelineKind,

        /// Stop after this many refreshes.
        #[arg(long)]
        ticks: Option<u32>,
    },
}
