use clap::{Parser, ValueEnum};
use std::time::Duration;

#[derive(Clone, Debug, ValueEnum)]
pub enum Mode {
    /// Redrawn console view with a colored NET segment
    Console,
    /// One plain status line per tick on stdout
    Line,
    /// One JSON object per tick (text/class/tooltip) for bar programs
    Json,
}

#[derive(Clone, Debug, Parser)]
#[command(
    name = "statusbar_monitor",
    about = "Fixed-width status line monitor for CPU, memory, and network"
)]
pub struct Config {
    /// Sampling interval in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub interval_ms: u64,

    /// Output mode (console/line/json)
    #[arg(long, value_enum, default_value_t = Mode::Line)]
    pub mode: Mode,

    /// Exit after this many updates (0 = run until interrupted)
    #[arg(long, default_value_t = 0)]
    pub ticks: u64,
}

impl Config {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
