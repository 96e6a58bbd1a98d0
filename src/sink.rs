use crate::classify::LinkQuality;
use crate::format::{format_percentage, format_rate, status_line};
use crate::metrics::StatusSnapshot;
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::ExecutableCommand;
use serde::Serialize;
use std::io::{stdout, Error, ErrorKind, Stdout, Write};

/// Display surface for status updates. The monitor publishes on the thread
/// that owns the surface, so `render` runs there.
pub trait StatusSink {
    fn render(&mut self, snapshot: &StatusSnapshot) -> std::io::Result<()>;
}

/// Redrawn console view with the NET segment colored by link quality.
pub struct ConsoleSink {
    out: Stdout,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { out: stdout() }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for ConsoleSink {
    fn render(&mut self, snapshot: &StatusSnapshot) -> std::io::Result<()> {
        self.out.execute(MoveTo(0, 0))?;
        self.out.execute(Clear(ClearType::All))?;

        writeln!(self.out, "Status Monitor (console)")?;
        writeln!(self.out, "Press Ctrl+C to exit.")?;
        writeln!(self.out)?;

        let net = format!(
            "NET ↑{} ↓{}",
            format_rate(snapshot.up_bps),
            format_rate(snapshot.down_bps)
        );
        writeln!(
            self.out,
            "CPU {} / MEM {} / {}",
            format_percentage(snapshot.cpu_pct),
            format_percentage(snapshot.mem_pct),
            net.with(quality_color(snapshot.quality))
        )?;

        self.out.flush()
    }
}

fn quality_color(quality: LinkQuality) -> Color {
    match quality {
        LinkQuality::Bad => Color::Red,
        LinkQuality::Normal => Color::Reset,
        LinkQuality::Good => Color::Green,
    }
}

/// One plain status line per tick, for piping into a bar.
pub struct LineSink<W> {
    out: W,
}

impl LineSink<Stdout> {
    pub fn new() -> Self {
        Self { out: stdout() }
    }
}

impl Default for LineSink<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> LineSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + 'static> StatusSink for LineSink<W> {
    fn render(&mut self, snapshot: &StatusSnapshot) -> std::io::Result<()> {
        writeln!(self.out, "{}", status_line(snapshot))?;
        self.out.flush()
    }
}

#[derive(Serialize)]
struct JsonStatus<'a> {
    text: &'a str,
    class: &'a str,
    tooltip: &'a str,
}

/// One JSON object per tick in the shape bar programs consume:
/// `{"text": "...", "class": "good", "tooltip": "..."}`.
pub struct JsonSink<W> {
    out: W,
}

impl JsonSink<Stdout> {
    pub fn new() -> Self {
        Self { out: stdout() }
    }
}

impl Default for JsonSink<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> JsonSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + 'static> StatusSink for JsonSink<W> {
    fn render(&mut self, snapshot: &StatusSnapshot) -> std::io::Result<()> {
        let text = status_line(snapshot);
        let tooltip = format!(
            "cpu {:.1}% mem {:.1}% up {:.0} bps down {:.0} bps",
            snapshot.cpu_pct, snapshot.mem_pct, snapshot.up_bps, snapshot.down_bps
        );
        let payload = JsonStatus {
            text: &text,
            class: snapshot.quality.as_str(),
            tooltip: &tooltip,
        };
        let line = serde_json::to_string(&payload)
            .map_err(|e| Error::new(ErrorKind::Other, e))?;
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }
}
