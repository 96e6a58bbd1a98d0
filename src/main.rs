use clap::Parser;
use statusbar_monitor::bus;
use statusbar_monitor::config::{Config, Mode};
use statusbar_monitor::monitor::{Monitor, MonitorConfig};
use statusbar_monitor::runtime;
use statusbar_monitor::sampler::Sampler;
use statusbar_monitor::sink::{ConsoleSink, JsonSink, LineSink, StatusSink};
use statusbar_monitor::source::HostSource;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    runtime::init_tracing();
    let config = Config::parse();
    info!(
        "Starting monitor: interval={}ms, mode={:?}, ticks={}",
        config.interval_ms, config.mode, config.ticks
    );

    let sink: Box<dyn StatusSink> = match config.mode {
        Mode::Console => Box::new(ConsoleSink::new()),
        Mode::Line => Box::new(LineSink::new()),
        Mode::Json => Box::new(JsonSink::new()),
    };
    // Keep the sink subscriber alive for the process lifetime.
    let _sink_activity = bus::register_sink_subscriber(sink);

    let monitor = Monitor::new(
        MonitorConfig::new(config.interval()).with_max_ticks(config.ticks),
        Sampler::new(HostSource::new()),
    );

    let cancel = CancellationToken::new();
    let shutdown_cancel = cancel.clone();
    tokio::spawn(async move {
        runtime::shutdown_signal().await;
        shutdown_cancel.cancel();
    });

    // Sampling, classification, and rendering all run serially on this task.
    monitor.run(cancel).await;
}
