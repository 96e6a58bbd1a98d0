use statusbar_monitor::bus;
use statusbar_monitor::classify::LinkQuality;
use statusbar_monitor::format::status_line;
use statusbar_monitor::metrics::StatusSnapshot;
use statusbar_monitor::monitor::{Monitor, MonitorConfig};
use statusbar_monitor::sampler::Sampler;
use statusbar_monitor::sink::StatusSink;
use statusbar_monitor::source::{
    CounterSource, CpuTicks, InterfaceBytes, MemoryPages, SamplingFailed,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Counter source advancing by a fixed delta on every read: half the CPU
/// ticks busy, steady inbound/outbound traffic, constant memory pressure.
struct SteadySource {
    reads: u64,
}

impl SteadySource {
    fn new() -> Self {
        Self { reads: 0 }
    }
}

impl CounterSource for SteadySource {
    fn processor_ticks(&mut self) -> Result<CpuTicks, SamplingFailed> {
        self.reads += 1;
        Ok(CpuTicks {
            user: self.reads * 40,
            system: self.reads * 10,
            idle: self.reads * 50,
            nice: 0,
        })
    }

    fn memory_pages(&mut self) -> Result<MemoryPages, SamplingFailed> {
        Ok(MemoryPages {
            wired: 100,
            active: 500,
            compressed: 200,
            page_size: 4096,
            total_bytes: 1000 * 4096,
        })
    }

    fn interface_bytes(&mut self) -> Result<InterfaceBytes, SamplingFailed> {
        Ok(InterfaceBytes {
            bytes_in: self.reads * 250_000,
            bytes_out: self.reads * 125_000,
        })
    }
}

struct CollectingSink {
    snapshots: Arc<Mutex<Vec<StatusSnapshot>>>,
}

impl StatusSink for CollectingSink {
    fn render(&mut self, snapshot: &StatusSnapshot) -> std::io::Result<()> {
        self.snapshots.lock().unwrap().push(snapshot.clone());
        Ok(())
    }
}

fn collecting_sink() -> (Box<dyn StatusSink>, Arc<Mutex<Vec<StatusSnapshot>>>) {
    let snapshots = Arc::new(Mutex::new(Vec::new()));
    let sink = CollectingSink {
        snapshots: snapshots.clone(),
    };
    (Box::new(sink), snapshots)
}

#[tokio::test(flavor = "current_thread")]
async fn monitor_publishes_bootstrapped_then_derived_updates() {
    let (sink, snapshots) = collecting_sink();
    let _activity = bus::register_sink_subscriber(sink);

    let monitor = Monitor::new(
        MonitorConfig::new(Duration::from_millis(10)).with_max_ticks(3),
        Sampler::new(SteadySource::new()),
    );
    monitor.run(CancellationToken::new()).await;

    let snaps = snapshots.lock().unwrap();
    assert_eq!(snaps.len(), 3);

    // First tick has no prior snapshot for either stateful family.
    assert_eq!(snaps[0].cpu_pct, 0.0);
    assert_eq!(snaps[0].down_bps, 0.0);
    assert_eq!(snaps[0].up_bps, 0.0);
    assert_eq!(snaps[0].quality, LinkQuality::Bad);

    // Memory is stateless and present from the first tick.
    assert_eq!(snaps[0].mem_pct, 80.0);

    for snap in snaps.iter().skip(1) {
        assert_eq!(snap.cpu_pct, 50.0);
        assert!(snap.down_bps > 0.0);
        assert!(snap.up_bps > 0.0);
        assert!(snap.down_bps > snap.up_bps);
    }
}

#[tokio::test(flavor = "current_thread")]
async fn status_lines_keep_constant_width_across_ticks() {
    let (sink, snapshots) = collecting_sink();
    let _activity = bus::register_sink_subscriber(sink);

    let monitor = Monitor::new(
        MonitorConfig::new(Duration::from_millis(10)).with_max_ticks(4),
        Sampler::new(SteadySource::new()),
    );
    monitor.run(CancellationToken::new()).await;

    let snaps = snapshots.lock().unwrap();
    let widths: Vec<usize> = snaps
        .iter()
        .map(|s| status_line(s).chars().count())
        .collect();
    assert!(widths.windows(2).all(|w| w[0] == w[1]), "widths: {widths:?}");
}

#[tokio::test(flavor = "current_thread")]
async fn cancellation_stops_the_loop_and_is_idempotent() {
    let (sink, snapshots) = collecting_sink();
    let _activity = bus::register_sink_subscriber(sink);

    let monitor = Monitor::new(
        MonitorConfig::new(Duration::from_secs(60)),
        Sampler::new(SteadySource::new()),
    );
    let cancel = CancellationToken::new();
    let run_cancel = cancel.clone();

    let stopper = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
        // Stopping again must be safe.
        cancel.cancel();
    });

    tokio::time::timeout(Duration::from_secs(5), monitor.run(run_cancel))
        .await
        .expect("monitor did not stop after cancellation");
    stopper.await.unwrap();

    // Only the immediate first tick fired before cancellation.
    assert_eq!(snapshots.lock().unwrap().len(), 1);
}
