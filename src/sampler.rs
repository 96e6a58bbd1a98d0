use crate::source::{CounterSource, CpuTicks, InterfaceBytes, MemoryPages};
use std::time::Instant;
use tracing::warn;

/// Down/up throughput in bits per second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NetRates {
    pub down_bps: f64,
    pub up_bps: f64,
}

#[derive(Clone, Copy, Debug)]
struct NetSnapshot {
    bytes: InterfaceBytes,
    taken_at: Instant,
}

/// Stateful delta engine over a counter source.
///
/// Holds the previous processor tick and network byte snapshots; each call
/// diffs the current reading against them. The first call for a metric family
/// (and any call after a counter reset) bootstraps: it stores the reading and
/// reports zero. A failed read also reports zero but leaves prior state
/// untouched so the next tick can retry.
///
/// Not reentrant; exactly one caller is expected to drive samples serially.
pub struct Sampler<S> {
    source: S,
    prev_cpu: Option<CpuTicks>,
    prev_net: Option<NetSnapshot>,
}

impl<S: CounterSource> Sampler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            prev_cpu: None,
            prev_net: None,
        }
    }

    /// Overall processor utilization since the previous call, in [0, 100].
    pub fn sample_cpu(&mut self) -> f64 {
        let current = match self.source.processor_ticks() {
            Ok(ticks) => ticks,
            Err(e) => {
                warn!("Processor tick read failed: {}", e);
                return 0.0;
            }
        };
        let Some(prev) = self.prev_cpu.replace(current) else {
            return 0.0;
        };
        if current.user < prev.user
            || current.system < prev.system
            || current.idle < prev.idle
            || current.nice < prev.nice
        {
            warn!("Processor tick counter decreased; re-bootstrapping");
            return 0.0;
        }
        let user = (current.user - prev.user) as f64;
        let system = (current.system - prev.system) as f64;
        let idle = (current.idle - prev.idle) as f64;
        let nice = (current.nice - prev.nice) as f64;
        let total = user + system + idle + nice;
        if total <= 0.0 {
            return 0.0;
        }
        let used = total - idle;
        (used / total * 100.0).clamp(0.0, 100.0)
    }

    /// Physical memory pressure in [0, 100]. Stateless per sample.
    pub fn sample_memory(&mut self) -> f64 {
        match self.source.memory_pages() {
            Ok(pages) => memory_percent(pages),
            Err(e) => {
                warn!("Memory page read failed: {}", e);
                0.0
            }
        }
    }

    /// Interface throughput over the interval since the previous call.
    ///
    /// `now` is the capture timestamp; a non-positive interval (duplicate or
    /// out-of-order tick) reports zero rates without touching stored state.
    pub fn sample_network(&mut self, now: Instant) -> NetRates {
        let current = match self.source.interface_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Interface byte read failed: {}", e);
                return NetRates::default();
            }
        };
        let Some(prev) = self.prev_net else {
            self.prev_net = Some(NetSnapshot {
                bytes: current,
                taken_at: now,
            });
            return NetRates::default();
        };
        let interval = now.saturating_duration_since(prev.taken_at).as_secs_f64();
        if interval <= 0.0 {
            return NetRates::default();
        }
        // A decreased counter means the interface was reinitialized; clamp
        // that direction's delta to zero rather than going negative.
        let delta_in = current.bytes_in.saturating_sub(prev.bytes.bytes_in) as f64;
        let delta_out = current.bytes_out.saturating_sub(prev.bytes.bytes_out) as f64;
        self.prev_net = Some(NetSnapshot {
            bytes: current,
            taken_at: now,
        });
        NetRates {
            down_bps: delta_in * 8.0 / interval,
            up_bps: delta_out * 8.0 / interval,
        }
    }
}

pub fn memory_percent(pages: MemoryPages) -> f64 {
    if pages.total_bytes == 0 {
        return 0.0;
    }
    let used = (pages.wired + pages.active + pages.compressed) as f64 * pages.page_size as f64;
    (used / pages.total_bytes as f64 * 100.0).clamp(0.0, 100.0)
}
