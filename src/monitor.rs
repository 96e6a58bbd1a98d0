use crate::bus::publish_status;
use crate::classify::classify;
use crate::metrics::{now_timestamp_ms, StatusSnapshot};
use crate::sampler::Sampler;
use crate::source::CounterSource;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct MonitorConfig {
    pub interval: Duration,
    /// Stop after this many published updates; zero means run until cancelled.
    pub max_ticks: u64,
}

impl MonitorConfig {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_ticks: 0,
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }
}

/// The scheduler: drives the sampler on a fixed cadence and publishes one
/// `StatusSnapshot` per tick. Exactly one monitor owns a sampler; ticks are
/// serial by construction.
pub struct Monitor<S> {
    config: MonitorConfig,
    sampler: Sampler<S>,
}

impl<S: CounterSource> Monitor<S> {
    pub fn new(config: MonitorConfig, sampler: Sampler<S>) -> Self {
        Self { config, sampler }
    }

    pub async fn run(mut self, cancel: CancellationToken) {
        info!("Monitor started with interval {:?}", self.config.interval);

        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut published: u64 = 0;
        loop {
            // interval() ticks immediately on the first await, which gives us a fast first sample.
            tokio::select! {
                _ = cancel.cancelled() => {
                    break;
                }
                _ = ticker.tick() => {}
            }

            let now = Instant::now();
            let cpu_pct = self.sampler.sample_cpu();
            let mem_pct = self.sampler.sample_memory();
            let rates = self.sampler.sample_network(now);

            publish_status(StatusSnapshot {
                timestamp_ms: now_timestamp_ms(),
                cpu_pct,
                mem_pct,
                down_bps: rates.down_bps,
                up_bps: rates.up_bps,
                quality: classify(rates.up_bps, rates.down_bps),
            });

            published += 1;
            if self.config.max_ticks != 0 && published >= self.config.max_ticks {
                info!("Monitor stopping after {} updates", published);
                break;
            }
        }
    }
}
