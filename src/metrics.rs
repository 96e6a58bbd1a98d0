use crate::classify::LinkQuality;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One fully derived status update: percentages, rates, and the link quality
/// classified from them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub timestamp_ms: u128,
    pub cpu_pct: f64,
    pub mem_pct: f64,
    pub down_bps: f64,
    pub up_bps: f64,
    pub quality: LinkQuality,
}

pub fn now_timestamp_ms() -> u128 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(dur) => dur.as_millis(),
        Err(err) => {
            // System clock is before UNIX_EPOCH; return 0 and let caller decide what to do.
            tracing::error!("SystemTime before UNIX_EPOCH: {}", err);
            0
        }
    }
}
