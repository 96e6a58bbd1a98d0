use serde::{Deserialize, Serialize};
use std::fs;
use sysinfo::{NetworkExt, NetworksExt, RefreshKind, System, SystemExt};
use thiserror::Error;

/// Cumulative processor tick counters since boot, aggregated over all cores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuTicks {
    pub user: u64,
    pub system: u64,
    pub idle: u64,
    pub nice: u64,
}

/// Point-in-time memory page counts plus the page size and physical total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryPages {
    pub wired: u64,
    pub active: u64,
    pub compressed: u64,
    pub page_size: u64,
    pub total_bytes: u64,
}

/// Cumulative byte counters summed across all enumerable interfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceBytes {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

#[derive(Clone, Debug, Error)]
#[error("counter read failed: {0}")]
pub struct SamplingFailed(pub String);

/// Read boundary between the sampling engine and the host OS.
///
/// One implementation per platform; tests substitute a scripted fake.
pub trait CounterSource {
    fn processor_ticks(&mut self) -> Result<CpuTicks, SamplingFailed>;
    fn memory_pages(&mut self) -> Result<MemoryPages, SamplingFailed>;
    fn interface_bytes(&mut self) -> Result<InterfaceBytes, SamplingFailed>;
}

const PAGE_SIZE_BYTES: u64 = 4096;

/// Production counter source: `/proc/stat` for processor ticks, sysinfo for
/// memory and interface byte totals.
pub struct HostSource {
    sys: System,
}

impl HostSource {
    pub fn new() -> Self {
        let refresh = RefreshKind::new()
            .with_memory()
            .with_networks_list()
            .with_networks();
        Self {
            sys: System::new_with_specifics(refresh),
        }
    }
}

impl Default for HostSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterSource for HostSource {
    fn processor_ticks(&mut self) -> Result<CpuTicks, SamplingFailed> {
        let stat = fs::read_to_string("/proc/stat")
            .map_err(|e| SamplingFailed(format!("/proc/stat: {e}")))?;
        parse_proc_stat(&stat).ok_or_else(|| SamplingFailed("malformed /proc/stat".into()))
    }

    fn memory_pages(&mut self) -> Result<MemoryPages, SamplingFailed> {
        self.sys.refresh_memory();
        // sysinfo has no wired/active/compressor split; report its whole used
        // figure as active. Only the (pages * page_size) / total ratio is
        // consumed downstream.
        Ok(MemoryPages {
            wired: 0,
            active: self.sys.used_memory() / PAGE_SIZE_BYTES,
            compressed: 0,
            page_size: PAGE_SIZE_BYTES,
            total_bytes: self.sys.total_memory(),
        })
    }

    fn interface_bytes(&mut self) -> Result<InterfaceBytes, SamplingFailed> {
        self.sys.refresh_networks();
        let bytes_in = self
            .sys
            .networks()
            .iter()
            .map(|(_, n)| n.total_received())
            .sum();
        let bytes_out = self
            .sys
            .networks()
            .iter()
            .map(|(_, n)| n.total_transmitted())
            .sum();
        Ok(InterfaceBytes {
            bytes_in,
            bytes_out,
        })
    }
}

/// Parses the aggregate `cpu` line: `cpu  user nice system idle ...`.
fn parse_proc_stat(stat: &str) -> Option<CpuTicks> {
    let line = stat.lines().next()?;
    let mut fields = line.split_whitespace();
    if fields.next()? != "cpu" {
        return None;
    }
    let user = fields.next()?.parse().ok()?;
    let nice = fields.next()?.parse().ok()?;
    let system = fields.next()?.parse().ok()?;
    let idle = fields.next()?.parse().ok()?;
    Some(CpuTicks {
        user,
        system,
        idle,
        nice,
    })
}
