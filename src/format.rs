use crate::metrics::StatusSnapshot;

/// Rendered in place of structurally-zero leading digits so the field width
/// never changes as the value magnitude does.
const PLACEHOLDER: char = '-';

const GBPS: f64 = 1e9;
const MBPS: f64 = 1e6;
const KBPS: f64 = 1e3;

/// Formats an already-clamped percentage as a constant-width field: `--7%`,
/// `-42%`, `100%`.
pub fn format_percentage(value: f64) -> String {
    let mut out = pad3(round_non_negative(value));
    out.push('%');
    out
}

/// Formats a bits-per-second rate with the largest fitting unit: `--7 Kbps`,
/// `-42 Mbps`, `--2 Gbps`.
pub fn format_rate(bits_per_second: f64) -> String {
    let bps = if bits_per_second.is_finite() && bits_per_second > 0.0 {
        bits_per_second
    } else {
        0.0
    };
    let (scaled, unit) = if bps >= GBPS {
        (bps / GBPS, "Gbps")
    } else if bps >= MBPS {
        (bps / MBPS, "Mbps")
    } else {
        (bps / KBPS, "Kbps")
    };
    let mut value = scaled.round() as u64;
    // Just under a unit boundary the scaled value rounds to 1000; promote it
    // so the digit field stays three characters wide.
    let unit = match (value, unit) {
        (1000, "Kbps") => {
            value = 1;
            "Mbps"
        }
        (1000, "Mbps") => {
            value = 1;
            "Gbps"
        }
        _ => unit,
    };
    format!("{} {}", pad3(value), unit)
}

/// The composed display line pushed to the status surface.
pub fn status_line(snapshot: &StatusSnapshot) -> String {
    format!(
        "CPU {} / MEM {} / NET ↑{} ↓{}",
        format_percentage(snapshot.cpu_pct),
        format_percentage(snapshot.mem_pct),
        format_rate(snapshot.up_bps),
        format_rate(snapshot.down_bps),
    )
}

fn round_non_negative(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

fn pad3(n: u64) -> String {
    // Zero has no significant digit at all; the whole field is placeholder.
    if n == 0 {
        return [PLACEHOLDER; 3].into_iter().collect();
    }
    let hundreds = n / 100;
    let tens = (n % 100) / 10;
    let ones = n % 10;

    let mut out = String::with_capacity(3);
    if hundreds == 0 {
        out.push(PLACEHOLDER);
    } else {
        out.push_str(&hundreds.to_string());
    }
    if tens == 0 && hundreds == 0 {
        out.push(PLACEHOLDER);
    } else {
        out.push(char::from(b'0' + tens as u8));
    }
    out.push(char::from(b'0' + ones as u8));
    out
}
