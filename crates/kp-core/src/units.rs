//! Human-readable sizes and bitrates for reports.

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// `1536 -> "1.5 KB"`. Trailing zeros of the rounded value are dropped.
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut exp = 0;
    let mut scale = 1u64;
    while exp < SIZE_UNITS.len() - 1 && bytes / scale >= 1024 {
        scale *= 1024;
        exp += 1;
    }
    let value = bytes as f64 / scale as f64;
    format!("{} {}", trim_decimals(value, decimals), SIZE_UNITS[exp])
}

fn trim_decimals(value: f64, decimals: usize) -> String {
    let fixed = format!("{value:.decimals$}");
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

pub fn format_bitrate(bits_per_second: u64) -> String {
    let bps = bits_per_second as f64;
    if bits_per_second >= 1_000_000_000 {
        format!("{:.1} Gbps", bps / 1e9)
    } else if bits_per_second >= 1_000_000 {
        format!("{:.1} Mbps", bps / 1e6)
    } else if bits_per_second >= 1_000 {
        format!("{:.1} Kbps", bps / 1e3)
    } else {
        format!("{bits_per_second} bps")
    }
}
