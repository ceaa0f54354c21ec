//! Host memory snapshot from /proc/meminfo, used for progress notices.

use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct MemInfo {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub swap_total_bytes: u64,
    pub swap_free_bytes: u64,
}

/// Parse /proc/meminfo and pick out the totals worth reporting next to an
/// allocation. Values are reported by the kernel in kB.
pub fn read() -> Result<MemInfo> {
    let file = File::open("/proc/meminfo").context("open /proc/meminfo")?;
    let reader = BufReader::new(file);

    let mut info = MemInfo::default();
    for line_res in reader.lines() {
        let line = line_res.context("read /proc/meminfo line")?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            continue;
        }

        let key = parts[0].trim_end_matches(':');
        let value_kb: u64 = parts[1].parse().unwrap_or(0);
        let value_bytes = value_kb * 1024;

        match key {
            "MemTotal" => info.total_bytes = value_bytes,
            "MemAvailable" => info.available_bytes = value_bytes,
            "SwapTotal" => info.swap_total_bytes = value_bytes,
            "SwapFree" => info.swap_free_bytes = value_bytes,
            _ => {}
        }
    }

    Ok(info)
}
