//! Human-readable sizes

/// 100 MB, the threshold above which a candidate is flagged as large
pub const LARGE_FOOTPRINT_KB: u64 = 100 * 1024;

/// Format a size given in KiB, e.g. `512 KB`, `3.2 MB`, `1.5 GB`.
pub fn format_size_kb(kb: u64) -> String {
    const MB: u64 = 1024;
    const GB: u64 = 1024 * 1024;

    if kb >= GB {
        format!("{:.1} GB", kb as f64 / GB as f64)
    } else if kb >= MB {
        format!("{:.1} MB", kb as f64 / MB as f64)
    } else {
        format!("{} KB", kb)
    }
}
