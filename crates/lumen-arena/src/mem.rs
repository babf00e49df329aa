//! Free-memory detection for default arena sizing.
//!
//! Callers can always pass an explicit byte count to the sizer; this
//! module supplies the default when they don't. On Linux it reads
//! `MemAvailable` from `/proc/meminfo`; elsewhere it falls back to a
//! conservative constant.

/// Fallback figure when the platform query is unavailable or fails.
const FALLBACK_BYTES: u64 = 1 << 30;

/// Best-effort available system memory in bytes.
pub fn available_memory() -> u64 {
    #[cfg(target_os = "linux")]
    {
        if let Ok(contents) = std::fs::read_to_string("/proc/meminfo") {
            if let Some(bytes) = parse_meminfo_available(&contents) {
                return bytes;
            }
        }
    }
    FALLBACK_BYTES
}

/// Extract `MemAvailable` (reported in kB) from `/proc/meminfo` text.
fn parse_meminfo_available(contents: &str) -> Option<u64> {
    let line = contents
        .lines()
        .find(|l| l.starts_with("MemAvailable:"))?;
    let kb: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    kb.checked_mul(1024)
}
