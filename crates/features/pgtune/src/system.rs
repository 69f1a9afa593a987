//! Host facts used when the caller does not supply them.

use crate::error::{TuneError, TuneErrorExt};

/// Total memory of the running host, formatted as `<n>kB`.
#[cfg(target_os = "linux")]
pub fn total_memory() -> Result<String, TuneError> {
    let meminfo = std::fs::read_to_string("/proc/meminfo").context("/proc/meminfo")?;
    parse_meminfo(&meminfo).ok_or_else(|| TuneError::InvalidConfiguration {
        message: "MemTotal missing from /proc/meminfo".into(),
        context: None,
    })
}

/// Total memory of the running host, formatted as `<n>kB`.
#[cfg(not(target_os = "linux"))]
pub fn total_memory() -> Result<String, TuneError> {
    Err(TuneError::InvalidConfiguration {
        message: "total_memory must be provided on this platform".into(),
        context: None,
    })
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_meminfo(meminfo: &str) -> Option<String> {
    meminfo.lines().find_map(|line| {
        let rest = line.strip_prefix("MemTotal:")?;
        let kb = rest.trim().strip_suffix("kB")?.trim();
        Some(format!("{kb}kB"))
    })
}

#[cfg(test)]
mod tests {
    use super::parse_meminfo;

    #[test]
    fn reads_mem_total_line() {
        let sample = "MemTotal:       16318220 kB\nMemFree:         1024 kB\n";
        assert_eq!(parse_meminfo(sample).as_deref(), Some("16318220kB"));
        assert_eq!(parse_meminfo("MemFree: 1 kB\n"), None);
    }
}
