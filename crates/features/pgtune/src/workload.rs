//! Inputs the sizing tables are keyed on.

use crate::error::TuneError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Expected database workload.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadType {
    /// Data warehouse.
    Dw,
    /// Online transaction processing.
    Oltp,
    Web,
    #[default]
    Mixed,
    Desktop,
}

impl WorkloadType {
    pub const ALL: [Self; 5] = [Self::Dw, Self::Oltp, Self::Web, Self::Mixed, Self::Desktop];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dw => "dw",
            Self::Oltp => "oltp",
            Self::Web => "web",
            Self::Mixed => "mixed",
            Self::Desktop => "desktop",
        }
    }

    /// Connection count used when no override is configured.
    #[must_use]
    pub const fn default_connections(self) -> u64 {
        match self {
            Self::Web => 200,
            Self::Oltp => 300,
            Self::Dw => 20,
            Self::Mixed => 80,
            Self::Desktop => 5,
        }
    }

    pub(crate) const fn shared_buffers_mb(self, mem: u64) -> u64 {
        match self {
            Self::Desktop => mem / 16,
            _ => mem / 4,
        }
    }

    pub(crate) const fn effective_cache_size_mb(self, mem: u64) -> u64 {
        match self {
            Self::Desktop => mem / 4,
            _ => mem * 3 / 4,
        }
    }

    /// `per_connection` is total memory divided by the connection count.
    pub(crate) const fn work_mem_mb(self, per_connection: u64) -> u64 {
        match self {
            Self::Web | Self::Oltp => per_connection,
            Self::Dw | Self::Mixed => per_connection / 2,
            Self::Desktop => per_connection / 6,
        }
    }

    pub(crate) const fn maintenance_work_mem_mb(self, mem: u64) -> u64 {
        match self {
            Self::Dw => mem / 8,
            _ => mem / 16,
        }
    }

    pub(crate) const fn checkpoint_segments(self) -> u64 {
        match self {
            Self::Web => 8,
            Self::Oltp | Self::Mixed => 16,
            Self::Dw => 64,
            Self::Desktop => 3,
        }
    }

    pub(crate) const fn checkpoint_completion_target(self) -> &'static str {
        match self {
            Self::Web => "0.7",
            Self::Desktop => "0.5",
            _ => "0.9",
        }
    }

    pub(crate) const fn default_statistics_target(self) -> u64 {
        match self {
            Self::Dw => 500,
            _ => 100,
        }
    }
}

impl fmt::Display for WorkloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkloadType {
    type Err = TuneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s).ok_or_else(|| {
            TuneError::bad_value(s, "pgtune.db_type", "one of dw, oltp, web, mixed, desktop")
        })
    }
}

/// CPU word size of the database host, as reported by `uname -m`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Architecture {
    I386,
    X86_64,
    Other(String),
}

impl Architecture {
    #[must_use]
    pub fn from_machine(machine: &str) -> Self {
        match machine {
            // `x86` is how the toolchain names i386 hosts.
            "i386" | "x86" => Self::I386,
            "x86_64" => Self::X86_64,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Architecture of the running process.
    #[must_use]
    pub fn host() -> Self {
        Self::from_machine(std::env::consts::ARCH)
    }

    /// Ceiling for `shared_buffers`, in MB. Unknown machines are not capped.
    #[must_use]
    pub const fn shared_buffers_cap_mb(&self) -> Option<u64> {
        match self {
            Self::I386 => Some(2 * 1024),
            Self::X86_64 => Some(8 * 1024),
            Self::Other(_) => None,
        }
    }
}

/// `major.minor` PostgreSQL server version; a patch component is accepted and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
}

impl ServerVersion {
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Since 9.1 the server sizes `wal_buffers` itself when given `-1`.
    #[must_use]
    pub fn auto_tunes_wal_buffers(self) -> bool {
        self >= Self::new(9, 1)
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ServerVersion {
    type Err = TuneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TuneError::bad_value(s, "pgtune.version", "versions like 9.3 or 16");
        let mut parts = s.trim().split('.');
        let major = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let minor = match parts.next() {
            Some(part) => part.parse().map_err(|_| invalid())?,
            None => 0,
        };
        Ok(Self { major, minor })
    }
}
