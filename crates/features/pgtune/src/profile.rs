//! Sizing policy: raw provisioning attributes in, `postgresql.conf` values out.

use crate::error::TuneError;
use crate::round::round_to_four_significant_bits;
use crate::system;
use crate::workload::{Architecture, ServerVersion, WorkloadType};
use psf_derive::api_model;
use psf_domain::config::PgtuneConfig;
use serde::Serialize;

/// Below this much memory (MB) the server defaults are left alone.
pub const MIN_TUNED_MEMORY_MB: u64 = 256;

/// Ceiling for `maintenance_work_mem`, in MB.
pub const MAINTENANCE_WORK_MEM_CAP_MB: u64 = 1024;

const MB: u64 = 1024 * 1024;

#[api_model]
#[derive(Default, Clone, PartialEq, Eq)]
/// Tuning attributes as the provisioning layer supplies them.
///
/// Every field is optional; missing values fall back to configured defaults and,
/// for `total_memory` and `machine`, to the running host.
pub struct TuningRequest {
    /// One of `dw`, `oltp`, `web`, `mixed`, `desktop`
    #[serde(default)]
    pub db_type: Option<String>,
    /// Non-zero integer overriding the workload's connection count
    #[serde(default)]
    pub max_connections: Option<String>,
    /// Total memory as `<n>kB`, e.g. `49416564kB`
    #[serde(default)]
    pub total_memory: Option<String>,
    /// `uname -m` of the database host
    #[serde(default)]
    pub machine: Option<String>,
    /// PostgreSQL server version, e.g. `9.3`
    #[serde(default)]
    pub version: Option<String>,
}

impl From<&PgtuneConfig> for TuningRequest {
    fn from(cfg: &PgtuneConfig) -> Self {
        Self {
            db_type: Some(cfg.db_type.clone()),
            max_connections: cfg.max_connections.clone(),
            total_memory: cfg.total_memory.clone(),
            machine: Some(cfg.machine.clone()),
            version: Some(cfg.version.clone()),
        }
    }
}

impl TuningRequest {
    /// Fills every unset field from `defaults`.
    #[must_use]
    pub fn or_defaults(self, defaults: &PgtuneConfig) -> Self {
        Self {
            db_type: self.db_type.or_else(|| Some(defaults.db_type.clone())),
            max_connections: self.max_connections.or_else(|| defaults.max_connections.clone()),
            total_memory: self.total_memory.or_else(|| defaults.total_memory.clone()),
            machine: self.machine.or_else(|| Some(defaults.machine.clone())),
            version: self.version.or_else(|| Some(defaults.version.clone())),
        }
    }

    /// Validates the raw attributes.
    ///
    /// # Errors
    /// [`TuneError::InvalidConfiguration`] for an unknown workload, a zero or
    /// non-numeric connection count, a malformed memory size or version.
    /// [`TuneError::Io`] when memory has to be detected and cannot be read.
    pub fn validate(&self) -> Result<TuningInputs, TuneError> {
        let workload = match self.db_type.as_deref() {
            Some(raw) => raw.parse::<WorkloadType>()?,
            None => WorkloadType::default(),
        };

        let connections = match self.max_connections.as_deref() {
            Some(raw) => parse_connections(raw)?,
            None => workload.default_connections(),
        };

        let total_memory_kb = match self.total_memory.as_deref() {
            Some(raw) => parse_memory_kb(raw)?,
            None => parse_memory_kb(&system::total_memory()?)?,
        };

        let architecture = self
            .machine
            .as_deref()
            .map_or_else(Architecture::host, Architecture::from_machine);

        let version = match self.version.as_deref() {
            Some(raw) => raw.parse::<ServerVersion>()?,
            None => ServerVersion::new(9, 3),
        };

        Ok(TuningInputs {
            workload,
            connections,
            memory_mb: total_memory_kb / 1024,
            architecture,
            version,
        })
    }

    /// Validates the attributes and computes the profile.
    pub fn tune(&self) -> Result<TuningProfile, TuneError> {
        Ok(TuningProfile::calculate(&self.validate()?))
    }
}

/// `/\A[1-9]\d*\z/`
fn is_positive_integer(raw: &str) -> bool {
    let mut chars = raw.chars();
    matches!(chars.next(), Some('1'..='9')) && chars.all(|c| c.is_ascii_digit())
}

fn parse_connections(raw: &str) -> Result<u64, TuneError> {
    let invalid = || TuneError::bad_value(raw, "pgtune.max_connections", "non-zero integers only");
    if !is_positive_integer(raw) {
        return Err(invalid());
    }
    raw.parse().map_err(|_| invalid())
}

fn parse_memory_kb(raw: &str) -> Result<u64, TuneError> {
    let invalid = || {
        TuneError::bad_value(
            raw,
            "pgtune.total_memory",
            "non-zero integers followed by kB (e.g., 49416564kB)",
        )
    };
    let digits = raw.strip_suffix("kB").filter(|d| is_positive_integer(d)).ok_or_else(invalid)?;
    let kb: u64 = digits.parse().map_err(|_| invalid())?;
    // Derived settings are rendered in bytes.
    if (kb / 1024).checked_mul(MB).is_none() {
        return Err(TuneError::bad_value(
            raw,
            "pgtune.total_memory",
            "sizes whose byte count fits in 64 bits",
        ));
    }
    Ok(kb)
}

/// Validated inputs of the sizing tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuningInputs {
    pub workload: WorkloadType,
    pub connections: u64,
    /// Total memory in whole MB.
    pub memory_mb: u64,
    pub architecture: Architecture,
    pub version: ServerVersion,
}

/// Memory-derived settings, emitted only for hosts with at least [`MIN_TUNED_MEMORY_MB`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct MemorySettings {
    pub shared_buffers: String,
    pub effective_cache_size: String,
    pub work_mem: String,
    pub maintenance_work_mem: String,
}

/// Recommended `postgresql.conf` values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct TuningProfile {
    pub max_connections: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemorySettings>,
    pub checkpoint_segments: u64,
    pub checkpoint_completion_target: String,
    pub wal_buffers: String,
    pub default_statistics_target: u64,
}

impl TuningProfile {
    #[must_use]
    pub fn calculate(inputs: &TuningInputs) -> Self {
        let TuningInputs { workload, connections, memory_mb: mem, .. } = *inputs;

        let memory = (mem >= MIN_TUNED_MEMORY_MB).then(|| {
            let shared_buffers = inputs
                .architecture
                .shared_buffers_cap_mb()
                .map_or(workload.shared_buffers_mb(mem), |cap| {
                    workload.shared_buffers_mb(mem).min(cap)
                });
            let maintenance =
                workload.maintenance_work_mem_mb(mem).min(MAINTENANCE_WORK_MEM_CAP_MB);

            MemorySettings {
                shared_buffers: round_to_four_significant_bits(shared_buffers * MB),
                effective_cache_size: round_to_four_significant_bits(
                    workload.effective_cache_size_mb(mem) * MB,
                ),
                work_mem: round_to_four_significant_bits(
                    workload.work_mem_mb(mem.checked_div(connections).unwrap_or(0)) * MB,
                ),
                maintenance_work_mem: round_to_four_significant_bits(maintenance * MB),
            }
        });

        let checkpoint_segments = workload.checkpoint_segments();
        let wal_buffers = if inputs.version.auto_tunes_wal_buffers() {
            "-1".to_owned()
        } else {
            round_to_four_significant_bits(512 * checkpoint_segments * 1024)
        };

        tracing::debug!(
            workload = %workload,
            connections,
            memory_mb = mem,
            tuned_memory = memory.is_some(),
            "Calculated tuning profile"
        );

        Self {
            max_connections: connections,
            memory,
            checkpoint_segments,
            checkpoint_completion_target: workload.checkpoint_completion_target().to_owned(),
            wal_buffers,
            default_statistics_target: workload.default_statistics_target(),
        }
    }

    /// Settings as `(name, value)` pairs in `postgresql.conf` order.
    #[must_use]
    pub fn settings(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![("max_connections", self.max_connections.to_string())];
        if let Some(memory) = &self.memory {
            out.extend([
                ("shared_buffers", memory.shared_buffers.clone()),
                ("effective_cache_size", memory.effective_cache_size.clone()),
                ("work_mem", memory.work_mem.clone()),
                ("maintenance_work_mem", memory.maintenance_work_mem.clone()),
            ]);
        }
        out.extend([
            ("checkpoint_segments", self.checkpoint_segments.to_string()),
            ("checkpoint_completion_target", self.checkpoint_completion_target.clone()),
            ("wal_buffers", self.wal_buffers.clone()),
            ("default_statistics_target", self.default_statistics_target.to_string()),
        ]);
        out
    }
}
