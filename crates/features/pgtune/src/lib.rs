//! # PostgreSQL tuning calculator
//!
//! Derives `postgresql.conf` memory and checkpoint settings from the host's
//! total memory, CPU word size and an expected workload.
//!
//! * [`round_to_four_significant_bits`] truncates byte counts to their top four
//!   bits and renders them as `GB`/`MB`/`kB`.
//! * [`TuningRequest`] carries the raw attributes, [`TuningProfile`] the result.
//!
//! ```
//! use psf_pgtune::TuningRequest;
//!
//! let request = TuningRequest {
//!     db_type: Some("web".into()),
//!     total_memory: Some("4194304kB".into()),
//!     machine: Some("x86_64".into()),
//!     ..TuningRequest::default()
//! };
//! let profile = request.tune().unwrap();
//! assert_eq!(profile.memory.unwrap().shared_buffers, "1GB");
//! ```

mod error;
#[cfg(feature = "server")]
pub mod handlers;
pub mod profile;
pub mod round;
pub mod system;
pub mod workload;

pub use crate::error::{TuneError, TuneErrorExt};
pub use crate::profile::{MemorySettings, TuningInputs, TuningProfile, TuningRequest};
pub use crate::round::round_to_four_significant_bits;
pub use crate::workload::{Architecture, ServerVersion, WorkloadType};

use psf_domain::config::{ApiConfig, PgtuneConfig};
use psf_kernel::domain::registry::InitializedSlice;

/// Tuning feature state: the configured defaults requests are merged onto.
#[psf_derive::psf_slice]
pub struct Pgtune {
    pub defaults: PgtuneConfig,
}

/// Initialize the tuning feature.
///
/// The configured workload is validated eagerly so a typo fails at startup.
///
/// # Errors
/// [`TuneError::InvalidConfiguration`] when the configured `db_type` is unknown.
pub fn init(cfg: &ApiConfig) -> Result<InitializedSlice, TuneError> {
    let defaults = cfg.pgtune.clone();
    let workload: WorkloadType = defaults.db_type.parse::<WorkloadType>().context("pgtune")?;

    tracing::info!(workload = %workload, machine = %defaults.machine, "Pgtune slice initialized");

    Ok(InitializedSlice::new(Pgtune::new(PgtuneInner { defaults })))
}
