//! Shared HTTP plumbing for feature slices.

mod error;
mod health;
pub mod router;
mod state;

pub use error::ApiError;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
