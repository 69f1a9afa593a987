pub mod api;
pub mod error;
pub mod slice;
mod util;
