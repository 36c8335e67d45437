//! Core constants and read-side views.

pub mod constants;
pub mod status;

pub use constants::*;
pub use status::*;
