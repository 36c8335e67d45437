//! Combat entities, expedition state machine, and opponent generation.

pub mod generation;
pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
