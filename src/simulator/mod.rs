//! Headless expedition simulator for balance analysis.
//!
//! Runs many expeditions to completion and aggregates the outcomes:
//! how often the player clears the roster, how often they retreat, and how
//! long runs take in simulated seconds. All runs use the same tick logic as
//! live callers, so results match real behavior.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, RunOutcome, RunStats};
