//! Simulation report generation.

use super::runner::{RunOutcome, RunStats};

/// Aggregated results from multiple simulated expeditions.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub num_runs: u32,
    pub completed_runs: u32,
    pub retreated_runs: u32,
    pub failed_runs: u32,
    pub timed_out_runs: u32,

    pub avg_opponents_defeated: f64,
    /// Average simulated seconds per run (travel through return to Idle).
    pub avg_sim_seconds: f64,
}

impl SimReport {
    /// Aggregates per-run stats into a report.
    pub fn from_runs(runs: &[RunStats], delta_time: f64) -> Self {
        let num_runs = runs.len() as u32;
        let count = |outcome: RunOutcome| {
            runs.iter().filter(|run| run.outcome == outcome).count() as u32
        };

        let total_defeated: u64 = runs.iter().map(|run| run.opponents_defeated as u64).sum();
        let total_ticks: u64 = runs.iter().map(|run| run.ticks).sum();
        let denom = num_runs.max(1) as f64;

        Self {
            num_runs,
            completed_runs: count(RunOutcome::Completed),
            retreated_runs: count(RunOutcome::Retreated),
            failed_runs: count(RunOutcome::Failed),
            timed_out_runs: count(RunOutcome::TimedOut),
            avg_opponents_defeated: total_defeated as f64 / denom,
            avg_sim_seconds: total_ticks as f64 * delta_time / denom,
        }
    }

    /// Human-readable summary for the CLI.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== EXPEDITION SIMULATION REPORT ===\n");
        out.push_str(&format!("Runs:               {}\n", self.num_runs));
        out.push_str(&format!(
            "Completed:          {} ({:.1}%)\n",
            self.completed_runs,
            100.0 * self.completed_runs as f64 / self.num_runs.max(1) as f64
        ));
        out.push_str(&format!("Retreated:          {}\n", self.retreated_runs));
        out.push_str(&format!("Failed:             {}\n", self.failed_runs));
        out.push_str(&format!("Timed out:          {}\n", self.timed_out_runs));
        out.push_str(&format!(
            "Avg foes defeated:  {:.2}\n",
            self.avg_opponents_defeated
        ));
        out.push_str(&format!(
            "Avg run duration:   {:.1}s simulated\n",
            self.avg_sim_seconds
        ));
        out
    }
}
