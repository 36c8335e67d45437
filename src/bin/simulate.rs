//! Expedition balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # Default: 1000 runs
//!   cargo run --bin simulate -- -n 100 -d 5      # 100 runs at difficulty 5
//!   cargo run --bin simulate -- --seed 42        # Reproducible run

use expedition::build_info::{BUILD_COMMIT, BUILD_DATE};
use expedition::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!(
        "Expedition simulator ({} built {})",
        BUILD_COMMIT, BUILD_DATE
    );
    println!();
    println!("Configuration:");
    println!("  Runs:        {}", config.num_runs);
    println!("  Difficulty:  {}", config.difficulty);
    println!("  Roster size: {}", config.roster_size);
    println!("  Tick dt:     {}s", config.delta_time);
    if let Some(seed) = config.seed {
        println!("  Seed:        {}", seed);
    }
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-d" | "--difficulty" => {
                if i + 1 < args.len() {
                    config.difficulty = args[i + 1].parse().unwrap_or(1);
                    i += 1;
                }
            }
            "-r" | "--roster" => {
                if i + 1 < args.len() {
                    config.roster_size = args[i + 1].parse().unwrap_or(3);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--dt" => {
                if i + 1 < args.len() {
                    config.delta_time = args[i + 1].parse().unwrap_or(0.1);
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    config
}
