//! Assignment optimizer: greedy start, then Simulated Annealing (SA).
//!
//! The search state is the network's house → generator assignment and
//! the objective is [`crate::cost::cost`]. A move reassigns one random
//! house to a different random generator; worsening moves are accepted
//! with probability `exp(−Δ / T)` under a geometric cooling schedule.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies" (largest-first greedy)

mod config;
mod greedy;
mod runner;

pub use config::AnnealConfig;
pub use greedy::greedy_assign;
pub use runner::{optimize, AnnealStats, Optimizer};
