//! Annealing loop over the network assignment.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::config::AnnealConfig;
use super::greedy::greedy_assign;
use crate::cost;
use crate::error::Result;
use crate::network::Network;

/// Statistics of an optimizer run.
#[derive(Debug, Clone)]
pub struct AnnealStats {
    /// Cost of the greedy starting assignment.
    pub initial_cost: f64,

    /// Cost of the committed (best) assignment.
    pub best_cost: f64,

    /// Number of annealing iterations executed.
    pub iterations: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Best cost sampled every `history_interval` iterations, with the
    /// starting and final values always present. Non-increasing.
    pub cost_history: Vec<f64>,
}

impl AnnealStats {
    fn idle(config: &AnnealConfig, cost: f64) -> Self {
        Self {
            initial_cost: cost,
            best_cost: cost,
            iterations: 0,
            accepted_moves: 0,
            improving_moves: 0,
            final_temperature: config.initial_temperature,
            cost_history: vec![cost],
        }
    }
}

/// Greedy initialization followed by simulated annealing.
///
/// Each iteration moves one random house to a different random generator
/// and keeps the move under the Metropolis criterion; rejected moves are
/// rolled back. At the end the best assignment seen is committed to the
/// network, whatever state the walk ended in.
///
/// The run holds `&mut Network` throughout, so no other edit can
/// interleave with it.
pub struct Optimizer;

impl Optimizer {
    /// Runs with a generator seeded from `config.seed`, or from the OS
    /// when no seed is set.
    pub fn run(net: &mut Network, config: &AnnealConfig) -> Result<AnnealStats> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::run_with_rng(net, config, &mut rng)
    }

    /// Runs with a caller-supplied random source.
    ///
    /// On error (a zero-capacity generator, typically) the network's
    /// assignment is restored to what it was before the call.
    pub fn run_with_rng<R: Rng>(
        net: &mut Network,
        config: &AnnealConfig,
        rng: &mut R,
    ) -> Result<AnnealStats> {
        config.validate()?;

        if net.houses().is_empty() || net.generators().is_empty() {
            warn!(
                houses = net.houses().len(),
                generators = net.generators().len(),
                "nothing to optimize"
            );
            // Nothing is reassigned, but the reported cost is still the
            // evaluator's, so a zero-capacity generator fails here too.
            let cost = cost::cost(net)?;
            return Ok(AnnealStats::idle(config, cost));
        }

        let before = net.assignment().clone();
        match anneal(net, config, rng) {
            Ok(stats) => Ok(stats),
            Err(err) => {
                warn!(error = %err, "optimization aborted, previous assignment restored");
                net.replace_assignment(before);
                Err(err)
            }
        }
    }
}

fn anneal<R: Rng>(net: &mut Network, config: &AnnealConfig, rng: &mut R) -> Result<AnnealStats> {
    info!(
        houses = net.houses().len(),
        generators = net.generators().len(),
        max_iterations = config.max_iterations,
        "optimization started"
    );

    greedy_assign(net)?;
    let mut current_cost = cost::cost(net)?;
    let initial_cost = current_cost;
    let mut best = net.assignment().clone();
    let mut best_cost = current_cost;
    debug!(cost = initial_cost, "greedy assignment");

    let houses: Vec<String> = net.houses().keys().cloned().collect();
    // Sorted, since they come from an ordered map.
    let generators: Vec<String> = net.generators().keys().cloned().collect();

    if generators.len() < 2 {
        info!(cost = best_cost, "single generator, assignment is fixed");
        return Ok(AnnealStats::idle(config, best_cost));
    }

    let mut temperature = config.initial_temperature;
    let mut iterations = 0usize;
    let mut accepted_moves = 0usize;
    let mut improving_moves = 0usize;
    let mut cost_history = vec![best_cost];

    while iterations < config.max_iterations {
        let house = &houses[rng.random_range(0..houses.len())];

        // Uniform over the generators other than the current one.
        let current = net
            .assignment()
            .get(house)
            .and_then(|g| generators.binary_search(g).ok());
        let target = match current {
            Some(i) => {
                let j = rng.random_range(0..generators.len() - 1);
                if j >= i {
                    j + 1
                } else {
                    j
                }
            }
            None => rng.random_range(0..generators.len()),
        };

        let previous = net.assign(house, &generators[target]);
        let new_cost = cost::cost(net)?;
        let delta = new_cost - current_cost;

        // Metropolis acceptance criterion
        let accept = if delta < 0.0 {
            improving_moves += 1;
            true
        } else {
            rng.random_range(0.0..1.0) < (-delta / temperature).exp()
        };

        if accept {
            current_cost = new_cost;
            accepted_moves += 1;
            if current_cost < best_cost {
                best = net.assignment().clone();
                best_cost = current_cost;
            }
        } else {
            net.restore(house, previous);
        }

        iterations += 1;
        if iterations.is_multiple_of(config.history_interval) {
            cost_history.push(best_cost);
        }

        temperature *= config.cooling_rate;
        if temperature < config.min_temperature {
            break;
        }
    }

    net.replace_assignment(best);

    if cost_history
        .last()
        .is_none_or(|&last| (last - best_cost).abs() > 1e-15)
    {
        cost_history.push(best_cost);
    }

    info!(
        initial_cost,
        best_cost, iterations, accepted_moves, "optimization finished"
    );

    Ok(AnnealStats {
        initial_cost,
        best_cost,
        iterations,
        accepted_moves,
        improving_moves,
        final_temperature: temperature,
        cost_history,
    })
}

/// Optimizes `net` in place with default parameters and returns the run
/// statistics. `seed` makes the run reproducible.
pub fn optimize(net: &mut Network, max_iterations: usize, seed: Option<u64>) -> Result<AnnealStats> {
    let mut config = AnnealConfig::default().with_max_iterations(max_iterations);
    config.seed = seed;
    Optimizer::run(net, &config)
}
