//! Command-line front end: load a network file, report on it, optimize it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gridbalance::anneal::{AnnealConfig, Optimizer};
use gridbalance::cost;
use gridbalance::format::{read_network, save_network};
use gridbalance::network::Network;
use gridbalance::Result;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print houses, generators, loads and cost
    Show {
        /// Network file
        file: PathBuf,
    },
    /// Check that every house is connected
    Validate {
        /// Network file
        file: PathBuf,
    },
    /// Rebalance the assignment with simulated annealing
    Optimize {
        /// Network file
        file: PathBuf,
        /// Maximum annealing iterations
        #[arg(long, default_value_t = 50_000)]
        iterations: usize,
        /// Random seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Overload penalty factor
        #[arg(long)]
        lambda: Option<f64>,
        /// Write the optimized network here
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn render(net: &Network) {
    println!("Houses ({})", net.houses().len());
    for house in net.houses().values() {
        let status = match net.generator_of(house.name()) {
            Some(g) => format!("connected to {}", g.name()),
            None => "not connected".to_string(),
        };
        println!(
            "  {} : {} ({} kW) | {status}",
            house.name(),
            house.class(),
            house.class().demand_kw()
        );
    }

    println!("Generators ({})", net.generators().len());
    let loads = cost::loads(net);
    for g in net.generators().values() {
        let load = loads.get(g.name()).copied().unwrap_or(0.0);
        let (rate, state) = match cost::utilization(net, g.name()) {
            Ok(u) if u > 1.0 => (format!("{:.2}%", u * 100.0), "OVERLOAD"),
            Ok(u) => (format!("{:.2}%", u * 100.0), "OK"),
            Err(_) => ("N/A".to_string(), "ERROR"),
        };
        let houses: Vec<&str> = net.houses_on(g.name()).map(|h| h.name()).collect();
        println!(
            "  {} : capacity {:.0} kW | load {load:.0} kW | utilization {rate} [{state}] | feeds: {}",
            g.name(),
            g.capacity_kw(),
            if houses.is_empty() {
                "-".to_string()
            } else {
                houses.join(", ")
            }
        );
    }

    match cost::summarize(net) {
        Ok(s) => println!(
            "Dispersion {:.4} | overload {:.4} | lambda {} | cost {:.4}",
            s.dispersion, s.overload_penalty, s.penalty_factor, s.cost
        ),
        Err(e) => println!("Cost unavailable: {e}"),
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Show { file } => {
            let net = read_network(&file)?;
            render(&net);
        }
        Command::Validate { file } => {
            let net = read_network(&file)?;
            net.validate()?;
            println!("{}: network is valid", file.display());
        }
        Command::Optimize {
            file,
            iterations,
            seed,
            lambda,
            output,
        } => {
            let mut net = read_network(&file)?;
            if let Some(lambda) = lambda {
                net.set_penalty_factor(lambda)?;
            }
            let mut config = AnnealConfig::default().with_max_iterations(iterations);
            config.seed = seed;

            let stats = Optimizer::run(&mut net, &config)?;
            info!(
                initial = stats.initial_cost,
                best = stats.best_cost,
                iterations = stats.iterations,
                "done"
            );
            render(&net);
            println!("Best cost found: {:.4}", stats.best_cost);

            if let Some(path) = output {
                save_network(&net, &path)?;
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(kind = ?e.kind(), "{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
