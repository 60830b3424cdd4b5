//! Load balancing of houses across generators.
//!
//! A [`network::Network`] holds houses (each with a fixed demand), generators
//! (each with a capacity) and the assignment saying which generator feeds
//! each house. The crate scores an assignment and searches for a better one:
//!
//! - **Network model** ([`network`]): houses, generators, connections and
//!   their invariants.
//! - **Cost evaluation** ([`cost`]): per-generator utilization, dispersion
//!   of utilizations, overload penalty and the combined cost.
//! - **Optimizer** ([`anneal`]): greedy initialization followed by
//!   Simulated Annealing over single-house reassignments.
//! - **File format** ([`format`]): reading and writing the line-oriented
//!   network description.
//!
//! # Example
//!
//! ```
//! use gridbalance::anneal::optimize;
//! use gridbalance::cost;
//! use gridbalance::network::{ConsumptionClass, Network};
//!
//! let mut net = Network::new();
//! net.upsert_generator("G1", 100.0).unwrap();
//! net.upsert_generator("G2", 100.0).unwrap();
//! for (name, class) in [("A", ConsumptionClass::High), ("B", ConsumptionClass::High)] {
//!     net.upsert_house(name, class).unwrap();
//!     net.connect(name, "G1").unwrap();
//! }
//!
//! let stats = optimize(&mut net, 1_000, Some(42)).unwrap();
//! assert_eq!(cost::dispersion(&net).unwrap(), 0.0);
//! assert_eq!(stats.best_cost, cost::cost(&net).unwrap());
//! ```

pub mod anneal;
pub mod cost;
pub mod error;
pub mod format;
pub mod network;

pub use error::{ErrorKind, GridError, Result};
