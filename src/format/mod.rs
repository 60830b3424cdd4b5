//! Line-oriented network file format.
//!
//! ```text
//! generator(G1,100).
//! generator(G2,60).
//! house(M1,HIGH).
//! house(M2,LOW).
//! connection(G1,M1).
//! connection(M2,G2).
//! ```
//!
//! Capacities are integers in kW, classes are `LOW`, `NORMAL` or `HIGH`
//! (case-insensitive), and a connection names a house and a generator in
//! either order. Sections must come in the order shown; a section out of
//! order is an `Ordering` error and a malformed line a `Syntax` error,
//! both carrying the 1-based line number.

mod reader;
mod writer;

pub use reader::{parse_network, read_network};
pub use writer::{save_network, write_network};
