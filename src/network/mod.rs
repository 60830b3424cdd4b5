//! Network domain model.
//!
//! Houses (demand side) and generators (supply side), plus the
//! assignment relation saying which generator each house draws from.
//! A house has at most one generator at any time. All mutations go
//! through [`Network`] methods so the invariants stay in one place.

mod model;
mod snapshot;
mod types;

pub use model::{Network, DEFAULT_PENALTY_FACTOR};
pub use snapshot::{ConnectionRecord, GeneratorRecord, HouseRecord, NetworkSnapshot};
pub use types::{Connect, ConsumptionClass, Generator, House, Upsert};
